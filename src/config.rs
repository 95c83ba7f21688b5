//! Configuration for credential handling, prompt shape and error mapping

use std::fmt;
use serde::{Deserialize, Serialize};
use log::{debug, warn};

pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20240620";
pub const DEFAULT_API_BASE: &str = "https://api.anthropic.com";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";
const REDACTED: &str = "<redacted>";
pub const DEFAULT_ROUTE_PATH: &str
  = "/.netlify/functions/generate-content";

/// Phrases the enhanced template tells the model to avoid
pub const DEFAULT_BANNED_PHRASES: &[&str] = &[
  "game-changer"
, "revolutionary"
, "cutting-edge"
, "unlock your potential"
, "take it to the next level"
, "in today's fast-paced world"
, "look no further"
, "seamless"
, "synergy"
, "best-kept secret"
];

/// Provider API key. Neither Debug nor Serialize output shows the secret.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey
{   pub fn new(key: impl Into<String>) -> Self
    {   ApiKey(key.into())
    }

    pub fn expose(&self) -> &str
    {   &self.0
    }
}

impl Serialize for ApiKey
{   fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: serde::Serializer
    {   serializer.serialize_str(REDACTED)
    }
}

impl fmt::Debug for ApiKey
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   write!(f, "ApiKey({})", REDACTED)
    }
}

/// Where the provider credential comes from. One per deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialMode
{   /// Caller sends `apiKey` with every request
    CallerSupplied
  , /// Key read once at process start; None means not configured
    ServerHeld(Option<ApiKey>)
}

/// How the caller's product description becomes the provider prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromptTemplate
{   /// Caller prompt forwarded verbatim
    Raw
  , /// Caller prompt wrapped in the landing page instruction
    Enhanced
    {   banned_phrases: Vec<String>
    }
}

impl PromptTemplate
{   pub fn enhanced() -> Self
    {   PromptTemplate::Enhanced
        {   banned_phrases: DEFAULT_BANNED_PHRASES
              .iter()
              .map(|p| p.to_string())
              .collect()
        }
    }
}

/// Fixed generation parameters sent to the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig
{   /// Model used when the request does not name one
    pub default_model: String
  , /// Max tokens to generate
    pub max_tokens: u32
  , /// Sampling temperature, omitted from the payload when None
    pub temperature: Option<f32>
  , /// Provider base URL
    pub api_base: String
  , /// Value of the anthropic-version header
    pub api_version: String
}

impl Default for GenerationConfig
{   fn default() -> Self
    {   GenerationConfig
        {   default_model: DEFAULT_MODEL.to_string()
          , max_tokens: 2000
          , temperature: Some(0.9)
          , api_base: DEFAULT_API_BASE.to_string()
          , api_version: ANTHROPIC_VERSION.to_string()
        }
    }
}

/// Status and label choices for the error envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPolicy
{   /// Malformed request bodies answer 400 when set, 500 otherwise
    pub strict_body_errors: bool
  , /// `error` label for provider side and lenient failures
    pub generic_label: String
  , /// `message` used when nothing better can be extracted
    pub fallback_message: String
}

impl Default for ErrorPolicy
{   fn default() -> Self
    {   ErrorPolicy
        {   strict_body_errors: true
          , generic_label: "Function error".to_string()
          , fallback_message:
              "Content generation failed. Please try again."
                .to_string()
        }
    }
}

impl ErrorPolicy
{   /// Mapping of the legacy server-held handler
    pub fn legacy() -> Self
    {   ErrorPolicy
        {   strict_body_errors: false
          , generic_label: "Generation failed".to_string()
          , ..ErrorPolicy::default()
        }
    }
}

/// Listener settings for the server binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig
{   pub host: String
  , pub port: u16
  , pub route_path: String
}

impl Default for ServerConfig
{   fn default() -> Self
    {   ServerConfig
        {   host: "0.0.0.0".to_string()
          , port: 8888
          , route_path: DEFAULT_ROUTE_PATH.to_string()
        }
    }
}

/// Complete proxy configuration, injected into the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig
{   pub credential_mode: CredentialMode
  , pub template: PromptTemplate
  , pub generation: GenerationConfig
  , pub errors: ErrorPolicy
  , pub server: ServerConfig
}

impl Default for ProxyConfig
{   fn default() -> Self
    {   ProxyConfig
        {   credential_mode: CredentialMode::ServerHeld(None)
          , template: PromptTemplate::enhanced()
          , generation: GenerationConfig::default()
          , errors: ErrorPolicy::default()
          , server: ServerConfig::default()
        }
    }
}

impl ProxyConfig
{   /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, crate::error::Error>
    {   Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from any name to value lookup
    pub fn from_lookup<F>(lookup: F)
      -> Result<Self, crate::error::Error>
    where F: Fn(&str) -> Option<String>
    {   let get = |name: &str| {
          lookup(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
        };

        let mut config = ProxyConfig::default();

        config.credential_mode = match get("CREDENTIAL_MODE").as_deref()
        {   None | Some("server") => {
              let key = get("CLAUDE_API_KEY").map(ApiKey::new);
              if key.is_none()
              {   warn!("CLAUDE_API_KEY not set, requests will fail");
              }
              CredentialMode::ServerHeld(key)
            }
          , Some("caller") => CredentialMode::CallerSupplied
          , Some(other) => {
              return Err(crate::error::Error::InvalidConfiguration(
                format!("unknown CREDENTIAL_MODE: {}", other)
              ));
            }
        };

        config.template = match get("PROMPT_TEMPLATE").as_deref()
        {   None | Some("enhanced") => PromptTemplate::enhanced()
          , Some("raw") => PromptTemplate::Raw
          , Some(other) => {
              return Err(crate::error::Error::InvalidConfiguration(
                format!("unknown PROMPT_TEMPLATE: {}", other)
              ));
            }
        };

        if let Some(model) = get("CLAUDE_MODEL")
        {   config.generation.default_model = model;
        }
        if let Some(raw) = get("MAX_TOKENS")
        {   config.generation.max_tokens
              = parse_var("MAX_TOKENS", &raw)?;
        }
        if let Some(raw) = get("TEMPERATURE")
        {   config.generation.temperature = match raw.as_str()
            {   "none" => None
              , _ => Some(parse_var("TEMPERATURE", &raw)?)
            };
        }
        if let Some(base) = get("ANTHROPIC_API_BASE")
        {   config.generation.api_base
              = base.trim_end_matches('/').to_string();
        }
        if let Some(raw) = get("STRICT_BODY_ERRORS")
        {   config.errors.strict_body_errors
              = parse_var("STRICT_BODY_ERRORS", &raw)?;
        }
        if let Some(label) = get("GENERIC_ERROR_LABEL")
        {   config.errors.generic_label = label;
        }
        if let Some(host) = get("HOST")
        {   config.server.host = host;
        }
        if let Some(raw) = get("PORT")
        {   config.server.port = parse_var("PORT", &raw)?;
        }
        if let Some(path) = get("ROUTE_PATH")
        {   config.server.route_path = path;
        }

        debug!("Loaded proxy configuration: {:?}", config);
        Ok(config)
    }
}

fn parse_var<T>(name: &str, raw: &str)
  -> Result<T, crate::error::Error>
where T: std::str::FromStr
{   raw.parse::<T>().map_err(|_| {
      crate::error::Error::InvalidConfiguration(
        format!("{} has invalid value: {}", name, raw)
      )
    })
}
