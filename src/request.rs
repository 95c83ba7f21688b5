//! Request, payload and response types for the generation pipeline

use serde::{Deserialize, Serialize};

/// Inbound generation request as sent by the landing page frontend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest
{   /// Provider key, only read in caller-supplied mode
    #[serde(rename = "apiKey", default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>
  , /// Product description to write copy for
    #[serde(default)]
    pub prompt: Option<String>
  , /// Model override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>
}

/// One chat message in the provider payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message
{   pub role: String
  , pub content: String
}

/// Body of the provider messages call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderPayload
{   pub model: String
  , pub max_tokens: u32
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>
  , pub messages: Vec<Message>
}

/// Why a provider call did not produce usable output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderFailure
{   /// Non-2xx status with whatever body came back
    Http
    {   status: u16
      , raw_body: String
    }
  , /// 2xx status but the body is not JSON
    Parse
    {   status: u16
      , detail: String
    }
  , /// No HTTP status at all
    Transport
    {   detail: String
    }
}

/// Outcome of exactly one provider call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderResult
{   Success
    {   status: u16
      , body: String
    }
  , Failure(ProviderFailure)
}

/// JSON error envelope returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody
{   pub error: String
  , #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>
}

/// Caller facing result of the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedResponse
{   /// Provider body passed through untouched
    Ok
    {   body: String
    }
  , Err
    {   status: u16
      , body: ErrorBody
    }
}

impl NormalizedResponse
{   pub fn status(&self) -> u16
    {   match self
        {   NormalizedResponse::Ok { .. } => 200
          , NormalizedResponse::Err { status, .. } => *status
        }
    }

    /// Serialized response body
    pub fn into_body(self) -> String
    {   match self
        {   NormalizedResponse::Ok { body } => body
          , NormalizedResponse::Err { body, .. } => {
              let mut json = serde_json::json!({ "error": body.error });
              if let Some(message) = body.message
              {   json["message"] = serde_json::Value::String(message);
              }
              json.to_string()
            }
        }
    }
}
