use async_trait::async_trait;
use log::{debug, error, trace};
use serde::de::IgnoredAny;

use crate::config::{ApiKey, GenerationConfig};
use crate::request::{ProviderFailure, ProviderPayload, ProviderResult};

const MESSAGES_PATH: &str = "/v1/messages";

/// Client for the Anthropic Messages API
#[derive(Debug, Clone)]
pub struct AnthropicClient
{   http_client: reqwest::Client
  , api_base: String
  , api_version: String
}

impl AnthropicClient
{   pub fn new(generation: &GenerationConfig) -> Self
    {   debug!("Creating AnthropicClient for {}", generation.api_base);
        AnthropicClient
        {   http_client: reqwest::Client::new()
          , api_base: generation.api_base
              .trim_end_matches('/')
              .to_string()
          , api_version: generation.api_version.clone()
        }
    }

    fn messages_url(&self) -> String
    {   format!("{}{}", self.api_base, MESSAGES_PATH)
    }
}

#[async_trait]
impl crate::providers::ProviderClient for AnthropicClient
{   async fn send(
      &self
    , payload: &ProviderPayload
    , key: &ApiKey
    ) -> ProviderResult
    {   debug!("Sending messages request for model: {}", payload.model);

        let response = match self.http_client
          .post(self.messages_url())
          .header("x-api-key", key.expose())
          .header("anthropic-version", self.api_version.as_str())
          .header("Content-Type", "application/json")
          .json(payload)
          .send()
          .await
        {   Ok(r) => r
          , Err(e) => {
              error!("HTTP error: {}", e);
              return ProviderResult::Failure(
                ProviderFailure::Transport { detail: e.to_string() }
              );
            }
        };

        let status = response.status();
        trace!("Anthropic response status: {}", status);

        let body = match response.text().await
        {   Ok(b) => b
          , Err(e) => {
              error!("Failed reading response body: {}", e);
              return ProviderResult::Failure(
                ProviderFailure::Transport { detail: e.to_string() }
              );
            }
        };

        if !status.is_success()
        {   error!("Anthropic API error: status {}", status);
            return ProviderResult::Failure(ProviderFailure::Http
            {   status: status.as_u16()
              , raw_body: body
            });
        }

        if let Err(e) = serde_json::from_str::<IgnoredAny>(&body)
        {   error!("Parse error: {}", e);
            return ProviderResult::Failure(ProviderFailure::Parse
            {   status: status.as_u16()
              , detail: e.to_string()
            });
        }

        debug!("Anthropic returned {} bytes", body.len());
        ProviderResult::Success
        {   status: status.as_u16()
          , body
        }
    }
}
