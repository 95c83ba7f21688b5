//! The per-request pipeline: gate, prompt, provider call, normalize

use axum::http::Method;
use log::{debug, error, info};

use crate::config::ProxyConfig;
use crate::error::Error;
use crate::gate::{self, Admission};
use crate::normalize;
use crate::prompt;
use crate::providers::ProviderClient;
use crate::request::{GenerationRequest, NormalizedResponse};

/// Status and body handed back to the HTTP layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply
{   pub status: u16
  , pub body: String
}

impl From<NormalizedResponse> for Reply
{   fn from(response: NormalizedResponse) -> Self
    {   Reply
        {   status: response.status()
          , body: response.into_body()
        }
    }
}

/// Immutable, shareable pipeline. Holds no per-request state.
pub struct Pipeline<C: ProviderClient>
{   config: ProxyConfig
  , client: C
}

impl<C: ProviderClient> Pipeline<C>
{   pub fn new(config: ProxyConfig, client: C) -> Self
    {   debug!("Creating pipeline with {:?}", config.credential_mode);
        Pipeline
        {   config
          , client
        }
    }

    pub fn client(&self) -> &C
    {   &self.client
    }

    /// Run one request end to end. Never fails: every error becomes an envelope.
    pub async fn handle(&self, method: &Method, body: &str) -> Reply
    {   let request = match gate::admit(method, body)
        {   Ok(Admission::Preflight) => {
              return Reply { status: 200, body: String::new() };
            }
          , Ok(Admission::Proceed(request)) => request
          , Err(e) => return self.reject(&e)
        };

        self.generate(&request).await.into()
    }

    /// Credential, payload, provider call and normalization for a validated request
    pub async fn generate(&self, request: &GenerationRequest)
      -> NormalizedResponse
    {   let key = match prompt::resolve_credential(
          request
        , &self.config.credential_mode
        )
        {   Ok(k) => k
          , Err(e) => {
              return normalize::from_error(&e, &self.config.errors);
            }
        };

        let payload = prompt::build_payload(
          request
        , &self.config.template
        , &self.config.generation
        );
        info!("Generating copy with model {}", payload.model);

        let result = self.client.send(&payload, &key).await;
        let response = normalize::normalize(
          result
        , &self.config.errors
        , Some(&key)
        );

        match &response
        {   NormalizedResponse::Ok { body } => {
              debug!("Generation succeeded, {} bytes", body.len());
            }
          , NormalizedResponse::Err { status, body } => {
              error!(
                "Generation failed with {}: {}"
              , status
              , body.error
              );
            }
        }
        response
    }

    /// Error envelope for a request that never reached the provider
    pub fn reject(&self, err: &Error) -> Reply
    {   debug!("Request rejected: {}", err);
        normalize::from_error(err, &self.config.errors).into()
    }
}
