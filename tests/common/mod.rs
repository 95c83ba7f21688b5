#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use copygen::config::{ApiKey, CredentialMode, ProxyConfig};
use copygen::providers::ProviderClient;
use copygen::request::{ProviderFailure, ProviderPayload, ProviderResult};

pub const SERVER_KEY: &str = "sk-ant-server-secret-0001";
pub const CALLER_KEY: &str = "sk-ant-caller-secret-0002";

/// Provider stand-in returning a canned result and counting calls
pub struct FakeClient
{   pub calls: AtomicUsize
  , pub result: ProviderResult
  , pub seen: Mutex<Vec<(ProviderPayload, String)>>
}

impl FakeClient
{   pub fn returning(result: ProviderResult) -> Self
    {   FakeClient
        {   calls: AtomicUsize::new(0)
          , result
          , seen: Mutex::new(vec![])
        }
    }

    pub fn ok(body: &str) -> Self
    {   Self::returning(ProviderResult::Success
        {   status: 200
          , body: body.to_string()
        })
    }

    pub fn http_error(status: u16, raw_body: &str) -> Self
    {   Self::returning(ProviderResult::Failure(ProviderFailure::Http
        {   status
          , raw_body: raw_body.to_string()
        }))
    }

    pub fn transport_error(detail: &str) -> Self
    {   Self::returning(ProviderResult::Failure(
          ProviderFailure::Transport { detail: detail.to_string() }
        ))
    }

    pub fn call_count(&self) -> usize
    {   self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProviderClient for FakeClient
{   async fn send(
      &self
    , payload: &ProviderPayload
    , key: &ApiKey
    ) -> ProviderResult
    {   self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(
          (payload.clone(), key.expose().to_string())
        );
        self.result.clone()
    }
}

pub fn server_config(key: Option<&str>) -> ProxyConfig
{   ProxyConfig
    {   credential_mode: CredentialMode::ServerHeld(
          key.map(ApiKey::new)
        )
      , ..ProxyConfig::default()
    }
}

pub fn caller_config() -> ProxyConfig
{   ProxyConfig
    {   credential_mode: CredentialMode::CallerSupplied
      , ..ProxyConfig::default()
    }
}

pub fn post_body(prompt: &str) -> String
{   serde_json::json!({ "prompt": prompt }).to_string()
}
