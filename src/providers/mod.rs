//! LLM provider implementations

use async_trait::async_trait;

use crate::config::ApiKey;
use crate::request::{ProviderPayload, ProviderResult};

pub mod anthropic;

// Re-export for convenience
pub use anthropic::AnthropicClient;

/// One outbound generation call. Implementations never retry.
#[async_trait]
pub trait ProviderClient: Send + Sync
{   async fn send(
      &self
    , payload: &ProviderPayload
    , key: &ApiKey
    ) -> ProviderResult;
}
