//! copygen: a server side proxy that turns a product description into
//! landing page copy through the Anthropic Messages API.
//!
//! Every request runs the same linear pipeline:
//!
//! ```text
//! gate::admit -> prompt::resolve_credential / prompt::build_payload
//!             -> ProviderClient::send -> normalize::normalize
//! ```
//!
//! The provider key either arrives with each request or is held by the
//! server, chosen once per deployment through [`config::CredentialMode`].
//! Whatever happens, the caller gets JSON with CORS headers back.

pub mod error;
pub mod config;
pub mod request;
pub mod gate;
pub mod prompt;
pub mod providers;
pub mod normalize;
pub mod pipeline;
pub mod server;

pub use config::{ApiKey, CredentialMode, PromptTemplate, ProxyConfig};
pub use error::Error;
pub use pipeline::{Pipeline, Reply};
pub use providers::{AnthropicClient, ProviderClient};
