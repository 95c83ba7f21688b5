//! Credential resolution and provider payload construction

use log::{debug, warn};

use crate::config::{ApiKey, CredentialMode, GenerationConfig, PromptTemplate};
use crate::error::Error;
use crate::request::{GenerationRequest, Message, ProviderPayload};

/// Every Anthropic key starts with this
pub const KEY_PREFIX: &str = "sk-ant-";

const OUTPUT_SCHEMA: &str = r#"{
  "headline": "string",
  "subheadline": "string",
  "openingStatement": "string",
  "benefits": [
    { "title": "string", "description": "string" },
    { "title": "string", "description": "string" },
    { "title": "string", "description": "string" },
    { "title": "string", "description": "string" }
  ],
  "testimonials": [
    { "name": "string", "role": "string", "quote": "string" },
    { "name": "string", "role": "string", "quote": "string" },
    { "name": "string", "role": "string", "quote": "string" }
  ],
  "ctaText": "string",
  "urgencyText": "string",
  "guaranteeText": "string",
  "bonuses": [
    { "title": "string", "description": "string", "value": "string" },
    { "title": "string", "description": "string", "value": "string" }
  ],
  "faqs": [
    { "question": "string", "answer": "string" },
    { "question": "string", "answer": "string" },
    { "question": "string", "answer": "string" }
  ]
}"#;

/// Pick the key for this request according to the deployment mode
pub fn resolve_credential(
  request: &GenerationRequest
, mode: &CredentialMode
) -> Result<ApiKey, Error>
{   match mode
    {   CredentialMode::CallerSupplied => {
          let key = request.api_key
            .as_deref()
            .map(str::trim)
            .unwrap_or("");
          if !key.starts_with(KEY_PREFIX)
          {   debug!("Caller key missing or malformed");
              return Err(Error::MissingCredential);
          }
          Ok(ApiKey::new(key))
        }
      , CredentialMode::ServerHeld(Some(key)) => {
          if request.api_key.is_some()
          {   debug!("Ignoring caller key in server-held mode");
          }
          Ok(key.clone())
        }
      , CredentialMode::ServerHeld(None) => {
          warn!("No server credential configured");
          Err(Error::ServiceNotConfigured)
        }
    }
}

/// Turn a product description into the instruction text.
/// Same inputs always give the same output.
pub fn compose(template: &PromptTemplate, product: &str) -> String
{   match template
    {   PromptTemplate::Raw => product.to_string()
      , PromptTemplate::Enhanced { banned_phrases } => {
          let mut out = String::with_capacity(
            product.len() + OUTPUT_SCHEMA.len() + 1024
          );
          out.push_str(
            "You are a senior direct-response copywriter. \
             Write high-converting landing page copy for the \
             product described below.\n\n"
          );
          out.push_str("PRODUCT DESCRIPTION:\n");
          out.push_str(product.trim());
          out.push_str("\n\n");
          out.push_str(
            "Respond with ONLY a valid JSON object, no markdown \
             and no text before or after it, matching exactly this \
             structure:\n"
          );
          out.push_str(OUTPUT_SCHEMA);
          out.push_str("\n\nRules:\n");
          out.push_str(
            "- Exactly 4 benefits, 3 testimonials, 2 bonuses \
             and 3 faqs.\n"
          );
          out.push_str(
            "- Write in a specific, concrete voice grounded in \
             the product details.\n"
          );
          if !banned_phrases.is_empty()
          {   out.push_str("- Never use these phrases: ");
              let quoted: Vec<String> = banned_phrases
                .iter()
                .map(|p| format!("\"{}\"", p))
                .collect();
              out.push_str(&quoted.join(", "));
              out.push_str(".\n");
          }
          out.push_str(
            "- Use fresh angles and wording each time you are \
             asked, so repeated requests produce varied copy.\n"
          );
          out
        }
    }
}

/// Build the provider payload. Deterministic for a given request and config.
pub fn build_payload(
  request: &GenerationRequest
, template: &PromptTemplate
, generation: &GenerationConfig
) -> ProviderPayload
{   let model = request.model
      .as_deref()
      .map(str::trim)
      .filter(|m| !m.is_empty())
      .unwrap_or(generation.default_model.as_str())
      .to_string();

    let product = request.prompt.as_deref().unwrap_or("");

    ProviderPayload
    {   model
      , max_tokens: generation.max_tokens
      , temperature: generation.temperature
      , messages: vec![
          Message
          {   role: "user".to_string()
            , content: compose(template, product)
          }
        ]
    }
}
