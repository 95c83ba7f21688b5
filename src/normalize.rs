//! Maps provider outcomes and pipeline errors onto the caller envelope

use log::{debug, warn};
use serde_json::Value;

use crate::config::{ApiKey, ErrorPolicy};
use crate::error::Error;
use crate::request::{
  ErrorBody, NormalizedResponse, ProviderFailure, ProviderResult
};

/// Normalize the single provider outcome of a request.
/// `credential` is used only to make sure it never leaks into a message.
pub fn normalize(
  result: ProviderResult
, policy: &ErrorPolicy
, credential: Option<&ApiKey>
) -> NormalizedResponse
{   let err = match result
    {   ProviderResult::Success { status, body }
          if (200..300).contains(&status) => {
            return NormalizedResponse::Ok { body };
          }
      , ProviderResult::Success { status, .. } => {
          warn!("Success result carried status {}", status);
          Error::NormalizerFallback
        }
      , ProviderResult::Failure(failure) => failure_to_error(failure)
    };

    let mut response = from_error(&err, policy);
    if let (Some(key), NormalizedResponse::Err { body, .. })
      = (credential, &mut response)
    {   scrub(body, key, policy);
    }
    response
}

/// Build the error envelope for any pipeline error
pub fn from_error(err: &Error, policy: &ErrorPolicy)
  -> NormalizedResponse
{   debug!("Normalizing error: {}", err);

    let (status, error, message) = match err
    {   Error::InvalidMethod(_) => {
          (405, "Method not allowed".to_string(), None)
        }
      , Error::InvalidRequestBody(detail) => {
          if policy.strict_body_errors
          {   ( 400
              , "Invalid request body".to_string()
              , Some(detail.clone())
              )
          } else
          {   ( 500
              , policy.generic_label.clone()
              , Some(detail.clone())
              )
          }
        }
      , Error::MissingCredential => {
          (400, "Valid API key required".to_string(), None)
        }
      , Error::ServiceNotConfigured => {
          (500, "Service not configured".to_string(), None)
        }
      , Error::ProviderHttpError { message: Some(msg), .. } => {
          (500, policy.generic_label.clone(), Some(msg.clone()))
        }
      , Error::ProviderHttpError { message: None, .. }
      | Error::ProviderParseError(_)
      | Error::ProviderTransportError(_)
      | Error::NormalizerFallback => {
          ( 500
          , policy.generic_label.clone()
          , Some(policy.fallback_message.clone())
          )
        }
      , Error::InvalidConfiguration(_) => {
          (500, "Service not configured".to_string(), None)
        }
    };

    NormalizedResponse::Err
    {   status
      , body: ErrorBody { error, message }
    }
}

/// Pull a readable message out of a provider error body.
/// Looks at `error.message` first, then a top level `message`.
pub fn extract_message(raw_body: &str) -> Option<String>
{   let value: Value = serde_json::from_str(raw_body).ok()?;
    let usable = |v: Option<&Value>| {
      v.and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
    };
    usable(value.pointer("/error/message"))
      .or_else(|| usable(value.get("message")))
}

fn failure_to_error(failure: ProviderFailure) -> Error
{   match failure
    {   ProviderFailure::Http { status, raw_body } => {
          let message = extract_message(&raw_body);
          if message.is_none()
          {   debug!("No message in provider error body");
          }
          Error::ProviderHttpError { status, message }
        }
      , ProviderFailure::Parse { detail, .. } => {
          Error::ProviderParseError(detail)
        }
      , ProviderFailure::Transport { detail } => {
          Error::ProviderTransportError(detail)
        }
    }
}

fn scrub(body: &mut ErrorBody, key: &ApiKey, policy: &ErrorPolicy)
{   let secret = key.expose();
    if secret.is_empty()
    {   return;
    }
    let leaked = body.message
      .as_deref()
      .map(|m| m.contains(secret))
      .unwrap_or(false);
    if leaked
    {   warn!("Provider message echoed the credential, replacing it");
        body.message = Some(policy.fallback_message.clone());
    }
}
