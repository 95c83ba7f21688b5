//! Method, preflight and body checks run before anything else

use axum::http::Method;
use log::{debug, trace};

use crate::error::Error;
use crate::request::GenerationRequest;

/// CORS headers attached to every response, preflight or not.
/// Names are lowercase as required by `HeaderName::from_static`
pub const CORS_HEADERS: [(&str, &str); 3] = [
  ("access-control-allow-origin", "*")
, ("access-control-allow-headers", "Content-Type")
, ("access-control-allow-methods", "POST, OPTIONS")
];

/// What the gate decided about an inbound request
#[derive(Debug, Clone, PartialEq)]
pub enum Admission
{   /// Answer 200 with an empty body and stop
    Preflight
  , /// Continue with a validated request
    Proceed(GenerationRequest)
}

/// Check method and body. Never logs body content.
pub fn admit(method: &Method, body: &str)
  -> Result<Admission, Error>
{   if *method == Method::OPTIONS
    {   debug!("Answering CORS preflight");
        return Ok(Admission::Preflight);
    }

    if *method != Method::POST
    {   debug!("Rejecting method {}", method);
        return Err(Error::InvalidMethod(method.to_string()));
    }

    let body = if body.trim().is_empty() { "{}" } else { body };
    trace!("Parsing request body of {} bytes", body.len());

    let request: GenerationRequest = serde_json::from_str(body)
      .map_err(|e| Error::InvalidRequestBody(e.to_string()))?;

    let has_prompt = request.prompt
      .as_deref()
      .map(|p| !p.trim().is_empty())
      .unwrap_or(false);

    if !has_prompt
    {   return Err(Error::InvalidRequestBody(
          "prompt is required".to_string()
        ));
    }

    Ok(Admission::Proceed(request))
}
