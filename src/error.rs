use std::fmt;

/// Error type for every stage of the copy generation pipeline.
/// Implements Clone so a stage result can be logged and still returned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// HTTP method other than POST or OPTIONS
    InvalidMethod(String)
  , /// Request body is not JSON or lacks a usable prompt
    InvalidRequestBody(String)
  , /// Caller did not supply a well-formed provider key
    MissingCredential
  , /// Server-held credential mode without a configured key
    ServiceNotConfigured
  , /// Provider answered with a non-2xx status
    ProviderHttpError
    {   status: u16
      , message: Option<String>
    }
  , /// Provider body could not be parsed as JSON
    ProviderParseError(String)
  , /// Network level failure talking to the provider
    ProviderTransportError(String)
  , /// Provider output had a shape nothing else could explain
    NormalizerFallback
  , /// Startup configuration could not be read
    InvalidConfiguration(String)
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::InvalidMethod(method) => {
              write!(f, "Method not allowed: {}", method)
            }
          , Error::InvalidRequestBody(msg) => {
              write!(f, "Invalid request body: {}", msg)
            }
          , Error::MissingCredential => {
              write!(f, "Missing or malformed API key")
            }
          , Error::ServiceNotConfigured => {
              write!(f, "Service not configured")
            }
          , Error::ProviderHttpError { status, message } => {
              match message
              {   Some(msg) => write!(
                    f, "Provider error {}: {}", status, msg
                  )
                , None => write!(f, "Provider error {}", status)
              }
            }
          , Error::ProviderParseError(msg) => {
              write!(f, "Provider parse error: {}", msg)
            }
          , Error::ProviderTransportError(msg) => {
              write!(f, "Provider transport error: {}", msg)
            }
          , Error::NormalizerFallback => {
              write!(f, "Unexpected provider response")
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}
