//! HTTP surface: one route, every method, JSON plus CORS on every reply

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use log::{debug, info};

use crate::error::Error;
use crate::gate::CORS_HEADERS;
use crate::pipeline::{Pipeline, Reply};
use crate::providers::ProviderClient;

/// Build the router serving the pipeline at `route_path`
pub fn router<C>(pipeline: Arc<Pipeline<C>>, route_path: &str) -> Router
where C: ProviderClient + 'static
{   info!("Serving copy generation at {}", route_path);
    Router::new()
      .route(route_path, any(generate_handler::<C>))
      .with_state(pipeline)
}

async fn generate_handler<C>(
  State(pipeline): State<Arc<Pipeline<C>>>
, method: Method
, body: Result<Bytes, BytesRejection>
) -> Response
where C: ProviderClient + 'static
{   let body = match body
    {   Ok(b) => b
      , Err(rejection) if method == Method::POST => {
          debug!("Unreadable request body: {}", rejection);
          return into_http(pipeline.reject(
            &Error::InvalidRequestBody(rejection.body_text())
          ));
        }
        // Preflight and 405 never look at the body
      , Err(_) => Bytes::new()
    };
    debug!("{} request with {} byte body", method, body.len());
    let body = String::from_utf8_lossy(&body);
    let reply = pipeline.handle(&method, &body).await;
    into_http(reply)
}

/// Attach status, content type and CORS headers to a pipeline reply
pub fn into_http(reply: Reply) -> Response
{   let status = StatusCode::from_u16(reply.status)
      .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = (status, reply.body).into_response();

    let headers = response.headers_mut();
    for (name, value) in CORS_HEADERS
    {   headers.insert(name, HeaderValue::from_static(value));
    }
    headers.insert(
      header::CONTENT_TYPE
    , HeaderValue::from_static("application/json")
    );
    response
}
