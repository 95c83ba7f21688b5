mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use common::{post_body, server_config, FakeClient, SERVER_KEY};
use copygen::pipeline::Pipeline;
use copygen::server::router;

const PATH: &str = "/.netlify/functions/generate-content";

fn app(client: FakeClient) -> axum::Router
{   let pipeline = Pipeline::new(server_config(Some(SERVER_KEY)), client);
    router(Arc::new(pipeline), PATH)
}

fn assert_cors(headers: &axum::http::HeaderMap)
{   assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
    assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
    assert_eq!(headers["content-type"], "application/json");
}

#[tokio::test]
async fn test_preflight_has_cors_and_empty_body()
{   let response = app(FakeClient::ok("{}"))
      .oneshot(
        Request::builder()
          .method("OPTIONS")
          .uri(PATH)
          .body(Body::from("garbage"))
          .unwrap()
      )
      .await
      .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(response.headers());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_post_passes_provider_body_through()
{   let provider_body = r#"{"content":[{"type":"text","text":"copy"}]}"#;
    let response = app(FakeClient::ok(provider_body))
      .oneshot(
        Request::builder()
          .method("POST")
          .uri(PATH)
          .header("content-type", "application/json")
          .body(Body::from(post_body("A mug")))
          .unwrap()
      )
      .await
      .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(response.headers());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], provider_body.as_bytes());
}

#[tokio::test]
async fn test_errors_carry_cors_headers()
{   let response = app(FakeClient::ok("{}"))
      .oneshot(
        Request::builder()
          .method("GET")
          .uri(PATH)
          .body(Body::empty())
          .unwrap()
      )
      .await
      .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_cors(response.headers());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "Method not allowed");
}

#[tokio::test]
async fn test_provider_failure_maps_to_500_envelope()
{   let client = FakeClient::http_error(529, r#"{"error":{"message":"Overloaded"}}"#);
    let response = app(client)
      .oneshot(
        Request::builder()
          .method("POST")
          .uri(PATH)
          .body(Body::from(post_body("A mug")))
          .unwrap()
      )
      .await
      .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_cors(response.headers());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["message"], "Overloaded");
    assert!(!String::from_utf8_lossy(&body).contains(SERVER_KEY));
}

#[tokio::test]
async fn test_oversized_body_gets_json_envelope()
{   let prompt = "a".repeat(3 * 1024 * 1024);
    let client = FakeClient::ok("{}");
    let pipeline = Arc::new(Pipeline::new(server_config(Some(SERVER_KEY)), client));
    let response = router(pipeline.clone(), PATH)
      .oneshot(
        Request::builder()
          .method("POST")
          .uri(PATH)
          .body(Body::from(post_body(&prompt)))
          .unwrap()
      )
      .await
      .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_cors(response.headers());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "Invalid request body");
    assert_eq!(pipeline.client().call_count(), 0);
}

#[tokio::test]
async fn test_oversized_preflight_still_answers()
{   let response = app(FakeClient::ok("{}"))
      .oneshot(
        Request::builder()
          .method("OPTIONS")
          .uri(PATH)
          .body(Body::from("x".repeat(3 * 1024 * 1024)))
          .unwrap()
      )
      .await
      .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_cors(response.headers());
}
