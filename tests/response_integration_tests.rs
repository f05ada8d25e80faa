use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Router,
};
use serde_json::Value;
use tower::Service;

use toolbox_errors::{ErrorKind, StructuredError};

async fn missing_card() -> Result<String, StructuredError> {
    let mut err = StructuredError::with_message(ErrorKind::NotFound, "Card abc123 not found");
    err.add_keyed_messages("id", ["no card with this id"])?;
    Err(err)
}

async fn bad_key() -> Result<String, StructuredError> {
    let mut err = StructuredError::validation();
    err.add_keyed_messages(" ", ["never stored"])?;
    Ok("unreachable".to_string())
}

async fn found() -> Result<String, StructuredError> {
    Ok("ok".to_string())
}

fn create_test_app() -> Router {
    Router::new()
        .route("/cards/missing", get(missing_card))
        .route("/cards/bad-key", get(bad_key))
        .route("/cards/found", get(found))
}

// Helper to send request and parse JSON response
async fn send_request(app: &mut Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.call(request).await.unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, body.to_vec())
}

#[tokio::test]
async fn test_structured_error_renders_as_json() {
    let mut app = create_test_app();
    let (status, body) = send_request(&mut app, "/cards/missing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["status"], 404);
    assert_eq!(json["message"], "Card abc123 not found");
    assert_eq!(json["messages"]["id"][0], "no card with this id");
    assert!(json["identifier"].as_str().is_some());
}

#[tokio::test]
async fn test_invalid_key_becomes_bad_request() {
    let mut app = create_test_app();
    let (status, body) = send_request(&mut app, "/cards/bad-key").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(
        json["messages"]["key"][0],
        "Value cannot be null or whitespace. (Parameter 'key')"
    );
    assert!(json.get("cause").is_none());
}

#[tokio::test]
async fn test_success_passes_through() {
    let mut app = create_test_app();
    let (status, body) = send_request(&mut app, "/cards/found").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}
