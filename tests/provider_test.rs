// tests/provider_test.rs — Integration test: Gemini client against a local stand-in server

use std::time::Duration;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use synapse::infra::errors::CompletionError;
use synapse::provider::{CompletionService, GeminiClient};

/// Serve `router` on an ephemeral port and return its base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/v1beta")
}

fn client_with_timeout(base_url: String, timeout: Duration) -> GeminiClient {
    GeminiClient::new(
        "test-key".into(),
        "gemini-2.0-flash".into(),
        base_url,
        timeout,
    )
    .unwrap()
}

fn client(base_url: String) -> GeminiClient {
    client_with_timeout(base_url, Duration::from_secs(5))
}

/// Echoes the prompt back, prefixed with the requested model.
async fn echo(
    Path(target): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    let prompt = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default()
        .to_string();
    Json(serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": format!("{target} | {prompt}") }] },
            "finishReason": "STOP"
        }]
    }))
}

#[tokio::test]
async fn test_complete_returns_candidate_text() {
    let base = serve(Router::new().route("/v1beta/models/{target}", post(echo))).await;

    let text = client(base).complete("What is 2+2?").await.unwrap();
    assert_eq!(text, "gemini-2.0-flash:generateContent | What is 2+2?");
}

#[tokio::test]
async fn test_empty_candidates_yield_empty_text() {
    let router = Router::new().route(
        "/v1beta/models/{target}",
        post(|| async { Json(serde_json::json!({ "candidates": [] })) }),
    );
    let base = serve(router).await;

    let text = client(base).complete("blocked prompt").await.unwrap();
    assert_eq!(text, "");
}

#[tokio::test]
async fn test_non_success_status_is_error() {
    let router = Router::new().route(
        "/v1beta/models/{target}",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "model overloaded") }),
    );
    let base = serve(router).await;

    let err = client(base).complete("What is 2+2?").await.unwrap_err();
    match err {
        CompletionError::Status { status, body, .. } => {
            assert_eq!(status, 503);
            assert_eq!(body, "model overloaded");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unparseable_body_is_payload_error() {
    let router = Router::new().route(
        "/v1beta/models/{target}",
        post(|| async { "<html>not json</html>" }),
    );
    let base = serve(router).await;

    let err = client(base).complete("What is 2+2?").await.unwrap_err();
    assert!(matches!(err, CompletionError::Payload { .. }));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(format!("http://{addr}"))
        .complete("What is 2+2?")
        .await
        .unwrap_err();
    match err {
        CompletionError::Transport { message, .. } => assert!(!message.contains("test-key")),
        other => panic!("expected transport error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_configured_timeout_applies() {
    let router = Router::new().route(
        "/v1beta/models/{target}",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(serde_json::json!({ "candidates": [] }))
        }),
    );
    let base = serve(router).await;

    let err = client_with_timeout(base, Duration::from_millis(200))
        .complete("What is 2+2?")
        .await
        .unwrap_err();
    assert!(matches!(err, CompletionError::Transport { .. }));
}
