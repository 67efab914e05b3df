//! API integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use jsonwebtoken::{encode, EncodingKey, Header};
use tokio::sync::watch;
use tower::ServiceExt;

use vgen_api::auth::SessionClaims;
use vgen_api::{create_router, ApiConfig, AppState, TokenVerifier};
use vgen_invoker::{
    ExternalProcessOutcome, GenerationTransport, InvokeError, InvokeResult, VideoJobInvoker,
};
use vgen_models::VideoGenerationRequest;

const SECRET: &str = "integration-secret";

/// Transport that answers with a fixed tool output.
struct StubTransport {
    stdout: &'static str,
    ready: bool,
}

#[async_trait]
impl GenerationTransport for StubTransport {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn call(
        &self,
        _request: &VideoGenerationRequest,
        _cancel_rx: Option<watch::Receiver<bool>>,
    ) -> InvokeResult<ExternalProcessOutcome> {
        Ok(ExternalProcessOutcome {
            exit_code: Some(0),
            stdout: self.stdout.to_string(),
            stderr: String::new(),
        })
    }

    fn check_ready(&self) -> InvokeResult<()> {
        if self.ready {
            Ok(())
        } else {
            Err(InvokeError::ToolNotFound("manus-mcp-cli".to_string()))
        }
    }
}

fn create_test_router(stdout: &'static str, ready: bool) -> Router {
    let invoker = VideoJobInvoker::new(Arc::new(StubTransport { stdout, ready }));
    let state = AppState::from_parts(ApiConfig::default(), invoker, TokenVerifier::new(SECRET));
    create_router(state, None)
}

fn bearer() -> String {
    let claims = SessionClaims {
        sub: "user-42".to_string(),
        email: None,
        exp: chrono::Utc::now().timestamp() + 600,
    };
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap();
    format!("Bearer {}", token)
}

fn generate_request(auth: Option<String>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/video/generate")
        .header("Content-Type", "application/json");
    if let Some(auth) = auth {
        builder = builder.header("Authorization", auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn valid_body() -> serde_json::Value {
    serde_json::json!({
        "script": "Start with the problem, end with the fix.",
        "topic": "Debugging async Rust",
        "vibe": "educational",
        "targetAudience": "backend engineers",
        "platform": "youtube"
    })
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Test health endpoint.
#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_router("", true);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("X-Request-ID"));
}

#[tokio::test]
async fn test_ready_reports_transport() {
    let response = create_test_router("", true)
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["transport"], "stub");

    let response = create_test_router("", false)
        .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json_body(response).await["error"], "manus-mcp-cli not found in PATH");
}

#[tokio::test]
async fn test_generate_requires_auth() {
    let app = create_test_router(r#"{"content":[{"text":"https://example.com/v.mp4"}]}"#, true);

    let response = app.oneshot(generate_request(None, valid_body())).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_generate_rejects_bad_token() {
    let app = create_test_router("", true);

    let response = app
        .oneshot(generate_request(Some("Bearer not-a-jwt".to_string()), valid_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_generate_rejects_invalid_body() {
    let app = create_test_router("", true);
    let mut body = valid_body();
    body["platform"] = serde_json::json!("vimeo");

    let response = app.clone().oneshot(generate_request(Some(bearer()), body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut body = valid_body();
    body["script"] = serde_json::json!("");
    let response = app.oneshot(generate_request(Some(bearer()), body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["detail"]
        .as_str()
        .unwrap()
        .contains("script is required"));
}

#[tokio::test]
async fn test_generate_success() {
    let app = create_test_router(r#"{"content":[{"text":"https://example.com/v.mp4"}]}"#, true);

    let response = app.oneshot(generate_request(Some(bearer()), valid_body())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["videoUrl"], "https://example.com/v.mp4");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_generate_failure_is_reported_in_body() {
    let app = create_test_router("not json", true);

    let response = app.oneshot(generate_request(Some(bearer()), valid_body())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to parse video generation response");
    assert_eq!(body["failureKind"], "parse");
    assert!(body.get("videoUrl").is_none());
}
