//! End-to-end invocation tests.

use std::time::Duration;

use vgen_invoker::{ExecMode, VideoJobInvoker, PARSE_FAILURE_REASON};
use vgen_models::{FailureKind, Platform, VideoGenerationRequest};

use super::fake_tool::FakeTool;

fn hostile_request() -> VideoGenerationRequest {
    VideoGenerationRequest::new(
        "It's here'; touch /tmp/vgen-pwned; echo '",
        "O'Brien's \"quoted\" topic \\ with $(whoami)",
        "casual",
        "people who say 'hi' `id`",
        Platform::Tiktok,
    )
    .unwrap()
}

async fn assert_payload_arrives_intact(mode: ExecMode) {
    let tool = FakeTool::echo_payload();
    let invoker = VideoJobInvoker::from_config(tool.config(mode)).unwrap();
    let request = hostile_request();

    let result = invoker.invoke(&request).await;

    let echoed = result.video_url().unwrap_or_else(|| panic!("expected success, got {:?}", result));
    assert_eq!(echoed, request.to_payload().unwrap());

    let decoded: VideoGenerationRequest = serde_json::from_str(echoed).unwrap();
    assert_eq!(decoded, request);
    assert!(!std::path::Path::new("/tmp/vgen-pwned").exists());
}

#[tokio::test]
async fn test_direct_mode_payload_is_verbatim() {
    assert_payload_arrives_intact(ExecMode::Direct).await;
}

#[tokio::test]
async fn test_shell_mode_escaping_survives_quotes() {
    assert_payload_arrives_intact(ExecMode::Shell).await;
}

#[tokio::test]
async fn test_concurrent_invocations_are_isolated() {
    let tool = FakeTool::echo_payload();
    let invoker = VideoJobInvoker::from_config(tool.config(ExecMode::Direct)).unwrap();

    let first = VideoGenerationRequest::new("one", "first topic", "casual", "a", Platform::Youtube).unwrap();
    let second =
        VideoGenerationRequest::new("two", "second topic", "professional", "b", Platform::Instagram).unwrap();

    let (a, b) = tokio::join!(invoker.invoke(&first), invoker.invoke(&second));

    assert_eq!(a.video_url().unwrap(), first.to_payload().unwrap());
    assert_eq!(b.video_url().unwrap(), second.to_payload().unwrap());
}

#[tokio::test]
async fn test_unparsable_stdout() {
    for body in ["echo 'not json'", r#"echo '{"content":[]}'"#] {
        let tool = FakeTool::with_script(body);
        let invoker = VideoJobInvoker::from_config(tool.config(ExecMode::Direct)).unwrap();
        let request = hostile_request();

        let result = invoker.invoke(&request).await;

        assert_eq!(result.failure_kind(), Some(FailureKind::Parse));
        assert_eq!(result.reason(), Some(PARSE_FAILURE_REASON));
    }
}

#[tokio::test]
async fn test_nonzero_exit_reports_stderr() {
    let tool = FakeTool::with_script("echo 'auth token expired' >&2\nexit 2");
    let invoker = VideoJobInvoker::from_config(tool.config(ExecMode::Direct)).unwrap();

    let result = invoker.invoke(&hostile_request()).await;

    assert_eq!(result.failure_kind(), Some(FailureKind::Launch));
    assert_eq!(
        result.reason(),
        Some("Command failed with exit code 2: auth token expired")
    );
}

#[tokio::test]
async fn test_deadline_kills_hung_tool() {
    let tool = FakeTool::with_script("exec sleep 30");
    let config = tool
        .config(ExecMode::Direct)
        .with_timeout(Some(Duration::from_secs(1)));
    let invoker = VideoJobInvoker::from_config(config).unwrap();

    let started = std::time::Instant::now();
    let result = invoker.invoke(&hostile_request()).await;

    assert_eq!(result.failure_kind(), Some(FailureKind::Timeout));
    assert_eq!(result.reason(), Some("Video generation timed out after 1 seconds"));
    assert!(started.elapsed() < Duration::from_secs(15));
}

#[tokio::test]
async fn test_cancel_kills_tool() {
    let tool = FakeTool::with_script("exec sleep 30");
    let invoker = VideoJobInvoker::from_config(tool.config(ExecMode::Direct)).unwrap();
    let (tx, rx) = tokio::sync::watch::channel(false);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        let _ = tx.send(true);
    });

    let result = invoker.invoke_with_cancel(&hostile_request(), Some(rx)).await;
    assert_eq!(result.failure_kind(), Some(FailureKind::Cancelled));
}

#[tokio::test]
async fn test_runaway_output_is_capped() {
    let tool = FakeTool::with_script("exec yes 'log line from a chatty tool'");
    let config = tool.config(ExecMode::Direct).with_max_output_bytes(64 * 1024);
    let invoker = VideoJobInvoker::from_config(config).unwrap();

    let result = invoker.invoke(&hostile_request()).await;

    assert_eq!(result.failure_kind(), Some(FailureKind::OutputLimit));
    assert_eq!(result.reason(), Some("stdout maxBuffer length exceeded"));
}

#[tokio::test]
async fn test_missing_tool_is_launch_failure() {
    let config = vgen_invoker::InvokerConfig::default().with_tool_binary("vgen-no-such-cli");
    let invoker = VideoJobInvoker::from_config(config).unwrap();

    let result = invoker.invoke(&hostile_request()).await;

    assert_eq!(result.failure_kind(), Some(FailureKind::Launch));
    assert_eq!(result.reason(), Some("vgen-no-such-cli not found in PATH"));
}
