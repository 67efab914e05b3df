//! Video job invoker.
//!
//! Turns a [`VideoGenerationRequest`] into exactly one call on a
//! [`GenerationTransport`] and maps whatever comes back into a
//! [`VideoGenerationResult`]. Every path returns a value; transport errors,
//! non-zero exits and unreadable output all become `Failure`.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use vgen_models::{FailureKind, VideoGenerationRequest, VideoGenerationResult};

use crate::command::ExternalProcessOutcome;
use crate::config::{InvokerConfig, TransportKind};
use crate::error::{InvokeError, InvokeResult};
use crate::http::HttpTransport;
use crate::metrics;
use crate::response::extract_video_url;
use crate::transport::{GenerationTransport, ProcessTransport};

/// Reason returned when the backend output is not a usable tool response.
pub const PARSE_FAILURE_REASON: &str = "Failed to parse video generation response";

/// Reason returned when a launch error carries no message.
pub const UNKNOWN_ERROR_REASON: &str = "Unknown error occurred";

/// Stateless entry point for video generation.
#[derive(Clone)]
pub struct VideoJobInvoker {
    transport: Arc<dyn GenerationTransport>,
}

impl VideoJobInvoker {
    /// Create an invoker over an explicit transport.
    pub fn new(transport: Arc<dyn GenerationTransport>) -> Self {
        Self { transport }
    }

    /// Create an invoker with the transport selected by `config`.
    pub fn from_config(config: InvokerConfig) -> InvokeResult<Self> {
        let transport: Arc<dyn GenerationTransport> = match config.transport.clone() {
            TransportKind::Process => Arc::new(ProcessTransport::new(config)),
            TransportKind::Http { endpoint } => Arc::new(HttpTransport::new(endpoint, config)?),
        };
        Ok(Self::new(transport))
    }

    /// Transport name for logs and readiness reporting.
    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    /// Check whether the transport can currently be used.
    pub fn check_ready(&self) -> InvokeResult<()> {
        self.transport.check_ready()
    }

    /// Generate a video. Runs until the backend finishes, fails, or the
    /// configured deadline elapses.
    pub async fn invoke(&self, request: &VideoGenerationRequest) -> VideoGenerationResult {
        self.invoke_with_cancel(request, None).await
    }

    /// Generate a video, stopping early when `cancel_rx` flips to `true`.
    pub async fn invoke_with_cancel(
        &self,
        request: &VideoGenerationRequest,
        cancel_rx: Option<watch::Receiver<bool>>,
    ) -> VideoGenerationResult {
        let started = Instant::now();
        let transport = self.transport.name();

        info!(
            transport,
            topic = request.topic(),
            platform = %request.platform(),
            "Starting video generation"
        );

        let result = match self.transport.call(request, cancel_rx).await {
            Ok(outcome) => interpret_outcome(outcome),
            Err(e) => {
                error!(transport, error = %e, "Video generation call failed");
                failure_from_error(&e)
            }
        };

        let elapsed = started.elapsed();
        metrics::record_generation(transport, result.outcome_label(), elapsed.as_secs_f64());
        info!(
            transport,
            outcome = result.outcome_label(),
            duration_ms = elapsed.as_millis() as u64,
            "Video generation finished"
        );

        result
    }
}

/// Map a completed external call to a tagged result.
pub fn interpret_outcome(outcome: ExternalProcessOutcome) -> VideoGenerationResult {
    let stderr = outcome.stderr.trim();
    if !stderr.is_empty() {
        warn!(stderr, "Video generation tool wrote to stderr");
    }

    if !outcome.success() {
        let e = InvokeError::process_failed(outcome.exit_code, &outcome.stderr);
        error!(exit_code = ?outcome.exit_code, error = %e, "Video generation tool failed");
        return failure_from_error(&e);
    }

    let output = outcome.stdout.trim();
    debug!(output, "Video generation tool output");

    match extract_video_url(output) {
        Ok(video_url) => {
            info!(video_url = %video_url, "Video generation returned a URL");
            VideoGenerationResult::success(video_url)
        }
        Err(e) => {
            error!(error = %e, "Failed to parse video generation response");
            VideoGenerationResult::failure(FailureKind::Parse, PARSE_FAILURE_REASON)
        }
    }
}

/// Convert a transport error into a failure, falling back to a generic
/// reason when the error has no message.
pub fn failure_from_error(e: &InvokeError) -> VideoGenerationResult {
    let message = e.to_string();
    let reason = if message.trim().is_empty() {
        UNKNOWN_ERROR_REASON.to_string()
    } else {
        message
    };
    VideoGenerationResult::failure(e.kind(), reason)
}
