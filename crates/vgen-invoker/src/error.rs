//! Error types for generation calls.

use thiserror::Error;
use vgen_models::FailureKind;

/// Result type for generation calls.
pub type InvokeResult<T> = Result<T, InvokeError>;

/// Errors that can occur while calling the external generation backend.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("{0} not found in PATH")]
    ToolNotFound(String),

    #[error("{0}")]
    Spawn(#[from] std::io::Error),

    #[error("{message}")]
    ProcessFailed {
        message: String,
        stderr: Option<String>,
        exit_code: Option<i32>,
    },

    #[error("{stream} maxBuffer length exceeded")]
    OutputLimit { stream: &'static str, limit: usize },

    #[error("Video backend returned {status}: {body}")]
    BackendStatus { status: u16, body: String },

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to serialize request: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Video generation timed out after {0} seconds")]
    Timeout(u64),

    #[error("Video generation cancelled")]
    Cancelled,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl InvokeError {
    /// Create a process failure from an exit status and captured stderr.
    pub fn process_failed(exit_code: Option<i32>, stderr: &str) -> Self {
        let stderr = stderr.trim();
        let mut message = match exit_code {
            Some(code) => format!("Command failed with exit code {}", code),
            None => "Command failed: terminated by signal".to_string(),
        };
        if !stderr.is_empty() {
            message.push_str(": ");
            message.push_str(stderr);
        }

        Self::ProcessFailed {
            message,
            stderr: (!stderr.is_empty()).then(|| stderr.to_string()),
            exit_code,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Failure kind reported to callers for this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            InvokeError::Timeout(_) => FailureKind::Timeout,
            InvokeError::Cancelled => FailureKind::Cancelled,
            InvokeError::OutputLimit { .. } => FailureKind::OutputLimit,
            _ => FailureKind::Launch,
        }
    }
}
