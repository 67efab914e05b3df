//! Tagged outcome of a video generation attempt.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a generation attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Tool could not be started or exited with an error
    Launch,
    /// Output was not the expected tool response
    Parse,
    /// Deadline elapsed; the external call was terminated
    Timeout,
    /// Caller cancelled; the external call was terminated
    Cancelled,
    /// Output exceeded the capture limit
    OutputLimit,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Launch => "launch",
            FailureKind::Parse => "parse",
            FailureKind::Timeout => "timeout",
            FailureKind::Cancelled => "cancelled",
            FailureKind::OutputLimit => "output_limit",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one generation attempt. Exactly one variant, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VideoGenerationResult {
    Success { video_url: String },
    Failure { kind: FailureKind, reason: String },
}

impl VideoGenerationResult {
    pub fn success(video_url: impl Into<String>) -> Self {
        Self::Success {
            video_url: video_url.into(),
        }
    }

    pub fn failure(kind: FailureKind, reason: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn video_url(&self) -> Option<&str> {
        match self {
            Self::Success { video_url } => Some(video_url),
            Self::Failure { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { reason, .. } => Some(reason),
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }

    /// Outcome label used for metrics and logs.
    pub fn outcome_label(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Failure { kind, .. } => kind.as_str(),
        }
    }
}
