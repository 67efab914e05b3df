//! Tool response parsing.

use serde::Deserialize;
use thiserror::Error;

/// Why a tool response could not be turned into a video URL.
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response has no content")]
    EmptyContent,

    #[error("first content item has no text")]
    MissingText,
}

/// Tool call result as printed by the CLI.
#[derive(Debug, Deserialize)]
struct ToolResponse {
    #[serde(default)]
    content: Option<Vec<ContentItem>>,
}

#[derive(Debug, Deserialize)]
struct ContentItem {
    #[serde(default)]
    text: Option<String>,
}

/// Extract the video URL from the tool's standard output.
///
/// Expects `{"content":[{"text":"<url>"}, ...]}` after trimming. Extra fields
/// are ignored; an empty `text` counts as missing.
pub fn extract_video_url(stdout: &str) -> Result<String, ResponseError> {
    let response: ToolResponse = serde_json::from_str(stdout.trim())?;

    let first = response
        .content
        .and_then(|items| items.into_iter().next())
        .ok_or(ResponseError::EmptyContent)?;

    match first.text {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ResponseError::MissingText),
    }
}
