//! Video generation request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Platform;

/// Request validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// A validated request to generate a video from a script.
///
/// Fields are private so a constructed request is always valid and never
/// mutated. Values are stored exactly as given: no trimming or normalization.
/// Deserialization runs the same validation as [`VideoGenerationRequest::new`].
///
/// Serializes to the payload sent to the generation backend, with field
/// names `script`, `topic`, `vibe`, `targetAudience`, `platform` in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawRequest")]
pub struct VideoGenerationRequest {
    script: String,
    topic: String,
    vibe: String,
    target_audience: String,
    platform: Platform,
}

/// Unvalidated wire shape.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRequest {
    script: String,
    topic: String,
    vibe: String,
    target_audience: String,
    platform: Platform,
}

impl TryFrom<RawRequest> for VideoGenerationRequest {
    type Error = RequestError;

    fn try_from(raw: RawRequest) -> Result<Self, Self::Error> {
        Self::new(raw.script, raw.topic, raw.vibe, raw.target_audience, raw.platform)
    }
}

impl VideoGenerationRequest {
    /// Create a request, rejecting empty fields.
    pub fn new(
        script: impl Into<String>,
        topic: impl Into<String>,
        vibe: impl Into<String>,
        target_audience: impl Into<String>,
        platform: Platform,
    ) -> Result<Self, RequestError> {
        let request = Self {
            script: script.into(),
            topic: topic.into(),
            vibe: vibe.into(),
            target_audience: target_audience.into(),
            platform,
        };
        request.validate()?;
        Ok(request)
    }

    fn validate(&self) -> Result<(), RequestError> {
        if self.script.is_empty() {
            return Err(RequestError::MissingField("script"));
        }
        if self.topic.is_empty() {
            return Err(RequestError::MissingField("topic"));
        }
        if self.vibe.is_empty() {
            return Err(RequestError::MissingField("vibe"));
        }
        if self.target_audience.is_empty() {
            return Err(RequestError::MissingField("targetAudience"));
        }
        Ok(())
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Tone descriptor, e.g. "professional" or "casual".
    pub fn vibe(&self) -> &str {
        &self.vibe
    }

    pub fn target_audience(&self) -> &str {
        &self.target_audience
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Compact JSON payload for the generation backend.
    pub fn to_payload(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
