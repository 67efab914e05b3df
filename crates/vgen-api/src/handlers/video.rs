//! Video generation handler.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::info;

use vgen_models::{FailureKind, VideoGenerationRequest, VideoGenerationResult};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Generation response, in the shape the web client already consumes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_kind: Option<FailureKind>,
}

impl From<VideoGenerationResult> for GenerateVideoResponse {
    fn from(result: VideoGenerationResult) -> Self {
        match result {
            VideoGenerationResult::Success { video_url } => Self {
                success: true,
                video_url: Some(video_url),
                error: None,
                failure_kind: None,
            },
            VideoGenerationResult::Failure { kind, reason } => Self {
                success: false,
                video_url: None,
                error: Some(reason),
                failure_kind: Some(kind),
            },
        }
    }
}

/// Generate a video from a script.
///
/// Generation failures are reported in the body with `success: false`.
/// Dropping the connection drops this future, which kills the external tool.
pub async fn generate_video(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<VideoGenerationRequest>, JsonRejection>,
) -> ApiResult<Json<GenerateVideoResponse>> {
    let Json(request) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    info!(
        uid = %user.uid,
        topic = request.topic(),
        platform = %request.platform(),
        "Video generation requested"
    );

    let result = state.invoker.invoke(&request).await;

    Ok(Json(GenerateVideoResponse::from(result)))
}
