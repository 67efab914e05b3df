//! Application state.

use std::sync::Arc;

use vgen_invoker::{InvokerConfig, VideoJobInvoker};

use crate::auth::TokenVerifier;
use crate::config::ApiConfig;
use crate::error::ApiError;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub invoker: VideoJobInvoker,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: ApiConfig, invoker_config: InvokerConfig) -> Result<Self, ApiError> {
        let secret = config
            .jwt_secret
            .clone()
            .ok_or_else(|| ApiError::internal("VGEN_JWT_SECRET is not configured"))?;

        let invoker = VideoJobInvoker::from_config(invoker_config)
            .map_err(|e| ApiError::internal(format!("Failed to create video invoker: {}", e)))?;

        Ok(Self::from_parts(config, invoker, TokenVerifier::new(&secret)))
    }

    /// Assemble state from already-built parts.
    pub fn from_parts(config: ApiConfig, invoker: VideoJobInvoker, verifier: TokenVerifier) -> Self {
        Self {
            config,
            invoker,
            verifier: Arc::new(verifier),
        }
    }
}
