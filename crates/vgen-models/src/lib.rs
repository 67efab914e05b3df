//! Shared data models for the video generation service.
//!
//! This crate provides Serde-serializable types for:
//! - Video generation requests and target platforms
//! - Tagged generation results and failure kinds

pub mod platform;
pub mod request;
pub mod result;

// Re-export common types
pub use platform::{Platform, PlatformParseError};
pub use request::{RequestError, VideoGenerationRequest};
pub use result::{FailureKind, VideoGenerationResult};
