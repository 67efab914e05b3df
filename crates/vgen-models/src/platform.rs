//! Target platform definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Platform the generated video is intended for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Landscape long-form video
    Youtube,
    /// Reels
    Instagram,
    /// Vertical short-form video
    Tiktok,
}

impl Platform {
    pub const ALL: &'static [Platform] = &[Platform::Youtube, Platform::Instagram, Platform::Tiktok];

    /// Wire name of the platform, as sent to the generation backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = PlatformParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "youtube" => Ok(Platform::Youtube),
            "instagram" => Ok(Platform::Instagram),
            "tiktok" => Ok(Platform::Tiktok),
            _ => Err(PlatformParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown platform: {0}")]
pub struct PlatformParseError(String);
