//! Session settings
//!
//! Endpoint paths and presentation fallbacks used by the session layer.

use serde::{Deserialize, Serialize};

/// Placeholder shown when an image cannot be loaded.
pub const DEFAULT_FALLBACK_IMAGE: &str = "/default-image.jpg";

/// Backend paths used by the session lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionEndpoints {
    /// Password login, answers with a token pair.
    pub login: String,
    /// Refresh-token exchange.
    pub refresh: String,
    /// Liveness check for an access token.
    pub token_check: String,
    /// Live message feed.
    pub message_stream: String,
}

impl Default for SessionEndpoints {
    fn default() -> Self {
        Self {
            login: "/api/token/".to_string(),
            refresh: "/api/refresh/".to_string(),
            token_check: "/auth/".to_string(),
            message_stream: "/api/message/stream/".to_string(),
        }
    }
}

/// Settings of an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Backend endpoint paths.
    pub endpoints: SessionEndpoints,
    /// Reference returned by image loads that fail.
    pub fallback_image: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            endpoints: SessionEndpoints::default(),
            fallback_image: DEFAULT_FALLBACK_IMAGE.to_string(),
        }
    }
}
