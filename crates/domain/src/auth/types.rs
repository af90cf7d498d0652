//! Session token types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage key of the access token.
pub const ACCESS_TOKEN_KEY: &str = "wardrobe-access-token";

/// Storage key of the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "wardrobe-refresh-token";

/// Access and refresh token issued by the backend.
///
/// Both values are opaque; their format belongs to the server.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived bearer credential
    pub access: String,
    /// Longer-lived credential used only to obtain a new access token
    pub refresh: String,
}

impl TokenPair {
    /// Creates a token pair.
    #[must_use]
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }

    /// Returns the `Authorization` header value for the access token.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        bearer_header(&self.access)
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &token_preview(&self.access))
            .field("refresh", &token_preview(&self.refresh))
            .finish()
    }
}

/// Username and password sent to the login endpoint.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Account name
    pub username: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    /// Creates login credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Body of the refresh call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshRequest<'a> {
    /// Refresh token being exchanged
    pub refresh: &'a str,
}

/// Reply of the refresh endpoint.
///
/// The refresh token is only present when the server rotates it.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshResponse {
    /// New access token
    pub access: String,
    /// Rotated refresh token
    #[serde(default)]
    pub refresh: Option<String>,
}

impl fmt::Debug for RefreshResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshResponse")
            .field("access", &token_preview(&self.access))
            .field("rotated", &self.refresh.is_some())
            .finish()
    }
}

/// Formats a bearer `Authorization` header value.
#[must_use]
pub fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// Get a preview of a token (first 8 chars + ...), safe to log.
#[must_use]
pub fn token_preview(token: &str) -> String {
    if token.chars().count() > 12 {
        let head: String = token.chars().take(8).collect();
        format!("{head}...")
    } else {
        token.to_string()
    }
}
