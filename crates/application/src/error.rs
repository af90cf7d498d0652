//! Application error types

use serde_json::Value;
use thiserror::Error;
use wardrobe_domain::DomainError;

use crate::ports::{TokenStoreError, TransportError};

/// Errors surfaced by session-aware calls.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No access token is stored; the user has to log in.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The access token was rejected and could not be renewed.
    #[error("session expired")]
    SessionExpired,

    /// The server answered with a non-success status other than 401.
    #[error("request failed with status {status}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// Best-effort JSON body
        body: Option<Value>,
    },

    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(#[from] TransportError),

    /// The login endpoint rejected the credentials.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// A successful response did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// The request could not be built.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] DomainError),

    /// The token store failed.
    #[error("token storage error: {0}")]
    Storage(#[from] TokenStoreError),
}

impl SessionError {
    /// Returns true if the caller should send the user to the login screen.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::NotAuthenticated | Self::SessionExpired)
    }

    /// Returns the HTTP status behind the error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            Self::SessionExpired => Some(401),
            _ => None,
        }
    }
}

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
