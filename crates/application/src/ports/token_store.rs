//! Token store port
//!
//! Defines the interface for holding the session's token pair.

use async_trait::async_trait;

use wardrobe_domain::TokenPair;

/// Errors that can occur while reading or persisting tokens.
#[derive(Debug, thiserror::Error)]
pub enum TokenStoreError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Single source of truth for the session's access and refresh token.
///
/// Implementations never perform network I/O. Writes are last-write-wins.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Returns the stored access token.
    async fn access_token(&self) -> Result<Option<String>, TokenStoreError>;

    /// Returns the stored refresh token.
    async fn refresh_token(&self) -> Result<Option<String>, TokenStoreError>;

    /// Replaces both tokens in one write.
    ///
    /// # Errors
    /// Returns an error if the tokens cannot be persisted.
    async fn set_tokens(&self, pair: &TokenPair) -> Result<(), TokenStoreError>;

    /// Replaces only the access token.
    ///
    /// # Errors
    /// Returns an error if the token cannot be persisted.
    async fn set_access_token(&self, token: &str) -> Result<(), TokenStoreError>;

    /// Removes both tokens.
    ///
    /// # Errors
    /// Returns an error if the stored tokens cannot be removed.
    async fn clear(&self) -> Result<(), TokenStoreError>;

    /// Returns the full pair when both tokens are present.
    async fn tokens(&self) -> Result<Option<TokenPair>, TokenStoreError> {
        let access = self.access_token().await?;
        let refresh = self.refresh_token().await?;
        Ok(access.zip(refresh).map(|(access, refresh)| TokenPair { access, refresh }))
    }
}
