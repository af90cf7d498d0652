//! In-memory token storage.
//!
//! Process-local implementation of the [`TokenStore`] port, used when tokens
//! should not outlive the process and as the store in tests.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use wardrobe_domain::TokenPair;

use crate::ports::{TokenStore, TokenStoreError};

#[derive(Debug, Default)]
struct StoredTokens {
    access: Option<String>,
    refresh: Option<String>,
}

/// Thread-safe in-memory token store.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    tokens: Arc<RwLock<StoredTokens>>,
}

impl MemoryTokenStore {
    /// Create an empty token store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding a token pair.
    #[must_use]
    pub fn with_tokens(pair: TokenPair) -> Self {
        Self {
            tokens: Arc::new(RwLock::new(StoredTokens {
                access: Some(pair.access),
                refresh: Some(pair.refresh),
            })),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn access_token(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.tokens.read().await.access.clone())
    }

    async fn refresh_token(&self) -> Result<Option<String>, TokenStoreError> {
        Ok(self.tokens.read().await.refresh.clone())
    }

    async fn set_tokens(&self, pair: &TokenPair) -> Result<(), TokenStoreError> {
        let mut tokens = self.tokens.write().await;
        tokens.access = Some(pair.access.clone());
        tokens.refresh = Some(pair.refresh.clone());
        Ok(())
    }

    async fn set_access_token(&self, token: &str) -> Result<(), TokenStoreError> {
        self.tokens.write().await.access = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        *self.tokens.write().await = StoredTokens::default();
        Ok(())
    }
}
