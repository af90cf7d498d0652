//! Session orchestrator.
//!
//! Wraps a [`Transport`] with the token lifecycle: every call reads the
//! current access token, and a 401 triggers at most one refresh followed by
//! at most one retry. JSON requests, binary fetches and stream connections
//! share the same state machine.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use wardrobe_domain::{
    Credentials, ImageSource, ObjectUrl, QueryParams, RefreshRequest, RefreshResponse,
    RequestDescriptor, ResponseOutcome, SessionSettings, TokenPair, token_preview,
};

use super::blob_registry::BlobRegistry;
use super::stream::StreamHandle;
use crate::error::{SessionError, SessionResult};
use crate::ports::{TokenStore, Transport, TransportError};

/// Query parameter carrying the access token on stream and download URLs.
pub const TOKEN_QUERY_PARAM: &str = "token";

/// Authenticated session over a transport and a token store.
pub struct Session<T, S> {
    transport: Arc<T>,
    store: Arc<S>,
    blobs: BlobRegistry,
    settings: SessionSettings,
    refresh_gate: Mutex<()>,
}

impl<T: Transport, S: TokenStore> Session<T, S> {
    /// Creates a session with default endpoints.
    pub fn new(transport: Arc<T>, store: Arc<S>) -> Self {
        Self::with_settings(transport, store, SessionSettings::default())
    }

    /// Creates a session with custom settings.
    pub fn with_settings(transport: Arc<T>, store: Arc<S>, settings: SessionSettings) -> Self {
        Self {
            transport,
            store,
            blobs: BlobRegistry::new(),
            settings,
            refresh_gate: Mutex::new(()),
        }
    }

    /// Returns the session settings.
    pub const fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Returns the token store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the registry holding fetched blobs.
    pub const fn blobs(&self) -> &BlobRegistry {
        &self.blobs
    }

    /// Performs an authenticated request and returns the decoded JSON body.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NotAuthenticated`] when no access token is stored
    /// - [`SessionError::SessionExpired`] when the token could not be renewed
    ///   or the retry was rejected again
    /// - [`SessionError::RequestFailed`] for any other non-success status
    /// - [`SessionError::Network`] when no response was received
    pub async fn request(&self, descriptor: &RequestDescriptor) -> SessionResult<Value> {
        let token = self.current_token().await?;
        descriptor.validate()?;
        debug!(
            method = %descriptor.method,
            endpoint = %descriptor.endpoint,
            "Sending authenticated request"
        );
        self.retry_once(token, |token| async move {
            self.transport.send(descriptor, Some(&token)).await
        })
        .await
    }

    /// Fetches a binary resource and registers it for display.
    ///
    /// Never fails: any unrecoverable problem yields the fallback image.
    pub async fn fetch_blob(&self, url: &str) -> ImageSource {
        let outcome = self
            .gated(|token| async move { self.transport.fetch_bytes(url, &token).await })
            .await;

        match outcome {
            Ok(blob) => {
                debug!(url, size = blob.len(), "Fetched blob");
                ImageSource::Object(self.blobs.register(blob).await)
            }
            Err(e) => {
                warn!(url, error = %e, "Image load failed, using fallback");
                ImageSource::Fallback(self.settings.fallback_image.clone())
            }
        }
    }

    /// Releases a blob obtained from [`Session::fetch_blob`].
    pub async fn revoke_blob(&self, url: &ObjectUrl) -> bool {
        self.blobs.revoke(url).await
    }

    /// Opens a server-push stream with the access token as a query parameter.
    ///
    /// A 401 at connection time is handled like any other call: one refresh,
    /// one reconnect.
    ///
    /// # Errors
    ///
    /// Same as [`Session::request`].
    pub async fn open_stream(&self, endpoint: &str) -> SessionResult<StreamHandle> {
        let (inner, token) = self
            .gated(|token| async move {
                let url = with_token(endpoint, &token);
                self.transport
                    .connect_stream(&url)
                    .await
                    .map(|outcome| outcome.map(|stream| (stream, token)))
            })
            .await?;

        info!(endpoint, token = %token_preview(&token), "Stream opened");
        Ok(StreamHandle::new(inner, endpoint, &token))
    }

    /// Opens the live message feed.
    ///
    /// # Errors
    ///
    /// Same as [`Session::open_stream`].
    pub async fn open_message_stream(&self) -> SessionResult<StreamHandle> {
        let endpoint = self.settings.endpoints.message_stream.clone();
        self.open_stream(&endpoint).await
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// On success the store is updated; the refresh token is only replaced
    /// when the server rotated it. Returns false, leaving the store untouched,
    /// on any failure.
    pub async fn refresh(&self, refresh_token: &str) -> bool {
        let request = match RequestDescriptor::post(
            &self.settings.endpoints.refresh,
            &RefreshRequest {
                refresh: refresh_token,
            },
        ) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Could not build refresh request");
                return false;
            }
        };

        let body = match self.transport.send(&request, None).await {
            Ok(ResponseOutcome::Ok(body)) => body,
            Ok(ResponseOutcome::Unauthorized) => {
                warn!("Refresh token rejected");
                return false;
            }
            Ok(ResponseOutcome::Failed { status, .. }) => {
                warn!(status, "Refresh failed");
                return false;
            }
            Err(e) => {
                warn!(error = %e, "Refresh request failed");
                return false;
            }
        };

        let response: RefreshResponse = match serde_json::from_value(body) {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Malformed refresh response");
                return false;
            }
        };

        let stored = match &response.refresh {
            Some(refresh) => {
                self.store
                    .set_tokens(&TokenPair::new(response.access.clone(), refresh.clone()))
                    .await
            }
            None => self.store.set_access_token(&response.access).await,
        };

        match stored {
            Ok(()) => {
                info!(
                    access = %token_preview(&response.access),
                    rotated = response.refresh.is_some(),
                    "Access token refreshed"
                );
                true
            }
            Err(e) => {
                warn!(error = %e, "Could not store refreshed token");
                false
            }
        }
    }

    /// Logs in with a password and stores the issued token pair.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AuthenticationFailed`] if the server rejects
    /// the credentials, or a network/storage error.
    pub async fn login(&self, credentials: &Credentials) -> SessionResult<TokenPair> {
        let request = RequestDescriptor::post(&self.settings.endpoints.login, credentials)?;

        match self.transport.send(&request, None).await? {
            ResponseOutcome::Ok(body) => {
                let pair: TokenPair = serde_json::from_value(body)
                    .map_err(|e| SessionError::Decode(e.to_string()))?;
                self.store.set_tokens(&pair).await?;
                info!(
                    username = %credentials.username,
                    access = %token_preview(&pair.access),
                    "Logged in"
                );
                Ok(pair)
            }
            ResponseOutcome::Unauthorized | ResponseOutcome::Failed { .. } => {
                warn!(username = %credentials.username, "Login rejected");
                Err(SessionError::AuthenticationFailed)
            }
        }
    }

    /// Forgets the stored tokens and releases every registered blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store cannot be cleared.
    pub async fn logout(&self) -> SessionResult<()> {
        self.store.clear().await?;
        self.blobs.clear().await;
        info!("Logged out");
        Ok(())
    }

    /// Asks the server whether an access token is still accepted.
    ///
    /// Never refreshes or retries.
    ///
    /// # Errors
    ///
    /// Returns an error only if no response was received.
    pub async fn check_token(&self, token: &str) -> SessionResult<bool> {
        let outcome = self
            .transport
            .fetch_bytes(&self.settings.endpoints.token_check, token)
            .await?;
        debug!(token = %token_preview(token), valid = outcome.is_ok(), "Token checked");
        Ok(outcome.is_ok())
    }

    /// Checks the stored access token; false when none is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the store or the network fails.
    pub async fn check_current_token(&self) -> SessionResult<bool> {
        match self.store.access_token().await? {
            Some(token) => self.check_token(&token).await,
            None => Ok(false),
        }
    }

    /// Builds a URL carrying the current access token as a query parameter.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotAuthenticated`] when no token is stored.
    pub async fn tokenized_url(&self, endpoint: &str) -> SessionResult<String> {
        let token = self
            .store
            .access_token()
            .await?
            .ok_or(SessionError::NotAuthenticated)?;
        Ok(with_token(endpoint, &token))
    }

    /// Runs `attempt` with the current access token, renewing it once on 401.
    async fn gated<R, F, Fut>(&self, attempt: F) -> SessionResult<R>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<ResponseOutcome<R>, TransportError>>,
    {
        let token = self.current_token().await?;
        self.retry_once(token, attempt).await
    }

    /// Reads the stored access token.
    async fn current_token(&self) -> SessionResult<String> {
        self.store.access_token().await?.ok_or_else(|| {
            debug!("No access token stored");
            SessionError::NotAuthenticated
        })
    }

    /// Runs `attempt` with `token`, renewing it once on 401.
    async fn retry_once<R, F, Fut>(&self, token: String, attempt: F) -> SessionResult<R>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<ResponseOutcome<R>, TransportError>>,
    {
        match attempt(token.clone()).await? {
            ResponseOutcome::Ok(value) => return Ok(value),
            ResponseOutcome::Failed { status, body } => {
                return Err(SessionError::RequestFailed { status, body });
            }
            ResponseOutcome::Unauthorized => {
                debug!(token = %token_preview(&token), "Access token rejected");
            }
        }

        let renewed = self.renew_access_token(&token).await?;

        match attempt(renewed).await? {
            ResponseOutcome::Ok(value) => Ok(value),
            ResponseOutcome::Failed { status, body } => {
                Err(SessionError::RequestFailed { status, body })
            }
            ResponseOutcome::Unauthorized => {
                warn!("Retry rejected after refresh");
                Err(SessionError::SessionExpired)
            }
        }
    }

    /// Obtains an access token to replace `rejected`.
    ///
    /// Refreshes are serialized; a caller that waited on another refresh
    /// reuses its result.
    async fn renew_access_token(&self, rejected: &str) -> SessionResult<String> {
        let _gate = self.refresh_gate.lock().await;

        if let Some(current) = self.store.access_token().await?
            && current != rejected
        {
            debug!(token = %token_preview(&current), "Token already renewed");
            return Ok(current);
        }

        let Some(refresh_token) = self.store.refresh_token().await? else {
            debug!("No refresh token stored");
            return Err(SessionError::SessionExpired);
        };

        if !self.refresh(&refresh_token).await {
            return Err(SessionError::SessionExpired);
        }

        self.store
            .access_token()
            .await?
            .ok_or(SessionError::NotAuthenticated)
    }
}

fn with_token(endpoint: &str, token: &str) -> String {
    QueryParams::new()
        .with(TOKEN_QUERY_PARAM, token)
        .append_to(endpoint)
}
