//! Wardrobe client wiring.
//!
//! Builds a ready-to-use [`Client`] from a [`ClientConfig`]: the reqwest
//! transport, the file token store and the session on top of them.

use std::sync::Arc;

use wardrobe_application::{LibraryApi, Session, TransportError};
use wardrobe_infrastructure::{
    ClientConfig, FileTokenStore, ReqwestTransport, SystemClock, TokioFileSystem,
};

/// Token store used by the command line client.
pub type Store = FileTokenStore<TokioFileSystem, SystemClock>;

/// Fully wired library client.
pub type Client = LibraryApi<ReqwestTransport, Store>;

/// Builds a client from configuration.
///
/// # Errors
///
/// Returns an error if the base URL is invalid or the HTTP client cannot be
/// created.
pub fn connect(config: &ClientConfig) -> Result<Client, TransportError> {
    let transport = ReqwestTransport::with_user_agent(&config.base_url, &config.user_agent)?;
    let store = FileTokenStore::new(TokioFileSystem::new(), SystemClock::new(), &config.token_file);
    let session = Session::with_settings(
        Arc::new(transport),
        Arc::new(store),
        config.settings.clone(),
    );
    Ok(LibraryApi::new(Arc::new(session)))
}
