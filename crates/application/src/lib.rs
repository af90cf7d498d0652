//! Wardrobe Application - Session orchestration and ports
//!
//! This crate defines the application layer with:
//! - Port traits (transport, token store, file system, clock)
//! - The [`Session`] orchestrator with refresh-and-retry on 401
//! - The typed [`LibraryApi`] over the backend endpoints
//! - Application-level error handling

pub mod api;
pub mod auth;
pub mod error;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use api::LibraryApi;
pub use auth::{BlobRegistry, MemoryTokenStore, Session, StreamHandle, TOKEN_QUERY_PARAM};
pub use error::{SessionError, SessionResult};
pub use ports::{
    Clock, EventStream, FileSystem, FileSystemError, TokenStore, TokenStoreError, Transport,
    TransportError,
};
