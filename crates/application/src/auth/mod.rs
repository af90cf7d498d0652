//! Session and token handling.
//!
//! This module provides:
//! - The [`Session`] orchestrator with refresh-and-retry on 401
//! - In-memory token storage
//! - The registry of fetched binary resources
//! - Handles over open event streams

mod blob_registry;
mod session;
mod stream;
mod token_store;

pub use blob_registry::BlobRegistry;
pub use session::{Session, TOKEN_QUERY_PARAM};
pub use stream::StreamHandle;
pub use token_store::MemoryTokenStore;
