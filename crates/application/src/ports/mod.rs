//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the session core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod clock;
mod file_system;
mod token_store;
mod transport;

pub use clock::Clock;
pub use file_system::{FileSystem, FileSystemError};
pub use token_store::{TokenStore, TokenStoreError};
pub use transport::{EventStream, Transport, TransportError};
