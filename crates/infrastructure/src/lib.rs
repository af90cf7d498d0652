//! Wardrobe Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration loading.

pub mod adapters;
pub mod config;
pub mod http;
pub mod persistence;
pub mod serialization;

pub use crate::config::{ClientConfig, ConfigError, default_token_file};
pub use adapters::{DEFAULT_USER_AGENT, ReqwestTransport, SystemClock};
pub use http::{EventStreamParser, MAX_LINE_BYTES, build_form, decode_event_stream, event_stream};
pub use persistence::{FileTokenStore, TokioFileSystem};
pub use serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};
