//! Wardrobe Domain - Core types
//!
//! This crate defines the domain model for the Wardrobe media library client.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod error;
pub mod library;
pub mod request;
pub mod response;
pub mod settings;
pub mod stream;

pub use auth::{Credentials, RefreshRequest, RefreshResponse, TokenPair, token_preview};
pub use error::{DomainError, DomainResult};
pub use request::{
    HttpMethod, MultipartForm, MultipartPart, QueryParams, RequestBody, RequestDescriptor,
};
pub use response::{BlobData, ImageSource, ObjectUrl, ResponseOutcome};
pub use settings::{DEFAULT_FALLBACK_IMAGE, SessionEndpoints, SessionSettings};
pub use stream::ServerEvent;
