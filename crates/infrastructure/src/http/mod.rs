//! HTTP infrastructure utilities.
//!
//! This module provides:
//! - Multipart form building for uploads
//! - Server-sent event decoding

mod event_stream;
mod multipart;

pub use event_stream::{EventStreamParser, MAX_LINE_BYTES, decode_event_stream, event_stream};
pub use multipart::build_form;
