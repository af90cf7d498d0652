//! JSON serialization for files the client persists.

mod json;

pub use json::*;
