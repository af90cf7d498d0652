//! HTTP Response domain types

mod blob;
mod outcome;

pub use blob::{BlobData, ImageSource, ObjectUrl};
pub use outcome::{ResponseOutcome, UNAUTHORIZED};
