//! HTTP Request domain types

mod body;
mod descriptor;
mod method;
mod query;

pub use body::{MultipartForm, MultipartPart, RequestBody};
pub use descriptor::RequestDescriptor;
pub use method::HttpMethod;
pub use query::{QueryParam, QueryParams};
