//! Authentication domain types

mod types;

pub use types::{
    ACCESS_TOKEN_KEY, Credentials, REFRESH_TOKEN_KEY, RefreshRequest, RefreshResponse, TokenPair,
    bearer_header, token_preview,
};
