//! Persistence implementations for file-based storage.

mod file_system;
mod token_file;

pub use file_system::TokioFileSystem;
pub use token_file::FileTokenStore;
