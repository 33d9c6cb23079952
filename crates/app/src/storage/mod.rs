//! Storage
//!
//! Shared persistence plumbing: the repository error type and the local document store
//! used when no database is configured.

mod errors;
pub mod local;

pub use errors::RepositoryError;
pub use local::{LocalStore, LocalStoreError};
