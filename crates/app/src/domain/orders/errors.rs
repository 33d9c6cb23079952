//! Orders service errors.

use thiserror::Error;

use crate::storage::RepositoryError;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("storage error")]
    Storage(#[from] RepositoryError),
}
