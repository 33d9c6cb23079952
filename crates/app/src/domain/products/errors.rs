//! Products service errors.

use thiserror::Error;

use crate::storage::RepositoryError;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product already exists")]
    AlreadyExists,

    #[error("product not found")]
    NotFound,

    #[error("invalid product data")]
    InvalidData,

    #[error("storage error")]
    Storage(#[source] RepositoryError),
}

impl From<RepositoryError> for ProductsServiceError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::AlreadyExists => Self::AlreadyExists,
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::InvalidReference
            | RepositoryError::MissingRequiredData
            | RepositoryError::InvalidData => Self::InvalidData,
            RepositoryError::Sql(_) | RepositoryError::Local(_) => Self::Storage(error),
        }
    }
}
