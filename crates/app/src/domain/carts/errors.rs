//! Carts service errors.

use thiserror::Error;

use farmgate::pricing::PricingError;

use crate::storage::RepositoryError;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart item not found")]
    NotFound,

    #[error("quantity out of range")]
    InvalidQuantity,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid cart data")]
    InvalidData,

    #[error("failed to total cart")]
    Pricing(#[from] PricingError),

    #[error("storage error")]
    Storage(#[source] RepositoryError),
}

impl From<RepositoryError> for CartsServiceError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::InvalidReference => Self::InvalidReference,
            RepositoryError::MissingRequiredData | RepositoryError::InvalidData => {
                Self::InvalidData
            }
            RepositoryError::AlreadyExists
            | RepositoryError::Sql(_)
            | RepositoryError::Local(_) => Self::Storage(error),
        }
    }
}
