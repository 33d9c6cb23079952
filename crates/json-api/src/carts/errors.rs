//! Errors

use salvo::http::StatusError;
use tracing::error;

use farmgate_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart item not found"),
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity out of range")
        }
        CartsServiceError::InvalidReference => {
            StatusError::not_found().brief("Product not found")
        }
        CartsServiceError::InvalidData => StatusError::bad_request().brief("Invalid cart data"),
        CartsServiceError::Pricing(source) => {
            error!("failed to total cart: {source}");

            StatusError::internal_server_error()
        }
        CartsServiceError::Storage(source) => {
            error!("failed to access cart: {source}");

            StatusError::internal_server_error()
        }
    }
}
