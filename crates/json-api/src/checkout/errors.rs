//! Errors

use salvo::http::StatusError;

use farmgate_app::domain::checkout::CheckoutError;

use crate::observability::record_checkout_failure;

pub(crate) fn into_status_error(error: CheckoutError) -> StatusError {
    match error {
        CheckoutError::MissingDeliveryAddress | CheckoutError::EmptyCart => {
            StatusError::unprocessable_entity().brief(error.to_string())
        }
        CheckoutError::Step { step, .. } => {
            record_checkout_failure(step);

            StatusError::internal_server_error().brief("Failed to place order, please try again")
        }
    }
}
