//! Errors

use salvo::http::StatusError;
use tracing::error;

use farmgate_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::Storage(source) => {
            error!("failed to load orders: {source}");

            StatusError::internal_server_error()
        }
    }
}
