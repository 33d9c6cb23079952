//! Delete Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use tracing::debug;
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, get::CartResponse},
    extensions::*,
    state::State,
};

/// Delete Cart Item Handler
///
/// Removes a line from the cart. Removing a line that is already gone succeeds.
#[endpoint(
    tags("cart"),
    summary = "Remove Cart Item",
    responses(
        (status_code = StatusCode::OK, description = "The updated cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unknown buyer"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    )
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let buyer = depot.buyer_uuid_or_401()?;
    let item = item.into_inner();

    debug!(%buyer, %item, "removing cart item");

    let cart = state
        .app
        .carts
        .remove_from_cart(buyer, item.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse::new(cart, state.currency)))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use farmgate_app::domain::carts::{
        MockCartsService,
        models::{Cart, CartItemUuid},
    };

    use crate::test_helpers::{TEST_BUYER_UUID, carts_service};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart/items/{item}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_item_success() -> TestResult {
        let item = CartItemUuid::new();

        let mut carts = MockCartsService::new();

        carts
            .expect_remove_from_cart()
            .once()
            .withf(move |buyer, i| *buyer == TEST_BUYER_UUID && *i == item)
            .return_once(|_, _| Ok(Cart::default()));

        carts.expect_get_cart().never();
        carts.expect_add_to_cart().never();
        carts.expect_update_quantity().never();

        let res = TestClient::delete(format!("http://example.com/cart/items/{item}"))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_invalid_uuid_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_remove_from_cart().never();
        carts.expect_get_cart().never();
        carts.expect_add_to_cart().never();
        carts.expect_update_quantity().never();

        let res = TestClient::delete("http://example.com/cart/items/not-a-uuid")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
