//! Update Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, get::CartResponse},
    extensions::*,
    state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    /// New quantity. Zero or less removes the item.
    pub quantity: i64,
}

/// Update Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Set Cart Item Quantity",
    responses(
        (status_code = StatusCode::OK, description = "The updated cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart item not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unknown buyer"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let buyer = depot.buyer_uuid_or_401()?;
    let item = item.into_inner();
    let quantity = json.into_inner().quantity;

    debug!(%buyer, %item, quantity, "updating cart item quantity");

    let cart = state
        .app
        .carts
        .update_quantity(buyer, item.into(), quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse::new(cart, state.currency)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use farmgate_app::domain::carts::{
        CartsServiceError, MockCartsService,
        models::{Cart, CartItemUuid},
    };

    use crate::test_helpers::{TEST_BUYER_UUID, carts_service};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart/items/{item}").put(handler))
    }

    fn strict(carts: &mut MockCartsService) {
        carts.expect_get_cart().never();
        carts.expect_add_to_cart().never();
        carts.expect_remove_from_cart().never();
    }

    #[tokio::test]
    async fn test_update_forwards_negative_quantity() -> TestResult {
        let item = CartItemUuid::new();
        let mut carts = MockCartsService::new();

        carts
            .expect_update_quantity()
            .once()
            .withf(move |buyer, i, quantity| {
                *buyer == TEST_BUYER_UUID && *i == item && *quantity == -5
            })
            .return_once(|_, _, _| Ok(Cart::default()));

        strict(&mut carts);

        let response: CartResponse =
            TestClient::put(format!("http://example.com/cart/items/{item}"))
                .json(&json!({ "quantity": -5 }))
                .send(&make_service(carts))
                .await
                .take_json()
                .await?;

        assert!(response.items.is_empty(), "expected item to be removed");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_item_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_quantity()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::NotFound));

        strict(&mut carts);

        let res = TestClient::put(format!(
            "http://example.com/cart/items/{}",
            CartItemUuid::new()
        ))
        .json(&json!({ "quantity": 3 }))
        .send(&make_service(carts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_oversized_quantity_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_update_quantity()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::InvalidQuantity));

        strict(&mut carts);

        let res = TestClient::put(format!(
            "http://example.com/cart/items/{}",
            CartItemUuid::new()
        ))
        .json(&json!({ "quantity": i64::MAX }))
        .send(&make_service(carts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
