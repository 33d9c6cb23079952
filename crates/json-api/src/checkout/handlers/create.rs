//! Checkout Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use farmgate_app::domain::{checkout::models::CheckoutDetails, orders::models::PaymentMethod};

use crate::{
    carts::{self, get::CartResponse},
    checkout::errors::into_status_error,
    extensions::*,
    observability::record_order_placed,
    orders::index::OrderResponse,
    state::State,
};

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    /// Where the order should be delivered
    pub delivery_address: String,

    /// One of `cash`, `card`, `upi` or `netbanking`. Defaults to `cash`.
    pub payment_method: Option<String>,
}

/// Checkout Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutResponse {
    /// The placed order
    pub order: OrderResponse,

    /// The buyer's cart after checkout
    pub cart: CartResponse,
}

/// Checkout Handler
///
/// Places an order for everything in the buyer's cart and empties the cart.
#[endpoint(
    tags("checkout"),
    summary = "Place Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unknown buyer"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid checkout"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CheckoutResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let buyer = depot.buyer_uuid_or_401()?;
    let request = json.into_inner();

    let payment_method = request
        .payment_method
        .as_deref()
        .map(str::parse::<PaymentMethod>)
        .transpose()
        .or_400("Unknown payment method")?
        .unwrap_or_default();

    let cart = state
        .app
        .carts
        .get_cart(buyer)
        .await
        .map_err(carts::errors::into_status_error)?;

    let order = state
        .app
        .checkout
        .checkout(
            buyer,
            cart,
            CheckoutDetails {
                delivery_address: request.delivery_address,
                payment_method,
            },
        )
        .await
        .map_err(into_status_error)?;

    info!(%buyer, order = %order.uuid, "checkout complete");
    record_order_placed(order.payment_method, order.total_amount);

    let cart = state
        .app
        .carts
        .get_cart(buyer)
        .await
        .map_err(carts::errors::into_status_error)?;

    res.add_header(LOCATION, "/orders", true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(CheckoutResponse {
        order: OrderResponse::new(order, state.currency),
        cart: CartResponse::new(cart, state.currency),
    }))
}
