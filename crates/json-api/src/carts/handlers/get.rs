//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use farmgate::pricing::{Currency, display_amount, line_total};
use farmgate_app::domain::carts::models::{Cart, CartItem};

use crate::{
    carts::errors::into_status_error, extensions::*, products::get::ProductResponse,
    state::State,
};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The items in the cart, in the order they were added
    pub items: Vec<CartItemResponse>,

    /// Sum of price × quantity in cents
    pub total: u64,

    /// Total formatted in the store currency
    pub display_total: String,

    /// Number of units in the cart
    pub count: u64,
}

impl CartResponse {
    pub(crate) fn new(cart: Cart, currency: &'static Currency) -> Self {
        Self {
            display_total: display_amount(cart.total, currency),
            total: cart.total,
            count: cart.count,
            items: cart
                .items
                .into_iter()
                .map(|item| CartItemResponse::new(item, currency))
                .collect(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the cart item
    pub uuid: Uuid,

    /// The unique identifier of the product in the cart item
    pub product_uuid: Uuid,

    /// Number of units
    pub quantity: u32,

    /// Unit price × quantity in cents
    pub line_total: u64,

    /// Current product details, absent when the product no longer exists
    pub product: Option<ProductResponse>,
}

impl CartItemResponse {
    fn new(item: CartItem, currency: &'static Currency) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            quantity: item.quantity,
            line_total: line_total(&item).unwrap_or_default(),
            product: item
                .product
                .map(|product| ProductResponse::new(product, currency)),
        }
    }
}

/// Get Cart Handler
///
/// Returns the buyer's cart.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    responses(
        (status_code = StatusCode::OK, description = "The buyer's cart"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unknown buyer"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let buyer = depot.buyer_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(buyer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse::new(cart, state.currency)))
}
