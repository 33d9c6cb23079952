//! Order History Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use farmgate::pricing::{Currency, display_amount};
use farmgate_app::domain::orders::models::{Order, OrderItem};

use crate::{
    extensions::*, orders::errors::into_status_error, products::get::ProductResponse,
    state::State,
};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// Order total in cents, fixed at checkout
    pub total_amount: u64,

    /// Order total formatted in the store currency
    pub display_total: String,

    /// One of `pending`, `confirmed`, `delivered` or `cancelled`
    pub status: String,

    /// Where the order is delivered
    pub delivery_address: String,

    /// One of `cash`, `card`, `upi` or `netbanking`
    pub payment_method: String,

    /// The ordered lines
    pub items: Vec<OrderItemResponse>,

    /// The date and time the order was placed
    pub created_at: String,

    /// The date and time the order was last updated
    pub updated_at: String,
}

impl OrderResponse {
    pub(crate) fn new(order: Order, currency: &'static Currency) -> Self {
        Self {
            uuid: order.uuid.into(),
            display_total: display_amount(order.total_amount, currency),
            total_amount: order.total_amount,
            status: order.status.to_string(),
            delivery_address: order.delivery_address,
            payment_method: order.payment_method.to_string(),
            items: order
                .items
                .into_iter()
                .map(|item| OrderItemResponse::new(item, currency))
                .collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    /// The unique identifier of the order item
    pub uuid: Uuid,

    /// The unique identifier of the ordered product
    pub product_uuid: Uuid,

    /// Number of units ordered
    pub quantity: u32,

    /// Unit price in cents when the order was placed
    pub price_at_purchase: u64,

    /// Current product details, absent when the product no longer exists
    pub product: Option<ProductResponse>,
}

impl OrderItemResponse {
    fn new(item: OrderItem, currency: &'static Currency) -> Self {
        Self {
            uuid: item.uuid.into(),
            product_uuid: item.product_uuid.into(),
            quantity: item.quantity,
            price_at_purchase: item.price_at_purchase,
            product: item
                .product
                .map(|product| ProductResponse::new(product, currency)),
        }
    }
}

/// Order History Handler
///
/// Lists the buyer's orders, newest first.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    responses(
        (status_code = StatusCode::OK, description = "The buyer's orders"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unknown buyer"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let buyer = depot.buyer_uuid_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders(buyer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(
        orders
            .into_iter()
            .map(|order| OrderResponse::new(order, state.currency))
            .collect(),
    ))
}
