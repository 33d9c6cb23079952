//! Add To Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
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

/// Add To Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddToCartRequest {
    /// Product to add one unit of
    pub product_uuid: Uuid,
}

/// Add To Cart Handler
///
/// Adds one unit of a product, merging into the existing line for that product. Unknown
/// products leave the cart unchanged.
#[endpoint(
    tags("cart"),
    summary = "Add Product to Cart",
    responses(
        (status_code = StatusCode::OK, description = "The updated cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unknown buyer"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddToCartRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let buyer = depot.buyer_uuid_or_401()?;
    let product = json.into_inner().product_uuid;

    debug!(%buyer, %product, "adding product to cart");

    let cart = state
        .app
        .carts
        .add_to_cart(buyer, product.into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse::new(cart, state.currency)))
}
