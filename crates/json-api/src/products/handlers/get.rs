//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use farmgate::pricing::{Currency, display_amount};
use farmgate_app::domain::products::models::Product;

use crate::{extensions::*, products::errors::into_status_error, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// Product name
    pub name: String,

    /// Product category, e.g. `vegetables`
    pub category: String,

    /// Unit price in cents
    pub price: u64,

    /// Unit price formatted in the store currency
    pub display_price: String,

    /// Unit the price is quoted per, e.g. `kg`
    pub unit: String,

    /// Units available
    pub stock: u32,

    /// Whether the product can be added to a cart
    pub in_stock: bool,

    /// Whether fewer than 20 units remain
    pub low_stock: bool,

    /// Product description
    pub description: String,

    /// Product image
    pub image_url: String,

    /// The farmer selling the product
    pub farmer: String,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl ProductResponse {
    pub(crate) fn new(product: Product, currency: &'static Currency) -> Self {
        Self {
            uuid: product.uuid.into(),
            display_price: display_amount(product.price, currency),
            in_stock: product.in_stock(),
            low_stock: product.low_stock(),
            name: product.name,
            category: product.category,
            price: product.price,
            unit: product.unit,
            stock: product.stock,
            description: product.description,
            image_url: product.image_url,
            farmer: product.farmer,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Get Product Handler
///
/// Returns a product.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let product = state
        .app
        .products
        .get_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductResponse::new(product, state.currency)))
}
