//! Product Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use farmgate::price_range::PriceRange;
use farmgate_app::domain::products::CatalogQuery;

use crate::{
    extensions::*,
    products::{errors::into_status_error, get::ProductResponse},
    state::State,
};

/// Price bounds applied to the listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PriceRangeResponse {
    /// Lower bound in cents
    pub min: u64,

    /// Upper bound in cents
    pub max: u64,

    /// Highest selectable bound in cents
    pub ceiling: u64,
}

impl From<PriceRange> for PriceRangeResponse {
    fn from(range: PriceRange) -> Self {
        Self {
            min: range.min(),
            max: range.max(),
            ceiling: range.ceiling(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// Matching products, newest first
    pub products: Vec<ProductResponse>,

    /// `all` followed by every category in the catalog
    pub categories: Vec<String>,

    /// Price bounds after clamping the requested ones
    pub price_range: PriceRangeResponse,
}

/// Product Index Handler
///
/// Lists products matching the search text, category and price bounds.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = StatusCode::OK, description = "Matching products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    category: QueryParam<String, false>,
    min_price: QueryParam<u64, false>,
    max_price: QueryParam<u64, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let page = state
        .app
        .products
        .search_products(CatalogQuery {
            query: q.into_inner(),
            category: category.into_inner(),
            min_price: min_price.into_inner(),
            max_price: max_price.into_inner(),
        })
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: page
            .products
            .into_iter()
            .map(|product| ProductResponse::new(product, state.currency))
            .collect(),
        categories: page.categories,
        price_range: page.price_range.into(),
    }))
}
