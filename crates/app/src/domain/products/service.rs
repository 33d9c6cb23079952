//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use farmgate::{
    price_range::PriceRange,
    search::{ProductFilter, categories, filter_products},
};

use crate::domain::products::{
    errors::ProductsServiceError,
    models::{NewProduct, Product, ProductUuid},
    repository::ProductsRepository,
};

/// Catalog search request. Absent fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Text matched against name and description.
    pub query: Option<String>,

    /// Exact category, or `"all"`.
    pub category: Option<String>,

    /// Requested lower price bound, in minor units.
    pub min_price: Option<u64>,

    /// Requested upper price bound, in minor units.
    pub max_price: Option<u64>,
}

/// Catalog search results.
#[derive(Debug, Clone)]
pub struct CatalogPage {
    /// Matching products, newest first.
    pub products: Vec<Product>,

    /// `"all"` followed by every category in the catalog.
    pub categories: Vec<String>,

    /// The price range after clamping the requested bounds.
    pub price_range: PriceRange,
}

#[derive(Clone)]
pub struct Catalog {
    repository: Arc<dyn ProductsRepository>,
}

impl Catalog {
    #[must_use]
    pub fn new(repository: Arc<dyn ProductsRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ProductsService for Catalog {
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError> {
        Ok(self.repository.list_products().await?)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        Ok(self.repository.get_product(product).await?)
    }

    async fn search_products(
        &self,
        query: CatalogQuery,
    ) -> Result<CatalogPage, ProductsServiceError> {
        let products = self.repository.list_products().await?;

        let mut price_range = PriceRange::for_prices(products.iter().map(|p| p.price));

        if let Some(min) = query.min_price {
            price_range.set_min(min);
        }

        if let Some(max) = query.max_price {
            price_range.set_max(max);
        }

        let mut filter = ProductFilter::new().with_price_range(&price_range);

        if let Some(text) = &query.query {
            filter = filter.with_query(text);
        }

        if let Some(category) = query.category {
            filter = filter.with_category(category);
        }

        let categories = categories(&products);
        let total = products.len();
        let products = filter_products(products, &filter);

        debug!(
            matched = products.len(),
            total,
            min_price = price_range.min(),
            max_price = price_range.max(),
            "searched catalog"
        );

        Ok(CatalogPage {
            products,
            categories,
            price_range,
        })
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        Ok(self.repository.create_product(product).await?)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products, newest first.
    async fn list_products(&self) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError>;

    /// Filters the catalog by text, category and price.
    async fn search_products(
        &self,
        query: CatalogQuery,
    ) -> Result<CatalogPage, ProductsServiceError>;

    /// Adds a product to the catalog.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;
}
