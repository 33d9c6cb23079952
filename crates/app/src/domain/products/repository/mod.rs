//! Products Repository

mod local;
mod pg;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    domain::products::models::{NewProduct, Product, ProductUuid},
    storage::RepositoryError,
};

pub use local::LocalProductsRepository;
pub use pg::PgProductsRepository;
pub(crate) use pg::decode_product_snapshot;

#[automock]
#[async_trait]
pub trait ProductsRepository: Send + Sync {
    /// Retrieves all products, newest first.
    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, RepositoryError>;

    /// Adds a product to the catalog.
    async fn create_product(&self, product: NewProduct) -> Result<Product, RepositoryError>;
}
