//! Local Products Repository

use async_trait::async_trait;
use jiff::Timestamp;

use crate::{
    domain::products::{
        models::{NewProduct, Product, ProductUuid},
        repository::ProductsRepository,
    },
    storage::{LocalStore, RepositoryError, local::PRODUCTS_KEY},
};

#[derive(Debug, Clone)]
pub struct LocalProductsRepository {
    store: LocalStore,
}

impl LocalProductsRepository {
    #[must_use]
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProductsRepository for LocalProductsRepository {
    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError> {
        let mut products: Vec<Product> = self.store.read(PRODUCTS_KEY).await?;

        products.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.uuid.cmp(&a.uuid))
        });

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, RepositoryError> {
        let products: Vec<Product> = self.store.read(PRODUCTS_KEY).await?;

        products
            .into_iter()
            .find(|candidate| candidate.uuid == product)
            .ok_or(RepositoryError::NotFound)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        self.store
            .update(PRODUCTS_KEY, |products: &mut Vec<Product>| {
                if products.iter().any(|existing| existing.uuid == product.uuid) {
                    return Err(RepositoryError::AlreadyExists);
                }

                let now = Timestamp::now();

                let created = Product {
                    uuid: product.uuid,
                    name: product.name,
                    category: product.category,
                    price: product.price,
                    unit: product.unit,
                    stock: product.stock,
                    description: product.description,
                    image_url: product.image_url,
                    farmer: product.farmer,
                    created_at: now,
                    updated_at: now,
                };

                products.push(created.clone());

                Ok(created)
            })
            .await
    }
}
