//! Local Carts Repository

use async_trait::async_trait;
use jiff::Timestamp;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        buyers::BuyerUuid,
        carts::{
            models::{CartItem, CartItemUuid, NewCartItem},
            repository::CartsRepository,
        },
        products::models::{Product, ProductUuid},
    },
    storage::{
        LocalStore, RepositoryError,
        local::{PRODUCTS_KEY, cart_key},
    },
};

/// A cart line as stored under `cart_<buyer>`. Product details are joined on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CartLine {
    uuid: CartItemUuid,
    product_uuid: ProductUuid,
    quantity: u32,
    created_at: Timestamp,
    updated_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct LocalCartsRepository {
    store: LocalStore,
}

impl LocalCartsRepository {
    #[must_use]
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CartsRepository for LocalCartsRepository {
    async fn list_items(&self, buyer: BuyerUuid) -> Result<Vec<CartItem>, RepositoryError> {
        let lines: Vec<CartLine> = self.store.read(&cart_key(buyer)).await?;

        if lines.is_empty() {
            return Ok(Vec::new());
        }

        let products: Vec<Product> = self.store.read(PRODUCTS_KEY).await?;

        let products: FxHashMap<ProductUuid, Product> = products
            .into_iter()
            .map(|product| (product.uuid, product))
            .collect();

        Ok(lines
            .into_iter()
            .map(|line| CartItem {
                uuid: line.uuid,
                buyer,
                product_uuid: line.product_uuid,
                quantity: line.quantity,
                product: products.get(&line.product_uuid).cloned(),
                created_at: line.created_at,
                updated_at: line.updated_at,
            })
            .collect())
    }

    async fn insert_item(
        &self,
        buyer: BuyerUuid,
        item: NewCartItem,
    ) -> Result<(), RepositoryError> {
        self.store
            .update(&cart_key(buyer), |lines: &mut Vec<CartLine>| {
                if lines
                    .iter()
                    .any(|line| line.uuid == item.uuid || line.product_uuid == item.product_uuid)
                {
                    return Err(RepositoryError::AlreadyExists);
                }

                if item.quantity == 0 {
                    return Err(RepositoryError::InvalidData);
                }

                let now = Timestamp::now();

                lines.push(CartLine {
                    uuid: item.uuid,
                    product_uuid: item.product_uuid,
                    quantity: item.quantity,
                    created_at: now,
                    updated_at: now,
                });

                Ok(())
            })
            .await
    }

    async fn update_quantity(
        &self,
        buyer: BuyerUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<u64, RepositoryError> {
        if quantity == 0 {
            return Err(RepositoryError::InvalidData);
        }

        self.store
            .update(&cart_key(buyer), |lines: &mut Vec<CartLine>| {
                let Some(line) = lines.iter_mut().find(|line| line.uuid == item) else {
                    return Ok(0);
                };

                line.quantity = quantity;
                line.updated_at = Timestamp::now();

                Ok(1)
            })
            .await
    }

    async fn delete_item(
        &self,
        buyer: BuyerUuid,
        item: CartItemUuid,
    ) -> Result<u64, RepositoryError> {
        self.store
            .update(&cart_key(buyer), |lines: &mut Vec<CartLine>| {
                let before = lines.len();

                lines.retain(|line| line.uuid != item);

                Ok(removed(before, lines.len()))
            })
            .await
    }

    async fn clear(&self, buyer: BuyerUuid) -> Result<u64, RepositoryError> {
        self.store
            .update(&cart_key(buyer), |lines: &mut Vec<CartLine>| {
                let before = lines.len();

                lines.clear();

                Ok(removed(before, 0))
            })
            .await
    }
}

fn removed(before: usize, after: usize) -> u64 {
    u64::try_from(before.saturating_sub(after)).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::products::{
        models::NewProduct,
        repository::{LocalProductsRepository, ProductsRepository},
    };

    use super::*;

    async fn seeded_store() -> Result<(LocalStore, Product), RepositoryError> {
        let store = LocalStore::in_memory();

        let product = LocalProductsRepository::new(store.clone())
            .create_product(NewProduct {
                uuid: ProductUuid::new(),
                name: "Organic Tomatoes".to_string(),
                category: "vegetables".to_string(),
                price: 2_99,
                unit: "kg".to_string(),
                stock: 50,
                description: String::new(),
                image_url: String::new(),
                farmer: "farmer1".to_string(),
            })
            .await?;

        Ok((store, product))
    }

    fn new_item(product: ProductUuid) -> NewCartItem {
        NewCartItem {
            uuid: CartItemUuid::new(),
            product_uuid: product,
            quantity: 1,
        }
    }

    #[tokio::test]
    async fn inserted_items_are_listed_with_product_snapshot() -> TestResult {
        let (store, product) = seeded_store().await?;
        let repository = LocalCartsRepository::new(store);
        let buyer = BuyerUuid::new();

        repository.insert_item(buyer, new_item(product.uuid)).await?;

        let items = repository.list_items(buyer).await?;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 1);
        assert_eq!(items[0].buyer, buyer);
        assert_eq!(items[0].product.as_ref(), Some(&product));

        Ok(())
    }

    #[tokio::test]
    async fn second_line_for_same_product_already_exists() -> TestResult {
        let (store, product) = seeded_store().await?;
        let repository = LocalCartsRepository::new(store);
        let buyer = BuyerUuid::new();

        repository.insert_item(buyer, new_item(product.uuid)).await?;

        let result = repository.insert_item(buyer, new_item(product.uuid)).await;

        assert!(
            matches!(result, Err(RepositoryError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn carts_are_separate_per_buyer() -> TestResult {
        let (store, product) = seeded_store().await?;
        let repository = LocalCartsRepository::new(store);
        let buyer = BuyerUuid::new();

        repository.insert_item(buyer, new_item(product.uuid)).await?;

        assert!(repository.list_items(BuyerUuid::new()).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_report_rows_affected() -> TestResult {
        let (store, product) = seeded_store().await?;
        let repository = LocalCartsRepository::new(store);
        let buyer = BuyerUuid::new();
        let item = new_item(product.uuid);
        let uuid = item.uuid;

        repository.insert_item(buyer, item).await?;

        assert_eq!(repository.update_quantity(buyer, uuid, 4).await?, 1);
        assert_eq!(repository.list_items(buyer).await?[0].quantity, 4);
        assert_eq!(
            repository
                .update_quantity(buyer, CartItemUuid::new(), 4)
                .await?,
            0
        );
        assert_eq!(repository.delete_item(buyer, uuid).await?, 1);
        assert_eq!(repository.delete_item(buyer, uuid).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn clear_removes_every_line() -> TestResult {
        let (store, product) = seeded_store().await?;
        let repository = LocalCartsRepository::new(store);
        let buyer = BuyerUuid::new();

        repository.insert_item(buyer, new_item(product.uuid)).await?;
        repository
            .insert_item(buyer, new_item(ProductUuid::new()))
            .await?;

        assert_eq!(repository.clear(buyer).await?, 2);
        assert!(repository.list_items(buyer).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn unknown_products_have_no_snapshot() -> TestResult {
        let repository = LocalCartsRepository::new(LocalStore::in_memory());
        let buyer = BuyerUuid::new();

        repository
            .insert_item(buyer, new_item(ProductUuid::new()))
            .await?;

        let items = repository.list_items(buyer).await?;

        assert!(items[0].product.is_none());

        Ok(())
    }
}
