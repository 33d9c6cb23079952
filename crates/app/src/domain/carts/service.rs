//! Carts service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, warn};

use crate::{
    domain::{
        buyers::BuyerUuid,
        carts::{
            errors::CartsServiceError,
            models::{Cart, CartItem, CartItemUuid, MAX_QUANTITY, NewCartItem},
            repository::CartsRepository,
        },
        products::{models::ProductUuid, repository::ProductsRepository},
    },
    storage::RepositoryError,
};

/// Cart engine
///
/// Keeps at most one line per product in a buyer's cart. Every mutation is persisted
/// before the cart is re-read, so returned totals always reflect stored state.
#[derive(Clone)]
pub struct CartEngine {
    carts: Arc<dyn CartsRepository>,
    products: Arc<dyn ProductsRepository>,
}

impl CartEngine {
    #[must_use]
    pub fn new(carts: Arc<dyn CartsRepository>, products: Arc<dyn ProductsRepository>) -> Self {
        Self { carts, products }
    }

    async fn increment(&self, buyer: BuyerUuid, item: &CartItem) -> Result<(), CartsServiceError> {
        let quantity = item
            .quantity
            .checked_add(1)
            .filter(|quantity| *quantity <= MAX_QUANTITY)
            .ok_or(CartsServiceError::InvalidQuantity)?;

        self.carts
            .update_quantity(buyer, item.uuid, quantity)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl CartsService for CartEngine {
    async fn get_cart(&self, buyer: BuyerUuid) -> Result<Cart, CartsServiceError> {
        let items = self.carts.list_items(buyer).await?;

        Ok(Cart::from_items(items)?)
    }

    async fn add_to_cart(
        &self,
        buyer: BuyerUuid,
        product: ProductUuid,
    ) -> Result<Cart, CartsServiceError> {
        let cart = self.get_cart(buyer).await?;

        if let Some(existing) = cart.item_for_product(product) {
            self.increment(buyer, existing).await?;

            return self.get_cart(buyer).await;
        }

        match self.products.get_product(product).await {
            Ok(_) => {}
            Err(RepositoryError::NotFound) => {
                debug!(%buyer, %product, "ignoring add of unknown product");

                return Ok(cart);
            }
            Err(error) => return Err(error.into()),
        }

        let item = NewCartItem {
            uuid: CartItemUuid::new(),
            product_uuid: product,
            quantity: 1,
        };

        match self.carts.insert_item(buyer, item).await {
            Ok(()) => {}
            Err(RepositoryError::AlreadyExists) => {
                warn!(%buyer, %product, "concurrent add detected, merging into existing line");

                let raced = self.get_cart(buyer).await?;

                let existing = raced
                    .item_for_product(product)
                    .ok_or(CartsServiceError::NotFound)?;

                self.increment(buyer, existing).await?;
            }
            Err(error) => return Err(error.into()),
        }

        self.get_cart(buyer).await
    }

    async fn update_quantity(
        &self,
        buyer: BuyerUuid,
        item: CartItemUuid,
        quantity: i64,
    ) -> Result<Cart, CartsServiceError> {
        if quantity <= 0 {
            return self.remove_from_cart(buyer, item).await;
        }

        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|quantity| *quantity <= MAX_QUANTITY)
            .ok_or(CartsServiceError::InvalidQuantity)?;

        let rows_affected = self.carts.update_quantity(buyer, item, quantity).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        self.get_cart(buyer).await
    }

    async fn remove_from_cart(
        &self,
        buyer: BuyerUuid,
        item: CartItemUuid,
    ) -> Result<Cart, CartsServiceError> {
        let rows_affected = self.carts.delete_item(buyer, item).await?;

        if rows_affected == 0 {
            debug!(%buyer, %item, "cart item already removed");
        }

        self.get_cart(buyer).await
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the buyer's cart with derived totals.
    async fn get_cart(&self, buyer: BuyerUuid) -> Result<Cart, CartsServiceError>;

    /// Add one unit of a product, merging into an existing line for the same product.
    ///
    /// Adding a product that does not exist leaves the cart unchanged.
    async fn add_to_cart(
        &self,
        buyer: BuyerUuid,
        product: ProductUuid,
    ) -> Result<Cart, CartsServiceError>;

    /// Set a line's quantity. Zero or negative quantities remove the line.
    async fn update_quantity(
        &self,
        buyer: BuyerUuid,
        item: CartItemUuid,
        quantity: i64,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove a line. Removing a line that is already gone is not an error.
    async fn remove_from_cart(
        &self,
        buyer: BuyerUuid,
        item: CartItemUuid,
    ) -> Result<Cart, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use mockall::Sequence;
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::repository::{LocalCartsRepository, MockCartsRepository},
            products::{
                models::{NewProduct, Product},
                repository::{LocalProductsRepository, MockProductsRepository},
            },
        },
        storage::LocalStore,
    };

    use super::*;

    struct Shop {
        engine: CartEngine,
        products: LocalProductsRepository,
    }

    impl Shop {
        fn new() -> Self {
            let store = LocalStore::in_memory();
            let products = LocalProductsRepository::new(store.clone());

            Self {
                engine: CartEngine::new(
                    Arc::new(LocalCartsRepository::new(store)),
                    Arc::new(products.clone()),
                ),
                products,
            }
        }

        async fn product(&self, name: &str, price: u64) -> Result<Product, RepositoryError> {
            self.products
                .create_product(NewProduct {
                    uuid: ProductUuid::new(),
                    name: name.to_string(),
                    category: "vegetables".to_string(),
                    price,
                    unit: "kg".to_string(),
                    stock: 50,
                    description: String::new(),
                    image_url: String::new(),
                    farmer: "farmer1".to_string(),
                })
                .await
        }
    }

    fn line(buyer: BuyerUuid, product: ProductUuid, quantity: u32) -> CartItem {
        CartItem {
            uuid: CartItemUuid::new(),
            buyer,
            product_uuid: product,
            quantity,
            product: None,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn adding_same_product_twice_merges_into_one_line() -> TestResult {
        let shop = Shop::new();
        let buyer = BuyerUuid::new();
        let tomatoes = shop.product("Organic Tomatoes", 2_99).await?;

        shop.engine.add_to_cart(buyer, tomatoes.uuid).await?;
        let cart = shop.engine.add_to_cart(buyer, tomatoes.uuid).await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.total, 2 * 2_99);
        assert_eq!(cart.count, 2);

        Ok(())
    }

    #[tokio::test]
    async fn totals_follow_quantity_changes() -> TestResult {
        let shop = Shop::new();
        let buyer = BuyerUuid::new();
        let tomatoes = shop.product("Organic Tomatoes", 2_99).await?;
        let bananas = shop.product("Organic Bananas", 1_49).await?;

        shop.engine.add_to_cart(buyer, tomatoes.uuid).await?;
        shop.engine.add_to_cart(buyer, tomatoes.uuid).await?;
        let before = shop.engine.add_to_cart(buyer, bananas.uuid).await?;

        assert_eq!(before.total, 7_47);
        assert_eq!(before.count, 3);

        let item = before
            .item_for_product(tomatoes.uuid)
            .ok_or("tomatoes missing")?
            .uuid;

        let after = shop.engine.update_quantity(buyer, item, 5).await?;

        assert_eq!(after.total - before.total, 3 * 2_99);
        assert_eq!(after.count, 6);

        Ok(())
    }

    #[tokio::test]
    async fn zero_and_negative_quantities_remove_the_line() -> TestResult {
        let shop = Shop::new();
        let buyer = BuyerUuid::new();
        let tomatoes = shop.product("Organic Tomatoes", 2_99).await?;
        let bananas = shop.product("Organic Bananas", 1_49).await?;

        shop.engine.add_to_cart(buyer, tomatoes.uuid).await?;
        let cart = shop.engine.add_to_cart(buyer, bananas.uuid).await?;

        let tomato_line = cart.item_for_product(tomatoes.uuid).ok_or("missing")?.uuid;
        let banana_line = cart.item_for_product(bananas.uuid).ok_or("missing")?.uuid;

        let cart = shop.engine.update_quantity(buyer, tomato_line, 0).await?;

        assert!(cart.item_for_product(tomatoes.uuid).is_none());

        let cart = shop.engine.update_quantity(buyer, banana_line, -5).await?;

        assert!(cart.is_empty());
        assert_eq!(cart.total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn adding_unknown_product_leaves_cart_unchanged() -> TestResult {
        let shop = Shop::new();
        let buyer = BuyerUuid::new();
        let tomatoes = shop.product("Organic Tomatoes", 2_99).await?;

        let before = shop.engine.add_to_cart(buyer, tomatoes.uuid).await?;
        let after = shop.engine.add_to_cart(buyer, ProductUuid::new()).await?;

        assert_eq!(after, before);

        Ok(())
    }

    #[tokio::test]
    async fn removing_twice_is_idempotent() -> TestResult {
        let shop = Shop::new();
        let buyer = BuyerUuid::new();
        let tomatoes = shop.product("Organic Tomatoes", 2_99).await?;

        let cart = shop.engine.add_to_cart(buyer, tomatoes.uuid).await?;
        let item = cart.items[0].uuid;

        let cart = shop.engine.remove_from_cart(buyer, item).await?;

        assert!(cart.is_empty());

        let cart = shop.engine.remove_from_cart(buyer, item).await?;

        assert!(cart.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn updating_missing_line_is_not_found() -> TestResult {
        let shop = Shop::new();

        let result = shop
            .engine
            .update_quantity(BuyerUuid::new(), CartItemUuid::new(), 3)
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn oversized_quantity_is_rejected_without_writes() {
        let mut carts = MockCartsRepository::new();
        let mut products = MockProductsRepository::new();

        carts.expect_update_quantity().never();
        carts.expect_delete_item().never();
        carts.expect_list_items().never();
        products.expect_get_product().never();

        let engine = CartEngine::new(Arc::new(carts), Arc::new(products));

        let result = engine
            .update_quantity(
                BuyerUuid::new(),
                CartItemUuid::new(),
                i64::from(MAX_QUANTITY) + 1,
            )
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );
    }

    #[tokio::test]
    async fn largest_quantity_is_stored() -> TestResult {
        let buyer = BuyerUuid::new();
        let item = line(buyer, ProductUuid::new(), MAX_QUANTITY);
        let item_uuid = item.uuid;

        let mut carts = MockCartsRepository::new();
        let products = MockProductsRepository::new();

        carts
            .expect_update_quantity()
            .once()
            .withf(move |_, i, quantity| *i == item_uuid && *quantity == MAX_QUANTITY)
            .return_once(|_, _, _| Ok(1));

        carts
            .expect_list_items()
            .once()
            .return_once(move |_| Ok(vec![item]));

        let engine = CartEngine::new(Arc::new(carts), Arc::new(products));

        let cart = engine
            .update_quantity(buyer, item_uuid, i64::from(MAX_QUANTITY))
            .await?;

        assert_eq!(cart.count, u64::from(MAX_QUANTITY));

        Ok(())
    }

    #[tokio::test]
    async fn adding_to_a_full_line_is_rejected_without_writes() {
        let buyer = BuyerUuid::new();
        let product = ProductUuid::new();
        let full = line(buyer, product, MAX_QUANTITY);

        let mut carts = MockCartsRepository::new();
        let mut products = MockProductsRepository::new();

        carts
            .expect_list_items()
            .once()
            .return_once(move |_| Ok(vec![full]));

        carts.expect_update_quantity().never();
        carts.expect_insert_item().never();
        products.expect_get_product().never();

        let engine = CartEngine::new(Arc::new(carts), Arc::new(products));

        let result = engine.add_to_cart(buyer, product).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );
    }

    #[tokio::test]
    async fn lost_insert_race_merges_into_winning_line() -> TestResult {
        let buyer = BuyerUuid::new();
        let product = ProductUuid::new();
        let snapshot = Product {
            uuid: product,
            name: "Organic Tomatoes".to_string(),
            category: "vegetables".to_string(),
            price: 2_99,
            unit: "kg".to_string(),
            stock: 50,
            description: String::new(),
            image_url: String::new(),
            farmer: "farmer1".to_string(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        };
        let winner = line(buyer, product, 1);
        let winner_uuid = winner.uuid;
        let merged = CartItem {
            quantity: 2,
            ..winner.clone()
        };

        let mut seq = Sequence::new();
        let mut carts = MockCartsRepository::new();
        let mut products = MockProductsRepository::new();

        carts
            .expect_list_items()
            .once()
            .in_sequence(&mut seq)
            .return_once(|_| Ok(vec![]));

        products
            .expect_get_product()
            .once()
            .withf(move |p| *p == product)
            .return_once(move |_| Ok(snapshot));

        carts
            .expect_insert_item()
            .once()
            .in_sequence(&mut seq)
            .withf(move |b, item| *b == buyer && item.product_uuid == product && item.quantity == 1)
            .return_once(|_, _| Err(RepositoryError::AlreadyExists));

        carts
            .expect_list_items()
            .once()
            .in_sequence(&mut seq)
            .return_once(move |_| Ok(vec![winner]));

        carts
            .expect_update_quantity()
            .once()
            .in_sequence(&mut seq)
            .withf(move |b, item, quantity| *b == buyer && *item == winner_uuid && *quantity == 2)
            .return_once(|_, _, _| Ok(1));

        carts
            .expect_list_items()
            .once()
            .in_sequence(&mut seq)
            .return_once(move |_| Ok(vec![merged]));

        carts.expect_delete_item().never();
        carts.expect_clear().never();

        let engine = CartEngine::new(Arc::new(carts), Arc::new(products));

        let cart = engine.add_to_cart(buyer, product).await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.count, 2);

        Ok(())
    }
}
