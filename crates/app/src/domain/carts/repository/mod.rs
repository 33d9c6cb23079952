//! Carts Repository

mod local;
mod pg;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    domain::{
        buyers::BuyerUuid,
        carts::models::{CartItem, CartItemUuid, NewCartItem},
    },
    storage::RepositoryError,
};

pub use local::LocalCartsRepository;
pub use pg::PgCartsRepository;

#[automock]
#[async_trait]
pub trait CartsRepository: Send + Sync {
    /// Lists a buyer's cart items in the order they were added, with product snapshots.
    async fn list_items(&self, buyer: BuyerUuid) -> Result<Vec<CartItem>, RepositoryError>;

    /// Inserts a new line. Fails with [`RepositoryError::AlreadyExists`] when the buyer
    /// already has a line for the product.
    async fn insert_item(&self, buyer: BuyerUuid, item: NewCartItem)
    -> Result<(), RepositoryError>;

    /// Sets the quantity of a line, returning the number of lines changed.
    async fn update_quantity(
        &self,
        buyer: BuyerUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<u64, RepositoryError>;

    /// Deletes a line, returning the number of lines removed.
    async fn delete_item(&self, buyer: BuyerUuid, item: CartItemUuid)
    -> Result<u64, RepositoryError>;

    /// Deletes every line in the buyer's cart, returning the number removed.
    async fn clear(&self, buyer: BuyerUuid) -> Result<u64, RepositoryError>;
}
