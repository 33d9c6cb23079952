//! Orders Repository

mod local;
mod pg;

use async_trait::async_trait;
use mockall::automock;

use crate::{
    domain::{
        buyers::BuyerUuid,
        orders::models::{NewOrder, NewOrderItem, Order, OrderItem, OrderUuid},
    },
    storage::RepositoryError,
};

pub use local::LocalOrdersRepository;
pub use pg::PgOrdersRepository;

#[automock]
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    /// Creates a pending order without items.
    async fn create_order(&self, order: NewOrder) -> Result<Order, RepositoryError>;

    /// Adds items to an existing order in a single write.
    async fn create_order_items(
        &self,
        order: OrderUuid,
        items: Vec<NewOrderItem>,
    ) -> Result<Vec<OrderItem>, RepositoryError>;

    /// Lists a buyer's orders, newest first, with their items and product snapshots.
    async fn list_orders(&self, buyer: BuyerUuid) -> Result<Vec<Order>, RepositoryError>;
}
