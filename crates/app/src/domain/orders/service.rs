//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;

use crate::domain::{
    buyers::BuyerUuid,
    orders::{errors::OrdersServiceError, models::Order, repository::OrdersRepository},
};

/// Read-only view over a buyer's past orders.
#[derive(Clone)]
pub struct OrderHistory {
    repository: Arc<dyn OrdersRepository>,
}

impl OrderHistory {
    #[must_use]
    pub fn new(repository: Arc<dyn OrdersRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl OrdersService for OrderHistory {
    async fn list_orders(&self, buyer: BuyerUuid) -> Result<Vec<Order>, OrdersServiceError> {
        Ok(self.repository.list_orders(buyer).await?)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Lists the buyer's orders, newest first, with their items.
    async fn list_orders(&self, buyer: BuyerUuid) -> Result<Vec<Order>, OrdersServiceError>;
}
