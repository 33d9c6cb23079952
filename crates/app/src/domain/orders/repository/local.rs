//! Local Orders Repository

use async_trait::async_trait;
use jiff::Timestamp;
use rustc_hash::FxHashMap;

use crate::{
    domain::{
        buyers::BuyerUuid,
        orders::{
            models::{NewOrder, NewOrderItem, Order, OrderItem, OrderStatus, OrderUuid},
            repository::OrdersRepository,
        },
        products::models::{Product, ProductUuid},
    },
    storage::{
        LocalStore, RepositoryError,
        local::{ORDERS_KEY, PRODUCTS_KEY},
    },
};

#[derive(Debug, Clone)]
pub struct LocalOrdersRepository {
    store: LocalStore,
}

impl LocalOrdersRepository {
    #[must_use]
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OrdersRepository for LocalOrdersRepository {
    async fn create_order(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        if order.delivery_address.trim().is_empty() {
            return Err(RepositoryError::MissingRequiredData);
        }

        self.store
            .update(ORDERS_KEY, |orders: &mut Vec<Order>| {
                if orders.iter().any(|existing| existing.uuid == order.uuid) {
                    return Err(RepositoryError::AlreadyExists);
                }

                let now = Timestamp::now();

                let created = Order {
                    uuid: order.uuid,
                    buyer: order.buyer,
                    total_amount: order.total_amount,
                    status: OrderStatus::Pending,
                    delivery_address: order.delivery_address,
                    payment_method: order.payment_method,
                    items: Vec::new(),
                    created_at: now,
                    updated_at: now,
                };

                orders.push(created.clone());

                Ok(created)
            })
            .await
    }

    async fn create_order_items(
        &self,
        order: OrderUuid,
        items: Vec<NewOrderItem>,
    ) -> Result<Vec<OrderItem>, RepositoryError> {
        if items.iter().any(|item| item.quantity == 0) {
            return Err(RepositoryError::InvalidData);
        }

        self.store
            .update(ORDERS_KEY, |orders: &mut Vec<Order>| {
                let target = orders
                    .iter_mut()
                    .find(|existing| existing.uuid == order)
                    .ok_or(RepositoryError::InvalidReference)?;

                let now = Timestamp::now();

                let created: Vec<OrderItem> = items
                    .into_iter()
                    .map(|item| OrderItem {
                        uuid: item.uuid,
                        order_uuid: order,
                        product_uuid: item.product_uuid,
                        quantity: item.quantity,
                        price_at_purchase: item.price_at_purchase,
                        product: None,
                        created_at: now,
                    })
                    .collect();

                target.items.extend(created.iter().cloned());

                Ok(created)
            })
            .await
    }

    async fn list_orders(&self, buyer: BuyerUuid) -> Result<Vec<Order>, RepositoryError> {
        let orders: Vec<Order> = self.store.read(ORDERS_KEY).await?;

        let mut orders: Vec<Order> = orders
            .into_iter()
            .filter(|order| order.buyer == buyer)
            .collect();

        if orders.is_empty() {
            return Ok(orders);
        }

        let products: Vec<Product> = self.store.read(PRODUCTS_KEY).await?;

        let products: FxHashMap<ProductUuid, Product> = products
            .into_iter()
            .map(|product| (product.uuid, product))
            .collect();

        for item in orders.iter_mut().flat_map(|order| order.items.iter_mut()) {
            item.product = products.get(&item.product_uuid).cloned();
        }

        orders.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.uuid.cmp(&a.uuid))
        });

        Ok(orders)
    }
}
