//! Checkout service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{error, info};

use farmgate::pricing::PricedLine;

use crate::{
    domain::{
        buyers::BuyerUuid,
        carts::{models::Cart, repository::CartsRepository},
        checkout::{
            errors::{CheckoutError, CheckoutStep},
            models::CheckoutDetails,
        },
        orders::{
            models::{NewOrder, NewOrderItem, Order, OrderItemUuid, OrderUuid},
            repository::OrdersRepository,
        },
    },
    storage::RepositoryError,
};

/// Checkout workflow
///
/// Validates the delivery details, then writes the order, writes its items and clears the
/// cart as three separate steps. A failed step stops the workflow; earlier steps stay
/// committed.
#[derive(Clone)]
pub struct CheckoutWorkflow {
    orders: Arc<dyn OrdersRepository>,
    carts: Arc<dyn CartsRepository>,
}

impl CheckoutWorkflow {
    #[must_use]
    pub fn new(orders: Arc<dyn OrdersRepository>, carts: Arc<dyn CartsRepository>) -> Self {
        Self { orders, carts }
    }
}

fn step_failed(
    buyer: BuyerUuid,
    step: CheckoutStep,
) -> impl FnOnce(RepositoryError) -> CheckoutError {
    move |source| {
        error!(%buyer, %step, error = %source, "checkout step failed");

        CheckoutError::Step { step, source }
    }
}

#[async_trait]
impl CheckoutService for CheckoutWorkflow {
    async fn checkout(
        &self,
        buyer: BuyerUuid,
        cart: Cart,
        details: CheckoutDetails,
    ) -> Result<Order, CheckoutError> {
        let delivery_address = details.delivery_address.trim();

        if delivery_address.is_empty() {
            return Err(CheckoutError::MissingDeliveryAddress);
        }

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let mut order = self
            .orders
            .create_order(NewOrder {
                uuid: OrderUuid::new(),
                buyer,
                total_amount: cart.total,
                delivery_address: delivery_address.to_string(),
                payment_method: details.payment_method,
            })
            .await
            .map_err(step_failed(buyer, CheckoutStep::CreateOrder))?;

        let items = cart
            .items
            .iter()
            .map(|item| NewOrderItem {
                uuid: OrderItemUuid::new(),
                product_uuid: item.product_uuid,
                quantity: item.quantity,
                price_at_purchase: item.unit_price().unwrap_or_default(),
            })
            .collect();

        order.items = self
            .orders
            .create_order_items(order.uuid, items)
            .await
            .map_err(step_failed(buyer, CheckoutStep::CreateOrderItems))?;

        self.carts
            .clear(buyer)
            .await
            .map_err(step_failed(buyer, CheckoutStep::ClearCart))?;

        info!(
            %buyer,
            order = %order.uuid,
            total_amount = order.total_amount,
            items = order.items.len(),
            payment_method = %order.payment_method,
            "order placed"
        );

        Ok(order)
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Turn the buyer's cart into a pending order and empty the cart.
    async fn checkout(
        &self,
        buyer: BuyerUuid,
        cart: Cart,
        details: CheckoutDetails,
    ) -> Result<Order, CheckoutError>;
}
