//! Checkout errors.

use std::fmt;

use thiserror::Error;

use crate::storage::RepositoryError;

/// A persistence step of the checkout workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    CreateOrder,
    CreateOrderItems,
    ClearCart,
}

impl CheckoutStep {
    /// Stable snake_case label, used for metric labels.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateOrder => "create_order",
            Self::CreateOrderItems => "create_order_items",
            Self::ClearCart => "clear_cart",
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CreateOrder => "create order",
            Self::CreateOrderItems => "create order items",
            Self::ClearCart => "clear cart",
        })
    }
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("please enter a delivery address")]
    MissingDeliveryAddress,

    #[error("your cart is empty")]
    EmptyCart,

    /// A write failed. Steps that completed before it are not undone.
    #[error("checkout failed at step: {step}")]
    Step {
        step: CheckoutStep,

        #[source]
        source: RepositoryError,
    },
}
