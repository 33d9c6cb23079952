//! Checkout Models

use crate::domain::orders::models::PaymentMethod;

/// Delivery details collected at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutDetails {
    pub delivery_address: String,
    pub payment_method: PaymentMethod,
}
