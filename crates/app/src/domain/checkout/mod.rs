//! Checkout

pub mod errors;
pub mod models;
pub mod service;

pub use errors::{CheckoutError, CheckoutStep};
pub use service::*;
