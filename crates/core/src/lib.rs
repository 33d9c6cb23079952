//! Farmgate
//!
//! Storefront domain logic shared by the application services and the JSON API:
//! cart pricing, product search, the price range control and catalog fixtures.

pub mod fixtures;
pub mod price_range;
pub mod pricing;
pub mod search;
