//! Buyers
//!
//! Buyers are owned by the external identity provider; only their id is known here.

use crate::uuids::TypedUuid;

/// Buyer marker
#[derive(Debug)]
pub struct Buyer;

/// Buyer UUID
pub type BuyerUuid = TypedUuid<Buyer>;
