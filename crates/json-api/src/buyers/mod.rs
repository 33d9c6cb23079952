//! Buyer identity
//!
//! The identity gateway in front of the API authenticates buyers and forwards their id
//! in [`BUYER_HEADER`].

pub(crate) mod middleware;

/// Header carrying the authenticated buyer's uuid.
pub(crate) const BUYER_HEADER: &str = "x-buyer-uuid";
