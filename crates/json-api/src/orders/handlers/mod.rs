//! Order Handlers

pub(crate) mod index;
