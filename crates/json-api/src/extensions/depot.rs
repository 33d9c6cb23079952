//! Typed access to request-scoped depot values.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use farmgate_app::domain::buyers::BuyerUuid;

/// Depot lookups that fail as HTTP errors.
pub(crate) trait DepotExt {
    /// Shared state injected by the router; absence is a wiring bug, hence 500.
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_buyer_uuid(&mut self, buyer: BuyerUuid);

    /// The buyer resolved by the identity hoop, or 401 when no buyer was resolved.
    fn buyer_uuid_or_401(&self) -> Result<BuyerUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_buyer_uuid(&mut self, buyer: BuyerUuid) {
        self.inject(buyer);
    }

    fn buyer_uuid_or_401(&self) -> Result<BuyerUuid, StatusError> {
        self.obtain::<BuyerUuid>()
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Unknown buyer"))
    }
}
