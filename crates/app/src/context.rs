//! App Context

use std::{path::Path, sync::Arc};

use clap::ValueEnum;
use sqlx::{PgPool, migrate::MigrateError};
use thiserror::Error;
use tracing::info;

use farmgate::fixtures::{CatalogFixture, FixtureError};

use crate::{
    database::{self, Db},
    domain::{
        carts::{
            CartEngine, CartsService,
            repository::{CartsRepository, LocalCartsRepository, PgCartsRepository},
        },
        checkout::{CheckoutService, CheckoutWorkflow},
        orders::{
            OrderHistory, OrdersService,
            repository::{LocalOrdersRepository, OrdersRepository, PgOrdersRepository},
        },
        products::{
            Catalog, ProductsService, ProductsServiceError,
            models::NewProduct,
            repository::{LocalProductsRepository, PgProductsRepository, ProductsRepository},
        },
    },
    storage::{LocalStore, LocalStoreError},
};

/// Where carts, orders and the catalog are persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    /// `PostgreSQL`, selected by `DATABASE_URL`.
    #[default]
    Postgres,

    /// A JSON document on local disk.
    Local,
}

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrate(#[source] MigrateError),

    #[error("DATABASE_URL is required for the postgres storage backend")]
    MissingDatabaseUrl,

    #[error("failed to open local store")]
    LocalStore(#[source] LocalStoreError),

    #[error("failed to load catalog fixture")]
    Fixture(#[source] FixtureError),

    #[error("failed to import catalog")]
    Catalog(#[source] ProductsServiceError),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn postgres(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_pool(pool))
    }

    /// Build application context over an existing pool.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        let db = Db::new(pool);

        Self::from_repositories(
            Arc::new(PgProductsRepository::new(db.clone())),
            Arc::new(PgCartsRepository::new(db.clone())),
            Arc::new(PgOrdersRepository::new(db)),
        )
    }

    /// Build application context over a local document store.
    #[must_use]
    pub fn local(store: LocalStore) -> Self {
        Self::from_repositories(
            Arc::new(LocalProductsRepository::new(store.clone())),
            Arc::new(LocalCartsRepository::new(store.clone())),
            Arc::new(LocalOrdersRepository::new(store)),
        )
    }

    /// Open the local store at `path` and build application context over it.
    ///
    /// # Errors
    ///
    /// Returns an error when the store file exists but cannot be read.
    pub async fn local_file(path: impl AsRef<Path>) -> Result<Self, AppInitError> {
        let store = LocalStore::open(path)
            .await
            .map_err(AppInitError::LocalStore)?;

        Ok(Self::local(store))
    }

    /// Build application context for the chosen backend.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be reached or opened.
    pub async fn for_backend(
        backend: StorageBackend,
        database_url: Option<&str>,
        local_store_path: &Path,
    ) -> Result<Self, AppInitError> {
        match backend {
            StorageBackend::Postgres => {
                let url = database_url.ok_or(AppInitError::MissingDatabaseUrl)?;

                Self::postgres(url).await
            }
            StorageBackend::Local => Self::local_file(local_store_path).await,
        }
    }

    #[must_use]
    pub fn from_repositories(
        products: Arc<dyn ProductsRepository>,
        carts: Arc<dyn CartsRepository>,
        orders: Arc<dyn OrdersRepository>,
    ) -> Self {
        Self {
            products: Arc::new(Catalog::new(products.clone())),
            carts: Arc::new(CartEngine::new(carts.clone(), products)),
            checkout: Arc::new(CheckoutWorkflow::new(orders.clone(), carts)),
            orders: Arc::new(OrderHistory::new(orders)),
        }
    }

    /// Add every product in a catalog fixture, returning how many were created.
    ///
    /// # Errors
    ///
    /// Returns an error when the fixture is invalid or a product cannot be stored.
    pub async fn import_catalog(&self, path: impl AsRef<Path>) -> Result<usize, AppInitError> {
        let catalog = CatalogFixture::load(path)
            .and_then(CatalogFixture::into_catalog)
            .map_err(AppInitError::Fixture)?;

        let mut imported = 0;

        for entry in catalog.entries {
            self.products
                .create_product(NewProduct::from(entry))
                .await
                .map_err(AppInitError::Catalog)?;

            imported += 1;
        }

        info!(
            imported,
            currency = catalog.currency.map(|c| c.iso_alpha_code),
            "imported catalog"
        );

        Ok(imported)
    }

    /// Import a catalog fixture only when the catalog is empty.
    ///
    /// # Errors
    ///
    /// Returns an error when the catalog cannot be read or the import fails.
    pub async fn seed_catalog(&self, path: impl AsRef<Path>) -> Result<usize, AppInitError> {
        let existing = self
            .products
            .list_products()
            .await
            .map_err(AppInitError::Catalog)?;

        if !existing.is_empty() {
            info!(products = existing.len(), "catalog already seeded");

            return Ok(0);
        }

        self.import_catalog(path).await
    }
}
