//! Test context for PostgreSQL-backed service tests.

use std::sync::Arc;

use crate::{
    context::AppContext,
    database::Db,
    domain::{
        carts::repository::PgCartsRepository, orders::repository::PgOrdersRepository,
        products::repository::PgProductsRepository,
    },
};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub app: AppContext,
}

impl TestContext {
    pub async fn new() -> Self {
        let db = TestDb::new().await;
        let pool = Db::new(db.pool().clone());

        let app = AppContext::from_repositories(
            Arc::new(PgProductsRepository::new(pool.clone())),
            Arc::new(PgCartsRepository::new(pool.clone())),
            Arc::new(PgOrdersRepository::new(pool)),
        );

        Self { db, app }
    }
}
