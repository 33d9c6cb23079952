//! `PostgreSQL` Products Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    database::{Db, amount_param, count_param, try_get_amount, try_get_count},
    domain::products::{
        models::{NewProduct, Product, ProductUuid},
        repository::ProductsRepository,
    },
    storage::RepositoryError,
};

const LIST_PRODUCTS_SQL: &str = include_str!("../sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("../sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("../sql/create_product.sql");

#[derive(Debug, Clone)]
pub struct PgProductsRepository {
    db: Db,
}

impl PgProductsRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductsRepository for PgProductsRepository {
    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = query_as::<Postgres, Product>(LIST_PRODUCTS_SQL)
            .fetch_all(self.db.pool())
            .await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, RepositoryError> {
        let product = query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(self.db.pool())
            .await?;

        Ok(product)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let created = query_as::<Postgres, Product>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.name)
            .bind(product.category)
            .bind(amount_param(product.price, "price")?)
            .bind(product.unit)
            .bind(count_param(product.stock, "stock")?)
            .bind(product.description)
            .bind(product.image_url)
            .bind(product.farmer)
            .fetch_one(self.db.pool())
            .await?;

        Ok(created)
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        decode_product(row, "")
    }
}

/// Column prefix used by joined queries for the product snapshot.
const PRODUCT_SNAPSHOT_PREFIX: &str = "product_snapshot_";

/// Decode the product snapshot joined onto a row, `None` when the join found no product or
/// the query carries no snapshot columns.
pub(crate) fn decode_product_snapshot(row: &PgRow) -> sqlx::Result<Option<Product>> {
    let snapshot_uuid = match row.try_get::<Option<Uuid>, _>("product_snapshot_uuid") {
        Ok(uuid) => uuid,
        Err(sqlx::Error::ColumnNotFound(_)) => None,
        Err(error) => return Err(error),
    };

    snapshot_uuid
        .map(|_| decode_product(row, PRODUCT_SNAPSHOT_PREFIX))
        .transpose()
}

/// Decode a product from columns named `{prefix}uuid`, `{prefix}name` and so on, which
/// lets joined queries carry a product snapshot alongside their own columns.
fn decode_product(row: &PgRow, prefix: &str) -> sqlx::Result<Product> {
    let col = |name: &str| format!("{prefix}{name}");

    Ok(Product {
        uuid: ProductUuid::from_uuid(row.try_get::<Uuid, _>(col("uuid").as_str())?),
        name: row.try_get(col("name").as_str())?,
        category: row.try_get(col("category").as_str())?,
        price: try_get_amount(row, &col("price"))?,
        unit: row.try_get(col("unit").as_str())?,
        stock: try_get_count(row, &col("stock"))?,
        description: row.try_get(col("description").as_str())?,
        image_url: row.try_get(col("image_url").as_str())?,
        farmer: row.try_get(col("farmer").as_str())?,
        created_at: row
            .try_get::<SqlxTimestamp, _>(col("created_at").as_str())?
            .to_jiff(),
        updated_at: row
            .try_get::<SqlxTimestamp, _>(col("updated_at").as_str())?
            .to_jiff(),
    })
}
