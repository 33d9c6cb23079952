//! `PostgreSQL` Carts Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query, query_as};

use crate::{
    database::{Db, count_param, try_get_count},
    domain::{
        buyers::BuyerUuid,
        carts::{
            models::{CartItem, CartItemUuid, NewCartItem},
            repository::CartsRepository,
        },
        products::{models::ProductUuid, repository::decode_product_snapshot},
    },
    storage::RepositoryError,
};

const LIST_CART_ITEMS_SQL: &str = include_str!("../sql/list_cart_items.sql");
const INSERT_CART_ITEM_SQL: &str = include_str!("../sql/insert_cart_item.sql");
const UPDATE_CART_ITEM_QUANTITY_SQL: &str = include_str!("../sql/update_cart_item_quantity.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("../sql/delete_cart_item.sql");
const CLEAR_CART_ITEMS_SQL: &str = include_str!("../sql/clear_cart_items.sql");

#[derive(Debug, Clone)]
pub struct PgCartsRepository {
    db: Db,
}

impl PgCartsRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartsRepository for PgCartsRepository {
    async fn list_items(&self, buyer: BuyerUuid) -> Result<Vec<CartItem>, RepositoryError> {
        let items = query_as::<Postgres, CartItem>(LIST_CART_ITEMS_SQL)
            .bind(buyer.into_uuid())
            .fetch_all(self.db.pool())
            .await?;

        Ok(items)
    }

    async fn insert_item(
        &self,
        buyer: BuyerUuid,
        item: NewCartItem,
    ) -> Result<(), RepositoryError> {
        query(INSERT_CART_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(buyer.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(count_param(item.quantity, "quantity")?)
            .execute(self.db.pool())
            .await?;

        Ok(())
    }

    async fn update_quantity(
        &self,
        buyer: BuyerUuid,
        item: CartItemUuid,
        quantity: u32,
    ) -> Result<u64, RepositoryError> {
        let rows_affected = query(UPDATE_CART_ITEM_QUANTITY_SQL)
            .bind(item.into_uuid())
            .bind(buyer.into_uuid())
            .bind(count_param(quantity, "quantity")?)
            .execute(self.db.pool())
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    async fn delete_item(
        &self,
        buyer: BuyerUuid,
        item: CartItemUuid,
    ) -> Result<u64, RepositoryError> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(buyer.into_uuid())
            .execute(self.db.pool())
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    async fn clear(&self, buyer: BuyerUuid) -> Result<u64, RepositoryError> {
        let rows_affected = query(CLEAR_CART_ITEMS_SQL)
            .bind(buyer.into_uuid())
            .execute(self.db.pool())
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            buyer: BuyerUuid::from_uuid(row.try_get("buyer_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: try_get_count(row, "quantity")?,
            product: decode_product_snapshot(row)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
