//! `PostgreSQL` Orders Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    database::{Db, amount_param, count_param, try_get_amount, try_get_count},
    domain::{
        buyers::BuyerUuid,
        orders::{
            models::{
                NewOrder, NewOrderItem, Order, OrderItem, OrderItemUuid, OrderStatus, OrderUuid,
                PaymentMethod,
            },
            repository::OrdersRepository,
        },
        products::{models::ProductUuid, repository::decode_product_snapshot},
    },
    storage::RepositoryError,
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const CREATE_ORDER_ITEMS_SQL: &str = include_str!("../sql/create_order_items.sql");
const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("../sql/list_order_items.sql");

#[derive(Debug, Clone)]
pub struct PgOrdersRepository {
    db: Db,
}

impl PgOrdersRepository {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrdersRepository for PgOrdersRepository {
    async fn create_order(&self, order: NewOrder) -> Result<Order, RepositoryError> {
        let created = query_as::<Postgres, Order>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.buyer.into_uuid())
            .bind(amount_param(order.total_amount, "total_amount")?)
            .bind(order.delivery_address)
            .bind(order.payment_method.as_str())
            .fetch_one(self.db.pool())
            .await?;

        Ok(created)
    }

    async fn create_order_items(
        &self,
        order: OrderUuid,
        items: Vec<NewOrderItem>,
    ) -> Result<Vec<OrderItem>, RepositoryError> {
        let mut uuids = Vec::with_capacity(items.len());
        let mut products = Vec::with_capacity(items.len());
        let mut quantities = Vec::with_capacity(items.len());
        let mut prices = Vec::with_capacity(items.len());

        for item in items {
            uuids.push(item.uuid.into_uuid());
            products.push(item.product_uuid.into_uuid());
            quantities.push(count_param(item.quantity, "quantity")?);
            prices.push(amount_param(item.price_at_purchase, "price_at_purchase")?);
        }

        let created = query_as::<Postgres, OrderItem>(CREATE_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .bind(uuids)
            .bind(products)
            .bind(quantities)
            .bind(prices)
            .fetch_all(self.db.pool())
            .await?;

        Ok(created)
    }

    async fn list_orders(&self, buyer: BuyerUuid) -> Result<Vec<Order>, RepositoryError> {
        let mut orders = query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .bind(buyer.into_uuid())
            .fetch_all(self.db.pool())
            .await?;

        if orders.is_empty() {
            return Ok(orders);
        }

        let order_uuids: Vec<Uuid> = orders.iter().map(|order| order.uuid.into_uuid()).collect();

        let items = query_as::<Postgres, OrderItem>(LIST_ORDER_ITEMS_SQL)
            .bind(order_uuids)
            .fetch_all(self.db.pool())
            .await?;

        let mut items_by_order: FxHashMap<OrderUuid, Vec<OrderItem>> = FxHashMap::default();

        for item in items {
            items_by_order.entry(item.order_uuid).or_default().push(item);
        }

        for order in &mut orders {
            order.items = items_by_order.remove(&order.uuid).unwrap_or_default();
        }

        Ok(orders)
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;
        let payment_method: String = row.try_get("payment_method")?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            buyer: BuyerUuid::from_uuid(row.try_get("buyer_uuid")?),
            total_amount: try_get_amount(row, "total_amount")?,
            status: status.parse::<OrderStatus>().map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?,
            delivery_address: row.try_get("delivery_address")?,
            payment_method: payment_method
                .parse::<PaymentMethod>()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "payment_method".to_string(),
                    source: Box::new(e),
                })?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: try_get_count(row, "quantity")?,
            price_at_purchase: try_get_amount(row, "price_at_purchase")?,
            product: decode_product_snapshot(row)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
