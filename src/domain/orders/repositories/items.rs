//! Order Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    catalog::models::{ProductUuid, VariantUuid},
    orders::models::{NewOrderItem, OrderItem, OrderItemUuid, OrderUuid},
};

use super::orders::{try_bind_amount, try_get_amount, try_get_quantity};

const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");
const ADD_RETURN_REQUEST_SQL: &str = include_str!("../sql/add_return_request.sql");
const APPLY_RETURN_SQL: &str = include_str!("../sql/apply_return.sql");
const CLEAR_RETURN_REQUESTS_SQL: &str = include_str!("../sql/clear_return_requests.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: NewOrderItem,
    ) -> Result<OrderItem, sqlx::Error> {
        query_as::<Postgres, OrderItem>(CREATE_ORDER_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(item.order_uuid.into_uuid())
            .bind(item.product_uuid.into_uuid())
            .bind(item.variant_uuid.into_uuid())
            .bind(item.name_snapshot)
            .bind(item.size_snapshot)
            .bind(item.color_snapshot)
            .bind(try_bind_amount(item.price_cents_snapshot, "price_cents_snapshot")?)
            .bind(i32::try_from(item.quantity).map_err(|e| sqlx::Error::ColumnDecode {
                index: "quantity".to_string(),
                source: Box::new(e),
            })?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderItem>, sqlx::Error> {
        query_as::<Postgres, OrderItem>(GET_ORDER_ITEMS_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Guarded increment of the pending-return counter; zero rows affected
    /// means the request no longer fits inside the quantity invariant.
    pub(crate) async fn add_return_request(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: OrderItemUuid,
        order: OrderUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(ADD_RETURN_REQUEST_SQL)
            .bind(item.into_uuid())
            .bind(order.into_uuid())
            .bind(i64::from(quantity))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Guarded move of quantity into `quantity_returned`, zeroing any
    /// pending request on the line.
    pub(crate) async fn apply_return(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: OrderItemUuid,
        order: OrderUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(APPLY_RETURN_SQL)
            .bind(item.into_uuid())
            .bind(order.into_uuid())
            .bind(i64::from(quantity))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_return_requests(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_RETURN_REQUESTS_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderItemUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            variant_uuid: VariantUuid::from_uuid(row.try_get("variant_uuid")?),
            name_snapshot: row.try_get("name_snapshot")?,
            size_snapshot: row.try_get("size_snapshot")?,
            color_snapshot: row.try_get("color_snapshot")?,
            price_cents_snapshot: try_get_amount(row, "price_cents_snapshot")?,
            quantity: try_get_quantity(row, "quantity")?,
            quantity_returned: try_get_quantity(row, "quantity_returned")?,
            quantity_return_requested: try_get_quantity(row, "quantity_return_requested")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
