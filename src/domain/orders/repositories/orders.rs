//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    actor::UserUuid,
    orders::models::{Order, OrderStatus, OrderUuid},
};

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("../sql/update_order_status.sql");
const MARK_CANCELLED_SQL: &str = include_str!("../sql/mark_cancelled.sql");
const MARK_RETURN_REQUESTED_SQL: &str = include_str!("../sql/mark_return_requested.sql");
const SETTLE_RETURN_SQL: &str = include_str!("../sql/settle_return.sql");
const MARK_RETURN_REJECTED_SQL: &str = include_str!("../sql/mark_return_rejected.sql");

/// Write model for the order row; totals already computed by the service.
#[derive(Debug, Clone)]
pub(crate) struct NewOrderRow {
    pub(crate) uuid: OrderUuid,
    pub(crate) user_uuid: Option<UserUuid>,
    pub(crate) status: OrderStatus,
    pub(crate) currency: String,
    pub(crate) items_total_cents: u64,
    pub(crate) shipping_cents: u64,
    pub(crate) tax_cents: u64,
    pub(crate) total_cents: u64,
    pub(crate) recipient_name: String,
    pub(crate) shipping_address: String,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: NewOrderRow,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.user_uuid.map(UserUuid::into_uuid))
            .bind(order.status.as_str())
            .bind(order.currency)
            .bind(try_bind_amount(order.items_total_cents, "items_total_cents")?)
            .bind(try_bind_amount(order.shipping_cents, "shipping_cents")?)
            .bind(try_bind_amount(order.tax_cents, "tax_cents")?)
            .bind(try_bind_amount(order.total_cents, "total_cents")?)
            .bind(order.recipient_name)
            .bind(order.shipping_address)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Compare-and-swap status transition; `None` means the order was no
    /// longer in `expected` when the update ran.
    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
        expected: OrderStatus,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .bind(expected.as_str())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn mark_cancelled(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(MARK_CANCELLED_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn mark_return_requested(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        reason: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(MARK_RETURN_REQUESTED_SQL)
            .bind(order.into_uuid())
            .bind(reason)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn settle_return(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(SETTLE_RETURN_SQL)
            .bind(order.into_uuid())
            .bind(status.as_str())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn mark_return_rejected(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        reason: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(MARK_RETURN_REJECTED_SQL)
            .bind(order.into_uuid())
            .bind(reason)
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse::<OrderStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: row
                .try_get::<Option<uuid::Uuid>, _>("user_uuid")?
                .map(UserUuid::from_uuid),
            status,
            is_cancelled: row.try_get("is_cancelled")?,
            currency: row.try_get("currency")?,
            items_total_cents: try_get_amount(row, "items_total_cents")?,
            shipping_cents: try_get_amount(row, "shipping_cents")?,
            tax_cents: try_get_amount(row, "tax_cents")?,
            total_cents: try_get_amount(row, "total_cents")?,
            recipient_name: row.try_get("recipient_name")?,
            shipping_address: row.try_get("shipping_address")?,
            return_reason: row.try_get("return_reason")?,
            rejection_reason: row.try_get("rejection_reason")?,
            items: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

pub(super) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(super) fn try_bind_amount(amount: u64, col: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

pub(super) fn try_get_quantity(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let quantity_i32: i32 = row.try_get(col)?;

    u32::try_from(quantity_i32).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
