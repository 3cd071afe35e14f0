//! Order History Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, types::Json};

use crate::domain::{
    actor::ActorKind,
    orders::{
        history::{HistoryDetails, HistoryEntry, HistoryEntryUuid, NewHistoryEntry},
        models::{OrderStatus, OrderUuid},
    },
};

const APPEND_HISTORY_SQL: &str = include_str!("../sql/append_history.sql");
const LIST_HISTORY_SQL: &str = include_str!("../sql/list_history.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderHistoryRepository;

impl PgOrderHistoryRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Append one entry. The journal is insert-only; there are no update or
    /// delete statements for this table.
    pub(crate) async fn append(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        entry: NewHistoryEntry,
    ) -> Result<HistoryEntry, sqlx::Error> {
        query_as::<Postgres, HistoryEntry>(APPEND_HISTORY_SQL)
            .bind(HistoryEntryUuid::new().into_uuid())
            .bind(entry.order_uuid.into_uuid())
            .bind(entry.status.as_str())
            .bind(entry.actor.as_str())
            .bind(entry.actor_name)
            .bind(entry.reason)
            .bind(Json(entry.details))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<HistoryEntry>, sqlx::Error> {
        query_as::<Postgres, HistoryEntry>(LIST_HISTORY_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for HistoryEntry {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;
        let status = status
            .parse::<OrderStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        let actor: String = row.try_get("actor")?;
        let actor = actor
            .parse::<ActorKind>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "actor".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: HistoryEntryUuid::from_uuid(row.try_get("uuid")?),
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            status,
            actor,
            actor_name: row.try_get("actor_name")?,
            reason: row.try_get("reason")?,
            details: row.try_get::<Json<HistoryDetails>, _>("details")?.0,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
