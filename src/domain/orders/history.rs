//! Order History

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{actor::ActorKind, orders::models::{OrderStatus, OrderUuid}},
    uuids::TypedUuid,
};

/// History Entry UUID
pub type HistoryEntryUuid = TypedUuid<HistoryEntry>;

/// One immutable audit entry: who moved the order where, and why.
///
/// Entries are append-only and ordered by creation time; this journal is the
/// canonical reconstruction of "what happened" for the order detail screens.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub uuid: HistoryEntryUuid,
    pub order_uuid: OrderUuid,
    /// The order status resulting from this event.
    pub status: OrderStatus,
    pub actor: ActorKind,
    pub actor_name: Option<String>,
    pub reason: Option<String>,
    pub details: HistoryDetails,
    pub created_at: Timestamp,
}

/// Write model for a new history entry.
#[derive(Debug, Clone)]
pub struct NewHistoryEntry {
    pub order_uuid: OrderUuid,
    pub status: OrderStatus,
    pub actor: ActorKind,
    pub actor_name: Option<String>,
    pub reason: Option<String>,
    pub details: HistoryDetails,
}

/// Structured payload of a history entry.
///
/// Serializes to the exact JSON shape the audit screens already consume:
/// `{ "items": [{"name", "quantity", "variant"?}], "note"? }` with absent
/// optional fields omitted rather than null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<HistoryLineItem>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl HistoryDetails {
    #[must_use]
    pub fn with_items(items: Vec<HistoryLineItem>) -> Self {
        Self {
            items: Some(items),
            note: None,
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// One affected line inside a history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLineItem {
    pub name: String,
    pub quantity: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}
