//! Notification dispatch interface.
//!
//! Fire-and-forget: the orders service invokes the notifier after its
//! transaction commits, logs failures at `warn!` and never propagates them.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use tracing::info;

use crate::domain::{actor::UserUuid, orders::models::OrderUuid};

/// Lifecycle event worth telling the customer (or back office) about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderEvent {
    Placed {
        order: OrderUuid,
        user: Option<UserUuid>,
    },
    PaymentConfirmed { order: OrderUuid },
    Expired { order: OrderUuid },
    Cancelled { order: OrderUuid },
    ReturnRequested { order: OrderUuid },
    ReturnProcessed { order: OrderUuid },
    ReturnRejected { order: OrderUuid },
}

#[derive(Debug, Error)]
#[error("notification dispatch failed: {0}")]
pub struct NotifyError(pub String);

#[automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event: OrderEvent) -> Result<(), NotifyError>;
}

/// Default notifier: records the event in the log stream and nothing else.
///
/// The mail/push dispatchers live in the delivery layer; this keeps the core
/// observable when none is attached.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, event: OrderEvent) -> Result<(), NotifyError> {
        info!(?event, "order event");

        Ok(())
    }
}
