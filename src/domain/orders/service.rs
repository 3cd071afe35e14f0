//! Orders service.
//!
//! Owns every order lifecycle transition. Each operation runs inside one
//! database transaction: stock movements, order/item updates and history
//! entries either all land or none do. Collaborators with external effects
//! (payment provider, notifier) are only invoked after commit.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        actor::{Actor, ActorKind},
        catalog::PgCatalogRepository,
        notifications::{Notifier, OrderEvent},
        orders::{
            errors::OrdersServiceError,
            history::{HistoryDetails, HistoryEntry, HistoryLineItem, NewHistoryEntry},
            models::{
                NewOrder, NewOrderItem, Order, OrderItem, OrderItemUuid, OrderStatus, OrderUuid,
                ReturnLine, ReturnRequest, ReturnResolution,
            },
            repositories::{
                NewOrderRow, PgOrderHistoryRepository, PgOrderItemsRepository,
                PgOrdersRepository,
            },
        },
        payments::{PaymentHandle, PaymentProvider},
    },
};

/// Checkout configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrdersConfig {
    /// Tax rate in basis points (1/100th of a percent). Tax is recorded on
    /// the order but not added into the stored total.
    pub tax_rate_bps: u64,
}

impl OrdersConfig {
    /// Tax on an item total, rounded half-up in integer arithmetic.
    #[must_use]
    pub fn tax_cents(&self, items_total_cents: u64) -> u64 {
        (items_total_cents * self.tax_rate_bps + 5_000) / 10_000
    }
}

#[derive(Clone)]
pub struct PgOrdersService {
    db: Db,
    config: OrdersConfig,
    orders: PgOrdersRepository,
    items: PgOrderItemsRepository,
    history: PgOrderHistoryRepository,
    catalog: PgCatalogRepository,
    payments: Arc<dyn PaymentProvider>,
    notifier: Arc<dyn Notifier>,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(
        db: Db,
        config: OrdersConfig,
        payments: Arc<dyn PaymentProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            db,
            config,
            orders: PgOrdersRepository::new(),
            items: PgOrderItemsRepository::new(),
            history: PgOrderHistoryRepository::new(),
            catalog: PgCatalogRepository::new(),
            payments,
            notifier,
        }
    }

    /// Notification failures never abort the operation that raised them.
    async fn dispatch(&self, event: OrderEvent) {
        if let Err(error) = self.notifier.notify(event).await {
            warn!(%error, "notification dispatch failed");
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.place_order",
        skip(self, new),
        fields(order_uuid = %new.uuid, line_count = new.lines.len()),
        err
    )]
    async fn place_order(&self, new: NewOrder) -> Result<Order, OrdersServiceError> {
        if new.lines.is_empty() {
            return Err(OrdersServiceError::EmptyOrder);
        }

        if new.lines.iter().any(|line| line.quantity == 0) {
            return Err(OrdersServiceError::InvalidData);
        }

        let mut tx = self.db.begin().await?;

        let mut items_total_cents = 0u64;
        let mut snapshots = Vec::with_capacity(new.lines.len());

        for line in &new.lines {
            let offer = self
                .catalog
                .get_variant_for_sale(&mut tx, line.variant_uuid)
                .await
                .map_err(|error| match error {
                    sqlx::Error::RowNotFound => OrdersServiceError::NotFound,
                    other => other.into(),
                })?;

            if offer.variant.product_uuid != line.product_uuid {
                return Err(OrdersServiceError::NotFound);
            }

            if offer.variant.stock < u64::from(line.quantity) {
                return Err(OrdersServiceError::StockInsufficient {
                    product_name: offer.product_name,
                    requested: line.quantity,
                    available: offer.variant.stock,
                });
            }

            let rows_affected = self
                .catalog
                .decrement_stock(&mut tx, line.variant_uuid, line.quantity)
                .await?;

            if rows_affected == 0 {
                // Lost a race for the last units; report what is left now.
                let available = self.catalog.get_stock(&mut tx, line.variant_uuid).await?;

                return Err(OrdersServiceError::StockInsufficient {
                    product_name: offer.product_name,
                    requested: line.quantity,
                    available,
                });
            }

            let unit_price = offer.unit_price_cents();
            items_total_cents += unit_price * u64::from(line.quantity);

            snapshots.push(NewOrderItem {
                uuid: OrderItemUuid::new(),
                order_uuid: new.uuid,
                product_uuid: line.product_uuid,
                variant_uuid: line.variant_uuid,
                name_snapshot: offer.product_name,
                size_snapshot: offer.variant.size,
                color_snapshot: offer.variant.color,
                price_cents_snapshot: unit_price,
                quantity: line.quantity,
            });
        }

        let status = new.payment.initial_status();
        let tax_cents = self.config.tax_cents(items_total_cents);
        let total_cents = items_total_cents + new.shipping_cents;

        let mut order = self
            .orders
            .create_order(
                &mut tx,
                NewOrderRow {
                    uuid: new.uuid,
                    user_uuid: new.user_uuid,
                    status,
                    currency: new.currency,
                    items_total_cents,
                    shipping_cents: new.shipping_cents,
                    tax_cents,
                    total_cents,
                    recipient_name: new.contact.recipient_name,
                    shipping_address: new.contact.shipping_address,
                },
            )
            .await?;

        let mut history_items = Vec::with_capacity(snapshots.len());

        for snapshot in snapshots {
            let item = self.items.create_order_item(&mut tx, snapshot).await?;

            history_items.push(HistoryLineItem {
                name: item.name_snapshot.clone(),
                quantity: item.quantity,
                variant: item.variant_label(),
            });

            order.items.push(item);
        }

        self.history
            .append(
                &mut tx,
                NewHistoryEntry {
                    order_uuid: order.uuid,
                    status,
                    actor: ActorKind::System,
                    actor_name: None,
                    reason: Some("order placed".to_string()),
                    details: HistoryDetails::with_items(history_items),
                },
            )
            .await?;

        tx.commit().await?;

        info!(order_uuid = %order.uuid, total_cents = order.total_cents, "order placed");

        self.dispatch(OrderEvent::Placed {
            order: order.uuid,
            user: order.user_uuid,
        })
        .await;

        Ok(order)
    }

    async fn begin_capture(
        &self,
        actor: Actor,
        order: OrderUuid,
    ) -> Result<PaymentHandle, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.orders.get_order(&mut tx, order).await?;

        tx.commit().await?;

        if let Actor::User(user) = &actor {
            if order.user_uuid != Some(*user) {
                return Err(OrdersServiceError::NotFound);
            }
        }

        if order.status != OrderStatus::PendingPayment {
            return Err(OrdersServiceError::InvalidTransition {
                status: order.status,
                action: "capture payment for",
            });
        }

        let handle = self
            .payments
            .create_capture(order.total_cents, &order.currency)
            .await?;

        Ok(handle)
    }

    async fn confirm_payment(&self, order: OrderUuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .orders
            .update_status(
                &mut tx,
                order,
                OrderStatus::Paid,
                OrderStatus::PendingPayment,
            )
            .await?;

        let mut updated = match updated {
            Some(order) => order,
            None => {
                let current = self.orders.get_order(&mut tx, order).await?;

                return Err(OrdersServiceError::InvalidTransition {
                    status: current.status,
                    action: "confirm payment for",
                });
            }
        };

        self.history
            .append(
                &mut tx,
                NewHistoryEntry {
                    order_uuid: updated.uuid,
                    status: OrderStatus::Paid,
                    actor: ActorKind::System,
                    actor_name: None,
                    reason: Some("payment captured".to_string()),
                    details: HistoryDetails::default(),
                },
            )
            .await?;

        updated.items = self.items.get_order_items(&mut tx, updated.uuid).await?;

        tx.commit().await?;

        info!(order_uuid = %updated.uuid, "payment captured");

        self.dispatch(OrderEvent::PaymentConfirmed {
            order: updated.uuid,
        })
        .await;

        Ok(updated)
    }

    async fn expire_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .orders
            .update_status(
                &mut tx,
                order,
                OrderStatus::Expired,
                OrderStatus::PendingPayment,
            )
            .await?;

        let mut updated = match updated {
            Some(order) => order,
            None => {
                let current = self.orders.get_order(&mut tx, order).await?;

                return Err(OrdersServiceError::InvalidTransition {
                    status: current.status,
                    action: "expire",
                });
            }
        };

        self.history
            .append(
                &mut tx,
                NewHistoryEntry {
                    order_uuid: updated.uuid,
                    status: OrderStatus::Expired,
                    actor: ActorKind::System,
                    actor_name: None,
                    reason: Some("payment window expired".to_string()),
                    details: HistoryDetails::default(),
                },
            )
            .await?;

        updated.items = self.items.get_order_items(&mut tx, updated.uuid).await?;

        tx.commit().await?;

        info!(order_uuid = %updated.uuid, "order expired");

        self.dispatch(OrderEvent::Expired {
            order: updated.uuid,
        })
        .await;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "orders.service.cancel_order",
        skip(self, actor, reason),
        fields(order_uuid = %order),
        err
    )]
    async fn cancel_order(
        &self,
        actor: Actor,
        order: OrderUuid,
        reason: Option<String>,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.orders.get_order(&mut tx, order).await?;

        match &actor {
            Actor::Admin { .. } => {}
            Actor::User(user) => {
                if current.user_uuid != Some(*user) {
                    return Err(OrdersServiceError::Forbidden);
                }
            }
            Actor::System => return Err(OrdersServiceError::Forbidden),
        }

        if !current.can_cancel() {
            return Err(OrdersServiceError::InvalidTransition {
                status: current.status,
                action: "cancel",
            });
        }

        let mut updated = self
            .orders
            .mark_cancelled(&mut tx, current.uuid)
            .await?
            .ok_or(OrdersServiceError::InvalidTransition {
                status: current.status,
                action: "cancel",
            })?;

        self.history
            .append(
                &mut tx,
                NewHistoryEntry {
                    order_uuid: updated.uuid,
                    status: OrderStatus::Cancelled,
                    actor: actor.kind(),
                    actor_name: actor.audit_name(),
                    reason,
                    details: HistoryDetails::default(),
                },
            )
            .await?;

        updated.items = self.items.get_order_items(&mut tx, updated.uuid).await?;

        tx.commit().await?;

        info!(order_uuid = %updated.uuid, "order cancelled");

        self.dispatch(OrderEvent::Cancelled {
            order: updated.uuid,
        })
        .await;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "orders.service.request_return",
        skip(self, actor, request),
        fields(order_uuid = %order, line_count = request.lines.len()),
        err
    )]
    async fn request_return(
        &self,
        actor: Actor,
        order: OrderUuid,
        request: ReturnRequest,
    ) -> Result<Order, OrdersServiceError> {
        let lines: Vec<ReturnLine> = request
            .lines
            .iter()
            .copied()
            .filter(|line| line.quantity > 0)
            .collect();

        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyReturnRequest);
        }

        let mut tx = self.db.begin().await?;

        let current = self.orders.get_order(&mut tx, order).await?;

        let Actor::User(user) = &actor else {
            return Err(OrdersServiceError::Forbidden);
        };

        if current.user_uuid != Some(*user) {
            return Err(OrdersServiceError::Forbidden);
        }

        if !matches!(
            current.status,
            OrderStatus::Paid | OrderStatus::ReturnRequested
        ) {
            return Err(OrdersServiceError::InvalidTransition {
                status: current.status,
                action: "request a return for",
            });
        }

        let items = self.items.get_order_items(&mut tx, current.uuid).await?;

        let mut history_items = Vec::with_capacity(lines.len());

        for line in &lines {
            let item = items
                .iter()
                .find(|item| item.uuid == line.item_uuid)
                .ok_or(OrdersServiceError::NotFound)?;

            let max_returnable = item.max_returnable();

            if line.quantity > max_returnable {
                return Err(OrdersServiceError::ReturnQuantityExceeded {
                    item_name: item.name_snapshot.clone(),
                    requested: line.quantity,
                    max_returnable,
                });
            }

            let rows_affected = self
                .items
                .add_return_request(&mut tx, line.item_uuid, current.uuid, line.quantity)
                .await?;

            if rows_affected == 0 {
                return Err(OrdersServiceError::ReturnQuantityExceeded {
                    item_name: item.name_snapshot.clone(),
                    requested: line.quantity,
                    max_returnable,
                });
            }

            history_items.push(HistoryLineItem {
                name: item.name_snapshot.clone(),
                quantity: line.quantity,
                variant: item.variant_label(),
            });
        }

        let mut updated = self
            .orders
            .mark_return_requested(&mut tx, current.uuid, &request.reason)
            .await?
            .ok_or(OrdersServiceError::InvalidTransition {
                status: current.status,
                action: "request a return for",
            })?;

        self.history
            .append(
                &mut tx,
                NewHistoryEntry {
                    order_uuid: updated.uuid,
                    status: OrderStatus::ReturnRequested,
                    actor: actor.kind(),
                    actor_name: actor.audit_name(),
                    reason: Some(request.reason),
                    details: HistoryDetails::with_items(history_items),
                },
            )
            .await?;

        updated.items = self.items.get_order_items(&mut tx, updated.uuid).await?;

        tx.commit().await?;

        info!(order_uuid = %updated.uuid, "return requested");

        self.dispatch(OrderEvent::ReturnRequested {
            order: updated.uuid,
        })
        .await;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "orders.service.process_return",
        skip(self, actor, resolution),
        fields(order_uuid = %order, accepted_count = resolution.accepted.len()),
        err
    )]
    async fn process_return(
        &self,
        actor: Actor,
        order: OrderUuid,
        resolution: ReturnResolution,
    ) -> Result<Order, OrdersServiceError> {
        if !actor.is_admin() {
            return Err(OrdersServiceError::Forbidden);
        }

        let mut tx = self.db.begin().await?;

        let current = self.orders.get_order(&mut tx, order).await?;

        if !matches!(
            current.status,
            OrderStatus::ReturnRequested | OrderStatus::Paid
        ) {
            return Err(OrdersServiceError::InvalidTransition {
                status: current.status,
                action: "process a return for",
            });
        }

        let items = self.items.get_order_items(&mut tx, current.uuid).await?;

        let accepted: Vec<ReturnLine> = resolution
            .accepted
            .iter()
            .copied()
            .filter(|line| line.quantity > 0)
            .collect();

        // Validate every accepted line against the pre-read state before
        // mutating anything.
        for line in &accepted {
            let item = find_item(&items, line.item_uuid)?;
            let limit = acceptable_quantity(item);

            if line.quantity > limit {
                return Err(OrdersServiceError::ReturnQuantityExceeded {
                    item_name: item.name_snapshot.clone(),
                    requested: line.quantity,
                    max_returnable: limit,
                });
            }
        }

        // Pending quantities not covered by an accepted line are implicitly
        // rejected; capture them before the counters are zeroed.
        let mut rejected_items = Vec::new();

        for item in items.iter().filter(|item| item.has_pending_return()) {
            let accepted_quantity = accepted_quantity_for(&accepted, item.uuid);
            let remainder = item.quantity_return_requested.saturating_sub(accepted_quantity);

            if remainder > 0 {
                rejected_items.push(HistoryLineItem {
                    name: item.name_snapshot.clone(),
                    quantity: remainder,
                    variant: item.variant_label(),
                });
            }
        }

        let mut accepted_items = Vec::with_capacity(accepted.len());

        for line in &accepted {
            let item = find_item(&items, line.item_uuid)?;
            let limit = acceptable_quantity(item);

            let rows_affected = self
                .items
                .apply_return(&mut tx, line.item_uuid, current.uuid, line.quantity)
                .await?;

            if rows_affected == 0 {
                return Err(OrdersServiceError::ReturnQuantityExceeded {
                    item_name: item.name_snapshot.clone(),
                    requested: line.quantity,
                    max_returnable: limit,
                });
            }

            self.catalog
                .increment_stock(&mut tx, item.variant_uuid, line.quantity)
                .await?;

            accepted_items.push(HistoryLineItem {
                name: item.name_snapshot.clone(),
                quantity: line.quantity,
                variant: item.variant_label(),
            });
        }

        self.items.clear_return_requests(&mut tx, current.uuid).await?;

        let fully_returned = items.iter().all(|item| {
            item.quantity_returned + accepted_quantity_for(&accepted, item.uuid)
                == item.quantity
        });

        let final_status = if fully_returned {
            OrderStatus::Returned
        } else {
            OrderStatus::Paid
        };

        let mut updated = self
            .orders
            .settle_return(&mut tx, current.uuid, final_status)
            .await?
            .ok_or(OrdersServiceError::InvalidTransition {
                status: current.status,
                action: "process a return for",
            })?;

        if !accepted_items.is_empty() {
            let mut details = HistoryDetails::with_items(accepted_items);

            if rejected_items.is_empty() {
                if let Some(note) = &resolution.note {
                    details = details.with_note(note.clone());
                }
            }

            self.history
                .append(
                    &mut tx,
                    NewHistoryEntry {
                        order_uuid: updated.uuid,
                        status: final_status,
                        actor: actor.kind(),
                        actor_name: actor.audit_name(),
                        reason: Some("return processed".to_string()),
                        details,
                    },
                )
                .await?;
        }

        if !rejected_items.is_empty() {
            let reason = resolution
                .note
                .clone()
                .unwrap_or_else(|| "return rejected".to_string());

            self.history
                .append(
                    &mut tx,
                    NewHistoryEntry {
                        order_uuid: updated.uuid,
                        status: final_status,
                        actor: actor.kind(),
                        actor_name: actor.audit_name(),
                        reason: Some(reason),
                        details: HistoryDetails::with_items(rejected_items),
                    },
                )
                .await?;
        }

        updated.items = self.items.get_order_items(&mut tx, updated.uuid).await?;

        tx.commit().await?;

        info!(order_uuid = %updated.uuid, status = %updated.status, "return processed");

        self.dispatch(OrderEvent::ReturnProcessed {
            order: updated.uuid,
        })
        .await;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "orders.service.reject_return",
        skip(self, actor, reason),
        fields(order_uuid = %order),
        err
    )]
    async fn reject_return(
        &self,
        actor: Actor,
        order: OrderUuid,
        reason: String,
    ) -> Result<Order, OrdersServiceError> {
        if !actor.is_admin() {
            return Err(OrdersServiceError::Forbidden);
        }

        let mut tx = self.db.begin().await?;

        let current = self.orders.get_order(&mut tx, order).await?;

        if current.status != OrderStatus::ReturnRequested {
            return Err(OrdersServiceError::InvalidTransition {
                status: current.status,
                action: "reject a return for",
            });
        }

        let items = self.items.get_order_items(&mut tx, current.uuid).await?;

        let rejected_items: Vec<HistoryLineItem> = items
            .iter()
            .filter(|item| item.has_pending_return())
            .map(|item| HistoryLineItem {
                name: item.name_snapshot.clone(),
                quantity: item.quantity_return_requested,
                variant: item.variant_label(),
            })
            .collect();

        self.items.clear_return_requests(&mut tx, current.uuid).await?;

        let mut updated = self
            .orders
            .mark_return_rejected(&mut tx, current.uuid, &reason)
            .await?
            .ok_or(OrdersServiceError::InvalidTransition {
                status: current.status,
                action: "reject a return for",
            })?;

        self.history
            .append(
                &mut tx,
                NewHistoryEntry {
                    order_uuid: updated.uuid,
                    status: OrderStatus::Paid,
                    actor: actor.kind(),
                    actor_name: actor.audit_name(),
                    reason: Some(reason),
                    details: HistoryDetails::with_items(rejected_items),
                },
            )
            .await?;

        updated.items = self.items.get_order_items(&mut tx, updated.uuid).await?;

        tx.commit().await?;

        info!(order_uuid = %updated.uuid, "return rejected");

        self.dispatch(OrderEvent::ReturnRejected {
            order: updated.uuid,
        })
        .await;

        Ok(updated)
    }

    async fn get_order(
        &self,
        actor: Actor,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut order = self.orders.get_order(&mut tx, order).await?;

        // Reads never reveal other users' orders; absence and denial look
        // the same from the outside.
        if let Actor::User(user) = &actor {
            if order.user_uuid != Some(*user) {
                return Err(OrdersServiceError::NotFound);
            }
        }

        order.items = self.items.get_order_items(&mut tx, order.uuid).await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn order_history(
        &self,
        actor: Actor,
        order: OrderUuid,
    ) -> Result<Vec<HistoryEntry>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self.orders.get_order(&mut tx, order).await?;

        if let Actor::User(user) = &actor {
            if order.user_uuid != Some(*user) {
                return Err(OrdersServiceError::NotFound);
            }
        }

        let entries = self.history.list(&mut tx, order.uuid).await?;

        tx.commit().await?;

        Ok(entries)
    }
}

fn find_item(
    items: &[OrderItem],
    item: OrderItemUuid,
) -> Result<&OrderItem, OrdersServiceError> {
    items
        .iter()
        .find(|candidate| candidate.uuid == item)
        .ok_or(OrdersServiceError::NotFound)
}

/// How much an admin may accept on a line: the pending request when there is
/// one, otherwise whatever has not been returned yet (direct admin returns).
fn acceptable_quantity(item: &OrderItem) -> u32 {
    if item.has_pending_return() {
        item.quantity_return_requested
    } else {
        item.quantity - item.quantity_returned
    }
}

fn accepted_quantity_for(accepted: &[ReturnLine], item: OrderItemUuid) -> u32 {
    accepted
        .iter()
        .filter(|line| line.item_uuid == item)
        .map(|line| line.quantity)
        .sum()
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Place a new order: validates and decrements stock per line, snapshots
    /// catalog data onto the items and writes the opening history entry, all
    /// in one transaction.
    async fn place_order(&self, new: NewOrder) -> Result<Order, OrdersServiceError>;

    /// Ask the payment provider for a client-confirmable capture handle for
    /// a pending-payment order.
    async fn begin_capture(
        &self,
        actor: Actor,
        order: OrderUuid,
    ) -> Result<PaymentHandle, OrdersServiceError>;

    /// Record a successful capture: `PendingPayment → Paid`.
    async fn confirm_payment(&self, order: OrderUuid) -> Result<Order, OrdersServiceError>;

    /// Expire an order whose payment never arrived:
    /// `PendingPayment → Expired`.
    async fn expire_order(&self, order: OrderUuid) -> Result<Order, OrdersServiceError>;

    /// Cancel an order before payment capture. Stock is not restored; the
    /// restock decision stays with the back office.
    async fn cancel_order(
        &self,
        actor: Actor,
        order: OrderUuid,
        reason: Option<String>,
    ) -> Result<Order, OrdersServiceError>;

    /// Customer asks to send items back. May be called again on an order
    /// already in `ReturnRequested` to add lines to the open request.
    async fn request_return(
        &self,
        actor: Actor,
        order: OrderUuid,
        request: ReturnRequest,
    ) -> Result<Order, OrdersServiceError>;

    /// Admin decision on a return. Accepted quantities move into
    /// `quantity_returned` and restock the variant; pending quantities not
    /// accepted are implicitly rejected.
    async fn process_return(
        &self,
        actor: Actor,
        order: OrderUuid,
        resolution: ReturnResolution,
    ) -> Result<Order, OrdersServiceError>;

    /// Reject the entire open return request.
    async fn reject_return(
        &self,
        actor: Actor,
        order: OrderUuid,
        reason: String,
    ) -> Result<Order, OrdersServiceError>;

    /// Retrieve one order with its items. Users only see their own orders;
    /// anything else reads as not found.
    async fn get_order(&self, actor: Actor, order: OrderUuid)
    -> Result<Order, OrdersServiceError>;

    /// The order's append-only audit trail, oldest first.
    async fn order_history(
        &self,
        actor: Actor,
        order: OrderUuid,
    ) -> Result<Vec<HistoryEntry>, OrdersServiceError>;
}
