//! Order Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use thiserror::Error;

use crate::{
    domain::{
        actor::UserUuid,
        catalog::models::{ProductUuid, VariantUuid},
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Canonical order lifecycle state.
///
/// `PendingPayment → Paid → { ReturnRequested → Paid | Returned }`, with
/// `Cancelled` and `Expired` reachable from `PendingPayment`. The two-axis
/// payment/fulfillment view consumed by older admin screens is derived via
/// [`Order::payment_status`] and [`Order::fulfillment_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    PendingPayment,
    Paid,
    ReturnRequested,
    Returned,
    Cancelled,
    Expired,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PendingPayment => "pending_payment",
            Self::Paid => "paid",
            Self::ReturnRequested => "return_requested",
            Self::Returned => "returned",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown order status {0:?}")]
pub struct ParseOrderStatusError(String);

impl FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_payment" => Ok(Self::PendingPayment),
            "paid" => Ok(Self::Paid),
            "return_requested" => Ok(Self::ReturnRequested),
            "returned" => Ok(Self::Returned),
            "cancelled" => Ok(Self::Cancelled),
            "expired" => Ok(Self::Expired),
            other => Err(ParseOrderStatusError(other.to_string())),
        }
    }
}

/// Payment axis projection of [`OrderStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Captured,
    Refunded,
    Void,
}

/// Fulfillment axis projection of [`OrderStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FulfillmentStatus {
    Unfulfilled,
    Fulfilled,
    Returned,
}

/// Order Model
///
/// Financial amounts are integer minor units. `total_cents` is frozen at
/// creation; refunds are derived from item snapshots, never subtracted from
/// the stored total.
#[derive(Debug, Clone)]
pub struct Order {
    pub uuid: OrderUuid,
    pub user_uuid: Option<UserUuid>,
    pub status: OrderStatus,
    pub is_cancelled: bool,
    pub currency: String,
    pub items_total_cents: u64,
    pub shipping_cents: u64,
    pub tax_cents: u64,
    pub total_cents: u64,
    pub recipient_name: String,
    pub shipping_address: String,
    pub return_reason: Option<String>,
    pub rejection_reason: Option<String>,
    pub items: Vec<OrderItem>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    #[must_use]
    pub fn payment_status(&self) -> PaymentStatus {
        match self.status {
            OrderStatus::PendingPayment => PaymentStatus::Pending,
            OrderStatus::Paid | OrderStatus::ReturnRequested => PaymentStatus::Captured,
            OrderStatus::Returned => PaymentStatus::Refunded,
            OrderStatus::Cancelled | OrderStatus::Expired => PaymentStatus::Void,
        }
    }

    #[must_use]
    pub fn fulfillment_status(&self) -> FulfillmentStatus {
        match self.status {
            OrderStatus::PendingPayment | OrderStatus::Cancelled | OrderStatus::Expired => {
                FulfillmentStatus::Unfulfilled
            }
            OrderStatus::Paid | OrderStatus::ReturnRequested => FulfillmentStatus::Fulfilled,
            OrderStatus::Returned => FulfillmentStatus::Returned,
        }
    }

    /// Whether cancellation is still allowed (payment not captured yet).
    #[must_use]
    pub fn can_cancel(&self) -> bool {
        self.status == OrderStatus::PendingPayment
    }

    /// Sum of accepted-return refunds, derived from item snapshots.
    #[must_use]
    pub fn refunded_total_cents(&self) -> u64 {
        self.items.iter().map(OrderItem::refunded_cents).sum()
    }

    /// Order value net of accepted returns, for display.
    #[must_use]
    pub fn net_total_cents(&self) -> u64 {
        self.total_cents.saturating_sub(self.refunded_total_cents())
    }
}

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItem>;

/// Order Item Model
///
/// Name, variant and price fields are snapshots frozen at purchase time so
/// historical orders stay accurate when the catalog changes.
#[derive(Debug, Clone)]
pub struct OrderItem {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub variant_uuid: VariantUuid,
    pub name_snapshot: String,
    pub size_snapshot: Option<String>,
    pub color_snapshot: Option<String>,
    pub price_cents_snapshot: u64,
    pub quantity: u32,
    pub quantity_returned: u32,
    pub quantity_return_requested: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl OrderItem {
    /// Quantity still eligible for a new return request.
    #[must_use]
    pub fn max_returnable(&self) -> u32 {
        self.quantity - self.quantity_returned - self.quantity_return_requested
    }

    #[must_use]
    pub fn has_pending_return(&self) -> bool {
        self.quantity_return_requested > 0
    }

    #[must_use]
    pub fn is_fully_returned(&self) -> bool {
        self.quantity_returned == self.quantity
    }

    #[must_use]
    pub fn refunded_cents(&self) -> u64 {
        self.price_cents_snapshot * u64::from(self.quantity_returned)
    }

    /// Display label for the variant snapshot, e.g. `"M / Navy"`.
    #[must_use]
    pub fn variant_label(&self) -> Option<String> {
        match (self.size_snapshot.as_deref(), self.color_snapshot.as_deref()) {
            (None, None) => None,
            (Some(size), None) => Some(size.to_string()),
            (None, Some(color)) => Some(color.to_string()),
            (Some(size), Some(color)) => Some(format!("{size} / {color}")),
        }
    }
}

/// Write model for one order line, snapshots already resolved.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub uuid: OrderItemUuid,
    pub order_uuid: OrderUuid,
    pub product_uuid: ProductUuid,
    pub variant_uuid: VariantUuid,
    pub name_snapshot: String,
    pub size_snapshot: Option<String>,
    pub color_snapshot: Option<String>,
    pub price_cents_snapshot: u64,
    pub quantity: u32,
}

/// One checkout line: what the customer picked and how many.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderLine {
    pub product_uuid: ProductUuid,
    pub variant_uuid: VariantUuid,
    pub quantity: u32,
}

/// Contact/shipping snapshot captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingContact {
    pub recipient_name: String,
    pub shipping_address: String,
}

/// How payment is collected for a new order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentFlow {
    /// Capture happens after placement; the order starts `PendingPayment`
    /// and a capture handle is issued separately.
    Deferred,
    /// Payment was captured before the order reached the core; the order
    /// starts `Paid`.
    Upfront,
}

impl PaymentFlow {
    #[must_use]
    pub(crate) fn initial_status(self) -> OrderStatus {
        match self {
            Self::Deferred => OrderStatus::PendingPayment,
            Self::Upfront => OrderStatus::Paid,
        }
    }
}

/// New Order Model
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub uuid: OrderUuid,
    pub user_uuid: Option<UserUuid>,
    pub currency: String,
    pub shipping_cents: u64,
    pub contact: ShippingContact,
    pub payment: PaymentFlow,
    pub lines: Vec<NewOrderLine>,
}

/// One line of a return request or resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnLine {
    pub item_uuid: OrderItemUuid,
    pub quantity: u32,
}

/// A customer's return request: which lines, how many, and why.
#[derive(Debug, Clone)]
pub struct ReturnRequest {
    pub lines: Vec<ReturnLine>,
    pub reason: String,
}

/// An admin's return decision. Pending lines not covered by `accepted` (or
/// covered below their pending quantity) are implicitly rejected.
#[derive(Debug, Clone, Default)]
pub struct ReturnResolution {
    pub accepted: Vec<ReturnLine>,
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_with_status(status: OrderStatus) -> Order {
        Order {
            uuid: OrderUuid::new(),
            user_uuid: None,
            status,
            is_cancelled: false,
            currency: "EUR".to_string(),
            items_total_cents: 50_00,
            shipping_cents: 4_95,
            tax_cents: 10_00,
            total_cents: 54_95,
            recipient_name: "Kim Doe".to_string(),
            shipping_address: "1 Main St".to_string(),
            return_reason: None,
            rejection_reason: None,
            items: Vec::new(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn item(quantity: u32, returned: u32, requested: u32, price: u64) -> OrderItem {
        OrderItem {
            uuid: OrderItemUuid::new(),
            order_uuid: OrderUuid::new(),
            product_uuid: ProductUuid::new(),
            variant_uuid: VariantUuid::new(),
            name_snapshot: "Linen Shirt".to_string(),
            size_snapshot: None,
            color_snapshot: None,
            price_cents_snapshot: price,
            quantity,
            quantity_returned: returned,
            quantity_return_requested: requested,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in [
            OrderStatus::PendingPayment,
            OrderStatus::Paid,
            OrderStatus::ReturnRequested,
            OrderStatus::Returned,
            OrderStatus::Cancelled,
            OrderStatus::Expired,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn payment_status_projection() {
        let cases = [
            (OrderStatus::PendingPayment, PaymentStatus::Pending),
            (OrderStatus::Paid, PaymentStatus::Captured),
            (OrderStatus::ReturnRequested, PaymentStatus::Captured),
            (OrderStatus::Returned, PaymentStatus::Refunded),
            (OrderStatus::Cancelled, PaymentStatus::Void),
            (OrderStatus::Expired, PaymentStatus::Void),
        ];

        for (status, expected) in cases {
            assert_eq!(order_with_status(status).payment_status(), expected);
        }
    }

    #[test]
    fn fulfillment_status_projection() {
        let cases = [
            (OrderStatus::PendingPayment, FulfillmentStatus::Unfulfilled),
            (OrderStatus::Paid, FulfillmentStatus::Fulfilled),
            (OrderStatus::ReturnRequested, FulfillmentStatus::Fulfilled),
            (OrderStatus::Returned, FulfillmentStatus::Returned),
            (OrderStatus::Cancelled, FulfillmentStatus::Unfulfilled),
            (OrderStatus::Expired, FulfillmentStatus::Unfulfilled),
        ];

        for (status, expected) in cases {
            assert_eq!(order_with_status(status).fulfillment_status(), expected);
        }
    }

    #[test]
    fn max_returnable_accounts_for_resolved_and_pending() {
        assert_eq!(item(3, 0, 0, 10_00).max_returnable(), 3);
        assert_eq!(item(3, 1, 0, 10_00).max_returnable(), 2);
        assert_eq!(item(3, 1, 2, 10_00).max_returnable(), 0);
    }

    #[test]
    fn refunded_and_net_totals_derive_from_items() {
        let mut order = order_with_status(OrderStatus::Paid);
        order.items = vec![item(3, 2, 0, 10_00), item(1, 0, 0, 20_00)];

        assert_eq!(order.refunded_total_cents(), 20_00);
        assert_eq!(order.net_total_cents(), 34_95);
    }

    #[test]
    fn variant_label_joins_size_and_color() {
        let mut it = item(1, 0, 0, 10_00);
        assert_eq!(it.variant_label(), None);

        it.size_snapshot = Some("M".to_string());
        assert_eq!(it.variant_label().as_deref(), Some("M"));

        it.color_snapshot = Some("Navy".to_string());
        assert_eq!(it.variant_label().as_deref(), Some("M / Navy"));
    }
}
