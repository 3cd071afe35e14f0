//! Order lifecycle, returns workflow and inventory ledger.
//!
//! The storefront's one genuinely stateful subsystem: placing an order,
//! capturing or expiring its payment, cancelling it, and walking the
//! post-purchase return workflow, with stock counters and an append-only
//! audit history kept consistent inside single database transactions.

pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;

mod uuids;
