//! Payment provider interface.
//!
//! The core never talks to the processor directly; it asks the provider for
//! a client-confirmable capture handle and leaves settlement to the payment
//! plumbing. Refund amounts shown in the back office are derived from item
//! snapshots, not computed here.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

/// A capture the storefront can hand to the client for confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentHandle {
    /// Provider-side reference for reconciliation.
    pub reference: String,
    /// Secret the client uses to confirm the capture.
    pub client_secret: String,
}

#[derive(Debug, Error)]
pub enum PaymentProviderError {
    #[error("no payment provider configured")]
    NotConfigured,

    #[error("payment provider rejected the request: {0}")]
    Rejected(String),

    #[error("payment provider unreachable")]
    Unreachable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[automock]
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a capture for the given amount, returning a handle the client
    /// can confirm.
    async fn create_capture(
        &self,
        amount_cents: u64,
        currency: &str,
    ) -> Result<PaymentHandle, PaymentProviderError>;
}

/// Provider used where payments are not wired up (ops CLI, offline tools).
#[derive(Debug, Clone, Default)]
pub struct DisabledPaymentProvider;

#[async_trait]
impl PaymentProvider for DisabledPaymentProvider {
    async fn create_capture(
        &self,
        _amount_cents: u64,
        _currency: &str,
    ) -> Result<PaymentHandle, PaymentProviderError> {
        Err(PaymentProviderError::NotConfigured)
    }
}
