//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{orders::models::OrderStatus, payments::PaymentProviderError};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error(
        "insufficient stock for {product_name}: requested {requested}, {available} available"
    )]
    StockInsufficient {
        product_name: String,
        requested: u32,
        available: u64,
    },

    #[error(
        "return quantity exceeded for {item_name}: requested {requested}, max returnable {max_returnable}"
    )]
    ReturnQuantityExceeded {
        item_name: String,
        requested: u32,
        max_returnable: u32,
    },

    #[error("cannot {action} an order that is {status}")]
    InvalidTransition {
        status: OrderStatus,
        action: &'static str,
    },

    #[error("actor does not own this order")]
    Forbidden,

    #[error("order not found")]
    NotFound,

    #[error("order already exists")]
    AlreadyExists,

    #[error("order has no lines")]
    EmptyOrder,

    #[error("return request has no lines")]
    EmptyReturnRequest,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("payment provider error")]
    Payment(#[from] PaymentProviderError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
