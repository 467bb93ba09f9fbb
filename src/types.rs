//! Core types and data structures shared by the discount engine and the billing aggregates

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Running state of a discount cascade after one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Remaining monetary amount after the step
    pub amount: BigDecimal,
    /// Remaining unit quantity after the step
    pub quantity: BigDecimal,
}

impl Snapshot {
    /// Create a new snapshot
    pub fn new(amount: BigDecimal, quantity: BigDecimal) -> Self {
        Self { amount, quantity }
    }
}

/// Payment state of an invoice on a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Not paid and not yet due
    Open,
    /// `paid_at` is set
    Paid,
    /// Past its due date and still unpaid
    Overdue,
}

/// Errors that can occur while building or totalling billable documents
#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    #[error("Invalid discount: {0}")]
    InvalidDiscount(String),
    #[error(
        "Discount #{step} is measured in units but the running state has no unit price \
         (quantity = {quantity}, amount = {amount})"
    )]
    DegenerateDivision {
        step: usize,
        quantity: BigDecimal,
        amount: BigDecimal,
    },
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for billing operations
pub type BillingResult<T> = Result<T, BillingError>;
