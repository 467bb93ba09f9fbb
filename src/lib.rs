//! # Payday Core
//!
//! Invoice totals for a billing library: line items, cascading discounts,
//! flat tax and shipping.
//!
//! ## Features
//!
//! - **Discount rules**: fixed value, percentage and full waiver, measured in money or in units
//! - **Discount cascade**: ordered application with clamping and early termination,
//!   keeping a snapshot of the running state after every step
//! - **Line items and invoices**: subtotal, discount, quantity discount, tax, shipping and total
//! - **Statements**: render-neutral rows (one per line, one per applied discount, totals)
//!   for a PDF or HTML renderer
//!
//! ## Quick Start
//!
//! ```rust
//! use payday_core::{apply_discounts, Discount, DiscountUnit, Snapshot};
//! use bigdecimal::BigDecimal;
//!
//! let discounts = vec![
//!     Discount::value(BigDecimal::from(10), DiscountUnit::Money).unwrap(),
//!     Discount::percentage(BigDecimal::from(10), DiscountUnit::Money).unwrap(),
//! ];
//! let snapshots = apply_discounts(&BigDecimal::from(10), &BigDecimal::from(100), &discounts).unwrap();
//!
//! assert_eq!(snapshots.last(), Some(&Snapshot::new(BigDecimal::from(81), BigDecimal::from(10))));
//! ```

pub mod billing;
pub mod config;
pub mod discount;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use billing::*;
pub use config::*;
pub use discount::*;
pub use traits::*;
pub use types::*;
