//! Presentation defaults shared by discount descriptions and invoice statements
//!
//! The crate never reads configuration from disk. Hosts build a
//! [`BillingConfig`] in code or deserialize one from whatever format they
//! already use; every field has a default so partial documents are accepted.

use serde::{Deserialize, Serialize};

/// How monetary amounts are rendered as text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyContext {
    /// Currency symbol placed before the number
    pub unit: String,
    /// Decimal separator
    pub separator: String,
    /// Thousands delimiter
    pub delimiter: String,
    /// Number of fractional digits
    pub precision: u32,
}

impl Default for CurrencyContext {
    fn default() -> Self {
        Self {
            unit: "$".to_string(),
            separator: ".".to_string(),
            delimiter: ",".to_string(),
            precision: 2,
        }
    }
}

impl CurrencyContext {
    /// Create a currency context with the given symbol and default separators
    pub fn with_unit(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            ..Self::default()
        }
    }
}

/// Invoice-wide presentation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    pub currency: CurrencyContext,
    /// `chrono` format string used for due and paid dates
    pub date_format: String,
    pub company_name: String,
    pub company_details: String,
    pub page_size: String,
    pub subtotal_label: String,
    pub tax_label: String,
    pub shipping_label: String,
    pub total_label: String,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            currency: CurrencyContext::default(),
            date_format: "%B %e, %Y".to_string(),
            company_name: "Payday Corp.".to_string(),
            company_details: String::new(),
            page_size: "LETTER".to_string(),
            subtotal_label: "Subtotal:".to_string(),
            tax_label: "Tax:".to_string(),
            shipping_label: "Shipping:".to_string(),
            total_label: "Total:".to_string(),
        }
    }
}
