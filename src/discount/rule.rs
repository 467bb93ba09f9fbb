//! A single discount rule and its calculation

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::CurrencyContext;
use crate::types::*;
use crate::utils::{number_to_currency, validate_discount_amount};

/// Formula used by a discount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// Fixed deduction, capped at the value it is applied to
    Value,
    /// Percentage points of the value it is applied to
    #[default]
    Percentage,
    /// Waives everything that remains
    Free,
}

/// Dimension a discount is measured against and reduces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountUnit {
    /// Item count; the matching money is derived from the running unit price
    Quantity,
    /// Monetary amount
    #[default]
    Money,
}

impl FromStr for DiscountKind {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "value" => Ok(DiscountKind::Value),
            "percentage" => Ok(DiscountKind::Percentage),
            "free" => Ok(DiscountKind::Free),
            other => Err(BillingError::InvalidDiscount(format!(
                "Unknown discount kind '{}', expected value, percentage or free",
                other
            ))),
        }
    }
}

impl FromStr for DiscountUnit {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quantity" => Ok(DiscountUnit::Quantity),
            "money" => Ok(DiscountUnit::Money),
            other => Err(BillingError::InvalidDiscount(format!(
                "Unknown discount unit '{}', expected quantity or money",
                other
            ))),
        }
    }
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiscountKind::Value => "value",
            DiscountKind::Percentage => "percentage",
            DiscountKind::Free => "free",
        })
    }
}

impl fmt::Display for DiscountUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiscountUnit::Quantity => "quantity",
            DiscountUnit::Money => "money",
        })
    }
}

/// Loose wire form of a discount; missing fields fall back to
/// `percentage`, `money` and zero
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DiscountDefinition {
    pub kind: DiscountKind,
    pub unit: DiscountUnit,
    pub amount: Option<BigDecimal>,
}

/// One discount rule. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DiscountDefinition")]
pub struct Discount {
    kind: DiscountKind,
    unit: DiscountUnit,
    amount: BigDecimal,
}

impl TryFrom<DiscountDefinition> for Discount {
    type Error = BillingError;

    fn try_from(definition: DiscountDefinition) -> Result<Self, Self::Error> {
        Discount::new(
            definition.kind,
            definition.unit,
            definition.amount.unwrap_or_else(BigDecimal::zero),
        )
    }
}

impl Discount {
    /// Create a discount, rejecting negative magnitudes
    pub fn new(kind: DiscountKind, unit: DiscountUnit, amount: BigDecimal) -> BillingResult<Self> {
        validate_discount_amount(&amount)?;
        Ok(Self { kind, unit, amount })
    }

    /// Fixed deduction: currency for [`DiscountUnit::Money`], units for [`DiscountUnit::Quantity`]
    pub fn value(amount: BigDecimal, unit: DiscountUnit) -> BillingResult<Self> {
        Self::new(DiscountKind::Value, unit, amount)
    }

    /// Percentage deduction; values above 100 are allowed and clamped by the cascade
    pub fn percentage(amount: BigDecimal, unit: DiscountUnit) -> BillingResult<Self> {
        Self::new(DiscountKind::Percentage, unit, amount)
    }

    /// Full waiver of whatever remains
    pub fn free(unit: DiscountUnit) -> Self {
        Self {
            kind: DiscountKind::Free,
            unit,
            amount: BigDecimal::zero(),
        }
    }

    /// Build a discount from its textual kind and unit, e.g. `("value", "money", 10)`
    pub fn parse(kind: &str, unit: &str, amount: BigDecimal) -> BillingResult<Self> {
        Self::new(kind.parse()?, unit.parse()?, amount)
    }

    pub fn kind(&self) -> DiscountKind {
        self.kind
    }

    pub fn unit(&self) -> DiscountUnit {
        self.unit
    }

    pub fn amount(&self) -> &BigDecimal {
        &self.amount
    }

    /// Deduction this rule takes from `value`
    pub fn calculate(&self, value: &BigDecimal) -> BigDecimal {
        match self.kind {
            DiscountKind::Value => std::cmp::min(&self.amount, value).clone(),
            DiscountKind::Percentage => (value * &self.amount) / BigDecimal::from(100),
            DiscountKind::Free => value.clone(),
        }
    }

    /// Human readable form of the rule, e.g. `$10.00`, `15%` or `free`
    pub fn describe(&self, currency: &CurrencyContext) -> String {
        match self.kind {
            DiscountKind::Value => number_to_currency(&self.amount, currency),
            DiscountKind::Percentage => format!("{}%", self.amount),
            DiscountKind::Free => "free".to_string(),
        }
    }
}
