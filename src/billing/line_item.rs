//! Invoice line items with their own discount lists

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::discount::Discount;
use crate::traits::Billable;
use crate::types::*;
use crate::utils::{validate_description, validate_non_negative};

/// A priced line on an invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    /// Price of a single unit
    pub price: BigDecimal,
    pub quantity: BigDecimal,
    /// Discounts that apply to this line only
    #[serde(default)]
    pub discounts: Vec<Discount>,
    /// Shown instead of the formatted price when set
    #[serde(default)]
    pub display_price: Option<String>,
    /// Shown instead of the formatted quantity when set
    #[serde(default)]
    pub display_quantity: Option<String>,
}

impl LineItem {
    /// Create a new line item
    pub fn new(
        description: impl Into<String>,
        price: BigDecimal,
        quantity: BigDecimal,
    ) -> BillingResult<Self> {
        let item = Self {
            description: description.into(),
            price,
            quantity,
            discounts: Vec::new(),
            display_price: None,
            display_quantity: None,
        };
        item.validate()?;
        Ok(item)
    }

    /// Append a discount after the existing ones
    pub fn with_discount(mut self, discount: Discount) -> Self {
        self.discounts.push(discount);
        self
    }

    pub fn with_display_price(mut self, display_price: impl Into<String>) -> Self {
        self.display_price = Some(display_price.into());
        self
    }

    pub fn with_display_quantity(mut self, display_quantity: impl Into<String>) -> Self {
        self.display_quantity = Some(display_quantity.into());
        self
    }

    /// `price * quantity`, before discounts
    pub fn amount_subtotal(&self) -> BigDecimal {
        &self.price * &self.quantity
    }

    /// Money taken off by this line's discounts
    pub fn discount(&self) -> BillingResult<BigDecimal> {
        self.discount_total()
    }

    /// Units taken off by this line's discounts
    pub fn quantity_discount(&self) -> BillingResult<BigDecimal> {
        self.quantity_discount_total()
    }

    /// Amount charged for this line after its discounts
    pub fn amount(&self) -> BillingResult<BigDecimal> {
        self.discounted_amount()
    }

    /// Check the line for negative values and a missing description
    pub fn validate(&self) -> BillingResult<()> {
        validate_description(&self.description)?;
        validate_non_negative("Price", &self.price)?;
        validate_non_negative("Quantity", &self.quantity)?;
        Ok(())
    }
}

impl Billable for LineItem {
    fn base_quantity(&self) -> BillingResult<BigDecimal> {
        Ok(self.quantity.clone())
    }

    fn base_amount(&self) -> BillingResult<BigDecimal> {
        Ok(self.amount_subtotal())
    }

    fn discounts(&self) -> &[Discount] {
        &self.discounts
    }
}
