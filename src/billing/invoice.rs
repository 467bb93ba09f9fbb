//! Invoices: line items, invoice level discounts, flat tax and shipping

use bigdecimal::{BigDecimal, Zero};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::billing::LineItem;
use crate::discount::{Discount, DiscountCascade};
use crate::traits::Billable;
use crate::types::*;
use crate::utils::{validate_non_negative, validate_tax_rate};

/// An invoice and everything needed to total it.
///
/// Optional capabilities (tax, shipping, dates, notes) are plain `Option`
/// fields; an unset field contributes nothing to the totals.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Invoice {
    pub invoice_number: Option<String>,
    /// Who the invoice is being sent to
    pub bill_to: String,
    pub ship_to: Option<String>,
    pub line_items: Vec<LineItem>,
    /// Discounts applied to the whole invoice, after line discounts
    pub discounts: Vec<Discount>,
    /// Flat tax rate as a fraction, e.g. `0.1` for 10%
    pub tax_rate: Option<BigDecimal>,
    pub tax_description: Option<String>,
    /// Flat shipping charge
    pub shipping_rate: Option<BigDecimal>,
    pub shipping_description: Option<String>,
    pub due_at: Option<NaiveDate>,
    pub paid_at: Option<NaiveDate>,
    pub notes: Option<String>,
    /// Extra label/value pairs shown with the invoice number and dates
    pub details: Vec<(String, String)>,
}

/// All invoice totals computed in a single pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: BigDecimal,
    pub quantity: BigDecimal,
    pub discount: BigDecimal,
    pub quantity_discount: BigDecimal,
    pub tax: BigDecimal,
    pub shipping: BigDecimal,
    pub total: BigDecimal,
}

impl Invoice {
    /// Create an empty invoice for the given recipient
    pub fn new(bill_to: impl Into<String>) -> Self {
        Self {
            bill_to: bill_to.into(),
            ..Self::default()
        }
    }

    pub fn with_invoice_number(mut self, invoice_number: impl Into<String>) -> Self {
        self.invoice_number = Some(invoice_number.into());
        self
    }

    pub fn with_tax_rate(mut self, tax_rate: BigDecimal) -> Self {
        self.tax_rate = Some(tax_rate);
        self
    }

    pub fn with_shipping_rate(mut self, shipping_rate: BigDecimal) -> Self {
        self.shipping_rate = Some(shipping_rate);
        self
    }

    pub fn with_due_at(mut self, due_at: NaiveDate) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Add a line item
    pub fn add_line_item(&mut self, line_item: LineItem) {
        self.line_items.push(line_item);
    }

    /// Append an invoice level discount after the existing ones
    pub fn add_discount(&mut self, discount: Discount) {
        self.discounts.push(discount);
    }

    /// Add a custom label/value detail
    pub fn add_detail(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.details.push((label.into(), value.into()));
    }

    /// Sum of line amounts, each already net of its own discounts
    pub fn subtotal(&self) -> BillingResult<BigDecimal> {
        self.line_items
            .iter()
            .try_fold(BigDecimal::zero(), |sum, item| -> BillingResult<BigDecimal> {
                Ok(sum + item.amount()?)
            })
    }

    /// Sum of line quantities, each already net of its quantity discounts
    pub fn quantity(&self) -> BillingResult<BigDecimal> {
        self.line_items
            .iter()
            .try_fold(BigDecimal::zero(), |sum, item| -> BillingResult<BigDecimal> {
                Ok(sum + (&item.quantity - &item.quantity_discount()?))
            })
    }

    /// Money taken off by the invoice level discounts
    pub fn discount(&self) -> BillingResult<BigDecimal> {
        self.discount_total()
    }

    /// Units taken off by the invoice level discounts
    pub fn quantity_discount(&self) -> BillingResult<BigDecimal> {
        self.quantity_discount_total()
    }

    /// Tax on the discounted subtotal, never negative
    pub fn tax(&self) -> BillingResult<BigDecimal> {
        Ok(self.tax_on(&self.subtotal()?, &self.discount()?))
    }

    /// Flat shipping charge, zero when unset
    pub fn shipping(&self) -> BigDecimal {
        self.shipping_rate.clone().unwrap_or_else(BigDecimal::zero)
    }

    /// `subtotal + tax + shipping - discount`
    pub fn total(&self) -> BillingResult<BigDecimal> {
        Ok(self.totals()?.total)
    }

    /// Compute every total with a single evaluation of the invoice cascade
    pub fn totals(&self) -> BillingResult<InvoiceTotals> {
        Ok(self.totals_from(&self.cascade()?))
    }

    /// Derive every total from an already evaluated invoice cascade
    pub fn totals_from(&self, cascade: &DiscountCascade<'_>) -> InvoiceTotals {
        let subtotal = cascade.base_amount().clone();
        let discount = cascade.discount_total();
        let tax = self.tax_on(&subtotal, &discount);
        let shipping = self.shipping();
        let total = &(&(&subtotal + &tax) + &shipping) - &discount;

        InvoiceTotals {
            quantity: cascade.base_quantity().clone(),
            quantity_discount: cascade.quantity_discount_total(),
            subtotal,
            discount,
            tax,
            shipping,
            total,
        }
    }

    fn tax_on(&self, subtotal: &BigDecimal, discount: &BigDecimal) -> BigDecimal {
        match &self.tax_rate {
            Some(rate) => {
                let calculated = &(subtotal - discount) * rate;
                if calculated < BigDecimal::zero() {
                    BigDecimal::zero()
                } else {
                    calculated
                }
            }
            None => BigDecimal::zero(),
        }
    }

    pub fn is_paid(&self) -> bool {
        self.paid_at.is_some()
    }

    /// Past its due date on `today` and not paid
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_paid() && self.due_at.is_some_and(|due_at| due_at < today)
    }

    /// Payment state on `today`
    pub fn status(&self, today: NaiveDate) -> InvoiceStatus {
        if self.is_paid() {
            InvoiceStatus::Paid
        } else if self.is_overdue(today) {
            InvoiceStatus::Overdue
        } else {
            InvoiceStatus::Open
        }
    }

    /// Payment state as of the current UTC date
    pub fn current_status(&self) -> InvoiceStatus {
        self.status(chrono::Utc::now().date_naive())
    }

    /// Custom details in insertion order
    pub fn details(&self) -> impl Iterator<Item = (&str, &str)> {
        self.details
            .iter()
            .map(|(label, value)| (label.as_str(), value.as_str()))
    }

    /// Validate every line and the tax and shipping settings
    pub fn validate(&self) -> BillingResult<()> {
        for item in &self.line_items {
            item.validate()?;
        }

        if let Some(rate) = &self.tax_rate {
            validate_tax_rate(rate)?;
        }

        if let Some(shipping) = &self.shipping_rate {
            validate_non_negative("Shipping rate", shipping)?;
        }

        Ok(())
    }
}

impl Billable for Invoice {
    fn base_quantity(&self) -> BillingResult<BigDecimal> {
        self.quantity()
    }

    fn base_amount(&self) -> BillingResult<BigDecimal> {
        self.subtotal()
    }

    fn discounts(&self) -> &[Discount] {
        &self.discounts
    }
}
