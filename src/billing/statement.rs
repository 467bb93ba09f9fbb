//! Render-neutral rows for an invoice document
//!
//! A [`Statement`] is what a PDF or HTML renderer draws: the line item table
//! with one extra row per applied discount, followed by the totals block.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::billing::{Invoice, InvoiceTotals, LineItem};
use crate::config::BillingConfig;
use crate::discount::DiscountCascade;
use crate::traits::Billable;
use crate::types::*;
use crate::utils::{format_quantity, number_to_currency};

/// One row of the line item table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLine {
    pub description: String,
    pub unit_price: String,
    pub quantity: String,
    /// Formatted `price * quantity` before line discounts
    pub amount: String,
    pub discounts: Vec<DiscountRow>,
}

/// Running state after one discount, as printed under its line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountRow {
    /// `Discount #n`, counted from 1
    pub label: String,
    /// The rule itself, e.g. `10%` or `$5.00`
    pub description: String,
    pub quantity: String,
    pub amount: String,
    pub raw_quantity: BigDecimal,
    pub raw_amount: BigDecimal,
}

/// One row of the totals block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalRow {
    pub label: String,
    pub value: String,
    pub raw_value: BigDecimal,
}

/// Everything a renderer needs to lay out an invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub invoice_number: Option<String>,
    pub bill_to: String,
    pub ship_to: Option<String>,
    pub status: InvoiceStatus,
    /// Due date, paid date and custom details, in display order
    pub details: Vec<(String, String)>,
    pub lines: Vec<StatementLine>,
    pub totals: Vec<TotalRow>,
    pub notes: Option<String>,
    /// Numeric totals behind the `totals` rows
    pub summary: InvoiceTotals,
}

impl Statement {
    /// Build the statement for `invoice` as of `today`
    pub fn build(invoice: &Invoice, config: &BillingConfig, today: NaiveDate) -> BillingResult<Self> {
        let lines = invoice
            .line_items
            .iter()
            .map(|item| statement_line(item, config))
            .collect::<BillingResult<Vec<_>>>()?;

        let cascade = invoice.cascade()?;
        let summary = invoice.totals_from(&cascade);

        Ok(Self {
            invoice_number: invoice.invoice_number.clone(),
            bill_to: invoice.bill_to.clone(),
            ship_to: invoice.ship_to.clone(),
            status: invoice.status(today),
            details: detail_rows(invoice, config),
            lines,
            totals: total_rows(invoice, &cascade, &summary, config),
            notes: invoice.notes.clone(),
            summary,
        })
    }
}

fn statement_line(item: &LineItem, config: &BillingConfig) -> BillingResult<StatementLine> {
    let currency = &config.currency;
    let cascade = item.cascade()?;

    Ok(StatementLine {
        description: item.description.clone(),
        unit_price: item
            .display_price
            .clone()
            .unwrap_or_else(|| number_to_currency(&item.price, currency)),
        quantity: item
            .display_quantity
            .clone()
            .unwrap_or_else(|| format_quantity(&item.quantity)),
        amount: number_to_currency(&item.amount_subtotal(), currency),
        discounts: discount_rows(&cascade, config),
    })
}

fn discount_rows(cascade: &DiscountCascade<'_>, config: &BillingConfig) -> Vec<DiscountRow> {
    cascade
        .steps()
        .enumerate()
        .map(|(i, (discount, snapshot))| DiscountRow {
            label: format!("Discount #{}", i + 1),
            description: discount.describe(&config.currency),
            quantity: format_quantity(&snapshot.quantity),
            amount: number_to_currency(&snapshot.amount, &config.currency),
            raw_quantity: snapshot.quantity.clone(),
            raw_amount: snapshot.amount.clone(),
        })
        .collect()
}

fn detail_rows(invoice: &Invoice, config: &BillingConfig) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    if let Some(due_at) = invoice.due_at {
        rows.push((
            "Due Date:".to_string(),
            due_at.format(&config.date_format).to_string(),
        ));
    }
    if let Some(paid_at) = invoice.paid_at {
        rows.push((
            "Paid Date:".to_string(),
            paid_at.format(&config.date_format).to_string(),
        ));
    }
    rows.extend(
        invoice
            .details()
            .map(|(label, value)| (label.to_string(), value.to_string())),
    );
    rows
}

fn total_rows(
    invoice: &Invoice,
    cascade: &DiscountCascade<'_>,
    summary: &InvoiceTotals,
    config: &BillingConfig,
) -> Vec<TotalRow> {
    let currency = &config.currency;
    let row = |label: String, value: &BigDecimal| TotalRow {
        label,
        value: number_to_currency(value, currency),
        raw_value: value.clone(),
    };

    let mut rows = vec![row(config.subtotal_label.clone(), &summary.subtotal)];
    for (i, snapshot) in cascade.snapshots().iter().enumerate() {
        rows.push(row(format!("Discount #{}", i + 1), &snapshot.amount));
    }
    if invoice.tax_rate.as_ref().is_some_and(|rate| rate > &BigDecimal::from(0)) {
        let label = invoice
            .tax_description
            .clone()
            .unwrap_or_else(|| config.tax_label.clone());
        rows.push(row(label, &summary.tax));
    }
    if summary.shipping > BigDecimal::from(0) {
        let label = invoice
            .shipping_description
            .clone()
            .unwrap_or_else(|| config.shipping_label.clone());
        rows.push(row(label, &summary.shipping));
    }
    rows.push(row(config.total_label.clone(), &summary.total));
    rows
}
