//! Invoice totals walkthrough

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use payday_core::{BillingConfig, Discount, DiscountUnit, Invoice, LineItem, Statement};
use std::str::FromStr;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 Payday Core - Invoice Totals\n");

    let mut invoice = Invoice::new("Alan Johnson\n101 This Way\nSomewhere, SC 22222")
        .with_invoice_number("2024-0012")
        .with_tax_rate(BigDecimal::from_str("0.0825")?)
        .with_shipping_rate(BigDecimal::from(10))
        .with_due_at(NaiveDate::from_ymd_opt(2024, 7, 1).ok_or("invalid date")?);

    invoice.add_line_item(
        LineItem::new("Shirts", BigDecimal::from_str("19.99")?, BigDecimal::from(6))?
            .with_discount(Discount::value(BigDecimal::from(1), DiscountUnit::Quantity)?)
            .with_discount(Discount::percentage(BigDecimal::from(10), DiscountUnit::Money)?),
    );
    invoice.add_line_item(LineItem::new(
        "Embroidery setup",
        BigDecimal::from(45),
        BigDecimal::from(1),
    )?);
    invoice.add_discount(Discount::value(BigDecimal::from(5), DiscountUnit::Money)?);

    let config = BillingConfig::default();
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).ok_or("invalid date")?;
    let statement = Statement::build(&invoice, &config, today)?;

    println!("Invoice #{}", statement.invoice_number.as_deref().unwrap_or("-"));
    println!("Status: {:?}", statement.status);
    for (label, value) in &statement.details {
        println!("  {} {}", label, value);
    }
    println!();

    for line in &statement.lines {
        println!(
            "  {:<20} {:>10} x {:<6} {:>10}",
            line.description, line.unit_price, line.quantity, line.amount
        );
        for row in &line.discounts {
            println!(
                "    {:<18} {:>10} x {:<6} {:>10}",
                row.label, row.description, row.quantity, row.amount
            );
        }
    }
    println!();

    for row in &statement.totals {
        println!("  {:>30} {:>10}", row.label, row.value);
    }

    Ok(())
}
