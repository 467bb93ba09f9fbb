//! Text formatting for amounts and quantities

use bigdecimal::{BigDecimal, RoundingMode};

use crate::config::CurrencyContext;

/// Format an amount as currency, e.g. `$1,234.50`
pub fn number_to_currency(amount: &BigDecimal, currency: &CurrencyContext) -> String {
    let rounded = amount.with_scale_round(i64::from(currency.precision), RoundingMode::HalfUp);
    let text = rounded.to_string();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.as_str()),
    };
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits, None),
    };

    let mut formatted = String::new();
    if negative {
        formatted.push('-');
    }
    formatted.push_str(&currency.unit);
    formatted.push_str(&group_thousands(integer, &currency.delimiter));
    if let Some(fraction) = fraction {
        formatted.push_str(&currency.separator);
        formatted.push_str(fraction);
    }
    formatted
}

/// Format a quantity with up to four fractional digits and no trailing zeros
pub fn format_quantity(quantity: &BigDecimal) -> String {
    let text = quantity.with_scale_round(4, RoundingMode::HalfUp).to_string();
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

fn group_thousands(integer: &str, delimiter: &str) -> String {
    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3 * delimiter.len());
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push_str(delimiter);
        }
        grouped.push(c);
    }
    grouped
}
