//! Validation utilities

use bigdecimal::{BigDecimal, Zero};

use crate::types::*;

/// Validate that a discount magnitude is not negative
pub fn validate_discount_amount(amount: &BigDecimal) -> BillingResult<()> {
    if *amount < BigDecimal::zero() {
        return Err(BillingError::InvalidDiscount(format!(
            "Discount amount cannot be negative: {}",
            amount
        )));
    }
    Ok(())
}

/// Validate that a named value is zero or positive
pub fn validate_non_negative(field: &str, value: &BigDecimal) -> BillingResult<()> {
    if *value < BigDecimal::zero() {
        Err(BillingError::Validation(format!(
            "{} cannot be negative: {}",
            field, value
        )))
    } else {
        Ok(())
    }
}

/// Validate a flat tax rate expressed as a fraction (0.2 for 20%)
pub fn validate_tax_rate(rate: &BigDecimal) -> BillingResult<()> {
    validate_non_negative("Tax rate", rate)?;

    if *rate > BigDecimal::from(1) {
        return Err(BillingError::Validation(format!(
            "Tax rate is a fraction and cannot exceed 1: {}",
            rate
        )));
    }

    Ok(())
}

/// Validate that a description is present and reasonably short
pub fn validate_description(description: &str) -> BillingResult<()> {
    if description.trim().is_empty() {
        return Err(BillingError::Validation(
            "Line item description cannot be empty".to_string(),
        ));
    }

    if description.len() > 500 {
        return Err(BillingError::Validation(
            "Line item description cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_discount_amount_rejects_negative() {
        assert!(validate_discount_amount(&BigDecimal::from(0)).is_ok());
        assert!(validate_discount_amount(&BigDecimal::from(150)).is_ok());
        assert!(matches!(
            validate_discount_amount(&BigDecimal::from(-1)),
            Err(BillingError::InvalidDiscount(_))
        ));
    }

    #[test]
    fn test_tax_rate_bounds() {
        assert!(validate_tax_rate(&BigDecimal::from_str("0.2").unwrap()).is_ok());
        assert!(validate_tax_rate(&BigDecimal::from(1)).is_ok());
        assert!(validate_tax_rate(&BigDecimal::from(20)).is_err());
        assert!(validate_tax_rate(&BigDecimal::from_str("-0.1").unwrap()).is_err());
    }

    #[test]
    fn test_description() {
        assert!(validate_description("Shirts").is_ok());
        assert!(validate_description("   ").is_err());
        assert!(validate_description(&"x".repeat(501)).is_err());
    }
}
