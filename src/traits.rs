//! Traits shared by everything that carries a discount list

use bigdecimal::{BigDecimal, Zero};

use crate::discount::{Discount, DiscountCascade};
use crate::types::*;

/// A document or line that owns a base quantity, a base amount and an ordered
/// discount list.
///
/// Derived values re-run the cascade on every call. Callers that need several
/// of them in one pass should call [`Billable::cascade`] once and read from it.
pub trait Billable {
    /// Quantity before any discount
    fn base_quantity(&self) -> BillingResult<BigDecimal>;

    /// Amount before any discount
    fn base_amount(&self) -> BillingResult<BigDecimal>;

    /// Discounts in the order they apply
    fn discounts(&self) -> &[Discount];

    /// Run the discount cascade over the base quantity and amount
    fn cascade(&self) -> BillingResult<DiscountCascade<'_>> {
        DiscountCascade::run(&self.base_quantity()?, &self.base_amount()?, self.discounts())
    }

    /// Money taken off by the discounts; zero without discounts
    fn discount_total(&self) -> BillingResult<BigDecimal> {
        if self.discounts().is_empty() {
            return Ok(BigDecimal::zero());
        }
        Ok(self.cascade()?.discount_total())
    }

    /// Units taken off by the discounts; zero without discounts
    fn quantity_discount_total(&self) -> BillingResult<BigDecimal> {
        if self.discounts().is_empty() {
            return Ok(BigDecimal::zero());
        }
        Ok(self.cascade()?.quantity_discount_total())
    }

    /// Base amount less the discount total
    fn discounted_amount(&self) -> BillingResult<BigDecimal> {
        if self.discounts().is_empty() {
            return self.base_amount();
        }
        Ok(self.cascade()?.final_amount().clone())
    }
}
