//! Sequential application of an ordered discount list
//!
//! Each discount is evaluated against the state left by the previous one, so
//! "10% off, then $5 off" deducts the $5 from the already reduced price. After
//! every step the running amount and quantity are clamped at zero, and the
//! cascade stops as soon as either of them reaches zero.
//!
//! A discount measured in [`DiscountUnit::Quantity`] is converted to money
//! through the running unit price `amount / quantity`, taken before the step
//! deducts anything. Quantity shrinks by the same fraction as the amount.

use bigdecimal::{BigDecimal, Zero};
use tracing::{debug, trace};

use crate::discount::{Discount, DiscountKind, DiscountUnit};
use crate::types::*;

/// Apply `discounts` in order to a starting `(quantity, amount)` pair.
///
/// Returns one snapshot per discount actually processed. The list is shorter
/// than `discounts` when an intermediate step exhausts the amount or quantity.
pub fn apply_discounts(
    quantity: &BigDecimal,
    amount: &BigDecimal,
    discounts: &[Discount],
) -> BillingResult<Vec<Snapshot>> {
    DiscountCascade::run(quantity, amount, discounts).map(DiscountCascade::into_snapshots)
}

/// Outcome of one cascade run, keeping the starting state next to the snapshots
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountCascade<'a> {
    base_quantity: BigDecimal,
    base_amount: BigDecimal,
    discounts: &'a [Discount],
    snapshots: Vec<Snapshot>,
}

impl<'a> DiscountCascade<'a> {
    /// Run the cascade once
    pub fn run(
        quantity: &BigDecimal,
        amount: &BigDecimal,
        discounts: &'a [Discount],
    ) -> BillingResult<Self> {
        let mut running_quantity = quantity.clone();
        let mut running_amount = amount.clone();
        let mut snapshots = Vec::with_capacity(discounts.len());

        for (index, discount) in discounts.iter().enumerate() {
            let (next_quantity, next_amount) =
                step(index + 1, discount, &running_quantity, &running_amount)?;
            running_quantity = clamp(next_quantity);
            running_amount = clamp(next_amount);

            trace!(
                step = index + 1,
                kind = %discount.kind(),
                unit = %discount.unit(),
                amount = %running_amount,
                quantity = %running_quantity,
                "applied discount"
            );
            snapshots.push(Snapshot::new(
                running_amount.clone(),
                running_quantity.clone(),
            ));

            if running_amount.is_zero() || running_quantity.is_zero() {
                if index + 1 < discounts.len() {
                    debug!(
                        step = index + 1,
                        skipped = discounts.len() - index - 1,
                        "discount cascade exhausted, remaining discounts skipped"
                    );
                }
                break;
            }
        }

        debug!(
            quantity = %quantity,
            amount = %amount,
            discounts = discounts.len(),
            snapshots = snapshots.len(),
            "discount cascade evaluated"
        );

        Ok(Self {
            base_quantity: quantity.clone(),
            base_amount: amount.clone(),
            discounts,
            snapshots,
        })
    }

    pub fn base_quantity(&self) -> &BigDecimal {
        &self.base_quantity
    }

    pub fn base_amount(&self) -> &BigDecimal {
        &self.base_amount
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn into_snapshots(self) -> Vec<Snapshot> {
        self.snapshots
    }

    /// The last snapshot, `None` when no discount was applied
    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Each processed discount paired with the state it left behind
    pub fn steps(&self) -> impl Iterator<Item = (&'a Discount, &Snapshot)> + '_ {
        self.discounts.iter().zip(self.snapshots.iter())
    }

    /// Amount after all processed discounts
    pub fn final_amount(&self) -> &BigDecimal {
        self.last().map_or(&self.base_amount, |s| &s.amount)
    }

    /// Quantity after all processed discounts
    pub fn final_quantity(&self) -> &BigDecimal {
        self.last().map_or(&self.base_quantity, |s| &s.quantity)
    }

    /// Money taken off by the whole cascade
    pub fn discount_total(&self) -> BigDecimal {
        &self.base_amount - self.final_amount()
    }

    /// Units taken off by the whole cascade
    pub fn quantity_discount_total(&self) -> BigDecimal {
        &self.base_quantity - self.final_quantity()
    }

    /// Whether the cascade stopped before evaluating every discount
    pub fn is_exhausted(&self) -> bool {
        self.snapshots.len() < self.discounts.len()
    }
}

/// Compute the unclamped `(quantity, amount)` after one discount
fn step(
    index: usize,
    discount: &Discount,
    quantity: &BigDecimal,
    amount: &BigDecimal,
) -> BillingResult<(BigDecimal, BigDecimal)> {
    match discount.unit() {
        DiscountUnit::Money => Ok((quantity.clone(), amount - &discount.calculate(amount))),
        DiscountUnit::Quantity => {
            if quantity.is_zero() || amount.is_zero() {
                debug!(
                    step = index,
                    quantity = %quantity,
                    amount = %amount,
                    "quantity discount has no unit price to work with"
                );
                return Err(BillingError::DegenerateDivision {
                    step: index,
                    quantity: quantity.clone(),
                    amount: amount.clone(),
                });
            }

            // Money and units move together at the running unit price `amount / quantity`.
            let (money, units) = match discount.kind() {
                // A fixed quantity discount counts units, so its money follows from the price.
                DiscountKind::Value => {
                    let units = discount.calculate(quantity);
                    let money = &(&units * amount) / quantity;
                    (money, units)
                }
                DiscountKind::Percentage | DiscountKind::Free => {
                    let money = discount.calculate(amount);
                    let units = &(&money * quantity) / amount;
                    (money, units)
                }
            };

            Ok((quantity - &units, amount - &money))
        }
    }
}

fn clamp(value: BigDecimal) -> BigDecimal {
    if value < BigDecimal::zero() {
        BigDecimal::zero()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn snapshot(amount: i64, quantity: i64) -> Snapshot {
        Snapshot::new(BigDecimal::from(amount), BigDecimal::from(quantity))
    }

    fn value(amount: i64, unit: DiscountUnit) -> Discount {
        Discount::value(BigDecimal::from(amount), unit).unwrap()
    }

    fn percentage(amount: i64, unit: DiscountUnit) -> Discount {
        Discount::percentage(BigDecimal::from(amount), unit).unwrap()
    }

    fn run(quantity: i64, amount: i64, discounts: &[Discount]) -> Vec<Snapshot> {
        apply_discounts(&BigDecimal::from(quantity), &BigDecimal::from(amount), discounts).unwrap()
    }

    #[test]
    fn test_empty_discount_list() {
        assert!(run(10, 100, &[]).is_empty());

        let cascade = DiscountCascade::run(&BigDecimal::from(10), &BigDecimal::from(100), &[])
            .unwrap();
        assert!(cascade.last().is_none());
        assert_eq!(cascade.discount_total(), BigDecimal::from(0));
        assert_eq!(cascade.quantity_discount_total(), BigDecimal::from(0));
    }

    #[test]
    fn test_several_money_discounts_apply_in_order() {
        let discounts = [
            value(10, DiscountUnit::Money),
            percentage(10, DiscountUnit::Money),
        ];

        assert_eq!(
            run(10, 100, &discounts),
            vec![snapshot(90, 10), snapshot(81, 10)]
        );
    }

    #[test]
    fn test_free_discount_stops_the_cascade() {
        let discounts = [
            Discount::free(DiscountUnit::Money),
            percentage(10, DiscountUnit::Money),
        ];

        let cascade =
            DiscountCascade::run(&BigDecimal::from(10), &BigDecimal::from(100), &discounts)
                .unwrap();
        assert_eq!(cascade.snapshots(), &[snapshot(0, 10)]);
        assert!(cascade.is_exhausted());
    }

    #[test]
    fn test_free_quantity_discount_clears_both_dimensions() {
        assert_eq!(
            run(10, 100, &[Discount::free(DiscountUnit::Money)]),
            vec![snapshot(0, 10)]
        );
        assert_eq!(
            run(10, 100, &[Discount::free(DiscountUnit::Quantity)]),
            vec![snapshot(0, 0)]
        );
    }

    #[test]
    fn test_quantity_and_money_discounts_combine() {
        let discounts = [
            percentage(10, DiscountUnit::Money),
            percentage(10, DiscountUnit::Quantity),
        ];

        assert_eq!(
            run(10, 100, &discounts),
            vec![snapshot(90, 10), snapshot(81, 9)]
        );
    }

    #[test]
    fn test_quantity_value_discount_uses_unit_price() {
        assert_eq!(
            run(10, 100, &[value(2, DiscountUnit::Quantity)]),
            vec![snapshot(80, 8)]
        );
    }

    #[test]
    fn test_quantity_value_discount_is_capped_at_remaining_units() {
        assert_eq!(
            run(3, 30, &[value(5, DiscountUnit::Quantity)]),
            vec![snapshot(0, 0)]
        );
    }

    #[test]
    fn test_over_discount_is_clamped() {
        let discounts = [
            percentage(150, DiscountUnit::Money),
            value(5, DiscountUnit::Money),
        ];

        assert_eq!(run(4, 40, &discounts), vec![snapshot(0, 4)]);
    }

    #[test]
    fn test_percentage_cascade_is_order_sensitive() {
        let money_then_value = [
            percentage(10, DiscountUnit::Money),
            value(10, DiscountUnit::Money),
        ];
        let value_then_money = [
            value(10, DiscountUnit::Money),
            percentage(10, DiscountUnit::Money),
        ];

        assert_eq!(run(1, 100, &money_then_value).last(), Some(&snapshot(80, 1)));
        assert_eq!(run(1, 100, &value_then_money).last(), Some(&snapshot(81, 1)));
    }

    #[test]
    fn test_quantity_discount_on_zero_quantity_is_rejected() {
        let discounts = [
            value(5, DiscountUnit::Money),
            percentage(10, DiscountUnit::Quantity),
        ];

        let result = apply_discounts(&BigDecimal::from(0), &BigDecimal::from(100), &discounts);
        // The money step already leaves quantity at zero, so the cascade stops first.
        assert_eq!(result.unwrap(), vec![snapshot(95, 0)]);

        let result = apply_discounts(
            &BigDecimal::from(0),
            &BigDecimal::from(100),
            &[percentage(10, DiscountUnit::Quantity)],
        );
        assert!(matches!(
            result,
            Err(BillingError::DegenerateDivision { step: 1, .. })
        ));
    }

    #[test]
    fn test_cascade_totals_and_steps() {
        let discounts = [
            percentage(10, DiscountUnit::Money),
            percentage(10, DiscountUnit::Quantity),
        ];
        let cascade =
            DiscountCascade::run(&BigDecimal::from(10), &BigDecimal::from(100), &discounts)
                .unwrap();

        assert_eq!(cascade.discount_total(), BigDecimal::from(19));
        assert_eq!(cascade.quantity_discount_total(), BigDecimal::from(1));
        assert_eq!(cascade.final_amount(), &BigDecimal::from(81));
        assert!(!cascade.is_exhausted());

        let steps: Vec<_> = cascade.steps().collect();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1].0.unit(), DiscountUnit::Quantity);
        assert_eq!(steps[1].1, &snapshot(81, 9));
    }

    #[test]
    fn test_fractional_amounts() {
        let discounts = [percentage(15, DiscountUnit::Money)];
        let snapshots =
            apply_discounts(&dec("2.5"), &dec("19.99"), &discounts).unwrap();

        assert_eq!(snapshots, vec![Snapshot::new(dec("16.9915"), dec("2.5"))]);
    }

    fn discount_strategy() -> impl Strategy<Value = Discount> {
        let unit = prop_oneof![Just(DiscountUnit::Money), Just(DiscountUnit::Quantity)];
        let kind = prop_oneof![
            Just(DiscountKind::Value),
            Just(DiscountKind::Percentage),
            Just(DiscountKind::Free)
        ];
        (kind, unit, 0u32..250).prop_map(|(kind, unit, amount)| {
            Discount::new(kind, unit, BigDecimal::from(amount)).unwrap()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 500,
            ..ProptestConfig::default()
        })]

        #[test]
        fn snapshots_never_go_negative(
            quantity in 1u32..1000,
            amount in 1u32..100_000,
            discounts in prop::collection::vec(discount_strategy(), 0..8)
        ) {
            let snapshots = apply_discounts(
                &BigDecimal::from(quantity),
                &BigDecimal::from(amount),
                &discounts,
            ).unwrap();

            prop_assert!(snapshots.len() <= discounts.len());
            for snapshot in &snapshots {
                prop_assert!(snapshot.amount >= BigDecimal::zero());
                prop_assert!(snapshot.quantity >= BigDecimal::zero());
            }
        }

        #[test]
        fn cascade_stops_once_exhausted(
            quantity in 1u32..1000,
            amount in 1u32..100_000,
            discounts in prop::collection::vec(discount_strategy(), 0..8)
        ) {
            let snapshots = apply_discounts(
                &BigDecimal::from(quantity),
                &BigDecimal::from(amount),
                &discounts,
            ).unwrap();

            if let Some(position) = snapshots
                .iter()
                .position(|s| s.amount.is_zero() || s.quantity.is_zero())
            {
                prop_assert_eq!(position, snapshots.len() - 1);
            } else {
                prop_assert_eq!(snapshots.len(), discounts.len());
            }
        }

        #[test]
        fn cascade_is_deterministic(
            quantity in 1u32..1000,
            amount in 1u32..100_000,
            discounts in prop::collection::vec(discount_strategy(), 0..8)
        ) {
            let first = apply_discounts(&BigDecimal::from(quantity), &BigDecimal::from(amount), &discounts).unwrap();
            let second = apply_discounts(&BigDecimal::from(quantity), &BigDecimal::from(amount), &discounts).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn calculate_never_exceeds_value(
            value in 0u32..100_000,
            amount in 0u32..=100,
            kind in prop_oneof![Just(DiscountKind::Value), Just(DiscountKind::Percentage)]
        ) {
            let discount = Discount::new(kind, DiscountUnit::Money, BigDecimal::from(amount)).unwrap();
            let value = BigDecimal::from(value);
            prop_assert!(discount.calculate(&value) <= value);
            prop_assert_eq!(Discount::free(DiscountUnit::Money).calculate(&value), value);
        }
    }
}
