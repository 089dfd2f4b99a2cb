//! Property-based tests for freight pricing.

use freightops_api::services::pricing::{final_price, money, resolve_discount};
use proptest::prelude::*;
use rust_decimal::Decimal;

// Base prices between 0.01 and 1,000,000.00
fn base_price_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

// Discounts in [0, 100] with up to two decimal places
fn discount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn final_price_never_exceeds_base(base in base_price_strategy(), discount in discount_strategy()) {
        let price = final_price(base, discount);
        prop_assert!(price >= Decimal::ZERO);
        prop_assert!(price <= base, "{} > {}", price, base);
        prop_assert_eq!(price.scale(), 2);
    }

    #[test]
    fn final_price_applies_the_discount_formula(
        base in base_price_strategy(),
        discount in discount_strategy(),
    ) {
        let expected = money(base * (Decimal::ONE - discount / Decimal::ONE_HUNDRED));
        prop_assert_eq!(final_price(base, discount), expected);
    }

    #[test]
    fn zero_discount_keeps_base_price(base in base_price_strategy()) {
        prop_assert_eq!(final_price(base, Decimal::ZERO), base);
    }

    #[test]
    fn larger_discount_never_costs_more(
        base in base_price_strategy(),
        a in discount_strategy(),
        b in discount_strategy(),
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(final_price(base, high) <= final_price(base, low));
    }

    #[test]
    fn in_range_discounts_resolve_to_two_places(discount in discount_strategy()) {
        let resolved = resolve_discount(Some(discount)).unwrap();
        prop_assert_eq!(resolved, money(discount));
        prop_assert_eq!(resolved.scale(), 2);
    }

    #[test]
    fn out_of_range_discounts_are_rejected(excess in 1i64..1_000_000) {
        let above = Decimal::ONE_HUNDRED + Decimal::new(excess, 2);
        let below = -Decimal::new(excess, 2);
        prop_assert!(resolve_discount(Some(above)).is_err());
        prop_assert!(resolve_discount(Some(below)).is_err());
    }
}
