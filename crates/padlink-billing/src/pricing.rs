// SPDX-FileCopyrightText: 2026 Padlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Discount arithmetic.

/// Price after applying a percentage discount, floored at zero.
///
/// `discount` is a percentage; values above 100 yield zero and negative
/// values raise the price.
pub fn total(price: f64, discount: f64) -> f64 {
    (price * (1.0 - discount / 100.0)).max(0.0)
}

/// Render an amount with exactly two decimals ("75.00").
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn quarter_off_a_hundred() {
        assert_eq!(format_amount(total(100.0, 25.0)), "75.00");
    }

    #[test]
    fn no_discount_keeps_price() {
        assert_eq!(format_amount(total(9.99, 0.0)), "9.99");
    }

    #[test]
    fn full_or_excess_discount_is_free() {
        assert_eq!(total(50.0, 100.0), 0.0);
        assert_eq!(total(50.0, 150.0), 0.0);
    }

    #[test]
    fn format_rounds_to_cents() {
        assert_eq!(format_amount(7.4925), "7.49");
        assert_eq!(format_amount(0.0), "0.00");
    }

    proptest! {
        #[test]
        fn total_is_never_negative(price in 0.0f64..10_000.0, discount in -100.0f64..500.0) {
            prop_assert!(total(price, discount) >= 0.0);
        }

        #[test]
        fn total_is_non_increasing_in_discount(
            price in 0.0f64..10_000.0,
            a in 0.0f64..100.0,
            b in 0.0f64..100.0,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(total(price, hi) <= total(price, lo));
        }

        #[test]
        fn total_never_exceeds_price(price in 0.0f64..10_000.0, discount in 0.0f64..=100.0) {
            prop_assert!(total(price, discount) <= price);
        }
    }
}
