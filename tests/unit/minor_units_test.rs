// Property-based tests for amount conversion
//
// Amounts travel to the gateway as integer cents and come back the same way.

use mpay24::core::amount::{format_price, from_minor_units, to_minor_units};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

proptest! {
    #[test]
    fn test_cents_survive_a_trip_through_decimal(cents in 0i64..100_000_000_000i64) {
        let amount = from_minor_units(cents);
        prop_assert_eq!(to_minor_units(amount).unwrap(), cents);
    }

    #[test]
    fn test_sub_cent_amounts_round_half_away_from_zero(
        cents in 0i64..1_000_000i64,
        mills in 0i64..10i64
    ) {
        // cents + mills/10 of a cent, i.e. three decimal places
        let amount = Decimal::new(cents * 10 + mills, 3);
        let expected = if mills >= 5 { cents + 1 } else { cents };
        prop_assert_eq!(to_minor_units(amount).unwrap(), expected);
    }

    #[test]
    fn test_negative_amounts_are_rejected(cents in 1i64..1_000_000i64) {
        prop_assert!(to_minor_units(Decimal::new(-cents, 2)).is_err());
    }

    #[test]
    fn test_price_always_has_two_decimals(cents in 0i64..1_000_000_000i64) {
        let rendered = format_price(from_minor_units(cents));
        let (_, fraction) = rendered.split_once('.').unwrap();
        prop_assert_eq!(fraction.len(), 2);
        prop_assert_eq!(rendered.parse::<Decimal>().unwrap(), from_minor_units(cents));
    }
}

#[test]
fn test_known_amounts() {
    assert_eq!(to_minor_units(dec!(12.34)).unwrap(), 1234);
    assert_eq!(to_minor_units(dec!(0.995)).unwrap(), 100);
    assert_eq!(from_minor_units(5), dec!(0.05));
    assert_eq!(format_price(dec!(7)), "7.00");
}
