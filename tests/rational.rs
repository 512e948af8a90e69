//! Rational time arithmetic tests.

use std::cmp::Ordering;

use mediagate::RationalTime;

#[test]
fn comparison_is_consistent() {
    let values = [
        RationalTime::new(0, 1),
        RationalTime::new(1, 3),
        RationalTime::new(-7, 2),
        RationalTime::new(3600, 1),
        RationalTime::new(1, 90_000),
        RationalTime::new(i64::MAX, 7),
    ];

    for a in values {
        assert_eq!(a.cmp(&a), Ordering::Equal);
        for b in values {
            match a.cmp(&b) {
                Ordering::Greater => assert_eq!(b.cmp(&a), Ordering::Less),
                Ordering::Less => assert_eq!(b.cmp(&a), Ordering::Greater),
                Ordering::Equal => assert_eq!(b.cmp(&a), Ordering::Equal),
            }
        }
    }
}

#[test]
fn comparison_cross_multiplies_without_precision_loss() {
    // 1/3 < 33333333334/100000000000 but the two are equal in f64.
    let third = RationalTime::new(1, 3);
    let nearly = RationalTime::new(33_333_333_334, 100_000_000_000);
    assert!(third < nearly);
    assert!(nearly > third);
}

#[test]
fn equal_fractions_compare_equal_across_representations() {
    assert_eq!(RationalTime::new(7200, 2), RationalTime::new(3600, 1));
    assert_eq!(RationalTime::new(1, 2), RationalTime::new(500, 1000));
}

#[test]
fn construction_normalises_sign_and_reduces() {
    let value = RationalTime::new(2, -4);
    assert_eq!(value.numerator(), -1);
    assert_eq!(value.denominator(), 2);

    let reduced = RationalTime::new(44_100, 88_200);
    assert_eq!(reduced.numerator(), 1);
    assert_eq!(reduced.denominator(), 2);
}

#[test]
#[should_panic(expected = "denominator cannot be zero")]
fn zero_denominator_panics() {
    RationalTime::new(1, 0);
}

#[test]
fn multiplication_is_exact() {
    // 1323000 ticks at 1/44100 ticks per second is exactly 30 seconds.
    let ticks = RationalTime::from_ticks(1_323_000);
    let time_base = RationalTime::new(1, 44_100);
    assert_eq!(ticks * time_base, RationalTime::new(30, 1));
}

#[test]
fn multiplication_reduces_through_wide_intermediates() {
    let a = RationalTime::new(i64::MAX / 3, 5);
    let b = RationalTime::new(5, i64::MAX / 3);
    assert_eq!(a * b, RationalTime::new(1, 1));
}

#[test]
fn subtraction_is_exact() {
    let a = RationalTime::new(1, 3);
    let b = RationalTime::new(1, 6);
    assert_eq!(a - b, RationalTime::new(1, 6));

    let negative = RationalTime::ZERO - RationalTime::new(5, 2);
    assert_eq!(negative, RationalTime::new(-5, 2));
}

#[test]
fn approximate_parses_decimal_timestamps() {
    let t = RationalTime::approximate(12.5, i32::MAX as i64).unwrap();
    assert_eq!((t.numerator(), t.denominator()), (25, 2));

    let whole = RationalTime::approximate(30.0, i32::MAX as i64).unwrap();
    assert_eq!((whole.numerator(), whole.denominator()), (30, 1));

    let zero = RationalTime::approximate(0.0, i32::MAX as i64).unwrap();
    assert_eq!(zero, RationalTime::ZERO);
}

#[test]
fn approximate_respects_the_denominator_bound() {
    let t = RationalTime::approximate(0.1, 10).unwrap();
    assert_eq!((t.numerator(), t.denominator()), (1, 10));
}

#[test]
fn approximate_handles_negative_values() {
    let t = RationalTime::approximate(-2.25, i32::MAX as i64).unwrap();
    assert_eq!((t.numerator(), t.denominator()), (-9, 4));
}

#[test]
fn approximate_rejects_unusable_input() {
    assert!(RationalTime::approximate(f64::NAN, 1000).is_none());
    assert!(RationalTime::approximate(f64::INFINITY, 1000).is_none());
    assert!(RationalTime::approximate(1.5, 0).is_none());
}

#[test]
fn display_renders_numerator_slash_denominator() {
    assert_eq!(RationalTime::new(30, 1).to_string(), "30/1");
    assert_eq!(RationalTime::new(-1, 2).to_string(), "-1/2");
}
