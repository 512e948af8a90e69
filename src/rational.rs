//! Exact rational time values.
//!
//! Every timestamp and duration in this crate is an exact fraction of
//! 64-bit integers. Comparisons cross-multiply in 128-bit arithmetic so
//! no precision is lost on pathological operands, and multiplication and
//! subtraction reduce through 128-bit intermediates. The single place
//! floating point enters the system is [`RationalTime::approximate`],
//! which turns a human-entered value such as `12.5` into the closest
//! representable fraction.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::{Mul, Sub};

/// An exact signed fraction representing a point in time or a duration.
///
/// The denominator is always positive and the fraction is kept reduced.
/// Units are whatever the caller chooses — stream tick counts and
/// seconds are both common.
#[derive(Debug, Clone, Copy)]
pub struct RationalTime {
    numerator: i64,
    denominator: i64,
}

impl RationalTime {
    /// The zero duration, `0/1`.
    pub const ZERO: RationalTime = RationalTime {
        numerator: 0,
        denominator: 1,
    };

    /// Create a fraction, normalising the sign into the numerator and
    /// reducing by the greatest common divisor.
    ///
    /// # Panics
    ///
    /// Panics if `denominator` is zero.
    pub fn new(numerator: i64, denominator: i64) -> Self {
        assert!(denominator != 0, "denominator cannot be zero");
        let (numerator, denominator) = reduce(numerator as i128, denominator as i128);
        Self {
            numerator,
            denominator,
        }
    }

    /// A whole number of ticks (or seconds), `ticks/1`.
    pub const fn from_ticks(ticks: i64) -> Self {
        Self {
            numerator: ticks,
            denominator: 1,
        }
    }

    pub const fn numerator(self) -> i64 {
        self.numerator
    }

    pub const fn denominator(self) -> i64 {
        self.denominator
    }

    /// Best rational approximation of a floating-point value with the
    /// denominator bounded by `max_denominator`, via continued
    /// fractions.
    ///
    /// This is the one deliberate approximation in the crate: a
    /// human-entered timestamp such as `"12.5"` has no exact binary
    /// representation to begin with, so the closest fraction with a
    /// bounded denominator is the best that can be done. Returns `None`
    /// for non-finite input or a non-positive bound.
    ///
    /// # Example
    ///
    /// ```
    /// use mediagate::RationalTime;
    ///
    /// let t = RationalTime::approximate(12.5, i32::MAX as i64).unwrap();
    /// assert_eq!((t.numerator(), t.denominator()), (25, 2));
    /// ```
    pub fn approximate(value: f64, max_denominator: i64) -> Option<Self> {
        if !value.is_finite() || max_denominator < 1 {
            return None;
        }

        let negative = value < 0.0;
        let mut x = value.abs();

        // Convergents p/q of the continued fraction expansion.
        let (mut p0, mut q0) = (0_i64, 1_i64);
        let (mut p1, mut q1) = (1_i64, 0_i64);

        loop {
            let floor = x.floor();
            if floor > i64::MAX as f64 {
                return None;
            }
            let term = floor as i64;

            let p2 = term.checked_mul(p1)?.checked_add(p0)?;
            let q2 = term.checked_mul(q1)?.checked_add(q0)?;
            if q2 > max_denominator {
                break;
            }

            (p0, q0) = (p1, q1);
            (p1, q1) = (p2, q2);

            let fractional = x - floor;
            if fractional < 1e-12 {
                break;
            }
            x = 1.0 / fractional;
        }

        if q1 == 0 {
            return None;
        }
        let numerator = if negative { p1.checked_neg()? } else { p1 };
        Some(Self::new(numerator, q1))
    }

    /// Lossy conversion to floating point, for display and logging only.
    pub fn to_f64(self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

/// Reduce a 128-bit fraction and narrow it back to 64 bits.
///
/// The denominator sign is normalised to positive. Values that still do
/// not fit after reduction collapse to the saturated endpoints; with
/// stream tick counts and time bases as inputs this is unreachable in
/// practice.
fn reduce(numerator: i128, denominator: i128) -> (i64, i64) {
    let (numerator, denominator) = if denominator < 0 {
        (-numerator, -denominator)
    } else {
        (numerator, denominator)
    };

    let divisor = gcd(numerator.unsigned_abs(), denominator.unsigned_abs()).max(1);
    let numerator = numerator / divisor as i128;
    let denominator = denominator / divisor as i128;

    (
        i64::try_from(numerator).unwrap_or(if numerator < 0 { i64::MIN } else { i64::MAX }),
        i64::try_from(denominator).unwrap_or(i64::MAX),
    )
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

impl PartialEq for RationalTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RationalTime {}

impl PartialOrd for RationalTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RationalTime {
    /// Cross-multiplied comparison. Both denominators are positive, so
    /// the product comparison preserves ordering, and the 128-bit
    /// widening cannot overflow.
    fn cmp(&self, other: &Self) -> Ordering {
        let left = self.numerator as i128 * other.denominator as i128;
        let right = other.numerator as i128 * self.denominator as i128;
        left.cmp(&right)
    }
}

impl Mul for RationalTime {
    type Output = RationalTime;

    fn mul(self, rhs: Self) -> Self::Output {
        let numerator = self.numerator as i128 * rhs.numerator as i128;
        let denominator = self.denominator as i128 * rhs.denominator as i128;
        let (numerator, denominator) = reduce(numerator, denominator);
        RationalTime {
            numerator,
            denominator,
        }
    }
}

impl Sub for RationalTime {
    type Output = RationalTime;

    fn sub(self, rhs: Self) -> Self::Output {
        let numerator = self.numerator as i128 * rhs.denominator as i128
            - rhs.numerator as i128 * self.denominator as i128;
        let denominator = self.denominator as i128 * rhs.denominator as i128;
        let (numerator, denominator) = reduce(numerator, denominator);
        RationalTime {
            numerator,
            denominator,
        }
    }
}

impl Display for RationalTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
