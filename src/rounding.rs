//! Implementation of increment rounding functionality
//!
//! Rounding is generic over [`Roundable`], which is implemented for the
//! exact integer representations (`i128`, `i64`) used for nanosecond
//! arithmetic and for the `f64` representation used for fractional
//! duration quantities. Each representation produces the same result for a
//! value that fits in both.

use crate::{
    options::{RoundingIncrement, RoundingMode, UnsignedRoundingMode},
    TemporalResult, TemporalUnwrap,
};

use core::{
    cmp::Ordering,
    num::NonZeroU128,
    ops::Div,
};

use num_traits::float::FloatCore;
use num_traits::{ConstZero, Euclid, FromPrimitive, NumCast, Signed, ToPrimitive};

mod sealed {
    pub trait Sealed {}
    impl Sealed for i128 {}
    impl Sealed for i64 {}
    impl Sealed for f64 {}
}

/// A numeric representation that can be rounded to an increment.
pub trait Roundable:
    Euclid
    + Div<Output = Self>
    + PartialOrd
    + Signed
    + FromPrimitive
    + ToPrimitive
    + NumCast
    + ConstZero
    + Copy
    + sealed::Sealed
{
    /// Returns whether `dividend` is an exact multiple of `divisor`.
    fn is_exact(dividend: Self, divisor: Self) -> bool;
    /// Compares the distance to the lower candidate with the distance to
    /// the upper candidate.
    fn compare_remainder(dividend: Self, divisor: Self) -> Option<Ordering>;
    fn is_even_cardinal(dividend: Self, divisor: Self) -> bool;
    fn result_floor(dividend: Self, divisor: Self) -> u128;
    fn result_ceil(dividend: Self, divisor: Self) -> u128;
    fn quotient_abs(dividend: Self, divisor: Self) -> Self {
        (dividend / divisor).abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub(crate) struct IncrementRounder<T: Roundable> {
    sign: bool,
    dividend: T,
    divisor: T,
}

impl<T: Roundable> IncrementRounder<T> {
    #[inline]
    pub(crate) fn from_signed_num(number: T, increment: NonZeroU128) -> TemporalResult<Self> {
        let increment = <T as NumCast>::from(increment.get()).temporal_unwrap()?;
        Ok(Self {
            sign: number >= T::ZERO,
            dividend: number,
            divisor: increment,
        })
    }

    /// Rounds the dividend to a multiple of the divisor.
    #[inline]
    pub(crate) fn round(&self, mode: RoundingMode) -> TemporalResult<T> {
        let unsigned_rounding_mode = mode.get_unsigned_round_mode(self.sign);
        let rounded =
            apply_unsigned_rounding_mode(self.dividend, self.divisor, unsigned_rounding_mode);
        let mut rounded = <T as NumCast>::from(rounded).temporal_unwrap()?;
        if !self.sign {
            rounded = -rounded;
        }
        Ok(rounded * self.divisor)
    }
}

/// Rounds `value` to the nearest multiple of `increment` under `mode`.
///
/// ```rust
/// use temporal_engine::{options::{RoundingIncrement, RoundingMode}, rounding::round_to_increment};
///
/// assert_eq!(round_to_increment(2.5f64, RoundingIncrement::ONE, RoundingMode::Trunc).unwrap(), 2.0);
/// assert_eq!(round_to_increment(-25i128, RoundingIncrement::try_new(10).unwrap(), RoundingMode::HalfExpand).unwrap(), -30);
/// ```
pub fn round_to_increment<T: Roundable>(
    value: T,
    increment: RoundingIncrement,
    mode: RoundingMode,
) -> TemporalResult<T> {
    IncrementRounder::from_signed_num(value, increment.as_extended_increment())?.round(mode)
}

impl Roundable for i128 {
    fn is_exact(dividend: Self, divisor: Self) -> bool {
        dividend.rem_euclid(divisor) == 0
    }

    fn compare_remainder(dividend: Self, divisor: Self) -> Option<Ordering> {
        Some(((dividend.abs() % divisor) * 2).cmp(&divisor))
    }

    fn is_even_cardinal(dividend: Self, divisor: Self) -> bool {
        Roundable::result_floor(dividend, divisor).rem_euclid(2) == 0
    }

    fn result_floor(dividend: Self, divisor: Self) -> u128 {
        Roundable::quotient_abs(dividend, divisor) as u128
    }

    fn result_ceil(dividend: Self, divisor: Self) -> u128 {
        Roundable::quotient_abs(dividend, divisor) as u128 + 1
    }
}

impl Roundable for i64 {
    fn is_exact(dividend: Self, divisor: Self) -> bool {
        dividend.rem_euclid(divisor) == 0
    }

    fn compare_remainder(dividend: Self, divisor: Self) -> Option<Ordering> {
        Some((<i128 as From<i64>>::from(dividend.abs() % divisor) * 2).cmp(&<i128 as From<i64>>::from(divisor)))
    }

    fn is_even_cardinal(dividend: Self, divisor: Self) -> bool {
        Roundable::result_floor(dividend, divisor).rem_euclid(2) == 0
    }

    fn result_floor(dividend: Self, divisor: Self) -> u128 {
        Roundable::quotient_abs(dividend, divisor) as u128
    }

    fn result_ceil(dividend: Self, divisor: Self) -> u128 {
        Roundable::quotient_abs(dividend, divisor) as u128 + 1
    }
}

impl Roundable for f64 {
    fn is_exact(dividend: Self, divisor: Self) -> bool {
        let quotient = Roundable::quotient_abs(dividend, divisor);
        quotient == FloatCore::floor(quotient)
    }

    fn compare_remainder(dividend: Self, divisor: Self) -> Option<Ordering> {
        let quotient = Roundable::quotient_abs(dividend, divisor);
        let d1 = quotient - FloatCore::floor(quotient);
        let d2 = FloatCore::ceil(quotient) - quotient;
        d1.partial_cmp(&d2)
    }

    fn is_even_cardinal(dividend: Self, divisor: Self) -> bool {
        let quotient = Roundable::quotient_abs(dividend, divisor);
        FloatCore::floor(quotient) % 2.0 == 0.0
    }

    fn result_floor(dividend: Self, divisor: Self) -> u128 {
        FloatCore::floor(Roundable::quotient_abs(dividend, divisor)) as u128
    }

    fn result_ceil(dividend: Self, divisor: Self) -> u128 {
        FloatCore::ceil(Roundable::quotient_abs(dividend, divisor)) as u128
    }
}

/// Applies the unsigned rounding mode.
fn apply_unsigned_rounding_mode<T: Roundable>(
    dividend: T,
    divisor: T,
    unsigned_rounding_mode: UnsignedRoundingMode,
) -> u128 {
    // 1. If x is equal to r1, return r1.
    if Roundable::is_exact(dividend, divisor) {
        return Roundable::result_floor(dividend, divisor);
    }

    // 2. If unsignedRoundingMode is zero, return r1.
    if unsigned_rounding_mode == UnsignedRoundingMode::Zero {
        return Roundable::result_floor(dividend, divisor);
    };
    // 3. If unsignedRoundingMode is infinity, return r2.
    if unsigned_rounding_mode == UnsignedRoundingMode::Infinity {
        return Roundable::result_ceil(dividend, divisor);
    };

    // 4. Let d1 be x – r1 and d2 be r2 – x; return the closer one.
    match Roundable::compare_remainder(dividend, divisor) {
        Some(Ordering::Less) | None => Roundable::result_floor(dividend, divisor),
        Some(Ordering::Greater) => Roundable::result_ceil(dividend, divisor),
        Some(Ordering::Equal) => match unsigned_rounding_mode {
            UnsignedRoundingMode::HalfZero => Roundable::result_floor(dividend, divisor),
            UnsignedRoundingMode::HalfInfinity => Roundable::result_ceil(dividend, divisor),
            // 5. Let cardinality be (r1 / (r2 – r1)) modulo 2; an even
            // cardinality returns r1.
            _ if Roundable::is_even_cardinal(dividend, divisor) => {
                Roundable::result_floor(dividend, divisor)
            }
            _ => Roundable::result_ceil(dividend, divisor),
        },
    }
}

#[cfg(test)]
mod tests {
    use core::num::NonZeroU128;

    use super::{round_to_increment, IncrementRounder, Roundable, RoundingMode};
    use crate::options::RoundingIncrement;
    use core::fmt::Debug;

    #[derive(Debug)]
    struct TestCase<T> {
        x: T,
        increment: u128,
        ceil: T,
        floor: T,
        expand: T,
        trunc: T,
        half_ceil: T,
        half_floor: T,
        half_expand: T,
        half_trunc: T,
        half_even: T,
    }

    impl<T: Roundable + Debug> TestCase<T> {
        fn run(&self) {
            let rounder =
                IncrementRounder::from_signed_num(self.x, NonZeroU128::new(self.increment).unwrap())
                    .unwrap();
            let expectations = [
                (RoundingMode::Ceil, self.ceil),
                (RoundingMode::Floor, self.floor),
                (RoundingMode::Expand, self.expand),
                (RoundingMode::Trunc, self.trunc),
                (RoundingMode::HalfCeil, self.half_ceil),
                (RoundingMode::HalfFloor, self.half_floor),
                (RoundingMode::HalfExpand, self.half_expand),
                (RoundingMode::HalfTrunc, self.half_trunc),
                (RoundingMode::HalfEven, self.half_even),
            ];
            for (mode, expected) in expectations {
                assert!(
                    rounder.round(mode).unwrap() == expected,
                    "Testing {:?}/{:?} with mode {mode}",
                    self.x,
                    self.increment
                );
            }
        }
    }

    #[test]
    fn basic_integer_rounding_cases() {
        const CASES: &[TestCase<i128>] = &[
            TestCase {
                x: 100,
                increment: 10,
                ceil: 100,
                floor: 100,
                expand: 100,
                trunc: 100,
                half_ceil: 100,
                half_floor: 100,
                half_expand: 100,
                half_trunc: 100,
                half_even: 100,
            },
            TestCase {
                x: 101,
                increment: 10,
                ceil: 110,
                floor: 100,
                expand: 110,
                trunc: 100,
                half_ceil: 100,
                half_floor: 100,
                half_expand: 100,
                half_trunc: 100,
                half_even: 100,
            },
            TestCase {
                x: 105,
                increment: 10,
                ceil: 110,
                floor: 100,
                expand: 110,
                trunc: 100,
                half_ceil: 110,
                half_floor: 100,
                half_expand: 110,
                half_trunc: 100,
                half_even: 100,
            },
            TestCase {
                x: 115,
                increment: 10,
                ceil: 120,
                floor: 110,
                expand: 120,
                trunc: 110,
                half_ceil: 120,
                half_floor: 110,
                half_expand: 120,
                half_trunc: 110,
                half_even: 120,
            },
            TestCase {
                x: -101,
                increment: 10,
                ceil: -100,
                floor: -110,
                expand: -110,
                trunc: -100,
                half_ceil: -100,
                half_floor: -100,
                half_expand: -100,
                half_trunc: -100,
                half_even: -100,
            },
            TestCase {
                x: -105,
                increment: 10,
                ceil: -100,
                floor: -110,
                expand: -110,
                trunc: -100,
                half_ceil: -100,
                half_floor: -110,
                half_expand: -110,
                half_trunc: -100,
                half_even: -100,
            },
            TestCase {
                x: -107,
                increment: 10,
                ceil: -100,
                floor: -110,
                expand: -110,
                trunc: -100,
                half_ceil: -110,
                half_floor: -110,
                half_expand: -110,
                half_trunc: -110,
                half_even: -110,
            },
            // An odd increment has no exact midpoint.
            TestCase {
                x: 4,
                increment: 3,
                ceil: 6,
                floor: 3,
                expand: 6,
                trunc: 3,
                half_ceil: 3,
                half_floor: 3,
                half_expand: 3,
                half_trunc: 3,
                half_even: 3,
            },
        ];

        for case in CASES {
            case.run();
        }
    }

    #[test]
    fn float_matches_integer_rounding() {
        const CASES: &[TestCase<f64>] = &[
            TestCase {
                x: 2.5,
                increment: 1,
                ceil: 3.0,
                floor: 2.0,
                expand: 3.0,
                trunc: 2.0,
                half_ceil: 3.0,
                half_floor: 2.0,
                half_expand: 3.0,
                half_trunc: 2.0,
                half_even: 2.0,
            },
            TestCase {
                x: -2.5,
                increment: 1,
                ceil: -2.0,
                floor: -3.0,
                expand: -3.0,
                trunc: -2.0,
                half_ceil: -2.0,
                half_floor: -3.0,
                half_expand: -3.0,
                half_trunc: -2.0,
                half_even: -2.0,
            },
            TestCase {
                x: -105.0,
                increment: 10,
                ceil: -100.0,
                floor: -110.0,
                expand: -110.0,
                trunc: -100.0,
                half_ceil: -100.0,
                half_floor: -110.0,
                half_expand: -110.0,
                half_trunc: -100.0,
                half_even: -100.0,
            },
        ];

        for case in CASES {
            case.run();
        }

        for x in [-107i64, -105, -101, 101, 105, 115] {
            for mode in [
                RoundingMode::Ceil,
                RoundingMode::HalfEven,
                RoundingMode::HalfTrunc,
                RoundingMode::Floor,
            ] {
                let increment = RoundingIncrement::try_new(10).unwrap();
                let int = round_to_increment(x, increment, mode).unwrap();
                let float = round_to_increment(x as f64, increment, mode).unwrap();
                assert_eq!(int as f64, float, "{x} with {mode}");
            }
        }
    }

    #[test]
    fn datetime_since_rounding() {
        let result = IncrementRounder::<i128>::from_signed_num(
            -84082624864197532,
            NonZeroU128::new(1800000000000).unwrap(),
        )
        .unwrap()
        .round(RoundingMode::HalfExpand)
        .unwrap();

        assert_eq!(result, -84083400000000000);
    }
}
