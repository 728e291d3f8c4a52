use core::num::{NonZeroU128, NonZeroU32};

use crate::{error::ErrorMessage, TemporalError, TemporalResult};

// ==== RoundingIncrement option ====

/// A validated integer rounding increment in the range `1..=1_000_000_000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RoundingIncrement(pub(crate) NonZeroU32);

impl Default for RoundingIncrement {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<f64> for RoundingIncrement {
    type Error = TemporalError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        // A finite integer in 1..=1e9.
        if !value.is_finite() {
            return Err(TemporalError::range().with_enum(ErrorMessage::NumberNotFinite));
        }
        if core_maths::CoreFloat::trunc(value) != value {
            return Err(TemporalError::range().with_enum(ErrorMessage::NumberNotIntegral));
        }
        if !(1.0..=1_000_000_000.0).contains(&value) {
            return Err(TemporalError::range().with_enum(ErrorMessage::NumberOutOfRange));
        }
        Self::try_new(value as u32)
    }
}

impl RoundingIncrement {
    /// A rounding increment of 1 (normal rounding).
    pub const ONE: Self = match NonZeroU32::new(1) {
        Some(one) => Self(one),
        None => unreachable!(),
    };

    /// Create a new `RoundingIncrement`.
    ///
    /// # Errors
    ///
    /// - If `increment` is zero or greater than 1e9.
    pub fn try_new(increment: u32) -> TemporalResult<Self> {
        if increment > 1_000_000_000 {
            return Err(TemporalError::range().with_enum(ErrorMessage::NumberOutOfRange));
        }
        NonZeroU32::new(increment)
            .map(Self)
            .ok_or(TemporalError::range().with_message("roundingIncrement must be positive."))
    }

    /// Gets the numeric value of this `RoundingIncrement`.
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Validates this `RoundingIncrement` against `dividend`: the increment
    /// must evenly divide it and be within the maximum.
    pub(crate) fn validate(self, dividend: u64, inclusive: bool) -> TemporalResult<()> {
        let max = if inclusive { dividend } else { dividend - 1 };

        let increment = u64::from(self.get());

        if increment > max {
            return Err(TemporalError::range().with_message("roundingIncrement exceeds maximum."));
        }

        if dividend.rem_euclid(increment) != 0 {
            return Err(TemporalError::range()
                .with_message("dividend is not divisible by roundingIncrement."));
        }

        Ok(())
    }

    pub(crate) fn as_extended_increment(self) -> NonZeroU128 {
        NonZeroU128::from(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::RoundingIncrement;
    use crate::error::ErrorKind;

    #[test]
    fn validate_divides_dividend() {
        let six = RoundingIncrement::try_new(6).unwrap();
        assert!(six.validate(24, true).is_ok());
        let seven = RoundingIncrement::try_new(7).unwrap();
        assert!(seven.validate(24, true).is_err());

        let twenty_four = RoundingIncrement::try_new(24).unwrap();
        assert!(twenty_four.validate(24, true).is_ok());
        assert!(twenty_four.validate(24, false).is_err());
    }

    #[test]
    fn rejects_non_positive_increments() {
        assert!(RoundingIncrement::try_new(0).is_err());
        assert!(RoundingIncrement::try_from(0.0).is_err());
        assert!(RoundingIncrement::try_from(-5.0).is_err());
        assert!(RoundingIncrement::try_from(f64::NAN).is_err());
        assert!(RoundingIncrement::try_from(1_000_000_001.0).is_err());
        assert_eq!(RoundingIncrement::try_from(15.0).unwrap().get(), 15);
    }

    #[test]
    fn rejects_fractional_increments() {
        for value in [0.5, 2.5, 2.9] {
            let err = RoundingIncrement::try_from(value).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Range, "{value}");
        }
    }
}
