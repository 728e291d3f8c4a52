//! An implementation of `TimeDuration` and it's methods.

use crate::{error::ErrorMessage, options::Unit, Sign, TemporalError, TemporalResult};

use super::{
    is_valid_duration,
    normalized::{NormalizedTimeDuration, MAX_TIME_DURATION},
};

/// `TimeDuration` represents the [Time Duration record][record] of the `Duration.`
///
/// These fields are laid out in the [Temporal Proposal][field spec] as 64-bit floating point numbers.
///
/// [record]: https://tc39.es/proposal-temporal/#sec-temporal-time-duration-records
/// [field spec]: https://tc39.es/proposal-temporal/#sec-properties-of-temporal-duration-instances
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeDuration {
    /// `TimeDuration`'s internal hour value.
    pub hours: f64,
    /// `TimeDuration`'s internal minute value.
    pub minutes: f64,
    /// `TimeDuration`'s internal second value.
    pub seconds: f64,
    /// `TimeDuration`'s internal millisecond value.
    pub milliseconds: f64,
    /// `TimeDuration`'s internal microsecond value.
    pub microseconds: f64,
    /// `TimeDuration`'s internal nanosecond value.
    pub nanoseconds: f64,
}

// ==== TimeDuration Private API ====

impl TimeDuration {
    /// Creates a new `TimeDuration`.
    #[must_use]
    pub(crate) const fn new_unchecked(
        hours: f64,
        minutes: f64,
        seconds: f64,
        milliseconds: f64,
        microseconds: f64,
        nanoseconds: f64,
    ) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            milliseconds,
            microseconds,
            nanoseconds,
        }
    }

    /// Balances a normalized time duration up to `largest_unit`, returning
    /// the carried days along with the balanced time components.
    ///
    /// Date units as the largest unit all balance up to days.
    ///
    /// Equivalent: 7.5.27 BalanceTimeDuration ( norm, largestUnit )
    pub(crate) fn from_normalized(
        norm: NormalizedTimeDuration,
        largest_unit: Unit,
    ) -> TemporalResult<(i64, Self)> {
        if norm.0.abs() > MAX_TIME_DURATION {
            return Err(TemporalError::range().with_enum(ErrorMessage::DurationOutOfRange));
        }

        let sign = i128::from(norm.sign().as_sign_multiplier());
        let mut nanoseconds = norm.0.abs();
        let mut days = 0;
        let mut hours = 0;
        let mut minutes = 0;
        let mut seconds = 0;
        let mut milliseconds = 0;
        let mut microseconds = 0;

        match largest_unit {
            Unit::Year | Unit::Month | Unit::Week | Unit::Day => {
                microseconds = nanoseconds / 1000;
                nanoseconds %= 1000;
                milliseconds = microseconds / 1000;
                microseconds %= 1000;
                seconds = milliseconds / 1000;
                milliseconds %= 1000;
                minutes = seconds / 60;
                seconds %= 60;
                hours = minutes / 60;
                minutes %= 60;
                days = hours / 24;
                hours %= 24;
            }
            Unit::Hour => {
                microseconds = nanoseconds / 1000;
                nanoseconds %= 1000;
                milliseconds = microseconds / 1000;
                microseconds %= 1000;
                seconds = milliseconds / 1000;
                milliseconds %= 1000;
                minutes = seconds / 60;
                seconds %= 60;
                hours = minutes / 60;
                minutes %= 60;
            }
            Unit::Minute => {
                microseconds = nanoseconds / 1000;
                nanoseconds %= 1000;
                milliseconds = microseconds / 1000;
                microseconds %= 1000;
                seconds = milliseconds / 1000;
                milliseconds %= 1000;
                minutes = seconds / 60;
                seconds %= 60;
            }
            Unit::Second => {
                microseconds = nanoseconds / 1000;
                nanoseconds %= 1000;
                milliseconds = microseconds / 1000;
                microseconds %= 1000;
                seconds = milliseconds / 1000;
                milliseconds %= 1000;
            }
            Unit::Millisecond => {
                microseconds = nanoseconds / 1000;
                nanoseconds %= 1000;
                milliseconds = microseconds / 1000;
                microseconds %= 1000;
            }
            Unit::Microsecond => {
                microseconds = nanoseconds / 1000;
                nanoseconds %= 1000;
            }
            Unit::Nanosecond => {}
            Unit::Auto => return Err(TemporalError::assert()),
        }

        let time = Self::new_unchecked(
            (hours * sign) as f64,
            (minutes * sign) as f64,
            (seconds * sign) as f64,
            (milliseconds * sign) as f64,
            (microseconds * sign) as f64,
            (nanoseconds * sign) as f64,
        );

        Ok(((days * sign) as i64, time))
    }

    /// Returns this `TimeDuration` as an exact nanosecond count.
    pub(crate) fn to_normalized(self) -> NormalizedTimeDuration {
        NormalizedTimeDuration::from_time_duration(&self)
    }
}

// ==== TimeDuration's public API ====

impl TimeDuration {
    /// Creates a new validated `TimeDuration`.
    pub fn new(
        hours: f64,
        minutes: f64,
        seconds: f64,
        milliseconds: f64,
        microseconds: f64,
        nanoseconds: f64,
    ) -> TemporalResult<Self> {
        let result = Self::new_unchecked(
            hours,
            minutes,
            seconds,
            milliseconds,
            microseconds,
            nanoseconds,
        );
        let mut fields = [0.0; 10];
        fields[4..].copy_from_slice(&result.fields());
        is_valid_duration(&fields)?;
        Ok(result)
    }

    /// Returns the fields of this `TimeDuration` from hours to nanoseconds.
    #[inline]
    #[must_use]
    pub fn fields(&self) -> [f64; 6] {
        [
            self.hours,
            self.minutes,
            self.seconds,
            self.milliseconds,
            self.microseconds,
            self.nanoseconds,
        ]
    }

    /// Returns the sign of the first non-zero field.
    #[inline]
    #[must_use]
    pub fn sign(&self) -> Sign {
        super::duration_sign(&self.fields())
    }

    /// Returns whether every field is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.sign() == Sign::Zero
    }

    /// Returns a negated `TimeDuration`.
    #[inline]
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            hours: -self.hours,
            minutes: -self.minutes,
            seconds: -self.seconds,
            milliseconds: -self.milliseconds,
            microseconds: -self.microseconds,
            nanoseconds: -self.nanoseconds,
        }
    }

    /// Returns a new `TimeDuration` representing the absolute value of the current.
    #[inline]
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            hours: core_maths::CoreFloat::abs(self.hours),
            minutes: core_maths::CoreFloat::abs(self.minutes),
            seconds: core_maths::CoreFloat::abs(self.seconds),
            milliseconds: core_maths::CoreFloat::abs(self.milliseconds),
            microseconds: core_maths::CoreFloat::abs(self.microseconds),
            nanoseconds: core_maths::CoreFloat::abs(self.nanoseconds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_carries_into_largest_unit() {
        let norm = NormalizedTimeDuration(90_061_001_001_001);
        let (days, time) = TimeDuration::from_normalized(norm, Unit::Day).unwrap();
        assert_eq!(days, 1);
        assert_eq!(time.fields(), [1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);

        let (days, time) = TimeDuration::from_normalized(norm, Unit::Hour).unwrap();
        assert_eq!(days, 0);
        assert_eq!(time.hours, 25.0);

        let (_, time) = TimeDuration::from_normalized(norm, Unit::Second).unwrap();
        assert_eq!(time.fields(), [0.0, 0.0, 90_061.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn balance_keeps_sign_on_every_field() {
        let norm = NormalizedTimeDuration(-3_723_000_000_004);
        let (days, time) = TimeDuration::from_normalized(norm, Unit::Day).unwrap();
        assert_eq!(days, 0);
        assert_eq!(time.fields(), [-1.0, -2.0, -3.0, 0.0, 0.0, -4.0]);
        assert_eq!(time.sign(), Sign::Negative);
    }

    #[test]
    fn new_rejects_mixed_signs() {
        assert!(TimeDuration::new(1.0, -1.0, 0.0, 0.0, 0.0, 0.0).is_err());
        assert!(TimeDuration::new(1.5, 0.0, 0.0, 0.0, 0.0, 0.0).is_err());
        assert!(TimeDuration::new(1.0, 59.0, 0.0, 0.0, 0.0, 0.0).is_ok());
    }
}
