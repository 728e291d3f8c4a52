//! This module implements the normalized `Duration` records.

use core::num::NonZeroU128;

use crate::{
    error::ErrorMessage, options::RoundingMode, rounding::IncrementRounder, Sign, TemporalError,
    TemporalResult, NS_PER_DAY,
};

use super::{DateDuration, TimeDuration};

const NANOSECONDS_PER_SECOND: i128 = 1_000_000_000;
const NANOSECONDS_PER_MINUTE: i128 = 60 * NANOSECONDS_PER_SECOND;
const NANOSECONDS_PER_HOUR: i128 = 60 * NANOSECONDS_PER_MINUTE;

/// The maximum time duration: 2^53 seconds less one nanosecond.
pub(crate) const MAX_TIME_DURATION: i128 = 9_007_199_254_740_991_999_999_999;

// ==== NormalizedTimeDuration ====
//
// A time duration collapsed into an exact nanosecond count, so that
// balancing and rounding never lose precision to `f64`.

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct NormalizedTimeDuration(pub(crate) i128);

impl NormalizedTimeDuration {
    /// Equivalent: 7.5.20 NormalizeTimeDuration ( hours, minutes, seconds, milliseconds, microseconds, nanoseconds )
    pub(crate) fn from_time_duration(time: &TimeDuration) -> Self {
        let mut nanoseconds = time.hours as i128 * NANOSECONDS_PER_HOUR;
        nanoseconds += time.minutes as i128 * NANOSECONDS_PER_MINUTE;
        nanoseconds += time.seconds as i128 * NANOSECONDS_PER_SECOND;
        nanoseconds += time.milliseconds as i128 * 1_000_000;
        nanoseconds += time.microseconds as i128 * 1_000;
        nanoseconds += time.nanoseconds as i128;
        Self(nanoseconds)
    }

    /// Creates the normalized duration `one - two` from two epoch nanosecond values.
    pub(crate) fn from_nanosecond_difference(one: i128, two: i128) -> TemporalResult<Self> {
        Self(one - two).checked()
    }

    pub(crate) fn from_days(days: i64) -> TemporalResult<Self> {
        Self(i128::from(days) * i128::from(NS_PER_DAY)).checked()
    }

    fn checked(self) -> TemporalResult<Self> {
        if self.0.abs() > MAX_TIME_DURATION {
            return Err(TemporalError::range().with_enum(ErrorMessage::DurationOutOfRange));
        }
        Ok(self)
    }

    /// Equivalent: 7.5.23 Add24HourDaysToNormalizedTimeDuration ( d, days )
    pub(crate) fn add_days(&self, days: i64) -> TemporalResult<Self> {
        Self(self.0 + i128::from(days) * i128::from(NS_PER_DAY)).checked()
    }

    /// Equivalent: 7.5.22 AddNormalizedTimeDuration ( one, two )
    pub(crate) fn checked_add(&self, other: &Self) -> TemporalResult<Self> {
        Self(self.0 + other.0).checked()
    }

    /// Equivalent: 7.5.31 NormalizedTimeDurationSign ( d )
    #[inline]
    #[must_use]
    pub(crate) fn sign(&self) -> Sign {
        Sign::from(self.0.cmp(&0))
    }

    /// Divides this duration by `divisor` nanoseconds, keeping the integral
    /// part exact before converting the remainder.
    pub(crate) fn divide(&self, divisor: u64) -> f64 {
        let divisor = i128::from(divisor);
        let quotient = self.0 / divisor;
        let remainder = self.0 % divisor;
        quotient as f64 + remainder as f64 / divisor as f64
    }

    /// Returns the fractionalDays value represented by this `NormalizedTimeDuration`
    pub(crate) fn as_fractional_days(&self) -> f64 {
        self.divide(NS_PER_DAY)
    }

    /// Rounds the nanosecond count to a multiple of `increment` nanoseconds.
    ///
    /// Equivalent: 7.5.38 RoundNormalizedTimeDurationToIncrement ( d, increment, roundingMode )
    pub(crate) fn round(&self, increment: NonZeroU128, mode: RoundingMode) -> TemporalResult<Self> {
        let rounded = IncrementRounder::<i128>::from_signed_num(self.0, increment)?.round(mode)?;
        Self(rounded).checked()
    }
}

// ==== NormalizedDurationRecord ====
//
// A date duration paired with a normalized time duration. This is the
// working record of the difference engine.

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(crate) struct NormalizedDurationRecord {
    pub(crate) date: DateDuration,
    pub(crate) norm: NormalizedTimeDuration,
}

impl NormalizedDurationRecord {
    /// Creates a record, rejecting a date part and time part of opposite signs.
    pub(crate) fn new(date: DateDuration, norm: NormalizedTimeDuration) -> TemporalResult<Self> {
        let date_sign = date.sign();
        let time_sign = norm.sign();
        if date_sign != Sign::Zero && time_sign != Sign::Zero && date_sign != time_sign {
            return Err(TemporalError::range().with_enum(ErrorMessage::MixedSignDuration));
        }
        Ok(Self { date, norm })
    }
}
