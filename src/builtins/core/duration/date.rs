//! Implementation of a `DateDuration`

use crate::{Sign, TemporalResult};

use super::{duration_sign, is_valid_duration};

/// `DateDuration` represents the [date duration record][record] of the `Duration.`
///
/// These fields are laid out in the [Temporal Proposal][field spec] as 64-bit floating point numbers.
///
/// [record]: https://tc39.es/proposal-temporal/#sec-temporal-date-duration-records
/// [field spec]: https://tc39.es/proposal-temporal/#sec-properties-of-temporal-duration-instances
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct DateDuration {
    /// `DateDuration`'s internal year value.
    pub years: f64,
    /// `DateDuration`'s internal month value.
    pub months: f64,
    /// `DateDuration`'s internal week value.
    pub weeks: f64,
    /// `DateDuration`'s internal day value.
    pub days: f64,
}

impl DateDuration {
    /// Creates a new, non-validated `DateDuration`.
    #[inline]
    #[must_use]
    pub(crate) const fn new_unchecked(years: f64, months: f64, weeks: f64, days: f64) -> Self {
        Self {
            years,
            months,
            weeks,
            days,
        }
    }
}

impl DateDuration {
    /// Creates a new `DateDuration` with provided values.
    pub fn new(years: f64, months: f64, weeks: f64, days: f64) -> TemporalResult<Self> {
        let result = Self::new_unchecked(years, months, weeks, days);
        let mut fields = [0.0; 10];
        fields[..4].copy_from_slice(&result.fields());
        is_valid_duration(&fields)?;
        Ok(result)
    }

    /// Returns the fields of this `DateDuration` from years to days.
    #[inline]
    #[must_use]
    pub fn fields(&self) -> [f64; 4] {
        [self.years, self.months, self.weeks, self.days]
    }

    /// Returns the sign of the first non-zero field.
    #[inline]
    #[must_use]
    pub fn sign(&self) -> Sign {
        duration_sign(&self.fields())
    }

    /// Returns whether every field is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.sign() == Sign::Zero
    }

    /// Returns whether years, months and weeks are all zero.
    #[inline]
    #[must_use]
    pub(crate) fn has_no_calendar_units(&self) -> bool {
        self.years == 0.0 && self.months == 0.0 && self.weeks == 0.0
    }

    /// Returns a negated `DateDuration`.
    #[inline]
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            years: -self.years,
            months: -self.months,
            weeks: -self.weeks,
            days: -self.days,
        }
    }

    /// Returns a new `DateDuration` representing the absolute value of the current.
    #[inline]
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            years: core_maths::CoreFloat::abs(self.years),
            months: core_maths::CoreFloat::abs(self.months),
            weeks: core_maths::CoreFloat::abs(self.weeks),
            days: core_maths::CoreFloat::abs(self.days),
        }
    }
}
