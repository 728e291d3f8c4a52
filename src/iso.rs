//! This module implements the internal ISO field slots.
//!
//! The three main types of slots are:
//!   - `IsoDateTime`
//!   - `IsoDate`
//!   - `IsoTime`
//!
//! An `IsoDate` represents the `[[ISOYear]]`, `[[ISOMonth]]`, and `[[ISODay]]` internal slots.
//!
//! An `IsoTime` represents the `[[ISOHour]]`, `[[ISOMinute]]`, `[[ISOsecond]]`, `[[ISOmillisecond]]`,
//! `[[ISOmicrosecond]]`, and `[[ISOnanosecond]]` internal slots.
//!
//! An `IsoDateTime` has the internal slots of both an `IsoDate` and `IsoTime`.

use core::num::NonZeroU128;

use crate::{
    builtins::core::{
        calendar::Calendar,
        duration::{
            normalized::{NormalizedDurationRecord, NormalizedTimeDuration},
            DateDuration,
        },
        PartialTime,
    },
    error::{ErrorMessage, TemporalError},
    options::{Overflow, ResolvedRoundingOptions, Unit},
    rounding::IncrementRounder,
    utils, Sign, TemporalResult, TemporalUnwrap, NS_MAX_INSTANT, NS_MIN_INSTANT, NS_PER_DAY,
};

/// The smallest epoch day a date may occupy, -271821-04-19.
const MIN_EPOCH_DAYS: i64 = -100_000_001;
/// The largest epoch day a date may occupy, 275760-09-13.
const MAX_EPOCH_DAYS: i64 = 100_000_000;

/// `IsoDateTime` is the record of the `IsoDate` and `IsoTime` internal slots.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDateTime {
    pub date: IsoDate,
    pub time: IsoTime,
}

impl IsoDateTime {
    /// Creates a new `IsoDateTime` without any validaiton.
    pub(crate) fn new_unchecked(date: IsoDate, time: IsoTime) -> Self {
        Self { date, time }
    }

    /// Creates a new validated `IsoDateTime` that is within valid limits.
    pub fn new(date: IsoDate, time: IsoTime) -> TemporalResult<Self> {
        let result = Self::new_unchecked(date, time);
        if !result.is_within_limits() {
            return Err(TemporalError::range().with_enum(ErrorMessage::DateTimeOutOfRange));
        }
        Ok(result)
    }

    /// Returns whether this date-time, read as UTC, lies strictly within one
    /// day of the instant limits.
    pub(crate) fn is_within_limits(&self) -> bool {
        let ns = self.as_nanoseconds();
        let max = NS_MAX_INSTANT + i128::from(NS_PER_DAY);
        let min = NS_MIN_INSTANT - i128::from(NS_PER_DAY);
        min < ns && ns < max
    }

    /// Returns the epoch nanoseconds of this date-time as if it were UTC.
    pub(crate) fn as_nanoseconds(&self) -> i128 {
        i128::from(self.date.to_epoch_days()) * i128::from(NS_PER_DAY)
            + i128::from(self.time.to_nanoseconds())
    }

    /// Rounds the time portion, carrying any overflow into the date.
    pub(crate) fn round(&self, resolved_options: ResolvedRoundingOptions) -> TemporalResult<Self> {
        let (days, time) = self.time.round(resolved_options)?;
        let date = IsoDate::from_epoch_days(self.date.to_epoch_days() + days)?;
        Self::new(date, time)
    }

    /// Computes the difference from this date-time to `other`, with the date
    /// portion measured by `calendar`.
    ///
    /// When the time difference points against the date difference, one day
    /// is borrowed so that the date and time parts never disagree in sign.
    pub(crate) fn diff(
        &self,
        other: &Self,
        calendar: &Calendar,
        largest_unit: Unit,
    ) -> TemporalResult<NormalizedDurationRecord> {
        let mut time_duration = self.time.diff(&other.time);
        let time_sign = time_duration.sign();
        let date_sign = Sign::from(other.date.cmp(&self.date));

        let mut adjusted_date = other.date;
        if time_sign != Sign::Zero && time_sign == date_sign.negate() {
            let sign = i64::from(time_sign as i8);
            adjusted_date = IsoDate::from_epoch_days(adjusted_date.to_epoch_days() + sign)?;
            time_duration = time_duration.add_days(-sign)?;
        }

        let date_largest = Unit::Day.max(largest_unit);
        let mut date_diff = calendar.date_until(&self.date, &adjusted_date, date_largest)?;

        if largest_unit != date_largest {
            time_duration = time_duration.add_days(date_diff.days as i64)?;
            date_diff.days = 0.0;
        }

        NormalizedDurationRecord::new(date_diff, time_duration)
    }
}

// ==== `IsoDate` section ====

/// `IsoDate` serves as a record for the `[[ISOYear]]`, `[[ISOMonth]]`,
/// and `[[ISODay]]` internal fields.
///
/// These fields are used for the `Temporal.PlainDate` object, the
/// `Temporal.YearMonth` object, and the `Temporal.MonthDay` object.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl IsoDate {
    /// Creates a new `IsoDate` without determining the validity.
    pub(crate) const fn new_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Creates a regulated `IsoDate` that is within the date limits.
    pub fn new_with_overflow(
        year: i32,
        month: i32,
        day: i32,
        overflow: Overflow,
    ) -> TemporalResult<Self> {
        let date = Self::regulate(year, month, day, overflow)?;
        date.check_within_limits()?;
        Ok(date)
    }

    /// Applies the overflow policy to the month and day without checking the
    /// date limits.
    ///
    /// Equivalent to `RegulateISODate`.
    pub(crate) fn regulate(
        year: i32,
        month: i32,
        day: i32,
        overflow: Overflow,
    ) -> TemporalResult<Self> {
        match overflow {
            Overflow::Constrain => {
                let month = month.clamp(1, 12) as u8;
                let days_in_month = i32::from(utils::iso_days_in_month(year, month));
                // NOTE: Values are clamped in a u8 range.
                Ok(Self::new_unchecked(
                    year,
                    month,
                    day.clamp(1, days_in_month) as u8,
                ))
            }
            Overflow::Reject => {
                if !is_valid_date(year, month, day) {
                    return Err(TemporalError::range().with_message("not a valid ISO date."));
                }
                // NOTE: Values have been verified to be in a u8 range.
                Ok(Self::new_unchecked(year, month as u8, day as u8))
            }
        }
    }

    /// Creates an `IsoDate` from a count of days since 1970-01-01, checking
    /// the result is within the date limits.
    pub(crate) fn from_epoch_days(epoch_days: i64) -> TemporalResult<Self> {
        if !(MIN_EPOCH_DAYS..=MAX_EPOCH_DAYS).contains(&epoch_days) {
            return Err(TemporalError::range().with_enum(ErrorMessage::DateOutOfRange));
        }
        let (year, month, day) = utils::iso_from_epoch_days(epoch_days);
        Ok(Self::new_unchecked(year, month, day))
    }

    /// Returns the count of days since 1970-01-01.
    ///
    /// Equivalent to `ISODateToEpochDays`
    #[inline]
    #[must_use]
    pub fn to_epoch_days(&self) -> i64 {
        utils::epoch_days_from_iso(self.year, self.month, self.day)
    }

    /// Returns if the current `IsoDate` is a valid calendar date.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_valid_date(self.year, self.month.into(), self.day.into())
    }

    pub(crate) fn check_within_limits(&self) -> TemporalResult<()> {
        if !(MIN_EPOCH_DAYS..=MAX_EPOCH_DAYS).contains(&self.to_epoch_days()) {
            return Err(TemporalError::range().with_enum(ErrorMessage::DateOutOfRange));
        }
        Ok(())
    }

    /// Checks that the year and month lie between -271821-04 and 275760-09.
    pub(crate) fn check_year_month_within_limits(&self) -> TemporalResult<()> {
        let year_month = (self.year, self.month);
        if year_month < (-271_821, 4) || year_month > (275_760, 9) {
            return Err(TemporalError::range().with_enum(ErrorMessage::YearMonthOutOfRange));
        }
        Ok(())
    }

    /// Returns the resulting `IsoDate` from adding a provided `DateDuration` to this `IsoDate`
    ///
    /// Equivalent to `AddISODate`.
    pub(crate) fn add_date_duration(
        self,
        duration: &DateDuration,
        overflow: Overflow,
    ) -> TemporalResult<Self> {
        let (year, month) = balance_iso_year_month(
            i64::from(self.year) + duration.years as i64,
            i64::from(self.month) + duration.months as i64,
        );
        let year = i32::try_from(year)
            .map_err(|_| TemporalError::range().with_enum(ErrorMessage::DateOutOfRange))?;

        let intermediate = Self::regulate(year, month.into(), self.day.into(), overflow)?;

        let days = duration.days as i64 + 7 * duration.weeks as i64;
        Self::from_epoch_days(intermediate.to_epoch_days().saturating_add(days))
    }

    /// Computes the ISO calendar difference from this date to `other`.
    ///
    /// Equivalent to `DifferenceISODate`.
    pub(crate) fn diff_iso_date(&self, other: &Self, largest_unit: Unit) -> TemporalResult<DateDuration> {
        let sign = -(self.cmp(other) as i8);
        if sign == 0 {
            return Ok(DateDuration::default());
        }

        let mut years = 0;
        let mut months = 0;
        if largest_unit == Unit::Year || largest_unit == Unit::Month {
            // Starting next to the year difference saves iterating from zero.
            let mut candidate_years: i32 = other.year - self.year;
            if candidate_years != 0 {
                candidate_years -= i32::from(sign);
            }
            while !iso_date_surpasses(
                self.year + candidate_years,
                self.month.into(),
                self.day,
                other,
                sign,
            ) {
                years = candidate_years;
                candidate_years += i32::from(sign);
            }

            let mut candidate_months = i64::from(sign);
            let mut intermediate = balance_iso_year_month(
                i64::from(self.year + years),
                i64::from(self.month) + candidate_months,
            );
            while !iso_date_surpasses(
                intermediate.0 as i32,
                intermediate.1.into(),
                self.day,
                other,
                sign,
            ) {
                months = candidate_months;
                candidate_months += i64::from(sign);
                intermediate =
                    balance_iso_year_month(intermediate.0, i64::from(intermediate.1) + i64::from(sign));
            }

            if largest_unit == Unit::Month {
                months += i64::from(years) * 12;
                years = 0;
            }
        }

        let intermediate = balance_iso_year_month(
            i64::from(self.year + years),
            i64::from(self.month) + months,
        );
        let constrained = Self::regulate(
            intermediate.0 as i32,
            intermediate.1.into(),
            self.day.into(),
            Overflow::Constrain,
        )?;

        let days = other.to_epoch_days() - constrained.to_epoch_days();
        let (weeks, days) = if largest_unit == Unit::Week {
            (days / 7, days % 7)
        } else {
            (0, days)
        };

        #[cfg(feature = "log")]
        log::trace!("iso date difference: {years}y {months}m {weeks}w {days}d");

        Ok(DateDuration::new_unchecked(
            f64::from(years),
            months as f64,
            weeks as f64,
            days as f64,
        ))
    }
}

// ==== `IsoTime` section ====

/// An `IsoTime` record that contains `Temporal`'s
/// time slots.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoTime {
    pub hour: u8,         // 0..=23
    pub minute: u8,       // 0..=59
    pub second: u8,       // 0..=59
    pub millisecond: u16, // 0..=999
    pub microsecond: u16, // 0..=999
    pub nanosecond: u16,  // 0..=999
}

impl IsoTime {
    /// Creates a new `IsoTime` without any validation.
    pub(crate) const fn new_unchecked(
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
        microsecond: u16,
        nanosecond: u16,
    ) -> Self {
        Self {
            hour,
            minute,
            second,
            millisecond,
            microsecond,
            nanosecond,
        }
    }

    /// Creates a new regulated `IsoTime`.
    pub fn new(
        hour: i32,
        minute: i32,
        second: i32,
        millisecond: i32,
        microsecond: i32,
        nanosecond: i32,
        overflow: Overflow,
    ) -> TemporalResult<IsoTime> {
        match overflow {
            Overflow::Constrain => {
                let h = hour.clamp(0, 23) as u8;
                let min = minute.clamp(0, 59) as u8;
                let sec = second.clamp(0, 59) as u8;
                let milli = millisecond.clamp(0, 999) as u16;
                let micro = microsecond.clamp(0, 999) as u16;
                let nano = nanosecond.clamp(0, 999) as u16;
                Ok(Self::new_unchecked(h, min, sec, milli, micro, nano))
            }
            Overflow::Reject => {
                if !is_valid_time(hour, minute, second, millisecond, microsecond, nanosecond) {
                    return Err(TemporalError::range().with_message("IsoTime is not valid"));
                };
                Ok(Self::new_unchecked(
                    hour as u8,
                    minute as u8,
                    second as u8,
                    millisecond as u16,
                    microsecond as u16,
                    nanosecond as u16,
                ))
            }
        }
    }

    /// Creates a new `Time` with the fields provided from a `PartialTime`.
    #[inline]
    pub(crate) fn with(&self, partial: PartialTime, overflow: Overflow) -> TemporalResult<Self> {
        let hour = partial.hour.unwrap_or(self.hour);
        let minute = partial.minute.unwrap_or(self.minute);
        let second = partial.second.unwrap_or(self.second);
        let millisecond = partial.millisecond.unwrap_or(self.millisecond);
        let microsecond = partial.microsecond.unwrap_or(self.microsecond);
        let nanosecond = partial.nanosecond.unwrap_or(self.nanosecond);
        Self::new(
            hour.into(),
            minute.into(),
            second.into(),
            millisecond.into(),
            microsecond.into(),
            nanosecond.into(),
            overflow,
        )
    }

    /// Balances a nanosecond count into whole days and a wall-clock time.
    ///
    /// Equivalent to `BalanceTime`.
    pub(crate) fn balance(nanoseconds: i128) -> (i64, Self) {
        let day = i128::from(NS_PER_DAY);
        let days = nanoseconds.div_euclid(day);
        let mut remainder = nanoseconds.rem_euclid(day);

        let nanosecond = (remainder % 1000) as u16;
        remainder /= 1000;
        let microsecond = (remainder % 1000) as u16;
        remainder /= 1000;
        let millisecond = (remainder % 1000) as u16;
        remainder /= 1000;
        let second = (remainder % 60) as u8;
        remainder /= 60;
        let minute = (remainder % 60) as u8;
        let hour = (remainder / 60) as u8;

        (
            days as i64,
            Self::new_unchecked(hour, minute, second, millisecond, microsecond, nanosecond),
        )
    }

    /// Returns the nanoseconds elapsed since midnight.
    pub(crate) fn to_nanoseconds(&self) -> i64 {
        let minutes = i64::from(self.hour) * 60 + i64::from(self.minute);
        let seconds = minutes * 60 + i64::from(self.second);
        let millis = seconds * 1000 + i64::from(self.millisecond);
        let micros = millis * 1000 + i64::from(self.microsecond);
        micros * 1000 + i64::from(self.nanosecond)
    }

    /// Difference this `IsoTime` against another, returning `other - self`.
    ///
    /// Equivalent to `DifferenceTime`.
    pub(crate) fn diff(&self, other: &Self) -> NormalizedTimeDuration {
        NormalizedTimeDuration(i128::from(other.to_nanoseconds() - self.to_nanoseconds()))
    }

    /// Rounds the current `IsoTime` according to the provided settings,
    /// returning the day carry alongside the rounded time.
    pub(crate) fn round(
        &self,
        resolved_options: ResolvedRoundingOptions,
    ) -> TemporalResult<(i64, Self)> {
        let unit = resolved_options.smallest_unit;
        if !(unit.is_time_unit() || unit == Unit::Day) {
            return Err(TemporalError::range().with_enum(ErrorMessage::SmallestUnitNotTimeUnit));
        }
        let length = NonZeroU128::new(unit.as_nanoseconds().temporal_unwrap()?.into())
            .temporal_unwrap()?;
        let increment = resolved_options
            .increment
            .as_extended_increment()
            .checked_mul(length)
            .ok_or(TemporalError::range().with_message("increment exceeded valid range."))?;

        let rounded = IncrementRounder::<i128>::from_signed_num(
            i128::from(self.to_nanoseconds()),
            increment,
        )?
        .round(resolved_options.rounding_mode)?;

        Ok(Self::balance(rounded))
    }

    /// Checks if the time is a valid `IsoTime`
    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_valid_time(
            self.hour.into(),
            self.minute.into(),
            self.second.into(),
            self.millisecond.into(),
            self.microsecond.into(),
            self.nanosecond.into(),
        )
    }

    /// Adds a normalized time duration, returning the day carry alongside the
    /// resulting wall-clock time.
    ///
    /// Equivalent to `AddTime`.
    pub(crate) fn add(&self, norm: NormalizedTimeDuration) -> (i64, Self) {
        Self::balance(i128::from(self.to_nanoseconds()) + norm.0)
    }
}

// ==== `IsoDate` specific utiltiy functions ====

#[inline]
// Determines if the month and day are valid for the given year.
fn is_valid_date(year: i32, month: i32, day: i32) -> bool {
    if !(1..=12).contains(&month) {
        return false;
    }
    let days_in_month = i32::from(utils::iso_days_in_month(year, month as u8));
    (1..=days_in_month).contains(&day)
}

#[inline]
/// Returns whether the date `year-month-day` surpasses `other` in the direction of `sign`.
fn iso_date_surpasses(year: i32, month: i32, day: u8, other: &IsoDate, sign: i8) -> bool {
    let this = (year, month, i32::from(day));
    let other = (other.year, i32::from(other.month), i32::from(other.day));
    this.cmp(&other) as i8 * sign == 1
}

#[inline]
fn balance_iso_year_month(year: i64, month: i64) -> (i64, u8) {
    let y = year + (month - 1).div_euclid(12);
    let m = (month - 1).rem_euclid(12) + 1;
    (y, m as u8)
}

// ==== `IsoTime` specific utilities ====

#[inline]
fn is_valid_time(hour: i32, minute: i32, second: i32, ms: i32, mis: i32, ns: i32) -> bool {
    if !(0..=23).contains(&hour) {
        return false;
    }

    let min_sec = 0..=59;
    if !min_sec.contains(&minute) || !min_sec.contains(&second) {
        return false;
    }

    let sub_second = 0..=999;
    sub_second.contains(&ms) && sub_second.contains(&mis) && sub_second.contains(&ns)
}

#[cfg(test)]
mod tests {
    use super::{IsoDate, IsoDateTime, IsoTime};
    use crate::{
        builtins::core::duration::DateDuration,
        options::{Overflow, ResolvedRoundingOptions, RoundingIncrement, RoundingMode, Unit},
    };

    const MAX_DAYS_BASE: i64 = 100_000_000;

    #[test]
    fn icu4x_max_conversion_test() {
        let max = IsoDate::from_epoch_days(MAX_DAYS_BASE).unwrap();
        assert_eq!((max.year, max.month, max.day), (275_760, 9, 13));
        assert!(IsoDate::from_epoch_days(MAX_DAYS_BASE + 1).is_err());

        let min = IsoDate::from_epoch_days(-MAX_DAYS_BASE - 1).unwrap();
        assert_eq!((min.year, min.month, min.day), (-271_821, 4, 19));
        assert!(IsoDate::from_epoch_days(-MAX_DAYS_BASE - 2).is_err());
    }

    #[test]
    fn regulate_constrain_and_reject() {
        let constrained = IsoDate::new_with_overflow(2021, 2, 30, Overflow::Constrain).unwrap();
        assert_eq!((constrained.month, constrained.day), (2, 28));
        let constrained = IsoDate::new_with_overflow(2020, 13, 40, Overflow::Constrain).unwrap();
        assert_eq!((constrained.month, constrained.day), (12, 31));
        assert!(IsoDate::new_with_overflow(2021, 2, 30, Overflow::Reject).is_err());
        assert!(IsoDate::new_with_overflow(2021, 0, 1, Overflow::Reject).is_err());
        assert!(IsoDate::new_with_overflow(275_760, 9, 14, Overflow::Reject).is_err());
    }

    #[test]
    fn add_date_duration_clamps_month_end() {
        let date = IsoDate::new_unchecked(2021, 1, 31);
        let one_month = DateDuration::new_unchecked(0.0, 1.0, 0.0, 0.0);
        let result = date.add_date_duration(&one_month, Overflow::Constrain).unwrap();
        assert_eq!(result, IsoDate::new_unchecked(2021, 2, 28));
        assert!(date.add_date_duration(&one_month, Overflow::Reject).is_err());

        let mixed = DateDuration::new_unchecked(1.0, 13.0, 1.0, 1.0);
        let result = date.add_date_duration(&mixed, Overflow::Constrain).unwrap();
        assert_eq!(result, IsoDate::new_unchecked(2023, 3, 8));

        let back = DateDuration::new_unchecked(0.0, -2.0, 0.0, 0.0);
        let result = IsoDate::new_unchecked(2021, 3, 31)
            .add_date_duration(&back, Overflow::Constrain)
            .unwrap();
        assert_eq!(result, IsoDate::new_unchecked(2021, 1, 31));
    }

    #[test]
    fn diff_iso_date_units() {
        let one = IsoDate::new_unchecked(2021, 1, 31);
        let two = IsoDate::new_unchecked(2021, 3, 31);
        let diff = one.diff_iso_date(&two, Unit::Month).unwrap();
        assert_eq!(diff.fields(), [0.0, 2.0, 0.0, 0.0]);

        let diff = one.diff_iso_date(&two, Unit::Week).unwrap();
        assert_eq!(diff.fields(), [0.0, 0.0, 8.0, 3.0]);

        let one = IsoDate::new_unchecked(2019, 6, 15);
        let two = IsoDate::new_unchecked(2021, 3, 1);
        let diff = one.diff_iso_date(&two, Unit::Year).unwrap();
        assert_eq!(diff.fields(), [1.0, 8.0, 0.0, 14.0]);
        let diff = one.diff_iso_date(&two, Unit::Month).unwrap();
        assert_eq!(diff.fields(), [0.0, 20.0, 0.0, 14.0]);
        let diff = two.diff_iso_date(&one, Unit::Year).unwrap();
        assert_eq!(diff.fields(), [-1.0, -8.0, 0.0, -16.0]);
    }

    #[test]
    fn time_balance_and_add() {
        let (days, time) = IsoTime::balance(-1);
        assert_eq!(days, -1);
        assert_eq!(time, IsoTime::new_unchecked(23, 59, 59, 999, 999, 999));

        let midnight_minus_one = IsoTime::new_unchecked(23, 59, 59, 999, 999, 999);
        let (days, time) = midnight_minus_one.add(super::NormalizedTimeDuration(1));
        assert_eq!(days, 1);
        assert_eq!(time, IsoTime::default());
    }

    #[test]
    fn time_round_carries_days() {
        let time = IsoTime::new_unchecked(23, 59, 30, 0, 0, 0);
        let options = ResolvedRoundingOptions {
            largest_unit: Unit::Auto,
            smallest_unit: Unit::Minute,
            increment: RoundingIncrement::ONE,
            rounding_mode: RoundingMode::HalfExpand,
        };
        let (days, rounded) = time.round(options).unwrap();
        assert_eq!(days, 1);
        assert_eq!(rounded, IsoTime::default());

        let options = ResolvedRoundingOptions {
            smallest_unit: Unit::Hour,
            increment: RoundingIncrement::try_new(6).unwrap(),
            rounding_mode: RoundingMode::Floor,
            ..options
        };
        let (days, rounded) = time.round(options).unwrap();
        assert_eq!(days, 0);
        assert_eq!(rounded.hour, 18);
    }

    #[test]
    fn datetime_limits() {
        let min_date = IsoDate::new_unchecked(-271_821, 4, 19);
        let midnight = IsoTime::default();
        assert!(IsoDateTime::new(min_date, midnight).is_err());
        let after = IsoTime::new_unchecked(0, 0, 0, 0, 0, 1);
        assert!(IsoDateTime::new(min_date, after).is_ok());

        let max_date = IsoDate::new_unchecked(275_760, 9, 13);
        assert!(IsoDateTime::new(max_date, midnight).is_ok());
        let late = IsoTime::new_unchecked(23, 59, 59, 999, 999, 999);
        assert!(IsoDateTime::new(max_date, late).is_ok());
        let next = IsoDate::new_unchecked(275_760, 9, 14);
        assert!(IsoDateTime::new(next, midnight).is_err());
    }
}
