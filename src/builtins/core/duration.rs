//! This module implements `Duration` along with it's methods and components.

use crate::{
    builtins::core::PlainDate,
    error::ErrorMessage,
    iso::{IsoDateTime, IsoTime},
    options::{
        Overflow, ResolvedRoundingOptions, RoundingIncrement, RoundingMode, RoundingOptions, Unit,
    },
    parsers::parse_duration,
    rounding::round_to_increment,
    temporal_assert, Sign, TemporalError, TemporalResult, TemporalUnwrap, NS_PER_DAY,
};
use core::str::FromStr;
use core_maths::CoreFloat;
use normalized::{NormalizedDurationRecord, NormalizedTimeDuration, MAX_TIME_DURATION};

mod date;
pub(crate) mod normalized;
mod time;


#[doc(inline)]
pub use date::DateDuration;
#[doc(inline)]
pub use time::TimeDuration;

/// The upper bound (exclusive) on the magnitude of years, months and weeks.
const MAX_CALENDAR_UNIT_VALUE: f64 = 4_294_967_296.0;

/// The units of a duration's fields, in field order.
const FIELD_UNITS: [Unit; 10] = [
    Unit::Year,
    Unit::Month,
    Unit::Week,
    Unit::Day,
    Unit::Hour,
    Unit::Minute,
    Unit::Second,
    Unit::Millisecond,
    Unit::Microsecond,
    Unit::Nanosecond,
];

/// A `PartialDuration` is a Duration that may have fields not set.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct PartialDuration {
    /// A potentially existent `years` field.
    pub years: Option<f64>,
    /// A potentially existent `months` field.
    pub months: Option<f64>,
    /// A potentially existent `weeks` field.
    pub weeks: Option<f64>,
    /// A potentially existent `days` field.
    pub days: Option<f64>,
    /// A potentially existent `hours` field.
    pub hours: Option<f64>,
    /// A potentially existent `minutes` field.
    pub minutes: Option<f64>,
    /// A potentially existent `seconds` field.
    pub seconds: Option<f64>,
    /// A potentially existent `milliseconds` field.
    pub milliseconds: Option<f64>,
    /// A potentially existent `microseconds` field.
    pub microseconds: Option<f64>,
    /// A potentially existent `nanoseconds` field.
    pub nanoseconds: Option<f64>,
}

impl PartialDuration {
    /// Returns whether no field is set.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// The native Rust implementation of `Temporal.Duration`.
///
/// `Duration` is made up of a `DateDuration` and `TimeDuration` as primarily
/// defined by Abtract Operation 7.5.1-5.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Duration {
    date: DateDuration,
    time: TimeDuration,
}

// ==== Private Creation methods ====

impl Duration {
    /// Creates a new `Duration` from a `DateDuration` and `TimeDuration`.
    #[inline]
    pub(crate) const fn new_unchecked(date: DateDuration, time: TimeDuration) -> Self {
        Self { date, time }
    }

    /// Creates a validated `Duration` from its date and time parts.
    fn from_parts(date: DateDuration, time: TimeDuration) -> TemporalResult<Self> {
        let result = Self::new_unchecked(date, time);
        is_valid_duration(&result.fields())?;
        Ok(result)
    }

    /// Returns the unit of the first non-zero field, or `Nanosecond` for a
    /// zero duration.
    ///
    /// Equivalent: 7.5.20 `DefaultTemporalLargestUnit ( duration )`
    pub(crate) fn default_largest_unit(&self) -> Unit {
        self.fields()
            .iter()
            .zip(FIELD_UNITS)
            .find(|(value, _)| **value != 0.0)
            .map_or(Unit::Nanosecond, |(_, unit)| unit)
    }

    /// Returns the difference from `relative_to` at midnight to the point
    /// this duration reaches from it, measured at `largest_unit`.
    fn relative_record(
        &self,
        relative_to: &PlainDate,
        largest_unit: Unit,
    ) -> TemporalResult<NormalizedDurationRecord> {
        let (day_carry, time) = IsoTime::default().add(self.time.to_normalized());
        let date = DateDuration::new(
            self.years(),
            self.months(),
            self.weeks(),
            self.days() + day_carry as f64,
        )?;
        let target = relative_to.add_date_duration(&date, Overflow::Constrain)?;

        let start = IsoDateTime::new_unchecked(relative_to.iso, IsoTime::default());
        let end = IsoDateTime::new(target.iso, time)?;
        start.diff(&end, relative_to.calendar(), largest_unit)
    }

    /// Rounds a difference record under `resolved`, returning the rounded
    /// duration along with the unrounded total in the smallest unit.
    ///
    /// The record is first unbalanced down to the largest unit, then rounded
    /// at the smallest unit. Year, month and week rounding steps the
    /// calendar one unit at a time from `relative_to`. The result is then
    /// balanced back up through the time units and, for calendar largest
    /// units, through the calendar.
    pub(crate) fn round_relative(
        record: NormalizedDurationRecord,
        resolved: ResolvedRoundingOptions,
        relative_to: Option<&PlainDate>,
    ) -> TemporalResult<(Self, f64)> {
        let largest_unit = resolved.largest_unit;
        let date = unbalance_date_duration(record.date, largest_unit, relative_to)?;

        let (date, norm, total) = if resolved.smallest_unit.is_date_unit() {
            let (date, total) = round_date_units(date, record.norm, resolved, relative_to)?;
            (date, NormalizedTimeDuration::default(), total)
        } else {
            round_time_units(date, record.norm, resolved)?
        };

        let (days, time) =
            TimeDuration::from_normalized(norm.add_days(date.days as i64)?, largest_unit)?;
        let date = DateDuration::new(date.years, date.months, date.weeks, days as f64)?;
        let date = balance_date_duration_relative(date, resolved, relative_to)?;

        Ok((Self::from_parts(date, time)?, total))
    }
}

// ==== Public Duration API ====

impl Duration {
    /// Creates a new validated `Duration`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        years: f64,
        months: f64,
        weeks: f64,
        days: f64,
        hours: f64,
        minutes: f64,
        seconds: f64,
        milliseconds: f64,
        microseconds: f64,
        nanoseconds: f64,
    ) -> TemporalResult<Self> {
        Self::from_parts(
            DateDuration::new_unchecked(years, months, weeks, days),
            TimeDuration::new_unchecked(
                hours,
                minutes,
                seconds,
                milliseconds,
                microseconds,
                nanoseconds,
            ),
        )
    }

    /// Creates a `Duration` from a provided `PartialDuration`, with absent
    /// fields as zero.
    pub fn from_partial(partial: &PartialDuration) -> TemporalResult<Self> {
        if partial.is_empty() {
            return Err(TemporalError::r#type().with_enum(ErrorMessage::EmptyPartial));
        }

        Self::new(
            partial.years.unwrap_or_default(),
            partial.months.unwrap_or_default(),
            partial.weeks.unwrap_or_default(),
            partial.days.unwrap_or_default(),
            partial.hours.unwrap_or_default(),
            partial.minutes.unwrap_or_default(),
            partial.seconds.unwrap_or_default(),
            partial.milliseconds.unwrap_or_default(),
            partial.microseconds.unwrap_or_default(),
            partial.nanoseconds.unwrap_or_default(),
        )
    }

    /// Balances a day count and time duration up to `largest_unit`.
    ///
    /// `largest_unit` must be day or finer, since carrying into weeks,
    /// months or years needs a calendar.
    pub fn balance(days: f64, time: TimeDuration, largest_unit: Unit) -> TemporalResult<Self> {
        if largest_unit == Unit::Auto || largest_unit.is_calendar_unit() {
            return Err(TemporalError::range().with_enum(ErrorMessage::UnitNotAllowed));
        }
        let mut fields = [0.0; 10];
        fields[3] = days;
        fields[4..].copy_from_slice(&time.fields());
        is_valid_duration(&fields)?;

        let norm = time.to_normalized().add_days(days as i64)?;
        let (days, time) = TimeDuration::from_normalized(norm, largest_unit)?;
        Ok(Self::new_unchecked(
            DateDuration::new_unchecked(0.0, 0.0, 0.0, days as f64),
            time,
        ))
    }
}

// ==== Public `Duration` Getters/Setters ====

impl Duration {
    /// Returns a reference to the inner `TimeDuration`
    #[inline]
    #[must_use]
    pub fn time(&self) -> &TimeDuration {
        &self.time
    }

    /// Returns a reference to the inner `DateDuration`
    #[inline]
    #[must_use]
    pub fn date(&self) -> &DateDuration {
        &self.date
    }

    /// Returns all the `Duration`'s fields from years to nanoseconds.
    #[inline]
    #[must_use]
    pub fn fields(&self) -> [f64; 10] {
        let date = self.date.fields();
        let time = self.time.fields();
        [
            date[0], date[1], date[2], date[3], time[0], time[1], time[2], time[3], time[4],
            time[5],
        ]
    }

    /// Returns the `years` field of duration.
    #[inline]
    #[must_use]
    pub const fn years(&self) -> f64 {
        self.date.years
    }

    /// Returns the `months` field of duration.
    #[inline]
    #[must_use]
    pub const fn months(&self) -> f64 {
        self.date.months
    }

    /// Returns the `weeks` field of duration.
    #[inline]
    #[must_use]
    pub const fn weeks(&self) -> f64 {
        self.date.weeks
    }

    /// Returns the `days` field of duration.
    #[inline]
    #[must_use]
    pub const fn days(&self) -> f64 {
        self.date.days
    }

    /// Returns the `hours` field of duration.
    #[inline]
    #[must_use]
    pub const fn hours(&self) -> f64 {
        self.time.hours
    }

    /// Returns the `minutes` field of duration.
    #[inline]
    #[must_use]
    pub const fn minutes(&self) -> f64 {
        self.time.minutes
    }

    /// Returns the `seconds` field of duration.
    #[inline]
    #[must_use]
    pub const fn seconds(&self) -> f64 {
        self.time.seconds
    }

    /// Returns the `milliseconds` field of duration.
    #[inline]
    #[must_use]
    pub const fn milliseconds(&self) -> f64 {
        self.time.milliseconds
    }

    /// Returns the `microseconds` field of duration.
    #[inline]
    #[must_use]
    pub const fn microseconds(&self) -> f64 {
        self.time.microseconds
    }

    /// Returns the `nanoseconds` field of duration.
    #[inline]
    #[must_use]
    pub const fn nanoseconds(&self) -> f64 {
        self.time.nanoseconds
    }
}

// ==== Public Duration methods ====

impl Duration {
    /// Determines the sign for the current self.
    #[inline]
    #[must_use]
    pub fn sign(&self) -> Sign {
        duration_sign(&self.fields())
    }

    /// Returns whether the current `Duration` is zero.
    ///
    /// Equivalant to `Temporal.Duration.blank()`.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.sign() == Sign::Zero
    }

    /// Returns a negated `Duration`
    #[inline]
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            date: self.date.negated(),
            time: self.time.negated(),
        }
    }

    /// Returns the absolute value of `Duration`.
    #[inline]
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            date: self.date.abs(),
            time: self.time.abs(),
        }
    }

    /// Returns the result of adding a `Duration` to the current `Duration`
    ///
    /// Both durations must be free of years, months and weeks. The sum is
    /// balanced up to the larger of the two default largest units.
    pub fn add(&self, other: &Self) -> TemporalResult<Self> {
        // 1. Let largestUnit1 be DefaultTemporalLargestUnit(duration).
        let largest_one = self.default_largest_unit();
        // 2. Let largestUnit2 be DefaultTemporalLargestUnit(other).
        let largest_two = other.default_largest_unit();
        // 3. Let largestUnit be LargerOfTwoUnits(largestUnit1, largestUnit2).
        let largest_unit = largest_one.max(largest_two);
        // 4. If IsCalendarUnit(largestUnit) is true, throw a RangeError exception.
        if largest_unit.is_calendar_unit() {
            return Err(TemporalError::range().with_enum(ErrorMessage::CalendarUnitsNotAllowed));
        }
        // 5. Let norm1 be ToNormalizedTimeDuration(duration), with days as 24 hours.
        let norm_one = self.time.to_normalized().add_days(self.days() as i64)?;
        // 6. Let norm2 be ToNormalizedTimeDuration(other), with days as 24 hours.
        let norm_two = other.time.to_normalized().add_days(other.days() as i64)?;
        // 7. Let normResult be ? AddNormalizedTimeDuration(norm1, norm2).
        let norm = norm_one.checked_add(&norm_two)?;
        // 8. Let result be ? BalanceTimeDuration(normResult, largestUnit).
        let (days, time) = TimeDuration::from_normalized(norm, largest_unit)?;
        Self::from_parts(DateDuration::new_unchecked(0.0, 0.0, 0.0, days as f64), time)
    }

    /// Returns the result of subtracting a `Duration` from the current `Duration`
    #[inline]
    pub fn subtract(&self, other: &Self) -> TemporalResult<Self> {
        self.add(&other.negated())
    }

    /// Rounds the current `Duration` under `options`.
    ///
    /// `relative_to` anchors years, months and weeks to the calendar. Without
    /// it, days count as 24 hours and calendar units are rejected.
    pub fn round(
        &self,
        options: RoundingOptions,
        relative_to: Option<&PlainDate>,
    ) -> TemporalResult<Self> {
        let resolved =
            ResolvedRoundingOptions::from_duration_options(options, self.default_largest_unit())?;

        let record = match relative_to {
            Some(relative_to) => self.relative_record(relative_to, resolved.largest_unit)?,
            None => {
                if !self.date.has_no_calendar_units() || resolved.largest_unit.is_calendar_unit()
                {
                    return Err(TemporalError::range().with_enum(ErrorMessage::RelativeToRequired));
                }
                let norm = self.time.to_normalized().add_days(self.days() as i64)?;
                NormalizedDurationRecord::new(DateDuration::default(), norm)?
            }
        };

        Ok(Self::round_relative(record, resolved, relative_to)?.0)
    }

    /// Returns the fractional quantity of `unit` this `Duration` spans.
    pub fn total(&self, unit: Unit, relative_to: Option<&PlainDate>) -> TemporalResult<f64> {
        if unit == Unit::Auto {
            return Err(TemporalError::range().with_enum(ErrorMessage::UnitNotAllowed));
        }

        match relative_to {
            Some(relative_to) => {
                let record = self.relative_record(relative_to, unit)?;
                let resolved = ResolvedRoundingOptions {
                    largest_unit: unit,
                    smallest_unit: unit,
                    increment: RoundingIncrement::ONE,
                    rounding_mode: RoundingMode::Trunc,
                };
                Ok(Self::round_relative(record, resolved, Some(relative_to))?.1)
            }
            None => {
                if !self.date.has_no_calendar_units() || unit.is_calendar_unit() {
                    return Err(TemporalError::range().with_enum(ErrorMessage::RelativeToRequired));
                }
                let norm = self.time.to_normalized().add_days(self.days() as i64)?;
                let unit_ns = unit.as_nanoseconds().temporal_unwrap()?;
                Ok(norm.divide(unit_ns))
            }
        }
    }
}

// ==== Relative rounding steps ====

fn require_relative_to(relative_to: Option<&PlainDate>) -> TemporalResult<&PlainDate> {
    relative_to.ok_or(TemporalError::range().with_enum(ErrorMessage::RelativeToRequired))
}

/// Returns the number of days from `relative_to` to `relative_to + duration`.
fn days_until(relative_to: &PlainDate, duration: &DateDuration) -> TemporalResult<f64> {
    let later = relative_to.add_date_duration(duration, Overflow::Constrain)?;
    Ok((later.iso.to_epoch_days() - relative_to.iso.to_epoch_days()) as f64)
}

/// Folds every unit above `largest_unit` into the next unit at or below it.
///
/// Equivalent: 7.5.29 `UnbalanceDateDurationRelative`
fn unbalance_date_duration(
    date: DateDuration,
    largest_unit: Unit,
    relative_to: Option<&PlainDate>,
) -> TemporalResult<DateDuration> {
    match largest_unit {
        Unit::Year => Ok(date),
        Unit::Month => {
            if date.years == 0.0 {
                return Ok(date);
            }
            let relative_to = require_relative_to(relative_to)?;
            let years = DateDuration::new_unchecked(date.years, 0.0, 0.0, 0.0);
            let later = relative_to.add_date_duration(&years, Overflow::Constrain)?;
            let months = relative_to.internal_diff_date(&later, Unit::Month)?.months;
            Ok(DateDuration::new_unchecked(
                0.0,
                date.months + months,
                date.weeks,
                date.days,
            ))
        }
        Unit::Week => {
            if date.years == 0.0 && date.months == 0.0 {
                return Ok(date);
            }
            let relative_to = require_relative_to(relative_to)?;
            let years_months = DateDuration::new_unchecked(date.years, date.months, 0.0, 0.0);
            let days = days_until(relative_to, &years_months)?;
            Ok(DateDuration::new_unchecked(
                0.0,
                0.0,
                date.weeks,
                date.days + days,
            ))
        }
        _ => {
            if date.has_no_calendar_units() {
                return Ok(date);
            }
            let relative_to = require_relative_to(relative_to)?;
            let calendar_units = DateDuration::new_unchecked(date.years, date.months, date.weeks, 0.0);
            let days = days_until(relative_to, &calendar_units)?;
            Ok(DateDuration::new_unchecked(0.0, 0.0, 0.0, date.days + days))
        }
    }
}

/// Steps from `relative_to + base` one `unit` at a time while the remaining
/// `days` cover a whole step, returning the fractional count of `unit`.
///
/// Each step is measured from `relative_to` so that month-end clamping does
/// not accumulate across steps.
fn step_fractional_units(
    relative_to: &PlainDate,
    base: DateDuration,
    unit: Unit,
    days: f64,
) -> TemporalResult<f64> {
    let offset = |count: f64| match unit {
        Unit::Year => DateDuration::new_unchecked(base.years + count, 0.0, 0.0, 0.0),
        Unit::Month => DateDuration::new_unchecked(base.years, base.months + count, 0.0, 0.0),
        _ => DateDuration::new_unchecked(base.years, base.months, base.weeks + count, 0.0),
    };
    let base_units = match unit {
        Unit::Year => base.years,
        Unit::Month => base.months,
        _ => base.weeks,
    };

    let sign = if days < 0.0 { -1.0 } else { 1.0 };
    let mut stepped = 0.0;
    let mut remaining = days;
    let mut anchor = days_until(relative_to, &offset(stepped))?;
    loop {
        let next = days_until(relative_to, &offset(stepped + sign))?;
        let step_days = next - anchor;
        temporal_assert!(
            step_days != 0.0,
            "a {unit} step from {relative_to:?} covered no days"
        );
        if remaining.abs() < step_days.abs() {
            #[cfg(feature = "log")]
            log::trace!(
                "stepped {stepped} {unit}s from {base_units}; {remaining} of {step_days} days remain"
            );
            return Ok(base_units + stepped + remaining / step_days.abs());
        }
        remaining -= step_days;
        stepped += sign;
        anchor = next;
    }
}

/// Rounds at a date smallest unit, zeroing everything below it.
///
/// Equivalent: 7.5.36 `RoundDuration`, date unit section.
fn round_date_units(
    date: DateDuration,
    norm: NormalizedTimeDuration,
    resolved: ResolvedRoundingOptions,
    relative_to: Option<&PlainDate>,
) -> TemporalResult<(DateDuration, f64)> {
    let fractional_days = date.days + norm.as_fractional_days();
    let round = |total: f64| round_to_increment(total, resolved.increment, resolved.rounding_mode);

    match resolved.smallest_unit {
        Unit::Year => {
            let relative_to = require_relative_to(relative_to)?;
            let years = DateDuration::new_unchecked(date.years, 0.0, 0.0, 0.0);
            let years_months_weeks =
                DateDuration::new_unchecked(date.years, date.months, date.weeks, 0.0);
            let months_weeks_in_days =
                days_until(relative_to, &years_months_weeks)? - days_until(relative_to, &years)?;
            let total = step_fractional_units(
                relative_to,
                years,
                Unit::Year,
                fractional_days + months_weeks_in_days,
            )?;
            Ok((DateDuration::new_unchecked(round(total)?, 0.0, 0.0, 0.0), total))
        }
        Unit::Month => {
            let relative_to = require_relative_to(relative_to)?;
            let years_months = DateDuration::new_unchecked(date.years, date.months, 0.0, 0.0);
            let years_months_weeks =
                DateDuration::new_unchecked(date.years, date.months, date.weeks, 0.0);
            let weeks_in_days = days_until(relative_to, &years_months_weeks)?
                - days_until(relative_to, &years_months)?;
            let total = step_fractional_units(
                relative_to,
                years_months,
                Unit::Month,
                fractional_days + weeks_in_days,
            )?;
            Ok((
                DateDuration::new_unchecked(date.years, round(total)?, 0.0, 0.0),
                total,
            ))
        }
        Unit::Week => {
            let relative_to = require_relative_to(relative_to)?;
            let total = step_fractional_units(relative_to, date, Unit::Week, fractional_days)?;
            Ok((
                DateDuration::new_unchecked(date.years, date.months, round(total)?, 0.0),
                total,
            ))
        }
        _ => Ok((
            DateDuration::new_unchecked(
                date.years,
                date.months,
                date.weeks,
                round(fractional_days)?,
            ),
            fractional_days,
        )),
    }
}

/// Rounds at a time smallest unit. Days fold into the time part when the
/// largest unit is itself a time unit.
fn round_time_units(
    date: DateDuration,
    norm: NormalizedTimeDuration,
    resolved: ResolvedRoundingOptions,
) -> TemporalResult<(DateDuration, NormalizedTimeDuration, f64)> {
    let (date, norm) = if resolved.largest_unit.is_time_unit() {
        (DateDuration::default(), norm.add_days(date.days as i64)?)
    } else {
        (date, norm)
    };

    let unit_ns = resolved.smallest_unit.as_nanoseconds().temporal_unwrap()?;
    let total = norm.divide(unit_ns);
    let norm = norm.round(resolved.increment_nanoseconds()?, resolved.rounding_mode)?;
    Ok((date, norm, total))
}

/// Carries rounded units upward through the calendar, so that for example 12
/// rounded months become a year under a largest unit of year.
///
/// A unit only carries once it covers the full span of the next larger unit
/// from `relative_to`. Rounded months and years never fall back into days.
///
/// Equivalent: 7.5.30 `BalanceDateDurationRelative`
fn balance_date_duration_relative(
    date: DateDuration,
    resolved: ResolvedRoundingOptions,
    relative_to: Option<&PlainDate>,
) -> TemporalResult<DateDuration> {
    let largest_unit = resolved.largest_unit;
    let smallest_unit = resolved.smallest_unit;
    if !largest_unit.is_calendar_unit() || date.is_zero() {
        return Ok(date);
    }
    // Weeks do not survive a month or year balance.
    if smallest_unit == Unit::Week && largest_unit != Unit::Week {
        return Ok(date);
    }
    let relative_to = require_relative_to(relative_to)?;
    let sign = f64::from(date.sign().as_sign_multiplier());
    let mut date = date;

    if smallest_unit <= Unit::Day && date.days != 0.0 {
        if largest_unit == Unit::Week {
            let week_anchor = DateDuration::new_unchecked(date.years, date.months, date.weeks, 0.0);
            let anchor = relative_to.add_date_duration(&week_anchor, Overflow::Constrain)?;
            let days_in_week = f64::from(relative_to.calendar().days_in_week(&anchor.iso));
            let weeks = (date.days / days_in_week).trunc();
            date.weeks += weeks;
            date.days -= weeks * days_in_week;
        } else {
            loop {
                let current =
                    DateDuration::new_unchecked(date.years, date.months, date.weeks, 0.0);
                let next =
                    DateDuration::new_unchecked(date.years, date.months + sign, date.weeks, 0.0);
                let month_days =
                    days_until(relative_to, &next)? - days_until(relative_to, &current)?;
                if date.days.abs() < month_days.abs() {
                    break;
                }
                date.days -= month_days;
                date.months += sign;
            }
        }
    }

    if largest_unit == Unit::Year && smallest_unit < Unit::Year {
        loop {
            let years = DateDuration::new_unchecked(date.years, 0.0, 0.0, 0.0);
            let anchor = relative_to.add_date_duration(&years, Overflow::Constrain)?;
            let months_in_year = f64::from(relative_to.calendar().months_in_year(&anchor.iso));
            if date.months.abs() < months_in_year {
                break;
            }
            date.months -= sign * months_in_year;
            date.years += sign;
        }
    }

    Ok(date)
}

// ==== Duration validation ====

/// Validates that every field is finite and integral, that the fields agree
/// in sign, and that the duration lies within the representable range.
///
/// Equivalent: 7.5.16 `IsValidDuration ( years, months, weeks, days, hours, minutes, seconds, milliseconds, microseconds, nanoseconds )`
pub(crate) fn is_valid_duration(fields: &[f64; 10]) -> TemporalResult<()> {
    for value in fields {
        if !value.is_finite() {
            return Err(TemporalError::range().with_enum(ErrorMessage::NumberNotFinite));
        }
        if value.trunc() != *value {
            return Err(TemporalError::range().with_enum(ErrorMessage::NumberNotIntegral));
        }
    }

    let sign = duration_sign(fields);
    if fields.iter().any(|value| {
        let value_sign = Sign::from_f64(*value);
        value_sign != Sign::Zero && value_sign != sign
    }) {
        return Err(TemporalError::range().with_enum(ErrorMessage::MixedSignDuration));
    }

    if fields[..3]
        .iter()
        .any(|value| value.abs() >= MAX_CALENDAR_UNIT_VALUE)
    {
        return Err(TemporalError::range().with_enum(ErrorMessage::DurationOutOfRange));
    }

    let out_of_range = || TemporalError::range().with_enum(ErrorMessage::DurationOutOfRange);
    let unit_nanoseconds: [i128; 7] = [
        i128::from(NS_PER_DAY),
        3_600_000_000_000,
        60_000_000_000,
        1_000_000_000,
        1_000_000,
        1_000,
        1,
    ];
    let mut total: i128 = 0;
    for (value, unit_ns) in fields[3..].iter().zip(unit_nanoseconds) {
        total = (*value as i128)
            .checked_mul(unit_ns)
            .and_then(|ns| total.checked_add(ns))
            .ok_or_else(out_of_range)?;
    }
    if total.unsigned_abs() > MAX_TIME_DURATION as u128 {
        return Err(out_of_range());
    }

    Ok(())
}

/// Returns the sign of the first non-zero field.
///
/// Equivalent: 7.5.17 `DurationSign ( years, months, weeks, days, hours, minutes, seconds, milliseconds, microseconds, nanoseconds )`
#[inline]
#[must_use]
pub(crate) fn duration_sign(fields: &[f64]) -> Sign {
    fields
        .iter()
        .map(|value| Sign::from_f64(*value))
        .find(|sign| *sign != Sign::Zero)
        .unwrap_or(Sign::Zero)
}

impl From<TimeDuration> for Duration {
    fn from(value: TimeDuration) -> Self {
        Self {
            time: value,
            date: DateDuration::default(),
        }
    }
}

impl From<DateDuration> for Duration {
    fn from(value: DateDuration) -> Self {
        Self {
            date: value,
            time: TimeDuration::default(),
        }
    }
}

// ==== FromStr trait impl ====

impl FromStr for Duration {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_duration(s)
    }
}
