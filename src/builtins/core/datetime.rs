//! This module implements `DateTime` any directly related algorithms.

use core::{cmp::Ordering, str::FromStr};

use crate::{
    builtins::core::{
        calendar::{Calendar, MonthCode},
        duration::{DateDuration, TimeDuration},
        Duration, PartialDate, PartialTime, PlainDate, PlainTime,
    },
    error::ErrorMessage,
    iso::{IsoDate, IsoDateTime, IsoTime},
    options::{
        DifferenceOperation, DifferenceSettings, Overflow, ResolvedRoundingOptions,
        RoundingOptions, Unit, UnitGroup,
    },
    parsers::parse_date_time,
    Sign, TemporalError, TemporalResult,
};

/// A partial PlainDateTime record
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PartialDateTime {
    /// The `PartialDate` portion of a `PartialDateTime`
    pub date: PartialDate,
    /// The `PartialTime` portion of a `PartialDateTime`
    pub time: PartialTime,
}

impl PartialDateTime {
    /// Returns whether neither the date nor the time part has a field set.
    pub fn is_empty(&self) -> bool {
        self.date.is_empty() && self.time.is_empty()
    }
}

/// The native Rust implementation of `Temporal.PlainDateTime`
#[non_exhaustive]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PlainDateTime {
    pub(crate) iso: IsoDateTime,
    calendar: Calendar,
}

// ==== Private PlainDateTime API ====

impl PlainDateTime {
    /// Creates a new unchecked `DateTime`.
    #[inline]
    #[must_use]
    pub(crate) fn new_unchecked(iso: IsoDateTime, calendar: Calendar) -> Self {
        Self { iso, calendar }
    }

    /// Adds the time part first, then carries its whole days into the
    /// calendar addition of the date part.
    ///
    /// Equivalent to `AddDurationToOrSubtractDurationFromPlainDateTime`.
    fn add_or_subtract_duration(
        &self,
        duration: &Duration,
        overflow: Option<Overflow>,
    ) -> TemporalResult<Self> {
        let (day_carry, time) = self.iso.time.add(duration.time().to_normalized());
        let date = duration.date();
        let date_duration =
            DateDuration::new(date.years, date.months, date.weeks, date.days + day_carry as f64)?;

        let result_date =
            self.calendar
                .date_add(&self.iso.date, &date_duration, overflow.unwrap_or_default())?;

        Ok(Self::new_unchecked(
            IsoDateTime::new(result_date, time)?,
            self.calendar.clone(),
        ))
    }

    /// Difference two `DateTime`s together.
    pub(crate) fn diff(
        &self,
        op: DifferenceOperation,
        other: &Self,
        settings: DifferenceSettings,
    ) -> TemporalResult<Duration> {
        self.calendar.check_same(other.calendar())?;

        let (sign, resolved) = ResolvedRoundingOptions::from_diff_settings(
            settings,
            op,
            UnitGroup::DATETIME,
            Unit::Day,
            Unit::Nanosecond,
        )?;

        if self.iso == other.iso {
            return Ok(Duration::default());
        }

        let record = self.iso.diff(&other.iso, &self.calendar, resolved.largest_unit)?;

        let result = if resolved.is_noop() {
            let (days, time) = TimeDuration::from_normalized(record.norm, resolved.largest_unit)?;
            let mut date = record.date;
            date.days += days as f64;
            Duration::new_unchecked(date, time)
        } else {
            Duration::round_relative(record, resolved, Some(&self.to_plain_date()))?.0
        };

        match sign {
            Sign::Negative => Ok(result.negated()),
            _ => Ok(result),
        }
    }
}

// ==== Public PlainDateTime API ====

impl PlainDateTime {
    /// Creates a new `DateTime`, constraining any arguments that are invalid
    /// into a valid range.
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
        microsecond: u16,
        nanosecond: u16,
        calendar: Calendar,
    ) -> TemporalResult<Self> {
        Self::new_with_overflow(
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
            microsecond,
            nanosecond,
            calendar,
            Overflow::Constrain,
        )
    }

    /// Creates a new `DateTime`, rejecting any arguments that are not in a valid range.
    ///
    /// ```rust
    /// use temporal_engine::{Calendar, PlainDateTime};
    ///
    /// let valid = PlainDateTime::try_new(2021, 3, 31, 12, 30, 0, 0, 0, 0, Calendar::default());
    /// assert!(valid.is_ok());
    ///
    /// let invalid = PlainDateTime::try_new(2021, 3, 31, 24, 0, 0, 0, 0, 0, Calendar::default());
    /// assert!(invalid.is_err());
    /// ```
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
        microsecond: u16,
        nanosecond: u16,
        calendar: Calendar,
    ) -> TemporalResult<Self> {
        Self::new_with_overflow(
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
            microsecond,
            nanosecond,
            calendar,
            Overflow::Reject,
        )
    }

    /// Creates a new `DateTime` with the provided [`Overflow`] option.
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub fn new_with_overflow(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
        microsecond: u16,
        nanosecond: u16,
        calendar: Calendar,
        overflow: Overflow,
    ) -> TemporalResult<Self> {
        let date = IsoDate::regulate(year, month.into(), day.into(), overflow)?;
        let time = IsoTime::new(
            hour.into(),
            minute.into(),
            second.into(),
            millisecond.into(),
            microsecond.into(),
            nanosecond.into(),
            overflow,
        )?;
        Ok(Self::new_unchecked(IsoDateTime::new(date, time)?, calendar))
    }

    /// Creates a `PlainDateTime` from a `PartialDateTime`.
    pub fn from_partial(
        partial: PartialDateTime,
        calendar: Option<Calendar>,
        overflow: Option<Overflow>,
    ) -> TemporalResult<Self> {
        if partial.is_empty() {
            return Err(TemporalError::r#type().with_enum(ErrorMessage::EmptyPartial));
        }
        let overflow = overflow.unwrap_or_default();
        let calendar = calendar.unwrap_or_default();
        let date = calendar.date_from_fields(&partial.date, overflow)?;
        let time = IsoTime::default().with(partial.time, overflow)?;
        Ok(Self::new_unchecked(IsoDateTime::new(date, time)?, calendar))
    }

    /// Creates a new `DateTime` with the fields of a `PartialDateTime` merged
    /// over the current fields.
    pub fn with(&self, partial: PartialDateTime, overflow: Option<Overflow>) -> TemporalResult<Self> {
        if partial.is_empty() {
            return Err(TemporalError::r#type().with_enum(ErrorMessage::EmptyPartial));
        }
        let overflow = overflow.unwrap_or_default();

        let fields = self
            .calendar
            .merge_fields(&self.calendar.to_fields(&self.iso.date), &partial.date);
        let date = self.calendar.date_from_fields(&fields, overflow)?;
        let time = self.iso.time.with(partial.time, overflow)?;

        Ok(Self::new_unchecked(
            IsoDateTime::new(date, time)?,
            self.calendar.clone(),
        ))
    }

    /// Creates a new `DateTime` from the current `DateTime` and the provided `Time`.
    pub fn with_time(&self, time: Option<PlainTime>) -> TemporalResult<Self> {
        let time = time.unwrap_or_default();
        Ok(Self::new_unchecked(
            IsoDateTime::new(self.iso.date, time.iso)?,
            self.calendar.clone(),
        ))
    }

    /// Creates a new `DateTime` from the current `DateTime` and a provided `Calendar`.
    #[must_use]
    pub fn with_calendar(&self, calendar: Calendar) -> Self {
        Self::new_unchecked(self.iso, calendar)
    }

    /// Returns this `Date`'s ISO year value.
    #[inline]
    #[must_use]
    pub const fn iso_year(&self) -> i32 {
        self.iso.date.year
    }

    /// Returns this `Date`'s ISO month value.
    #[inline]
    #[must_use]
    pub const fn iso_month(&self) -> u8 {
        self.iso.date.month
    }

    /// Returns this `Date`'s ISO day value.
    #[inline]
    #[must_use]
    pub const fn iso_day(&self) -> u8 {
        self.iso.date.day
    }

    /// Returns the hour value
    #[inline]
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.iso.time.hour
    }

    /// Returns the minute value
    #[inline]
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.iso.time.minute
    }

    /// Returns the second value
    #[inline]
    #[must_use]
    pub const fn second(&self) -> u8 {
        self.iso.time.second
    }

    /// Returns the `millisecond` value
    #[inline]
    #[must_use]
    pub const fn millisecond(&self) -> u16 {
        self.iso.time.millisecond
    }

    /// Returns the `microsecond` value
    #[inline]
    #[must_use]
    pub const fn microsecond(&self) -> u16 {
        self.iso.time.microsecond
    }

    /// Returns the `nanosecond` value
    #[inline]
    #[must_use]
    pub const fn nanosecond(&self) -> u16 {
        self.iso.time.nanosecond
    }

    /// Returns the Calendar value.
    #[inline]
    #[must_use]
    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Compares the ISO slots of two date-times.
    #[inline]
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.iso.cmp(&other.iso)
    }

    #[inline]
    /// Adds a `Duration` to the current `DateTime`.
    pub fn add(&self, duration: &Duration, overflow: Option<Overflow>) -> TemporalResult<Self> {
        self.add_or_subtract_duration(duration, overflow)
    }

    #[inline]
    /// Subtracts a `Duration` to the current `DateTime`.
    pub fn subtract(
        &self,
        duration: &Duration,
        overflow: Option<Overflow>,
    ) -> TemporalResult<Self> {
        self.add_or_subtract_duration(&duration.negated(), overflow)
    }

    /// Returns a `Duration` representing the period of time from this `DateTime` until the other `DateTime`.
    #[inline]
    pub fn until(&self, other: &Self, settings: DifferenceSettings) -> TemporalResult<Duration> {
        self.diff(DifferenceOperation::Until, other, settings)
    }

    /// Returns a `Duration` representing the period of time from this `DateTime` since the other `DateTime`.
    #[inline]
    pub fn since(&self, other: &Self, settings: DifferenceSettings) -> TemporalResult<Duration> {
        self.diff(DifferenceOperation::Since, other, settings)
    }

    /// Rounds the current datetime based on provided options.
    pub fn round(&self, options: RoundingOptions) -> TemporalResult<Self> {
        let resolved = ResolvedRoundingOptions::from_datetime_options(options)?;
        let result = self.iso.round(resolved)?;
        Ok(Self::new_unchecked(result, self.calendar.clone()))
    }

    /// Returns the date portion of this `DateTime`.
    #[must_use]
    pub fn to_plain_date(&self) -> PlainDate {
        PlainDate::new_unchecked(self.iso.date, self.calendar.clone())
    }

    /// Returns the time portion of this `DateTime`.
    #[must_use]
    pub fn to_plain_time(&self) -> PlainTime {
        PlainTime::new_unchecked(self.iso.time)
    }
}

// ==== Calendar-derived public API ====

impl PlainDateTime {
    /// Returns the calendar year value.
    pub fn year(&self) -> i32 {
        self.calendar.year(&self.iso.date)
    }

    /// Returns the calendar month value.
    pub fn month(&self) -> u8 {
        self.calendar.month(&self.iso.date)
    }

    /// Returns the calendar month code value.
    pub fn month_code(&self) -> MonthCode {
        self.calendar.month_code(&self.iso.date)
    }

    /// Returns the calendar day value.
    pub fn day(&self) -> u8 {
        self.calendar.day(&self.iso.date)
    }

    /// Returns the calendar day of week value.
    pub fn day_of_week(&self) -> u16 {
        self.calendar.day_of_week(&self.iso.date)
    }

    /// Returns the calendar day of year value.
    pub fn day_of_year(&self) -> u16 {
        self.calendar.day_of_year(&self.iso.date)
    }

    /// Returns the calendar week of year value.
    pub fn week_of_year(&self) -> Option<u8> {
        self.calendar.week_of_year(&self.iso.date)
    }

    /// Returns the calendar year of week value.
    pub fn year_of_week(&self) -> Option<i32> {
        self.calendar.year_of_week(&self.iso.date)
    }

    /// Returns the calendar days in week value.
    pub fn days_in_week(&self) -> u16 {
        self.calendar.days_in_week(&self.iso.date)
    }

    /// Returns the calendar days in month value.
    pub fn days_in_month(&self) -> u16 {
        self.calendar.days_in_month(&self.iso.date)
    }

    /// Returns the calendar days in year value.
    pub fn days_in_year(&self) -> u16 {
        self.calendar.days_in_year(&self.iso.date)
    }

    /// Returns the calendar months in year value.
    pub fn months_in_year(&self) -> u16 {
        self.calendar.months_in_year(&self.iso.date)
    }

    /// Returns whether the date is in a leap year for the given calendar.
    pub fn in_leap_year(&self) -> bool {
        self.calendar.in_leap_year(&self.iso.date)
    }
}

impl FromStr for PlainDateTime {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = parse_date_time(s)?;
        let date = IsoDate::regulate(
            parsed.date.year,
            parsed.date.month.into(),
            parsed.date.day.into(),
            Overflow::Reject,
        )?;
        let time = parsed.time.unwrap_or_default();
        Ok(Self::new_unchecked(
            IsoDateTime::new(date, time)?,
            parsed.calendar,
        ))
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use crate::{
        builtins::core::{Duration, PartialDate, PartialTime},
        error::ErrorKind,
        options::{
            DifferenceSettings, RoundingIncrement, RoundingMode, RoundingOptions, Unit,
        },
        Calendar,
    };

    use super::{PartialDateTime, PlainDateTime};

    fn assert_datetime(result: &PlainDateTime, fields: (i32, u8, u8, u8, u8, u8, u16, u16, u16)) {
        assert_eq!(result.iso_year(), fields.0);
        assert_eq!(result.iso_month(), fields.1);
        assert_eq!(result.iso_day(), fields.2);
        assert_eq!(result.hour(), fields.3);
        assert_eq!(result.minute(), fields.4);
        assert_eq!(result.second(), fields.5);
        assert_eq!(result.millisecond(), fields.6);
        assert_eq!(result.microsecond(), fields.7);
        assert_eq!(result.nanosecond(), fields.8);
    }

    #[test]
    fn plain_date_time_limits() {
        let min = PlainDateTime::try_new(-271_821, 4, 19, 0, 0, 0, 0, 0, 0, Calendar::default());
        assert_eq!(min.unwrap_err().kind(), ErrorKind::Range);
        let min = PlainDateTime::try_new(-271_821, 4, 19, 0, 0, 0, 0, 0, 1, Calendar::default());
        assert!(min.is_ok());

        let max =
            PlainDateTime::try_new(275_760, 9, 13, 23, 59, 59, 999, 999, 999, Calendar::default());
        assert!(max.is_ok());
        let max = PlainDateTime::try_new(275_760, 9, 14, 0, 0, 0, 0, 0, 0, Calendar::default());
        assert_eq!(max.unwrap_err().kind(), ErrorKind::Range);

        let max = max_datetime();
        let err = max.add(&Duration::from_str("PT1H").unwrap(), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    fn max_datetime() -> PlainDateTime {
        PlainDateTime::try_new(275_760, 9, 13, 23, 30, 0, 0, 0, 0, Calendar::default()).unwrap()
    }

    #[test]
    fn basic_with_test() {
        let pdt =
            PlainDateTime::try_new(1976, 11, 18, 15, 23, 30, 123, 456, 789, Calendar::default())
                .unwrap();

        // Test year
        let partial = PartialDateTime {
            date: PartialDate::new().with_year(Some(2019)),
            time: PartialTime::default(),
        };
        let result = pdt.with(partial, None).unwrap();
        assert_datetime(&result, (2019, 11, 18, 15, 23, 30, 123, 456, 789));

        // Test month
        let partial = PartialDateTime {
            date: PartialDate::new().with_month(Some(5)),
            time: PartialTime::default(),
        };
        let result = pdt.with(partial, None).unwrap();
        assert_datetime(&result, (1976, 5, 18, 15, 23, 30, 123, 456, 789));

        // Test hour and nanosecond
        let partial = PartialDateTime {
            date: PartialDate::default(),
            time: PartialTime::new().with_hour(Some(2)).with_nanosecond(Some(1)),
        };
        let result = pdt.with(partial, None).unwrap();
        assert_datetime(&result, (1976, 11, 18, 2, 23, 30, 123, 456, 1));

        // Test empty partial
        let err = pdt.with(PartialDateTime::default(), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn datetime_add() {
        let pdt = PlainDateTime::try_new(2020, 1, 31, 12, 0, 0, 0, 0, 0, Calendar::default())
            .unwrap();

        let result = pdt.add(&Duration::from_str("P1M").unwrap(), None).unwrap();
        assert_datetime(&result, (2020, 2, 29, 12, 0, 0, 0, 0, 0));

        let result = pdt.add(&Duration::from_str("PT13H").unwrap(), None).unwrap();
        assert_datetime(&result, (2020, 2, 1, 1, 0, 0, 0, 0, 0));

        let result = pdt
            .add(&Duration::from_str("P1MT13H").unwrap(), None)
            .unwrap();
        assert_datetime(&result, (2020, 3, 1, 1, 0, 0, 0, 0, 0));
    }

    #[test]
    fn datetime_subtract() {
        let pdt = PlainDateTime::try_new(2019, 3, 1, 0, 30, 0, 0, 0, 0, Calendar::default())
            .unwrap();

        let result = pdt
            .subtract(&Duration::from_str("P1MT1H").unwrap(), None)
            .unwrap();
        assert_datetime(&result, (2019, 1, 31, 23, 30, 0, 0, 0, 0));

        let result = pdt
            .subtract(&Duration::from_str("P3DT0.5H").unwrap(), None)
            .unwrap();
        assert_datetime(&result, (2019, 2, 26, 0, 0, 0, 0, 0, 0));
    }

    #[test]
    fn datetime_until_and_since() {
        let earlier = PlainDateTime::from_str("2019-01-08T08:22:36.123456789").unwrap();
        let later = PlainDateTime::from_str("2021-09-07T12:39:40.987654321").unwrap();

        let settings = DifferenceSettings {
            largest_unit: Some(Unit::Year),
            ..Default::default()
        };
        let result = earlier.until(&later, settings).unwrap();
        assert_eq!(
            result.fields(),
            [2.0, 7.0, 0.0, 30.0, 4.0, 17.0, 4.0, 864.0, 197.0, 532.0]
        );

        let result = earlier.since(&later, settings).unwrap();
        assert_eq!(
            result.fields(),
            [-2.0, -7.0, 0.0, -30.0, -4.0, -17.0, -4.0, -864.0, -197.0, -532.0]
        );

        let one = PlainDateTime::from_str("2021-01-01T12:00").unwrap();
        let two = PlainDateTime::from_str("2021-01-03T06:00").unwrap();
        let result = one.until(&two, DifferenceSettings::default()).unwrap();
        assert_eq!((result.days(), result.hours()), (1.0, 18.0));

        let settings = DifferenceSettings {
            largest_unit: Some(Unit::Hour),
            ..Default::default()
        };
        let result = one.until(&two, settings).unwrap();
        assert_eq!((result.days(), result.hours()), (0.0, 42.0));

        assert!(one.until(&one, settings).unwrap().is_zero());
    }

    #[test]
    fn datetime_until_rounding() {
        let one = PlainDateTime::from_str("2021-01-01T12:00").unwrap();
        let two = PlainDateTime::from_str("2021-01-03T06:00").unwrap();

        let settings = DifferenceSettings {
            smallest_unit: Some(Unit::Day),
            rounding_mode: Some(RoundingMode::HalfExpand),
            ..Default::default()
        };
        let result = one.until(&two, settings).unwrap();
        assert_eq!((result.days(), result.hours()), (2.0, 0.0));

        let settings = DifferenceSettings {
            smallest_unit: Some(Unit::Hour),
            increment: Some(RoundingIncrement::try_new(12).unwrap()),
            ..Default::default()
        };
        let result = one.until(&two, settings).unwrap();
        assert_eq!((result.days(), result.hours()), (1.0, 12.0));
    }

    #[test]
    fn datetime_round() {
        let pdt = PlainDateTime::from_str("1976-11-18T14:23:30.123456789").unwrap();

        let options = RoundingOptions {
            smallest_unit: Some(Unit::Hour),
            ..Default::default()
        };
        assert_datetime(&pdt.round(options).unwrap(), (1976, 11, 18, 14, 0, 0, 0, 0, 0));

        let options = RoundingOptions {
            smallest_unit: Some(Unit::Day),
            ..Default::default()
        };
        assert_datetime(&pdt.round(options).unwrap(), (1976, 11, 19, 0, 0, 0, 0, 0, 0));

        let options = RoundingOptions {
            smallest_unit: Some(Unit::Day),
            increment: Some(RoundingIncrement::try_new(2).unwrap()),
            ..Default::default()
        };
        assert_eq!(pdt.round(options).unwrap_err().kind(), ErrorKind::Range);

        let options = RoundingOptions {
            smallest_unit: Some(Unit::Month),
            ..Default::default()
        };
        assert_eq!(pdt.round(options).unwrap_err().kind(), ErrorKind::Range);
    }
}
