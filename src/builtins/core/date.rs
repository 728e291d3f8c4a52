//! This module implements `PlainDate` and any directly related algorithms.

use core::{cmp::Ordering, str::FromStr};

use crate::{
    builtins::core::{
        calendar::{Calendar, MonthCode},
        duration::{normalized::NormalizedDurationRecord, DateDuration, TimeDuration},
        Duration, PlainDateTime, PlainMonthDay, PlainTime, PlainYearMonth,
    },
    error::ErrorMessage,
    iso::{IsoDate, IsoDateTime},
    options::{DifferenceOperation, DifferenceSettings, Overflow, ResolvedRoundingOptions, Unit, UnitGroup},
    parsers,
    TemporalError, TemporalResult,
};

use super::duration::normalized::NormalizedTimeDuration;

/// A `PartialDate` represents partially filled calendar date fields.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PartialDate {
    /// A potentially set `year` field.
    pub year: Option<i32>,
    /// A potentially set `month` field.
    pub month: Option<u8>,
    /// A potentially set `month_code` field.
    pub month_code: Option<MonthCode>,
    /// A potentially set `day` field.
    pub day: Option<u8>,
}

impl PartialDate {
    /// Returns whether no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Convenience methods for building a `PartialDate`
impl PartialDate {
    /// Creates an empty `PartialDate`.
    pub const fn new() -> Self {
        Self {
            year: None,
            month: None,
            month_code: None,
            day: None,
        }
    }

    /// Sets the `year` field.
    pub const fn with_year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }

    /// Sets the `month` field.
    pub const fn with_month(mut self, month: Option<u8>) -> Self {
        self.month = month;
        self
    }

    /// Sets the `month_code` field.
    pub const fn with_month_code(mut self, month_code: Option<MonthCode>) -> Self {
        self.month_code = month_code;
        self
    }

    /// Sets the `day` field.
    pub const fn with_day(mut self, day: Option<u8>) -> Self {
        self.day = day;
        self
    }
}

/// The native Rust implementation of `Temporal.PlainDate`.
#[non_exhaustive]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PlainDate {
    pub(crate) iso: IsoDate,
    calendar: Calendar,
}

// ==== Private API ====

impl PlainDate {
    /// Create a new `PlainDate` with the date values and calendar slot.
    #[inline]
    #[must_use]
    pub(crate) fn new_unchecked(iso: IsoDate, calendar: Calendar) -> Self {
        Self { iso, calendar }
    }

    /// Returns the date after adding the given date and time parts.
    ///
    /// Equivalent to `AddDurationToDate`.
    pub(crate) fn add_duration(
        &self,
        duration: &Duration,
        overflow: Option<Overflow>,
    ) -> TemporalResult<Self> {
        // Whole days of the time part join the date part; the remainder is dropped.
        let (time_days, _) = TimeDuration::from_normalized(duration.time().to_normalized(), Unit::Day)?;
        let date = duration.date();
        let date_duration =
            DateDuration::new(date.years, date.months, date.weeks, date.days + time_days as f64)?;

        self.add_date_duration(&date_duration, overflow.unwrap_or_default())
    }

    /// Adds a `DateDuration` through this date's calendar.
    pub(crate) fn add_date_duration(
        &self,
        duration: &DateDuration,
        overflow: Overflow,
    ) -> TemporalResult<Self> {
        let result = self.calendar.date_add(&self.iso, duration, overflow)?;
        result.check_within_limits()?;
        Ok(Self::new_unchecked(result, self.calendar.clone()))
    }

    /// Returns the unrounded calendar difference from this date to `other`.
    pub(crate) fn internal_diff_date(
        &self,
        other: &Self,
        largest_unit: Unit,
    ) -> TemporalResult<DateDuration> {
        if self.iso == other.iso {
            return Ok(DateDuration::default());
        }
        self.calendar.date_until(&self.iso, &other.iso, largest_unit)
    }

    /// `DifferenceTemporalPlainDate`
    pub(crate) fn diff_date(
        &self,
        op: DifferenceOperation,
        other: &Self,
        settings: DifferenceSettings,
    ) -> TemporalResult<Duration> {
        self.calendar.check_same(other.calendar())?;

        let (sign, resolved) = ResolvedRoundingOptions::from_diff_settings(
            settings,
            op,
            UnitGroup::DATE,
            Unit::Day,
            Unit::Day,
        )?;

        if self.iso == other.iso {
            return Ok(Duration::default());
        }

        let date_diff = self.internal_diff_date(other, resolved.largest_unit)?;

        let rounding_granularity_is_noop =
            resolved.smallest_unit == Unit::Day && resolved.increment.get() == 1;
        let result = if rounding_granularity_is_noop {
            Duration::from(date_diff)
        } else {
            let record =
                NormalizedDurationRecord::new(date_diff, NormalizedTimeDuration::default())?;
            Duration::round_relative(record, resolved, Some(self))?.0
        };

        match sign {
            crate::Sign::Negative => Ok(result.negated()),
            _ => Ok(result),
        }
    }
}

// ==== Public API ====

impl PlainDate {
    /// Creates a new `PlainDate`, constraining any arguments that are invalid
    /// into a valid range.
    #[inline]
    pub fn new(year: i32, month: u8, day: u8, calendar: Calendar) -> TemporalResult<Self> {
        Self::new_with_overflow(year, month, day, calendar, Overflow::Constrain)
    }

    /// Creates a new `PlainDate`, rejecting any date that is invalid.
    ///
    /// ```rust
    /// use temporal_engine::{Calendar, PlainDate};
    ///
    /// assert!(PlainDate::try_new(2021, 2, 28, Calendar::default()).is_ok());
    /// assert!(PlainDate::try_new(2021, 2, 30, Calendar::default()).is_err());
    /// ```
    #[inline]
    pub fn try_new(year: i32, month: u8, day: u8, calendar: Calendar) -> TemporalResult<Self> {
        Self::new_with_overflow(year, month, day, calendar, Overflow::Reject)
    }

    /// Creates a new `PlainDate` with the specified overflow.
    #[inline]
    pub fn new_with_overflow(
        year: i32,
        month: u8,
        day: u8,
        calendar: Calendar,
        overflow: Overflow,
    ) -> TemporalResult<Self> {
        let iso = IsoDate::new_with_overflow(year, month.into(), day.into(), overflow)?;
        Ok(Self::new_unchecked(iso, calendar))
    }

    /// Create a `PlainDate` from a `PartialDate`
    ///
    /// ```rust
    /// use temporal_engine::{partial::PartialDate, PlainDate};
    ///
    /// let partial = PartialDate::new()
    ///     .with_year(Some(2000))
    ///     .with_month(Some(13))
    ///     .with_day(Some(2));
    ///
    /// let date = PlainDate::from_partial(partial, None, None).unwrap();
    ///
    /// assert_eq!(date.year(), 2000);
    /// assert_eq!(date.month(), 12);
    /// assert_eq!(date.day(), 2);
    /// assert_eq!(date.month_code().as_str(), "M12");
    /// ```
    pub fn from_partial(
        partial: PartialDate,
        calendar: Option<Calendar>,
        overflow: Option<Overflow>,
    ) -> TemporalResult<Self> {
        if partial.is_empty() {
            return Err(TemporalError::r#type().with_enum(ErrorMessage::EmptyPartial));
        }
        let calendar = calendar.unwrap_or_default();
        let iso = calendar.date_from_fields(&partial, overflow.unwrap_or_default())?;
        iso.check_within_limits()?;
        Ok(Self::new_unchecked(iso, calendar))
    }

    /// Creates a date time with values from a `PartialDate`.
    pub fn with(&self, partial: PartialDate, overflow: Option<Overflow>) -> TemporalResult<Self> {
        if partial.is_empty() {
            return Err(TemporalError::r#type().with_enum(ErrorMessage::EmptyPartial));
        }
        let fields = self
            .calendar
            .merge_fields(&self.calendar.to_fields(&self.iso), &partial);
        let iso = self
            .calendar
            .date_from_fields(&fields, overflow.unwrap_or_default())?;
        iso.check_within_limits()?;
        Ok(Self::new_unchecked(iso, self.calendar.clone()))
    }

    /// Creates a new `PlainDate` from the current `PlainDate` and the provided calendar.
    #[must_use]
    pub fn with_calendar(&self, calendar: Calendar) -> Self {
        Self::new_unchecked(self.iso, calendar)
    }

    #[inline]
    #[must_use]
    /// Returns this `PlainDate`'s ISO year value.
    pub const fn iso_year(&self) -> i32 {
        self.iso.year
    }

    #[inline]
    #[must_use]
    /// Returns this `PlainDate`'s ISO month value.
    pub const fn iso_month(&self) -> u8 {
        self.iso.month
    }

    #[inline]
    #[must_use]
    /// Returns this `PlainDate`'s ISO day value.
    pub const fn iso_day(&self) -> u8 {
        self.iso.day
    }

    #[inline]
    #[must_use]
    /// Returns a reference to this `PlainDate`'s calendar.
    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Compares the ISO slots of two dates.
    ///
    /// Dates in different calendars are still ordered by their ISO fields.
    #[inline]
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.iso.cmp(&other.iso)
    }

    /// Adds a `Duration` to the current `PlainDate`.
    pub fn add(&self, duration: &Duration, overflow: Option<Overflow>) -> TemporalResult<Self> {
        self.add_duration(duration, overflow)
    }

    /// Subtracts a `Duration` from the current `PlainDate`.
    pub fn subtract(
        &self,
        duration: &Duration,
        overflow: Option<Overflow>,
    ) -> TemporalResult<Self> {
        self.add_duration(&duration.negated(), overflow)
    }

    #[inline]
    /// Returns the `Duration` from the current `PlainDate` until `other`.
    pub fn until(&self, other: &Self, settings: DifferenceSettings) -> TemporalResult<Duration> {
        self.diff_date(DifferenceOperation::Until, other, settings)
    }

    #[inline]
    /// Returns the `Duration` from `other` since the current `PlainDate`.
    pub fn since(&self, other: &Self, settings: DifferenceSettings) -> TemporalResult<Duration> {
        self.diff_date(DifferenceOperation::Since, other, settings)
    }
}

// ==== Calendar-derived Public API ====

impl PlainDate {
    /// Returns the calendar year value.
    pub fn year(&self) -> i32 {
        self.calendar.year(&self.iso)
    }

    /// Returns the calendar month value.
    pub fn month(&self) -> u8 {
        self.calendar.month(&self.iso)
    }

    /// Returns the calendar month code value.
    pub fn month_code(&self) -> MonthCode {
        self.calendar.month_code(&self.iso)
    }

    /// Returns the calendar day value.
    pub fn day(&self) -> u8 {
        self.calendar.day(&self.iso)
    }

    /// Returns the calendar day of week value, with Monday as 1.
    pub fn day_of_week(&self) -> u16 {
        self.calendar.day_of_week(&self.iso)
    }

    /// Returns the calendar day of year value.
    pub fn day_of_year(&self) -> u16 {
        self.calendar.day_of_year(&self.iso)
    }

    /// Returns the calendar week of year value.
    pub fn week_of_year(&self) -> Option<u8> {
        self.calendar.week_of_year(&self.iso)
    }

    /// Returns the calendar year of week value.
    pub fn year_of_week(&self) -> Option<i32> {
        self.calendar.year_of_week(&self.iso)
    }

    /// Returns the calendar days in week value.
    pub fn days_in_week(&self) -> u16 {
        self.calendar.days_in_week(&self.iso)
    }

    /// Returns the calendar days in month value.
    pub fn days_in_month(&self) -> u16 {
        self.calendar.days_in_month(&self.iso)
    }

    /// Returns the calendar days in year value.
    pub fn days_in_year(&self) -> u16 {
        self.calendar.days_in_year(&self.iso)
    }

    /// Returns the calendar months in year value.
    pub fn months_in_year(&self) -> u16 {
        self.calendar.months_in_year(&self.iso)
    }

    /// Returns returns whether the date in a leap year for the given calendar.
    pub fn in_leap_year(&self) -> bool {
        self.calendar.in_leap_year(&self.iso)
    }
}

// ==== Conversions ====

impl PlainDate {
    /// Converts the current `PlainDate` into a `PlainDateTime`, using
    /// midnight when no time is provided.
    pub fn to_plain_date_time(&self, time: Option<PlainTime>) -> TemporalResult<PlainDateTime> {
        let time = time.unwrap_or_default();
        let iso = IsoDateTime::new(self.iso, time.iso)?;
        Ok(PlainDateTime::new_unchecked(iso, self.calendar.clone()))
    }

    /// Converts the current `PlainDate` into a `PlainYearMonth`.
    pub fn to_plain_year_month(&self) -> TemporalResult<PlainYearMonth> {
        let fields = self.calendar.to_fields(&self.iso);
        let iso = self
            .calendar
            .year_month_from_fields(&fields, Overflow::Constrain)?;
        Ok(PlainYearMonth::new_unchecked(iso, self.calendar.clone()))
    }

    /// Converts the current `PlainDate` into a `PlainMonthDay`.
    pub fn to_plain_month_day(&self) -> TemporalResult<PlainMonthDay> {
        let fields = self.calendar.to_fields(&self.iso);
        let iso = self
            .calendar
            .month_day_from_fields(&fields, Overflow::Constrain)?;
        Ok(PlainMonthDay::new_unchecked(iso, self.calendar.clone()))
    }
}

impl From<PlainDateTime> for PlainDate {
    fn from(value: PlainDateTime) -> Self {
        value.to_plain_date()
    }
}

impl FromStr for PlainDate {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = parsers::parse_date_time(s)?;
        let date = parsed.date;
        Self::new_with_overflow(
            date.year,
            date.month,
            date.day,
            parsed.calendar,
            Overflow::Reject,
        )
    }
}

#[cfg(test)]
mod tests {
    use core::{cmp::Ordering, str::FromStr};

    use super::*;
    use crate::{error::ErrorKind, options::RoundingMode, options::RoundingIncrement};

    fn date(s: &str) -> PlainDate {
        PlainDate::from_str(s).unwrap()
    }

    fn until_with(one: &str, two: &str, largest: Unit) -> Duration {
        let settings = DifferenceSettings {
            largest_unit: Some(largest),
            ..Default::default()
        };
        date(one).until(&date(two), settings).unwrap()
    }

    #[test]
    fn constrain_and_reject() {
        let constrained =
            PlainDate::new_with_overflow(2021, 2, 30, Calendar::default(), Overflow::Constrain)
                .unwrap();
        assert_eq!((constrained.year(), constrained.month(), constrained.day()), (2021, 2, 28));

        let err = PlainDate::try_new(2021, 2, 30, Calendar::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);

        let constrained = PlainDate::new(2021, 13, 0, Calendar::default()).unwrap();
        assert_eq!((constrained.month(), constrained.day()), (12, 1));
    }

    #[test]
    fn date_limits() {
        assert!(PlainDate::try_new(-271_821, 4, 19, Calendar::default()).is_ok());
        assert!(PlainDate::try_new(-271_821, 4, 18, Calendar::default()).is_err());
        assert!(PlainDate::try_new(275_760, 9, 13, Calendar::default()).is_ok());
        assert!(PlainDate::try_new(275_760, 9, 14, Calendar::default()).is_err());

        let max = PlainDate::try_new(275_760, 9, 13, Calendar::default()).unwrap();
        let one_day = Duration::from_str("P1D").unwrap();
        assert_eq!(max.add(&one_day, None).unwrap_err().kind(), ErrorKind::Range);
    }

    #[test]
    fn field_round_trip() {
        for (y, m, d) in [(2024, 2, 29), (1, 1, 1), (-5, 12, 31), (1970, 7, 4)] {
            let result = PlainDate::try_new(y, m, d, Calendar::default()).unwrap();
            assert_eq!((result.year(), result.month(), result.day()), (y, m, d));
        }
    }

    #[test]
    fn calendar_getters() {
        let result = date("2021-01-01");
        assert_eq!(result.day_of_week(), 5);
        assert_eq!(result.day_of_year(), 1);
        assert_eq!(result.week_of_year(), Some(53));
        assert_eq!(result.year_of_week(), Some(2020));
        assert_eq!(result.days_in_week(), 7);
        assert_eq!(result.days_in_month(), 31);
        assert_eq!(result.days_in_year(), 365);
        assert_eq!(result.months_in_year(), 12);
        assert!(!result.in_leap_year());
        assert_eq!(result.month_code().as_str(), "M01");
    }

    #[test]
    fn from_partial_and_with() {
        let partial = PartialDate::new()
            .with_year(Some(2021))
            .with_month_code(Some(MonthCode::from_str("M02").unwrap()))
            .with_day(Some(31));
        let result = PlainDate::from_partial(partial, None, None).unwrap();
        assert_eq!((result.month(), result.day()), (2, 28));

        let err = PlainDate::from_partial(partial, None, Some(Overflow::Reject)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);

        let missing_day = PartialDate::new().with_year(Some(2021)).with_month(Some(2));
        let err = PlainDate::from_partial(missing_day, None, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);

        let base = date("2021-05-31");
        let result = base.with(PartialDate::new().with_month(Some(6)), None).unwrap();
        assert_eq!((result.year(), result.month(), result.day()), (2021, 6, 30));

        let err = base.with(PartialDate::new(), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn month_stepping_difference() {
        let result = until_with("2021-01-31", "2021-03-31", Unit::Month);
        assert_eq!(result.months(), 2.0);
        assert_eq!(result.days(), 0.0);

        let result = until_with("2019-06-15", "2021-03-01", Unit::Year);
        assert_eq!((result.years(), result.months(), result.days()), (1.0, 8.0, 14.0));

        let result = until_with("2021-03-01", "2019-06-15", Unit::Year);
        assert_eq!((result.years(), result.months(), result.days()), (-1.0, -8.0, -16.0));

        let result = until_with("2021-01-01", "2021-02-15", Unit::Week);
        assert_eq!((result.weeks(), result.days()), (6.0, 3.0));

        let result = until_with("2021-01-01", "2021-02-15", Unit::Day);
        assert_eq!(result.days(), 45.0);
    }

    #[test]
    fn since_negates_until() {
        let one = date("2020-02-29");
        let two = date("2024-03-15");
        let settings = DifferenceSettings {
            largest_unit: Some(Unit::Year),
            ..Default::default()
        };
        let until = one.until(&two, settings).unwrap();
        let since = one.since(&two, settings).unwrap();
        assert_eq!(until.negated(), since);
        assert_eq!((until.years(), until.months(), until.days()), (4.0, 0.0, 15.0));

        assert!(one.until(&one, settings).unwrap().is_zero());
    }

    #[test]
    fn rounded_difference() {
        let settings = DifferenceSettings {
            largest_unit: Some(Unit::Year),
            smallest_unit: Some(Unit::Month),
            rounding_mode: Some(RoundingMode::HalfExpand),
            ..Default::default()
        };
        let result = date("2019-01-08").until(&date("2021-09-07"), settings).unwrap();
        assert_eq!((result.years(), result.months(), result.days()), (2.0, 8.0, 0.0));

        let settings = DifferenceSettings {
            smallest_unit: Some(Unit::Year),
            rounding_mode: Some(RoundingMode::HalfExpand),
            ..Default::default()
        };
        let result = date("2019-01-08").until(&date("2021-09-07"), settings).unwrap();
        assert_eq!(result.years(), 3.0);

        let settings = DifferenceSettings {
            smallest_unit: Some(Unit::Day),
            increment: Some(RoundingIncrement::try_new(5).unwrap()),
            ..Default::default()
        };
        let result = date("2021-01-01").until(&date("2021-01-13"), settings).unwrap();
        assert_eq!(result.days(), 10.0);
    }

    #[test]
    fn rounded_difference_from_month_end() {
        let settings = DifferenceSettings {
            largest_unit: Some(Unit::Year),
            smallest_unit: Some(Unit::Month),
            rounding_mode: Some(RoundingMode::HalfExpand),
            ..Default::default()
        };
        let result = date("2020-01-31").until(&date("2020-03-15"), settings).unwrap();
        assert_eq!(
            (result.years(), result.months(), result.weeks(), result.days()),
            (0.0, 1.0, 0.0, 0.0)
        );
        let result = date("2020-01-31").since(&date("2020-03-15"), settings).unwrap();
        assert_eq!((result.months(), result.days()), (-1.0, 0.0));

        let settings = DifferenceSettings {
            smallest_unit: Some(Unit::Year),
            rounding_mode: Some(RoundingMode::HalfExpand),
            ..Default::default()
        };
        let result = date("2020-02-29").until(&date("2021-03-01"), settings).unwrap();
        assert_eq!(
            (result.years(), result.months(), result.weeks(), result.days()),
            (1.0, 0.0, 0.0, 0.0)
        );
        let result = date("2020-02-29").since(&date("2021-03-01"), settings).unwrap();
        assert_eq!((result.years(), result.months(), result.days()), (-1.0, 0.0, 0.0));
    }

    #[test]
    fn rounded_days_carry_into_months() {
        let settings = DifferenceSettings {
            largest_unit: Some(Unit::Month),
            smallest_unit: Some(Unit::Day),
            increment: Some(RoundingIncrement::try_new(10).unwrap()),
            rounding_mode: Some(RoundingMode::HalfExpand),
        };
        // P1M26D rounds to P1M30D, and February has 28 days.
        let result = date("2021-01-01").until(&date("2021-02-27"), settings).unwrap();
        assert_eq!((result.months(), result.days()), (2.0, 2.0));
    }

    #[test]
    fn difference_options_are_validated() {
        let settings = DifferenceSettings {
            largest_unit: Some(Unit::Day),
            smallest_unit: Some(Unit::Month),
            ..Default::default()
        };
        let err = date("2021-01-01").until(&date("2021-02-01"), settings).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);

        let settings = DifferenceSettings {
            smallest_unit: Some(Unit::Hour),
            ..Default::default()
        };
        let err = date("2021-01-01").until(&date("2021-02-01"), settings).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn month_end_clamp_and_inverse() {
        let one_month = Duration::from_str("P1M").unwrap();
        let result = date("2021-01-31").add(&one_month, None).unwrap();
        assert_eq!(result, date("2021-02-28"));

        let err = date("2021-01-31")
            .add(&one_month, Some(Overflow::Reject))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);

        let base = date("2020-12-30");
        for s in ["P40D", "PT36H", "-P3W", "P1W2DT23H59M"] {
            let duration = Duration::from_str(s).unwrap();
            let round_trip = base.add(&duration, None).unwrap().subtract(&duration, None);
            assert_eq!(round_trip.unwrap(), base, "{s}");
        }
    }

    #[test]
    fn compare_and_conversions() {
        let one = date("2021-01-31");
        let two = date("2021-02-01");
        assert_eq!(one.compare(&two), Ordering::Less);
        assert_eq!(two.compare(&one), Ordering::Greater);
        assert_eq!(one.compare(&one.clone()), Ordering::Equal);

        let ym = one.to_plain_year_month().unwrap();
        assert_eq!((ym.year(), ym.month()), (2021, 1));
        let md = one.to_plain_month_day().unwrap();
        assert_eq!((md.month_code().as_str(), md.day()), ("M01", 31));
        let dt = one.to_plain_date_time(None).unwrap();
        assert_eq!((dt.day(), dt.hour()), (31, 0));
    }

    #[test]
    fn parse_dates() {
        assert_eq!(date("2021-03-31T12:30").day(), 31);
        assert_eq!(
            PlainDate::from_str("+275760-09-14").unwrap_err().kind(),
            ErrorKind::Range
        );
        assert_eq!(
            PlainDate::from_str("20210231x").unwrap_err().kind(),
            ErrorKind::Syntax
        );
    }
}
