//! This module implements `YearMonth` and any directly related algorithms.

use core::{cmp::Ordering, str::FromStr};

use crate::{
    builtins::core::{
        calendar::{Calendar, MonthCode},
        duration::{
            normalized::{NormalizedDurationRecord, NormalizedTimeDuration},
            DateDuration, TimeDuration,
        },
        Duration, PartialDate, PlainDate,
    },
    error::ErrorMessage,
    iso::IsoDate,
    options::{
        DifferenceOperation, DifferenceSettings, Overflow, ResolvedRoundingOptions, Unit,
        UnitGroup,
    },
    parsers::parse_year_month,
    Sign, TemporalError, TemporalResult,
};

/// The native Rust implementation of `Temporal.YearMonth`.
#[non_exhaustive]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PlainYearMonth {
    pub(crate) iso: IsoDate,
    calendar: Calendar,
}

impl PlainYearMonth {
    /// Creates an unvalidated `YearMonth`.
    #[inline]
    #[must_use]
    pub(crate) fn new_unchecked(iso: IsoDate, calendar: Calendar) -> Self {
        Self { iso, calendar }
    }

    /// Returns the first day of this year-month as a `PlainDate`.
    fn first_day(&self) -> PlainDate {
        let iso = IsoDate::new_unchecked(self.iso.year, self.iso.month, 1);
        PlainDate::new_unchecked(iso, self.calendar.clone())
    }

    pub(crate) fn add_or_subtract_duration(
        &self,
        duration: &Duration,
        overflow: Overflow,
    ) -> TemporalResult<Self> {
        let sign = duration.sign();
        let (time_days, _) =
            TimeDuration::from_normalized(duration.time().to_normalized(), Unit::Day)?;
        let date = duration.date();
        let date_duration =
            DateDuration::new(date.years, date.months, date.weeks, date.days + time_days as f64)?;

        // Subtraction counts back from the last day of the month.
        let day = if sign == Sign::Negative {
            self.calendar.days_in_month(&self.iso) as u8
        } else {
            1
        };
        let start = IsoDate::new_unchecked(self.iso.year, self.iso.month, day);
        let added = self.calendar.date_add(&start, &date_duration, overflow)?;

        let fields = self.calendar.to_fields(&added);
        let iso = self.calendar.year_month_from_fields(&fields, overflow)?;
        Ok(Self::new_unchecked(iso, self.calendar.clone()))
    }

    /// `DifferenceTemporalPlainYearMonth`
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
            UnitGroup::YEAR_MONTH,
            Unit::Year,
            Unit::Month,
        )?;

        if self.iso == other.iso {
            return Ok(Duration::default());
        }

        let this_date = self.first_day();
        let other_date = other.first_day();
        let date_diff = self.calendar.date_until(
            &this_date.iso,
            &other_date.iso,
            resolved.largest_unit,
        )?;
        let years_months = DateDuration::new(date_diff.years, date_diff.months, 0.0, 0.0)?;

        let result = if resolved.smallest_unit == Unit::Month && resolved.increment.get() == 1 {
            Duration::from(years_months)
        } else {
            let record =
                NormalizedDurationRecord::new(years_months, NormalizedTimeDuration::default())?;
            Duration::round_relative(record, resolved, Some(&this_date))?.0
        };

        match sign {
            Sign::Negative => Ok(result.negated()),
            _ => Ok(result),
        }
    }
}

impl PlainYearMonth {
    /// Creates a new `YearMonth`, constraining an invalid month.
    #[inline]
    pub fn new(year: i32, month: u8, calendar: Calendar) -> TemporalResult<Self> {
        Self::new_with_overflow(year, month, None, calendar, Overflow::Constrain)
    }

    /// Creates a new valid `YearMonth`.
    #[inline]
    pub fn new_with_overflow(
        year: i32,
        month: u8,
        reference_day: Option<u8>,
        calendar: Calendar,
        overflow: Overflow,
    ) -> TemporalResult<Self> {
        let day = reference_day.unwrap_or(1);
        let iso = IsoDate::regulate(year, month.into(), day.into(), overflow)?;
        iso.check_year_month_within_limits()?;
        Ok(Self::new_unchecked(iso, calendar))
    }

    /// Creates a `YearMonth` from a `PartialDate`; only the year and month
    /// fields are read.
    pub fn from_partial(
        partial: PartialDate,
        calendar: Option<Calendar>,
        overflow: Option<Overflow>,
    ) -> TemporalResult<Self> {
        if partial.is_empty() {
            return Err(TemporalError::r#type().with_enum(ErrorMessage::EmptyPartial));
        }
        let calendar = calendar.unwrap_or_default();
        let iso = calendar.year_month_from_fields(&partial, overflow.unwrap_or_default())?;
        Ok(Self::new_unchecked(iso, calendar))
    }

    /// Creates a new `YearMonth` with the partial fields merged over the
    /// current fields.
    pub fn with(&self, partial: PartialDate, overflow: Option<Overflow>) -> TemporalResult<Self> {
        if partial.is_empty() {
            return Err(TemporalError::r#type().with_enum(ErrorMessage::EmptyPartial));
        }
        let fields = self
            .calendar
            .merge_fields(&self.calendar.to_fields(&self.iso), &partial);
        let iso = self
            .calendar
            .year_month_from_fields(&fields, overflow.unwrap_or_default())?;
        Ok(Self::new_unchecked(iso, self.calendar.clone()))
    }

    /// Returns the iso year value for this `YearMonth`.
    #[inline]
    #[must_use]
    pub fn iso_year(&self) -> i32 {
        self.iso.year
    }

    /// Returns the iso month value for this `YearMonth`.
    #[inline]
    #[must_use]
    pub fn iso_month(&self) -> u8 {
        self.iso.month
    }

    /// Returns the calendar year of this `YearMonth`.
    pub fn year(&self) -> i32 {
        self.calendar.year(&self.iso)
    }

    /// Returns the ordinal calendar month of this `YearMonth`.
    pub fn month(&self) -> u8 {
        self.calendar.month(&self.iso)
    }

    /// Returns the month code of this `YearMonth`.
    pub fn month_code(&self) -> MonthCode {
        self.calendar.month_code(&self.iso)
    }

    /// Returns whether this year is a leap year.
    #[inline]
    #[must_use]
    pub fn in_leap_year(&self) -> bool {
        self.calendar.in_leap_year(&self.iso)
    }

    /// Returns the number of days in this year.
    pub fn days_in_year(&self) -> u16 {
        self.calendar.days_in_year(&self.iso)
    }

    /// Returns the number of days in this month.
    pub fn days_in_month(&self) -> u16 {
        self.calendar.days_in_month(&self.iso)
    }

    /// Returns the number of months in this year.
    pub fn months_in_year(&self) -> u16 {
        self.calendar.months_in_year(&self.iso)
    }

    /// Returns the Calendar value.
    #[inline]
    #[must_use]
    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Compares the ISO slots of two year-months.
    #[inline]
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.iso.cmp(&other.iso)
    }

    /// Adds `duration` starting from the first day of the month, or from the
    /// last day when `duration` is negative.
    pub fn add(&self, duration: &Duration, overflow: Option<Overflow>) -> TemporalResult<Self> {
        self.add_or_subtract_duration(duration, overflow.unwrap_or_default())
    }

    /// Subtracts `duration` from this `YearMonth`.
    pub fn subtract(
        &self,
        duration: &Duration,
        overflow: Option<Overflow>,
    ) -> TemporalResult<Self> {
        self.add_or_subtract_duration(&duration.negated(), overflow.unwrap_or_default())
    }

    /// Returns the years and months from this `YearMonth` to `other`.
    #[inline]
    pub fn until(&self, other: &Self, settings: DifferenceSettings) -> TemporalResult<Duration> {
        self.diff(DifferenceOperation::Until, other, settings)
    }

    /// Returns the years and months from `other` to this `YearMonth`.
    #[inline]
    pub fn since(&self, other: &Self, settings: DifferenceSettings) -> TemporalResult<Duration> {
        self.diff(DifferenceOperation::Since, other, settings)
    }

    /// Creates a `PlainDate` on `day` of this year-month, constraining the
    /// day to the month.
    pub fn to_plain_date(&self, day: u8) -> TemporalResult<PlainDate> {
        let fields = self.calendar.merge_fields(
            &self.calendar.to_fields(&self.iso),
            &PartialDate::new().with_day(Some(day)),
        );
        PlainDate::from_partial(fields, Some(self.calendar.clone()), Some(Overflow::Constrain))
    }
}

impl FromStr for PlainYearMonth {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = parse_year_month(s)?;
        Self::new_with_overflow(
            parsed.date.year,
            parsed.date.month,
            None,
            parsed.calendar,
            Overflow::Reject,
        )
    }
}
