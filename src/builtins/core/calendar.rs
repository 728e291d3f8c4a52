//! This module implements the calendar traits and related components.
//!
//! A [`Calendar`] is a shared handle to a [`CalendarProtocol`] implementation.
//! All month and year arithmetic on the value types is routed through it, while
//! the value types themselves only ever hold ISO slots.

use alloc::{sync::Arc, vec::Vec};
use core::{fmt, str::FromStr};

use crate::{
    builtins::core::duration::DateDuration,
    error::ErrorMessage,
    iso::IsoDate,
    options::{Overflow, Unit},
    utils, TemporalError, TemporalResult,
};

use tinystr::{tinystr, TinyAsciiStr};

use super::PartialDate;

mod types;

pub use types::{FieldName, MonthCode};

/// The identifier of the ISO 8601 calendar.
pub const ISO_IDENTIFIER: &str = "iso8601";

const ISO_MONTH_CODES: [TinyAsciiStr<4>; 12] = [
    tinystr!(4, "M01"),
    tinystr!(4, "M02"),
    tinystr!(4, "M03"),
    tinystr!(4, "M04"),
    tinystr!(4, "M05"),
    tinystr!(4, "M06"),
    tinystr!(4, "M07"),
    tinystr!(4, "M08"),
    tinystr!(4, "M09"),
    tinystr!(4, "M10"),
    tinystr!(4, "M11"),
    tinystr!(4, "M12"),
];

/// The reference year used by month-day values in the ISO calendar.
pub(crate) const MONTH_DAY_REFERENCE_YEAR: i32 = 1972;

/// The set of calendar operations the value types depend on.
///
/// Implementations receive and return ISO slots; any calendar specific
/// representation stays internal to the implementation.
pub trait CalendarProtocol: fmt::Debug + Send + Sync {
    /// Returns the identifier of this calendar.
    fn identifier(&self) -> &str;

    /// Creates a date from a set of calendar fields.
    ///
    /// Equivalent to `CalendarDateFromFields`.
    fn date_from_fields(&self, fields: &PartialDate, overflow: Overflow) -> TemporalResult<IsoDate>;

    /// Creates the reference date of a year-month from a set of calendar fields.
    fn year_month_from_fields(
        &self,
        fields: &PartialDate,
        overflow: Overflow,
    ) -> TemporalResult<IsoDate>;

    /// Creates the reference date of a month-day from a set of calendar fields.
    fn month_day_from_fields(
        &self,
        fields: &PartialDate,
        overflow: Overflow,
    ) -> TemporalResult<IsoDate>;

    /// Adds a date duration to a date.
    fn date_add(
        &self,
        date: &IsoDate,
        duration: &DateDuration,
        overflow: Overflow,
    ) -> TemporalResult<IsoDate>;

    /// Returns the date duration from `one` to `two`, balanced up to `largest_unit`.
    fn date_until(
        &self,
        one: &IsoDate,
        two: &IsoDate,
        largest_unit: Unit,
    ) -> TemporalResult<DateDuration>;

    /// Returns the calendar year of `date`.
    fn year(&self, date: &IsoDate) -> i32;
    /// Returns the ordinal month of `date`, starting at 1.
    fn month(&self, date: &IsoDate) -> u8;
    /// Returns the month code of `date`.
    fn month_code(&self, date: &IsoDate) -> MonthCode;
    /// Returns the day of the month of `date`.
    fn day(&self, date: &IsoDate) -> u8;
    /// Returns the day of the week of `date`, with Monday as 1.
    fn day_of_week(&self, date: &IsoDate) -> u16;
    /// Returns the day of the year of `date`, starting at 1.
    fn day_of_year(&self, date: &IsoDate) -> u16;
    /// Returns the week of the year, or `None` if the calendar has no weeks.
    fn week_of_year(&self, date: &IsoDate) -> Option<u8>;
    /// Returns the year the week of `date` belongs to.
    fn year_of_week(&self, date: &IsoDate) -> Option<i32>;
    /// Returns the number of days in the week of `date`.
    fn days_in_week(&self, date: &IsoDate) -> u16;
    /// Returns the number of days in the month of `date`.
    fn days_in_month(&self, date: &IsoDate) -> u16;
    /// Returns the number of days in the year of `date`.
    fn days_in_year(&self, date: &IsoDate) -> u16;
    /// Returns the number of months in the year of `date`.
    fn months_in_year(&self, date: &IsoDate) -> u16;
    /// Returns whether the year of `date` is a leap year.
    fn in_leap_year(&self, date: &IsoDate) -> bool;

    /// Returns the field names this calendar needs for the requested fields.
    fn fields(&self, requested: &[FieldName]) -> Vec<FieldName> {
        requested.to_vec()
    }

    /// Merges two field records, with `additional` taking precedence.
    ///
    /// Providing either `month` or `month_code` in `additional` replaces both
    /// of them in `base`.
    fn merge_fields(&self, base: &PartialDate, additional: &PartialDate) -> PartialDate {
        let mut merged = *base;
        if additional.month.is_some() || additional.month_code.is_some() {
            merged.month = None;
            merged.month_code = None;
        }
        PartialDate {
            year: additional.year.or(merged.year),
            month: additional.month.or(merged.month),
            month_code: additional.month_code.or(merged.month_code),
            day: additional.day.or(merged.day),
        }
    }
}

// ==== Calendar handle ====

/// A shared handle to a `CalendarProtocol` implementation.
///
/// The default `Calendar` is the ISO 8601 calendar.
#[derive(Debug, Clone)]
pub struct Calendar(Arc<dyn CalendarProtocol>);

impl Default for Calendar {
    fn default() -> Self {
        Self(Arc::new(IsoCalendar))
    }
}

impl PartialEq for Calendar {
    fn eq(&self, other: &Self) -> bool {
        self.identifier() == other.identifier()
    }
}

impl Eq for Calendar {}

impl Calendar {
    /// Creates a `Calendar` backed by the provided implementation.
    #[inline]
    #[must_use]
    pub fn new(protocol: Arc<dyn CalendarProtocol>) -> Self {
        Self(protocol)
    }

    /// Returns a `Calendar` from the a slice of UTF-8 encoded bytes.
    pub fn from_utf8(bytes: &[u8]) -> TemporalResult<Self> {
        if bytes.eq_ignore_ascii_case(ISO_IDENTIFIER.as_bytes()) {
            return Ok(Self::default());
        }
        Err(TemporalError::range().with_enum(ErrorMessage::CalendarUnknown))
    }

    /// Returns the identifier of this calendar.
    #[inline]
    #[must_use]
    pub fn identifier(&self) -> &str {
        self.0.identifier()
    }

    /// Returns whether the current calendar is `ISO`
    #[inline]
    #[must_use]
    pub fn is_iso(&self) -> bool {
        self.identifier() == ISO_IDENTIFIER
    }

    /// `CalendarDateFromFields`
    pub fn date_from_fields(
        &self,
        fields: &PartialDate,
        overflow: Overflow,
    ) -> TemporalResult<IsoDate> {
        self.0.date_from_fields(fields, overflow)
    }

    /// `CalendarYearMonthFromFields`
    pub fn year_month_from_fields(
        &self,
        fields: &PartialDate,
        overflow: Overflow,
    ) -> TemporalResult<IsoDate> {
        self.0.year_month_from_fields(fields, overflow)
    }

    /// `CalendarMonthDayFromFields`
    pub fn month_day_from_fields(
        &self,
        fields: &PartialDate,
        overflow: Overflow,
    ) -> TemporalResult<IsoDate> {
        self.0.month_day_from_fields(fields, overflow)
    }

    /// `CalendarDateAdd`
    pub fn date_add(
        &self,
        date: &IsoDate,
        duration: &DateDuration,
        overflow: Overflow,
    ) -> TemporalResult<IsoDate> {
        self.0.date_add(date, duration, overflow)
    }

    /// `CalendarDateUntil`
    pub fn date_until(
        &self,
        one: &IsoDate,
        two: &IsoDate,
        largest_unit: Unit,
    ) -> TemporalResult<DateDuration> {
        #[cfg(feature = "log")]
        log::trace!(
            "{}: date_until {one:?} -> {two:?} with largest unit {largest_unit}",
            self.identifier()
        );
        self.0.date_until(one, two, largest_unit)
    }

    /// `CalendarFields`
    #[must_use]
    pub fn fields(&self, requested: &[FieldName]) -> Vec<FieldName> {
        self.0.fields(requested)
    }

    /// `CalendarMergeFields`
    #[must_use]
    pub fn merge_fields(&self, base: &PartialDate, additional: &PartialDate) -> PartialDate {
        self.0.merge_fields(base, additional)
    }

    /// Returns the complete set of calendar fields for `date`.
    pub(crate) fn to_fields(&self, date: &IsoDate) -> PartialDate {
        PartialDate {
            year: Some(self.year(date)),
            month: Some(self.month(date)),
            month_code: Some(self.month_code(date)),
            day: Some(self.day(date)),
        }
    }

    /// `CalendarYear`
    pub fn year(&self, date: &IsoDate) -> i32 {
        self.0.year(date)
    }

    /// `CalendarMonth`
    pub fn month(&self, date: &IsoDate) -> u8 {
        self.0.month(date)
    }

    /// `CalendarMonthCode`
    pub fn month_code(&self, date: &IsoDate) -> MonthCode {
        self.0.month_code(date)
    }

    /// `CalendarDay`
    pub fn day(&self, date: &IsoDate) -> u8 {
        self.0.day(date)
    }

    /// `CalendarDayOfWeek`
    pub fn day_of_week(&self, date: &IsoDate) -> u16 {
        self.0.day_of_week(date)
    }

    /// `CalendarDayOfYear`
    pub fn day_of_year(&self, date: &IsoDate) -> u16 {
        self.0.day_of_year(date)
    }

    /// `CalendarWeekOfYear`
    pub fn week_of_year(&self, date: &IsoDate) -> Option<u8> {
        self.0.week_of_year(date)
    }

    /// `CalendarYearOfWeek`
    pub fn year_of_week(&self, date: &IsoDate) -> Option<i32> {
        self.0.year_of_week(date)
    }

    /// `CalendarDaysInWeek`
    pub fn days_in_week(&self, date: &IsoDate) -> u16 {
        self.0.days_in_week(date)
    }

    /// `CalendarDaysInMonth`
    pub fn days_in_month(&self, date: &IsoDate) -> u16 {
        self.0.days_in_month(date)
    }

    /// `CalendarDaysInYear`
    pub fn days_in_year(&self, date: &IsoDate) -> u16 {
        self.0.days_in_year(date)
    }

    /// `CalendarMonthsInYear`
    pub fn months_in_year(&self, date: &IsoDate) -> u16 {
        self.0.months_in_year(date)
    }

    /// `CalendarInLeapYear`
    pub fn in_leap_year(&self, date: &IsoDate) -> bool {
        self.0.in_leap_year(date)
    }

    /// Returns a type error unless `other` is the same calendar.
    pub(crate) fn check_same(&self, other: &Self) -> TemporalResult<()> {
        if self != other {
            return Err(TemporalError::r#type().with_enum(ErrorMessage::CalendarMismatch));
        }
        Ok(())
    }
}

impl FromStr for Calendar {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_utf8(s.as_bytes())
    }
}

// ==== ISO 8601 calendar ====

/// The proleptic Gregorian calendar with ISO 8601 week rules.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IsoCalendar;

impl IsoCalendar {
    /// Resolves `month` and `month_code` into a single ISO month.
    fn resolve_month(fields: &PartialDate) -> TemporalResult<u8> {
        let from_code = match fields.month_code {
            Some(code) => {
                let month = code.to_month_integer();
                if code.is_leap_month() || !(1..=12).contains(&month) {
                    return Err(TemporalError::range().with_enum(ErrorMessage::MonthCodeInvalid));
                }
                Some(month)
            }
            None => None,
        };
        match (fields.month, from_code) {
            (Some(month), Some(code)) if month != code => {
                Err(TemporalError::range().with_enum(ErrorMessage::MonthMonthCodeMismatch))
            }
            (Some(month), _) | (None, Some(month)) => Ok(month),
            (None, None) => Err(missing_field()),
        }
    }
}

fn missing_field() -> TemporalError {
    TemporalError::r#type().with_enum(ErrorMessage::MissingRequiredField)
}

impl CalendarProtocol for IsoCalendar {
    fn identifier(&self) -> &str {
        ISO_IDENTIFIER
    }

    fn date_from_fields(&self, fields: &PartialDate, overflow: Overflow) -> TemporalResult<IsoDate> {
        let year = fields.year.ok_or_else(missing_field)?;
        let month = Self::resolve_month(fields)?;
        let day = fields.day.ok_or_else(missing_field)?;
        IsoDate::new_with_overflow(year, month.into(), day.into(), overflow)
    }

    fn year_month_from_fields(
        &self,
        fields: &PartialDate,
        overflow: Overflow,
    ) -> TemporalResult<IsoDate> {
        let year = fields.year.ok_or_else(missing_field)?;
        let month = Self::resolve_month(fields)?;
        let date = IsoDate::regulate(year, month.into(), 1, overflow)?;
        date.check_year_month_within_limits()?;
        Ok(date)
    }

    fn month_day_from_fields(
        &self,
        fields: &PartialDate,
        overflow: Overflow,
    ) -> TemporalResult<IsoDate> {
        if fields.month.is_some() && fields.month_code.is_none() && fields.year.is_none() {
            return Err(missing_field());
        }
        let month = Self::resolve_month(fields)?;
        let day = fields.day.ok_or_else(missing_field)?;
        let year = fields.year.unwrap_or(MONTH_DAY_REFERENCE_YEAR);
        let regulated = IsoDate::regulate(year, month.into(), day.into(), overflow)?;
        IsoDate::regulate(
            MONTH_DAY_REFERENCE_YEAR,
            regulated.month.into(),
            regulated.day.into(),
            Overflow::Constrain,
        )
    }

    fn date_add(
        &self,
        date: &IsoDate,
        duration: &DateDuration,
        overflow: Overflow,
    ) -> TemporalResult<IsoDate> {
        date.add_date_duration(duration, overflow)
    }

    fn date_until(
        &self,
        one: &IsoDate,
        two: &IsoDate,
        largest_unit: Unit,
    ) -> TemporalResult<DateDuration> {
        one.diff_iso_date(two, largest_unit)
    }

    fn year(&self, date: &IsoDate) -> i32 {
        date.year
    }

    fn month(&self, date: &IsoDate) -> u8 {
        date.month
    }

    fn month_code(&self, date: &IsoDate) -> MonthCode {
        MonthCode(ISO_MONTH_CODES[usize::from(date.month.saturating_sub(1)) % 12])
    }

    fn day(&self, date: &IsoDate) -> u8 {
        date.day
    }

    fn day_of_week(&self, date: &IsoDate) -> u16 {
        utils::iso_day_of_week(date.year, date.month, date.day)
    }

    fn day_of_year(&self, date: &IsoDate) -> u16 {
        utils::iso_day_of_year(date.year, date.month, date.day)
    }

    fn week_of_year(&self, date: &IsoDate) -> Option<u8> {
        Some(utils::iso_week_of_year(date.year, date.month, date.day).0)
    }

    fn year_of_week(&self, date: &IsoDate) -> Option<i32> {
        Some(utils::iso_week_of_year(date.year, date.month, date.day).1)
    }

    fn days_in_week(&self, _date: &IsoDate) -> u16 {
        7
    }

    fn days_in_month(&self, date: &IsoDate) -> u16 {
        utils::iso_days_in_month(date.year, date.month).into()
    }

    fn days_in_year(&self, date: &IsoDate) -> u16 {
        utils::iso_days_in_year(date.year)
    }

    fn months_in_year(&self, _date: &IsoDate) -> u16 {
        12
    }

    fn in_leap_year(&self, date: &IsoDate) -> bool {
        utils::is_leap_year(date.year)
    }
}
