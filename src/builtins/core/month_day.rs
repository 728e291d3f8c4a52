//! This module implements `MonthDay` and any directly related algorithms.

use core::str::FromStr;

use crate::{
    builtins::core::{
        calendar::{Calendar, MonthCode, MONTH_DAY_REFERENCE_YEAR},
        PartialDate, PlainDate,
    },
    error::ErrorMessage,
    iso::IsoDate,
    options::Overflow,
    parsers::parse_month_day,
    TemporalError, TemporalResult,
};

/// The native Rust implementation of `Temporal.PlainMonthDay`
#[non_exhaustive]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PlainMonthDay {
    pub(crate) iso: IsoDate,
    calendar: Calendar,
}

impl PlainMonthDay {
    /// Creates a new unchecked `PlainMonthDay`
    #[inline]
    #[must_use]
    pub(crate) fn new_unchecked(iso: IsoDate, calendar: Calendar) -> Self {
        Self { iso, calendar }
    }

    /// The fields that identify a month-day, without a year.
    fn fields(&self) -> PartialDate {
        PartialDate::new()
            .with_month_code(Some(self.month_code()))
            .with_day(Some(self.day()))
    }

    /// Creates a new `PlainMonthDay`, constraining an invalid month or day.
    #[inline]
    pub fn new(month: u8, day: u8, calendar: Calendar) -> TemporalResult<Self> {
        Self::new_with_overflow(month, day, calendar, Overflow::Constrain, None)
    }

    /// Creates a new valid `PlainMonthDay`.
    ///
    /// The day is validated against `ref_year` when one is provided, and is
    /// then stored against the 1972 reference year.
    #[inline]
    pub fn new_with_overflow(
        month: u8,
        day: u8,
        calendar: Calendar,
        overflow: Overflow,
        ref_year: Option<i32>,
    ) -> TemporalResult<Self> {
        let year = ref_year.unwrap_or(MONTH_DAY_REFERENCE_YEAR);
        let regulated = IsoDate::regulate(year, month.into(), day.into(), overflow)?;
        let iso = IsoDate::regulate(
            MONTH_DAY_REFERENCE_YEAR,
            regulated.month.into(),
            regulated.day.into(),
            Overflow::Constrain,
        )?;
        Ok(Self::new_unchecked(iso, calendar))
    }

    /// Creates a `PlainMonthDay` from a `PartialDate`.
    ///
    /// ```rust
    /// use temporal_engine::{calendar::MonthCode, partial::PartialDate, PlainMonthDay};
    /// use core::str::FromStr;
    ///
    /// let partial = PartialDate::new()
    ///     .with_year(Some(2023))
    ///     .with_month_code(Some(MonthCode::from_str("M02").unwrap()))
    ///     .with_day(Some(29));
    ///
    /// let month_day = PlainMonthDay::from_partial(partial, None, None).unwrap();
    /// assert_eq!(month_day.day(), 28);
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
        let iso = calendar.month_day_from_fields(&partial, overflow.unwrap_or_default())?;
        Ok(Self::new_unchecked(iso, calendar))
    }

    /// Creates a new `PlainMonthDay` with the partial fields merged over the
    /// current month code and day.
    pub fn with(&self, partial: PartialDate, overflow: Option<Overflow>) -> TemporalResult<Self> {
        if partial.is_empty() {
            return Err(TemporalError::r#type().with_enum(ErrorMessage::EmptyPartial));
        }
        let fields = self.calendar.merge_fields(&self.fields(), &partial);
        let iso = self
            .calendar
            .month_day_from_fields(&fields, overflow.unwrap_or_default())?;
        Ok(Self::new_unchecked(iso, self.calendar.clone()))
    }

    /// Returns the ISO day value of `PlainMonthDay`.
    #[inline]
    #[must_use]
    pub fn iso_day(&self) -> u8 {
        self.iso.day
    }

    // Returns the ISO month value of `PlainMonthDay`.
    #[inline]
    #[must_use]
    pub fn iso_month(&self) -> u8 {
        self.iso.month
    }

    // Returns the ISO year value of `PlainMonthDay`.
    #[inline]
    #[must_use]
    pub fn iso_year(&self) -> i32 {
        self.iso.year
    }

    /// Returns a reference to `PlainMonthDay`'s inner `Calendar`.
    #[inline]
    #[must_use]
    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Returns the calendar `monthCode` value of `PlainMonthDay`.
    #[inline]
    pub fn month_code(&self) -> MonthCode {
        self.calendar.month_code(&self.iso)
    }

    /// Returns the calendar day value of `PlainMonthDay`.
    #[inline]
    pub fn day(&self) -> u8 {
        self.calendar.day(&self.iso)
    }

    /// Creates a `PlainDate` for this month-day in `year`, constraining the
    /// day when `year` is not a leap year.
    pub fn to_plain_date(&self, year: i32) -> TemporalResult<PlainDate> {
        let fields = self.fields().with_year(Some(year));
        PlainDate::from_partial(fields, Some(self.calendar.clone()), Some(Overflow::Constrain))
    }
}

impl FromStr for PlainMonthDay {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = parse_month_day(s)?;
        Self::new_with_overflow(
            parsed.date.month,
            parsed.date.day,
            parsed.calendar,
            Overflow::Reject,
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use super::PlainMonthDay;
    use crate::{
        builtins::core::{calendar::MonthCode, PartialDate},
        error::ErrorKind,
        options::Overflow,
        Calendar,
    };

    #[test]
    fn leap_day_is_representable() {
        let md = PlainMonthDay::from_str("--02-29").unwrap();
        assert_eq!((md.month_code().as_str(), md.day()), ("M02", 29));
        assert_eq!(md.iso_year(), 1972);

        let date = md.to_plain_date(2023).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2023, 2, 28));
        let date = md.to_plain_date(2024).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 2, 29));
    }

    #[test]
    fn reference_year_constrains_then_discards() {
        let md = PlainMonthDay::new_with_overflow(
            2,
            29,
            Calendar::default(),
            Overflow::Constrain,
            Some(2023),
        )
        .unwrap();
        assert_eq!((md.iso_year(), md.iso_month(), md.iso_day()), (1972, 2, 28));

        let err = PlainMonthDay::new_with_overflow(
            2,
            29,
            Calendar::default(),
            Overflow::Reject,
            Some(2023),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn from_partial_month_code_preferred() {
        let partial = PartialDate::new()
            .with_month_code(Some(MonthCode::from_str("M04").unwrap()))
            .with_day(Some(31));
        let md = PlainMonthDay::from_partial(partial, None, None).unwrap();
        assert_eq!((md.iso_month(), md.day()), (4, 30));

        // A bare month is ambiguous without a year.
        let partial = PartialDate::new().with_month(Some(4)).with_day(Some(1));
        let err = PlainMonthDay::from_partial(partial, None, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);

        let partial = partial.with_year(Some(2021));
        let md = PlainMonthDay::from_partial(partial, None, None).unwrap();
        assert_eq!((md.iso_year(), md.iso_month(), md.day()), (1972, 4, 1));
    }

    #[test]
    fn with_merges_fields() {
        let md = PlainMonthDay::new(1, 31, Calendar::default()).unwrap();

        let result = md.with(PartialDate::new().with_day(Some(15)), None).unwrap();
        assert_eq!((result.iso_month(), result.day()), (1, 15));

        let code = MonthCode::from_str("M06").unwrap();
        let result = md
            .with(PartialDate::new().with_month_code(Some(code)), None)
            .unwrap();
        assert_eq!((result.iso_month(), result.day()), (6, 30));

        let err = md
            .with(PartialDate::new().with_month(Some(6)), None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }
}
