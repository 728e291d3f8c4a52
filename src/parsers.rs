//! This module implements Temporal Date/Time parsing functionality.
//!
//! Parsing is delegated to [`ixdtf`]; this module enforces the Temporal
//! specific requirements on top of the parsed records.

use alloc::format;

use ixdtf::{
    encoding::Utf8,
    parsers::{IsoDurationParser, IxdtfParser},
    records::{
        Annotation, DateRecord, Fraction, IxdtfParseRecord, TimeDurationRecord, TimeRecord,
        UtcOffsetRecordOrZ,
    },
    ParseError,
};

use crate::{
    builtins::core::{calendar::Calendar, Duration},
    error::ErrorMessage,
    iso::IsoTime,
    options::Overflow,
    TemporalError, TemporalResult,
};

/// A parsed civil value: the raw date fields, an optional time, and the
/// resolved calendar.
#[derive(Debug, Clone)]
pub(crate) struct ParsedCivilValue {
    pub(crate) date: DateRecord,
    pub(crate) time: Option<IsoTime>,
    pub(crate) calendar: Calendar,
}

fn syntax_error(err: ParseError) -> TemporalError {
    TemporalError::syntax().with_message(format!("{err:?}"))
}

#[derive(PartialEq)]
enum ParseVariant {
    YearMonth,
    MonthDay,
    DateTime,
    Time,
}

#[inline]
fn parse_ixdtf(source: &[u8], variant: ParseVariant) -> TemporalResult<IxdtfParseRecord<'_, Utf8>> {
    fn cast_handler<'a>(
        _: &mut IxdtfParser<'a, Utf8>,
        handler: impl FnMut(Annotation<'a, Utf8>) -> Option<Annotation<'a, Utf8>>,
    ) -> impl FnMut(Annotation<'a, Utf8>) -> Option<Annotation<'a, Utf8>> {
        handler
    }

    let mut first_calendar: Option<Annotation<Utf8>> = None;
    let mut critical_duplicate_calendar = false;
    let mut parser = IxdtfParser::from_utf8(source);

    let handler = cast_handler(&mut parser, |annotation: Annotation<Utf8>| {
        if annotation.key == "u-ca".as_bytes() {
            match first_calendar {
                Some(ref cal) => {
                    if cal.critical || annotation.critical {
                        critical_duplicate_calendar = true
                    }
                }
                None => first_calendar = Some(annotation),
            }
            return None;
        }

        // Make the parser handle any unknown annotation.
        Some(annotation)
    });

    let mut record = match variant {
        ParseVariant::YearMonth => parser.parse_year_month_with_annotation_handler(handler),
        ParseVariant::MonthDay => parser.parse_month_day_with_annotation_handler(handler),
        ParseVariant::DateTime => parser.parse_with_annotation_handler(handler),
        ParseVariant::Time => parser.parse_time_with_annotation_handler(handler),
    }
    .map_err(syntax_error)?;

    if critical_duplicate_calendar {
        return Err(TemporalError::range()
            .with_message("Duplicate calendar value with critical flag found."));
    }

    if variant != ParseVariant::Time && record.date.is_none() {
        return Err(TemporalError::range().with_enum(ErrorMessage::ParserNeedsDate));
    }

    // Plain values never carry a UTC designator.
    if record.offset == Some(UtcOffsetRecordOrZ::Z) {
        return Err(TemporalError::range().with_enum(ErrorMessage::UtcDesignatorNotAllowed));
    }

    record.calendar = first_calendar.map(|v| v.value);

    Ok(record)
}

fn into_civil_value(record: IxdtfParseRecord<'_, Utf8>) -> TemporalResult<ParsedCivilValue> {
    let date = record
        .date
        .ok_or(TemporalError::range().with_enum(ErrorMessage::ParserNeedsDate))?;
    let time = record.time.map(time_from_record).transpose()?;
    let calendar = record
        .calendar
        .map(Calendar::from_utf8)
        .transpose()?
        .unwrap_or_default();
    Ok(ParsedCivilValue {
        date,
        time,
        calendar,
    })
}

/// Converts a parsed `TimeRecord` into an `IsoTime`, rejecting invalid fields.
pub(crate) fn time_from_record(record: TimeRecord) -> TemporalResult<IsoTime> {
    let nanoseconds = fraction_to_nanoseconds(record.fraction)?;
    // Leap seconds are read as the last second of the minute.
    let second = record.second.min(59);
    IsoTime::new(
        record.hour.into(),
        record.minute.into(),
        second.into(),
        (nanoseconds / 1_000_000) as i32,
        (nanoseconds / 1_000 % 1_000) as i32,
        (nanoseconds % 1_000) as i32,
        Overflow::Reject,
    )
}

fn fraction_to_nanoseconds(fraction: Option<Fraction>) -> TemporalResult<u32> {
    match fraction {
        Some(fraction) => fraction.to_nanoseconds().ok_or(
            TemporalError::range().with_message("fractional part exceeds nanosecond precision."),
        ),
        None => Ok(0),
    }
}

/// Parses a `DateTime` string; the time portion is optional.
#[inline]
pub(crate) fn parse_date_time(source: &str) -> TemporalResult<ParsedCivilValue> {
    into_civil_value(parse_ixdtf(source.as_bytes(), ParseVariant::DateTime)?)
}

/// Parses a `Time` string, which may also be a full date-time string.
pub(crate) fn parse_time(source: &str) -> TemporalResult<IsoTime> {
    let record = match parse_ixdtf(source.as_bytes(), ParseVariant::Time) {
        Ok(record) => record,
        Err(err) if err.kind() == crate::error::ErrorKind::Syntax => {
            parse_ixdtf(source.as_bytes(), ParseVariant::DateTime)?
        }
        Err(err) => return Err(err),
    };
    let time = record
        .time
        .ok_or(TemporalError::range().with_enum(ErrorMessage::ParserNeedsTime))?;
    time_from_record(time)
}

/// Parses a `YearMonth` string, falling back to a full date string.
#[inline]
pub(crate) fn parse_year_month(source: &str) -> TemporalResult<ParsedCivilValue> {
    match parse_ixdtf(source.as_bytes(), ParseVariant::YearMonth) {
        Ok(record) => into_civil_value(record),
        Err(err) => parse_date_time(source).map_err(|_| err),
    }
}

/// Parses a `MonthDay` string, falling back to a full date string.
#[inline]
pub(crate) fn parse_month_day(source: &str) -> TemporalResult<ParsedCivilValue> {
    match parse_ixdtf(source.as_bytes(), ParseVariant::MonthDay) {
        Ok(record) => into_civil_value(record),
        Err(err) => parse_date_time(source).map_err(|_| err),
    }
}

/// Parses an ISO 8601 duration string such as `P1Y2M3W4DT5H6M7.008009010S`.
pub(crate) fn parse_duration(source: &str) -> TemporalResult<Duration> {
    let parse_record = IsoDurationParser::<Utf8>::from_utf8(source.as_bytes())
        .parse()
        .map_err(syntax_error)?;

    // A fractional unit spreads its fraction across the smaller units.
    let (hours, minutes, seconds, sub_second_ns) = match parse_record.time {
        Some(TimeDurationRecord::Hours { hours, fraction }) => {
            let fraction_ns = u64::from(fraction_to_nanoseconds(fraction)?) * 3600;
            let minutes = fraction_ns / 60_000_000_000;
            let rem = fraction_ns % 60_000_000_000;
            (u64::from(hours), minutes, rem / 1_000_000_000, rem % 1_000_000_000)
        }
        Some(TimeDurationRecord::Minutes {
            hours,
            minutes,
            fraction,
        }) => {
            let fraction_ns = u64::from(fraction_to_nanoseconds(fraction)?) * 60;
            (
                u64::from(hours),
                u64::from(minutes),
                fraction_ns / 1_000_000_000,
                fraction_ns % 1_000_000_000,
            )
        }
        Some(TimeDurationRecord::Seconds {
            hours,
            minutes,
            seconds,
            fraction,
        }) => (
            u64::from(hours),
            u64::from(minutes),
            u64::from(seconds),
            u64::from(fraction_to_nanoseconds(fraction)?),
        ),
        None => (0, 0, 0, 0),
    };

    let (years, months, weeks, days) = match parse_record.date {
        Some(date) => (date.years, date.months, date.weeks, date.days),
        None => (0, 0, 0, 0),
    };

    let sign = f64::from(parse_record.sign as i8);
    Duration::new(
        sign * years as f64,
        sign * months as f64,
        sign * weeks as f64,
        sign * days as f64,
        sign * hours as f64,
        sign * minutes as f64,
        sign * seconds as f64,
        sign * (sub_second_ns / 1_000_000) as f64,
        sign * (sub_second_ns / 1_000 % 1_000) as f64,
        sign * (sub_second_ns % 1_000) as f64,
    )
}

#[cfg(test)]
mod tests {
    use super::{parse_date_time, parse_duration, parse_month_day, parse_time, parse_year_month};
    use crate::error::ErrorKind;

    #[test]
    fn date_time_with_annotations() {
        let parsed = parse_date_time("2021-03-31T12:30:00.5[u-ca=iso8601]").unwrap();
        assert_eq!((parsed.date.year, parsed.date.month, parsed.date.day), (2021, 3, 31));
        let time = parsed.time.unwrap();
        assert_eq!((time.hour, time.minute, time.millisecond), (12, 30, 500));
        assert!(parsed.calendar.is_iso());

        let parsed = parse_date_time("2021-03-31").unwrap();
        assert!(parsed.time.is_none());
    }

    #[test]
    fn rejects_utc_designator_and_unknown_calendars() {
        let err = parse_date_time("2019-10-01T09:00:00Z").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert!(parse_time("09:00:00Z").is_err());

        let err = parse_date_time("2021-03-31[u-ca=gregory]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);

        let err = parse_date_time("2021-03-31[!u-ca=iso8601][!u-ca=iso8601]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn malformed_input_is_a_syntax_error() {
        for invalid in ["", "2021-3-31", "not a date", "P", "PT"] {
            let date_err = parse_date_time(invalid).map(|_| ()).unwrap_err();
            assert_eq!(date_err.kind(), ErrorKind::Syntax, "{invalid}");
        }
        assert_eq!(parse_duration("P1Y1").unwrap_err().kind(), ErrorKind::Syntax);
    }

    #[test]
    fn year_month_and_month_day_forms() {
        let parsed = parse_year_month("2021-03").unwrap();
        assert_eq!((parsed.date.year, parsed.date.month), (2021, 3));
        let parsed = parse_year_month("2021-03-31T00:00").unwrap();
        assert_eq!((parsed.date.year, parsed.date.month), (2021, 3));

        let parsed = parse_month_day("--02-29").unwrap();
        assert_eq!((parsed.date.month, parsed.date.day), (2, 29));
        let parsed = parse_month_day("2021-02-28").unwrap();
        assert_eq!((parsed.date.month, parsed.date.day), (2, 28));
    }

    #[test]
    fn duration_fractions_spread_downward() {
        let duration = parse_duration("P1Y2M3W4DT5H6M7.008009010S").unwrap();
        assert_eq!(
            duration.fields(),
            [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]
        );

        let duration = parse_duration("PT1.5H").unwrap();
        assert_eq!((duration.hours(), duration.minutes()), (1.0, 30.0));

        let duration = parse_duration("-PT0.5M").unwrap();
        assert_eq!(duration.seconds(), -30.0);
    }
}
