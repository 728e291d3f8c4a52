//! This module implements `TemporalError`.

use alloc::borrow::Cow;
use core::fmt;

/// `TemporalError`'s error type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Error.
    #[default]
    Generic,
    /// TypeError
    Type,
    /// RangeError
    Range,
    /// SyntaxError
    Syntax,
    /// Assert
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => "Error",
            Self::Type => "TypeError",
            Self::Range => "RangeError",
            Self::Syntax => "SyntaxError",
            Self::Assert => "ImplementationError",
        }
        .fmt(f)
    }
}

/// The error type for `temporal_engine`.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
}

impl TemporalError {
    #[inline]
    #[must_use]
    const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
        }
    }

    /// Create a generic error
    #[inline]
    #[must_use]
    pub fn general<S>(msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Self::new(ErrorKind::Generic).with_message(msg)
    }

    /// Create a range error.
    #[inline]
    #[must_use]
    pub const fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Create a type error.
    #[inline]
    #[must_use]
    pub const fn r#type() -> Self {
        Self::new(ErrorKind::Type)
    }

    /// Create a syntax error.
    #[inline]
    #[must_use]
    pub const fn syntax() -> Self {
        Self::new(ErrorKind::Syntax)
    }

    /// Creates an assertion error
    #[inline]
    #[must_use]
    #[cfg_attr(debug_assertions, track_caller)]
    pub(crate) const fn assert() -> Self {
        #[cfg(not(debug_assertions))]
        {
            Self::new(ErrorKind::Assert)
        }
        #[cfg(debug_assertions)]
        Self {
            kind: ErrorKind::Assert,
            msg: Cow::Borrowed(core::panic::Location::caller().file()),
        }
    }

    /// Add a message to the error.
    #[inline]
    #[must_use]
    pub fn with_message<S>(mut self, msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        self.msg = msg.into();
        self
    }

    /// Add a message enum to the error.
    #[inline]
    #[must_use]
    pub(crate) fn with_enum(mut self, msg: ErrorMessage) -> Self {
        self.msg = Cow::Borrowed(msg.to_str());
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Extracts the error message.
    #[inline]
    #[must_use]
    pub fn into_message(self) -> Cow<'static, str> {
        self.msg
    }
}

impl fmt::Display for TemporalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        let msg = self.msg.trim();
        if !msg.is_empty() {
            write!(f, ": {msg}")?;
        }

        Ok(())
    }
}

impl core::error::Error for TemporalError {}

/// The error message
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorMessage {
    // Range
    InstantOutOfRange,
    DateOutOfRange,
    DateTimeOutOfRange,
    YearMonthOutOfRange,
    DurationOutOfRange,

    // Numerical errors
    NumberNotFinite,
    NumberNotIntegral,
    NumberOutOfRange,
    MixedSignDuration,

    // Options validity
    SmallestUnitNotTimeUnit,
    SmallestUnitLargerThanLargestUnit,
    UnitNotAllowed,
    UnitRequired,
    RelativeToRequired,
    CalendarUnitsNotAllowed,

    // Field mismatches
    CalendarMismatch,
    MonthCodeInvalid,
    MonthMonthCodeMismatch,
    MissingRequiredField,
    EmptyPartial,

    // Parsing
    ParserNeedsDate,
    ParserNeedsTime,
    UtcDesignatorNotAllowed,
    CalendarUnknown,
}

impl ErrorMessage {
    pub(crate) fn to_str(self) -> &'static str {
        match self {
            Self::InstantOutOfRange => "Instant nanoseconds are not within a valid epoch range.",
            Self::DateOutOfRange => "Date is outside the representable range.",
            Self::DateTimeOutOfRange => "DateTime is outside the representable range.",
            Self::YearMonthOutOfRange => "YearMonth is outside the representable range.",
            Self::DurationOutOfRange => "Duration exceeds the maximum representable time.",
            Self::NumberNotFinite => "number value is not a finite value.",
            Self::NumberNotIntegral => "value must be integral.",
            Self::NumberOutOfRange => "number exceeded a valid range.",
            Self::MixedSignDuration => "Duration components must all share the same sign.",
            Self::SmallestUnitNotTimeUnit => "smallestUnit must be a valid time unit.",
            Self::SmallestUnitLargerThanLargestUnit => {
                "smallestUnit was larger than largestUnit in the provided options."
            }
            Self::UnitNotAllowed => "The provided unit is not allowed for this operation.",
            Self::UnitRequired => "smallestUnit and largestUnit cannot both be absent.",
            Self::RelativeToRequired => "relativeTo is required to round calendar units.",
            Self::CalendarUnitsNotAllowed => {
                "years, months and weeks are not allowed without a calendar context."
            }
            Self::CalendarMismatch => {
                "Calendar must be the same for operations involving two calendared types."
            }
            Self::MonthCodeInvalid => "monthCode is not valid for the calendar.",
            Self::MonthMonthCodeMismatch => "month and monthCode do not agree.",
            Self::MissingRequiredField => "A required field is missing from the partial record.",
            Self::EmptyPartial => "At least one field must be provided.",
            Self::ParserNeedsDate => "Could not find a valid DateRecord node during parsing.",
            Self::ParserNeedsTime => "Could not find a valid TimeRecord node during parsing.",
            Self::UtcDesignatorNotAllowed => "UTC designator is not valid for plain types.",
            Self::CalendarUnknown => "Unknown calendar identifier.",
        }
    }
}
