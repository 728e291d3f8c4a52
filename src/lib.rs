//! The `temporal_engine` crate is the value model and arithmetic engine
//! behind calendar-aware date, time and duration types.
//!
//! ```rust
//! use temporal_engine::{options::{DifferenceSettings, Unit}, Duration, PlainDate};
//! use core::str::FromStr;
//!
//! let start = PlainDate::from_str("2021-01-31").unwrap();
//! let end = PlainDate::from_str("2021-03-31").unwrap();
//!
//! let mut settings = DifferenceSettings::default();
//! settings.largest_unit = Some(Unit::Month);
//! let difference = start.until(&end, settings).unwrap();
//! assert_eq!(difference.months(), 2.0);
//! assert_eq!(difference.days(), 0.0);
//!
//! let one_month = Duration::from_str("P1M").unwrap();
//! let clamped = start.add(&one_month, None).unwrap();
//! assert_eq!((clamped.month(), clamped.day()), (2, 28));
//! ```
//!
//! The model follows the [`Temporal`][proposal] proposal for ECMAScript:
//! values are immutable, every constructor and operation is fallible, and
//! month and year arithmetic is always performed through a [`Calendar`].
//!
//! [proposal]: https://github.com/tc39/proposal-temporal
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::too_many_lines,
    clippy::missing_errors_doc,
    // Field values are range checked before every narrowing cast.
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,
)]

extern crate alloc;
extern crate core;

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod error;
pub mod iso;
pub mod options;
pub mod parsers;
pub mod rounding;

mod builtins;

#[doc(hidden)]
pub(crate) mod utils;

use core::cmp::Ordering;

/// Re-export of `TinyAsciiStr` from `tinystr`.
pub use tinystr::TinyAsciiStr;

#[doc(inline)]
pub use error::TemporalError;

/// The `Temporal` result type
pub type TemporalResult<T> = Result<T, TemporalError>;

pub mod partial {
    //! Partial Date/Time component records.
    //!
    //! Partial records are the input to `from_partial` and `with` style
    //! constructors, where any field may be absent.
    pub use crate::builtins::core::{
        calendar::FieldName, PartialDate, PartialDateTime, PartialDuration, PartialTime,
    };
}

pub mod calendar {
    //! The calendar abstraction and the built-in ISO 8601 calendar.
    pub use crate::builtins::core::calendar::{
        Calendar, CalendarProtocol, IsoCalendar, MonthCode, ISO_IDENTIFIER,
    };
}

pub use crate::builtins::core::{
    calendar::Calendar, DateDuration, Duration, Instant, PlainDate, PlainDateTime, PlainMonthDay,
    PlainTime, PlainYearMonth, TimeDuration,
};

/// A library specific trait for unwrapping assertions.
pub(crate) trait TemporalUnwrap {
    type Output;

    /// Assertion based unwrapping. This will panic in debug builds, but
    /// returns an error during runtime.
    fn temporal_unwrap(self) -> TemporalResult<Self::Output>;
}

impl<T> TemporalUnwrap for Option<T> {
    type Output = T;

    fn temporal_unwrap(self) -> TemporalResult<Self::Output> {
        debug_assert!(self.is_some());
        self.ok_or(TemporalError::assert())
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! temporal_assert {
    ($condition:expr $(,)*) => {
        if !$condition {
            #[cfg(feature = "log")]
            log::error!("assertion failed: {}", stringify!($condition));
            return Err(TemporalError::assert());
        }
    };
    ($condition:expr, $($args:tt)+) => {
        if !$condition {
            #[cfg(feature = "log")]
            log::error!($($args)+);
            return Err(TemporalError::assert());
        }
    };
}

/// A general Sign type.
#[repr(i8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Sign {
    #[default]
    Positive = 1,
    Zero = 0,
    Negative = -1,
}

impl From<i8> for Sign {
    fn from(value: i8) -> Self {
        match value.cmp(&0) {
            Ordering::Greater => Self::Positive,
            Ordering::Equal => Self::Zero,
            Ordering::Less => Self::Negative,
        }
    }
}

impl From<Ordering> for Sign {
    fn from(value: Ordering) -> Self {
        match value {
            Ordering::Greater => Self::Positive,
            Ordering::Equal => Self::Zero,
            Ordering::Less => Self::Negative,
        }
    }
}

impl Sign {
    /// Coerces the current `Sign` to be either negative or positive.
    pub(crate) fn as_sign_multiplier(&self) -> i8 {
        if matches!(self, Self::Zero) {
            return 1;
        }
        *self as i8
    }

    pub(crate) fn negate(&self) -> Sign {
        Sign::from(-(*self as i8))
    }

    /// Returns the sign of an `f64`, treating both zeroes as `Zero`.
    pub(crate) fn from_f64(value: f64) -> Self {
        if value > 0.0 {
            Self::Positive
        } else if value < 0.0 {
            Self::Negative
        } else {
            Self::Zero
        }
    }
}

// Relevant numeric constants
/// Nanoseconds per day constant: 8.64e+13
pub const NS_PER_DAY: u64 = MS_PER_DAY as u64 * 1_000_000;
/// Milliseconds per day constant: 8.64e+7
pub const MS_PER_DAY: u32 = 24 * 60 * 60 * 1000;
/// Max Instant nanosecond constant
#[doc(hidden)]
pub(crate) const NS_MAX_INSTANT: i128 = NS_PER_DAY as i128 * 100_000_000i128;
/// Min Instant nanosecond constant
#[doc(hidden)]
pub(crate) const NS_MIN_INSTANT: i128 = -NS_MAX_INSTANT;
