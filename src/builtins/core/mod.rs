//! The native Rust implementations of the Temporal value types.

pub(crate) mod calendar;
pub(crate) mod duration;

mod date;
mod datetime;
mod instant;
mod month_day;
mod time;
mod year_month;

#[doc(inline)]
pub use date::{PartialDate, PlainDate};
#[doc(inline)]
pub use datetime::{PartialDateTime, PlainDateTime};
#[doc(inline)]
pub use duration::{DateDuration, Duration, PartialDuration, TimeDuration};
#[doc(inline)]
pub use instant::Instant;
#[doc(inline)]
pub use month_day::PlainMonthDay;
#[doc(inline)]
pub use time::{PartialTime, PlainTime};
#[doc(inline)]
pub use year_month::PlainYearMonth;
