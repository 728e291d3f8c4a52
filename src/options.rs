//! Native implementation of the `Temporal` options.
//!
//! Temporal has various instances where user's can define options for how an
//! operation may be completed.

use crate::error::ErrorMessage;
use crate::{Sign, TemporalError, TemporalResult, MS_PER_DAY, NS_PER_DAY};
use core::{fmt, num::NonZeroU128, str::FromStr};

mod increment;

pub use increment::RoundingIncrement;

// ==== RoundingOptions / DifferenceSettings ====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DifferenceOperation {
    Until,
    Since,
}

/// The options accepted by the `until` and `since` operations.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy)]
pub struct DifferenceSettings {
    pub largest_unit: Option<Unit>,
    pub smallest_unit: Option<Unit>,
    pub rounding_mode: Option<RoundingMode>,
    pub increment: Option<RoundingIncrement>,
}

/// The options accepted by the `round` operations.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy)]
pub struct RoundingOptions {
    pub largest_unit: Option<Unit>,
    pub smallest_unit: Option<Unit>,
    pub rounding_mode: Option<RoundingMode>,
    pub increment: Option<RoundingIncrement>,
}

/// Internal options object that represents the resolved rounding options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ResolvedRoundingOptions {
    pub(crate) largest_unit: Unit,
    pub(crate) smallest_unit: Unit,
    pub(crate) increment: RoundingIncrement,
    pub(crate) rounding_mode: RoundingMode,
}

/// The inclusive range of units an operation accepts, smallest first.
#[derive(Debug, Clone, Copy)]
pub(crate) struct UnitGroup {
    pub(crate) smallest: Unit,
    pub(crate) largest: Unit,
}

impl UnitGroup {
    pub(crate) const DATE: Self = Self::new(Unit::Day, Unit::Year);
    pub(crate) const DATETIME: Self = Self::new(Unit::Nanosecond, Unit::Year);
    pub(crate) const YEAR_MONTH: Self = Self::new(Unit::Month, Unit::Year);
    pub(crate) const TIME: Self = Self::new(Unit::Nanosecond, Unit::Hour);
    pub(crate) const INSTANT: Self = Self::new(Unit::Nanosecond, Unit::Day);

    const fn new(smallest: Unit, largest: Unit) -> Self {
        Self { smallest, largest }
    }

    fn check(&self, unit: Unit) -> TemporalResult<()> {
        if unit == Unit::Auto || unit < self.smallest || unit > self.largest {
            return Err(TemporalError::range().with_enum(ErrorMessage::UnitNotAllowed));
        }
        Ok(())
    }
}

impl ResolvedRoundingOptions {
    pub(crate) fn from_diff_settings(
        options: DifferenceSettings,
        operation: DifferenceOperation,
        group: UnitGroup,
        fallback_largest: Unit,
        fallback_smallest: Unit,
    ) -> TemporalResult<(Sign, Self)> {
        let increment = options.increment.unwrap_or_default();
        let (sign, rounding_mode) = match operation {
            DifferenceOperation::Since => {
                let mode = options.rounding_mode.unwrap_or(RoundingMode::Trunc).negate();
                (Sign::Negative, mode)
            }
            DifferenceOperation::Until => (
                Sign::Positive,
                options.rounding_mode.unwrap_or(RoundingMode::Trunc),
            ),
        };
        let smallest_unit = options.smallest_unit.unwrap_or(fallback_smallest);
        group.check(smallest_unit)?;

        // Use the defaultlargestunit which is max smallestlargestdefault and smallestunit
        let default_largest = smallest_unit.max(fallback_largest);
        let largest_unit = match options.largest_unit {
            Some(Unit::Auto) | None => default_largest,
            Some(unit) => unit,
        };
        group.check(largest_unit)?;

        if largest_unit < smallest_unit {
            return Err(
                TemporalError::range().with_enum(ErrorMessage::SmallestUnitLargerThanLargestUnit)
            );
        }

        if let Some(max) = smallest_unit.to_maximum_rounding_increment() {
            increment.validate(max.into(), false)?;
        }

        let resolved = ResolvedRoundingOptions {
            largest_unit,
            smallest_unit,
            increment,
            rounding_mode,
        };

        Ok((sign, resolved))
    }

    pub(crate) fn from_duration_options(
        options: RoundingOptions,
        existing_largest: Unit,
    ) -> TemporalResult<Self> {
        if options.largest_unit.is_none() && options.smallest_unit.is_none() {
            return Err(TemporalError::range().with_enum(ErrorMessage::UnitRequired));
        }

        let increment = options.increment.unwrap_or_default();
        let rounding_mode = options.rounding_mode.unwrap_or_default();
        let smallest_unit = options.smallest_unit.unwrap_or(Unit::Nanosecond);
        UnitGroup::DATETIME.check(smallest_unit)?;

        let default_largest = existing_largest.max(smallest_unit);

        let largest_unit = match options.largest_unit {
            Some(Unit::Auto) | None => default_largest,
            Some(unit) => unit,
        };

        if largest_unit < smallest_unit {
            return Err(
                TemporalError::range().with_enum(ErrorMessage::SmallestUnitLargerThanLargestUnit)
            );
        }

        if let Some(max) = smallest_unit.to_maximum_rounding_increment() {
            increment.validate(max.into(), false)?;
        }

        Ok(Self {
            largest_unit,
            smallest_unit,
            increment,
            rounding_mode,
        })
    }

    pub(crate) fn from_datetime_options(options: RoundingOptions) -> TemporalResult<Self> {
        let increment = options.increment.unwrap_or_default();
        let rounding_mode = options.rounding_mode.unwrap_or_default();
        let Some(smallest_unit) = options.smallest_unit else {
            return Err(TemporalError::range().with_enum(ErrorMessage::UnitRequired));
        };
        let (maximum, inclusive) = match smallest_unit {
            Unit::Day => (1, true),
            unit if unit.is_time_unit() => (unit.to_maximum_rounding_increment().unwrap_or(1), false),
            _ => return Err(TemporalError::range().with_enum(ErrorMessage::UnitNotAllowed)),
        };

        increment.validate(maximum.into(), inclusive)?;

        Ok(Self {
            largest_unit: Unit::Auto,
            smallest_unit,
            increment,
            rounding_mode,
        })
    }

    pub(crate) fn from_time_options(options: RoundingOptions) -> TemporalResult<Self> {
        let increment = options.increment.unwrap_or_default();
        let rounding_mode = options.rounding_mode.unwrap_or_default();
        let Some(smallest_unit) = options.smallest_unit else {
            return Err(TemporalError::range().with_enum(ErrorMessage::UnitRequired));
        };
        let Some(maximum) = smallest_unit
            .is_time_unit()
            .then(|| smallest_unit.to_maximum_rounding_increment())
            .flatten()
        else {
            return Err(TemporalError::range().with_enum(ErrorMessage::SmallestUnitNotTimeUnit));
        };

        increment.validate(maximum.into(), false)?;

        Ok(Self {
            largest_unit: Unit::Auto,
            smallest_unit,
            increment,
            rounding_mode,
        })
    }

    pub(crate) fn from_instant_options(options: RoundingOptions) -> TemporalResult<Self> {
        let increment = options.increment.unwrap_or_default();
        let rounding_mode = options.rounding_mode.unwrap_or_default();
        let Some(smallest_unit) = options.smallest_unit else {
            return Err(TemporalError::range().with_enum(ErrorMessage::UnitRequired));
        };
        let maximum = match smallest_unit {
            Unit::Hour => 24u64,
            Unit::Minute => 24 * 60,
            Unit::Second => 24 * 3600,
            Unit::Millisecond => MS_PER_DAY as u64,
            Unit::Microsecond => MS_PER_DAY as u64 * 1000,
            Unit::Nanosecond => NS_PER_DAY,
            _ => return Err(TemporalError::range().with_enum(ErrorMessage::SmallestUnitNotTimeUnit)),
        };

        increment.validate(maximum, true)?;

        Ok(Self {
            largest_unit: Unit::Auto,
            smallest_unit,
            increment,
            rounding_mode,
        })
    }

    pub(crate) fn is_noop(&self) -> bool {
        self.smallest_unit == Unit::Nanosecond && self.increment == RoundingIncrement::ONE
    }

    /// Returns the rounding increment measured in nanoseconds of the smallest unit.
    pub(crate) fn increment_nanoseconds(&self) -> TemporalResult<NonZeroU128> {
        let unit_ns = self
            .smallest_unit
            .as_nanoseconds()
            .and_then(|ns| NonZeroU128::new(ns.into()))
            .ok_or(TemporalError::range().with_enum(ErrorMessage::SmallestUnitNotTimeUnit))?;
        self.increment
            .as_extended_increment()
            .checked_mul(unit_ns)
            .ok_or(TemporalError::range().with_message("increment exceeded valid range."))
    }
}

// ==== Options enums and methods ====

/// The relevant unit that should be used for the operation that
/// this option is provided as a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Unit {
    /// The `Auto` unit
    Auto = 0,
    /// The `Nanosecond` unit
    Nanosecond,
    /// The `Microsecond` unit
    Microsecond,
    /// The `Millisecond` unit
    Millisecond,
    /// The `Second` unit
    Second,
    /// The `Minute` unit
    Minute,
    /// The `Hour` unit
    Hour,
    /// The `Day` unit
    Day,
    /// The `Week` unit
    Week,
    /// The `Month` unit
    Month,
    /// The `Year` unit
    Year,
}

impl Unit {
    #[inline]
    #[must_use]
    /// Returns the `MaximumRoundingIncrement` for the current `Unit`.
    pub fn to_maximum_rounding_increment(self) -> Option<u32> {
        use Unit::{
            Auto, Day, Hour, Microsecond, Millisecond, Minute, Month, Nanosecond, Second, Week,
            Year,
        };
        let max = match self {
            Year | Month | Week | Day | Auto => return None,
            Hour => 24,
            Minute | Second => 60,
            Millisecond | Microsecond | Nanosecond => 1000,
        };

        Some(max)
    }

    /// Returns the `Nanosecond amount for any given value.`
    #[must_use]
    pub fn as_nanoseconds(&self) -> Option<u64> {
        use Unit::{
            Auto, Day, Hour, Microsecond, Millisecond, Minute, Month, Nanosecond, Second, Week,
            Year,
        };
        match self {
            Year | Month | Week | Auto => None,
            Day => Some(NS_PER_DAY),
            Hour => Some(3_600_000_000_000),
            Minute => Some(60_000_000_000),
            Second => Some(1_000_000_000),
            Millisecond => Some(1_000_000),
            Microsecond => Some(1_000),
            Nanosecond => Some(1),
        }
    }

    #[inline]
    #[must_use]
    pub fn is_calendar_unit(&self) -> bool {
        use Unit::{Month, Week, Year};
        matches!(self, Year | Month | Week)
    }

    #[inline]
    #[must_use]
    pub fn is_date_unit(&self) -> bool {
        use Unit::{Day, Month, Week, Year};
        matches!(self, Year | Month | Week | Day)
    }

    #[inline]
    #[must_use]
    pub fn is_time_unit(&self) -> bool {
        use Unit::{Hour, Microsecond, Millisecond, Minute, Nanosecond, Second};
        matches!(
            self,
            Hour | Minute | Second | Millisecond | Microsecond | Nanosecond
        )
    }
}

impl FromStr for Unit {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "year" | "years" => Ok(Self::Year),
            "month" | "months" => Ok(Self::Month),
            "week" | "weeks" => Ok(Self::Week),
            "day" | "days" => Ok(Self::Day),
            "hour" | "hours" => Ok(Self::Hour),
            "minute" | "minutes" => Ok(Self::Minute),
            "second" | "seconds" => Ok(Self::Second),
            "millisecond" | "milliseconds" => Ok(Self::Millisecond),
            "microsecond" | "microseconds" => Ok(Self::Microsecond),
            "nanosecond" | "nanoseconds" => Ok(Self::Nanosecond),
            _ => Err(TemporalError::range().with_message("Unit not an accepted value.")),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Auto => "auto",
            Self::Year => "year",
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Millisecond => "millisecond",
            Self::Microsecond => "microsecond",
            Self::Nanosecond => "nanosecond",
        }
        .fmt(f)
    }
}

/// `Overflow` can also be used as an assignment overflow and consists
/// of the "constrain" and "reject" options.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Overflow {
    /// Constrain option
    #[default]
    Constrain,
    /// Reject option
    Reject,
}

impl FromStr for Overflow {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "constrain" => Ok(Self::Constrain),
            "reject" => Ok(Self::Reject),
            _ => Err(TemporalError::range().with_message("overflow not an accepted value.")),
        }
    }
}

impl fmt::Display for Overflow {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Constrain => "constrain",
            Self::Reject => "reject",
        }
        .fmt(f)
    }
}

/// Declares the specified `RoundingMode` for the operation.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum RoundingMode {
    /// Ceil RoundingMode
    Ceil,
    /// Floor RoundingMode
    Floor,
    /// Expand RoundingMode
    Expand,
    /// Truncate RoundingMode
    Trunc,
    /// HalfCeil RoundingMode
    HalfCeil,
    /// HalfFloor RoundingMode
    HalfFloor,
    /// HalfExpand RoundingMode - Default
    #[default]
    HalfExpand,
    /// HalfTruncate RoundingMode
    HalfTrunc,
    /// HalfEven RoundingMode
    HalfEven,
}

/// The `UnsignedRoundingMode`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsignedRoundingMode {
    /// `Infinity` `RoundingMode`
    Infinity,
    /// `Zero` `RoundingMode`
    Zero,
    /// `HalfInfinity` `RoundingMode`
    HalfInfinity,
    /// `HalfZero` `RoundingMode`
    HalfZero,
    /// `HalfEven` `RoundingMode`
    HalfEven,
}

impl RoundingMode {
    #[inline]
    #[must_use]
    /// Negates the current `RoundingMode`.
    pub const fn negate(self) -> Self {
        use RoundingMode::{
            Ceil, Expand, Floor, HalfCeil, HalfEven, HalfExpand, HalfFloor, HalfTrunc, Trunc,
        };

        match self {
            Ceil => Self::Floor,
            Floor => Self::Ceil,
            HalfCeil => Self::HalfFloor,
            HalfFloor => Self::HalfCeil,
            Trunc => Self::Trunc,
            Expand => Self::Expand,
            HalfTrunc => Self::HalfTrunc,
            HalfExpand => Self::HalfExpand,
            HalfEven => Self::HalfEven,
        }
    }

    #[inline]
    #[must_use]
    /// Returns the `UnsignedRoundingMode`
    pub const fn get_unsigned_round_mode(self, is_positive: bool) -> UnsignedRoundingMode {
        use RoundingMode::{
            Ceil, Expand, Floor, HalfCeil, HalfEven, HalfExpand, HalfFloor, HalfTrunc, Trunc,
        };

        match self {
            Ceil if is_positive => UnsignedRoundingMode::Infinity,
            Ceil | Trunc => UnsignedRoundingMode::Zero,
            Floor if is_positive => UnsignedRoundingMode::Zero,
            Floor | Expand => UnsignedRoundingMode::Infinity,
            HalfCeil if is_positive => UnsignedRoundingMode::HalfInfinity,
            HalfCeil | HalfTrunc => UnsignedRoundingMode::HalfZero,
            HalfFloor if is_positive => UnsignedRoundingMode::HalfZero,
            HalfFloor | HalfExpand => UnsignedRoundingMode::HalfInfinity,
            HalfEven => UnsignedRoundingMode::HalfEven,
        }
    }
}

impl FromStr for RoundingMode {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ceil" => Ok(Self::Ceil),
            "floor" => Ok(Self::Floor),
            "expand" => Ok(Self::Expand),
            "trunc" => Ok(Self::Trunc),
            "halfCeil" => Ok(Self::HalfCeil),
            "halfFloor" => Ok(Self::HalfFloor),
            "halfExpand" => Ok(Self::HalfExpand),
            "halfTrunc" => Ok(Self::HalfTrunc),
            "halfEven" => Ok(Self::HalfEven),
            _ => Err(TemporalError::range().with_message("RoundingMode not an accepted value.")),
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Ceil => "ceil",
            Self::Floor => "floor",
            Self::Expand => "expand",
            Self::Trunc => "trunc",
            Self::HalfCeil => "halfCeil",
            Self::HalfFloor => "halfFloor",
            Self::HalfExpand => "halfExpand",
            Self::HalfTrunc => "halfTrunc",
            Self::HalfEven => "halfEven",
        }
        .fmt(f)
    }
}
