//! An implementation of the Temporal Instant.

use crate::{
    builtins::core::{
        duration::{normalized::NormalizedTimeDuration, DateDuration, TimeDuration},
        Duration,
    },
    error::ErrorMessage,
    options::{
        DifferenceOperation, DifferenceSettings, ResolvedRoundingOptions, RoundingOptions, Unit,
        UnitGroup,
    },
    rounding::IncrementRounder,
    Sign, TemporalError, TemporalResult, NS_MAX_INSTANT, NS_MIN_INSTANT,
};

const NANOSECONDS_PER_SECOND: i128 = 1_000_000_000;
const NANOSECONDS_PER_MILLISECOND: i128 = 1_000_000;
const NANOSECONDS_PER_MICROSECOND: i128 = 1_000;

/// The native Rust implementation of `Temporal.Instant`
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(i128);

// ==== Private API ====

impl Instant {
    /// Adds a day and time offset to this instant, with days counted as 24 hours.
    ///
    /// Equivalent to `AddInstant`.
    pub(crate) fn add_to_instant(&self, duration: &Duration) -> TemporalResult<Self> {
        if !duration.date().has_no_calendar_units() {
            return Err(TemporalError::range().with_enum(ErrorMessage::CalendarUnitsNotAllowed));
        }
        let norm = NormalizedTimeDuration::from_days(duration.days() as i64)?
            .checked_add(&duration.time().to_normalized())?;
        let result = self
            .0
            .checked_add(norm.0)
            .ok_or(TemporalError::range().with_enum(ErrorMessage::InstantOutOfRange))?;
        Self::try_new(result)
    }

    /// `DifferenceTemporalInstant`
    pub(crate) fn diff_instant(
        &self,
        op: DifferenceOperation,
        other: &Self,
        options: DifferenceSettings,
    ) -> TemporalResult<Duration> {
        let (sign, resolved) = ResolvedRoundingOptions::from_diff_settings(
            options,
            op,
            UnitGroup::INSTANT,
            Unit::Second,
            Unit::Nanosecond,
        )?;

        let mut norm = NormalizedTimeDuration::from_nanosecond_difference(other.0, self.0)?;
        if !resolved.is_noop() {
            norm = norm.round(resolved.increment_nanoseconds()?, resolved.rounding_mode)?;
        }

        let (days, time) = TimeDuration::from_normalized(norm, resolved.largest_unit)?;
        let date = DateDuration::new(0.0, 0.0, 0.0, days as f64)?;
        let result = Duration::new_unchecked(date, time);

        match sign {
            Sign::Negative => Ok(result.negated()),
            _ => Ok(result),
        }
    }

    /// Rounds the epoch nanoseconds to the resolved increment.
    ///
    /// The increment always divides a day, so this matches rounding the
    /// time of day.
    pub(crate) fn round_instant(&self, resolved: ResolvedRoundingOptions) -> TemporalResult<i128> {
        IncrementRounder::<i128>::from_signed_num(self.0, resolved.increment_nanoseconds()?)?
            .round(resolved.rounding_mode)
    }
}

// ==== Public API ====

impl Instant {
    /// Create a new validated `Instant`.
    ///
    /// ```rust
    /// use temporal_engine::Instant;
    ///
    /// assert!(Instant::try_new(8_640_000_000_000_000_000_000).is_ok());
    /// assert!(Instant::try_new(8_640_000_000_000_000_000_001).is_err());
    /// ```
    #[inline]
    pub fn try_new(nanoseconds: i128) -> TemporalResult<Self> {
        if !(NS_MIN_INSTANT..=NS_MAX_INSTANT).contains(&nanoseconds) {
            return Err(TemporalError::range().with_enum(ErrorMessage::InstantOutOfRange));
        }
        Ok(Self(nanoseconds))
    }

    /// Creates a new `Instant` from the provided Epoch Millisecond value.
    pub fn from_epoch_milliseconds(epoch_milliseconds: i128) -> TemporalResult<Self> {
        let epoch_nanos = epoch_milliseconds
            .checked_mul(NANOSECONDS_PER_MILLISECOND)
            .ok_or(TemporalError::range().with_enum(ErrorMessage::InstantOutOfRange))?;
        Self::try_new(epoch_nanos)
    }

    /// Adds a `Duration` to the current `Instant`, returning an error if the `Duration`
    /// contains years, months or weeks.
    #[inline]
    pub fn add(&self, duration: &Duration) -> TemporalResult<Self> {
        self.add_to_instant(duration)
    }

    /// Subtract a `Duration` to the current `Instant`, returning an error if the `Duration`
    /// contains years, months or weeks.
    #[inline]
    pub fn subtract(&self, duration: &Duration) -> TemporalResult<Self> {
        self.add_to_instant(&duration.negated())
    }

    /// Returns a `Duration` representing the duration since provided `Instant`
    #[inline]
    pub fn since(&self, other: &Self, settings: DifferenceSettings) -> TemporalResult<Duration> {
        self.diff_instant(DifferenceOperation::Since, other, settings)
    }

    /// Returns a `Duration` representing the duration until provided `Instant`
    #[inline]
    pub fn until(&self, other: &Self, settings: DifferenceSettings) -> TemporalResult<Duration> {
        self.diff_instant(DifferenceOperation::Until, other, settings)
    }

    /// Returns an `Instant` by rounding the current `Instant` according to the provided settings.
    pub fn round(&self, options: RoundingOptions) -> TemporalResult<Self> {
        let resolved = ResolvedRoundingOptions::from_instant_options(options)?;
        Self::try_new(self.round_instant(resolved)?)
    }

    /// Returns the whole seconds since the epoch, rounded toward negative
    /// infinity.
    #[must_use]
    pub fn epoch_seconds(&self) -> i64 {
        self.0.div_euclid(NANOSECONDS_PER_SECOND) as i64
    }

    /// Returns the `epochMilliseconds` value for this `Instant`.
    #[must_use]
    pub fn epoch_milliseconds(&self) -> i64 {
        self.0.div_euclid(NANOSECONDS_PER_MILLISECOND) as i64
    }

    /// Returns the `epochMicroseconds` value for this `Instant`.
    #[must_use]
    pub fn epoch_microseconds(&self) -> i128 {
        self.0.div_euclid(NANOSECONDS_PER_MICROSECOND)
    }

    /// Returns the `epochNanoseconds` value for this `Instant`.
    #[must_use]
    pub fn epoch_nanoseconds(&self) -> i128 {
        self.0
    }
}

// ==== Instant Tests ====

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use crate::{
        builtins::core::{Duration, Instant},
        error::ErrorKind,
        options::{DifferenceSettings, RoundingIncrement, RoundingMode, RoundingOptions, Unit},
        NS_MAX_INSTANT, NS_MIN_INSTANT,
    };

    #[test]
    #[allow(clippy::float_cmp)]
    fn max_and_minimum_instant_bounds() {
        let max = NS_MAX_INSTANT;
        let min = NS_MIN_INSTANT;
        let max_instant = Instant::try_new(max).unwrap();
        let min_instant = Instant::try_new(min).unwrap();

        assert_eq!(max_instant.epoch_nanoseconds(), max);
        assert_eq!(min_instant.epoch_nanoseconds(), min);
        assert_eq!(max_instant.epoch_milliseconds(), 8_640_000_000_000_000);

        let max_plus_one = NS_MAX_INSTANT + 1;
        let min_minus_one = NS_MIN_INSTANT - 1;

        assert!(Instant::try_new(max_plus_one).is_err());
        assert!(Instant::try_new(min_minus_one).is_err());
    }

    #[test]
    fn epoch_milliseconds_floor() {
        let instant = Instant::try_new(-1).unwrap();
        assert_eq!(instant.epoch_milliseconds(), -1);
        let instant = Instant::try_new(1_999_999).unwrap();
        assert_eq!(instant.epoch_milliseconds(), 1);

        let instant = Instant::from_epoch_milliseconds(-1_500).unwrap();
        assert_eq!(instant.epoch_nanoseconds(), -1_500_000_000);
        assert!(Instant::from_epoch_milliseconds(8_640_000_000_000_001).is_err());
    }

    #[test]
    fn epoch_seconds_and_microseconds_floor() {
        let instant = Instant::try_new(-1).unwrap();
        assert_eq!(instant.epoch_seconds(), -1);
        assert_eq!(instant.epoch_microseconds(), -1);

        let instant = Instant::try_new(1_999_999_999).unwrap();
        assert_eq!(instant.epoch_seconds(), 1);
        assert_eq!(instant.epoch_microseconds(), 1_999_999);

        let max = Instant::try_new(NS_MAX_INSTANT).unwrap();
        assert_eq!(max.epoch_seconds(), 8_640_000_000_000);
        assert_eq!(max.epoch_microseconds(), 8_640_000_000_000_000_000);
    }

    #[test]
    fn instant_equality() {
        let one = Instant::from_epoch_milliseconds(1_500).unwrap();
        let two = Instant::try_new(1_500_000_000).unwrap();
        assert_eq!(one, two);
        assert_ne!(one, Instant::try_new(1_500_000_001).unwrap());
        assert_eq!(one.add(&Duration::from_str("PT0S").unwrap()).unwrap(), two);
    }

    #[test]
    fn instant_arithmetic() {
        let instant = Instant::try_new(0).unwrap();
        let result = instant.add(&Duration::from_str("P1DT1H").unwrap()).unwrap();
        assert_eq!(result.epoch_nanoseconds(), 90_000_000_000_000);
        let result = result.subtract(&Duration::from_str("PT25H").unwrap()).unwrap();
        assert_eq!(result, instant);

        for invalid in ["P1Y", "P1M", "P1W"] {
            let err = instant.add(&Duration::from_str(invalid).unwrap()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Range);
        }

        let max = Instant::try_new(NS_MAX_INSTANT).unwrap();
        let err = max.add(&Duration::from_str("PT0.000000001S").unwrap()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
    }

    #[test]
    fn instant_rounding_increments() {
        let instant = Instant::try_new(217_178_610_123_456_789).unwrap();

        let options = |increment| RoundingOptions {
            smallest_unit: Some(Unit::Hour),
            increment: Some(RoundingIncrement::try_new(increment).unwrap()),
            ..Default::default()
        };

        assert_eq!(instant.round(options(7)).unwrap_err().kind(), ErrorKind::Range);
        let rounded = instant.round(options(6)).unwrap();
        assert_eq!(rounded.epoch_nanoseconds(), 217_188_000_000_000_000);
        assert!(instant.round(options(24)).is_ok());

        let options = RoundingOptions {
            smallest_unit: Some(Unit::Day),
            ..Default::default()
        };
        assert_eq!(instant.round(options).unwrap_err().kind(), ErrorKind::Range);
        assert!(instant.round(RoundingOptions::default()).is_err());

        let negative = Instant::try_new(-1_500_000_000).unwrap();
        let options = RoundingOptions {
            smallest_unit: Some(Unit::Second),
            rounding_mode: Some(RoundingMode::HalfExpand),
            ..Default::default()
        };
        assert_eq!(negative.round(options).unwrap().epoch_nanoseconds(), -2_000_000_000);
    }

    #[test]
    fn basic_instant_until() {
        let init_diff_setting = |unit: Unit| -> DifferenceSettings {
            DifferenceSettings {
                largest_unit: Some(Unit::Hour),
                rounding_mode: Some(RoundingMode::Ceil),
                increment: None,
                smallest_unit: Some(unit),
            }
        };

        let assert_time_duration = |td: Duration, expected: (f64, f64, f64, f64, f64, f64)| {
            assert_eq!(
                td.time().fields(),
                [expected.0, expected.1, expected.2, expected.3, expected.4, expected.5]
            )
        };

        let earlier = Instant::try_new(217_178_610_123_456_789).unwrap();
        let later = Instant::try_new(1_572_345_998_271_986_289).unwrap();

        let positive_result = earlier.until(&later, init_diff_setting(Unit::Hour)).unwrap();
        assert_time_duration(positive_result, (376436.0, 0.0, 0.0, 0.0, 0.0, 0.0));
        let negative_result = later.until(&earlier, init_diff_setting(Unit::Hour)).unwrap();
        assert_time_duration(negative_result, (-376435.0, 0.0, 0.0, 0.0, 0.0, 0.0));

        let positive_result = earlier
            .until(&later, init_diff_setting(Unit::Minute))
            .unwrap();
        assert_time_duration(positive_result, (376435.0, 24.0, 0.0, 0.0, 0.0, 0.0));
        let negative_result = later
            .until(&earlier, init_diff_setting(Unit::Minute))
            .unwrap();
        assert_time_duration(negative_result, (-376435.0, -23.0, 0.0, 0.0, 0.0, 0.0));

        let positive_result = earlier
            .until(&later, init_diff_setting(Unit::Microsecond))
            .unwrap();
        assert_time_duration(positive_result, (376435.0, 23.0, 8.0, 148.0, 530.0, 0.0));
        let negative_result = later
            .until(&earlier, init_diff_setting(Unit::Microsecond))
            .unwrap();
        assert_time_duration(
            negative_result,
            (-376435.0, -23.0, -8.0, -148.0, -529.0, 0.0),
        );

        let positive_result = earlier
            .until(&later, init_diff_setting(Unit::Nanosecond))
            .unwrap();
        assert_time_duration(positive_result, (376435.0, 23.0, 8.0, 148.0, 529.0, 500.0));
        let negative_result = later
            .until(&earlier, init_diff_setting(Unit::Nanosecond))
            .unwrap();
        assert_time_duration(
            negative_result,
            (-376435.0, -23.0, -8.0, -148.0, -529.0, -500.0),
        );
    }

    #[test]
    fn basic_instant_since() {
        let init_diff_setting = |unit: Unit| -> DifferenceSettings {
            DifferenceSettings {
                largest_unit: Some(Unit::Hour),
                rounding_mode: Some(RoundingMode::Ceil),
                increment: None,
                smallest_unit: Some(unit),
            }
        };

        let earlier = Instant::try_new(217_178_610_123_456_789).unwrap();
        let later = Instant::try_new(1_572_345_998_271_986_289).unwrap();

        let positive_result = later.since(&earlier, init_diff_setting(Unit::Hour)).unwrap();
        assert_eq!(positive_result.hours(), 376436.0);
        let negative_result = earlier.since(&later, init_diff_setting(Unit::Hour)).unwrap();
        assert_eq!(negative_result.hours(), -376435.0);

        let positive_result = later.since(&earlier, init_diff_setting(Unit::Minute)).unwrap();
        assert_eq!((positive_result.hours(), positive_result.minutes()), (376435.0, 24.0));
        let negative_result = earlier.since(&later, init_diff_setting(Unit::Minute)).unwrap();
        assert_eq!((negative_result.hours(), negative_result.minutes()), (-376435.0, -23.0));
    }

    #[test]
    fn instant_default_largest_unit() {
        let earlier = Instant::try_new(0).unwrap();
        let later = Instant::try_new(90_061_001_001_001).unwrap();

        let result = earlier.until(&later, DifferenceSettings::default()).unwrap();
        assert_eq!(result.hours(), 0.0);
        assert_eq!(result.seconds(), 90_061.0);
        assert_eq!(result.milliseconds(), 1.0);

        let settings = DifferenceSettings {
            largest_unit: Some(Unit::Day),
            ..Default::default()
        };
        let result = earlier.until(&later, settings).unwrap();
        assert_eq!(
            result.fields(),
            [0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]
        );

        let settings = DifferenceSettings {
            largest_unit: Some(Unit::Week),
            ..Default::default()
        };
        assert!(earlier.until(&later, settings).is_err());
    }
}
