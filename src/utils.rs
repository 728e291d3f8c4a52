//! Utility date and time equations for Temporal
//!
//! The epoch day equations below count days in the proleptic Gregorian
//! calendar using a 400 year era shift, so that every division is
//! performed on non-negative values. Temporal's supported year range of
//! [-271_821, 275_760] is well within the range of `i64` day counts.

/// Days in a 400 year Gregorian cycle.
const DAYS_IN_A_400Y_CYCLE: i64 = 146_097;
/// The number of days between 0000-03-01 and 1970-01-01.
const EPOCH_COMPUTATIONAL_RATA_DIE: i64 = 719_468;

// ==== Year equations ====

/// Returns whether the ISO year is a leap year.
#[inline]
#[must_use]
pub(crate) const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

#[inline]
#[must_use]
pub(crate) const fn iso_days_in_year(year: i32) -> u16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Returns the number of days in an ISO month.
///
/// `month` must be in 1..=12; any other value returns 0.
#[inline]
#[must_use]
pub(crate) const fn iso_days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

// ==== Epoch day equations ====

/// Returns the number of days since 1970-01-01 for an ISO date.
#[must_use]
pub(crate) const fn epoch_days_from_iso(year: i32, month: u8, day: u8) -> i64 {
    // Shift the year to start in March so the leap day is the last day.
    let shifted_year = year as i64 - (month <= 2) as i64;
    let era = shifted_year.div_euclid(400);
    let year_of_era = shifted_year - era * 400;
    let shifted_month = (month as i64 + 9) % 12;
    let day_of_year = (153 * shifted_month + 2) / 5 + day as i64 - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * DAYS_IN_A_400Y_CYCLE + day_of_era - EPOCH_COMPUTATIONAL_RATA_DIE
}

/// Returns the ISO `(year, month, day)` for a count of days since 1970-01-01.
#[must_use]
pub(crate) const fn iso_from_epoch_days(epoch_days: i64) -> (i32, u8, u8) {
    let rata_die = epoch_days + EPOCH_COMPUTATIONAL_RATA_DIE;
    let era = rata_die.div_euclid(DAYS_IN_A_400Y_CYCLE);
    let day_of_era = rata_die - era * DAYS_IN_A_400Y_CYCLE;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = year_of_era + era * 400 + (month <= 2) as i64;
    (year as i32, month as u8, day as u8)
}

// ==== Calendar field equations ====

/// Returns the ISO day of the week, where Monday is 1 and Sunday is 7.
#[must_use]
pub(crate) const fn iso_day_of_week(year: i32, month: u8, day: u8) -> u16 {
    // 1970-01-01 was a Thursday.
    ((epoch_days_from_iso(year, month, day) + 3).rem_euclid(7) + 1) as u16
}

/// Returns the one based ordinal day of the year.
#[must_use]
pub(crate) const fn iso_day_of_year(year: i32, month: u8, day: u8) -> u16 {
    (epoch_days_from_iso(year, month, day) - epoch_days_from_iso(year, 1, 1) + 1) as u16
}

/// Returns the number of ISO weeks in an ISO week-numbering year.
#[must_use]
pub(crate) const fn iso_weeks_in_year(year: i32) -> u8 {
    let jan_one = iso_day_of_week(year, 1, 1);
    if jan_one == 4 || (jan_one == 3 && is_leap_year(year)) {
        53
    } else {
        52
    }
}

/// Returns the ISO 8601 `(week, week_year)` for an ISO date.
///
/// Week 1 is the week containing the first Thursday of the year, so the
/// first and last few days of a year may belong to a neighboring week year.
#[must_use]
pub(crate) const fn iso_week_of_year(year: i32, month: u8, day: u8) -> (u8, i32) {
    let ordinal = iso_day_of_year(year, month, day) as i32;
    let weekday = iso_day_of_week(year, month, day) as i32;
    let week = (ordinal - weekday + 10).div_euclid(7);
    if week < 1 {
        (iso_weeks_in_year(year - 1), year - 1)
    } else if week > iso_weeks_in_year(year) as i32 {
        (1, year + 1)
    } else {
        (week as u8, year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2004));
        assert!(!is_leap_year(2023));
        assert!(is_leap_year(0));
        assert!(is_leap_year(-4));
        assert!(!is_leap_year(-100));
        assert_eq!(iso_days_in_year(2000), 366);
        assert_eq!(iso_days_in_year(1900), 365);
    }

    #[test]
    fn days_in_month_table() {
        let common = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (index, expected) in common.iter().enumerate() {
            assert_eq!(iso_days_in_month(2023, index as u8 + 1), *expected);
        }
        assert_eq!(iso_days_in_month(2024, 2), 29);
        assert_eq!(iso_days_in_month(2024, 13), 0);
    }

    #[test]
    fn epoch_days_known_values() {
        assert_eq!(epoch_days_from_iso(1970, 1, 1), 0);
        assert_eq!(epoch_days_from_iso(1969, 12, 31), -1);
        assert_eq!(epoch_days_from_iso(2000, 3, 1), 11_017);
        assert_eq!(epoch_days_from_iso(-271_821, 4, 20), -100_000_000);
        assert_eq!(epoch_days_from_iso(275_760, 9, 13), 100_000_000);
    }

    #[test]
    fn epoch_days_round_trip() {
        let mut days = -100_000_001i64;
        while days <= 100_000_001 {
            let (year, month, day) = iso_from_epoch_days(days);
            assert_eq!(epoch_days_from_iso(year, month, day), days);
            days += 9_973;
        }
        for days in -800..800 {
            let (year, month, day) = iso_from_epoch_days(days);
            assert!((1..=12).contains(&month));
            assert!(day >= 1 && day <= iso_days_in_month(year, month));
            assert_eq!(epoch_days_from_iso(year, month, day), days);
        }
    }

    #[test]
    fn day_of_week_and_year() {
        // 1970-01-01 was a Thursday, 2000-01-01 a Saturday.
        assert_eq!(iso_day_of_week(1970, 1, 1), 4);
        assert_eq!(iso_day_of_week(2000, 1, 1), 6);
        assert_eq!(iso_day_of_week(2024, 7, 15), 1);
        assert_eq!(iso_day_of_week(2024, 7, 14), 7);
        assert_eq!(iso_day_of_week(-1, 12, 31), 5);

        assert_eq!(iso_day_of_year(2024, 1, 1), 1);
        assert_eq!(iso_day_of_year(2024, 12, 31), 366);
        assert_eq!(iso_day_of_year(2023, 3, 1), 60);
    }

    #[test]
    fn iso_weeks() {
        // 2021-01-03 belongs to week 53 of 2020.
        assert_eq!(iso_week_of_year(2021, 1, 3), (53, 2020));
        assert_eq!(iso_week_of_year(2021, 1, 4), (1, 2021));
        // 2024-12-30 belongs to week 1 of 2025.
        assert_eq!(iso_week_of_year(2024, 12, 30), (1, 2025));
        assert_eq!(iso_week_of_year(2024, 12, 29), (52, 2024));
        assert_eq!(iso_weeks_in_year(2020), 53);
        assert_eq!(iso_weeks_in_year(2015), 53);
        assert_eq!(iso_weeks_in_year(2021), 52);
    }
}
