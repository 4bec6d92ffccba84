//! Conversions between tick counts and proleptic Gregorian calendar fields.
//!
//! Years are resolved in constant time by peeling off whole 400-year,
//! 100-year, 4-year and 1-year blocks of days. Months are resolved by walking
//! at most twelve entries of the month table.
//!
//! None of these functions validate their input. Callers that need a
//! guarantee check [`is_valid_date`] and [`is_valid_time`] first; out of range
//! input gives an unspecified (but never panicking) result.

use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, DAYS_PER_4_YEARS, DAYS_PER_100_YEARS, DAYS_PER_400_YEARS,
    DAYS_PER_YEAR, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, MAX_MONTH,
    MAX_YEAR, MIN_DAY, MIN_YEAR, TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_MILLISECOND,
    TICKS_PER_MINUTE, TICKS_PER_SECOND,
};

pub const fn is_leap_year(year: i32) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Number of days in `month` of `year`, or 0 when `month` is not in `1..=12`.
pub const fn days_in_month(year: i32, month: i32) -> i32 {
    if month < 1 || month > MAX_MONTH {
        return 0;
    }
    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

pub const fn is_valid_date(year: i32, month: i32, day: i32) -> bool {
    year >= MIN_YEAR
        && year <= MAX_YEAR
        && month >= 1
        && month <= MAX_MONTH
        && day >= MIN_DAY
        && day <= days_in_month(year, month)
}

pub const fn is_valid_time(hour: i32, minute: i32, second: i32, millisecond: i32) -> bool {
    hour >= 0
        && hour <= 23
        && minute >= 0
        && minute <= 59
        && second >= 0
        && second <= 59
        && millisecond >= 0
        && millisecond <= 999
}

/// Ticks at midnight starting the given date.
pub const fn ticks_from_date(year: i32, month: i32, day: i32) -> i64 {
    let mut y = year as i64 - 1;
    let mut days = (y / 400) * DAYS_PER_400_YEARS;
    y %= 400;
    days += (y / 100) * DAYS_PER_100_YEARS;
    y %= 100;
    days += (y / 4) * DAYS_PER_4_YEARS;
    y %= 4;
    days += y * DAYS_PER_YEAR;

    let mut m = 1;
    while m < month && m <= MAX_MONTH {
        days += days_in_month(year, m) as i64;
        m += 1;
    }
    days += day as i64 - 1;

    days.saturating_mul(TICKS_PER_DAY)
}

/// Splits a tick count into `(year, month, day)`.
pub const fn date_from_ticks(ticks: i64) -> (i32, i32, i32) {
    let mut days = ticks / TICKS_PER_DAY;

    let cycles_400 = days / DAYS_PER_400_YEARS;
    days %= DAYS_PER_400_YEARS;

    // The last day of a 400-year cycle would otherwise count as a fifth century.
    let mut centuries = days / DAYS_PER_100_YEARS;
    if centuries > 3 {
        centuries = 3;
    }
    days -= centuries * DAYS_PER_100_YEARS;

    let cycles_4 = days / DAYS_PER_4_YEARS;
    days %= DAYS_PER_4_YEARS;

    // Same for the leap day closing a 4-year cycle.
    let mut years = days / DAYS_PER_YEAR;
    if years > 3 {
        years = 3;
    }
    days -= years * DAYS_PER_YEAR;

    let year = (1 + cycles_400 * 400 + centuries * 100 + cycles_4 * 4 + years) as i32;

    let mut month = 1;
    while month < MAX_MONTH {
        let len = days_in_month(year, month) as i64;
        if days < len {
            break;
        }
        days -= len;
        month += 1;
    }

    (year, month, days as i32 + 1)
}

pub const fn ticks_from_time(hour: i32, minute: i32, second: i32, millisecond: i32) -> i64 {
    (hour as i64)
        .saturating_mul(TICKS_PER_HOUR)
        .saturating_add((minute as i64).saturating_mul(TICKS_PER_MINUTE))
        .saturating_add((second as i64).saturating_mul(TICKS_PER_SECOND))
        .saturating_add((millisecond as i64).saturating_mul(TICKS_PER_MILLISECOND))
}

/// Splits the time-of-day part of a tick count into
/// `(hour, minute, second, millisecond)`.
pub const fn time_from_ticks(ticks: i64) -> (i32, i32, i32, i32) {
    let mut rest = ticks % TICKS_PER_DAY;
    let hour = rest / TICKS_PER_HOUR;
    rest %= TICKS_PER_HOUR;
    let minute = rest / TICKS_PER_MINUTE;
    rest %= TICKS_PER_MINUTE;
    let second = rest / TICKS_PER_SECOND;
    rest %= TICKS_PER_SECOND;
    let millisecond = rest / TICKS_PER_MILLISECOND;
    (hour as i32, minute as i32, second as i32, millisecond as i32)
}

/// Microsecond within the current millisecond.
pub const fn microsecond_from_ticks(ticks: i64) -> i32 {
    ((ticks % TICKS_PER_MILLISECOND) / 10) as i32
}

/// The trailing hundred nanoseconds of the tick count, in nanoseconds.
pub const fn nanosecond_from_ticks(ticks: i64) -> i32 {
    ((ticks % 10) * 100) as i32
}

/// Day of the week, 0 for Sunday through 6 for Saturday.
pub const fn day_of_week(ticks: i64) -> i32 {
    // 0001-01-01 was a Monday.
    ((ticks / TICKS_PER_DAY + 1) % 7) as i32
}

/// Day of the year, starting at 1 for January 1st.
pub const fn day_of_year(ticks: i64) -> i32 {
    let (year, month, day) = date_from_ticks(ticks);
    let mut total = 0;
    let mut m = 1;
    while m < month {
        total += days_in_month(year, m);
        m += 1;
    }
    total + day
}

#[cfg(test)]
pub(crate) mod arbitrary {
    use quickcheck::{Arbitrary, Gen};

    use crate::consts::MAX_TICKS;

    /// A tick count within `[0, MAX_TICKS]`.
    #[derive(Debug, Clone, Copy)]
    pub(crate) struct ValidTicks(pub(crate) i64);

    impl Arbitrary for ValidTicks {
        fn arbitrary(g: &mut Gen) -> Self {
            Self(u64::arbitrary(g).rem_euclid(MAX_TICKS as u64 + 1) as i64)
        }
    }

    /// A `(year, month, day)` triple that names a real calendar day.
    #[derive(Debug, Clone, Copy)]
    pub(crate) struct ValidDate(pub(crate) i32, pub(crate) i32, pub(crate) i32);

    impl Arbitrary for ValidDate {
        fn arbitrary(g: &mut Gen) -> Self {
            let year = i32::from(u16::arbitrary(g) % 9999) + 1;
            let month = i32::from(u8::arbitrary(g) % 12) + 1;
            let day = i32::from(u8::arbitrary(g) % 31) + 1;
            Self(year, month, day.min(super::days_in_month(year, month)))
        }
    }
}
