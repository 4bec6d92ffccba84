//! Instants counted in 100-nanosecond ticks since 0001-01-01T00:00:00 on the
//! proleptic Gregorian calendar, with an offset-aware companion type and an
//! ISO 8601 codec.
//!
//! Invalid calendar input never panics or errors at construction: it yields
//! [`DateTime::MIN`]. Parsing reports failure through `Option` or `Result`.

#[macro_use]
mod logging;

mod calendar;
mod clock;
mod consts;
mod iso8601;
mod offset;
mod prelude;
mod span;

pub use calendar::{
    date_from_ticks, day_of_week, day_of_year, days_in_month, is_leap_year, is_valid_date,
    is_valid_time, microsecond_from_ticks, nanosecond_from_ticks, ticks_from_date,
    ticks_from_time, time_from_ticks,
};
pub use clock::{Clock, FixedClock, FixedOffsetZone, LocalTimeZone, SystemClock, TimeZoneProvider};
pub use consts::*;
pub use iso8601::Format;
pub use offset::{DateTimeOffset, OffsetParseError};
pub use span::TimeSpan;

use crate::prelude::*;
use chrono::Utc;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

/// An absolute point in time with 100-nanosecond resolution.
///
/// Every calendar accessor decomposes the tick count on each call; nothing
/// else is stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime {
    ticks: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Empty date string")]
    EmptyInput,
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: i32, day: i32 },
    #[display(fmt = "Invalid time {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: i32, minute: i32, second: i32 },
    #[display(fmt = "Invalid UTC offset: {_0} (must be within -14:00..=+14:00)")]
    InvalidOffset(String),
}

impl std::error::Error for ParseError {}

/// Earliest instant whose nanosecond distance from 1970 fits in an `i64`.
const MIN_CHRONO_SAFE_TICKS: i64 = {
    let ticks = UNIX_EPOCH_TICKS + i64::MIN / 100;
    if ticks > MIN_TICKS { ticks } else { MIN_TICKS }
};

/// Latest instant whose nanosecond distance from 1970 fits in an `i64`.
const MAX_CHRONO_SAFE_TICKS: i64 = {
    let ticks = UNIX_EPOCH_TICKS + i64::MAX / 100;
    if ticks < MAX_TICKS { ticks } else { MAX_TICKS }
};

impl DateTime {
    /// 0001-01-01T00:00:00
    pub const MIN: Self = Self::from_ticks(MIN_TICKS);
    /// 9999-12-31T23:59:59.9999999
    pub const MAX: Self = Self::from_ticks(MAX_TICKS);
    /// 1970-01-01T00:00:00
    pub const UNIX_EPOCH: Self = Self::from_ticks(UNIX_EPOCH_TICKS);

    /// Wraps a raw tick count without range checks; see [`DateTime::is_valid`].
    pub const fn from_ticks(ticks: i64) -> Self {
        Self { ticks }
    }

    /// Midnight of the given date, or [`DateTime::MIN`] if the date is invalid.
    pub fn from_date(year: i32, month: i32, day: i32) -> Self {
        if !is_valid_date(year, month, day) {
            debug!("invalid date {year}-{month}-{day}, using minimum instant");
            return Self::MIN;
        }
        Self::from_ticks(ticks_from_date(year, month, day))
    }

    /// The given date and time, or [`DateTime::MIN`] if any component is invalid.
    pub fn from_date_time(year: i32, month: i32, day: i32, hour: i32, minute: i32, second: i32) -> Self {
        Self::from_date_time_millis(year, month, day, hour, minute, second, 0)
    }

    /// The given date and time, or [`DateTime::MIN`] if any component is invalid.
    #[allow(clippy::too_many_arguments)]
    pub fn from_date_time_millis(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millisecond: i32,
    ) -> Self {
        if !is_valid_date(year, month, day) || !is_valid_time(hour, minute, second, millisecond) {
            debug!(
                "invalid date/time {year}-{month}-{day} {hour}:{minute}:{second}.{millisecond}, \
                 using minimum instant"
            );
            return Self::MIN;
        }
        Self::from_ticks(
            ticks_from_date(year, month, day) + ticks_from_time(hour, minute, second, millisecond),
        )
    }

    pub fn from_epoch_seconds(seconds: i64) -> Self {
        Self::from_ticks(UNIX_EPOCH_TICKS.saturating_add(seconds.saturating_mul(TICKS_PER_SECOND)))
    }

    pub fn from_epoch_milliseconds(milliseconds: i64) -> Self {
        Self::from_ticks(
            UNIX_EPOCH_TICKS.saturating_add(milliseconds.saturating_mul(TICKS_PER_MILLISECOND)),
        )
    }

    /// Whole seconds since the Unix epoch, rounded toward negative infinity.
    pub const fn to_epoch_seconds(self) -> i64 {
        self.ticks.saturating_sub(UNIX_EPOCH_TICKS).div_euclid(TICKS_PER_SECOND)
    }

    /// Whole milliseconds since the Unix epoch, rounded toward negative infinity.
    pub const fn to_epoch_milliseconds(self) -> i64 {
        self.ticks.saturating_sub(UNIX_EPOCH_TICKS).div_euclid(TICKS_PER_MILLISECOND)
    }

    /// Converts to chrono, first clamping into the range chrono can carry as
    /// nanoseconds since 1970 (roughly years 1677 to 2262).
    pub fn to_chrono(self) -> chrono::DateTime<Utc> {
        let ticks = self.ticks.clamp(MIN_CHRONO_SAFE_TICKS, MAX_CHRONO_SAFE_TICKS);
        if ticks != self.ticks {
            debug!("{self} is outside the nanosecond timestamp range, clamping");
        }
        chrono::DateTime::from_timestamp_nanos((ticks - UNIX_EPOCH_TICKS) * 100)
    }

    /// Converts from chrono, clamping into `[MIN, MAX]` and truncating to
    /// whole ticks.
    pub fn from_chrono(datetime: chrono::DateTime<Utc>) -> Self {
        let ticks = UNIX_EPOCH_TICKS
            .saturating_add(datetime.timestamp().saturating_mul(TICKS_PER_SECOND))
            .saturating_add(i64::from(datetime.timestamp_subsec_nanos() / 100));
        Self::from_ticks(ticks.clamp(MIN_TICKS, MAX_TICKS))
    }

    /// Current UTC instant from the system clock.
    pub fn utc_now() -> Self {
        Self::utc_now_with(&SystemClock)
    }

    pub fn utc_now_with<C: Clock + ?Sized>(clock: &C) -> Self {
        clock.utc_now()
    }

    /// Current local wall-clock time, using the host time zone.
    pub fn now() -> Self {
        Self::now_with(&SystemClock, &LocalTimeZone)
    }

    pub fn now_with<C, Z>(clock: &C, zone: &Z) -> Self
    where
        C: Clock + ?Sized,
        Z: TimeZoneProvider + ?Sized,
    {
        let utc = clock.utc_now();
        utc + zone.rounded_offset_at(utc)
    }

    /// Local midnight of the current day.
    pub fn today() -> Self {
        Self::now().date()
    }

    pub fn today_with<C, Z>(clock: &C, zone: &Z) -> Self
    where
        C: Clock + ?Sized,
        Z: TimeZoneProvider + ?Sized,
    {
        Self::now_with(clock, zone).date()
    }

    pub const fn ticks(self) -> i64 {
        self.ticks
    }

    pub const fn is_valid(self) -> bool {
        self.ticks >= MIN_TICKS && self.ticks <= MAX_TICKS
    }

    pub const fn year(self) -> i32 {
        date_from_ticks(self.ticks).0
    }

    pub const fn month(self) -> i32 {
        date_from_ticks(self.ticks).1
    }

    pub const fn day(self) -> i32 {
        date_from_ticks(self.ticks).2
    }

    pub const fn hour(self) -> i32 {
        time_from_ticks(self.ticks).0
    }

    pub const fn minute(self) -> i32 {
        time_from_ticks(self.ticks).1
    }

    pub const fn second(self) -> i32 {
        time_from_ticks(self.ticks).2
    }

    pub const fn millisecond(self) -> i32 {
        time_from_ticks(self.ticks).3
    }

    /// Microsecond within the millisecond, `0..=999`.
    pub const fn microsecond(self) -> i32 {
        microsecond_from_ticks(self.ticks)
    }

    /// Trailing hundreds of nanoseconds, `0..=900` in steps of 100.
    pub const fn nanosecond(self) -> i32 {
        nanosecond_from_ticks(self.ticks)
    }

    /// 0 for Sunday through 6 for Saturday.
    pub const fn day_of_week(self) -> i32 {
        day_of_week(self.ticks)
    }

    pub const fn day_of_year(self) -> i32 {
        day_of_year(self.ticks)
    }

    /// This instant truncated to midnight.
    pub const fn date(self) -> Self {
        Self::from_ticks(self.ticks - self.ticks % TICKS_PER_DAY)
    }

    /// Time elapsed since midnight.
    pub const fn time_of_day(self) -> TimeSpan {
        TimeSpan::from_ticks(self.ticks % TICKS_PER_DAY)
    }

    /// Parses an ISO 8601 string. A zone designator is accepted and
    /// discarded: the result is the wall-clock time as written.
    pub fn parse(input: &str) -> Option<Self> {
        input.parse().ok()
    }

    pub fn format(self, format: Format) -> String {
        iso8601::format(self.ticks, None, format)
    }

    /// Writes the instant in `format` without allocating.
    ///
    /// # Errors
    /// Returns an error only if `out` does.
    pub fn write_formatted<W: fmt::Write>(self, out: &mut W, format: Format) -> fmt::Result {
        iso8601::write(out, self.ticks, None, format)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        iso8601::write(f, self.ticks, None, Format::Iso8601)
    }
}

impl FromStr for DateTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        iso8601::parse(s).map(|parsed| Self::from_ticks(parsed.ticks))
    }
}

impl Add<TimeSpan> for DateTime {
    type Output = Self;

    fn add(self, rhs: TimeSpan) -> Self {
        Self::from_ticks(self.ticks.saturating_add(rhs.ticks()))
    }
}

impl Sub<TimeSpan> for DateTime {
    type Output = Self;

    fn sub(self, rhs: TimeSpan) -> Self {
        Self::from_ticks(self.ticks.saturating_sub(rhs.ticks()))
    }
}

impl Sub for DateTime {
    type Output = TimeSpan;

    fn sub(self, rhs: Self) -> TimeSpan {
        TimeSpan::from_ticks(self.ticks.saturating_sub(rhs.ticks))
    }
}

impl AddAssign<TimeSpan> for DateTime {
    fn add_assign(&mut self, rhs: TimeSpan) {
        *self = *self + rhs;
    }
}

impl SubAssign<TimeSpan> for DateTime {
    fn sub_assign(&mut self, rhs: TimeSpan) {
        *self = *self - rhs;
    }
}

impl From<chrono::DateTime<Utc>> for DateTime {
    fn from(value: chrono::DateTime<Utc>) -> Self {
        Self::from_chrono(value)
    }
}

impl From<DateTime> for chrono::DateTime<Utc> {
    fn from(value: DateTime) -> Self {
        value.to_chrono()
    }
}

impl serde::Serialize for DateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if !self.is_valid() {
            return Err(serde::ser::Error::custom(format!(
                "tick count {} is outside 0001-01-01..=9999-12-31",
                self.ticks
            )));
        }
        serializer.serialize_str(&self.format(Format::Precise))
    }
}

impl<'de> serde::Deserialize<'de> for DateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
