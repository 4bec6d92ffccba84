use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    ops::{Add, Sub},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
    Clock, DateTime, FixedOffsetZone, Format, LocalTimeZone, ParseError, SystemClock, TimeSpan,
    TimeZoneProvider,
    calendar::days_in_month,
    consts::{DECEMBER, FILETIME_EPOCH_TICKS, JANUARY, MAX_OFFSET_TICKS},
    iso8601,
};

/// A wall-clock [`DateTime`] paired with its offset from UTC.
///
/// Two values are equal when they denote the same UTC instant, whatever
/// their offsets; use [`DateTimeOffset::equals_exact`] to also compare the
/// offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeOffset {
    date_time: DateTime,
    offset:    TimeSpan,
}

/// Error type for parsing a [`DateTimeOffset`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OffsetParseError {
    /// Error in the date, time or zone designator.
    #[error(transparent)]
    ParseError(#[from] ParseError),
}

impl DateTimeOffset {
    pub const MIN: Self = Self::new(DateTime::MIN, TimeSpan::ZERO);
    pub const MAX: Self = Self::new(DateTime::MAX, TimeSpan::ZERO);
    pub const UNIX_EPOCH: Self = Self::new(DateTime::UNIX_EPOCH, TimeSpan::ZERO);

    /// Pairs a wall-clock instant with an offset. The offset is stored as
    /// given; an out-of-range offset only shows up in [`Self::is_valid`].
    pub const fn new(date_time: DateTime, offset: TimeSpan) -> Self {
        Self { date_time, offset }
    }

    pub const fn from_ticks(ticks: i64, offset: TimeSpan) -> Self {
        Self::new(DateTime::from_ticks(ticks), offset)
    }

    /// Midnight of the given date. Invalid dates give [`DateTime::MIN`].
    pub fn from_date(year: i32, month: i32, day: i32, offset: TimeSpan) -> Self {
        Self::new(DateTime::from_date(year, month, day), offset)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_date_time(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        offset: TimeSpan,
    ) -> Self {
        Self::new(DateTime::from_date_time(year, month, day, hour, minute, second), offset)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_date_time_millis(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millisecond: i32,
        offset: TimeSpan,
    ) -> Self {
        Self::new(
            DateTime::from_date_time_millis(year, month, day, hour, minute, second, millisecond),
            offset,
        )
    }

    /// Pairs `date_time` with the host zone's offset at that instant,
    /// rounded to whole minutes.
    pub fn from_date_time_local(date_time: DateTime) -> Self {
        Self::from_date_time_local_with(date_time, &LocalTimeZone)
    }

    pub fn from_date_time_local_with<Z: TimeZoneProvider + ?Sized>(date_time: DateTime, zone: &Z) -> Self {
        Self::new(date_time, zone.rounded_offset_at(date_time))
    }

    /// Ticks since the FILETIME epoch, 1601-01-01T00:00:00Z. Offset is zero.
    pub fn from_filetime(filetime: i64) -> Self {
        Self::from_ticks(FILETIME_EPOCH_TICKS.saturating_add(filetime), TimeSpan::ZERO)
    }

    pub fn from_epoch_seconds(seconds: i64) -> Self {
        Self::new(DateTime::from_epoch_seconds(seconds), TimeSpan::ZERO)
    }

    pub fn from_epoch_milliseconds(milliseconds: i64) -> Self {
        Self::new(DateTime::from_epoch_milliseconds(milliseconds), TimeSpan::ZERO)
    }

    pub fn utc_now() -> Self {
        Self::utc_now_with(&SystemClock)
    }

    pub fn utc_now_with<C: Clock + ?Sized>(clock: &C) -> Self {
        Self::now_with(clock, &FixedOffsetZone::UTC)
    }

    /// Current time in the host zone, carrying that zone's offset.
    pub fn now() -> Self {
        Self::now_with(&SystemClock, &LocalTimeZone)
    }

    pub fn now_with<C, Z>(clock: &C, zone: &Z) -> Self
    where
        C: Clock + ?Sized,
        Z: TimeZoneProvider + ?Sized,
    {
        Self::new(clock.utc_now(), TimeSpan::ZERO).to_local_time_with(zone)
    }

    /// Local midnight of the current day, with the current local offset.
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

    /// The instant as written, before the offset is removed.
    pub const fn local_date_time(self) -> DateTime {
        self.date_time
    }

    /// Same as [`Self::local_date_time`].
    pub const fn date_time(self) -> DateTime {
        self.date_time
    }

    pub fn utc_date_time(self) -> DateTime {
        DateTime::from_ticks(self.utc_ticks())
    }

    pub const fn offset(self) -> TimeSpan {
        self.offset
    }

    pub const fn ticks(self) -> i64 {
        self.date_time.ticks()
    }

    pub const fn utc_ticks(self) -> i64 {
        self.date_time.ticks().saturating_sub(self.offset.ticks())
    }

    pub const fn total_offset_minutes(self) -> i64 {
        self.offset.total_minutes()
    }

    pub const fn year(self) -> i32 {
        self.date_time.year()
    }

    pub const fn month(self) -> i32 {
        self.date_time.month()
    }

    pub const fn day(self) -> i32 {
        self.date_time.day()
    }

    pub const fn hour(self) -> i32 {
        self.date_time.hour()
    }

    pub const fn minute(self) -> i32 {
        self.date_time.minute()
    }

    pub const fn second(self) -> i32 {
        self.date_time.second()
    }

    pub const fn millisecond(self) -> i32 {
        self.date_time.millisecond()
    }

    pub const fn microsecond(self) -> i32 {
        self.date_time.microsecond()
    }

    pub const fn nanosecond(self) -> i32 {
        self.date_time.nanosecond()
    }

    pub const fn day_of_week(self) -> i32 {
        self.date_time.day_of_week()
    }

    pub const fn day_of_year(self) -> i32 {
        self.date_time.day_of_year()
    }

    pub const fn time_of_day(self) -> TimeSpan {
        self.date_time.time_of_day()
    }

    /// Local midnight, keeping the offset.
    pub const fn date(self) -> Self {
        Self::new(self.date_time.date(), self.offset)
    }

    /// The same instant seen from another offset.
    pub fn to_offset(self, offset: TimeSpan) -> Self {
        Self::new(self.utc_date_time() + offset, offset)
    }

    pub fn to_universal_time(self) -> Self {
        self.to_offset(TimeSpan::ZERO)
    }

    /// The same instant in the host zone, with the offset rounded to whole
    /// minutes.
    pub fn to_local_time(self) -> Self {
        self.to_local_time_with(&LocalTimeZone)
    }

    pub fn to_local_time_with<Z: TimeZoneProvider + ?Sized>(self, zone: &Z) -> Self {
        let utc = self.utc_date_time();
        self.to_offset(zone.rounded_offset_at(utc))
    }

    /// Ticks since 1601-01-01T00:00:00Z, or 0 for earlier instants.
    pub fn to_filetime(self) -> i64 {
        let utc = self.utc_ticks();
        if utc < FILETIME_EPOCH_TICKS {
            debug!("{self} precedes the FILETIME epoch, using 0");
            return 0;
        }
        utc - FILETIME_EPOCH_TICKS
    }

    pub fn to_epoch_seconds(self) -> i64 {
        self.utc_date_time().to_epoch_seconds()
    }

    pub fn to_epoch_milliseconds(self) -> i64 {
        self.utc_date_time().to_epoch_milliseconds()
    }

    /// Local instant in range and offset within ±14:00.
    pub fn is_valid(self) -> bool {
        self.date_time.is_valid() && self.offset.abs().ticks() <= MAX_OFFSET_TICKS
    }

    /// Compares both the instant and the offset.
    pub fn equals_exact(self, other: Self) -> bool {
        self.date_time == other.date_time && self.offset == other.offset
    }

    pub fn add_span(self, span: TimeSpan) -> Self {
        Self::new(self.date_time + span, self.offset)
    }

    pub fn add_ticks(self, ticks: i64) -> Self {
        self.add_span(TimeSpan::from_ticks(ticks))
    }

    pub fn add_days(self, days: f64) -> Self {
        self.add_span(TimeSpan::from_days(days))
    }

    pub fn add_hours(self, hours: f64) -> Self {
        self.add_span(TimeSpan::from_hours(hours))
    }

    pub fn add_minutes(self, minutes: f64) -> Self {
        self.add_span(TimeSpan::from_minutes(minutes))
    }

    pub fn add_seconds(self, seconds: f64) -> Self {
        self.add_span(TimeSpan::from_seconds(seconds))
    }

    pub fn add_milliseconds(self, milliseconds: f64) -> Self {
        self.add_span(TimeSpan::from_milliseconds(milliseconds))
    }

    /// Moves by calendar months on the local date. A day past the end of
    /// the target month becomes its last day; the time of day is kept.
    pub fn add_months(self, months: i32) -> Self {
        let (year, month, day) = (self.year(), self.month(), self.day());
        let zero_based = i64::from(month - JANUARY) + i64::from(months);
        let months_per_year = i64::from(DECEMBER);
        let year = i64::from(year) + zero_based.div_euclid(months_per_year);
        let month = zero_based.rem_euclid(months_per_year) as i32 + JANUARY;
        // Years past i32 are out of range anyway and clamp like any invalid date.
        let year = i32::try_from(year).unwrap_or(i32::MIN);
        let day = day.min(days_in_month(year, month));
        Self::new(DateTime::from_date(year, month, day) + self.time_of_day(), self.offset)
    }

    pub fn add_years(self, years: i32) -> Self {
        self.add_months(years.saturating_mul(12))
    }

    /// Parses an ISO 8601 string; without a zone designator the offset is zero.
    pub fn parse(input: &str) -> Option<Self> {
        input.parse().ok()
    }

    /// Text offsets carry whole minutes; seconds in the offset are dropped.
    pub fn format(self, format: Format) -> String {
        iso8601::format(self.date_time.ticks(), Some(self.offset), format)
    }

    /// Writes the value in `format` without allocating.
    ///
    /// # Errors
    /// Returns an error only if `out` does.
    pub fn write_formatted<W: fmt::Write>(self, out: &mut W, format: Format) -> fmt::Result {
        iso8601::write(out, self.date_time.ticks(), Some(self.offset), format)
    }
}

impl PartialEq for DateTimeOffset {
    fn eq(&self, other: &Self) -> bool {
        self.utc_ticks() == other.utc_ticks()
    }
}

impl Eq for DateTimeOffset {}

impl PartialOrd for DateTimeOffset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateTimeOffset {
    fn cmp(&self, other: &Self) -> Ordering {
        self.utc_ticks().cmp(&other.utc_ticks())
    }
}

impl Hash for DateTimeOffset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.utc_ticks().hash(state);
    }
}

impl Add<TimeSpan> for DateTimeOffset {
    type Output = Self;

    fn add(self, rhs: TimeSpan) -> Self {
        self.add_span(rhs)
    }
}

impl Sub<TimeSpan> for DateTimeOffset {
    type Output = Self;

    fn sub(self, rhs: TimeSpan) -> Self {
        self.add_span(-rhs)
    }
}

/// Elapsed time between the two UTC instants.
impl Sub for DateTimeOffset {
    type Output = TimeSpan;

    fn sub(self, rhs: Self) -> TimeSpan {
        TimeSpan::from_ticks(self.utc_ticks().saturating_sub(rhs.utc_ticks()))
    }
}

impl fmt::Display for DateTimeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_formatted(f, Format::Iso8601)
    }
}

impl FromStr for DateTimeOffset {
    type Err = OffsetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = iso8601::parse(s)?;
        Ok(Self::from_ticks(parsed.ticks, parsed.offset.unwrap_or_default()))
    }
}

impl Serialize for DateTimeOffset {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if !self.is_valid() || !self.offset.is_whole_minutes() {
            return Err(serde::ser::Error::custom(format!(
                "{self:?} has no exact ISO 8601 form: the instant must be in range and the offset \
                 a whole number of minutes within -14:00..=+14:00"
            )));
        }
        serializer.serialize_str(&self.format(Format::Precise))
    }
}

impl<'de> Deserialize<'de> for DateTimeOffset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
