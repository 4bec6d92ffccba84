//! Sources of "now" and of the local UTC offset.
//!
//! [`DateTime::now`](crate::DateTime::now) and friends read the system clock
//! and the host's time zone rules through these traits, so callers (and tests)
//! can substitute fixed values with the `*_with` variants.

use chrono::{Offset, TimeZone, Utc};

use crate::{DateTime, TimeSpan};

/// Supplies the current UTC instant.
pub trait Clock: Send + Sync {
    fn utc_now(&self) -> DateTime;
}

/// Supplies the UTC offset in effect at a UTC instant.
///
/// Implementations own any daylight-saving or historical rule resolution.
pub trait TimeZoneProvider: Send + Sync {
    fn offset_at(&self, utc: DateTime) -> TimeSpan;

    /// [`Self::offset_at`] rounded to whole minutes, the finest offset the
    /// ISO 8601 text form carries. Historical local mean time offsets such
    /// as `+00:19:32` come out as `+00:20`.
    fn rounded_offset_at(&self, utc: DateTime) -> TimeSpan {
        self.offset_at(utc).round_to_minutes()
    }
}

/// The operating system clock, read through `chrono::Utc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn utc_now(&self) -> DateTime {
        DateTime::from_chrono(Utc::now())
    }
}

/// The host's local time zone, resolved through `chrono::Local`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTimeZone;

impl TimeZoneProvider for LocalTimeZone {
    fn offset_at(&self, utc: DateTime) -> TimeSpan {
        let naive = utc.to_chrono().naive_utc();
        let seconds = chrono::Local
            .offset_from_utc_datetime(&naive)
            .fix()
            .local_minus_utc();
        TimeSpan::from_seconds(f64::from(seconds))
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime);

impl Clock for FixedClock {
    fn utc_now(&self) -> DateTime {
        self.0
    }
}

/// A zone with one constant offset and no transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedOffsetZone(pub TimeSpan);

impl FixedOffsetZone {
    pub const UTC: Self = Self(TimeSpan::ZERO);
}

impl TimeZoneProvider for FixedOffsetZone {
    fn offset_at(&self, _utc: DateTime) -> TimeSpan {
        self.0
    }
}
