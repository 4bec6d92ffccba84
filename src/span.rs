use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::{
    consts::{
        TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_MILLISECOND, TICKS_PER_MINUTE, TICKS_PER_SECOND,
    },
    prelude::*,
};

/// A signed length of time counted in 100-nanosecond ticks.
///
/// Used for time-of-day values, UTC offsets and instant arithmetic.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TimeSpan(i64);

impl TimeSpan {
    /// The empty span
    pub const ZERO: Self = Self(0);

    pub const fn from_ticks(ticks: i64) -> Self {
        Self(ticks)
    }

    pub const fn ticks(self) -> i64 {
        self.0
    }

    /// Whole minutes, as used for UTC offsets.
    pub const fn from_minutes_i32(minutes: i32) -> Self {
        Self(minutes as i64 * TICKS_PER_MINUTE)
    }

    pub fn from_days(days: f64) -> Self {
        Self::from_units(days, TICKS_PER_DAY)
    }

    pub fn from_hours(hours: f64) -> Self {
        Self::from_units(hours, TICKS_PER_HOUR)
    }

    pub fn from_minutes(minutes: f64) -> Self {
        Self::from_units(minutes, TICKS_PER_MINUTE)
    }

    pub fn from_seconds(seconds: f64) -> Self {
        Self::from_units(seconds, TICKS_PER_SECOND)
    }

    pub fn from_milliseconds(milliseconds: f64) -> Self {
        Self::from_units(milliseconds, TICKS_PER_MILLISECOND)
    }

    /// Rounds to the nearest tick; `as` saturates out of range and maps NaN to 0.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn from_units(value: f64, ticks_per_unit: i64) -> Self {
        Self((value * ticks_per_unit as f64).round() as i64)
    }

    /// Whole minutes in this span, truncated toward zero.
    pub const fn total_minutes(self) -> i64 {
        self.0 / TICKS_PER_MINUTE
    }

    /// Rounds to the nearest whole minute, halves away from zero.
    pub const fn round_to_minutes(self) -> Self {
        let half = TICKS_PER_MINUTE / 2;
        let shifted = if self.0 < 0 {
            self.0.saturating_sub(half)
        } else {
            self.0.saturating_add(half)
        };
        Self(shifted / TICKS_PER_MINUTE * TICKS_PER_MINUTE)
    }

    pub const fn is_whole_minutes(self) -> bool {
        self.0 % TICKS_PER_MINUTE == 0
    }

    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }
}

impl Add for TimeSpan {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for TimeSpan {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl AddAssign for TimeSpan {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for TimeSpan {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for TimeSpan {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}
