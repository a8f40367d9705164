//! Interval arithmetic behind elapsed time, ETE and ETA.
//!
//! Everything is whole seconds. A raw seconds count is normalized into
//! `{years, days, hours, minutes, seconds}` with fixed 60/60/24/365 carries;
//! there is no calendar awareness and no month field.

use chrono::Duration;
use std::fmt;

const SECS_PER_MINUTE: u64 = 60;
const MINUTES_PER_HOUR: u64 = 60;
const HOURS_PER_DAY: u64 = 24;
const DAYS_PER_YEAR: u64 = 365;

/// A non-negative duration split into carry-normalized fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeInterval {
    pub years: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeInterval {
    pub const ZERO: TimeInterval = TimeInterval {
        years: 0,
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Normalize a seconds count through the carry cascade. A level only
    /// carries into the next one once it reaches that level's threshold.
    pub fn from_secs(total: u64) -> Self {
        let mut iv = TimeInterval {
            seconds: total,
            ..Self::ZERO
        };
        if iv.seconds >= SECS_PER_MINUTE {
            iv.minutes = iv.seconds / SECS_PER_MINUTE;
            iv.seconds %= SECS_PER_MINUTE;
        }
        if iv.minutes >= MINUTES_PER_HOUR {
            iv.hours = iv.minutes / MINUTES_PER_HOUR;
            iv.minutes %= MINUTES_PER_HOUR;
        }
        if iv.hours >= HOURS_PER_DAY {
            iv.days = iv.hours / HOURS_PER_DAY;
            iv.hours %= HOURS_PER_DAY;
        }
        if iv.days >= DAYS_PER_YEAR {
            iv.years = iv.days / DAYS_PER_YEAR;
            iv.days %= DAYS_PER_YEAR;
        }
        iv
    }

    /// Whole seconds since a start, clamped at zero when the clock went backwards.
    pub fn from_duration(d: Duration) -> Self {
        Self::from_secs(u64::try_from(d.num_seconds()).unwrap_or(0))
    }

    pub fn as_secs(&self) -> u64 {
        self.total_hours()
            .saturating_mul(MINUTES_PER_HOUR)
            .saturating_add(self.minutes)
            .saturating_mul(SECS_PER_MINUTE)
            .saturating_add(self.seconds)
    }

    /// Hours with years and days folded in.
    pub fn total_hours(&self) -> u64 {
        self.years
            .saturating_mul(DAYS_PER_YEAR)
            .saturating_add(self.days)
            .saturating_mul(HOURS_PER_DAY)
            .saturating_add(self.hours)
    }

    /// Saturates at `Duration::MAX` for intervals chrono cannot represent.
    pub fn to_duration(&self) -> Duration {
        i64::try_from(self.as_secs())
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// `HH:MM:SS`, where `HH` is the total hour count (at least two digits).
impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.total_hours(),
            self.minutes,
            self.seconds
        )
    }
}

/// Projected remaining seconds, or `None` when no estimate can be made
/// (unknown total or nothing counted yet).
///
/// Computed as `elapsed / counter * (total - counter)` in floating point and
/// truncated. An overshoot (`counter > total`) yields zero.
pub fn remaining_secs(elapsed_secs: u64, counter: u64, total: Option<u64>) -> Option<u64> {
    let total = total?;
    if counter == 0 {
        return None;
    }
    let remaining =
        (elapsed_secs as f64 / counter as f64 * (total as f64 - counter as f64)).trunc();
    if remaining <= 0.0 {
        return Some(0);
    }
    // `as` saturates for values beyond u64::MAX.
    Some(remaining as u64)
}
