//! Elapsed-time model.
//!
//! # Design
//!
//! Time is represented as a single non-negative counter of elapsed minutes
//! since the epoch (day 0, 00:00).  Every other representation is derived on
//! demand by [`FactoredTime::factor`]:
//!
//!   days    = total / 1440
//!   hours   = (total % 1440) / 60
//!   minutes = (total % 1440) % 60
//!
//! There are no time zones, leap years or months.  Weeks and shifts are
//! presentation lookups over `days` and `hours` (see [`crate::calendar`]).

use std::fmt;
use std::str::FromStr;

use crate::{EtError, EtResult};

pub const MINUTES_PER_HOUR: u64 = 60;
pub const HOURS_PER_DAY:    u64 = 24;
pub const MINUTES_PER_DAY:  u64 = MINUTES_PER_HOUR * HOURS_PER_DAY;

// ── TimeOfDay ─────────────────────────────────────────────────────────────────

/// An hour and minute within a single 24-hour day.
///
/// The derived ordering compares `hours` first, then `minutes`, which is the
/// total order used by phase detection.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeOfDay {
    /// Hour of the day, `0..=23`.
    pub hours:   u32,
    /// Minute of the hour, `0..=59`.
    pub minutes: u32,
}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { hours: 0, minutes: 0 };

    /// Validated constructor.
    pub fn new(hours: u32, minutes: u32) -> EtResult<Self> {
        if hours >= HOURS_PER_DAY as u32 || minutes >= MINUTES_PER_HOUR as u32 {
            return Err(EtError::InvalidTimeOfDay(format!("{hours}:{minutes:02}")));
        }
        Ok(Self { hours, minutes })
    }

    /// Build from a minute-of-day, wrapping values past midnight.
    #[inline]
    pub fn from_minute_of_day(minute: u64) -> Self {
        let m = minute % MINUTES_PER_DAY;
        Self {
            hours:   (m / MINUTES_PER_HOUR) as u32,
            minutes: (m % MINUTES_PER_HOUR) as u32,
        }
    }

    /// Minutes since midnight, `0..1440`.
    #[inline]
    pub fn minute_of_day(self) -> u64 {
        self.hours as u64 * MINUTES_PER_HOUR + self.minutes as u64
    }

    /// Add `minutes` (possibly negative), wrapping within the day.
    pub fn wrapping_add_minutes(self, minutes: i64) -> Self {
        let day = MINUTES_PER_DAY as i64;
        let m = (self.minute_of_day() as i64 + minutes).rem_euclid(day);
        Self::from_minute_of_day(m as u64)
    }

    /// Forward distance in minutes from `earlier` to `self`, going round
    /// midnight if needed.  Always in `0..1440`.
    #[inline]
    pub fn minutes_since(self, earlier: TimeOfDay) -> u64 {
        (self.minute_of_day() + MINUTES_PER_DAY - earlier.minute_of_day()) % MINUTES_PER_DAY
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

/// Parses `"06:00"`, `"18:30"`, `"6:00 AM"` and `"12:15 pm"`.
impl FromStr for TimeOfDay {
    type Err = EtError;

    fn from_str(s: &str) -> EtResult<Self> {
        let invalid = || EtError::InvalidTimeOfDay(s.to_string());
        let trimmed = s.trim();

        let (clock, meridiem) = match trimmed.rsplit_once(' ') {
            Some((clock, suffix)) => (clock.trim(), Some(suffix.to_ascii_uppercase())),
            None => (trimmed, None),
        };
        let (h, m) = clock.split_once(':').ok_or_else(invalid)?;
        let hours: u32 = h.trim().parse().map_err(|_| invalid())?;
        let minutes: u32 = m.trim().parse().map_err(|_| invalid())?;

        let hours = match meridiem.as_deref() {
            None => hours,
            Some(am_pm @ ("AM" | "PM")) => {
                if !(1..=12).contains(&hours) {
                    return Err(invalid());
                }
                match (am_pm, hours) {
                    ("AM", 12) => 0,
                    ("AM", h)  => h,
                    ("PM", 12) => 12,
                    (_, h)     => h + 12,
                }
            }
            Some(_) => return Err(invalid()),
        };
        TimeOfDay::new(hours, minutes).map_err(|_| invalid())
    }
}

// ── FactoredTime ──────────────────────────────────────────────────────────────

/// An immutable days/hours/minutes breakdown of an elapsed-minutes counter.
///
/// Never stored: always recomputed from the counter with [`factor`].
///
/// [`factor`]: FactoredTime::factor
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactoredTime {
    /// The counter value this snapshot was factored from.
    pub total_minutes: u64,
    /// Zero-based day number.
    pub days:          u64,
    /// Hour of the day, `0..=23`.
    pub hours:         u32,
    /// Minute of the hour, `0..=59`.
    pub minutes:       u32,
}

impl FactoredTime {
    pub const EPOCH: FactoredTime = FactoredTime { total_minutes: 0, days: 0, hours: 0, minutes: 0 };

    /// Split `total_minutes` into days, hours and minutes.
    pub fn factor(total_minutes: u64) -> Self {
        let rem = total_minutes % MINUTES_PER_DAY;
        Self {
            total_minutes,
            days:    total_minutes / MINUTES_PER_DAY,
            hours:   (rem / MINUTES_PER_HOUR) as u32,
            minutes: (rem % MINUTES_PER_HOUR) as u32,
        }
    }

    /// Rebuild the counter from the factored parts.
    ///
    /// Always equals `total_minutes` for a value produced by [`factor`].
    ///
    /// [`factor`]: FactoredTime::factor
    #[inline]
    pub fn reconstruct(&self) -> u64 {
        self.days * MINUTES_PER_DAY + self.hours as u64 * MINUTES_PER_HOUR + self.minutes as u64
    }

    #[inline]
    pub fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay { hours: self.hours, minutes: self.minutes }
    }
}

impl From<FactoredTime> for TimeOfDay {
    fn from(t: FactoredTime) -> Self {
        t.time_of_day()
    }
}

impl fmt::Display for FactoredTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "day {} {:02}:{:02}", self.days, self.hours, self.minutes)
    }
}

// ── TimeDelta ─────────────────────────────────────────────────────────────────

/// A days/hours/minutes quantity, each part optional (zero) and possibly
/// fractional or negative.
///
/// Converted to whole minutes with [`to_minutes`]; rounding happens once, on
/// the summed value, so `{hours: 0.5}` and `{minutes: 30}` agree exactly.
///
/// [`to_minutes`]: TimeDelta::to_minutes
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimeDelta {
    pub days:    f64,
    pub hours:   f64,
    pub minutes: f64,
}

impl TimeDelta {
    pub const ZERO: TimeDelta = TimeDelta { days: 0.0, hours: 0.0, minutes: 0.0 };

    pub fn minutes(minutes: f64) -> Self {
        Self { minutes, ..Self::ZERO }
    }

    pub fn hours(hours: f64) -> Self {
        Self { hours, ..Self::ZERO }
    }

    pub fn days(days: f64) -> Self {
        Self { days, ..Self::ZERO }
    }

    /// Total signed minutes, rounded to the nearest integer with ties
    /// towards positive infinity (`-2.5` is `-2`, `-0.5` is `0`).
    ///
    /// Non-finite parts count as zero.  Values beyond the `i64` range
    /// saturate.
    pub fn to_minutes(&self) -> i64 {
        let part = |v: f64| if v.is_finite() { v } else { 0.0 };
        let total = part(self.minutes)
            + part(self.hours) * MINUTES_PER_HOUR as f64
            + part(self.days) * MINUTES_PER_DAY as f64;
        (total + 0.5).floor() as i64
    }

    /// The same quantity pointing the other way.
    pub fn negated(&self) -> Self {
        Self { days: -self.days, hours: -self.hours, minutes: -self.minutes }
    }
}

// ── TimeInput ─────────────────────────────────────────────────────────────────

/// An absolute time given either as parts or as a raw minute count.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum TimeInput {
    Parts(TimeDelta),
    Minutes(f64),
}

impl TimeInput {
    /// Signed whole minutes since the epoch (may be negative; callers clamp).
    pub fn to_minutes(&self) -> i64 {
        match self {
            TimeInput::Parts(parts) => parts.to_minutes(),
            TimeInput::Minutes(m) => TimeDelta::minutes(*m).to_minutes(),
        }
    }
}

impl From<TimeDelta> for TimeInput {
    fn from(parts: TimeDelta) -> Self {
        TimeInput::Parts(parts)
    }
}

impl From<f64> for TimeInput {
    fn from(minutes: f64) -> Self {
        TimeInput::Minutes(minutes)
    }
}

impl From<i64> for TimeInput {
    fn from(minutes: i64) -> Self {
        TimeInput::Minutes(minutes as f64)
    }
}

impl From<u64> for TimeInput {
    fn from(minutes: u64) -> Self {
        TimeInput::Minutes(minutes as f64)
    }
}
