//! Week and shift metadata layered over [`FactoredTime`].
//!
//! None of this is authoritative state: the week is `days mod days_per_week`
//! and the shift is `hours / 6`.  Both exist purely for display.

use std::fmt;

use crate::{DisplayMode, EtError, EtResult, FactoredTime};

pub const SHIFTS_PER_DAY:   u32 = 4;
pub const HOURS_PER_SHIFT:  u32 = 6;

pub const MIN_DAYS_PER_WEEK:     u32 = 5;
pub const MAX_DAYS_PER_WEEK:     u32 = 14;
pub const DEFAULT_DAYS_PER_WEEK: u32 = 7;

// ── Shift ─────────────────────────────────────────────────────────────────────

/// One of the four six-hour watches of a day.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shift {
    /// 00:00–06:00
    Night,
    /// 06:00–12:00
    Morning,
    /// 12:00–18:00
    Afternoon,
    /// 18:00–24:00
    Evening,
}

impl Shift {
    pub const ALL: [Shift; SHIFTS_PER_DAY as usize] =
        [Shift::Night, Shift::Morning, Shift::Afternoon, Shift::Evening];

    /// The shift containing `hours` (0–23).  Hours past 23 wrap.
    #[inline]
    pub fn from_hour(hours: u32) -> Shift {
        Self::ALL[((hours / HOURS_PER_SHIFT) % SHIFTS_PER_DAY) as usize]
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Shift::Night     => "Night",
            Shift::Morning   => "Morning",
            Shift::Afternoon => "Afternoon",
            Shift::Evening   => "Evening",
        };
        f.write_str(s)
    }
}

// ── CalendarConfig ────────────────────────────────────────────────────────────

/// Presentation settings: week length, day and shift names, clock style.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarConfig {
    /// Days in a week, `5..=14`.
    pub days_per_week: u32,
    /// Weekday names, indexed by `days % days_per_week`.  May be shorter
    /// than `days_per_week`; missing entries display as `"Day N"`.
    pub weekday_names: Vec<String>,
    /// Label for the week itself, e.g. `"Week"`.
    pub week_name:     String,
    /// Names of the four shifts in [`Shift::ALL`] order.
    pub shift_names:   [String; SHIFTS_PER_DAY as usize],
    pub display:       DisplayMode,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            days_per_week: DEFAULT_DAYS_PER_WEEK,
            weekday_names: ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"]
                .map(String::from)
                .to_vec(),
            week_name:     "Week".to_string(),
            shift_names:   Shift::ALL.map(|s| s.to_string()),
            display:       DisplayMode::TwelveHour,
        }
    }
}

impl CalendarConfig {
    pub fn validate(&self) -> EtResult<()> {
        if !(MIN_DAYS_PER_WEEK..=MAX_DAYS_PER_WEEK).contains(&self.days_per_week) {
            return Err(EtError::Config(format!(
                "days_per_week must be in {MIN_DAYS_PER_WEEK}..={MAX_DAYS_PER_WEEK}, got {}",
                self.days_per_week
            )));
        }
        Ok(())
    }

    /// Name of weekday `index` (zero-based).
    pub fn weekday_name(&self, index: u32) -> String {
        match self.weekday_names.get(index as usize) {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("Day {}", index + 1),
        }
    }

    pub fn shift_name(&self, shift: Shift) -> &str {
        &self.shift_names[shift.index()]
    }

    /// Attach week and shift metadata to a factored time.
    pub fn describe(&self, time: FactoredTime) -> CalendarTime {
        // Guard the modulus; an unvalidated zero would otherwise panic.
        let per_week = self.days_per_week.max(1) as u64;
        let weekday = (time.days % per_week) as u32;
        let shift = Shift::from_hour(time.hours);
        CalendarTime {
            time,
            week:         time.days / per_week,
            weekday,
            weekday_name: self.weekday_name(weekday),
            shift,
            shift_name:   self.shift_name(shift).to_string(),
        }
    }
}

// ── CalendarTime ──────────────────────────────────────────────────────────────

/// A [`FactoredTime`] plus its week/weekday/shift labels.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarTime {
    pub time:         FactoredTime,
    /// Zero-based week number.
    pub week:         u64,
    /// Zero-based day of the week.
    pub weekday:      u32,
    pub weekday_name: String,
    pub shift:        Shift,
    pub shift_name:   String,
}
