//! Daylight cycle settings.

use et_core::{MINUTES_PER_DAY, TimeOfDay};

use crate::{DaylightError, DaylightResult};

/// Dawn/dusk windows and the darkness levels they blend between.
///
/// Darkness is `0.0` (fully lit) to `1.0` (fully dark).  Windows are
/// evaluated modulo 24 hours, so a dusk starting at 23:30 and lasting an hour
/// ends at 00:30.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DaylightCycleConfig {
    /// When `false` the cycle never touches the scene.
    pub enabled:             bool,
    pub day_darkness:        f64,
    pub night_darkness:      f64,
    pub dawn_start:          TimeOfDay,
    /// Minutes.
    pub dawn_duration:       u32,
    pub dusk_start:          TimeOfDay,
    /// Minutes.
    pub dusk_duration:       u32,
    /// Animation length handed to the scene for every darkness change.
    pub animate_darkness_ms: u64,
}

impl Default for DaylightCycleConfig {
    fn default() -> Self {
        Self {
            enabled:             false,
            day_darkness:        0.0,
            night_darkness:      1.0,
            dawn_start:          TimeOfDay { hours: 6, minutes: 0 },
            dawn_duration:       60,
            dusk_start:          TimeOfDay { hours: 18, minutes: 0 },
            dusk_duration:       60,
            animate_darkness_ms: 5_000,
        }
    }
}

impl DaylightCycleConfig {
    #[inline]
    pub fn dawn_end(&self) -> TimeOfDay {
        self.dawn_start.wrapping_add_minutes(self.dawn_duration as i64)
    }

    #[inline]
    pub fn dusk_end(&self) -> TimeOfDay {
        self.dusk_start.wrapping_add_minutes(self.dusk_duration as i64)
    }

    /// Reject darkness levels outside `[0, 1]`, windows longer than a day
    /// and dawn/dusk windows that overlap.
    pub fn validate(&self) -> DaylightResult<()> {
        for (name, level) in [("day_darkness", self.day_darkness), ("night_darkness", self.night_darkness)] {
            if !(0.0..=1.0).contains(&level) {
                return Err(DaylightError::Config(format!("{name} must be within [0, 1], got {level}")));
            }
        }
        for (name, minutes) in [("dawn_duration", self.dawn_duration), ("dusk_duration", self.dusk_duration)] {
            if minutes as u64 >= MINUTES_PER_DAY {
                return Err(DaylightError::Config(format!("{name} must be shorter than a day, got {minutes}")));
            }
        }
        if self.dawn_duration > 0 && self.dusk_duration > 0 {
            let dusk_in_dawn = self.dusk_start.minutes_since(self.dawn_start) < self.dawn_duration as u64;
            let dawn_in_dusk = self.dawn_start.minutes_since(self.dusk_start) < self.dusk_duration as u64;
            if dusk_in_dawn || dawn_in_dusk {
                return Err(DaylightError::Config(format!(
                    "dawn {}+{}m overlaps dusk {}+{}m",
                    self.dawn_start, self.dawn_duration, self.dusk_start, self.dusk_duration
                )));
            }
        }
        Ok(())
    }
}
