//! Keeper step sizes and base unit.

use et_core::TimeDelta;

use crate::{KeeperError, KeeperResult};

/// Step sizes used by the UI-facing helpers, and the clock's base unit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeeperConfig {
    /// Used by [`TimeKeeper::increment_default`].  Default: 10 minutes.
    ///
    /// [`TimeKeeper::increment_default`]: crate::TimeKeeper::increment_default
    pub default_increment:  TimeDelta,

    /// Small step in minutes.  Default: 15.
    pub small_step_minutes: u32,

    /// Large step in hours.  Default: 6.
    pub large_step_hours:   u32,

    /// Granularity at which the host advances the clock, in minutes.
    /// The daylight cycle samples transitions half a tick past the current
    /// minute.  Default: 1.
    pub minutes_per_tick:   u32,
}

impl Default for KeeperConfig {
    fn default() -> Self {
        Self {
            default_increment:  TimeDelta::minutes(10.0),
            small_step_minutes: 15,
            large_step_hours:   6,
            minutes_per_tick:   1,
        }
    }
}

impl KeeperConfig {
    pub fn validate(&self) -> KeeperResult<()> {
        if self.small_step_minutes == 0 {
            return Err(KeeperError::Config("small_step_minutes must be positive".into()));
        }
        if self.large_step_hours == 0 {
            return Err(KeeperError::Config("large_step_hours must be positive".into()));
        }
        if self.minutes_per_tick == 0 {
            return Err(KeeperError::Config("minutes_per_tick must be positive".into()));
        }
        Ok(())
    }

    pub fn small_step(&self) -> TimeDelta {
        TimeDelta::minutes(self.small_step_minutes as f64)
    }

    pub fn large_step(&self) -> TimeDelta {
        TimeDelta::hours(self.large_step_hours as f64)
    }
}
