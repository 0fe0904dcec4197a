//! `DaylightCycle` — bridges `TimeObserver` to a `SceneDarknessSink`.

use std::sync::Arc;

use et_core::TimeOfDay;
use et_keeper::{CollaboratorError, TimeChangeEvent, TimeObserver};
use parking_lot::Mutex;

use crate::{DaylightCycleConfig, DaylightError, DaylightResult, Phase, PhaseSample, sample_phase};

/// Darkness values closer than this are treated as equal.
const DARKNESS_EPSILON: f64 = 1e-9;

/// The rendered scene's lighting control.
pub trait SceneDarknessSink {
    /// Current darkness of the active scene.
    fn darkness(&self) -> Result<f64, CollaboratorError>;

    /// Change the darkness, animating over `animate_ms`.
    fn set_darkness(&mut self, value: f64, animate_ms: u64) -> Result<(), CollaboratorError>;
}

impl<D: SceneDarknessSink> SceneDarknessSink for Arc<Mutex<D>> {
    fn darkness(&self) -> Result<f64, CollaboratorError> {
        self.lock().darkness()
    }

    fn set_darkness(&mut self, value: f64, animate_ms: u64) -> Result<(), CollaboratorError> {
        self.lock().set_darkness(value, animate_ms)
    }
}

/// A [`TimeObserver`] that drives scene darkness from the time of day.
///
/// Scene errors are logged and the first one is stored because observer
/// methods have no return value.  Retrieve it with
/// [`take_error`][Self::take_error].
pub struct DaylightCycle<D: SceneDarknessSink> {
    config:           DaylightCycleConfig,
    minutes_per_tick: u32,
    scene:            D,
    last_error:       Option<DaylightError>,
}

impl<D: SceneDarknessSink> DaylightCycle<D> {
    /// Validates `config`.  `minutes_per_tick` sets the half-tick sampling
    /// offset (see [`crate::phase`]).
    pub fn new(config: DaylightCycleConfig, minutes_per_tick: u32, scene: D) -> DaylightResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            minutes_per_tick,
            scene,
            last_error: None,
        })
    }

    pub fn config(&self) -> &DaylightCycleConfig {
        &self.config
    }

    /// The phase `time` falls in, e.g. for display next to the clock.
    pub fn phase_of_day(&self, time: TimeOfDay) -> Phase {
        crate::detect_phase(time, &self.config)
    }

    /// Bring the scene in line with `now`.
    ///
    /// Dawn and dusk always write the interpolated value.  Day and night
    /// write only if the scene differs from the target, so a run of ticks in
    /// a steady phase doesn't restart the scene's animation.
    ///
    /// Returns `Ok(None)` when the cycle is disabled.
    pub fn update(&mut self, now: TimeOfDay) -> DaylightResult<Option<PhaseSample>> {
        if !self.config.enabled {
            return Ok(None);
        }
        let sample = sample_phase(now, &self.config, self.minutes_per_tick);
        log::debug!("daylight cycle at {now}: {:?}", sample);

        let write = match sample.phase {
            Phase::Dawn | Phase::Dusk => true,
            Phase::Day | Phase::Night => {
                let current = self.scene.darkness()?;
                (current - sample.darkness).abs() > DARKNESS_EPSILON
            }
        };
        if write {
            log::info!("daylight cycle ({}): setting darkness {:.3}", sample.phase, sample.darkness);
            self.scene.set_darkness(sample.darkness, self.config.animate_darkness_ms)?;
        }
        Ok(Some(sample))
    }

    /// Take the stored scene error (if any).
    pub fn take_error(&mut self) -> Option<DaylightError> {
        self.last_error.take()
    }

    pub fn into_scene(self) -> D {
        self.scene
    }
}

impl<D: SceneDarknessSink> TimeObserver for DaylightCycle<D> {
    fn on_time_changed(&mut self, event: &TimeChangeEvent) {
        if let Err(e) = self.update(event.new_time.time_of_day()) {
            log::error!("daylight cycle failed at {}: {e}", event.new_time);
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}
