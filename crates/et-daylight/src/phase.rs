//! Phase detection and transition interpolation.
//!
//! # Classification
//!
//! First match wins:
//!
//! | Phase | Window                      |
//! |-------|-----------------------------|
//! | Dawn  | `dawn_start ≤ now < dawn_end` |
//! | Day   | `dawn_end ≤ now < dusk_start` |
//! | Dusk  | `dusk_start ≤ now < dusk_end` |
//! | Night | everything else             |
//!
//! Each window is measured forward from its start, modulo 24 hours, so a
//! window that crosses midnight behaves like any other.  A zero-length window
//! never matches.
//!
//! # Interpolation
//!
//! Inside dawn or dusk the sampled minute is `now + minutes_per_tick / 2`,
//! i.e. the middle of the current tick rather than its leading edge:
//!
//!   fraction = (elapsed_in_window + tick / 2) / window_length
//!   darkness = clamp(from + fraction · (to − from), 0, 1)

use std::fmt;

use et_core::TimeOfDay;

use crate::DaylightCycleConfig;

// ── Phase ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Dawn,
    Day,
    Dusk,
    Night,
}

impl Phase {
    /// `true` for dawn and dusk.
    #[inline]
    pub fn is_transition(self) -> bool {
        matches!(self, Phase::Dawn | Phase::Dusk)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Dawn  => "Dawn",
            Phase::Day   => "Day",
            Phase::Dusk  => "Dusk",
            Phase::Night => "Night",
        };
        f.write_str(s)
    }
}

// ── PhaseSample ───────────────────────────────────────────────────────────────

/// The phase at one instant and the darkness it implies.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct PhaseSample {
    pub phase:    Phase,
    /// Progress through the transition window, `[0, 1]`.  `None` for day
    /// and night.
    pub fraction: Option<f64>,
    /// Target scene darkness, `[0, 1]`.
    pub darkness: f64,
}

// ── Pure functions ────────────────────────────────────────────────────────────

#[inline]
fn in_window(now: TimeOfDay, start: TimeOfDay, length: u64) -> bool {
    length > 0 && now.minutes_since(start) < length
}

pub fn detect_phase(now: TimeOfDay, config: &DaylightCycleConfig) -> Phase {
    let dawn_end = config.dawn_end();
    let day_length = config.dusk_start.minutes_since(dawn_end);

    if in_window(now, config.dawn_start, config.dawn_duration as u64) {
        Phase::Dawn
    } else if in_window(now, dawn_end, day_length) {
        Phase::Day
    } else if in_window(now, config.dusk_start, config.dusk_duration as u64) {
        Phase::Dusk
    } else {
        Phase::Night
    }
}

/// Progress through a window of `duration` minutes starting at `start`,
/// sampled half a tick past `now` and clamped to `[0, 1]`.
pub fn transition_fraction(now: TimeOfDay, start: TimeOfDay, duration: u32, minutes_per_tick: u32) -> f64 {
    if duration == 0 {
        return 1.0;
    }
    let elapsed = now.minutes_since(start) as f64 + minutes_per_tick as f64 / 2.0;
    (elapsed / duration as f64).clamp(0.0, 1.0)
}

/// Linear blend from `from` to `to`, clamped to `[0, 1]`.
pub fn interpolate_darkness(fraction: f64, from: f64, to: f64) -> f64 {
    (fraction * (to - from) + from).clamp(0.0, 1.0)
}

/// Classify `now` and compute the darkness it calls for.
pub fn sample_phase(now: TimeOfDay, config: &DaylightCycleConfig, minutes_per_tick: u32) -> PhaseSample {
    let phase = detect_phase(now, config);
    let (fraction, darkness) = match phase {
        Phase::Dawn => {
            let f = transition_fraction(now, config.dawn_start, config.dawn_duration, minutes_per_tick);
            (Some(f), interpolate_darkness(f, config.night_darkness, config.day_darkness))
        }
        Phase::Dusk => {
            let f = transition_fraction(now, config.dusk_start, config.dusk_duration, minutes_per_tick);
            (Some(f), interpolate_darkness(f, config.day_darkness, config.night_darkness))
        }
        Phase::Day   => (None, config.day_darkness.clamp(0.0, 1.0)),
        Phase::Night => (None, config.night_darkness.clamp(0.0, 1.0)),
    };
    PhaseSample { phase, fraction, darkness }
}
