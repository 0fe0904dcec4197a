//! `et-daylight` — the day/night lighting cycle.
//!
//! The day is divided into four phases:
//!
//! ```text
//!   Night ──▶ Dawn ──▶ Day ──▶ Dusk ──▶ Night
//!            night→day         day→night
//!            darkness          darkness
//!            interpolated      interpolated
//! ```
//!
//! Phase detection ([`detect_phase`], [`sample_phase`]) is a pure function of
//! the time of day and a [`DaylightCycleConfig`].  Nothing is remembered
//! between calls, so a jump of any size lands on the right phase.
//!
//! [`DaylightCycle`] is the [`TimeObserver`][et_keeper::TimeObserver] that
//! applies the sampled darkness to a [`SceneDarknessSink`].

pub mod config;
pub mod cycle;
pub mod error;
pub mod phase;


pub use config::DaylightCycleConfig;
pub use cycle::{DaylightCycle, SceneDarknessSink};
pub use error::{DaylightError, DaylightResult};
pub use phase::{Phase, PhaseSample, detect_phase, interpolate_darkness, sample_phase, transition_fraction};
