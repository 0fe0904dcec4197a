//! `et-core` — foundational types for the easy-timekeeping workspace.
//!
//! This crate is a dependency of every other `et-*` crate.  It has no `et-*`
//! dependencies and a single external one (`thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`time`]        | `TimeOfDay`, `FactoredTime`, `TimeDelta`, `TimeInput` |
//! | [`calendar`]    | `CalendarConfig`, `CalendarTime`, `Shift`             |
//! | [`format`]      | `DisplayMode`, time-of-day and day strings            |
//! | [`error`]       | `EtError`, `EtResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod calendar;
pub mod error;
pub mod format;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use calendar::{CalendarConfig, CalendarTime, Shift};
pub use error::{EtError, EtResult};
pub use format::{DisplayMode, time_of_day_string, time_string};
pub use time::{FactoredTime, MINUTES_PER_DAY, MINUTES_PER_HOUR, TimeDelta, TimeInput, TimeOfDay};
