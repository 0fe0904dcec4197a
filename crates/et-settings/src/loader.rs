//! World settings loader.
//!
//! # Document format
//!
//! ```json
//! {
//!   "totalElapsedMinutes": 0,
//!   "display24HourTime": false,
//!   "smallTimeDelta": "15",
//!   "largeTimeDelta": 6,
//!   "minutesPerTick": 1,
//!   "daylightCycleSettings": {
//!     "daylight-cycle-enabled": true,
//!     "day-darkness-level": 0,
//!     "night-darkness-level": 1.0,
//!     "dawn-start": "06:00",
//!     "dawn-duration": 60,
//!     "dusk-start": "18:00",
//!     "dusk-duration": 60,
//!     "animate-darkness-ms": 5000
//!   },
//!   "autoTellTimeSettings": { "6:00 AM": true, "7:00 AM": false },
//!   "weekdaySettings": { "monday": "Moonday", "daysPerWeek": 7, "weekname": "Week" },
//!   "shiftSettings": { "morningName": "Morning", "nightName": "Night" }
//! }
//! ```
//!
//! `smallTimeDelta` (minutes), `largeTimeDelta` (hours) and `daysPerWeek` may
//! be numbers or numeric strings; the host's settings dialog stores them as strings.
//! Only `autoTellTimeSettings` entries set to `true` are kept.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use et_announce::AutoTellConfig;
use et_core::{CalendarConfig, DisplayMode, Shift, TimeOfDay};
use et_daylight::DaylightCycleConfig;
use et_keeper::KeeperConfig;

use crate::{SettingsError, SettingsResult};

// ── Raw document ──────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RawSettings {
    total_elapsed_minutes:   Option<i64>,
    #[serde(rename = "display24HourTime")]
    display_24_hour_time:    bool,
    small_time_delta:        Option<NumberOrString>,
    large_time_delta:        Option<NumberOrString>,
    minutes_per_tick:        Option<u32>,
    daylight_cycle_settings: Option<RawDaylight>,
    auto_tell_time_settings: BTreeMap<String, bool>,
    weekday_settings:        Option<RawWeekdays>,
    shift_settings:          Option<RawShifts>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawDaylight {
    daylight_cycle_enabled: Option<bool>,
    day_darkness_level:     Option<f64>,
    night_darkness_level:   Option<f64>,
    dawn_start:             Option<String>,
    dawn_duration:          Option<u32>,
    dusk_start:             Option<String>,
    dusk_duration:          Option<u32>,
    animate_darkness_ms:    Option<f64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWeekdays {
    #[serde(flatten)]
    names:         BTreeMap<String, serde_json::Value>,
    days_per_week: Option<NumberOrString>,
    weekname:      Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawShifts {
    night_name:     Option<String>,
    morning_name:   Option<String>,
    afternoon_name: Option<String>,
    evening_name:   Option<String>,
}

const WEEKDAY_KEYS: [&str; 7] = ["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"];

// ── Typed settings ────────────────────────────────────────────────────────────

/// Every configuration the workspace needs, validated.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldSettings {
    /// The persisted counter, if the document carries one.
    pub total_elapsed_minutes: Option<i64>,
    pub keeper:                KeeperConfig,
    pub calendar:              CalendarConfig,
    pub daylight:              DaylightCycleConfig,
    pub auto_tell:             AutoTellConfig,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            total_elapsed_minutes: None,
            keeper:                KeeperConfig::default(),
            calendar:              CalendarConfig::default(),
            daylight:              DaylightCycleConfig::default(),
            auto_tell:             AutoTellConfig::default(),
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and validate settings from a JSON file.
pub fn load_settings(path: &Path) -> SettingsResult<WorldSettings> {
    let file = std::fs::File::open(path)?;
    load_settings_reader(file)
}

/// Like [`load_settings`] but accepts any `Read` source.
pub fn load_settings_reader<R: Read>(reader: R) -> SettingsResult<WorldSettings> {
    let raw: RawSettings =
        serde_json::from_reader(reader).map_err(|e| SettingsError::Parse(e.to_string()))?;
    build(raw)
}

/// Like [`load_settings`] but parses an in-memory string.
pub fn parse_settings(json: &str) -> SettingsResult<WorldSettings> {
    let raw: RawSettings = serde_json::from_str(json).map_err(|e| SettingsError::Parse(e.to_string()))?;
    build(raw)
}

// ── Conversion ────────────────────────────────────────────────────────────────

fn build(raw: RawSettings) -> SettingsResult<WorldSettings> {
    let defaults = WorldSettings::default();

    // ── Keeper ────────────────────────────────────────────────────────────
    let mut keeper = defaults.keeper;
    if let Some(v) = raw.small_time_delta {
        keeper.small_step_minutes = positive_int("smallTimeDelta", v)?;
    }
    if let Some(v) = raw.large_time_delta {
        keeper.large_step_hours = positive_int("largeTimeDelta", v)?;
    }
    if let Some(v) = raw.minutes_per_tick {
        keeper.minutes_per_tick = v;
    }
    keeper.validate()?;

    // ── Calendar ──────────────────────────────────────────────────────────
    let mut calendar = defaults.calendar;
    calendar.display = DisplayMode::from_24_hour_flag(raw.display_24_hour_time);
    if let Some(w) = raw.weekday_settings {
        if let Some(n) = w.days_per_week {
            calendar.days_per_week = positive_int("daysPerWeek", n)?;
        }
        if let Some(name) = w.weekname {
            calendar.week_name = name;
        }
        for (i, key) in WEEKDAY_KEYS.iter().enumerate() {
            if let Some(serde_json::Value::String(name)) = w.names.get(*key) {
                calendar.weekday_names[i] = name.clone();
            }
        }
    }
    if let Some(s) = raw.shift_settings {
        let overrides = [
            (Shift::Night, s.night_name),
            (Shift::Morning, s.morning_name),
            (Shift::Afternoon, s.afternoon_name),
            (Shift::Evening, s.evening_name),
        ];
        for (shift, name) in overrides {
            if let Some(name) = name {
                calendar.shift_names[shift.index()] = name;
            }
        }
    }
    calendar.validate()?;

    // ── Daylight cycle ────────────────────────────────────────────────────
    let mut daylight = defaults.daylight;
    if let Some(d) = raw.daylight_cycle_settings {
        if let Some(v) = d.daylight_cycle_enabled {
            daylight.enabled = v;
        }
        if let Some(v) = d.day_darkness_level {
            daylight.day_darkness = v;
        }
        if let Some(v) = d.night_darkness_level {
            daylight.night_darkness = v;
        }
        if let Some(s) = d.dawn_start {
            daylight.dawn_start = s.parse::<TimeOfDay>()?;
        }
        if let Some(v) = d.dawn_duration {
            daylight.dawn_duration = v;
        }
        if let Some(s) = d.dusk_start {
            daylight.dusk_start = s.parse::<TimeOfDay>()?;
        }
        if let Some(v) = d.dusk_duration {
            daylight.dusk_duration = v;
        }
        if let Some(ms) = d.animate_darkness_ms {
            if !ms.is_finite() || ms < 0.0 {
                return Err(SettingsError::Invalid {
                    key:    "animate-darkness-ms",
                    reason: format!("expected a non-negative number, got {ms}"),
                });
            }
            daylight.animate_darkness_ms = ms.round() as u64;
        }
    }
    daylight.validate()?;

    // ── Auto tell-time ────────────────────────────────────────────────────
    let enabled_times = raw
        .auto_tell_time_settings
        .iter()
        .filter(|&(_, &on)| on)
        .map(|(time, _)| time.as_str());
    let auto_tell = AutoTellConfig::from_times(enabled_times)?;

    Ok(WorldSettings {
        total_elapsed_minutes: raw.total_elapsed_minutes,
        keeper,
        calendar,
        daylight,
        auto_tell,
    })
}

fn positive_int(key: &'static str, value: NumberOrString) -> SettingsResult<u32> {
    let n = match value {
        NumberOrString::Number(n) => n,
        NumberOrString::Text(s) => s.trim().parse::<f64>().map_err(|_| SettingsError::Invalid {
            key,
            reason: format!("{s:?} is not a number"),
        })?,
    };
    if !n.is_finite() || n < 1.0 || n.fract() != 0.0 || n > u32::MAX as f64 {
        return Err(SettingsError::Invalid { key, reason: format!("expected a positive whole number, got {n}") });
    }
    Ok(n as u32)
}
