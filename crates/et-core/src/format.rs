//! Human-readable time strings.

use crate::{FactoredTime, TimeOfDay};

/// 12-hour (`6:05 PM`) or 24-hour (`18:05`) clock style.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisplayMode {
    #[default]
    TwelveHour,
    TwentyFourHour,
}

impl DisplayMode {
    pub fn from_24_hour_flag(display_24_hour: bool) -> Self {
        if display_24_hour { DisplayMode::TwentyFourHour } else { DisplayMode::TwelveHour }
    }
}


/// `"h:mm AM"` / `"h:mm PM"` or `"hh:mm"` depending on `mode`.
///
/// In 12-hour mode midnight is `12:00 AM` and noon is `12:00 PM`.
pub fn time_of_day_string(time: TimeOfDay, mode: DisplayMode) -> String {
    match mode {
        DisplayMode::TwelveHour => {
            let am_pm = if time.hours >= 12 { "PM" } else { "AM" };
            let hour = match time.hours {
                0          => 12,
                h if h > 12 => h - 12,
                h          => h,
            };
            format!("{hour}:{:02} {am_pm}", time.minutes)
        }
        DisplayMode::TwentyFourHour => time.to_string(),
    }
}

/// The time of day, optionally followed by the one-based day number:
/// `"6:00 AM on day 1"`.
pub fn time_string(time: &FactoredTime, mode: DisplayMode, include_day: bool) -> String {
    let tod = time_of_day_string(time.time_of_day(), mode);
    if include_day {
        format!("{tod} on day {}", time.days + 1)
    } else {
        tod
    }
}
