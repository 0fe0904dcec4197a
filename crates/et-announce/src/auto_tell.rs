//! `AutoTellTime` — bridges `TimeObserver` to a `ChatSink`.

use std::collections::BTreeSet;

use et_core::{DisplayMode, FactoredTime, TimeOfDay, time_string};
use et_keeper::{ChatSink, TimeChangeEvent, TimeObserver};

use crate::{AnnounceError, AnnounceResult};

/// Times of day at which the clock announces itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AutoTellConfig {
    pub times: BTreeSet<TimeOfDay>,
}

impl AutoTellConfig {
    /// Parse each entry with [`TimeOfDay::from_str`][std::str::FromStr],
    /// accepting both `"6:00 AM"` and `"06:00"` styles.
    pub fn from_times<I, T>(times: I) -> AnnounceResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let times = times
            .into_iter()
            .map(|t| t.as_ref().parse::<TimeOfDay>())
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self { times })
    }

    pub fn contains(&self, time: TimeOfDay) -> bool {
        self.times.contains(&time)
    }
}

/// A [`TimeObserver`] that posts `"<time> on day <n>"` to chat whenever a
/// change lands exactly on a configured time of day.
///
/// Only the destination of a change is checked: a jump from 05:00 to 07:00
/// does not announce 06:00.  A re-publish with no movement (startup sync)
/// announces nothing.
///
/// Chat errors are logged and the first is stored; see
/// [`take_error`][Self::take_error].
pub struct AutoTellTime<C: ChatSink> {
    config:     AutoTellConfig,
    display:    DisplayMode,
    chat:       C,
    last_error: Option<AnnounceError>,
}

impl<C: ChatSink> AutoTellTime<C> {
    pub fn new(config: AutoTellConfig, display: DisplayMode, chat: C) -> Self {
        Self { config, display, chat, last_error: None }
    }

    /// Post `time` if its time of day is configured.  Returns whether a
    /// message was posted.
    pub fn check(&mut self, time: &FactoredTime) -> AnnounceResult<bool> {
        if !self.config.contains(time.time_of_day()) {
            return Ok(false);
        }
        let content = time_string(time, self.display, true);
        self.chat.post(&content)?;
        log::info!("announced {content}");
        Ok(true)
    }

    pub fn take_error(&mut self) -> Option<AnnounceError> {
        self.last_error.take()
    }

    pub fn into_chat(self) -> C {
        self.chat
    }
}

impl<C: ChatSink> TimeObserver for AutoTellTime<C> {
    fn on_time_changed(&mut self, event: &TimeChangeEvent) {
        if event.delta_minutes() == 0 {
            return;
        }
        if let Err(e) = self.check(&event.new_time) {
            log::warn!("could not announce {}: {e}", event.new_time);
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}
