//! The `TimeKeeper` struct: the single owner of the elapsed-minutes counter.

use std::sync::Arc;

use et_core::{CalendarConfig, CalendarTime, FactoredTime, TimeDelta, TimeInput, time_string};
use parking_lot::Mutex;

use crate::{
    ChatSink, CounterStore, EventBus, KeeperConfig, KeeperError, KeeperResult, ObserverId,
    PermissionOracle, TimeChangeEvent, TimeObserver, TimeUpdate,
};

/// Store key under which the counter is persisted.
pub const TOTAL_ELAPSED_MINUTES_KEY: &str = "totalElapsedMinutes";

/// A keeper shared between host callbacks on several threads.
///
/// The mutex is the single-writer discipline: each `increment`/`set` runs its
/// read-modify-write to completion before the next caller gets the lock.
/// Observers run while the lock is held and so must not lock the same
/// keeper again.
pub type SharedTimeKeeper<S, P> = Arc<Mutex<TimeKeeper<S, P>>>;

/// Owns the elapsed-minutes counter and publishes every change.
///
/// The counter lives in the [`CounterStore`] and is re-read on every call;
/// the keeper caches nothing.  Mutating calls take `&mut self`, so exclusive
/// borrowing already serialises them within one thread.
///
/// Create via [`TimeKeeperBuilder`][crate::TimeKeeperBuilder].
pub struct TimeKeeper<S: CounterStore, P: PermissionOracle> {
    pub(crate) store:       S,
    pub(crate) permissions: P,
    pub(crate) config:      KeeperConfig,
    pub(crate) calendar:    CalendarConfig,
    pub(crate) chat:        Option<Box<dyn ChatSink + Send>>,
    pub(crate) bus:         EventBus,
}

impl<S: CounterStore, P: PermissionOracle> TimeKeeper<S, P> {
    // ── Mutations ─────────────────────────────────────────────────────────

    /// Advance (or, with negative parts, rewind) the clock by `delta`.
    ///
    /// The result is clamped at zero: rewinding past the epoch lands on the
    /// epoch, and rewinding while already there is [`TimeUpdate::Unchanged`].
    pub fn increment(&mut self, delta: TimeDelta) -> KeeperResult<TimeUpdate> {
        if !self.permitted("increment") {
            return Ok(TimeUpdate::Denied);
        }
        let delta_minutes = delta.to_minutes();
        let current = self.total_elapsed_minutes()?;
        log::debug!("incrementing {delta_minutes} minute(s) from {current}");
        self.apply(current, current.saturating_add_signed(delta_minutes))
    }

    /// Increment by the configured default step.
    pub fn increment_default(&mut self) -> KeeperResult<TimeUpdate> {
        let delta = self.config.default_increment;
        self.increment(delta)
    }

    /// Move by the configured small step (minutes).
    pub fn step_small(&mut self, forward: bool) -> KeeperResult<TimeUpdate> {
        let step = self.config.small_step();
        self.increment(if forward { step } else { step.negated() })
    }

    /// Move by the configured large step (hours).
    pub fn step_large(&mut self, forward: bool) -> KeeperResult<TimeUpdate> {
        let step = self.config.large_step();
        self.increment(if forward { step } else { step.negated() })
    }

    /// Set the clock to an absolute time since the epoch.
    ///
    /// Negative inputs clamp to zero.
    pub fn set(&mut self, time: impl Into<TimeInput>) -> KeeperResult<TimeUpdate> {
        if !self.permitted("set") {
            return Ok(TimeUpdate::Denied);
        }
        let target = time.into().to_minutes().max(0) as u64;
        let current = self.total_elapsed_minutes()?;
        self.apply(current, target)
    }

    /// Re-publish the current time with `old_time == new_time` so observers
    /// can synchronise on startup.  Not permission gated; writes nothing.
    pub fn initialise(&mut self) -> KeeperResult<TimeChangeEvent> {
        let now = self.get_time()?;
        let event = TimeChangeEvent { old_time: now, new_time: now };
        log::info!("initialised at {now}");
        self.bus.notify(&event);
        Ok(event)
    }

    fn apply(&mut self, current: u64, target: u64) -> KeeperResult<TimeUpdate> {
        // The store holds signed values.
        let target = target.min(i64::MAX as u64);
        if target == current {
            log::debug!("time unchanged at {current}");
            return Ok(TimeUpdate::Unchanged);
        }
        self.store
            .set(TOTAL_ELAPSED_MINUTES_KEY, target as i64)
            .map_err(KeeperError::Store)?;

        let event = TimeChangeEvent {
            old_time: FactoredTime::factor(current),
            new_time: FactoredTime::factor(target),
        };
        log::info!("time changed {} -> {}", event.old_time, event.new_time);
        self.bus.notify(&event);
        Ok(TimeUpdate::Changed(event))
    }

    fn permitted(&self, op: &str) -> bool {
        let ok = self.permissions.is_privileged();
        if !ok {
            log::warn!("{op} refused: caller is not privileged");
        }
        ok
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// The raw counter.  A missing key reads as zero (first activation); a
    /// negative stored value also reads as zero.
    pub fn total_elapsed_minutes(&self) -> KeeperResult<u64> {
        let raw = self
            .store
            .get(TOTAL_ELAPSED_MINUTES_KEY)
            .map_err(KeeperError::Store)?;
        Ok(raw.unwrap_or(0).max(0) as u64)
    }

    pub fn get_time(&self) -> KeeperResult<FactoredTime> {
        Ok(FactoredTime::factor(self.total_elapsed_minutes()?))
    }

    /// The current time with week and shift labels.
    pub fn calendar_time(&self) -> KeeperResult<CalendarTime> {
        Ok(self.calendar.describe(self.get_time()?))
    }

    pub fn to_time_string(&self, include_day: bool) -> KeeperResult<String> {
        Ok(time_string(&self.get_time()?, self.calendar.display, include_day))
    }

    /// Post the current time (with day) to chat.
    ///
    /// A missing or failing chat sink is logged and swallowed; only a store
    /// read failure is returned.
    pub fn tell_time(&mut self) -> KeeperResult<()> {
        let content = self.to_time_string(true)?;
        match self.chat.as_mut() {
            Some(chat) => match chat.post(&content) {
                Ok(()) => log::info!("told time: {content}"),
                Err(e) => log::warn!("could not post time to chat: {e}"),
            },
            None => log::warn!("no chat sink configured; time is {content}"),
        }
        Ok(())
    }

    // ── Observers & accessors ─────────────────────────────────────────────

    pub fn subscribe<O: TimeObserver + Send + 'static>(&mut self, observer: O) -> ObserverId {
        self.bus.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub fn config(&self) -> &KeeperConfig {
        &self.config
    }

    pub fn calendar(&self) -> &CalendarConfig {
        &self.calendar
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Wrap in a [`SharedTimeKeeper`].
    pub fn into_shared(self) -> SharedTimeKeeper<S, P> {
        Arc::new(Mutex::new(self))
    }
}
