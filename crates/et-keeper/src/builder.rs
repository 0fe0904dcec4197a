//! Fluent builder for constructing a [`TimeKeeper`].

use et_core::CalendarConfig;

use crate::{
    ChatSink, CounterStore, EventBus, KeeperConfig, KeeperResult, PermissionOracle, TimeChangeEvent,
    TimeKeeper, TimeObserver,
};

/// Fluent builder for [`TimeKeeper<S, P>`].
///
/// # Required inputs
///
/// - `S: CounterStore`: where the counter is persisted
/// - `P: PermissionOracle`: gates `increment` / `set`
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                          |
/// |--------------------|----------------------------------|
/// | `.config(c)`       | `KeeperConfig::default()`        |
/// | `.calendar(c)`     | `CalendarConfig::default()`      |
/// | `.chat(sink)`      | none, `tell_time` only logs      |
/// | `.observer(o)`     | no observers                     |
///
/// # Example
///
/// ```rust,ignore
/// let keeper = TimeKeeperBuilder::new(MemoryStore::new(), Role::Gamemaster)
///     .calendar(calendar)
///     .chat(chat.clone())
///     .observer(daylight.clone())
///     .build()?;
/// ```
pub struct TimeKeeperBuilder<S: CounterStore, P: PermissionOracle> {
    store:       S,
    permissions: P,
    config:      Option<KeeperConfig>,
    calendar:    Option<CalendarConfig>,
    chat:        Option<Box<dyn ChatSink + Send>>,
    bus:         EventBus,
}

impl<S: CounterStore, P: PermissionOracle> TimeKeeperBuilder<S, P> {
    pub fn new(store: S, permissions: P) -> Self {
        Self {
            store,
            permissions,
            config:   None,
            calendar: None,
            chat:     None,
            bus:      EventBus::new(),
        }
    }

    pub fn config(mut self, config: KeeperConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn calendar(mut self, calendar: CalendarConfig) -> Self {
        self.calendar = Some(calendar);
        self
    }

    /// Sink used by [`TimeKeeper::tell_time`].
    pub fn chat<C: ChatSink + Send + 'static>(mut self, chat: C) -> Self {
        self.chat = Some(Box::new(chat));
        self
    }

    /// Subscribe an observer before the keeper exists, so it also sees the
    /// event from [`TimeKeeper::initialise`].
    pub fn observer<O: TimeObserver + Send + 'static>(mut self, observer: O) -> Self {
        self.bus.subscribe(observer);
        self
    }

    pub fn observer_fn<F>(mut self, f: F) -> Self
    where
        F: FnMut(&TimeChangeEvent) + Send + 'static,
    {
        self.bus.subscribe_fn(f);
        self
    }

    /// Validate the configuration and return a ready keeper.
    pub fn build(self) -> KeeperResult<TimeKeeper<S, P>> {
        let config = self.config.unwrap_or_default();
        config.validate()?;
        let calendar = self.calendar.unwrap_or_default();
        calendar.validate()?;

        Ok(TimeKeeper {
            store:       self.store,
            permissions: self.permissions,
            config,
            calendar,
            chat:        self.chat,
            bus:         self.bus,
        })
    }
}
