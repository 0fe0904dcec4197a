//! Unit tests for et-keeper.

use std::sync::Arc;

use parking_lot::Mutex;

use et_core::{MINUTES_PER_DAY, TimeDelta};

use crate::{
    ChatSink, CollaboratorError, CounterStore, MemoryStore, Role, TOTAL_ELAPSED_MINUTES_KEY,
    TimeChangeEvent, TimeKeeper, TimeKeeperBuilder,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

type Events = Arc<Mutex<Vec<TimeChangeEvent>>>;

/// Keeper at `start` minutes with a recording observer.
fn keeper_at(start: i64, role: Role) -> (TimeKeeper<MemoryStore, Role>, Events) {
    let events: Events = Arc::default();
    let sink = events.clone();
    let keeper = TimeKeeperBuilder::new(MemoryStore::with_value(TOTAL_ELAPSED_MINUTES_KEY, start), role)
        .observer_fn(move |e| sink.lock().push(*e))
        .build()
        .unwrap();
    (keeper, events)
}

#[derive(Default)]
struct RecordingChat {
    posts: Vec<String>,
}

impl ChatSink for RecordingChat {
    fn post(&mut self, text: &str) -> Result<(), CollaboratorError> {
        self.posts.push(text.to_string());
        Ok(())
    }
}

struct FailingChat;

impl ChatSink for FailingChat {
    fn post(&mut self, _text: &str) -> Result<(), CollaboratorError> {
        Err(CollaboratorError::new("chat", "offline"))
    }
}

/// Reads fine, refuses every write.
struct ReadOnlyStore(i64);

impl CounterStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<i64>, CollaboratorError> {
        Ok(Some(self.0))
    }

    fn set(&mut self, _key: &str, _value: i64) -> Result<(), CollaboratorError> {
        Err(CollaboratorError::new("store", "read only"))
    }
}

struct UnreachableStore;

impl CounterStore for UnreachableStore {
    fn get(&self, _key: &str) -> Result<Option<i64>, CollaboratorError> {
        Err(CollaboratorError::new("store", "unreachable"))
    }

    fn set(&mut self, _key: &str, _value: i64) -> Result<(), CollaboratorError> {
        Err(CollaboratorError::new("store", "unreachable"))
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::KeeperConfig;
    use et_core::CalendarConfig;

    #[test]
    fn builds_with_defaults() {
        let keeper = TimeKeeperBuilder::new(MemoryStore::new(), Role::Gamemaster).build().unwrap();
        assert_eq!(keeper.config(), &KeeperConfig::default());
        assert_eq!(keeper.total_elapsed_minutes().unwrap(), 0);
    }

    #[test]
    fn zero_step_rejected() {
        let config = KeeperConfig { small_step_minutes: 0, ..KeeperConfig::default() };
        let result = TimeKeeperBuilder::new(MemoryStore::new(), Role::Gamemaster)
            .config(config)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn invalid_calendar_rejected() {
        let calendar = CalendarConfig { days_per_week: 2, ..CalendarConfig::default() };
        let result = TimeKeeperBuilder::new(MemoryStore::new(), Role::Gamemaster)
            .calendar(calendar)
            .build();
        assert!(result.is_err());
    }
}

// ── increment / set ───────────────────────────────────────────────────────────

#[cfg(test)]
mod mutation_tests {
    use super::*;
    use crate::TimeUpdate;
    use et_core::FactoredTime;

    #[test]
    fn six_hours_from_epoch() {
        let (mut keeper, events) = keeper_at(0, Role::Gamemaster);
        let update = keeper.increment(TimeDelta::hours(6.0)).unwrap();
        let event = update.event().copied().unwrap();
        assert_eq!(event.old_time, FactoredTime::EPOCH);
        assert_eq!((event.new_time.days, event.new_time.hours, event.new_time.minutes), (0, 6, 0));
        assert_eq!(events.lock().as_slice(), &[event]);
    }

    #[test]
    fn one_day_equals_1440_minutes() {
        let (mut a, _) = keeper_at(17, Role::Gamemaster);
        let (mut b, _) = keeper_at(17, Role::Gamemaster);
        a.increment(TimeDelta::days(1.0)).unwrap();
        b.increment(TimeDelta::minutes(1440.0)).unwrap();
        assert_eq!(a.total_elapsed_minutes().unwrap(), b.total_elapsed_minutes().unwrap());
        assert_eq!(a.total_elapsed_minutes().unwrap(), 17 + MINUTES_PER_DAY);
    }

    #[test]
    fn decrement_past_zero_clamps_then_noops() {
        let (mut keeper, events) = keeper_at(30, Role::Gamemaster);
        let first = keeper.increment(TimeDelta::minutes(-100.0)).unwrap();
        assert!(first.is_changed());
        assert_eq!(keeper.total_elapsed_minutes().unwrap(), 0);

        let second = keeper.increment(TimeDelta::minutes(-100.0)).unwrap();
        assert_eq!(second, TimeUpdate::Unchanged);
        assert_eq!(events.lock().len(), 1);
    }

    #[test]
    fn zero_delta_is_unchanged() {
        let (mut keeper, events) = keeper_at(90, Role::Gamemaster);
        assert_eq!(keeper.increment(TimeDelta::ZERO).unwrap(), TimeUpdate::Unchanged);
        assert_eq!(keeper.increment(TimeDelta::minutes(0.4)).unwrap(), TimeUpdate::Unchanged);
        assert!(events.lock().is_empty());
    }

    #[test]
    fn fractional_parts_round_at_the_end() {
        let (mut keeper, _) = keeper_at(0, Role::Gamemaster);
        keeper.increment(TimeDelta { hours: 0.5, minutes: 0.6, ..TimeDelta::ZERO }).unwrap();
        assert_eq!(keeper.total_elapsed_minutes().unwrap(), 31);
    }

    #[test]
    fn negative_half_minutes_round_towards_the_future() {
        let (mut keeper, events) = keeper_at(10, Role::Gamemaster);
        keeper.increment(TimeDelta::minutes(-2.5)).unwrap();
        assert_eq!(keeper.total_elapsed_minutes().unwrap(), 8);

        assert_eq!(keeper.increment(TimeDelta::minutes(-0.5)).unwrap(), TimeUpdate::Unchanged);
        assert_eq!(keeper.total_elapsed_minutes().unwrap(), 8);
        assert_eq!(events.lock().len(), 1);
    }

    #[test]
    fn set_twice_notifies_once() {
        let (mut keeper, events) = keeper_at(0, Role::Gamemaster);
        assert!(keeper.set(500u64).unwrap().is_changed());
        assert_eq!(keeper.set(500u64).unwrap(), TimeUpdate::Unchanged);
        assert_eq!(events.lock().len(), 1);
    }

    #[test]
    fn set_from_parts() {
        let (mut keeper, _) = keeper_at(12_345, Role::Gamemaster);
        let update = keeper.set(TimeDelta { days: 2.0, hours: 3.0, minutes: 4.0 }).unwrap();
        let event = update.event().unwrap();
        assert_eq!(event.old_time.total_minutes, 12_345);
        assert_eq!(event.new_time.total_minutes, 2 * MINUTES_PER_DAY + 184);
    }

    #[test]
    fn negative_set_clamps_to_epoch() {
        let (mut keeper, _) = keeper_at(100, Role::Gamemaster);
        let update = keeper.set(-5i64).unwrap();
        assert_eq!(update.event().unwrap().new_time, FactoredTime::EPOCH);
    }

    #[test]
    fn player_cannot_set() {
        let (mut keeper, events) = keeper_at(42, Role::Player);
        let update = keeper.set(TimeDelta::days(5.0)).unwrap();
        assert!(update.is_denied());
        assert!(update.event().is_none());
        assert_eq!(keeper.total_elapsed_minutes().unwrap(), 42);
        assert!(events.lock().is_empty());
    }

    #[test]
    fn player_cannot_increment() {
        let (mut keeper, _) = keeper_at(42, Role::Player);
        assert_eq!(keeper.increment(TimeDelta::hours(1.0)).unwrap(), TimeUpdate::Denied);
        assert_eq!(keeper.step_small(true).unwrap(), TimeUpdate::Denied);
        assert_eq!(keeper.total_elapsed_minutes().unwrap(), 42);
    }

    #[test]
    fn configured_steps() {
        let (mut keeper, _) = keeper_at(0, Role::Gamemaster);
        keeper.increment_default().unwrap();
        assert_eq!(keeper.total_elapsed_minutes().unwrap(), 10);
        keeper.step_small(true).unwrap();
        assert_eq!(keeper.total_elapsed_minutes().unwrap(), 25);
        keeper.step_large(true).unwrap();
        assert_eq!(keeper.total_elapsed_minutes().unwrap(), 25 + 360);
        keeper.step_large(false).unwrap();
        keeper.step_small(false).unwrap();
        assert_eq!(keeper.total_elapsed_minutes().unwrap(), 10);
    }

    #[test]
    fn clamp_property_random() {
        use rand::rngs::SmallRng;
        use rand::{Rng, SeedableRng};

        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..500 {
            let c: i64 = rng.gen_range(0..100_000);
            let d: i64 = -c - rng.gen_range(1..100_000);
            let (mut keeper, events) = keeper_at(c, Role::Gamemaster);
            keeper.increment(TimeDelta::minutes(d as f64)).unwrap();
            assert_eq!(keeper.total_elapsed_minutes().unwrap(), 0);
            let before = events.lock().len();
            assert_eq!(keeper.increment(TimeDelta::minutes(d as f64)).unwrap(), TimeUpdate::Unchanged);
            assert_eq!(events.lock().len(), before);
        }
    }
}

// ── Store behaviour ───────────────────────────────────────────────────────────

#[cfg(test)]
mod store_tests {
    use super::*;
    use crate::KeeperError;

    #[test]
    fn missing_and_negative_values_read_as_zero() {
        let keeper = TimeKeeperBuilder::new(MemoryStore::new(), Role::Gamemaster).build().unwrap();
        assert_eq!(keeper.total_elapsed_minutes().unwrap(), 0);
        let (keeper, _) = keeper_at(-20, Role::Gamemaster);
        assert_eq!(keeper.total_elapsed_minutes().unwrap(), 0);
    }

    #[test]
    fn write_failure_propagates_without_notification() {
        let calls = Arc::new(Mutex::new(0usize));
        let seen = calls.clone();
        let mut keeper = TimeKeeperBuilder::new(ReadOnlyStore(60), Role::Gamemaster)
            .observer_fn(move |_| *seen.lock() += 1)
            .build()
            .unwrap();
        let result = keeper.increment(TimeDelta::minutes(5.0));
        assert!(matches!(result, Err(KeeperError::Store(_))));
        assert_eq!(*calls.lock(), 0);
        assert_eq!(keeper.total_elapsed_minutes().unwrap(), 60);
    }

    #[test]
    fn read_failure_propagates() {
        let mut keeper = TimeKeeperBuilder::new(UnreachableStore, Role::Gamemaster).build().unwrap();
        assert!(keeper.get_time().is_err());
        assert!(keeper.set(10u64).is_err());
    }

    #[test]
    fn denial_does_not_touch_the_store() {
        let mut keeper = TimeKeeperBuilder::new(UnreachableStore, Role::Player).build().unwrap();
        assert!(keeper.increment(TimeDelta::hours(1.0)).unwrap().is_denied());
    }

    #[test]
    fn persisted_under_the_counter_key() {
        let store = Arc::new(Mutex::new(MemoryStore::new()));
        let mut keeper = TimeKeeperBuilder::new(store.clone(), Role::Gamemaster).build().unwrap();
        keeper.set(77u64).unwrap();
        assert_eq!(store.lock().get(TOTAL_ELAPSED_MINUTES_KEY).unwrap(), Some(77));
    }

    #[test]
    fn store_accessor_reads_the_backing_store() {
        let (mut keeper, _) = keeper_at(5, Role::Gamemaster);
        keeper.increment(TimeDelta::hours(1.0)).unwrap();
        assert_eq!(keeper.store().get(TOTAL_ELAPSED_MINUTES_KEY).unwrap(), Some(65));
    }
}

// ── Observers ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;
    use crate::{EventBus, NoopObserver, TimeObserver};

    struct Tagged {
        tag: &'static str,
        log: Arc<Mutex<Vec<(&'static str, TimeChangeEvent)>>>,
    }

    impl TimeObserver for Tagged {
        fn on_time_changed(&mut self, event: &TimeChangeEvent) {
            self.log.lock().push((self.tag, *event));
        }
    }

    #[test]
    fn every_observer_sees_the_same_event_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut keeper = TimeKeeperBuilder::new(MemoryStore::new(), Role::Gamemaster)
            .observer(Tagged { tag: "a", log: log.clone() })
            .observer(NoopObserver)
            .observer(Tagged { tag: "b", log: log.clone() })
            .build()
            .unwrap();
        keeper.increment(TimeDelta::minutes(5.0)).unwrap();

        let log = log.lock();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].0, "a");
        assert_eq!(log[1].0, "b");
        assert_eq!(log[0].1, log[1].1);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let (mut keeper, events) = keeper_at(0, Role::Gamemaster);
        let extra = Arc::new(Mutex::new(0usize));
        let seen = extra.clone();
        let id = keeper.subscribe(crate::FnObserver(move |_: &TimeChangeEvent| *seen.lock() += 1));

        keeper.increment(TimeDelta::minutes(1.0)).unwrap();
        assert!(keeper.unsubscribe(id));
        assert!(!keeper.unsubscribe(id));
        keeper.increment(TimeDelta::minutes(1.0)).unwrap();

        assert_eq!(*extra.lock(), 1);
        assert_eq!(events.lock().len(), 2);
    }

    #[test]
    fn initialise_republishes_current_time() {
        let (mut keeper, events) = keeper_at(400, Role::Player);
        let event = keeper.initialise().unwrap();
        assert_eq!(event.old_time, event.new_time);
        assert_eq!(event.delta_minutes(), 0);
        assert_eq!(events.lock().len(), 1);
        assert_eq!(keeper.total_elapsed_minutes().unwrap(), 400);
    }

    #[test]
    fn bus_ids_are_distinct() {
        let mut bus = EventBus::new();
        let a = bus.subscribe(NoopObserver);
        let b = bus.subscribe(NoopObserver);
        assert_ne!(a, b);
        assert_eq!(bus.len(), 2);
    }

    #[test]
    fn event_helpers() {
        let (mut keeper, _) = keeper_at(MINUTES_PER_DAY as i64 - 10, Role::Gamemaster);
        let update = keeper.increment(TimeDelta::minutes(20.0)).unwrap();
        let event = update.event().unwrap();
        assert!(event.crossed_day());
        assert_eq!(event.delta_minutes(), 20);
    }
}

// ── Telling the time ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tell_time_tests {
    use super::*;
    use et_core::{CalendarConfig, DisplayMode, Shift};

    #[test]
    fn posts_time_with_day() {
        let chat = Arc::new(Mutex::new(RecordingChat::default()));
        let mut keeper = TimeKeeperBuilder::new(MemoryStore::with_value(TOTAL_ELAPSED_MINUTES_KEY, 360), Role::Player)
            .chat(chat.clone())
            .build()
            .unwrap();
        keeper.tell_time().unwrap();
        assert_eq!(chat.lock().posts, vec!["6:00 AM on day 1".to_string()]);
    }

    #[test]
    fn honours_24_hour_display() {
        let calendar = CalendarConfig { display: DisplayMode::TwentyFourHour, ..CalendarConfig::default() };
        let keeper = TimeKeeperBuilder::new(
            MemoryStore::with_value(TOTAL_ELAPSED_MINUTES_KEY, MINUTES_PER_DAY as i64 + 18 * 60 + 5),
            Role::Player,
        )
        .calendar(calendar)
        .build()
        .unwrap();
        assert_eq!(keeper.to_time_string(true).unwrap(), "18:05 on day 2");
        assert_eq!(keeper.to_time_string(false).unwrap(), "18:05");
    }

    #[test]
    fn chat_failure_is_swallowed() {
        let mut keeper = TimeKeeperBuilder::new(MemoryStore::new(), Role::Gamemaster)
            .chat(FailingChat)
            .build()
            .unwrap();
        assert!(keeper.tell_time().is_ok());
    }

    #[test]
    fn missing_chat_is_swallowed() {
        let mut keeper = TimeKeeperBuilder::new(MemoryStore::new(), Role::Gamemaster).build().unwrap();
        assert!(keeper.tell_time().is_ok());
    }

    #[test]
    fn calendar_time_labels() {
        let (keeper, _) = keeper_at(9 * MINUTES_PER_DAY as i64 + 20 * 60, Role::Player);
        let t = keeper.calendar_time().unwrap();
        assert_eq!(t.week, 1);
        assert_eq!(t.weekday_name, "Wednesday");
        assert_eq!(t.shift, Shift::Evening);
    }
}

// ── Shared keeper ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod shared_tests {
    use super::*;

    #[test]
    fn concurrent_increments_are_not_lost() {
        let (keeper, events) = keeper_at(0, Role::Gamemaster);
        let shared = keeper.into_shared();

        std::thread::scope(|s| {
            for _ in 0..8 {
                let keeper = shared.clone();
                s.spawn(move || {
                    for _ in 0..100 {
                        keeper.lock().increment(TimeDelta::minutes(1.0)).unwrap();
                    }
                });
            }
        });

        assert_eq!(shared.lock().total_elapsed_minutes().unwrap(), 800);
        assert_eq!(events.lock().len(), 800);
    }
}
