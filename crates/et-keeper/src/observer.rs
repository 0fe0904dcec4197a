//! Time-change observer trait.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::TimeChangeEvent;

/// Callback invoked by the [`EventBus`][crate::EventBus] after every change.
///
/// The method has no return value: an observer that talks to a fallible
/// collaborator must catch and log its own failures so the remaining
/// observers still run and the already-persisted time is never rolled back.
///
/// # Example: change logger
///
/// ```rust,ignore
/// struct DayLogger;
///
/// impl TimeObserver for DayLogger {
///     fn on_time_changed(&mut self, event: &TimeChangeEvent) {
///         if event.crossed_day() {
///             println!("a new day: {}", event.new_time);
///         }
///     }
/// }
/// ```
pub trait TimeObserver {
    fn on_time_changed(&mut self, _event: &TimeChangeEvent) {}
}

/// A [`TimeObserver`] that does nothing.
pub struct NoopObserver;

impl TimeObserver for NoopObserver {}

/// Adapts a closure into a [`TimeObserver`].
pub struct FnObserver<F>(pub F);

impl<F: FnMut(&TimeChangeEvent)> TimeObserver for FnObserver<F> {
    fn on_time_changed(&mut self, event: &TimeChangeEvent) {
        (self.0)(event)
    }
}

/// Lets a caller keep a handle on an observer after subscribing it, e.g. to
/// call `take_error` later.
impl<O: TimeObserver> TimeObserver for Arc<Mutex<O>> {
    fn on_time_changed(&mut self, event: &TimeChangeEvent) {
        self.lock().on_time_changed(event)
    }
}
