//! Synchronous in-process fan-out of [`TimeChangeEvent`]s.

use std::fmt;

use crate::observer::FnObserver;
use crate::{TimeChangeEvent, TimeObserver};

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ObserverId(pub u64);

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObserverId({})", self.0)
    }
}

/// Ordered list of subscribed observers.
///
/// `notify` calls each observer once, in subscription order, with the same
/// event reference.
#[derive(Default)]
pub struct EventBus {
    next_id:   u64,
    observers: Vec<(ObserverId, Box<dyn TimeObserver + Send>)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<O: TimeObserver + Send + 'static>(&mut self, observer: O) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Subscribe a closure.
    pub fn subscribe_fn<F>(&mut self, f: F) -> ObserverId
    where
        F: FnMut(&TimeChangeEvent) + Send + 'static,
    {
        self.subscribe(FnObserver(f))
    }

    /// Remove an observer.  Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    pub fn notify(&mut self, event: &TimeChangeEvent) {
        log::debug!("notifying {} observer(s): {} -> {}", self.observers.len(), event.old_time, event.new_time);
        for (_, observer) in &mut self.observers {
            observer.on_time_changed(event);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observers.iter().map(|(id, _)| *id).collect::<Vec<_>>())
            .finish()
    }
}
