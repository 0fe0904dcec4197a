//! Host-provided collaborators the keeper calls into.
//!
//! Each trait is the narrowest contract the core needs.  Implementations
//! live in the host integration layer (or in tests); [`MemoryStore`] is the
//! one reference implementation shipped here.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

// ── CollaboratorError ─────────────────────────────────────────────────────────

/// A failure reported by a host collaborator (store, chat, scene, …).
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{collaborator} failed: {message}")]
pub struct CollaboratorError {
    /// Short name of the failing collaborator, e.g. `"chat"`.
    pub collaborator: &'static str,
    pub message:      String,
}

impl CollaboratorError {
    pub fn new(collaborator: &'static str, message: impl Into<String>) -> Self {
        Self { collaborator, message: message.into() }
    }
}

// ── CounterStore ──────────────────────────────────────────────────────────────

/// World-scoped key/value storage for integer counters.
pub trait CounterStore {
    /// Read `key`.  `Ok(None)` means the key has never been written.
    fn get(&self, key: &str) -> Result<Option<i64>, CollaboratorError>;

    /// Write `key`.
    fn set(&mut self, key: &str, value: i64) -> Result<(), CollaboratorError>;
}

/// An in-process [`CounterStore`] backed by a `HashMap`.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with one value.
    pub fn with_value(key: &str, value: i64) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), value);
        Self { values }
    }
}

impl CounterStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<i64>, CollaboratorError> {
        Ok(self.values.get(key).copied())
    }

    fn set(&mut self, key: &str, value: i64) -> Result<(), CollaboratorError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

impl<S: CounterStore> CounterStore for Arc<Mutex<S>> {
    fn get(&self, key: &str) -> Result<Option<i64>, CollaboratorError> {
        self.lock().get(key)
    }

    fn set(&mut self, key: &str, value: i64) -> Result<(), CollaboratorError> {
        self.lock().set(key, value)
    }
}

// ── PermissionOracle ──────────────────────────────────────────────────────────

/// Answers whether the acting user may change the time.
pub trait PermissionOracle {
    fn is_privileged(&self) -> bool;
}

/// The acting user's role on the host.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Role {
    Gamemaster,
    Player,
}

impl PermissionOracle for Role {
    fn is_privileged(&self) -> bool {
        matches!(self, Role::Gamemaster)
    }
}

impl PermissionOracle for bool {
    fn is_privileged(&self) -> bool {
        *self
    }
}

impl<P: PermissionOracle + ?Sized> PermissionOracle for Arc<P> {
    fn is_privileged(&self) -> bool {
        (**self).is_privileged()
    }
}

// ── ChatSink ──────────────────────────────────────────────────────────────────

/// Appends a message to the shared chat log.
pub trait ChatSink {
    fn post(&mut self, text: &str) -> Result<(), CollaboratorError>;
}

impl<C: ChatSink> ChatSink for Arc<Mutex<C>> {
    fn post(&mut self, text: &str) -> Result<(), CollaboratorError> {
        self.lock().post(text)
    }
}
