//! Console stand-ins for the host's world store, chat log and scene.

use std::collections::BTreeMap;
use std::path::PathBuf;

use et_daylight::SceneDarknessSink;
use et_keeper::{ChatSink, CollaboratorError, CounterStore};

// ── JsonFileStore ─────────────────────────────────────────────────────────────

/// A [`CounterStore`] persisted as a flat JSON object of integer counters.
/// Every write rewrites the whole file.
pub struct JsonFileStore {
    path:   PathBuf,
    values: BTreeMap<String, i64>,
}

impl JsonFileStore {
    /// Open `path`, starting empty if the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        log::debug!("opened {} with {} counter(s)", path.display(), values.len());
        Ok(Self { path, values })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

impl CounterStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<i64>, CollaboratorError> {
        Ok(self.values.get(key).copied())
    }

    fn set(&mut self, key: &str, value: i64) -> Result<(), CollaboratorError> {
        self.values.insert(key.to_string(), value);
        let text = serde_json::to_string_pretty(&self.values)
            .map_err(|e| CollaboratorError::new("store", e.to_string()))?;
        std::fs::write(&self.path, text).map_err(|e| CollaboratorError::new("store", e.to_string()))
    }
}

// ── StdoutChat ────────────────────────────────────────────────────────────────

pub struct StdoutChat;

impl ChatSink for StdoutChat {
    fn post(&mut self, text: &str) -> Result<(), CollaboratorError> {
        println!("[chat] {text}");
        Ok(())
    }
}

// ── ConsoleScene ──────────────────────────────────────────────────────────────

/// Scene lighting that prints each change instead of rendering it.
pub struct ConsoleScene {
    darkness: f64,
}

impl ConsoleScene {
    pub fn new(darkness: f64) -> Self {
        Self { darkness }
    }
}

impl SceneDarknessSink for ConsoleScene {
    fn darkness(&self) -> Result<f64, CollaboratorError> {
        Ok(self.darkness)
    }

    fn set_darkness(&mut self, value: f64, animate_ms: u64) -> Result<(), CollaboratorError> {
        println!("[scene] darkness {:.3} -> {:.3} over {animate_ms} ms", self.darkness, value);
        self.darkness = value;
        Ok(())
    }
}
