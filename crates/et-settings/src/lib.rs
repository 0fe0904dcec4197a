//! `et-settings` — loads the world settings document.
//!
//! The document is the JSON object the host keeps in its key/value settings
//! store.  Every key is optional; absent keys take the defaults of the
//! corresponding config type.  See [`loader`] for the schema.

pub mod error;
pub mod loader;


pub use error::{SettingsError, SettingsResult};
pub use loader::{WorldSettings, load_settings, load_settings_reader, parse_settings};
