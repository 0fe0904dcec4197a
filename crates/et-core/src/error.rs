//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `EtError` as one variant
//! via a `#[from]` conversion.

use thiserror::Error;

/// The base error type shared by every `et-*` crate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EtError {
    #[error("invalid time of day: {0}")]
    InvalidTimeOfDay(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `et-*` crates.
pub type EtResult<T> = Result<T, EtError>;
