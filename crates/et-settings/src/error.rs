use et_announce::AnnounceError;
use et_core::EtError;
use et_daylight::DaylightError;
use et_keeper::KeeperError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings parse error: {0}")]
    Parse(String),

    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] EtError),

    #[error(transparent)]
    Keeper(#[from] KeeperError),

    #[error(transparent)]
    Daylight(#[from] DaylightError),

    #[error(transparent)]
    Announce(#[from] AnnounceError),
}

pub type SettingsResult<T> = Result<T, SettingsError>;
