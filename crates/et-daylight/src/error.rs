use et_keeper::CollaboratorError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DaylightError {
    #[error("daylight cycle configuration error: {0}")]
    Config(String),

    #[error("scene darkness error: {0}")]
    Scene(#[from] CollaboratorError),
}

pub type DaylightResult<T> = Result<T, DaylightError>;
