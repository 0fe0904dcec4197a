use et_core::EtError;
use et_keeper::CollaboratorError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnnounceError {
    #[error("chat error: {0}")]
    Chat(#[from] CollaboratorError),

    #[error(transparent)]
    Core(#[from] EtError),
}

pub type AnnounceResult<T> = Result<T, AnnounceError>;
