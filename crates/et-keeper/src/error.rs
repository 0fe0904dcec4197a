use et_core::EtError;
use thiserror::Error;

use crate::CollaboratorError;

#[derive(Debug, Error)]
pub enum KeeperError {
    #[error("counter store error: {0}")]
    Store(CollaboratorError),

    #[error("keeper configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] EtError),
}

pub type KeeperResult<T> = Result<T, KeeperError>;
