use thiserror::Error;
use std::io;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Run already finished")]
    AlreadyFinished,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Replay error: {0}")]
    ReplayError(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;
