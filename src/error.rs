use thiserror::Error;

/// Precondition violations inside the simulation core.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}

/// Failures reading or writing save slots.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("save file is malformed: {0}")]
    Format(#[from] serde_json::Error),
    #[error("no save slot named {0:?}")]
    NotFound(String),
}
