use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Trip already ended, no new digs are accepted")]
    AlreadyEnded,
    #[error("A found mineral is still waiting to be identified")]
    IdentificationPending,
    #[error("No found mineral is waiting to be identified")]
    NothingPending,
    #[error("This find has already been resolved")]
    AlreadyResolved,
    #[error("No guesses remain for this find")]
    OutOfAttempts,
    #[error("Round is not accepting this action in its current phase")]
    WrongPhase,
    #[error("Unknown location: {0}")]
    UnknownLocation(String),
    #[error("Catalog has no minerals to choose from")]
    EmptyCatalog,
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Failure reported by a key-value backend. Always absorbed at the persistence boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Storage is unavailable")]
    Unavailable,
    #[error("Storage write failed: {0}")]
    WriteFailed(String),
}
