use crate::status::{CallbackKind, ResponseStatus};
use thiserror::Error;

/// Error taxonomy for resolution calls.
///
/// Synchronous variants (`InvalidAddress`, `Engine`) fail the initiating
/// call before any transaction exists; the rest reject a pending handle
/// after the engine reports back. Contract violations (duplicate
/// transaction ids, malformed engine payloads, teardown with outstanding
/// work) are not represented here; they panic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("The query was cancelled")]
    Cancelled,

    #[error("The query timed out")]
    TimedOut,

    #[error("The query failed in transport")]
    TransportFailed,

    #[error("The queried name does not exist")]
    NoName,

    #[error("All queries for the name timed out")]
    AllTimeout,

    #[error("No secure answers could be obtained")]
    NoSecureAnswers,

    #[error("All answers received were bogus")]
    AllBogusAnswers,

    #[error("Engine error {code}: {message}")]
    Engine { code: u32, message: String },
}

impl ResolveError {
    /// Classify a transport-level callback tag. `Complete` carries no error
    /// by itself; its outcome depends on the response status.
    pub fn from_callback(kind: CallbackKind) -> Option<Self> {
        match kind {
            CallbackKind::Complete => None,
            CallbackKind::Cancel => Some(ResolveError::Cancelled),
            CallbackKind::Timeout => Some(ResolveError::TimedOut),
            CallbackKind::Error => Some(ResolveError::TransportFailed),
        }
    }

    /// Classify an application-level response status. `Good` is success.
    pub fn from_status(status: ResponseStatus) -> Option<Self> {
        match status {
            ResponseStatus::Good => None,
            ResponseStatus::NoName => Some(ResolveError::NoName),
            ResponseStatus::AllTimeout => Some(ResolveError::AllTimeout),
            ResponseStatus::NoSecureAnswers => Some(ResolveError::NoSecureAnswers),
            ResponseStatus::AllBogusAnswers => Some(ResolveError::AllBogusAnswers),
        }
    }
}
