//! # Tour Errors
//!
//! Every fallible operation in the engine reports a [`TourError`]. Lookups that
//! find nothing are not errors; they return `None`.

use thiserror::Error;

/// Message carried by [`TourError::ParameterMissing`] when a detached tour is
/// requested without a name.
pub const MISSING_NAME_MESSAGE: &str =
    "A unique tour name is required for creating a detached tour.";

/// Errors raised by the tour registry and its collaborators.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TourError {
    /// A required argument was absent or empty.
    #[error("ParameterMissingError: {0}")]
    ParameterMissing(String),

    /// A tour's end operation rejected.
    #[error("Tour '{tour}' failed to end: {reason}")]
    EndFailed { tour: String, reason: String },

    /// An end task panicked or was cancelled by the runtime.
    #[error("Tour end task aborted: {0}")]
    EndAborted(String),

    /// Tour options could not be parsed.
    #[error("Invalid tour config: {0}")]
    InvalidConfig(String),

    /// The registry actor is no longer accepting requests.
    #[error("Tour registry closed")]
    RegistryClosed,

    /// The registry actor dropped the response channel.
    #[error("Tour registry dropped response channel")]
    RegistryDropped,
}

impl TourError {
    /// Stable discriminator for the error, independent of its message.
    pub fn kind(&self) -> &'static str {
        match self {
            TourError::ParameterMissing(_) => "ParameterMissingError",
            TourError::EndFailed { .. } => "EndFailedError",
            TourError::EndAborted(_) => "EndAbortedError",
            TourError::InvalidConfig(_) => "InvalidConfigError",
            TourError::RegistryClosed => "RegistryClosedError",
            TourError::RegistryDropped => "RegistryDroppedError",
        }
    }

    pub(crate) fn missing_name() -> Self {
        TourError::ParameterMissing(MISSING_NAME_MESSAGE.to_string())
    }
}

impl From<tokio::task::JoinError> for TourError {
    fn from(e: tokio::task::JoinError) -> Self {
        TourError::EndAborted(e.to_string())
    }
}

impl From<serde_json::Error> for TourError {
    fn from(e: serde_json::Error) -> Self {
        TourError::InvalidConfig(e.to_string())
    }
}
