//! Errors raised while parsing or executing backlog commands.

use crate::backlog::{domain::BacklogDomainError, services::BacklogServiceError};
use thiserror::Error;

/// Errors returned by the command surface.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command text is empty.
    #[error("invalid input: operation is required")]
    EmptyInput,

    /// The operation name is not recognised.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// The operation was given without a backlog kind.
    #[error("operation {0} requires a backlog kind")]
    MissingKind(String),

    /// A required parameter is absent or empty.
    #[error("operation {operation} requires parameter {parameter}")]
    MissingParameter {
        /// The operation being parsed.
        operation: String,
        /// The missing parameter key.
        parameter: &'static str,
    },

    /// A parameter value could not be interpreted.
    #[error("invalid value for {parameter}: {reason}")]
    InvalidParameter {
        /// The offending parameter key.
        parameter: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Domain validation failed while reading arguments.
    #[error(transparent)]
    Domain(#[from] BacklogDomainError),

    /// The backlog operation failed.
    #[error(transparent)]
    Service(#[from] BacklogServiceError),

    /// The operation result could not be encoded.
    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}
