use thiserror::Error;

use crate::OperationAction;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Lifecycle violations on an [`Operation`](crate::Operation).
pub enum OperationError {
    /// The operation left the pending state before this request.
    #[error("operation was already started")]
    AlreadyStarted,
    /// Completion was attempted before the operation was started.
    #[error("operation has not been started")]
    NotStarted,
    /// The operation was already completed.
    #[error("operation was already completed")]
    AlreadyCompleted,
    /// Only read operations carry a result set.
    #[error("{0} operations do not carry a result set")]
    UnexpectedResultSet(OperationAction),
    /// The operation was handed to a handler for a different action.
    #[error("{actual} operation cannot be handled as {expected}")]
    ActionMismatch {
        /// Action the handler serves.
        expected: OperationAction,
        /// Action the operation carries.
        actual: OperationAction,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors raised synchronously by [`LocalKeyValueProxy`](crate::LocalKeyValueProxy).
///
/// Store failures during an operation are not raised here; they complete the operation
/// unsuccessfully and are reported through the completion callback.
pub enum ProxyError {
    /// No storage namespace could be resolved from the configuration.
    #[error("invalid proxy configuration: {0}")]
    Configuration(String),
    /// The environment offers no usable local persistence backend.
    #[error("{0}")]
    Environment(String),
    /// The operation was not in a state the request could accept.
    #[error(transparent)]
    Operation(#[from] OperationError),
}
