//! Function resolution error types.

use thiserror::Error;

/// Errors raised while registering or resolving functions.
///
/// The resolution kinds are distinct so callers can tell a misspelled name
/// (`UnknownFunction`) from wrong argument types (`NoMatchingSignature`)
/// from a broken function table (`AmbiguousSignature`, `DuplicateSignature`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FunctionError {
    #[error("unsupported function name: {name}")]
    UnknownFunction { name: String },

    #[error("{signature} is unsupported, expected one of [{candidates}]")]
    NoMatchingSignature {
        signature: String,
        candidates: String,
    },

    #[error("{signature} is ambiguous between [{candidates}]")]
    AmbiguousSignature {
        signature: String,
        candidates: String,
    },

    #[error("duplicate function signature: {signature}")]
    DuplicateSignature { signature: String },
}

/// Result type for function repository operations.
pub type FunctionResult<T> = Result<T, FunctionError>;
