//! Error types for expression building and evaluation.

use crate::data::{ExprType, ValueError};
use crate::function::FunctionError;
use thiserror::Error;

/// Errors that can occur while building or evaluating expressions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    /// A function call could not be resolved against the repository
    #[error("cannot resolve {call}: {source}")]
    Resolution {
        call: String,
        #[source]
        source: FunctionError,
    },

    /// A value did not have the type its reference declared
    #[error("reference {name} expects {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: ExprType,
        actual: ExprType,
    },

    /// An aggregator was evaluated against a single row
    #[error("can't evaluate on aggregator: {name}")]
    AggregatorEvaluation { name: String },

    /// Invalid value access or comparison during evaluation
    #[error(transparent)]
    Value(#[from] ValueError),

    /// Generic evaluation error
    #[error("expression evaluation error: {message}")]
    Evaluation { message: String },
}

/// Result type for expression operations
pub type ExpressionResult<T> = Result<T, ExpressionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExpressionError::Resolution {
            call: "ABS('a')".to_string(),
            source: FunctionError::UnknownFunction {
                name: "ABS".to_string(),
            },
        };
        assert_eq!(
            err.to_string(),
            "cannot resolve ABS('a'): unsupported function name: ABS"
        );

        let err = ExpressionError::TypeMismatch {
            name: "age".to_string(),
            expected: ExprType::Integer,
            actual: ExprType::String,
        };
        assert_eq!(err.to_string(), "reference age expects INTEGER, got STRING");

        let err = ExpressionError::AggregatorEvaluation {
            name: "AVG".to_string(),
        };
        assert_eq!(err.to_string(), "can't evaluate on aggregator: AVG");
    }
}
