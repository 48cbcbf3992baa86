//! Value layer error types.

use crate::data::ExprType;
use thiserror::Error;

/// Errors raised while constructing, converting or comparing values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    /// Literal text that does not match the format its type requires.
    #[error("{message}")]
    SemanticCheck {
        input: String,
        expected: &'static str,
        message: String,
    },

    /// Comparison between values of different kinds, or against NULL/MISSING.
    #[error("{operation} between {left} and {right} is not supported")]
    TypeMismatch {
        operation: &'static str,
        left: ExprType,
        right: ExprType,
    },

    /// A typed view was requested that the value cannot provide.
    #[error("invalid to get {requested} value from value of type {actual}")]
    InvalidView {
        requested: &'static str,
        actual: ExprType,
    },
}

impl ValueError {
    pub(crate) fn semantic_check(input: &str, expected: &'static str, kind: &str) -> Self {
        ValueError::SemanticCheck {
            input: input.to_string(),
            expected,
            message: format!(
                "{}:{} in unsupported format, please use {}",
                kind, input, expected
            ),
        }
    }
}

/// Result type for value operations.
pub type ValueResult<T> = Result<T, ValueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValueError::semantic_check("2020-1-1", "yyyy-MM-dd HH:mm:ss", "timestamp");
        assert_eq!(
            err.to_string(),
            "timestamp:2020-1-1 in unsupported format, please use yyyy-MM-dd HH:mm:ss"
        );

        let err = ValueError::TypeMismatch {
            operation: "compare",
            left: ExprType::Integer,
            right: ExprType::String,
        };
        assert_eq!(
            err.to_string(),
            "compare between INTEGER and STRING is not supported"
        );

        let err = ValueError::InvalidView {
            requested: "boolean",
            actual: ExprType::Double,
        };
        assert_eq!(
            err.to_string(),
            "invalid to get boolean value from value of type DOUBLE"
        );
    }
}
