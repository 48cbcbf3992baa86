//! SQL front end error types.

use crate::sql::token::Span;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SqlError {
    #[error("unexpected character '{character}' at {span}")]
    UnexpectedCharacter { character: char, span: Span },

    #[error("unterminated {kind} starting at {span}")]
    Unterminated { kind: &'static str, span: Span },

    /// The token stream does not match the grammar
    #[error("syntax error at {span}: expected {expected}, found {found}")]
    Parse {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("invalid number {text} at {span}")]
    InvalidNumber { text: String, span: Span },

    /// Query parsed but breaks a structural rule, e.g. `SELECT *` without
    /// a FROM clause
    #[error("{0}")]
    SyntaxCheck(String),
}

/// Result type for SQL parsing
pub type SqlResult<T> = Result<T, SqlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SqlError::Parse {
            expected: "expression".to_string(),
            found: "end of input".to_string(),
            span: Span::new(7, 7),
        };
        assert_eq!(
            err.to_string(),
            "syntax error at 7..7: expected expression, found end of input"
        );
        assert_eq!(
            SqlError::SyntaxCheck("No FROM clause found for select all".to_string()).to_string(),
            "No FROM clause found for select all"
        );
    }
}
