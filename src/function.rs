//! Function repository and builtin functions.
//!
//! Every function call and aggregator in a resolved expression tree comes
//! from a `FunctionRepository`: the repository maps a function name to its
//! registered signatures and picks one implementation for a call's argument
//! types. The builtin table lives in `builtin` and is split by family.

mod aggregate;
mod arithmetic;
pub mod builtin;
mod cast;
mod datetime;
pub mod error;
mod math;
pub mod name;
mod predicate;
pub mod repository;
pub mod signature;

pub use builtin::BuiltinFunctionName;
pub use error::{FunctionError, FunctionResult};
pub use name::FunctionName;
pub use repository::{FunctionRepository, ResolvedFunction};
pub use signature::{
    AccumulatorFactory, FunctionDefinition, FunctionImplementation, FunctionSignature,
    NullHandling, ReturnType, ScalarFunction,
};

use crate::data::ExprValue;
use crate::expression::ExpressionError;

/// Error for a builtin invoked with values its signatures never admit.
pub(crate) fn unexpected_arguments(function: &str, args: &[ExprValue]) -> ExpressionError {
    let rendered: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
    ExpressionError::Evaluation {
        message: format!(
            "unexpected arguments for {}: ({})",
            function,
            rendered.join(", ")
        ),
    }
}
