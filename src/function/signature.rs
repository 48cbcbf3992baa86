//! Function signatures and the implementations bound to them.

use crate::data::{ExprType, ExprValue};
use crate::expression::aggregation::Accumulator;
use crate::expression::ExpressionResult;
use crate::function::FunctionName;
use std::fmt;

/// Scalar implementation: receives the evaluated arguments in order.
pub type ScalarFunction = fn(&[ExprValue]) -> ExpressionResult<ExprValue>;

/// Creates a fresh accumulator for one aggregation run.
pub type AccumulatorFactory = fn() -> Box<dyn Accumulator>;

/// A function name plus the ordered parameter types it accepts
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionSignature {
    pub name: FunctionName,
    pub param_types: Vec<ExprType>,
}

impl FunctionSignature {
    pub fn new(name: FunctionName, param_types: Vec<ExprType>) -> Self {
        Self { name, param_types }
    }

    /// Total widening cost of calling this signature with `arg_types`.
    ///
    /// Returns `None` if the arity differs or any argument cannot be
    /// converted implicitly to its parameter type.
    pub fn match_cost(&self, arg_types: &[ExprType]) -> Option<u32> {
        if self.param_types.len() != arg_types.len() {
            return None;
        }
        arg_types
            .iter()
            .zip(&self.param_types)
            .map(|(arg, param)| arg.widening_distance(*param))
            .sum()
    }

    /// Render a call signature such as `ADD(INTEGER,LONG)`
    pub fn format_call(name: &FunctionName, types: &[ExprType]) -> String {
        let types: Vec<&str> = types.iter().map(|t| t.name()).collect();
        format!("{}({})", name, types.join(","))
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Self::format_call(&self.name, &self.param_types))
    }
}

/// How a signature's result type is determined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnType {
    Fixed(ExprType),
    /// Same type as the parameter at this position
    Argument(usize),
}

impl ReturnType {
    pub fn resolve(&self, param_types: &[ExprType]) -> ExprType {
        match self {
            ReturnType::Fixed(t) => *t,
            ReturnType::Argument(index) => param_types
                .get(*index)
                .copied()
                .unwrap_or(ExprType::Undefined),
        }
    }
}

/// Treatment of NULL/MISSING arguments for scalar functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullHandling {
    /// Any MISSING argument yields MISSING, otherwise any NULL yields NULL;
    /// the implementation only ever sees concrete values.
    Propagate,
    /// The implementation receives absent values and decides itself.
    Custom,
}

#[derive(Clone, Copy)]
pub enum FunctionImplementation {
    Scalar {
        function: ScalarFunction,
        null_handling: NullHandling,
    },
    Aggregate(AccumulatorFactory),
}

impl FunctionImplementation {
    pub fn is_aggregate(&self) -> bool {
        matches!(self, FunctionImplementation::Aggregate(_))
    }
}

impl fmt::Debug for FunctionImplementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionImplementation::Scalar { null_handling, .. } => f
                .debug_struct("Scalar")
                .field("null_handling", null_handling)
                .finish_non_exhaustive(),
            FunctionImplementation::Aggregate(_) => f.write_str("Aggregate"),
        }
    }
}

/// One row of the function table
#[derive(Debug, Clone)]
pub struct FunctionDefinition {
    pub signature: FunctionSignature,
    pub return_type: ReturnType,
    pub implementation: FunctionImplementation,
}

impl FunctionDefinition {
    /// Scalar function with NULL/MISSING propagation
    pub fn scalar(
        name: FunctionName,
        param_types: Vec<ExprType>,
        return_type: ReturnType,
        function: ScalarFunction,
    ) -> Self {
        Self::scalar_with(name, param_types, return_type, function, NullHandling::Propagate)
    }

    pub fn scalar_with(
        name: FunctionName,
        param_types: Vec<ExprType>,
        return_type: ReturnType,
        function: ScalarFunction,
        null_handling: NullHandling,
    ) -> Self {
        Self {
            signature: FunctionSignature::new(name, param_types),
            return_type,
            implementation: FunctionImplementation::Scalar {
                function,
                null_handling,
            },
        }
    }

    pub fn aggregate(
        name: FunctionName,
        param_types: Vec<ExprType>,
        return_type: ReturnType,
        factory: AccumulatorFactory,
    ) -> Self {
        Self {
            signature: FunctionSignature::new(name, param_types),
            return_type,
            implementation: FunctionImplementation::Aggregate(factory),
        }
    }

    /// Result type of this definition
    pub fn result_type(&self) -> ExprType {
        self.return_type.resolve(&self.signature.param_types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signature(types: Vec<ExprType>) -> FunctionSignature {
        FunctionSignature::new(FunctionName::new("f"), types)
    }

    #[test]
    fn test_match_cost() {
        let sig = signature(vec![ExprType::Long, ExprType::Double]);
        assert_eq!(sig.match_cost(&[ExprType::Long, ExprType::Double]), Some(0));
        assert_eq!(sig.match_cost(&[ExprType::Integer, ExprType::Double]), Some(1));
        assert_eq!(sig.match_cost(&[ExprType::Integer, ExprType::Integer]), Some(4));
        assert_eq!(sig.match_cost(&[ExprType::Double, ExprType::Double]), None);
        assert_eq!(sig.match_cost(&[ExprType::String, ExprType::Double]), None);
        assert_eq!(sig.match_cost(&[ExprType::Long]), None);
    }

    #[test]
    fn test_return_type() {
        let params = [ExprType::Float, ExprType::Long];
        assert_eq!(ReturnType::Fixed(ExprType::Boolean).resolve(&params), ExprType::Boolean);
        assert_eq!(ReturnType::Argument(1).resolve(&params), ExprType::Long);
    }

    #[test]
    fn test_display() {
        let sig = signature(vec![ExprType::Integer, ExprType::String]);
        assert_eq!(sig.to_string(), "F(INTEGER,STRING)");
        assert_eq!(signature(vec![]).to_string(), "F()");
    }
}
