//! Resolved expression tree.

use crate::data::{ExprType, ExprValue};
use crate::expression::aggregation::Aggregator;
use crate::expression::environment::Environment;
use crate::expression::{ExpressionError, ExpressionResult};
use crate::function::{FunctionSignature, NullHandling, ScalarFunction};
use std::fmt;

/// Literal value in an expression
#[derive(Debug, Clone)]
pub struct LiteralExpression {
    pub value: ExprValue,
}

impl LiteralExpression {
    pub fn new(value: ExprValue) -> Self {
        Self { value }
    }
}

/// Named field with a declared type, looked up in the environment
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceExpression {
    pub name: String,
    pub data_type: ExprType,
}

impl ReferenceExpression {
    pub fn new(name: impl Into<String>, data_type: ExprType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Scalar function call bound to one signature.
///
/// Only built by `FunctionRepository::compile`, which guarantees that the
/// argument types equal the signature's parameter types.
#[derive(Clone)]
pub struct FunctionExpression {
    signature: FunctionSignature,
    return_type: ExprType,
    function: ScalarFunction,
    null_handling: NullHandling,
    arguments: Vec<Expression>,
}

impl FunctionExpression {
    pub(crate) fn new(
        signature: FunctionSignature,
        return_type: ExprType,
        function: ScalarFunction,
        null_handling: NullHandling,
        arguments: Vec<Expression>,
    ) -> Self {
        Self {
            signature,
            return_type,
            function,
            null_handling,
            arguments,
        }
    }

    pub fn signature(&self) -> &FunctionSignature {
        &self.signature
    }

    pub fn arguments(&self) -> &[Expression] {
        &self.arguments
    }

    pub fn type_of(&self) -> ExprType {
        self.return_type
    }

    pub fn value_of(&self, env: &dyn Environment) -> ExpressionResult<ExprValue> {
        let values = self
            .arguments
            .iter()
            .map(|argument| argument.value_of(env))
            .collect::<ExpressionResult<Vec<_>>>()?;

        if self.null_handling == NullHandling::Propagate {
            if values.iter().any(ExprValue::is_missing) {
                return Ok(ExprValue::Missing);
            }
            if values.iter().any(ExprValue::is_null) {
                return Ok(ExprValue::Null);
            }
        }
        (self.function)(&values)
    }
}

impl fmt::Debug for FunctionExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionExpression")
            .field("signature", &self.signature)
            .field("return_type", &self.return_type)
            .field("null_handling", &self.null_handling)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

/// Expression tree node
#[derive(Debug, Clone)]
pub enum Expression {
    Literal(LiteralExpression),
    Reference(ReferenceExpression),
    Function(FunctionExpression),
    Aggregator(Aggregator),
}

impl Expression {
    /// Create a literal expression
    pub fn literal(value: impl Into<ExprValue>) -> Self {
        Expression::Literal(LiteralExpression::new(value.into()))
    }

    /// Create a typed reference expression
    pub fn reference(name: impl Into<String>, data_type: ExprType) -> Self {
        Expression::Reference(ReferenceExpression::new(name, data_type))
    }

    /// Result type of this expression
    pub fn type_of(&self) -> ExprType {
        match self {
            Expression::Literal(literal) => literal.value.data_type(),
            Expression::Reference(reference) => reference.data_type,
            Expression::Function(function) => function.type_of(),
            Expression::Aggregator(aggregator) => aggregator.type_of(),
        }
    }

    /// Evaluate against one row of the environment
    pub fn value_of(&self, env: &dyn Environment) -> ExpressionResult<ExprValue> {
        match self {
            Expression::Literal(literal) => Ok(literal.value.clone()),
            Expression::Reference(reference) => env.resolve(reference),
            Expression::Function(function) => function.value_of(env),
            Expression::Aggregator(aggregator) => Err(ExpressionError::AggregatorEvaluation {
                name: aggregator.to_string(),
            }),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(literal) => write!(f, "{}", literal.value),
            Expression::Reference(reference) => f.write_str(&reference.name),
            Expression::Function(function) => {
                write_call(f, function.signature.name.as_str(), &function.arguments)
            }
            Expression::Aggregator(aggregator) => write!(f, "{}", aggregator),
        }
    }
}

/// Render `NAME(a, b)`
pub(crate) fn write_call(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    arguments: &[Expression],
) -> fmt::Result {
    write!(f, "{}(", name)?;
    for (i, argument) in arguments.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", argument)?;
    }
    f.write_str(")")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::BindingTuple;
    use crate::function::{FunctionName, FunctionRepository};

    fn compile(name: &str, arguments: Vec<Expression>) -> Expression {
        FunctionRepository::builtin()
            .unwrap()
            .compile(&FunctionName::new(name), arguments)
            .unwrap()
    }

    #[test]
    fn test_literal() {
        let expr = Expression::literal(42);
        assert_eq!(expr.type_of(), ExprType::Integer);
        assert_eq!(
            expr.value_of(&BindingTuple::default()).unwrap(),
            ExprValue::Integer(42)
        );
        assert_eq!(Expression::literal("abc").to_string(), "'abc'");
    }

    #[test]
    fn test_reference() {
        let env = BindingTuple::from_iter([("age", ExprValue::Integer(30))]);
        let expr = Expression::reference("age", ExprType::Integer);
        assert_eq!(expr.type_of(), ExprType::Integer);
        assert_eq!(expr.value_of(&env).unwrap(), ExprValue::Integer(30));
        assert_eq!(expr.to_string(), "age");
    }

    #[test]
    fn test_function_display_and_evaluation() {
        let expr = compile(
            "multiply",
            vec![
                Expression::reference("x", ExprType::Long),
                compile("add", vec![Expression::literal(1i64), Expression::literal(2i64)]),
            ],
        );
        assert_eq!(expr.to_string(), "MULTIPLY(x, ADD(1, 2))");
        assert_eq!(expr.type_of(), ExprType::Long);

        let env = BindingTuple::from_iter([("x", ExprValue::Long(5))]);
        assert_eq!(expr.value_of(&env).unwrap(), ExprValue::Long(15));
    }

    #[test]
    fn test_null_and_missing_propagation() {
        let expr = compile(
            "add",
            vec![
                Expression::reference("x", ExprType::Integer),
                Expression::reference("y", ExprType::Integer),
            ],
        );

        let env = BindingTuple::from_iter([("x", ExprValue::Null), ("y", ExprValue::Integer(1))]);
        assert_eq!(expr.value_of(&env).unwrap(), ExprValue::Null);

        // y absent from the row
        let env = BindingTuple::from_iter([("x", ExprValue::Null)]);
        assert_eq!(expr.value_of(&env).unwrap(), ExprValue::Missing);
    }

    #[test]
    fn test_aggregator_rejects_row_evaluation() {
        let expr = compile("count", vec![Expression::reference("x", ExprType::String)]);
        let err = expr.value_of(&BindingTuple::default()).unwrap_err();
        assert_eq!(
            err,
            ExpressionError::AggregatorEvaluation {
                name: "COUNT(x)".to_string()
            }
        );
    }
}
