//! ADD, SUBTRACT, MULTIPLY, DIVIDE and MODULUS over the numeric types.
//!
//! Both operands always share one type; integer arithmetic wraps on
//! overflow and division or remainder by zero yields NULL.

use crate::data::{ExprType, ExprValue};
use crate::expression::ExpressionResult;
use crate::function::{
    unexpected_arguments, BuiltinFunctionName, FunctionDefinition, ReturnType, ScalarFunction,
};

pub(crate) fn definitions() -> Vec<FunctionDefinition> {
    let functions: [(BuiltinFunctionName, ScalarFunction); 5] = [
        (BuiltinFunctionName::Add, add),
        (BuiltinFunctionName::Subtract, subtract),
        (BuiltinFunctionName::Multiply, multiply),
        (BuiltinFunctionName::Divide, divide),
        (BuiltinFunctionName::Modulus, modulus),
    ];

    let mut definitions = Vec::new();
    for (builtin, function) in functions {
        for t in ExprType::NUMERIC {
            definitions.push(FunctionDefinition::scalar(
                builtin.function_name(),
                vec![t, t],
                ReturnType::Argument(0),
                function,
            ));
        }
    }
    definitions
}

/// Apply the operator matching the operands' shared numeric type.
/// `None` from an operator means the result is NULL.
fn arithmetic(
    name: &str,
    args: &[ExprValue],
    int_op: fn(i32, i32) -> Option<i32>,
    long_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f32, f32) -> Option<f32>,
    double_op: fn(f64, f64) -> Option<f64>,
) -> ExpressionResult<ExprValue> {
    let result = match args {
        [ExprValue::Integer(a), ExprValue::Integer(b)] => int_op(*a, *b).map(ExprValue::Integer),
        [ExprValue::Long(a), ExprValue::Long(b)] => long_op(*a, *b).map(ExprValue::Long),
        [ExprValue::Float(a), ExprValue::Float(b)] => float_op(*a, *b).map(ExprValue::Float),
        [ExprValue::Double(a), ExprValue::Double(b)] => double_op(*a, *b).map(ExprValue::Double),
        _ => return Err(unexpected_arguments(name, args)),
    };
    Ok(result.unwrap_or(ExprValue::Null))
}

pub(crate) fn add(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    arithmetic(
        "ADD",
        args,
        |a, b| Some(a.wrapping_add(b)),
        |a, b| Some(a.wrapping_add(b)),
        |a, b| Some(a + b),
        |a, b| Some(a + b),
    )
}

fn subtract(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    arithmetic(
        "SUBTRACT",
        args,
        |a, b| Some(a.wrapping_sub(b)),
        |a, b| Some(a.wrapping_sub(b)),
        |a, b| Some(a - b),
        |a, b| Some(a - b),
    )
}

fn multiply(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    arithmetic(
        "MULTIPLY",
        args,
        |a, b| Some(a.wrapping_mul(b)),
        |a, b| Some(a.wrapping_mul(b)),
        |a, b| Some(a * b),
        |a, b| Some(a * b),
    )
}

fn divide(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    arithmetic(
        "DIVIDE",
        args,
        |a, b| (b != 0).then(|| a.wrapping_div(b)),
        |a, b| (b != 0).then(|| a.wrapping_div(b)),
        |a, b| (b != 0.0).then(|| a / b),
        |a, b| (b != 0.0).then(|| a / b),
    )
}

fn modulus(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    arithmetic(
        "MODULUS",
        args,
        |a, b| (b != 0).then(|| a.wrapping_rem(b)),
        |a, b| (b != 0).then(|| a.wrapping_rem(b)),
        |a, b| (b != 0.0).then(|| a % b),
        |a, b| (b != 0.0).then(|| a % b),
    )
}
