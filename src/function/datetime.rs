use crate::data::{ExprType, ExprValue};
use crate::expression::ExpressionResult;
use crate::function::{unexpected_arguments, BuiltinFunctionName, FunctionDefinition, ReturnType};

pub(crate) fn definitions() -> Vec<FunctionDefinition> {
    vec![FunctionDefinition::scalar(
        BuiltinFunctionName::DayOfMonth.function_name(),
        vec![ExprType::Timestamp],
        ReturnType::Fixed(ExprType::Integer),
        day_of_month,
    )]
}

fn day_of_month(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    match args {
        [value @ ExprValue::Timestamp(_)] => Ok(ExprValue::Integer(value.day_of_month()? as i32)),
        _ => Err(unexpected_arguments("DAYOFMONTH", args)),
    }
}
