//! Implicit numeric widening casts.
//!
//! These are inserted by `FunctionRepository::compile` so that a resolved
//! call's children have exactly the parameter types of its signature.

use crate::data::{ExprType, ExprValue};
use crate::expression::ExpressionResult;
use crate::function::{
    unexpected_arguments, BuiltinFunctionName, FunctionDefinition, ReturnType, ScalarFunction,
};

pub(crate) fn definitions() -> Vec<FunctionDefinition> {
    let mut definitions = Vec::new();
    for target in [ExprType::Long, ExprType::Float, ExprType::Double] {
        let Some((builtin, function)) = cast_function(target) else {
            continue;
        };
        for source in ExprType::NUMERIC {
            if matches!(source.widening_distance(target), Some(distance) if distance > 0) {
                definitions.push(FunctionDefinition::scalar(
                    builtin.function_name(),
                    vec![source],
                    ReturnType::Fixed(target),
                    function,
                ));
            }
        }
    }
    definitions
}

/// The builtin that widens a narrower numeric value to `target`
pub(crate) fn cast_to(target: ExprType) -> Option<BuiltinFunctionName> {
    cast_function(target).map(|(builtin, _)| builtin)
}

fn cast_function(target: ExprType) -> Option<(BuiltinFunctionName, ScalarFunction)> {
    match target {
        ExprType::Long => Some((BuiltinFunctionName::CastToLong, to_long)),
        ExprType::Float => Some((BuiltinFunctionName::CastToFloat, to_float)),
        ExprType::Double => Some((BuiltinFunctionName::CastToDouble, to_double)),
        _ => None,
    }
}

fn to_long(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    match args {
        [value] if value.data_type().is_numeric() => Ok(ExprValue::Long(value.long_value()?)),
        _ => Err(unexpected_arguments("CAST_TO_LONG", args)),
    }
}

fn to_float(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    match args {
        [value] if value.data_type().is_numeric() => Ok(ExprValue::Float(value.float_value()?)),
        _ => Err(unexpected_arguments("CAST_TO_FLOAT", args)),
    }
}

fn to_double(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    match args {
        [value] if value.data_type().is_numeric() => {
            Ok(ExprValue::Double(value.double_value()?))
        }
        _ => Err(unexpected_arguments("CAST_TO_DOUBLE", args)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_widening_casts_are_defined() {
        let signatures: Vec<String> = definitions()
            .iter()
            .map(|definition| definition.signature.to_string())
            .collect();
        assert_eq!(
            signatures,
            vec![
                "CAST_TO_LONG(INTEGER)",
                "CAST_TO_FLOAT(INTEGER)",
                "CAST_TO_FLOAT(LONG)",
                "CAST_TO_DOUBLE(INTEGER)",
                "CAST_TO_DOUBLE(LONG)",
                "CAST_TO_DOUBLE(FLOAT)",
            ]
        );
    }

    #[test]
    fn test_casts() {
        assert_eq!(to_long(&[ExprValue::Integer(7)]).unwrap(), ExprValue::Long(7));
        assert_eq!(to_float(&[ExprValue::Long(2)]).unwrap(), ExprValue::Float(2.0));
        assert_eq!(to_double(&[ExprValue::Float(0.5)]).unwrap(), ExprValue::Double(0.5));
        assert!(to_double(&[ExprValue::from("1")]).is_err());
    }

    #[test]
    fn test_cast_to() {
        assert_eq!(cast_to(ExprType::Double), Some(BuiltinFunctionName::CastToDouble));
        assert_eq!(cast_to(ExprType::Integer), None);
    }
}
