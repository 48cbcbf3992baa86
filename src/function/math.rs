//! Math functions.

use crate::data::{ExprType, ExprValue};
use crate::expression::ExpressionResult;
use crate::function::{
    unexpected_arguments, BuiltinFunctionName, FunctionDefinition, ReturnType, ScalarFunction,
};

pub(crate) fn definitions() -> Vec<FunctionDefinition> {
    let mut definitions: Vec<FunctionDefinition> = ExprType::NUMERIC
        .into_iter()
        .map(|t| {
            FunctionDefinition::scalar(
                BuiltinFunctionName::Abs.function_name(),
                vec![t],
                ReturnType::Argument(0),
                abs,
            )
        })
        .collect();

    let rounding: [(BuiltinFunctionName, ScalarFunction); 3] = [
        (BuiltinFunctionName::Ceil, ceil),
        (BuiltinFunctionName::Ceiling, ceil),
        (BuiltinFunctionName::Floor, floor),
    ];
    for (builtin, function) in rounding {
        definitions.push(FunctionDefinition::scalar(
            builtin.function_name(),
            vec![ExprType::Double],
            ReturnType::Fixed(ExprType::Long),
            function,
        ));
    }

    let unary: [(BuiltinFunctionName, ScalarFunction); 5] = [
        (BuiltinFunctionName::Exp, exp),
        (BuiltinFunctionName::Ln, ln),
        (BuiltinFunctionName::Log, ln),
        (BuiltinFunctionName::Log10, log10),
        (BuiltinFunctionName::Log2, log2),
    ];
    for (builtin, function) in unary {
        definitions.push(FunctionDefinition::scalar(
            builtin.function_name(),
            vec![ExprType::Double],
            ReturnType::Fixed(ExprType::Double),
            function,
        ));
    }

    // LOG(base, x)
    definitions.push(FunctionDefinition::scalar(
        BuiltinFunctionName::Log.function_name(),
        vec![ExprType::Double, ExprType::Double],
        ReturnType::Fixed(ExprType::Double),
        log_base,
    ));

    definitions
}

fn abs(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    match args {
        [ExprValue::Integer(v)] => Ok(ExprValue::Integer(v.wrapping_abs())),
        [ExprValue::Long(v)] => Ok(ExprValue::Long(v.wrapping_abs())),
        [ExprValue::Float(v)] => Ok(ExprValue::Float(v.abs())),
        [ExprValue::Double(v)] => Ok(ExprValue::Double(v.abs())),
        _ => Err(unexpected_arguments("ABS", args)),
    }
}

fn ceil(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    match args {
        [ExprValue::Double(v)] => Ok(ExprValue::Long(v.ceil() as i64)),
        _ => Err(unexpected_arguments("CEIL", args)),
    }
}

fn floor(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    match args {
        [ExprValue::Double(v)] => Ok(ExprValue::Long(v.floor() as i64)),
        _ => Err(unexpected_arguments("FLOOR", args)),
    }
}

fn exp(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    match args {
        [ExprValue::Double(v)] => Ok(ExprValue::Double(v.exp())),
        _ => Err(unexpected_arguments("EXP", args)),
    }
}

/// Logarithm helper: non-positive input has no logarithm and yields NULL.
fn logarithm(name: &str, args: &[ExprValue], op: fn(f64) -> f64) -> ExpressionResult<ExprValue> {
    match args {
        [ExprValue::Double(v)] if *v <= 0.0 => Ok(ExprValue::Null),
        [ExprValue::Double(v)] => Ok(ExprValue::Double(op(*v))),
        _ => Err(unexpected_arguments(name, args)),
    }
}

fn ln(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    logarithm("LN", args, f64::ln)
}

fn log10(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    logarithm("LOG10", args, f64::log10)
}

fn log2(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    logarithm("LOG2", args, f64::log2)
}

fn log_base(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    match args {
        [ExprValue::Double(base), ExprValue::Double(v)] => {
            if *base <= 0.0 || *base == 1.0 || *v <= 0.0 {
                Ok(ExprValue::Null)
            } else {
                Ok(ExprValue::Double(v.log(*base)))
            }
        }
        _ => Err(unexpected_arguments("LOG", args)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn double(result: ExpressionResult<ExprValue>) -> f64 {
        result.unwrap().double_value().unwrap()
    }

    #[test]
    fn test_abs_keeps_type() {
        assert_eq!(abs(&[ExprValue::Integer(-3)]).unwrap(), ExprValue::Integer(3));
        assert_eq!(abs(&[ExprValue::Long(-3)]).unwrap(), ExprValue::Long(3));
        assert_eq!(abs(&[ExprValue::Float(-1.5)]).unwrap(), ExprValue::Float(1.5));
        assert_eq!(abs(&[ExprValue::Double(2.0)]).unwrap(), ExprValue::Double(2.0));
    }

    #[test]
    fn test_rounding_returns_long() {
        assert_eq!(ceil(&[ExprValue::Double(1.2)]).unwrap(), ExprValue::Long(2));
        assert_eq!(ceil(&[ExprValue::Double(-1.2)]).unwrap(), ExprValue::Long(-1));
        assert_eq!(floor(&[ExprValue::Double(1.8)]).unwrap(), ExprValue::Long(1));
        assert_eq!(floor(&[ExprValue::Double(-1.2)]).unwrap(), ExprValue::Long(-2));
    }

    #[test]
    fn test_logarithms() {
        assert!((double(ln(&[ExprValue::Double(std::f64::consts::E)])) - 1.0).abs() < 1e-12);
        assert!((double(log10(&[ExprValue::Double(1000.0)])) - 3.0).abs() < 1e-12);
        assert!((double(log2(&[ExprValue::Double(8.0)])) - 3.0).abs() < 1e-12);
        assert!(
            (double(log_base(&[ExprValue::Double(3.0), ExprValue::Double(81.0)])) - 4.0).abs()
                < 1e-12
        );
        assert!((double(exp(&[ExprValue::Double(0.0)])) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_logarithm_of_non_positive_is_null() {
        assert_eq!(ln(&[ExprValue::Double(0.0)]).unwrap(), ExprValue::Null);
        assert_eq!(log10(&[ExprValue::Double(-1.0)]).unwrap(), ExprValue::Null);
        assert_eq!(
            log_base(&[ExprValue::Double(1.0), ExprValue::Double(5.0)]).unwrap(),
            ExprValue::Null
        );
    }

    #[test]
    fn test_wrong_argument_type() {
        assert!(ceil(&[ExprValue::Integer(1)]).is_err());
        assert!(abs(&[ExprValue::from("x")]).is_err());
    }
}
