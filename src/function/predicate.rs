//! Logical operators, comparisons and LIKE.
//!
//! AND, OR and XOR follow three-valued logic with MISSING taking precedence
//! over NULL, so they see absent arguments themselves. Everything else in
//! this module propagates NULL/MISSING before the implementation runs.

use crate::data::{ExprType, ExprValue};
use crate::expression::{ExpressionError, ExpressionResult};
use crate::function::{
    unexpected_arguments, BuiltinFunctionName, FunctionDefinition, NullHandling, ReturnType,
    ScalarFunction,
};
use regex::RegexBuilder;
use std::cmp::Ordering;

pub(crate) fn definitions() -> Vec<FunctionDefinition> {
    let mut definitions = Vec::new();

    let connectives: [(BuiltinFunctionName, ScalarFunction); 3] = [
        (BuiltinFunctionName::And, and),
        (BuiltinFunctionName::Or, or),
        (BuiltinFunctionName::Xor, xor),
    ];
    for (builtin, function) in connectives {
        definitions.push(FunctionDefinition::scalar_with(
            builtin.function_name(),
            vec![ExprType::Boolean, ExprType::Boolean],
            ReturnType::Fixed(ExprType::Boolean),
            function,
            NullHandling::Custom,
        ));
    }
    definitions.push(FunctionDefinition::scalar(
        BuiltinFunctionName::Not.function_name(),
        vec![ExprType::Boolean],
        ReturnType::Fixed(ExprType::Boolean),
        not,
    ));

    let comparisons: [(BuiltinFunctionName, ScalarFunction); 6] = [
        (BuiltinFunctionName::Equal, equal),
        (BuiltinFunctionName::NotEqual, not_equal),
        (BuiltinFunctionName::Less, less),
        (BuiltinFunctionName::Lte, lte),
        (BuiltinFunctionName::Greater, greater),
        (BuiltinFunctionName::Gte, gte),
    ];
    for (builtin, function) in comparisons {
        for t in ExprType::CONCRETE {
            definitions.push(FunctionDefinition::scalar(
                builtin.function_name(),
                vec![t, t],
                ReturnType::Fixed(ExprType::Boolean),
                function,
            ));
        }
    }

    definitions.push(FunctionDefinition::scalar(
        BuiltinFunctionName::Like.function_name(),
        vec![ExprType::String, ExprType::String],
        ReturnType::Fixed(ExprType::Boolean),
        like,
    ));

    definitions
}

/// Boolean operands of a connective; `None` for NULL or MISSING.
fn operands(
    name: &str,
    args: &[ExprValue],
) -> ExpressionResult<(Option<bool>, Option<bool>)> {
    let operand = |value: &ExprValue| match value {
        ExprValue::Boolean(b) => Ok(Some(*b)),
        v if v.is_absent() => Ok(None),
        _ => Err(unexpected_arguments(name, args)),
    };
    match args {
        [left, right] => Ok((operand(left)?, operand(right)?)),
        _ => Err(unexpected_arguments(name, args)),
    }
}

/// MISSING wins over NULL when neither operand decides the result.
fn absent(args: &[ExprValue]) -> ExprValue {
    if args.iter().any(ExprValue::is_missing) {
        ExprValue::Missing
    } else {
        ExprValue::Null
    }
}

fn and(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    Ok(match operands("AND", args)? {
        (Some(false), _) | (_, Some(false)) => ExprValue::Boolean(false),
        (Some(true), Some(true)) => ExprValue::Boolean(true),
        _ => absent(args),
    })
}

fn or(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    Ok(match operands("OR", args)? {
        (Some(true), _) | (_, Some(true)) => ExprValue::Boolean(true),
        (Some(false), Some(false)) => ExprValue::Boolean(false),
        _ => absent(args),
    })
}

fn xor(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    Ok(match operands("XOR", args)? {
        (Some(left), Some(right)) => ExprValue::Boolean(left != right),
        _ => absent(args),
    })
}

fn not(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    match args {
        [ExprValue::Boolean(b)] => Ok(ExprValue::Boolean(!b)),
        _ => Err(unexpected_arguments("NOT", args)),
    }
}

fn comparison(
    name: &str,
    args: &[ExprValue],
    test: fn(Ordering) -> bool,
) -> ExpressionResult<ExprValue> {
    match args {
        [left, right] => Ok(ExprValue::Boolean(test(left.compare(right)?))),
        _ => Err(unexpected_arguments(name, args)),
    }
}

fn equal(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    comparison("EQUAL", args, Ordering::is_eq)
}

fn not_equal(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    comparison("NOTEQUAL", args, Ordering::is_ne)
}

fn less(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    comparison("LESS", args, Ordering::is_lt)
}

fn lte(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    comparison("LTE", args, Ordering::is_le)
}

fn greater(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    comparison("GREATER", args, Ordering::is_gt)
}

fn gte(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    comparison("GTE", args, Ordering::is_ge)
}

fn like(args: &[ExprValue]) -> ExpressionResult<ExprValue> {
    match args {
        [ExprValue::String(text), ExprValue::String(pattern)] => {
            let regex = RegexBuilder::new(&like_to_regex(pattern))
                .case_insensitive(true)
                .dot_matches_new_line(true)
                .build()
                .map_err(|e| ExpressionError::Evaluation {
                    message: format!("invalid LIKE pattern {}: {}", pattern, e),
                })?;
            Ok(ExprValue::Boolean(regex.is_match(text)))
        }
        _ => Err(unexpected_arguments("LIKE", args)),
    }
}

/// Translate a LIKE pattern into an anchored regular expression.
///
/// `%` matches any sequence, `_` any single character, and a backslash
/// makes the following character literal.
fn like_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() + 2);
    regex.push('^');
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' => regex.push_str(".*"),
            '_' => regex.push('.'),
            '\\' => match chars.next() {
                Some(escaped) => regex.push_str(&regex::escape(&escaped.to_string())),
                None => regex.push_str(&regex::escape("\\")),
            },
            _ => regex.push_str(&regex::escape(&c.to_string())),
        }
    }
    regex.push('$');
    regex
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: ExprValue = ExprValue::Boolean(true);
    const F: ExprValue = ExprValue::Boolean(false);

    #[test]
    fn test_and_three_valued() {
        assert_eq!(and(&[T, T]).unwrap(), T);
        assert_eq!(and(&[T, F]).unwrap(), F);
        assert_eq!(and(&[ExprValue::Null, F]).unwrap(), F);
        assert_eq!(and(&[ExprValue::Missing, F]).unwrap(), F);
        assert_eq!(and(&[T, ExprValue::Null]).unwrap(), ExprValue::Null);
        assert_eq!(and(&[ExprValue::Null, ExprValue::Missing]).unwrap(), ExprValue::Missing);
    }

    #[test]
    fn test_or_three_valued() {
        assert_eq!(or(&[F, F]).unwrap(), F);
        assert_eq!(or(&[ExprValue::Null, T]).unwrap(), T);
        assert_eq!(or(&[F, ExprValue::Null]).unwrap(), ExprValue::Null);
        assert_eq!(or(&[ExprValue::Missing, F]).unwrap(), ExprValue::Missing);
    }

    #[test]
    fn test_xor() {
        assert_eq!(xor(&[T, F]).unwrap(), T);
        assert_eq!(xor(&[T, T]).unwrap(), F);
        assert_eq!(xor(&[T, ExprValue::Null]).unwrap(), ExprValue::Null);
    }

    #[test]
    fn test_connective_rejects_non_boolean() {
        assert!(and(&[T, ExprValue::Integer(1)]).is_err());
    }

    #[test]
    fn test_not() {
        assert_eq!(not(&[T]).unwrap(), F);
        assert!(not(&[ExprValue::Integer(0)]).is_err());
    }

    #[test]
    fn test_comparisons() {
        let one = ExprValue::Integer(1);
        let two = ExprValue::Integer(2);
        assert_eq!(equal(&[one.clone(), one.clone()]).unwrap(), T);
        assert_eq!(not_equal(&[one.clone(), two.clone()]).unwrap(), T);
        assert_eq!(less(&[one.clone(), two.clone()]).unwrap(), T);
        assert_eq!(lte(&[two.clone(), two.clone()]).unwrap(), T);
        assert_eq!(greater(&[one.clone(), two.clone()]).unwrap(), F);
        assert_eq!(gte(&[one.clone(), two]).unwrap(), F);

        let a = ExprValue::timestamp("2020-01-01 00:00:00").unwrap();
        let b = ExprValue::timestamp("2020-01-02 00:00:00").unwrap();
        assert_eq!(less(&[a, b]).unwrap(), T);
    }

    #[test]
    fn test_comparison_type_mismatch() {
        let err = equal(&[ExprValue::Integer(1), ExprValue::from("1")]).unwrap_err();
        assert!(matches!(err, ExpressionError::Value(_)));
    }

    #[test]
    fn test_like_to_regex() {
        assert_eq!(like_to_regex("a%"), "^a.*$");
        assert_eq!(like_to_regex("_b"), "^.b$");
        assert_eq!(like_to_regex("a.b"), "^a\\.b$");
        assert_eq!(like_to_regex("100\\%"), "^100%$");
    }

    #[test]
    fn test_like() {
        let matches = |text: &str, pattern: &str| {
            like(&[ExprValue::from(text), ExprValue::from(pattern)]).unwrap()
        };
        assert_eq!(matches("hello", "h%"), T);
        assert_eq!(matches("hello", "HEL_O"), T);
        assert_eq!(matches("hello", "h_"), F);
        assert_eq!(matches("a.c", "a.c"), T);
        assert_eq!(matches("abc", "a.c"), F);
        assert_eq!(matches("50%", "50\\%"), T);
        assert_eq!(matches("500", "50\\%"), F);
    }
}
