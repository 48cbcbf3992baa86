//! Builds unresolved expressions from expression parse trees.

use crate::ast::{Literal, QualifiedName, UnresolvedExpression};
use crate::function::BuiltinFunctionName;
use crate::sql::error::{SqlError, SqlResult};
use crate::sql::tree::*;
use crate::sql::unquote_identifier;

#[derive(Debug, Default, Clone, Copy)]
pub struct AstExpressionBuilder;

impl AstExpressionBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, ctx: &ExpressionContext) -> SqlResult<UnresolvedExpression> {
        match &ctx.kind {
            ExpressionKind::Literal(literal) => self.build_literal(literal, ctx),
            ExpressionKind::QualifiedName(name) => {
                Ok(UnresolvedExpression::QualifiedName(self.qualified_name(name)))
            }
            ExpressionKind::FunctionCall { name, args } => self.build_function_call(name, args),
            ExpressionKind::Binary { op, left, right } => {
                let args = vec![self.build(left)?, self.build(right)?];
                Ok(match op {
                    BinaryOperator::NotLike => UnresolvedExpression::function(
                        BuiltinFunctionName::Not.name(),
                        vec![UnresolvedExpression::function(
                            BuiltinFunctionName::Like.name(),
                            args,
                        )],
                    ),
                    op => UnresolvedExpression::function(binary_function(*op).name(), args),
                })
            }
            ExpressionKind::Unary { op, operand } => self.build_unary(*op, operand),
            ExpressionKind::Nested(inner) => self.build(inner),
        }
    }

    /// Qualified name with each part unquoted
    pub fn qualified_name(&self, ctx: &QualifiedNameContext) -> QualifiedName {
        QualifiedName::new(
            ctx.parts
                .iter()
                .map(|part| unquote_identifier(&part.text))
                .collect(),
        )
    }

    fn build_literal(
        &self,
        literal: &LiteralContext,
        ctx: &ExpressionContext,
    ) -> SqlResult<UnresolvedExpression> {
        let literal = match literal {
            LiteralContext::Integer(text) => integer_literal(text, false)
                .ok_or_else(|| invalid_number(text, ctx))?,
            LiteralContext::Decimal(text) => Literal::Double(
                text.parse::<f64>()
                    .map_err(|_| invalid_number(text, ctx))?,
            ),
            LiteralContext::String(s) => Literal::String(s.clone()),
            LiteralContext::Boolean(b) => Literal::Boolean(*b),
            LiteralContext::Null => Literal::Null,
            LiteralContext::Timestamp(text) => Literal::Timestamp(text.clone()),
        };
        Ok(UnresolvedExpression::Literal(literal))
    }

    fn build_function_call(
        &self,
        name: &IdentContext,
        args: &FunctionArgs,
    ) -> SqlResult<UnresolvedExpression> {
        let function_name = name.text.to_uppercase();
        let args = match args {
            FunctionArgs::Star(_) => vec![UnresolvedExpression::AllFields],
            FunctionArgs::List(list) => list
                .iter()
                .map(|arg| self.build(arg))
                .collect::<SqlResult<Vec<_>>>()?,
        };

        let is_aggregate = BuiltinFunctionName::of(&function_name)
            .is_some_and(|builtin| builtin.is_aggregate());
        if is_aggregate {
            Ok(UnresolvedExpression::aggregate(function_name, args))
        } else {
            Ok(UnresolvedExpression::function(function_name, args))
        }
    }

    /// Unary minus folds into numeric literals; elsewhere it becomes
    /// `SUBTRACT(0, operand)`
    fn build_unary(
        &self,
        op: UnaryOperator,
        operand: &ExpressionContext,
    ) -> SqlResult<UnresolvedExpression> {
        match op {
            UnaryOperator::Plus => self.build(operand),
            UnaryOperator::Not => Ok(UnresolvedExpression::function(
                BuiltinFunctionName::Not.name(),
                vec![self.build(operand)?],
            )),
            UnaryOperator::Minus => match &operand.kind {
                ExpressionKind::Literal(LiteralContext::Integer(text)) => {
                    let literal = integer_literal(text, true)
                        .ok_or_else(|| invalid_number(text, operand))?;
                    Ok(UnresolvedExpression::Literal(literal))
                }
                _ => match self.build(operand)? {
                    UnresolvedExpression::Literal(Literal::Double(v)) => {
                        Ok(UnresolvedExpression::Literal(Literal::Double(-v)))
                    }
                    other => Ok(UnresolvedExpression::function(
                        BuiltinFunctionName::Subtract.name(),
                        vec![UnresolvedExpression::Literal(Literal::Integer(0)), other],
                    )),
                },
            },
        }
    }
}

fn binary_function(op: BinaryOperator) -> BuiltinFunctionName {
    match op {
        BinaryOperator::Or => BuiltinFunctionName::Or,
        BinaryOperator::Xor => BuiltinFunctionName::Xor,
        BinaryOperator::And => BuiltinFunctionName::And,
        BinaryOperator::Equal => BuiltinFunctionName::Equal,
        BinaryOperator::NotEqual => BuiltinFunctionName::NotEqual,
        BinaryOperator::Less => BuiltinFunctionName::Less,
        BinaryOperator::LessEqual => BuiltinFunctionName::Lte,
        BinaryOperator::Greater => BuiltinFunctionName::Greater,
        BinaryOperator::GreaterEqual => BuiltinFunctionName::Gte,
        BinaryOperator::Like | BinaryOperator::NotLike => BuiltinFunctionName::Like,
        BinaryOperator::Plus => BuiltinFunctionName::Add,
        BinaryOperator::Minus => BuiltinFunctionName::Subtract,
        BinaryOperator::Multiply => BuiltinFunctionName::Multiply,
        BinaryOperator::Divide => BuiltinFunctionName::Divide,
        BinaryOperator::Modulo => BuiltinFunctionName::Modulus,
    }
}

/// INTEGER if it fits, otherwise LONG
fn integer_literal(digits: &str, negative: bool) -> Option<Literal> {
    let text = if negative {
        format!("-{}", digits)
    } else {
        digits.to_string()
    };
    text.parse::<i32>()
        .map(Literal::Integer)
        .or_else(|_| text.parse::<i64>().map(Literal::Long))
        .ok()
}

fn invalid_number(text: &str, ctx: &ExpressionContext) -> SqlError {
    SqlError::InvalidNumber {
        text: text.to_string(),
        span: ctx.span,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::parser::Parser;

    fn build(expression: &str) -> UnresolvedExpression {
        let ctx = Parser::new(expression)
            .unwrap()
            .parse_expression()
            .unwrap();
        AstExpressionBuilder::new().build(&ctx).unwrap()
    }

    fn int(v: i32) -> UnresolvedExpression {
        UnresolvedExpression::literal(Literal::Integer(v))
    }

    #[test]
    fn test_literals() {
        assert_eq!(build("1"), int(1));
        assert_eq!(
            build("3000000000"),
            UnresolvedExpression::literal(Literal::Long(3_000_000_000))
        );
        assert_eq!(build("-2147483648"), int(i32::MIN));
        assert_eq!(build("-1.5"), UnresolvedExpression::literal(Literal::Double(-1.5)));
        assert_eq!(
            build("'abc'"),
            UnresolvedExpression::literal(Literal::String("abc".to_string()))
        );
        assert_eq!(build("NULL"), UnresolvedExpression::literal(Literal::Null));
        assert_eq!(
            build("TIMESTAMP '2020-01-01 00:00:00'"),
            UnresolvedExpression::literal(Literal::Timestamp("2020-01-01 00:00:00".to_string()))
        );
    }

    #[test]
    fn test_operators_map_to_functions() {
        assert_eq!(
            build("1 + 2 * 3"),
            UnresolvedExpression::function(
                "ADD",
                vec![int(1), UnresolvedExpression::function("MULTIPLY", vec![int(2), int(3)])]
            )
        );
        assert_eq!(
            build("a >= 1 AND b <> 2"),
            UnresolvedExpression::function(
                "AND",
                vec![
                    UnresolvedExpression::function(
                        "GTE",
                        vec![UnresolvedExpression::qualified_name("a"), int(1)]
                    ),
                    UnresolvedExpression::function(
                        "NOTEQUAL",
                        vec![UnresolvedExpression::qualified_name("b"), int(2)]
                    ),
                ]
            )
        );
        assert_eq!(build("(1 % 2)").to_string(), "MODULUS(1, 2)");
        assert_eq!(build("NOT a XOR b").to_string(), "XOR(NOT(a), b)");
        assert_eq!(build("name NOT LIKE 'a%'").to_string(), "NOT(LIKE(name, 'a%'))");
        assert_eq!(build("-x").to_string(), "SUBTRACT(0, x)");
    }

    #[test]
    fn test_functions() {
        assert_eq!(
            build("abs(-1)"),
            UnresolvedExpression::function("ABS", vec![int(-1)])
        );
        assert_eq!(
            build("count(*)"),
            UnresolvedExpression::aggregate("COUNT", vec![UnresolvedExpression::AllFields])
        );
        assert_eq!(
            build("avg(balance)"),
            UnresolvedExpression::aggregate("AVG", vec![UnresolvedExpression::qualified_name("balance")])
        );
    }

    #[test]
    fn test_quoted_qualified_name() {
        assert_eq!(
            build("`a`.\"projects\".name"),
            UnresolvedExpression::qualified_name("a.projects.name")
        );
    }

    #[test]
    fn test_invalid_number() {
        let ctx = Parser::new("99999999999999999999")
            .unwrap()
            .parse_expression()
            .unwrap();
        assert!(matches!(
            AstExpressionBuilder::new().build(&ctx),
            Err(SqlError::InvalidNumber { .. })
        ));
    }
}
