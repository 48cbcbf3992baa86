use crate::data::{ExprValue, ValueResult};
use std::fmt;

/// Literal as written in the query, not yet validated against a type
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i32),
    Long(i64),
    Double(f64),
    String(String),
    Boolean(bool),
    Null,
    /// Raw text of `TIMESTAMP '...'`
    Timestamp(String),
}

impl Literal {
    /// Convert to a runtime value; fails for malformed timestamp text.
    pub fn to_value(&self) -> ValueResult<ExprValue> {
        Ok(match self {
            Literal::Integer(v) => ExprValue::Integer(*v),
            Literal::Long(v) => ExprValue::Long(*v),
            Literal::Double(v) => ExprValue::Double(*v),
            Literal::String(v) => ExprValue::String(v.clone()),
            Literal::Boolean(v) => ExprValue::Boolean(*v),
            Literal::Null => ExprValue::Null,
            Literal::Timestamp(text) => ExprValue::timestamp(text)?,
        })
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(v) => write!(f, "{}", v),
            Literal::Long(v) => write!(f, "{}", v),
            Literal::Double(v) => write!(f, "{:?}", v),
            Literal::String(v) => write!(f, "'{}'", v),
            Literal::Boolean(v) => write!(f, "{}", if *v { "TRUE" } else { "FALSE" }),
            Literal::Null => f.write_str("NULL"),
            Literal::Timestamp(text) => write!(f, "TIMESTAMP '{}'", text),
        }
    }
}

/// Dotted name such as `a.projects.name` or an index pattern like `account*`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    parts: Vec<String>,
}

impl QualifiedName {
    pub fn new(parts: Vec<String>) -> Self {
        Self { parts }
    }

    /// Split on dots; intended for names without quoted parts
    pub fn of(name: &str) -> Self {
        Self::new(name.split('.').map(str::to_string).collect())
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts.join("."))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UnresolvedExpression {
    Literal(Literal),
    QualifiedName(QualifiedName),
    /// Scalar call by builtin name; operators are mapped to their function
    /// names (`+` is `ADD`, `=` is `EQUAL`)
    Function {
        name: String,
        args: Vec<UnresolvedExpression>,
    },
    AggregateFunction {
        name: String,
        args: Vec<UnresolvedExpression>,
    },
    /// `*`
    AllFields,
    /// Select item. `name` is the item's source text, `alias` the explicit
    /// `AS` name if one was given.
    Alias {
        name: String,
        expr: Box<UnresolvedExpression>,
        alias: Option<String>,
    },
}

impl UnresolvedExpression {
    pub fn literal(literal: Literal) -> Self {
        UnresolvedExpression::Literal(literal)
    }

    pub fn qualified_name(name: &str) -> Self {
        UnresolvedExpression::QualifiedName(QualifiedName::of(name))
    }

    pub fn function(name: impl Into<String>, args: Vec<UnresolvedExpression>) -> Self {
        UnresolvedExpression::Function {
            name: name.into(),
            args,
        }
    }

    pub fn aggregate(name: impl Into<String>, args: Vec<UnresolvedExpression>) -> Self {
        UnresolvedExpression::AggregateFunction {
            name: name.into(),
            args,
        }
    }

    pub fn alias(name: impl Into<String>, expr: UnresolvedExpression) -> Self {
        UnresolvedExpression::Alias {
            name: name.into(),
            expr: Box::new(expr),
            alias: None,
        }
    }

    pub fn alias_as(
        name: impl Into<String>,
        expr: UnresolvedExpression,
        alias: impl Into<String>,
    ) -> Self {
        UnresolvedExpression::Alias {
            name: name.into(),
            expr: Box::new(expr),
            alias: Some(alias.into()),
        }
    }

    pub fn is_all_fields(&self) -> bool {
        matches!(self, UnresolvedExpression::AllFields)
    }
}

impl fmt::Display for UnresolvedExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedExpression::Literal(literal) => write!(f, "{}", literal),
            UnresolvedExpression::QualifiedName(name) => write!(f, "{}", name),
            UnresolvedExpression::Function { name, args }
            | UnresolvedExpression::AggregateFunction { name, args } => {
                let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
                write!(f, "{}({})", name, args.join(", "))
            }
            UnresolvedExpression::AllFields => f.write_str("*"),
            UnresolvedExpression::Alias { name, expr, alias } => match alias {
                Some(alias) => write!(f, "{} AS {} [{}]", expr, alias, name),
                None => write!(f, "{} [{}]", expr, name),
            },
        }
    }
}
