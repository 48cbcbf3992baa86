//! The builtin function table.
//!
//! The names in `BuiltinFunctionName` are the public surface callers may
//! request; they must stay stable.

use crate::function::{
    aggregate, arithmetic, cast, datetime, math, predicate, FunctionDefinition, FunctionName,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFunctionName {
    // Math
    Abs,
    Ceil,
    Ceiling,
    Exp,
    Floor,
    Ln,
    Log,
    Log10,
    Log2,

    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,

    // Date and time
    DayOfMonth,

    // Logical
    And,
    Or,
    Xor,
    Not,

    // Comparison
    Equal,
    NotEqual,
    Less,
    Lte,
    Greater,
    Gte,
    Like,

    // Aggregation
    Avg,
    Sum,
    Count,
    Min,
    Max,

    // Implicit widening
    CastToLong,
    CastToFloat,
    CastToDouble,
}

impl BuiltinFunctionName {
    pub const ALL: [BuiltinFunctionName; 34] = [
        BuiltinFunctionName::Abs,
        BuiltinFunctionName::Ceil,
        BuiltinFunctionName::Ceiling,
        BuiltinFunctionName::Exp,
        BuiltinFunctionName::Floor,
        BuiltinFunctionName::Ln,
        BuiltinFunctionName::Log,
        BuiltinFunctionName::Log10,
        BuiltinFunctionName::Log2,
        BuiltinFunctionName::Add,
        BuiltinFunctionName::Subtract,
        BuiltinFunctionName::Multiply,
        BuiltinFunctionName::Divide,
        BuiltinFunctionName::Modulus,
        BuiltinFunctionName::DayOfMonth,
        BuiltinFunctionName::And,
        BuiltinFunctionName::Or,
        BuiltinFunctionName::Xor,
        BuiltinFunctionName::Not,
        BuiltinFunctionName::Equal,
        BuiltinFunctionName::NotEqual,
        BuiltinFunctionName::Less,
        BuiltinFunctionName::Lte,
        BuiltinFunctionName::Greater,
        BuiltinFunctionName::Gte,
        BuiltinFunctionName::Like,
        BuiltinFunctionName::Avg,
        BuiltinFunctionName::Sum,
        BuiltinFunctionName::Count,
        BuiltinFunctionName::Min,
        BuiltinFunctionName::Max,
        BuiltinFunctionName::CastToLong,
        BuiltinFunctionName::CastToFloat,
        BuiltinFunctionName::CastToDouble,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinFunctionName::Abs => "ABS",
            BuiltinFunctionName::Ceil => "CEIL",
            BuiltinFunctionName::Ceiling => "CEILING",
            BuiltinFunctionName::Exp => "EXP",
            BuiltinFunctionName::Floor => "FLOOR",
            BuiltinFunctionName::Ln => "LN",
            BuiltinFunctionName::Log => "LOG",
            BuiltinFunctionName::Log10 => "LOG10",
            BuiltinFunctionName::Log2 => "LOG2",
            BuiltinFunctionName::Add => "ADD",
            BuiltinFunctionName::Subtract => "SUBTRACT",
            BuiltinFunctionName::Multiply => "MULTIPLY",
            BuiltinFunctionName::Divide => "DIVIDE",
            BuiltinFunctionName::Modulus => "MODULUS",
            BuiltinFunctionName::DayOfMonth => "DAYOFMONTH",
            BuiltinFunctionName::And => "AND",
            BuiltinFunctionName::Or => "OR",
            BuiltinFunctionName::Xor => "XOR",
            BuiltinFunctionName::Not => "NOT",
            BuiltinFunctionName::Equal => "EQUAL",
            BuiltinFunctionName::NotEqual => "NOTEQUAL",
            BuiltinFunctionName::Less => "LESS",
            BuiltinFunctionName::Lte => "LTE",
            BuiltinFunctionName::Greater => "GREATER",
            BuiltinFunctionName::Gte => "GTE",
            BuiltinFunctionName::Like => "LIKE",
            BuiltinFunctionName::Avg => "AVG",
            BuiltinFunctionName::Sum => "SUM",
            BuiltinFunctionName::Count => "COUNT",
            BuiltinFunctionName::Min => "MIN",
            BuiltinFunctionName::Max => "MAX",
            BuiltinFunctionName::CastToLong => "CAST_TO_LONG",
            BuiltinFunctionName::CastToFloat => "CAST_TO_FLOAT",
            BuiltinFunctionName::CastToDouble => "CAST_TO_DOUBLE",
        }
    }

    pub fn function_name(&self) -> FunctionName {
        FunctionName::new(self.name())
    }

    /// Look up a builtin by name, ignoring case
    pub fn of(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|builtin| builtin.name().eq_ignore_ascii_case(name))
    }

    pub fn is_aggregate(&self) -> bool {
        matches!(
            self,
            BuiltinFunctionName::Avg
                | BuiltinFunctionName::Sum
                | BuiltinFunctionName::Count
                | BuiltinFunctionName::Min
                | BuiltinFunctionName::Max
        )
    }
}

/// Every builtin definition, in registration order.
pub fn definitions() -> Vec<FunctionDefinition> {
    let mut definitions = Vec::new();
    definitions.extend(math::definitions());
    definitions.extend(arithmetic::definitions());
    definitions.extend(datetime::definitions());
    definitions.extend(predicate::definitions());
    definitions.extend(aggregate::definitions());
    definitions.extend(cast::definitions());
    definitions
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<&str> = BuiltinFunctionName::ALL.iter().map(|b| b.name()).collect();
        assert_eq!(names.len(), BuiltinFunctionName::ALL.len());
    }

    #[test]
    fn test_of() {
        assert_eq!(BuiltinFunctionName::of("abs"), Some(BuiltinFunctionName::Abs));
        assert_eq!(BuiltinFunctionName::of("DayOfMonth"), Some(BuiltinFunctionName::DayOfMonth));
        assert_eq!(BuiltinFunctionName::of("nope"), None);
    }

    #[test]
    fn test_every_name_has_a_definition() {
        let defined: HashSet<FunctionName> = definitions()
            .into_iter()
            .map(|definition| definition.signature.name)
            .collect();
        for builtin in BuiltinFunctionName::ALL {
            assert!(defined.contains(&builtin.function_name()), "{}", builtin.name());
        }
    }

    #[test]
    fn test_aggregate_flag_matches_implementation() {
        for definition in definitions() {
            let builtin = BuiltinFunctionName::of(definition.signature.name.as_str()).unwrap();
            assert_eq!(builtin.is_aggregate(), definition.implementation.is_aggregate());
        }
    }
}
