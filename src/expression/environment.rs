use crate::data::ExprValue;
use crate::expression::{ExpressionError, ExpressionResult, ReferenceExpression};
use std::collections::HashMap;

/// Source of values for references during evaluation
pub trait Environment {
    fn resolve(&self, reference: &ReferenceExpression) -> ExpressionResult<ExprValue>;
}

/// One row of named values.
///
/// A name with no binding resolves to MISSING. A bound value must have the
/// reference's declared type unless it is NULL or MISSING.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingTuple {
    bindings: HashMap<String, ExprValue>,
}

impl BindingTuple {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, name: impl Into<String>, value: ExprValue) {
        self.bindings.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&ExprValue> {
        self.bindings.get(name)
    }
}

impl Environment for BindingTuple {
    fn resolve(&self, reference: &ReferenceExpression) -> ExpressionResult<ExprValue> {
        match self.bindings.get(&reference.name) {
            None => Ok(ExprValue::Missing),
            Some(value) if value.is_absent() || value.data_type() == reference.data_type => {
                Ok(value.clone())
            }
            Some(value) => Err(ExpressionError::TypeMismatch {
                name: reference.name.clone(),
                expected: reference.data_type,
                actual: value.data_type(),
            }),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, ExprValue)> for BindingTuple {
    fn from_iter<I: IntoIterator<Item = (K, ExprValue)>>(iter: I) -> Self {
        Self {
            bindings: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ExprType;

    #[test]
    fn test_resolve() {
        let mut row = BindingTuple::new();
        row.bind("name", ExprValue::from("john"));
        row.bind("age", ExprValue::Null);

        let name = ReferenceExpression::new("name", ExprType::String);
        assert_eq!(row.resolve(&name).unwrap(), ExprValue::from("john"));

        let age = ReferenceExpression::new("age", ExprType::Integer);
        assert_eq!(row.resolve(&age).unwrap(), ExprValue::Null);

        let city = ReferenceExpression::new("city", ExprType::String);
        assert_eq!(row.resolve(&city).unwrap(), ExprValue::Missing);
    }

    #[test]
    fn test_resolve_type_mismatch() {
        let row = BindingTuple::from_iter([("age", ExprValue::from("thirty"))]);
        let age = ReferenceExpression::new("age", ExprType::Integer);
        assert_eq!(
            row.resolve(&age).unwrap_err(),
            ExpressionError::TypeMismatch {
                name: "age".to_string(),
                expected: ExprType::Integer,
                actual: ExprType::String,
            }
        );
    }
}
