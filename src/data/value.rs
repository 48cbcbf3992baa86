use crate::data::{ExprType, ValueError, ValueResult};
use chrono::{DateTime, Datelike, NaiveDateTime, SubsecRound, TimeZone, Timelike, Utc};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The only accepted timestamp text format, as shown to users.
pub const TIMESTAMP_PATTERN: &str = "yyyy-MM-dd HH:mm:ss";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Runtime value produced by literals and expression evaluation.
///
/// Values never change type after construction. Comparison is only defined
/// between two concrete values of the same `ExprType`; see [`ExprValue::compare`].
#[derive(Debug, Clone)]
pub enum ExprValue {
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Boolean(bool),
    /// Absolute instant; always interpreted in UTC
    Timestamp(DateTime<Utc>),
    Null,
    /// A field that is absent from the evaluation environment
    Missing,
}

impl ExprValue {
    /// Parse a timestamp from `yyyy-MM-dd HH:mm:ss` text, interpreted as UTC.
    pub fn timestamp(text: &str) -> ValueResult<Self> {
        if !has_timestamp_shape(text) {
            return Err(ValueError::semantic_check(text, TIMESTAMP_PATTERN, "timestamp"));
        }
        let naive = NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
            .map_err(|_| ValueError::semantic_check(text, TIMESTAMP_PATTERN, "timestamp"))?;
        // %S admits a leap second as 60
        if naive.nanosecond() >= 1_000_000_000 {
            return Err(ValueError::semantic_check(text, TIMESTAMP_PATTERN, "timestamp"));
        }
        Ok(ExprValue::Timestamp(Utc.from_utc_datetime(&naive)))
    }

    /// Get the type of this value
    pub fn data_type(&self) -> ExprType {
        match self {
            ExprValue::Integer(_) => ExprType::Integer,
            ExprValue::Long(_) => ExprType::Long,
            ExprValue::Float(_) => ExprType::Float,
            ExprValue::Double(_) => ExprType::Double,
            ExprValue::String(_) => ExprType::String,
            ExprValue::Boolean(_) => ExprType::Boolean,
            ExprValue::Timestamp(_) => ExprType::Timestamp,
            ExprValue::Null | ExprValue::Missing => ExprType::Undefined,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ExprValue::Null)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, ExprValue::Missing)
    }

    /// NULL or MISSING
    pub fn is_absent(&self) -> bool {
        self.is_null() || self.is_missing()
    }

    /// Canonical text of the value.
    ///
    /// Timestamps are truncated to whole seconds; the stored instant keeps
    /// its full precision.
    pub fn value(&self) -> String {
        match self {
            ExprValue::Integer(v) => v.to_string(),
            ExprValue::Long(v) => v.to_string(),
            ExprValue::Float(v) => format!("{:?}", v),
            ExprValue::Double(v) => format!("{:?}", v),
            ExprValue::String(v) => v.clone(),
            ExprValue::Boolean(v) => v.to_string(),
            ExprValue::Timestamp(ts) => ts.trunc_subsecs(0).format(TIMESTAMP_FORMAT).to_string(),
            ExprValue::Null => "NULL".to_string(),
            ExprValue::Missing => "MISSING".to_string(),
        }
    }

    pub fn integer_value(&self) -> ValueResult<i32> {
        match self {
            ExprValue::Integer(v) => Ok(*v),
            ExprValue::Long(v) => Ok(*v as i32),
            ExprValue::Float(v) => Ok(*v as i32),
            ExprValue::Double(v) => Ok(*v as i32),
            _ => Err(self.invalid_view("integer")),
        }
    }

    pub fn long_value(&self) -> ValueResult<i64> {
        match self {
            ExprValue::Integer(v) => Ok(i64::from(*v)),
            ExprValue::Long(v) => Ok(*v),
            ExprValue::Float(v) => Ok(*v as i64),
            ExprValue::Double(v) => Ok(*v as i64),
            _ => Err(self.invalid_view("long")),
        }
    }

    pub fn float_value(&self) -> ValueResult<f32> {
        match self {
            ExprValue::Integer(v) => Ok(*v as f32),
            ExprValue::Long(v) => Ok(*v as f32),
            ExprValue::Float(v) => Ok(*v),
            ExprValue::Double(v) => Ok(*v as f32),
            _ => Err(self.invalid_view("float")),
        }
    }

    pub fn double_value(&self) -> ValueResult<f64> {
        match self {
            ExprValue::Integer(v) => Ok(f64::from(*v)),
            ExprValue::Long(v) => Ok(*v as f64),
            ExprValue::Float(v) => Ok(f64::from(*v)),
            ExprValue::Double(v) => Ok(*v),
            _ => Err(self.invalid_view("double")),
        }
    }

    pub fn string_value(&self) -> ValueResult<&str> {
        match self {
            ExprValue::String(v) => Ok(v),
            _ => Err(self.invalid_view("string")),
        }
    }

    pub fn boolean_value(&self) -> ValueResult<bool> {
        match self {
            ExprValue::Boolean(v) => Ok(*v),
            _ => Err(self.invalid_view("boolean")),
        }
    }

    pub fn timestamp_value(&self) -> ValueResult<DateTime<Utc>> {
        match self {
            ExprValue::Timestamp(ts) => Ok(*ts),
            _ => Err(self.invalid_view("timestamp")),
        }
    }

    /// Day of month of a timestamp value (1-31)
    pub fn day_of_month(&self) -> ValueResult<u32> {
        self.timestamp_value().map(|ts| ts.day())
    }

    /// Order two values of the same type.
    ///
    /// Fails with `ValueError::TypeMismatch` when the types differ or either
    /// side is NULL/MISSING; no implicit conversion is performed. Floating
    /// point values use the IEEE total order, so NaN and signed zeros have a
    /// fixed position.
    pub fn compare(&self, other: &ExprValue) -> ValueResult<Ordering> {
        match (self, other) {
            (ExprValue::Integer(a), ExprValue::Integer(b)) => Ok(a.cmp(b)),
            (ExprValue::Long(a), ExprValue::Long(b)) => Ok(a.cmp(b)),
            (ExprValue::Float(a), ExprValue::Float(b)) => Ok(a.total_cmp(b)),
            (ExprValue::Double(a), ExprValue::Double(b)) => Ok(a.total_cmp(b)),
            (ExprValue::String(a), ExprValue::String(b)) => Ok(a.cmp(b)),
            (ExprValue::Boolean(a), ExprValue::Boolean(b)) => Ok(a.cmp(b)),
            (ExprValue::Timestamp(a), ExprValue::Timestamp(b)) => Ok(a.cmp(b)),
            _ => Err(ValueError::TypeMismatch {
                operation: "compare",
                left: self.data_type(),
                right: other.data_type(),
            }),
        }
    }

    /// Equality consistent with [`ExprValue::compare`].
    ///
    /// Values of different types are never equal. NULL equals NULL and
    /// MISSING equals MISSING.
    pub fn equal(&self, other: &ExprValue) -> bool {
        match (self, other) {
            (ExprValue::Null, ExprValue::Null) | (ExprValue::Missing, ExprValue::Missing) => true,
            _ => matches!(self.compare(other), Ok(Ordering::Equal)),
        }
    }

    fn invalid_view(&self, requested: &'static str) -> ValueError {
        ValueError::InvalidView {
            requested,
            actual: self.data_type(),
        }
    }
}

fn has_timestamp_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == TIMESTAMP_PATTERN.len()
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            10 => *b == b' ',
            13 | 16 => *b == b':',
            _ => b.is_ascii_digit(),
        })
}

impl PartialEq for ExprValue {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl Eq for ExprValue {}

impl PartialOrd for ExprValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

impl Hash for ExprValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            ExprValue::Integer(v) => v.hash(state),
            ExprValue::Long(v) => v.hash(state),
            ExprValue::Float(v) => v.to_bits().hash(state),
            ExprValue::Double(v) => v.to_bits().hash(state),
            ExprValue::String(v) => v.hash(state),
            ExprValue::Boolean(v) => v.hash(state),
            ExprValue::Timestamp(ts) => ts.hash(state),
            ExprValue::Null | ExprValue::Missing => {}
        }
    }
}

impl fmt::Display for ExprValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprValue::String(v) => write!(f, "'{}'", v),
            ExprValue::Timestamp(_) => write!(f, "TIMESTAMP '{}'", self.value()),
            _ => f.write_str(&self.value()),
        }
    }
}

impl From<i32> for ExprValue {
    fn from(v: i32) -> Self {
        ExprValue::Integer(v)
    }
}

impl From<i64> for ExprValue {
    fn from(v: i64) -> Self {
        ExprValue::Long(v)
    }
}

impl From<f32> for ExprValue {
    fn from(v: f32) -> Self {
        ExprValue::Float(v)
    }
}

impl From<f64> for ExprValue {
    fn from(v: f64) -> Self {
        ExprValue::Double(v)
    }
}

impl From<bool> for ExprValue {
    fn from(v: bool) -> Self {
        ExprValue::Boolean(v)
    }
}

impl From<&str> for ExprValue {
    fn from(v: &str) -> Self {
        ExprValue::String(v.to_string())
    }
}

impl From<String> for ExprValue {
    fn from(v: String) -> Self {
        ExprValue::String(v)
    }
}

impl From<DateTime<Utc>> for ExprValue {
    fn from(v: DateTime<Utc>) -> Self {
        ExprValue::Timestamp(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::collections::HashSet;

    fn samples() -> Vec<ExprValue> {
        vec![
            ExprValue::Integer(-3),
            ExprValue::Integer(7),
            ExprValue::Long(7),
            ExprValue::Long(i64::MAX),
            ExprValue::Float(1.5),
            ExprValue::Float(-0.0),
            ExprValue::Float(0.0),
            ExprValue::Double(2.25),
            ExprValue::Double(f64::NAN),
            ExprValue::from("abc"),
            ExprValue::from("abd"),
            ExprValue::Boolean(false),
            ExprValue::Boolean(true),
            ExprValue::timestamp("2020-01-01 00:00:00").unwrap(),
            ExprValue::timestamp("2021-06-15 12:30:45").unwrap(),
            ExprValue::Null,
            ExprValue::Missing,
        ]
    }

    #[test]
    fn test_timestamp_parse_and_value() {
        let ts = ExprValue::timestamp("2020-07-07 01:01:01").unwrap();
        assert_eq!(ts.data_type(), ExprType::Timestamp);
        assert_eq!(ts.value(), "2020-07-07 01:01:01");
        assert_eq!(ts.to_string(), "TIMESTAMP '2020-07-07 01:01:01'");
        assert_eq!(ts.day_of_month().unwrap(), 7);
    }

    #[test]
    fn test_timestamp_round_trip() {
        for text in [
            "1970-01-01 00:00:00",
            "1999-12-31 23:59:59",
            "2020-02-29 12:00:00",
            "2038-01-19 03:14:08",
        ] {
            let parsed = ExprValue::timestamp(text).unwrap();
            let reparsed = ExprValue::timestamp(&parsed.value()).unwrap();
            assert_eq!(parsed, reparsed);
            assert_eq!(parsed.value(), text);
        }
    }

    #[test]
    fn test_timestamp_truncates_sub_seconds_in_text_only() {
        let base = ExprValue::timestamp("2020-01-01 10:00:00").unwrap();
        let instant = base.timestamp_value().unwrap() + Duration::milliseconds(750);
        let precise = ExprValue::from(instant);

        assert_eq!(precise.value(), "2020-01-01 10:00:00");
        // Equality compares the full instant
        assert_ne!(precise, base);
        assert_eq!(precise.compare(&base).unwrap(), Ordering::Greater);
        // Round trip holds up to whole seconds
        assert_eq!(ExprValue::timestamp(&precise.value()).unwrap(), base);
    }

    #[test]
    fn test_malformed_timestamp() {
        for text in [
            "2020-1-1 00:00:00",
            "2020-01-01",
            "2020-01-01T00:00:00",
            "2020-01-01 00:00:00Z",
            "2020-01-01 00:00:00.123",
            "2020-13-01 00:00:00",
            "2020-02-30 00:00:00",
            "2020-01-01 24:00:00",
            "2020-01-01 00:00:60",
            "2020-06-30 23:59:60",
            "",
            "not a timestamp",
        ] {
            match ExprValue::timestamp(text) {
                Err(ValueError::SemanticCheck {
                    input,
                    expected,
                    message,
                }) => {
                    assert_eq!(input, text);
                    assert_eq!(expected, TIMESTAMP_PATTERN);
                    assert!(message.contains(text));
                    assert!(message.contains("yyyy-MM-dd HH:mm:ss"));
                }
                other => panic!("expected semantic check error for {:?}, got {:?}", text, other),
            }
        }
    }

    #[test]
    fn test_compare_consistent_with_equal() {
        let values = samples();
        for a in &values {
            for b in &values {
                if a.data_type() != b.data_type() || a.is_absent() || b.is_absent() {
                    continue;
                }
                let ordering = a.compare(b).unwrap();
                assert_eq!(a.equal(b), ordering == Ordering::Equal, "{} vs {}", a, b);
                assert_eq!(b.compare(a).unwrap(), ordering.reverse());
            }
        }
    }

    #[test]
    fn test_cross_type_compare_fails() {
        let err = ExprValue::Integer(1).compare(&ExprValue::Long(1)).unwrap_err();
        assert_eq!(
            err,
            ValueError::TypeMismatch {
                operation: "compare",
                left: ExprType::Integer,
                right: ExprType::Long,
            }
        );
        assert!(ExprValue::Null.compare(&ExprValue::Null).is_err());
        assert!(ExprValue::from("1").compare(&ExprValue::Integer(1)).is_err());

        // Never implicitly coerced for equality either
        assert_ne!(ExprValue::Integer(1), ExprValue::Long(1));
        assert_eq!(ExprValue::Integer(1).partial_cmp(&ExprValue::Double(1.0)), None);
    }

    #[test]
    fn test_absent_values() {
        assert_eq!(ExprValue::Null, ExprValue::Null);
        assert_eq!(ExprValue::Missing, ExprValue::Missing);
        assert_ne!(ExprValue::Null, ExprValue::Missing);
        assert_eq!(ExprValue::Null.data_type(), ExprType::Undefined);
        assert!(ExprValue::Missing.is_absent());
        assert_eq!(ExprValue::Null.to_string(), "NULL");
    }

    #[test]
    fn test_hash_consistent_with_equal() {
        let values = samples();
        let set: HashSet<ExprValue> = values.iter().cloned().chain(values.iter().cloned()).collect();
        assert_eq!(set.len(), values.len());
        assert!(set.contains(&ExprValue::from("abc")));
        assert!(set.contains(&ExprValue::Double(f64::NAN)));
    }

    #[test]
    fn test_views() {
        assert_eq!(ExprValue::Integer(5).long_value().unwrap(), 5);
        assert_eq!(ExprValue::Long(5).double_value().unwrap(), 5.0);
        assert_eq!(ExprValue::Double(2.9).integer_value().unwrap(), 2);
        assert_eq!(ExprValue::from("x").string_value().unwrap(), "x");
        assert!(ExprValue::from("x").integer_value().is_err());
        assert!(ExprValue::Integer(1).boolean_value().is_err());
        assert!(ExprValue::Integer(1).timestamp_value().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ExprValue::Integer(1).to_string(), "1");
        assert_eq!(ExprValue::from("hello").to_string(), "'hello'");
        assert_eq!(ExprValue::from("hello").value(), "hello");
        assert_eq!(ExprValue::Boolean(true).to_string(), "true");
        assert_eq!(ExprValue::Double(1.5).to_string(), "1.5");
        assert_eq!(ExprValue::Double(2.0).value(), "2.0");
        assert_eq!(ExprValue::Float(3.0).value(), "3.0");
    }
}
