use std::fmt;

/// Types a value or expression can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExprType {
    Integer,
    Long,
    Float,
    Double,
    String,
    Boolean,
    Timestamp,
    /// Type of NULL and MISSING
    Undefined,
}

impl ExprType {
    /// Numeric types, narrowest first. Widening only moves right in this list.
    pub const NUMERIC: [ExprType; 4] = [
        ExprType::Integer,
        ExprType::Long,
        ExprType::Float,
        ExprType::Double,
    ];

    /// Every type a concrete (non-absent) value can have.
    pub const CONCRETE: [ExprType; 7] = [
        ExprType::Integer,
        ExprType::Long,
        ExprType::Float,
        ExprType::Double,
        ExprType::String,
        ExprType::Boolean,
        ExprType::Timestamp,
    ];

    /// Upper-case type name
    pub fn name(&self) -> &'static str {
        match self {
            ExprType::Integer => "INTEGER",
            ExprType::Long => "LONG",
            ExprType::Float => "FLOAT",
            ExprType::Double => "DOUBLE",
            ExprType::String => "STRING",
            ExprType::Boolean => "BOOLEAN",
            ExprType::Timestamp => "TIMESTAMP",
            ExprType::Undefined => "UNDEFINED",
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric_rank().is_some()
    }

    fn numeric_rank(&self) -> Option<u32> {
        match self {
            ExprType::Integer => Some(0),
            ExprType::Long => Some(1),
            ExprType::Float => Some(2),
            ExprType::Double => Some(3),
            _ => None,
        }
    }

    /// Cost of implicitly converting a value of this type to `target`.
    ///
    /// `Some(0)` for identical types, the number of steps along
    /// INTEGER -> LONG -> FLOAT -> DOUBLE for a numeric widening, and `None`
    /// when no implicit conversion exists (narrowing, or any non-numeric pair).
    pub fn widening_distance(&self, target: ExprType) -> Option<u32> {
        if *self == target {
            return Some(0);
        }
        match (self.numeric_rank(), target.numeric_rank()) {
            (Some(from), Some(to)) if from < to => Some(to - from),
            _ => None,
        }
    }
}

impl fmt::Display for ExprType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
