//! Typed runtime values.
//!
//! This module provides:
//! - `ExprType`: the closed set of value types and their widening order
//! - `ExprValue`: immutable tagged values with comparison, equality and
//!   canonical text
//! - `ValueError`: failures raised while constructing or inspecting values

pub mod error;
pub mod types;
pub mod value;

pub use error::{ValueError, ValueResult};
pub use types::ExprType;
pub use value::{ExprValue, TIMESTAMP_PATTERN};
