//! Resolved, typed expressions.
//!
//! This module provides:
//! - The expression tree (literals, references, function calls, aggregators)
//! - Evaluation against an `Environment` such as a `BindingTuple`
//! - Per-run aggregation state
//! - `Dsl`, the builder that resolves calls through a `FunctionRepository`

pub mod aggregation;
pub mod dsl;
pub mod environment;
pub mod error;
pub mod expr;

pub use aggregation::{Accumulator, AggregationState, Aggregator};
pub use dsl::Dsl;
pub use environment::{BindingTuple, Environment};
pub use error::{ExpressionError, ExpressionResult};
pub use expr::{Expression, FunctionExpression, LiteralExpression, ReferenceExpression};
