//! Unresolved abstract syntax tree.
//!
//! The AST is what the SQL front end hands to later stages: a tree of
//! logical plan nodes whose expressions are still untyped names, literals
//! and function calls.

pub mod expression;
pub mod plan;

pub use expression::{Literal, QualifiedName, UnresolvedExpression};
pub use plan::UnresolvedPlan;
