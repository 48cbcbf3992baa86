pub mod ast;
pub mod data;
pub mod expression;
pub mod function;
pub mod sql;
