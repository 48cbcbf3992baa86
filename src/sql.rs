// SQL module - lexing, parsing and building the unresolved plan

pub mod ast_builder;
pub mod error;
pub mod expression_builder;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod tree;
pub mod visitor;

pub use ast_builder::AstBuilder;
pub use error::{SqlError, SqlResult};
pub use expression_builder::AstExpressionBuilder;
pub use lexer::Lexer;
pub use parser::Parser;
pub use token::{Span, SpannedToken, Token};
pub use visitor::ParseTreeVisitor;

use crate::ast::UnresolvedPlan;

/// Parse a query into its unresolved logical plan
pub fn parse(query: &str) -> SqlResult<UnresolvedPlan> {
    let root = Parser::new(query)?.parse()?;
    AstBuilder::new(query).build(&root)
}

/// Strip one pair of enclosing backticks or double quotes
pub fn unquote_identifier(identifier: &str) -> String {
    for quote in ['`', '"'] {
        if identifier.len() >= 2 && identifier.starts_with(quote) && identifier.ends_with(quote) {
            return identifier[1..identifier.len() - 1].to_string();
        }
    }
    identifier.to_string()
}
