//! Concrete parse tree.
//!
//! One context type per grammar rule. Every context records the span of
//! source text it was parsed from.

use crate::sql::token::Span;

/// `sqlStatement EOF`
#[derive(Debug, Clone, PartialEq)]
pub struct RootContext {
    pub statement: SqlStatementContext,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SqlStatementContext {
    pub select: SimpleSelectContext,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimpleSelectContext {
    pub query: QuerySpecificationContext,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpecificationContext {
    pub select_clause: SelectClauseContext,
    pub from_clause: Option<FromClauseContext>,
    pub span: Span,
}

/// `SELECT [*] [, element]...`
#[derive(Debug, Clone, PartialEq)]
pub struct SelectClauseContext {
    /// Position of a leading `*`
    pub star: Option<Span>,
    pub elements: Vec<SelectElementContext>,
    pub span: Span,
}

/// `expression [[AS] alias]`
#[derive(Debug, Clone, PartialEq)]
pub struct SelectElementContext {
    pub expression: ExpressionContext,
    pub alias: Option<IdentContext>,
    pub span: Span,
}

/// `FROM tableName [[AS] alias] [whereClause]`
#[derive(Debug, Clone, PartialEq)]
pub struct FromClauseContext {
    pub table_name: TableNameContext,
    pub alias: Option<IdentContext>,
    pub where_clause: Option<WhereClauseContext>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableNameContext {
    pub name: QualifiedNameContext,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhereClauseContext {
    pub expression: ExpressionContext,
    pub span: Span,
}

/// Identifier exactly as written, quotes included
#[derive(Debug, Clone, PartialEq)]
pub struct IdentContext {
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedNameContext {
    pub parts: Vec<IdentContext>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionContext {
    pub kind: ExpressionKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    Literal(LiteralContext),
    QualifiedName(QualifiedNameContext),
    FunctionCall {
        name: IdentContext,
        args: FunctionArgs,
    },
    Binary {
        op: BinaryOperator,
        left: Box<ExpressionContext>,
        right: Box<ExpressionContext>,
    },
    Unary {
        op: UnaryOperator,
        operand: Box<ExpressionContext>,
    },
    /// Parenthesized expression
    Nested(Box<ExpressionContext>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionArgs {
    /// `COUNT(*)`
    Star(Span),
    List(Vec<ExpressionContext>),
}

/// Literal token text
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralContext {
    Integer(String),
    Decimal(String),
    String(String),
    Boolean(bool),
    Null,
    Timestamp(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Or,
    Xor,
    And,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Like,
    NotLike,
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
    Minus,
    Plus,
}

/// A clause-level node, as seen by `ParseTreeVisitor`
#[derive(Debug, Clone, Copy)]
pub enum ParseTreeNode<'a> {
    Root(&'a RootContext),
    SqlStatement(&'a SqlStatementContext),
    SimpleSelect(&'a SimpleSelectContext),
    QuerySpecification(&'a QuerySpecificationContext),
    SelectClause(&'a SelectClauseContext),
    FromClause(&'a FromClauseContext),
    TableName(&'a TableNameContext),
    WhereClause(&'a WhereClauseContext),
}

impl<'a> ParseTreeNode<'a> {
    /// Clause-level children in source order
    pub fn children(&self) -> Vec<ParseTreeNode<'a>> {
        match *self {
            ParseTreeNode::Root(ctx) => vec![ParseTreeNode::SqlStatement(&ctx.statement)],
            ParseTreeNode::SqlStatement(ctx) => vec![ParseTreeNode::SimpleSelect(&ctx.select)],
            ParseTreeNode::SimpleSelect(ctx) => vec![ParseTreeNode::QuerySpecification(&ctx.query)],
            ParseTreeNode::QuerySpecification(ctx) => {
                let mut children = vec![ParseTreeNode::SelectClause(&ctx.select_clause)];
                if let Some(from) = &ctx.from_clause {
                    children.push(ParseTreeNode::FromClause(from));
                }
                children
            }
            ParseTreeNode::FromClause(ctx) => {
                let mut children = vec![ParseTreeNode::TableName(&ctx.table_name)];
                if let Some(where_clause) = &ctx.where_clause {
                    children.push(ParseTreeNode::WhereClause(where_clause));
                }
                children
            }
            ParseTreeNode::SelectClause(_)
            | ParseTreeNode::TableName(_)
            | ParseTreeNode::WhereClause(_) => Vec::new(),
        }
    }
}
