//! Visitor over the clause-level parse tree.

use crate::sql::error::SqlResult;
use crate::sql::tree::*;

/// Visits clause-level parse tree nodes, one method per grammar rule.
///
/// Every `visit_*` method defaults to `visit_children`, which visits the
/// children in source order and folds their results with
/// `aggregate_result`. The default fold keeps the last non-empty result.
pub trait ParseTreeVisitor {
    type Output;

    fn default_result(&self) -> Option<Self::Output> {
        None
    }

    fn aggregate_result(
        &self,
        aggregate: Option<Self::Output>,
        next_result: Option<Self::Output>,
    ) -> Option<Self::Output> {
        next_result.or(aggregate)
    }

    /// Dispatch to the method for `node`'s rule
    fn visit(&mut self, node: ParseTreeNode<'_>) -> SqlResult<Option<Self::Output>> {
        match node {
            ParseTreeNode::Root(ctx) => self.visit_root(ctx),
            ParseTreeNode::SqlStatement(ctx) => self.visit_sql_statement(ctx),
            ParseTreeNode::SimpleSelect(ctx) => self.visit_simple_select(ctx),
            ParseTreeNode::QuerySpecification(ctx) => self.visit_query_specification(ctx),
            ParseTreeNode::SelectClause(ctx) => self.visit_select_clause(ctx),
            ParseTreeNode::FromClause(ctx) => self.visit_from_clause(ctx),
            ParseTreeNode::TableName(ctx) => self.visit_table_name(ctx),
            ParseTreeNode::WhereClause(ctx) => self.visit_where_clause(ctx),
        }
    }

    fn visit_children(&mut self, node: ParseTreeNode<'_>) -> SqlResult<Option<Self::Output>> {
        let mut result = self.default_result();
        for child in node.children() {
            let child_result = self.visit(child)?;
            result = self.aggregate_result(result, child_result);
        }
        Ok(result)
    }

    fn visit_root(&mut self, ctx: &RootContext) -> SqlResult<Option<Self::Output>> {
        self.visit_children(ParseTreeNode::Root(ctx))
    }

    fn visit_sql_statement(&mut self, ctx: &SqlStatementContext) -> SqlResult<Option<Self::Output>> {
        self.visit_children(ParseTreeNode::SqlStatement(ctx))
    }

    fn visit_simple_select(&mut self, ctx: &SimpleSelectContext) -> SqlResult<Option<Self::Output>> {
        self.visit_children(ParseTreeNode::SimpleSelect(ctx))
    }

    fn visit_query_specification(
        &mut self,
        ctx: &QuerySpecificationContext,
    ) -> SqlResult<Option<Self::Output>> {
        self.visit_children(ParseTreeNode::QuerySpecification(ctx))
    }

    fn visit_select_clause(&mut self, ctx: &SelectClauseContext) -> SqlResult<Option<Self::Output>> {
        self.visit_children(ParseTreeNode::SelectClause(ctx))
    }

    fn visit_from_clause(&mut self, ctx: &FromClauseContext) -> SqlResult<Option<Self::Output>> {
        self.visit_children(ParseTreeNode::FromClause(ctx))
    }

    fn visit_table_name(&mut self, ctx: &TableNameContext) -> SqlResult<Option<Self::Output>> {
        self.visit_children(ParseTreeNode::TableName(ctx))
    }

    fn visit_where_clause(&mut self, ctx: &WhereClauseContext) -> SqlResult<Option<Self::Output>> {
        self.visit_children(ParseTreeNode::WhereClause(ctx))
    }
}
