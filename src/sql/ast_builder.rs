//! Builds the unresolved logical plan from a parse tree.

use crate::ast::{UnresolvedExpression, UnresolvedPlan};
use crate::sql::error::{SqlError, SqlResult};
use crate::sql::expression_builder::AstExpressionBuilder;
use crate::sql::tree::*;
use crate::sql::unquote_identifier;
use crate::sql::visitor::ParseTreeVisitor;
use log::{debug, trace};

/// Walks the clause-level parse tree of `query` and produces an
/// `UnresolvedPlan`. The query text is kept so select items can be named
/// after the source they were written as.
pub struct AstBuilder<'a> {
    query: &'a str,
    expression_builder: AstExpressionBuilder,
}

impl<'a> AstBuilder<'a> {
    pub fn new(query: &'a str) -> Self {
        Self {
            query,
            expression_builder: AstExpressionBuilder::new(),
        }
    }

    pub fn build(&mut self, root: &RootContext) -> SqlResult<UnresolvedPlan> {
        let plan = self
            .visit_root(root)?
            .ok_or_else(|| SqlError::SyntaxCheck("No plan built for query".to_string()))?;
        debug!("Built plan for {:?}:\n{}", self.query, plan);
        Ok(plan)
    }

    /// Select item named after its verbatim source text
    fn select_item(&self, element: &SelectElementContext) -> SqlResult<UnresolvedExpression> {
        let name = unquote_identifier(element.expression.span.text(self.query));
        let expr = self.expression_builder.build(&element.expression)?;
        trace!("Select item {} -> {}", name, expr);
        Ok(match &element.alias {
            Some(alias) => UnresolvedExpression::alias_as(name, expr, unquote_identifier(&alias.text)),
            None => UnresolvedExpression::alias(name, expr),
        })
    }
}

impl ParseTreeVisitor for AstBuilder<'_> {
    type Output = UnresolvedPlan;

    fn visit_simple_select(&mut self, ctx: &SimpleSelectContext) -> SqlResult<Option<UnresolvedPlan>> {
        let query = &ctx.query;
        let project = self
            .visit_select_clause(&query.select_clause)?
            .ok_or_else(|| SqlError::SyntaxCheck("No select items found".to_string()))?;

        let child = match &query.from_clause {
            Some(from) => self.visit_from_clause(from)?,
            None => {
                let selects_all = project
                    .project_list()
                    .is_some_and(|items| items.iter().any(UnresolvedExpression::is_all_fields));
                if selects_all {
                    return Err(SqlError::SyntaxCheck(
                        "No FROM clause found for select all".to_string(),
                    ));
                }
                Some(UnresolvedPlan::empty_row())
            }
        };

        Ok(Some(match child {
            Some(child) => project.attach(child),
            None => project,
        }))
    }

    fn visit_select_clause(&mut self, ctx: &SelectClauseContext) -> SqlResult<Option<UnresolvedPlan>> {
        let mut project_list = Vec::with_capacity(ctx.elements.len() + 1);
        if ctx.star.is_some() {
            project_list.push(UnresolvedExpression::AllFields);
        }
        for element in &ctx.elements {
            project_list.push(self.select_item(element)?);
        }
        Ok(Some(UnresolvedPlan::project(project_list)))
    }

    fn visit_from_clause(&mut self, ctx: &FromClauseContext) -> SqlResult<Option<UnresolvedPlan>> {
        let table_name = self.expression_builder.qualified_name(&ctx.table_name.name);
        let alias = ctx.alias.as_ref().map(|alias| unquote_identifier(&alias.text));
        let relation = UnresolvedPlan::relation(table_name, alias);

        match &ctx.where_clause {
            Some(where_clause) => Ok(self
                .visit_where_clause(where_clause)?
                .map(|filter| filter.attach(relation))),
            None => Ok(Some(relation)),
        }
    }

    fn visit_where_clause(&mut self, ctx: &WhereClauseContext) -> SqlResult<Option<UnresolvedPlan>> {
        let condition = self.expression_builder.build(&ctx.expression)?;
        Ok(Some(UnresolvedPlan::filter(condition)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Literal, QualifiedName};
    use crate::sql::parser::Parser;

    fn build(query: &str) -> SqlResult<UnresolvedPlan> {
        let root = Parser::new(query)?.parse()?;
        AstBuilder::new(query).build(&root)
    }

    fn name(text: &str) -> UnresolvedExpression {
        UnresolvedExpression::qualified_name(text)
    }

    #[test]
    fn test_select_from_where() {
        let plan = build("SELECT id FROM account* WHERE id = 1").unwrap();
        let expected = UnresolvedPlan::project(vec![UnresolvedExpression::alias("id", name("id"))])
            .attach(
                UnresolvedPlan::filter(UnresolvedExpression::function(
                    "EQUAL",
                    vec![name("id"), UnresolvedExpression::literal(Literal::Integer(1))],
                ))
                .attach(UnresolvedPlan::relation(QualifiedName::of("account*"), None)),
            );
        assert_eq!(plan, expected);
    }

    #[test]
    fn test_select_without_from() {
        let plan = build("SELECT 1 +  1").unwrap();
        assert_eq!(
            plan.to_string(),
            "Project [ADD(1, 1) [1 +  1]]\n  Values [[]]\n"
        );
    }

    #[test]
    fn test_select_all_requires_from() {
        assert_eq!(
            build("SELECT *").unwrap_err(),
            SqlError::SyntaxCheck("No FROM clause found for select all".to_string())
        );
    }

    #[test]
    fn test_star_comes_first() {
        let plan = build("SELECT *, age FROM t").unwrap();
        assert_eq!(
            plan.project_list().unwrap(),
            [
                UnresolvedExpression::AllFields,
                UnresolvedExpression::alias("age", name("age")),
            ]
        );
    }

    #[test]
    fn test_aliases_are_unquoted() {
        let plan = build("SELECT `name` AS \"n\", a.projects.name FROM account* as a").unwrap();
        assert_eq!(
            plan.project_list().unwrap(),
            [
                UnresolvedExpression::alias_as("name", name("name"), "n"),
                UnresolvedExpression::alias("a.projects.name", name("a.projects.name")),
            ]
        );
        assert_eq!(
            plan.child(),
            Some(&UnresolvedPlan::relation(
                QualifiedName::of("account*"),
                Some("a".to_string())
            ))
        );
    }
}
