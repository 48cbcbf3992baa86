use crate::ast::expression::{Literal, QualifiedName, UnresolvedExpression};
use log::debug;
use std::fmt;

/// Logical plan node before analysis
#[derive(Debug, Clone, PartialEq)]
pub enum UnresolvedPlan {
    Project {
        project_list: Vec<UnresolvedExpression>,
        child: Option<Box<UnresolvedPlan>>,
    },
    Filter {
        condition: UnresolvedExpression,
        child: Option<Box<UnresolvedPlan>>,
    },
    Relation {
        table_name: QualifiedName,
        alias: Option<String>,
    },
    /// Inline rows; a single empty row gives a projection without FROM
    /// something to evaluate against
    Values { rows: Vec<Vec<Literal>> },
}

impl UnresolvedPlan {
    pub fn project(project_list: Vec<UnresolvedExpression>) -> Self {
        UnresolvedPlan::Project {
            project_list,
            child: None,
        }
    }

    pub fn filter(condition: UnresolvedExpression) -> Self {
        UnresolvedPlan::Filter {
            condition,
            child: None,
        }
    }

    pub fn relation(table_name: QualifiedName, alias: Option<String>) -> Self {
        UnresolvedPlan::Relation { table_name, alias }
    }

    pub fn values(rows: Vec<Vec<Literal>>) -> Self {
        UnresolvedPlan::Values { rows }
    }

    /// One row with no columns
    pub fn empty_row() -> Self {
        Self::values(vec![Vec::new()])
    }

    /// Wire `child` beneath this node.
    ///
    /// `Relation` and `Values` take no input: attaching to them discards
    /// `child` and returns the leaf unchanged.
    pub fn attach(self, child: UnresolvedPlan) -> Self {
        match self {
            UnresolvedPlan::Project { project_list, .. } => UnresolvedPlan::Project {
                project_list,
                child: Some(Box::new(child)),
            },
            UnresolvedPlan::Filter { condition, .. } => UnresolvedPlan::Filter {
                condition,
                child: Some(Box::new(child)),
            },
            leaf @ (UnresolvedPlan::Relation { .. } | UnresolvedPlan::Values { .. }) => {
                debug!("Discarding child attached to leaf plan:\n{}{}", leaf, child);
                leaf
            }
        }
    }

    pub fn child(&self) -> Option<&UnresolvedPlan> {
        match self {
            UnresolvedPlan::Project { child, .. } | UnresolvedPlan::Filter { child, .. } => {
                child.as_deref()
            }
            UnresolvedPlan::Relation { .. } | UnresolvedPlan::Values { .. } => None,
        }
    }

    pub fn project_list(&self) -> Option<&[UnresolvedExpression]> {
        match self {
            UnresolvedPlan::Project { project_list, .. } => Some(project_list),
            _ => None,
        }
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:width$}", "", width = depth * 2)?;
        match self {
            UnresolvedPlan::Project { project_list, .. } => {
                let items: Vec<String> = project_list.iter().map(|e| e.to_string()).collect();
                writeln!(f, "Project [{}]", items.join(", "))?;
            }
            UnresolvedPlan::Filter { condition, .. } => writeln!(f, "Filter {}", condition)?,
            UnresolvedPlan::Relation { table_name, alias } => match alias {
                Some(alias) => writeln!(f, "Relation {} AS {}", table_name, alias)?,
                None => writeln!(f, "Relation {}", table_name)?,
            },
            UnresolvedPlan::Values { rows } => {
                let rows: Vec<String> = rows
                    .iter()
                    .map(|row| {
                        let values: Vec<String> = row.iter().map(|v| v.to_string()).collect();
                        format!("[{}]", values.join(", "))
                    })
                    .collect();
                writeln!(f, "Values [{}]", rows.join(", "))?;
            }
        }
        match self.child() {
            Some(child) => child.fmt_node(f, depth + 1),
            None => Ok(()),
        }
    }
}

impl fmt::Display for UnresolvedPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, 0)
    }
}
