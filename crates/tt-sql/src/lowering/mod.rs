//! AST lowering: converts sqlparser statements into the canonical tree
//!
//! Query statements are lowered structurally (see [`query`]). Every other
//! statement kind is lowered generically by visiting it: relation names found
//! outside nested queries become table references, and each outermost nested
//! query is lowered structurally.

pub mod query;

use crate::ast::{Node, Statement, StatementKind, TableRef};
use crate::error::{SqlError, SqlResult};
use sqlparser::ast::{self as sql, ObjectName, Query, Visit, Visitor};
use std::ops::ControlFlow;

/// Lower a sqlparser statement into the canonical tree
pub fn lower_statement(stmt: &sql::Statement) -> SqlResult<Statement> {
    let kind = statement_kind(stmt);
    let children = match stmt {
        sql::Statement::Query(q) => vec![query::lower_query(q)?],
        other => nested_relations(other)?,
    };
    log::debug!(
        "Lowered {} statement into {} top-level node(s)",
        kind,
        children.len()
    );
    Ok(Statement { kind, children })
}

/// Lower every statement of a script
pub fn lower_statements(stmts: &[sql::Statement]) -> SqlResult<Vec<Statement>> {
    stmts.iter().map(lower_statement).collect()
}

fn statement_kind(stmt: &sql::Statement) -> StatementKind {
    match stmt {
        sql::Statement::Query(_) => StatementKind::Query,
        sql::Statement::Insert { .. } => StatementKind::Insert,
        sql::Statement::Update { .. } => StatementKind::Update,
        sql::Statement::Delete { .. } => StatementKind::Delete,
        sql::Statement::Merge { .. } => StatementKind::Merge,
        sql::Statement::CreateTable { .. } => StatementKind::CreateTable,
        sql::Statement::CreateView { .. } => StatementKind::CreateView,
        _ => StatementKind::Other,
    }
}

/// Convert an object name into a table reference.
///
/// The last part is the table name; any preceding parts are joined with `.`
/// into a single qualifier.
pub(crate) fn table_ref(name: &ObjectName) -> SqlResult<Node> {
    let mut parts = Vec::with_capacity(name.0.len());
    for part in &name.0 {
        let ident = part.as_ident().ok_or_else(|| {
            SqlError::malformed(format!(
                "table name '{}' contains a non-identifier part",
                name
            ))
        })?;
        parts.push(ident.value.as_str());
    }

    let Some((table, qualifier)) = parts.split_last() else {
        return Err(SqlError::malformed("table reference without a name"));
    };
    let qualifier = if qualifier.is_empty() {
        None
    } else {
        Some(qualifier.join("."))
    };

    Ok(Node::Table(TableRef {
        qualifier,
        name: (*table).to_string(),
    }))
}

/// Lower the outermost queries found inside an arbitrary AST fragment
/// (expressions, join constraints, ORDER BY, ...).
pub(crate) fn nested_queries<V: Visit>(fragment: &V) -> SqlResult<Vec<Node>> {
    collect(fragment, false)
}

/// Like [`nested_queries`], but relation names outside nested queries are
/// kept as table references too.
pub(crate) fn nested_relations<V: Visit>(fragment: &V) -> SqlResult<Vec<Node>> {
    collect(fragment, true)
}

fn collect<V: Visit>(fragment: &V, keep_relations: bool) -> SqlResult<Vec<Node>> {
    let mut collector = NestedCollector {
        keep_relations,
        depth: 0,
        nodes: Vec::new(),
    };
    match fragment.visit(&mut collector) {
        ControlFlow::Continue(()) => Ok(collector.nodes),
        ControlFlow::Break(err) => Err(err),
    }
}

/// Visitor that lowers only depth-0 queries; anything beneath them is
/// handled by the structural lowering of that query.
struct NestedCollector {
    keep_relations: bool,
    depth: usize,
    nodes: Vec<Node>,
}

impl Visitor for NestedCollector {
    type Break = SqlError;

    fn pre_visit_query(&mut self, q: &Query) -> ControlFlow<Self::Break> {
        if self.depth == 0 {
            match query::lower_query(q) {
                Ok(node) => self.nodes.push(Node::subquery(None, node)),
                Err(err) => return ControlFlow::Break(err),
            }
        }
        self.depth += 1;
        ControlFlow::Continue(())
    }

    fn post_visit_query(&mut self, _q: &Query) -> ControlFlow<Self::Break> {
        self.depth = self.depth.saturating_sub(1);
        ControlFlow::Continue(())
    }

    fn pre_visit_relation(&mut self, relation: &ObjectName) -> ControlFlow<Self::Break> {
        if self.keep_relations && self.depth == 0 {
            match table_ref(relation) {
                Ok(node) => self.nodes.push(node),
                Err(err) => return ControlFlow::Break(err),
            }
        }
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
#[path = "lowering_test.rs"]
mod tests;
