//! Table reference resolution
//!
//! Two independent scans over a lowered [`Statement`]: one collects every CTE
//! alias, the other every table reference. The resolved set is the table
//! references whose bare name is not a CTE alias.
//!
//! CTE aliases are scoped to the whole statement, not to the block that
//! defines them: a physical table that happens to share its name with a CTE
//! declared anywhere in the same statement is excluded as well.

use crate::ast::{Node, Statement};
use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};
use crate::ident::{normalize_identifier, QualifiedName};
use crate::parser::SqlParser;
use std::collections::{BTreeSet, HashSet};

/// What a node hangs off of, for shape validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parent {
    Statement,
    QueryBlock,
    Other,
}

/// Collect the normalized alias of every CTE defined anywhere in the statement
pub fn collect_cte_names(stmt: &Statement) -> SqlResult<HashSet<String>> {
    let mut names = HashSet::new();
    walk_statement(stmt, &mut |node: &Node| {
        if let Node::Cte(cte) = node {
            names.insert(normalize_identifier(&cte.alias).into_owned());
        }
    })?;
    Ok(names)
}

/// Collect every table reference in the statement, including those inside
/// CTE bodies and subqueries
pub fn collect_table_refs(stmt: &Statement) -> SqlResult<HashSet<QualifiedName>> {
    let mut refs = HashSet::new();
    walk_statement(stmt, &mut |node: &Node| {
        if let Node::Table(table) = node {
            refs.insert(QualifiedName::new(table.qualifier.as_deref(), &table.name));
        }
    })?;
    Ok(refs)
}

/// Resolve the physical tables a statement reads.
///
/// Returns an empty set (not an error) for statements that reference no
/// tables at all, such as `SELECT 1`.
pub fn resolve(stmt: &Statement) -> SqlResult<BTreeSet<String>> {
    let cte_names = collect_cte_names(stmt)?;
    let refs = collect_table_refs(stmt)?;

    let tables: BTreeSet<String> = refs
        .into_iter()
        .filter(|r| !cte_names.contains(r.name()))
        .map(|r| r.to_string())
        .collect();

    log::debug!(
        "Resolved {} statement: {} table(s), {} CTE alias(es) excluded",
        stmt.kind,
        tables.len(),
        cte_names.len()
    );
    Ok(tables)
}

/// Resolve a script: the union of each statement's tables.
///
/// CTE aliases only shadow tables within the statement that declares them.
pub fn resolve_statements(stmts: &[Statement]) -> SqlResult<BTreeSet<String>> {
    let mut tables = BTreeSet::new();
    for stmt in stmts {
        tables.extend(resolve(stmt)?);
    }
    Ok(tables)
}

/// Parse SQL text in the given dialect and resolve the tables it reads
pub fn resolve_sql(sql: &str, dialect: Dialect) -> SqlResult<BTreeSet<String>> {
    let stmts = SqlParser::new(dialect).parse_lowered(sql)?;
    resolve_statements(&stmts)
}

fn walk_statement<F: FnMut(&Node)>(stmt: &Statement, visit: &mut F) -> SqlResult<()> {
    for child in &stmt.children {
        walk(child, Parent::Statement, visit)?;
    }
    Ok(())
}

/// Depth-first traversal visiting every node, validating shape on the way
fn walk<F: FnMut(&Node)>(node: &Node, parent: Parent, visit: &mut F) -> SqlResult<()> {
    check_shape(node, parent)?;
    visit(node);

    match node {
        Node::Query(block) => {
            for child in &block.children {
                walk(child, Parent::QueryBlock, visit)?;
            }
        }
        Node::Cte(cte) => walk(&cte.body, Parent::Other, visit)?,
        Node::Table(_) => {}
        Node::Subquery(sub) => walk(&sub.body, Parent::Other, visit)?,
        Node::Join(join) => {
            walk(&join.left, Parent::Other, visit)?;
            walk(&join.right, Parent::Other, visit)?;
            for child in &join.constraint {
                walk(child, Parent::Other, visit)?;
            }
        }
        Node::SetOperation(set_op) => {
            walk(&set_op.left, Parent::Other, visit)?;
            walk(&set_op.right, Parent::Other, visit)?;
        }
    }

    Ok(())
}

fn check_shape(node: &Node, parent: Parent) -> SqlResult<()> {
    match node {
        Node::Table(table) => {
            if normalize_identifier(&table.name).is_empty() {
                return Err(SqlError::malformed("table reference with an empty name"));
            }
        }
        Node::Cte(cte) => {
            if parent != Parent::QueryBlock {
                return Err(SqlError::malformed(format!(
                    "CTE '{}' defined outside a query block",
                    cte.alias
                )));
            }
            if normalize_identifier(&cte.alias).is_empty() {
                return Err(SqlError::malformed("CTE with an empty alias"));
            }
            expect_query_shaped(&cte.body, "CTE body")?;
        }
        Node::Subquery(sub) => expect_query_shaped(&sub.body, "subquery body")?,
        Node::SetOperation(set_op) => {
            expect_query_shaped(&set_op.left, "set operation branch")?;
            expect_query_shaped(&set_op.right, "set operation branch")?;
        }
        Node::Query(_) | Node::Join(_) => {}
    }
    Ok(())
}

fn expect_query_shaped(node: &Node, role: &str) -> SqlResult<()> {
    if node.is_query_shaped() {
        Ok(())
    } else {
        Err(SqlError::malformed(format!(
            "{} must be a query, found {}",
            role,
            node.label()
        )))
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
