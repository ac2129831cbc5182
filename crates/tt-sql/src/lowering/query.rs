//! Structural lowering of queries: WITH → body → FROM/JOIN → subqueries

use crate::ast::{Join, JoinKind, Node, SetOperation, SetOperator, TableRef};
use crate::error::SqlResult;
use crate::lowering::{nested_queries, nested_relations, table_ref};
use sqlparser::ast::{
    Cte, JoinOperator, Query, Select, SetExpr, SetOperator as SqlSetOperator, TableFactor,
    TableWithJoins,
};

/// Lower a Query into a query block.
///
/// The block's children are its CTE definitions (in declaration order)
/// followed by the relations its body reads.
pub(crate) fn lower_query(query: &Query) -> SqlResult<Node> {
    let mut children = Vec::new();

    if let Some(with) = &query.with {
        for cte in &with.cte_tables {
            children.push(lower_cte(cte)?);
        }
    }

    children.extend(lower_set_expr(&query.body)?);

    // Subqueries can hide in ORDER BY, LIMIT and FETCH too
    children.extend(nested_queries(&query.order_by)?);
    children.extend(nested_queries(&query.limit_clause)?);
    children.extend(nested_queries(&query.fetch)?);

    // Pipe operators (`|> JOIN u ...`) name relations of their own
    children.extend(nested_relations(&query.pipe_operators)?);

    Ok(Node::query(children))
}

fn lower_cte(cte: &Cte) -> SqlResult<Node> {
    let body = lower_query(&cte.query)?;
    Ok(Node::cte(cte.alias.name.value.clone(), body))
}

/// Lower a SetExpr (SELECT, UNION, VALUES, ...)
fn lower_set_expr(set_expr: &SetExpr) -> SqlResult<Vec<Node>> {
    match set_expr {
        SetExpr::Select(select) => lower_select(select),
        SetExpr::Query(q) => Ok(vec![lower_query(q)?]),
        SetExpr::SetOperation {
            op, left, right, ..
        } => {
            let left = Node::query(lower_set_expr(left)?);
            let right = Node::query(lower_set_expr(right)?);
            Ok(vec![Node::SetOperation(SetOperation {
                op: set_operator(op),
                left: Box::new(left),
                right: Box::new(right),
            })])
        }
        SetExpr::Table(table) => Ok(table
            .table_name
            .iter()
            .map(|name| {
                Node::Table(TableRef {
                    qualifier: table.schema_name.clone(),
                    name: name.clone(),
                })
            })
            .collect()),
        // VALUES, and INSERT/UPDATE/DELETE used as a query body
        other => nested_relations(other),
    }
}

fn set_operator(op: &SqlSetOperator) -> SetOperator {
    match op {
        SqlSetOperator::Union => SetOperator::Union,
        SqlSetOperator::Intersect => SetOperator::Intersect,
        SqlSetOperator::Except => SetOperator::Except,
        SqlSetOperator::Minus => SetOperator::Minus,
    }
}

/// Lower a SELECT: the INTO target and FROM items first, then subqueries in
/// every other clause
fn lower_select(select: &Select) -> SqlResult<Vec<Node>> {
    let mut nodes = Vec::with_capacity(select.from.len() + 1);

    if let Some(into) = &select.into {
        nodes.push(table_ref(&into.name)?);
    }

    for twj in &select.from {
        nodes.push(lower_table_with_joins(twj)?);
    }

    nodes.extend(nested_queries(&select.distinct)?);
    nodes.extend(nested_queries(&select.top)?);
    nodes.extend(nested_queries(&select.projection)?);
    nodes.extend(nested_queries(&select.lateral_views)?);
    nodes.extend(nested_queries(&select.prewhere)?);
    nodes.extend(nested_queries(&select.selection)?);
    nodes.extend(nested_queries(&select.connect_by)?);
    nodes.extend(nested_queries(&select.group_by)?);
    nodes.extend(nested_queries(&select.cluster_by)?);
    nodes.extend(nested_queries(&select.distribute_by)?);
    nodes.extend(nested_queries(&select.sort_by)?);
    nodes.extend(nested_queries(&select.having)?);
    nodes.extend(nested_queries(&select.named_window)?);
    nodes.extend(nested_queries(&select.qualify)?);

    Ok(nodes)
}

/// Lower a FROM item into a left-deep join tree
fn lower_table_with_joins(twj: &TableWithJoins) -> SqlResult<Node> {
    let mut plan = lower_table_factor(&twj.relation)?;

    for join in &twj.joins {
        let right = lower_table_factor(&join.relation)?;
        plan = Node::Join(Join {
            kind: join_kind(&join.join_operator),
            left: Box::new(plan),
            right: Box::new(right),
            constraint: nested_queries(&join.join_operator)?,
        });
    }

    Ok(plan)
}

/// Lower a single table factor (table name, derived table, nested join, ...)
fn lower_table_factor(factor: &TableFactor) -> SqlResult<Node> {
    match factor {
        TableFactor::Table { name, .. } => {
            let table = table_ref(name)?;
            // Table-valued function arguments may themselves be queries
            let nested = nested_queries(factor)?;
            if nested.is_empty() {
                return Ok(table);
            }
            let mut children = Vec::with_capacity(nested.len() + 1);
            children.push(table);
            children.extend(nested);
            Ok(Node::query(children))
        }
        TableFactor::Derived {
            subquery, alias, ..
        } => {
            let body = lower_query(subquery)?;
            let alias = alias.as_ref().map(|a| a.name.value.clone());
            Ok(Node::subquery(alias, body))
        }
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => lower_table_with_joins(table_with_joins),
        TableFactor::Pivot { table, .. }
        | TableFactor::Unpivot { table, .. }
        | TableFactor::MatchRecognize { table, .. } => lower_table_factor(table),
        // Table functions, UNNEST, JSON_TABLE, ...: opaque relations that
        // only read whatever their nested queries read
        other => Ok(Node::query(nested_queries(other)?)),
    }
}

fn join_kind(op: &JoinOperator) -> JoinKind {
    match op {
        JoinOperator::Join(_) | JoinOperator::Inner(_) => JoinKind::Inner,
        JoinOperator::Left(_) | JoinOperator::LeftOuter(_) => JoinKind::LeftOuter,
        JoinOperator::Right(_) | JoinOperator::RightOuter(_) => JoinKind::RightOuter,
        JoinOperator::FullOuter(_) => JoinKind::FullOuter,
        JoinOperator::CrossJoin(_) => JoinKind::Cross,
        _ => JoinKind::Other,
    }
}
