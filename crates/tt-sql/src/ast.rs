//! Canonical statement tree consumed by the resolver.
//!
//! Only the parts of a statement that can read relations survive lowering:
//! query blocks, CTE definitions, table references, subqueries, joins and set
//! operations. Everything else (projections, literals, functions) is dropped.

use serde::Serialize;

/// Kind of the statement a tree was lowered from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    Query,
    Insert,
    Update,
    Delete,
    Merge,
    CreateTable,
    CreateView,
    Other,
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            StatementKind::Query => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
            StatementKind::Merge => "MERGE",
            StatementKind::CreateTable => "CREATE TABLE",
            StatementKind::CreateView => "CREATE VIEW",
            StatementKind::Other => "other statement",
        };
        f.write_str(label)
    }
}

/// Root of a lowered statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    /// Statement kind
    pub kind: StatementKind,
    /// Relation-bearing children, in source order
    pub children: Vec<Node>,
}

/// A relation-bearing node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    /// Query block: CTE definitions first, then everything its body reads
    Query(QueryBlock),
    /// CTE definition; only valid as a direct child of a query block
    Cte(Cte),
    /// Physical table reference
    Table(TableRef),
    /// Derived table or expression subquery
    Subquery(Subquery),
    /// Two relations joined together
    Join(Join),
    /// UNION / INTERSECT / EXCEPT
    SetOperation(SetOperation),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct QueryBlock {
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cte {
    /// Name introduced by the CTE
    pub alias: String,
    /// Defining query
    pub body: Box<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRef {
    /// Schema/database qualifier; `None` and `Some("")` are equivalent
    pub qualifier: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subquery {
    pub alias: Option<String>,
    pub body: Box<Node>,
}

/// Join operator kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinKind {
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
    Cross,
    /// SEMI / ANTI / APPLY / AS OF and friends
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Join {
    pub kind: JoinKind,
    pub left: Box<Node>,
    pub right: Box<Node>,
    /// Relations read by the join constraint (subqueries in `ON`)
    pub constraint: Vec<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SetOperator {
    Union,
    Intersect,
    Except,
    Minus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetOperation {
    pub op: SetOperator,
    pub left: Box<Node>,
    pub right: Box<Node>,
}

impl Node {
    /// Unqualified table reference
    pub fn table(name: impl Into<String>) -> Self {
        Node::Table(TableRef {
            qualifier: None,
            name: name.into(),
        })
    }

    /// Qualified table reference
    pub fn qualified_table(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        Node::Table(TableRef {
            qualifier: Some(qualifier.into()),
            name: name.into(),
        })
    }

    pub fn query(children: Vec<Node>) -> Self {
        Node::Query(QueryBlock { children })
    }

    pub fn cte(alias: impl Into<String>, body: Node) -> Self {
        Node::Cte(Cte {
            alias: alias.into(),
            body: Box::new(body),
        })
    }

    pub fn subquery(alias: Option<String>, body: Node) -> Self {
        Node::Subquery(Subquery {
            alias,
            body: Box::new(body),
        })
    }

    /// Whether this node can stand where a query body is expected
    pub fn is_query_shaped(&self) -> bool {
        match self {
            Node::Query(_) | Node::SetOperation(_) | Node::Subquery(_) => true,
            Node::Cte(_) | Node::Table(_) | Node::Join(_) => false,
        }
    }

    /// Short label used in diagnostics
    pub fn label(&self) -> &'static str {
        match self {
            Node::Query(_) => "query",
            Node::Cte(_) => "cte",
            Node::Table(_) => "table",
            Node::Subquery(_) => "subquery",
            Node::Join(_) => "join",
            Node::SetOperation(_) => "set operation",
        }
    }
}

impl Statement {
    /// A query statement with the given top-level children
    pub fn query(children: Vec<Node>) -> Self {
        Self {
            kind: StatementKind::Query,
            children,
        }
    }
}
