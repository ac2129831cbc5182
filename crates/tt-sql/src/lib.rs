//! tt-sql - table reference resolution for tabletrace
//!
//! Parses SQL with sqlparser-rs in an explicit dialect, lowers each statement
//! into a small canonical tree, and resolves the set of physical tables the
//! statement reads, excluding names introduced by its own CTEs.

pub mod ast;
pub mod dialect;
pub mod error;
pub mod ident;
pub mod lowering;
pub mod parser;
pub mod resolver;

pub use ast::{Node, Statement, StatementKind};
pub use dialect::Dialect;
pub use error::{ErrorKind, SqlError, SqlResult};
pub use ident::{normalize_identifier, QualifiedName};
pub use parser::SqlParser;
pub use resolver::{
    collect_cte_names, collect_table_refs, resolve, resolve_sql, resolve_statements,
};
