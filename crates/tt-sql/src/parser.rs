//! SQL parser wrapper

use crate::ast::Statement;
use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};
use crate::lowering::lower_statements;
use sqlparser::ast::Statement as SqlStatement;

/// SQL parser that wraps sqlparser-rs with an explicit dialect
#[derive(Debug, Clone, Copy)]
pub struct SqlParser {
    dialect: Dialect,
}

impl SqlParser {
    /// Create a parser for the given dialect
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Create a parser from a dialect identifier such as `tsql` or `postgres`
    pub fn from_dialect_name(name: &str) -> SqlResult<Self> {
        name.parse().map(Self::new)
    }

    /// Parse SQL into sqlparser statements
    pub fn parse(&self, sql: &str) -> SqlResult<Vec<SqlStatement>> {
        let sql = sql.trim();
        if sql.is_empty() {
            return Err(SqlError::syntax(self.dialect.name(), "SQL is empty"));
        }

        let stmts = self.dialect.parse(sql)?;
        if stmts.is_empty() {
            return Err(SqlError::syntax(
                self.dialect.name(),
                "SQL contains no statements",
            ));
        }
        Ok(stmts)
    }

    /// Parse SQL and lower every statement into the canonical tree
    pub fn parse_lowered(&self, sql: &str) -> SqlResult<Vec<Statement>> {
        let stmts = self.parse(sql)?;
        lower_statements(&stmts)
    }

    /// Get the dialect
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }
}

impl Default for SqlParser {
    fn default() -> Self {
        Self::new(Dialect::DEFAULT)
    }
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
