//! SQL dialect enumeration

use serde::{Deserialize, Serialize};
use sqlparser::ast::Statement;
use sqlparser::dialect::{
    AnsiDialect, BigQueryDialect, ClickHouseDialect, DatabricksDialect, Dialect as ParserDialect,
    DuckDbDialect, GenericDialect, HiveDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect,
    RedshiftSqlDialect, SQLiteDialect, SnowflakeDialect,
};
use sqlparser::parser::{Parser, ParserError};
use std::str::FromStr;

use crate::error::{SqlError, SqlResult};

/// Supported SQL dialects.
///
/// The set is closed: anything not listed here is rejected with
/// [`SqlError::UnsupportedDialect`] before any parsing happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Dialect {
    /// Microsoft SQL Server / Azure Synapse (T-SQL)
    Tsql,
    /// Permissive dialect accepting most common syntax
    Generic,
    /// ANSI SQL
    Ansi,
    /// PostgreSQL
    Postgres,
    /// MySQL / MariaDB
    MySql,
    /// SQLite
    Sqlite,
    /// Snowflake
    Snowflake,
    /// DuckDB
    DuckDb,
    /// Google BigQuery
    BigQuery,
    /// Amazon Redshift
    Redshift,
    /// Apache Hive
    Hive,
    /// ClickHouse
    ClickHouse,
    /// Databricks / Spark SQL
    Databricks,
}

impl Dialect {
    /// Every supported dialect, in display order
    pub const ALL: [Dialect; 13] = [
        Dialect::Tsql,
        Dialect::Generic,
        Dialect::Ansi,
        Dialect::Postgres,
        Dialect::MySql,
        Dialect::Sqlite,
        Dialect::Snowflake,
        Dialect::DuckDb,
        Dialect::BigQuery,
        Dialect::Redshift,
        Dialect::Hive,
        Dialect::ClickHouse,
        Dialect::Databricks,
    ];

    /// Dialect applied by the service and CLI when a caller names none
    pub const DEFAULT: Dialect = Dialect::Tsql;

    /// Canonical identifier of the dialect
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Tsql => "tsql",
            Dialect::Generic => "generic",
            Dialect::Ansi => "ansi",
            Dialect::Postgres => "postgres",
            Dialect::MySql => "mysql",
            Dialect::Sqlite => "sqlite",
            Dialect::Snowflake => "snowflake",
            Dialect::DuckDb => "duckdb",
            Dialect::BigQuery => "bigquery",
            Dialect::Redshift => "redshift",
            Dialect::Hive => "hive",
            Dialect::ClickHouse => "clickhouse",
            Dialect::Databricks => "databricks",
        }
    }

    /// Get the underlying sqlparser dialect
    pub fn parser_dialect(self) -> Box<dyn ParserDialect> {
        match self {
            Dialect::Tsql => Box::new(MsSqlDialect {}),
            Dialect::Generic => Box::new(GenericDialect {}),
            Dialect::Ansi => Box::new(AnsiDialect {}),
            Dialect::Postgres => Box::new(PostgreSqlDialect {}),
            Dialect::MySql => Box::new(MySqlDialect {}),
            Dialect::Sqlite => Box::new(SQLiteDialect {}),
            Dialect::Snowflake => Box::new(SnowflakeDialect {}),
            Dialect::DuckDb => Box::new(DuckDbDialect {}),
            Dialect::BigQuery => Box::new(BigQueryDialect {}),
            Dialect::Redshift => Box::new(RedshiftSqlDialect {}),
            Dialect::Hive => Box::new(HiveDialect {}),
            Dialect::ClickHouse => Box::new(ClickHouseDialect {}),
            Dialect::Databricks => Box::new(DatabricksDialect {}),
        }
    }

    /// Parse SQL into sqlparser statements
    pub fn parse(self, sql: &str) -> SqlResult<Vec<Statement>> {
        let parser_dialect = self.parser_dialect();
        Parser::parse_sql(parser_dialect.as_ref(), sql).map_err(|e| self.syntax_error(e))
    }

    fn syntax_error(self, err: ParserError) -> SqlError {
        let msg = err.to_string();
        // Extract line/column from error message (format: "... at Line: X, Column: Y")
        let (line, column) = parse_location_from_error(&msg);
        SqlError::SyntaxError {
            dialect: self.name(),
            message: msg,
            line,
            column,
        }
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for Dialect {
    type Err = SqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tsql" | "mssql" => Ok(Dialect::Tsql),
            "generic" => Ok(Dialect::Generic),
            "ansi" => Ok(Dialect::Ansi),
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "mysql" => Ok(Dialect::MySql),
            "sqlite" => Ok(Dialect::Sqlite),
            "snowflake" => Ok(Dialect::Snowflake),
            "duckdb" => Ok(Dialect::DuckDb),
            "bigquery" => Ok(Dialect::BigQuery),
            "redshift" => Ok(Dialect::Redshift),
            "hive" => Ok(Dialect::Hive),
            "clickhouse" => Ok(Dialect::ClickHouse),
            "databricks" => Ok(Dialect::Databricks),
            _ => Err(SqlError::UnsupportedDialect(s.to_string())),
        }
    }
}

impl TryFrom<String> for Dialect {
    type Error = SqlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse line and column from sqlparser error message.
///
/// sqlparser's `ParserError` is a simple string wrapper with no structured
/// location data, so we extract "Line: N, Column: M" from the error message text.
fn parse_location_from_error(msg: &str) -> (usize, usize) {
    let Some(line_idx) = msg.find("Line: ") else {
        return (0, 0);
    };
    let line_start = line_idx + 6;
    let Some(comma_idx) = msg[line_start..].find(',') else {
        return (0, 0);
    };
    let Ok(line) = msg[line_start..line_start + comma_idx]
        .trim()
        .parse::<usize>()
    else {
        return (0, 0);
    };
    let Some(col_idx) = msg.find("Column: ") else {
        return (0, 0);
    };
    let col_start = col_idx + 8;
    let col_end = msg[col_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map(|i| col_start + i)
        .unwrap_or(msg.len());
    let Ok(column) = msg[col_start..col_end].trim().parse::<usize>() else {
        return (0, 0);
    };
    (line, column)
}

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
