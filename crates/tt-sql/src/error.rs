//! Error types for tt-sql

use serde::Serialize;
use thiserror::Error;

/// SQL parsing and table-resolution errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SqlError {
    /// SQL text is not valid for the requested dialect (S001)
    #[error("[S001] SQL syntax error ({dialect}) at line {line}, column {column}: {message}")]
    SyntaxError {
        dialect: &'static str,
        message: String,
        line: usize,
        column: usize,
    },

    /// Dialect identifier is not in the supported set (S002)
    #[error("[S002] Unsupported SQL dialect: {0}")]
    UnsupportedDialect(String),

    /// Syntax tree does not have the shape the resolver expects (S003)
    #[error("[S003] Malformed syntax tree: {0}")]
    MalformedTree(String),
}

/// Machine-readable error category, as reported over the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    SyntaxError,
    UnsupportedDialect,
    MalformedTree,
}

impl SqlError {
    /// Shorthand for a syntax error without location information
    pub(crate) fn syntax(dialect: &'static str, message: impl Into<String>) -> Self {
        SqlError::SyntaxError {
            dialect,
            message: message.into(),
            line: 0,
            column: 0,
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        SqlError::MalformedTree(message.into())
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SqlError::SyntaxError { .. } => ErrorKind::SyntaxError,
            SqlError::UnsupportedDialect(_) => ErrorKind::UnsupportedDialect,
            SqlError::MalformedTree(_) => ErrorKind::MalformedTree,
        }
    }

    /// Line/column of a syntax error, when the parser reported one
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            SqlError::SyntaxError { line, column, .. } if *line > 0 => Some((*line, *column)),
            _ => None,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::SyntaxError => write!(f, "SyntaxError"),
            ErrorKind::UnsupportedDialect => write!(f, "UnsupportedDialect"),
            ErrorKind::MalformedTree => write!(f, "MalformedTree"),
        }
    }
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
