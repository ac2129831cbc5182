//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt;
use tt_core::Config;
use tt_sql::{Dialect, SqlError};

use crate::cli::GlobalArgs;

/// Process exit code carried through the error chain.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; main.rs reports the failure itself.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Initialize the `log` backend.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug output for
/// the tabletrace crates and warnings are shown for everything else.
pub(crate) fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,tt_cli=debug,tt_core=debug,tt_sql=debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// Load the effective configuration for a command
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    Config::discover(global.config.as_deref(), &global.project_dir)
        .context("Failed to load configuration")
}

/// Pick the dialect: an explicit name wins over the configured default
pub(crate) fn resolve_dialect(name: Option<&str>, config: &Config) -> Result<Dialect, SqlError> {
    match name {
        Some(name) => name.parse(),
        None => Ok(config.dialect),
    }
}

/// Error payload shared by JSON output and the HTTP service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ErrorBody {
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl From<&SqlError> for ErrorBody {
    fn from(err: &SqlError) -> Self {
        let location = err.location();
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
            line: location.map(|(line, _)| line),
            column: location.map(|(_, column)| column),
        }
    }
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
