//! Tables command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Read;
use tt_sql::{resolve_sql, Dialect};

use crate::cli::{GlobalArgs, OutputFormat, TablesArgs};
use crate::commands::common::{load_config, resolve_dialect, ErrorBody, ExitCode};

/// One piece of SQL to resolve, with where it came from
#[derive(Debug)]
struct SqlInput {
    source: String,
    sql: String,
}

/// Resolution outcome for a single input
#[derive(Debug, Serialize)]
struct TablesReport {
    source: String,
    dialect: Dialect,
    #[serde(skip_serializing_if = "Option::is_none")]
    tables: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody>,
}

impl TablesReport {
    fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Execute the tables command
pub async fn execute(args: &TablesArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let dialect = resolve_dialect(args.dialect.as_deref(), &config)?;
    log::debug!("Resolving tables with dialect {}", dialect);

    let inputs = collect_inputs(args)?;
    let reports = resolve_inputs(&inputs, dialect);

    match args.output {
        OutputFormat::Text => print_text(&reports),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&reports).context("Failed to serialize to JSON")?;
            println!("{}", json);
        }
    }

    let failures = reports.iter().filter(|r| r.is_error()).count();
    if failures > 0 {
        log::debug!("{} of {} input(s) failed", failures, reports.len());
        return Err(ExitCode(1).into());
    }
    Ok(())
}

/// Gather SQL from `--sql`, the listed files, or stdin, in that order of preference
fn collect_inputs(args: &TablesArgs) -> Result<Vec<SqlInput>> {
    if let Some(sql) = &args.sql {
        return Ok(vec![SqlInput {
            source: "<sql>".to_string(),
            sql: sql.clone(),
        }]);
    }

    if args.files.is_empty() {
        let mut sql = String::new();
        std::io::stdin()
            .read_to_string(&mut sql)
            .context("Failed to read SQL from stdin")?;
        return Ok(vec![SqlInput {
            source: "<stdin>".to_string(),
            sql,
        }]);
    }

    args.files
        .iter()
        .map(|path| {
            let sql = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok(SqlInput {
                source: path.display().to_string(),
                sql,
            })
        })
        .collect()
}

fn resolve_inputs(inputs: &[SqlInput], dialect: Dialect) -> Vec<TablesReport> {
    inputs
        .iter()
        .map(|input| match resolve_sql(&input.sql, dialect) {
            Ok(tables) => TablesReport {
                source: input.source.clone(),
                dialect,
                tables: Some(tables.into_iter().collect()),
                error: None,
            },
            Err(err) => {
                log::debug!("{}: {}", input.source, err);
                TablesReport {
                    source: input.source.clone(),
                    dialect,
                    tables: None,
                    error: Some(ErrorBody::from(&err)),
                }
            }
        })
        .collect()
}

/// Tables on stdout, one per line; errors on stderr.
/// With several inputs, each listing is headed by its source.
fn print_text(reports: &[TablesReport]) {
    let with_headers = reports.len() > 1;
    for report in reports {
        if let Some(error) = &report.error {
            eprintln!("{}: {}", report.source, error.message);
            continue;
        }
        if with_headers {
            println!("-- {}", report.source);
        }
        for table in report.tables.iter().flatten() {
            println!("{}", table);
        }
    }
}

#[cfg(test)]
#[path = "tables_test.rs"]
mod tests;
