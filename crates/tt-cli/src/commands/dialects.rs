//! Dialects command implementation

use anyhow::Result;
use tt_sql::Dialect;

use crate::cli::GlobalArgs;
use crate::commands::common::load_config;

/// Execute the dialects command
pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    for line in dialect_lines(config.dialect) {
        println!("{}", line);
    }
    Ok(())
}

/// Supported dialect names, marking the one used when none is given
fn dialect_lines(default: Dialect) -> Vec<String> {
    Dialect::ALL
        .iter()
        .map(|&dialect| {
            if dialect == default {
                format!("{} (default)", dialect)
            } else {
                dialect.to_string()
            }
        })
        .collect()
}
