//! tabletrace CLI - list the physical tables a SQL statement reads

use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::common::{init_logging, ExitCode};
use commands::{dialects, serve, tables};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let result = match &cli.command {
        cli::Commands::Tables(args) => tables::execute(args, &cli.global).await,
        cli::Commands::Dialects => dialects::execute(&cli.global).await,
        cli::Commands::Serve(args) => serve::execute(args, &cli.global).await,
    };

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<ExitCode>() {
            Some(ExitCode(code)) => {
                std::process::ExitCode::from(u8::try_from(*code).unwrap_or(1))
            }
            None => {
                eprintln!("Error: {:#}", err);
                std::process::ExitCode::FAILURE
            }
        },
    }
}
