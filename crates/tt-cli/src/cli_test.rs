use super::*;
use clap::CommandFactory;

#[test]
fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn test_tables_inline_sql() {
    let cli = Cli::try_parse_from(["tt", "tables", "--sql", "SELECT 1", "-d", "postgres"]).unwrap();
    match cli.command {
        Commands::Tables(args) => {
            assert_eq!(args.sql.as_deref(), Some("SELECT 1"));
            assert_eq!(args.dialect.as_deref(), Some("postgres"));
            assert_eq!(args.output, OutputFormat::Text);
            assert!(args.files.is_empty());
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_tables_files_and_json_output() {
    let cli = Cli::try_parse_from(["tt", "tables", "a.sql", "b.sql", "-o", "json"]).unwrap();
    match cli.command {
        Commands::Tables(args) => {
            assert_eq!(args.files, vec![PathBuf::from("a.sql"), PathBuf::from("b.sql")]);
            assert_eq!(args.output, OutputFormat::Json);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_tables_sql_conflicts_with_files() {
    assert!(Cli::try_parse_from(["tt", "tables", "a.sql", "--sql", "SELECT 1"]).is_err());
}

#[test]
fn test_global_args_after_subcommand() {
    let cli = Cli::try_parse_from(["tt", "serve", "--port", "9000", "-v", "-c", "conf.yml"]).unwrap();
    assert!(cli.global.verbose);
    assert_eq!(cli.global.config, Some(PathBuf::from("conf.yml")));
    assert_eq!(cli.global.project_dir, PathBuf::from("."));
    match cli.command {
        Commands::Serve(args) => {
            assert_eq!(args.port, Some(9000));
            assert!(args.host.is_none());
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_dialects_takes_no_arguments() {
    let cli = Cli::try_parse_from(["tt", "dialects"]).unwrap();
    assert!(matches!(cli.command, Commands::Dialects));
}
