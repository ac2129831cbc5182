use super::*;

#[test]
fn test_tsql_parse() {
    let stmts = Dialect::Tsql.parse("SELECT * FROM [dbo].[users]").unwrap();
    assert_eq!(stmts.len(), 1);
}

#[test]
fn test_every_dialect_parses_simple_select() {
    for dialect in Dialect::ALL {
        let stmts = dialect
            .parse("SELECT a FROM users")
            .unwrap_or_else(|e| panic!("{} failed: {}", dialect, e));
        assert_eq!(stmts.len(), 1, "dialect {}", dialect);
    }
}

#[test]
fn test_from_str_round_trips_names() {
    for dialect in Dialect::ALL {
        assert_eq!(dialect.name().parse::<Dialect>().unwrap(), dialect);
    }
}

#[test]
fn test_from_str_aliases_and_case() {
    assert_eq!("MSSQL".parse::<Dialect>().unwrap(), Dialect::Tsql);
    assert_eq!("PostgreSQL".parse::<Dialect>().unwrap(), Dialect::Postgres);
    assert_eq!(" duckdb ".parse::<Dialect>().unwrap(), Dialect::DuckDb);
}

#[test]
fn test_unknown_dialect() {
    let err = "oracle9i".parse::<Dialect>().unwrap_err();
    assert_eq!(err, SqlError::UnsupportedDialect("oracle9i".to_string()));
}

#[test]
fn test_default_is_tsql() {
    assert_eq!(Dialect::default(), Dialect::Tsql);
}

#[test]
fn test_serde_names() {
    let json = serde_json::to_string(&Dialect::BigQuery).unwrap();
    assert_eq!(json, "\"bigquery\"");
    let parsed: Dialect = serde_json::from_str("\"mssql\"").unwrap();
    assert_eq!(parsed, Dialect::Tsql);
    assert!(serde_json::from_str::<Dialect>("\"nope\"").is_err());
}

#[test]
fn test_parse_error_location() {
    // Error is on line 2 (the FROM keyword with no columns)
    let result = Dialect::DuckDb.parse("SELECT\nFROM users");
    match result {
        Err(SqlError::SyntaxError {
            dialect,
            line,
            column,
            message,
        }) => {
            assert_eq!(dialect, "duckdb");
            assert_eq!(
                line, 2,
                "Expected line 2, got line {} (message: {})",
                line, message
            );
            assert!(
                column > 0,
                "Expected non-zero column, got {} (message: {})",
                column,
                message
            );
        }
        other => panic!("expected syntax error, got {:?}", other),
    }
}

#[test]
fn test_parse_location_extraction() {
    let (line, col) =
        super::parse_location_from_error("Expected: something at Line: 5, Column: 10");
    assert_eq!(line, 5);
    assert_eq!(col, 10);

    // No location info
    let (line, col) = super::parse_location_from_error("Some error without location");
    assert_eq!(line, 0);
    assert_eq!(col, 0);
}
