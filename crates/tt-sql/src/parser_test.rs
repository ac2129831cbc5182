use super::*;
use crate::ast::{Node, StatementKind};

#[test]
fn test_parse_select() {
    let parser = SqlParser::default();
    let stmts = parser
        .parse("SELECT id, name FROM users WHERE id = 1")
        .unwrap();
    assert_eq!(stmts.len(), 1);
}

#[test]
fn test_parse_multiple_statements() {
    let parser = SqlParser::new(Dialect::Tsql);
    let stmts = parser.parse("SELECT 1; SELECT 2;").unwrap();
    assert_eq!(stmts.len(), 2);
}

#[test]
fn test_parse_empty() {
    let parser = SqlParser::default();
    for sql in ["", "   \n\t "] {
        match parser.parse(sql) {
            Err(SqlError::SyntaxError {
                dialect, message, ..
            }) => {
                assert_eq!(dialect, "tsql");
                assert_eq!(message, "SQL is empty");
            }
            other => panic!("expected syntax error, got {:?}", other),
        }
    }
}

#[test]
fn test_parse_error() {
    let parser = SqlParser::default();
    let err = parser.parse("SELECT FROM").unwrap_err();
    assert_eq!(err.kind(), crate::ErrorKind::SyntaxError);
}

#[test]
fn test_from_dialect_name() {
    let parser = SqlParser::from_dialect_name("tsql").unwrap();
    assert_eq!(parser.dialect(), Dialect::Tsql);

    let parser = SqlParser::from_dialect_name("snowflake").unwrap();
    assert_eq!(parser.dialect(), Dialect::Snowflake);

    let result = SqlParser::from_dialect_name("unknown");
    assert!(matches!(result, Err(SqlError::UnsupportedDialect(_))));
}

#[test]
fn test_parse_lowered_keeps_statement_kinds() {
    let parser = SqlParser::new(Dialect::Generic);
    let stmts = parser
        .parse_lowered("SELECT * FROM a; INSERT INTO b SELECT * FROM c")
        .unwrap();
    assert_eq!(stmts.len(), 2);
    assert_eq!(stmts[0].kind, StatementKind::Query);
    assert_eq!(stmts[1].kind, StatementKind::Insert);
    assert!(matches!(stmts[0].children.as_slice(), [Node::Query(_)]));
}
