use super::*;

fn input(source: &str, sql: &str) -> SqlInput {
    SqlInput {
        source: source.to_string(),
        sql: sql.to_string(),
    }
}

#[test]
fn test_resolve_inputs_lists_sorted_tables() {
    let reports = resolve_inputs(
        &[input("a.sql", "SELECT * FROM zeta JOIN [dbo].[alpha] ON 1 = 1")],
        Dialect::Tsql,
    );
    assert_eq!(reports.len(), 1);
    assert!(!reports[0].is_error());
    assert_eq!(
        reports[0].tables.as_deref(),
        Some(&["dbo.alpha".to_string(), "zeta".to_string()][..])
    );
}

#[test]
fn test_resolve_inputs_keeps_going_after_failure() {
    let reports = resolve_inputs(
        &[
            input("bad.sql", "SELEC * FROM t"),
            input("good.sql", "SELECT * FROM t"),
        ],
        Dialect::Tsql,
    );
    assert!(reports[0].is_error());
    assert_eq!(reports[0].error.as_ref().unwrap().kind, "SyntaxError");
    assert!(!reports[1].is_error());
}

#[test]
fn test_report_json_shape() {
    let reports = resolve_inputs(
        &[input("<sql>", "WITH c AS (SELECT * FROM t) SELECT * FROM c")],
        Dialect::Generic,
    );
    let json = serde_json::to_value(&reports).unwrap();
    assert_eq!(json[0]["source"], "<sql>");
    assert_eq!(json[0]["dialect"], "generic");
    assert_eq!(json[0]["tables"], serde_json::json!(["t"]));
    assert!(json[0].get("error").is_none());
}

#[test]
fn test_collect_inputs_prefers_inline_sql() {
    let args = TablesArgs {
        files: vec![],
        sql: Some("SELECT 1".to_string()),
        dialect: None,
        output: OutputFormat::Text,
    };
    let inputs = collect_inputs(&args).unwrap();
    assert_eq!(inputs.len(), 1);
    assert_eq!(inputs[0].source, "<sql>");
    assert_eq!(inputs[0].sql, "SELECT 1");
}

#[test]
fn test_collect_inputs_reads_files() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("q.sql");
    std::fs::write(&path, "SELECT * FROM orders").unwrap();

    let args = TablesArgs {
        files: vec![path.clone()],
        sql: None,
        dialect: None,
        output: OutputFormat::Json,
    };
    let inputs = collect_inputs(&args).unwrap();
    assert_eq!(inputs[0].source, path.display().to_string());
    assert_eq!(inputs[0].sql, "SELECT * FROM orders");
}

#[test]
fn test_collect_inputs_missing_file() {
    let args = TablesArgs {
        files: vec!["/nonexistent/q.sql".into()],
        sql: None,
        dialect: None,
        output: OutputFormat::Text,
    };
    let err = collect_inputs(&args).unwrap_err();
    assert!(err.to_string().contains("Failed to read"), "{}", err);
}
