use super::*;

fn state(max_sql_bytes: usize) -> State<Arc<AppState>> {
    State(Arc::new(AppState {
        default_dialect: Dialect::Tsql,
        max_sql_bytes,
    }))
}

fn request(sql: &str, dialect: Option<&str>) -> Json<TablesRequest> {
    Json(TablesRequest {
        sql: sql.to_string(),
        dialect: dialect.map(String::from),
    })
}

async fn error_json(err: ApiError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_ping() {
    let Json(body) = ping().await;
    assert_eq!(body, "pong");
}

#[tokio::test]
async fn test_tables_uses_default_dialect() {
    let Json(tables) = tables(state(1024), request("SELECT * FROM [foo].[bar]", None))
        .await
        .unwrap();
    assert_eq!(tables, vec!["foo.bar"]);
}

#[tokio::test]
async fn test_tables_excludes_ctes() {
    let sql = "WITH a AS (SELECT * FROM t1), b AS (SELECT * FROM a JOIN t2 ON a.id = t2.id) \
               SELECT * FROM b";
    let Json(tables) = tables(state(1024), request(sql, Some("postgres")))
        .await
        .unwrap();
    assert_eq!(tables, vec!["t1", "t2"]);
}

#[tokio::test]
async fn test_tables_syntax_error_is_400() {
    let err = tables(state(1024), request("SELECT\nFROM users", Some("duckdb")))
        .await
        .unwrap_err();
    let (status, body) = error_json(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "SyntaxError");
    assert_eq!(body["line"], 2);
    assert!(body["column"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_tables_unknown_dialect_is_400() {
    let err = tables(state(1024), request("SELECT 1", Some("klingon")))
        .await
        .unwrap_err();
    let (status, body) = error_json(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "UnsupportedDialect");
    assert!(body["message"].as_str().unwrap().contains("klingon"));
    assert!(body.get("line").is_none());
}

#[tokio::test]
async fn test_tables_oversize_sql_is_413() {
    let sql = "SELECT * FROM orders";
    let err = tables(state(sql.len() - 1), request(sql, None))
        .await
        .unwrap_err();
    let (status, body) = error_json(err).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["kind"], "SqlTooLarge");
}

#[tokio::test]
async fn test_tables_at_limit_is_accepted() {
    let sql = "SELECT * FROM orders";
    let Json(tables) = tables(state(sql.len()), request(sql, None))
        .await
        .unwrap();
    assert_eq!(tables, vec!["orders"]);
}

#[tokio::test]
async fn test_malformed_tree_is_422() {
    let (status, body) = error_json(ApiError::Sql(SqlError::MalformedTree(
        "table reference with empty name".to_string(),
    )))
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "MalformedTree");
}

#[test]
fn test_request_dialect_is_optional() {
    let req: TablesRequest = serde_json::from_str(r#"{"sql": "SELECT 1"}"#).unwrap();
    assert_eq!(req.sql, "SELECT 1");
    assert!(req.dialect.is_none());
}

#[test]
fn test_cors_layer_accepts_configured_origins() {
    let server = ServerConfig {
        cors_origins: vec!["http://localhost:3000".to_string()],
        ..ServerConfig::default()
    };
    assert!(cors_layer(&server).is_ok());
    assert!(cors_layer(&ServerConfig::default()).is_ok());
}

#[test]
fn test_cors_layer_rejects_invalid_origin() {
    let server = ServerConfig {
        cors_origins: vec!["http://bad\norigin".to_string()],
        ..ServerConfig::default()
    };
    assert!(cors_layer(&server).is_err());
}

#[test]
fn test_router_builds() {
    let State(state) = state(1024);
    let _app = router(state, CorsLayer::new());
}
