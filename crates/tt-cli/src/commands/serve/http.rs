//! HTTP transport using axum

use anyhow::{Context, Result};
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tt_core::ServerConfig;
use tt_sql::{resolve_sql, Dialect, ErrorKind, SqlError};

use crate::cli::{GlobalArgs, ServeArgs};
use crate::commands::common::{load_config, ErrorBody};

/// State shared across all handlers
#[derive(Debug)]
struct AppState {
    /// Dialect used when a request does not name one
    default_dialect: Dialect,
    /// Upper bound on request SQL, in bytes
    max_sql_bytes: usize,
}

/// Body of `POST /tables`
#[derive(Debug, Deserialize)]
struct TablesRequest {
    sql: String,
    #[serde(default)]
    dialect: Option<String>,
}

/// Failure returned by a handler
#[derive(Debug)]
enum ApiError {
    Sql(SqlError),
    SqlTooLarge { size: usize, limit: usize },
}

impl From<SqlError> for ApiError {
    fn from(err: SqlError) -> Self {
        ApiError::Sql(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Sql(err) => match err.kind() {
                ErrorKind::SyntaxError | ErrorKind::UnsupportedDialect => StatusCode::BAD_REQUEST,
                ErrorKind::MalformedTree => StatusCode::UNPROCESSABLE_ENTITY,
            },
            ApiError::SqlTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            ApiError::Sql(err) => ErrorBody::from(err),
            ApiError::SqlTooLarge { size, limit } => ErrorBody {
                kind: "SqlTooLarge".to_string(),
                message: format!("SQL is {} bytes, the limit is {} bytes", size, limit),
                line: None,
                column: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

/// Execute the serve command
pub(super) async fn execute(args: &ServeArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let mut server = config.server.clone();
    if let Some(host) = &args.host {
        server.host = host.clone();
    }
    if let Some(port) = args.port {
        server.port = port;
    }
    let addr = server.socket_addr().context("Invalid host:port")?;

    let state = Arc::new(AppState {
        default_dialect: config.dialect,
        max_sql_bytes: server.max_sql_bytes,
    });
    let app = router(state, cors_layer(&server)?);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    log::info!(
        "Serving table resolution at http://{} (default dialect: {})",
        addr,
        config.dialect
    );
    println!("Listening on http://{}", addr);
    println!("Press Ctrl+C to stop.\n");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    log::info!("Server stopped");
    Ok(())
}

fn router(state: Arc<AppState>, cors: CorsLayer) -> Router {
    // JSON escaping can inflate the SQL text, so the raw body gets headroom
    // over the SQL limit; the handler enforces the limit on the SQL itself.
    let body_limit = state.max_sql_bytes.saturating_mul(4).saturating_add(4096);

    Router::new()
        .route("/ping", get(ping))
        .route("/tables", post(tables))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .with_state(state)
}

/// CORS for browser front ends; no configured origins means any origin
fn cors_layer(server: &ServerConfig) -> Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    if server.cors_origins.is_empty() {
        return Ok(layer.allow_origin(Any));
    }

    let origins = server
        .cors_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin.trim())
                .with_context(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(layer.allow_origin(AllowOrigin::list(origins)))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for Ctrl+C: {}", err);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown requested");
}

async fn ping() -> Json<&'static str> {
    Json("pong")
}

async fn tables(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TablesRequest>,
) -> Result<Json<Vec<String>>, ApiError> {
    let size = request.sql.len();
    if size > state.max_sql_bytes {
        log::warn!("Rejected {} bytes of SQL (limit {})", size, state.max_sql_bytes);
        return Err(ApiError::SqlTooLarge {
            size,
            limit: state.max_sql_bytes,
        });
    }

    let dialect = match request.dialect.as_deref() {
        Some(name) => name.parse::<Dialect>()?,
        None => state.default_dialect,
    };

    match resolve_sql(&request.sql, dialect) {
        Ok(tables) => {
            log::info!("POST /tables ({}): {} table(s)", dialect, tables.len());
            Ok(Json(tables.into_iter().collect()))
        }
        Err(err) => {
            log::warn!("POST /tables ({}): {}", dialect, err);
            Err(err.into())
        }
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
