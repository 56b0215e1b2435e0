//! HTTP surface: routes, handlers, and error mapping.

use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use thiserror::Error;
use tokio::time::timeout;

use crate::error::DbError;
use crate::pool::DbPool;
use crate::report::{self, Page};

/// Shared handler state, injected at router construction.
///
/// The pool's health travels with the state as an explicit enum; handlers
/// never consult process-wide globals.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,

    /// Budget for pool acquisition plus query execution, per request.
    pub request_timeout: Duration,
}

/// API error type mapping to HTTP status codes.
///
/// The display strings are the response bodies; `/dados` consumers rely on
/// the exact wording of the 503 and 500 messages.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Parâmetros de paginação inválidos: limit e offset devem ser não-negativos.")]
    InvalidPagination,
    #[error("Serviço indisponível: pool de conexões falhou.")]
    PoolUnavailable,
    #[error("Tempo limite excedido ao consultar o banco de dados.")]
    Timeout,
    #[error("Erro ao consultar o banco de dados: {0}")]
    Query(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidPagination => StatusCode::BAD_REQUEST,
            ApiError::PoolUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Query(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "detail": self.to_string() }));

        (status, body).into_response()
    }
}

/// Handler for `GET /`.
///
/// Liveness only; answers 200 regardless of pool health.
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Handler for `GET /dados`.
///
/// Acquires a pooled connection, runs the report with the caller's pagination
/// window, and returns the rows under the `dados` key. The lease is a scoped
/// value: success, error, and timeout paths all return the connection to the
/// pool when it drops.
async fn dados(
    State(state): State<AppState>,
    Query(page): Query<Page>,
) -> Result<Json<Value>, ApiError> {
    if !page.is_valid() {
        return Err(ApiError::InvalidPagination);
    }
    if !state.db.is_ready() {
        return Err(ApiError::PoolUnavailable);
    }

    let result = timeout(state.request_timeout, async {
        let conn = state.db.acquire().await?;
        report::fetch_report(&conn, page).await
    })
    .await;

    match result {
        Ok(Ok(records)) => Ok(Json(json!({ "dados": records }))),
        Ok(Err(DbError::Unavailable)) => Err(ApiError::PoolUnavailable),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "report query failed");
            Err(ApiError::Query(e.to_string()))
        }
        Err(_) => {
            tracing::error!(
                timeout_secs = state.request_timeout.as_secs(),
                "report query timed out"
            );
            Err(ApiError::Timeout)
        }
    }
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/dados", get(dados))
        .with_state(state)
}
