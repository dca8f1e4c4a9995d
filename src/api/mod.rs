// HTTP API routes (combine, element listing, health, metrics).

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::combine::combine_elements;
use crate::db::Database;
use crate::generate::Generator;
use crate::metrics;

// ── Request types ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CombineParams {
    pub word1: Option<String>,
    pub word2: Option<String>,
}

// ── Shared application state ─────────────────────────────────────────

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub generator: Arc<dyn Generator>,
}

// ── Error helper ──────────────────────────────────────────────────────

fn json_error(status: StatusCode, msg: &str) -> impl IntoResponse {
    (status, Json(json!({ "message": msg })))
}

fn internal_error(e: sqlx::Error) -> impl IntoResponse {
    tracing::error!("Database error: {e}");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}

// ── Router ────────────────────────────────────────────────────────────

pub fn router(
    db: Arc<Database>,
    generator: Arc<dyn Generator>,
    static_dir: Option<PathBuf>,
) -> Router {
    let state = AppState { db, generator };

    let mut app = Router::new()
        .route("/api/combine", get(combine))
        .route("/api/elements", get(list_elements))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .with_state(state);

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true));
    }

    app.layer(CorsLayer::permissive())
}

// ── Handlers ──────────────────────────────────────────────────────────

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "service": "atelier-backend" }))
}

async fn metrics_handler() -> String {
    metrics::gather_metrics()
}

async fn combine(
    State(state): State<AppState>,
    Query(params): Query<CombineParams>,
) -> impl IntoResponse {
    let (Some(word1), Some(word2)) = (params.word1, params.word2) else {
        return json_error(StatusCode::BAD_REQUEST, "Bad Request").into_response();
    };
    if word1.is_empty() || word2.is_empty() {
        return json_error(StatusCode::BAD_REQUEST, "Bad Request").into_response();
    }

    match combine_elements(&state.db, state.generator.as_ref(), &word1, &word2).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(json!({
                "message": outcome.message,
                "element": {
                    "emoji": outcome.emoji,
                    "text": outcome.text,
                    "discovered": outcome.discovered,
                },
            })),
        )
            .into_response(),
        Err(e) => internal_error(e).into_response(),
    }
}

async fn list_elements(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.list_elements().await {
        Ok(elements) => (StatusCode::OK, Json(json!(elements))).into_response(),
        Err(e) => internal_error(e).into_response(),
    }
}
