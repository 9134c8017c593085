//! Landing page and health check.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::Json;
use serde::Serialize;

use crate::error::ApiError;
use crate::AppState;

const INDEX_HTML: &str = r#"<html>
    <head>
        <title>Receipt Points Service</title>
    </head>
    <body>
        <h1>Welcome to the Receipt Points Service</h1>
        <p>Request a token with <code>POST /token</code>, then submit receipts to
        <code>POST /receipts/process</code> and read their score from
        <code>GET /receipts/{id}/points</code>.</p>
    </body>
</html>
"#;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub receipts: usize,
}

/// `GET /`
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `GET /health`
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, ApiError> {
    let receipts = state.store.len()?;
    Ok(Json(HealthResponse {
        status: "ok",
        receipts,
    }))
}
