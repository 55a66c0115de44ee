use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;
use shai_core::Data;

use crate::RouteMeta;

pub const META: RouteMeta = RouteMeta {
    method: "GET",
    path: "/health",
    desc: "Health check",
};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub using_local: bool,
    pub claude_configured: bool,
    pub total_tokens: u64,
    pub history_backend: &'static str,
}

pub async fn health(State(data): State<Data>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        using_local: data.llm.using_local(),
        claude_configured: data.llm.claude_configured(),
        total_tokens: data.llm.usage().total(),
        history_backend: data.history.storage().backend_name(),
    })
}
