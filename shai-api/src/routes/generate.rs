use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use chrono::{DateTime, Utc};
use serde::Serialize;
use shai_core::Data;
use shai_llm::Persona;
use shai_utils::formatting::preview;
use tracing::info;

use crate::RouteMeta;
use crate::error::ApiError;
use crate::routes::{InputRequest, read_input};
use crate::scope::ClientScope;

pub const META: RouteMeta = RouteMeta {
    method: "POST",
    path: "/generate",
    desc: "Generate pickup lines and record them in history",
};

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub id: String,
    pub input: String,
    pub pickup_lines: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub using_local: bool,
}

pub async fn generate(
    State(data): State<Data>,
    scope: ClientScope,
    payload: Result<Json<InputRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let input = read_input(payload)?;
    let timestamp = Utc::now();

    let generation = data.llm.generate(Persona::PickupLines, &input).await;
    let record = data
        .history
        .scoped(scope.as_str())
        .add(
            input.clone(),
            generation.lines,
            timestamp,
            generation.using_local,
        )
        .await;

    info!(
        scope = scope.as_str(),
        input = %preview(&input, 60),
        lines = record.pickup_lines.len(),
        "generated pickup lines"
    );

    Ok(Json(GenerateResponse {
        success: true,
        id: record.id,
        input,
        pickup_lines: record.pickup_lines,
        timestamp: record.timestamp,
        using_local: record.using_local,
    }))
}
