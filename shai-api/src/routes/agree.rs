use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use chrono::{DateTime, Utc};
use serde::Serialize;
use shai_core::Data;
use shai_llm::Persona;

use crate::RouteMeta;
use crate::error::ApiError;
use crate::routes::{InputRequest, read_input};

pub const META: RouteMeta = RouteMeta {
    method: "POST",
    path: "/api/agree",
    desc: "AgreeBot responses (not recorded in history)",
};

#[derive(Debug, Serialize)]
pub struct AgreeResponse {
    pub success: bool,
    pub input: String,
    pub agreements: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub using_local: bool,
}

pub async fn agree(
    State(data): State<Data>,
    payload: Result<Json<InputRequest>, JsonRejection>,
) -> Result<Json<AgreeResponse>, ApiError> {
    let input = read_input(payload)?;
    let generation = data.llm.generate(Persona::AgreeBot, &input).await;

    Ok(Json(AgreeResponse {
        success: true,
        input,
        agreements: generation.lines,
        timestamp: Utc::now(),
        using_local: generation.using_local,
    }))
}
