use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::Serialize;
use shai_core::Data;
use shai_utils::formatting::{GALLONS_PER_TOKEN, tokens_to_gallons};

use crate::RouteMeta;

pub const META: RouteMeta = RouteMeta {
    method: "GET",
    path: "/api/tokens",
    desc: "Token usage and gallon conversion",
};

#[derive(Debug, Serialize)]
pub struct TokenUsageResponse {
    pub tokens: u64,
    pub gallons: f64,
    pub conversion_rate: f64,
    pub timestamp: DateTime<Utc>,
}

pub async fn tokens(State(data): State<Data>) -> Json<TokenUsageResponse> {
    let tokens = data.llm.usage().total();

    Json(TokenUsageResponse {
        tokens,
        gallons: tokens_to_gallons(tokens),
        conversion_rate: GALLONS_PER_TOKEN,
        timestamp: Utc::now(),
    })
}
