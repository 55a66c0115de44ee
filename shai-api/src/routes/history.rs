use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;
use shai_core::Data;
use shai_history::HistoryRecord;
use tracing::info;

use crate::RouteMeta;
use crate::error::ApiError;
use crate::scope::ClientScope;

pub const LIST_META: RouteMeta = RouteMeta {
    method: "GET",
    path: "/history",
    desc: "List past generations, newest first",
};

pub const CLEAR_META: RouteMeta = RouteMeta {
    method: "DELETE",
    path: "/history",
    desc: "Erase the caller's history",
};

pub const REMOVE_META: RouteMeta = RouteMeta {
    method: "DELETE",
    path: "/history/{id}",
    desc: "Delete one history record",
};

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub history: Vec<HistoryRecord>,
}

#[derive(Debug, Serialize)]
pub struct RemoveResponse {
    pub success: bool,
    pub removed: bool,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub success: bool,
}

pub async fn list_history(State(data): State<Data>, scope: ClientScope) -> Json<HistoryResponse> {
    let history = data.history.scoped(scope.as_str()).load().await;

    Json(HistoryResponse {
        success: true,
        history,
    })
}

pub async fn remove_history(
    State(data): State<Data>,
    scope: ClientScope,
    Path(id): Path<String>,
) -> Json<RemoveResponse> {
    let removed = data.history.scoped(scope.as_str()).remove(&id).await;

    Json(RemoveResponse {
        success: true,
        removed,
    })
}

pub async fn clear_history(
    State(data): State<Data>,
    scope: ClientScope,
) -> Result<Json<ClearResponse>, ApiError> {
    data.history
        .scoped(scope.as_str())
        .clear()
        .await
        .map_err(|err| ApiError::internal(format!("Failed to clear history: {err}")))?;

    info!(scope = scope.as_str(), "history cleared");
    Ok(Json(ClearResponse { success: true }))
}
