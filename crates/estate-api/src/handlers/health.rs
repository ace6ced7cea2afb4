use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResponse {
    status: String,
    storage: String,
    open_rooms: usize,
}

pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

pub async fn readiness_check(State(state): State<AppState>) -> Json<ApiResponse<ReadinessResponse>> {
    Json(ApiResponse::success(ReadinessResponse {
        status: "ready".to_string(),
        storage: state.storage_backend.to_string(),
        open_rooms: state.gateway.rooms().room_count(),
    }))
}
