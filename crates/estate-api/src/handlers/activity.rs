//! Admin dashboard activity feed

use axum::{extract::State, Json};
use chrono::Utc;
use estate_core::domain::ActivityItem;
use estate_core::services::recent_activity;

use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/activity
pub async fn activity_feed(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<ActivityItem>>>, ApiError> {
    let (transactions, bookings, properties) = tokio::try_join!(
        state.store.list_transactions(),
        state.store.list_bookings(),
        state.store.list_properties(),
    )?;

    Ok(Json(ApiResponse::success(recent_activity(
        &transactions,
        &bookings,
        &properties,
        Utc::now(),
    ))))
}
