// ============================================================================
// Estate API - Reservation Handlers
// File: crates/estate-api/src/handlers/reservations.rs
// ============================================================================

use axum::{extract::State, http::StatusCode, Json};
use estate_core::domain::Reservation;
use validator::Validate;

use crate::dto::ReservationRequest;
use crate::error::ApiError;
use crate::handlers::quotes::resolve;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/reservations
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(request): Json<ReservationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Reservation>>), ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let (property, mode, interval) = resolve(&state, &request.quote).await?;

    let reservation = state
        .submitter
        .submit(&property, mode, &interval, &request.requester())
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(reservation))))
}
