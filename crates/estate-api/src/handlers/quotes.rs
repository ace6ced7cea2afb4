// ============================================================================
// Estate API - Quote Handlers
// File: crates/estate-api/src/handlers/quotes.rs
// ============================================================================
//! Price a property before submitting a reservation

use axum::{extract::State, Json};
use estate_core::domain::{PriceBreakdown, Property, ReservationInterval, ReservationMode};
use estate_core::DomainError;
use tracing::info;
use validator::Validate;

use crate::dto::QuoteRequest;
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Property, mode and interval a request addresses. The mode follows the
/// property's listing type.
pub(crate) async fn resolve(
    state: &AppState,
    request: &QuoteRequest,
) -> Result<(Property, ReservationMode, ReservationInterval), ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let interval = request.interval()?;

    let property = state
        .store
        .find_property(request.property_id.trim())
        .await?
        .ok_or_else(|| DomainError::PropertyNotFound(request.property_id.clone()))?;
    let property_type = property.property_type.ok_or_else(|| {
        DomainError::ValidationError(format!("Property {} has no listing type", property.id))
    })?;

    let mode = ReservationMode::for_property(property_type, request.lease_term.unwrap_or_default());
    Ok((property, mode, interval))
}

/// POST /api/v1/quotes
pub async fn create_quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<ApiResponse<PriceBreakdown>>, ApiError> {
    let (property, mode, interval) = resolve(&state, &request).await?;

    let quote = state
        .quoter()
        .quote(&property, mode, &interval)
        .ok_or_else(|| ApiError::BadRequest("No price can be quoted for this request".to_string()))?;

    info!(
        "Quoted {} for property {}: {}",
        mode.as_str(),
        property.id,
        quote.amount_due()
    );
    Ok(Json(ApiResponse::success(quote)))
}
