//! Owner occupancy calendar

use axum::{
    extract::{Query, State},
    Json,
};
use estate_core::services::{occupancy_calendar, occupancy_rate, CalendarWindow};
use estate_shared::ExternalId;

use crate::dto::{OccupancyQuery, OccupancyReport};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/occupancy?year&month[&propertyId][&ownerId]
pub async fn occupancy(
    State(state): State<AppState>,
    Query(query): Query<OccupancyQuery>,
) -> Result<Json<ApiResponse<OccupancyReport>>, ApiError> {
    let window = CalendarWindow::month(query.year, query.month)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid month {}-{}", query.year, query.month)))?;

    let (properties, bookings) = tokio::try_join!(state.store.list_properties(), state.store.list_bookings())?;

    let property_ids: Vec<ExternalId> = properties
        .iter()
        .filter(|p| query.property_id.as_deref().map_or(true, |id| p.id == id))
        .filter(|p| {
            query
                .owner_id
                .as_deref()
                .map_or(true, |owner| p.owner_id.as_deref() == Some(owner))
        })
        .map(|p| p.id.clone())
        .collect();

    if let Some(id) = &query.property_id {
        if property_ids.is_empty() {
            return Err(ApiError::NotFound(format!("Property {}", id)));
        }
    }

    Ok(Json(ApiResponse::success(OccupancyReport {
        year: query.year,
        month: query.month,
        property_count: property_ids.len(),
        occupancy_rate: occupancy_rate(&window, &property_ids, &bookings),
        days: occupancy_calendar(&window, &property_ids, &bookings),
    })))
}
