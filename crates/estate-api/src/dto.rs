//! Request and response payloads of the HTTP surface

use chrono::{DateTime, NaiveDate, Utc};
use estate_core::domain::{LeaseTerm, Requester, ReservationInterval};
use estate_core::services::DayOccupancy;
use estate_shared::utils::start_of_day;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ApiError;

/// Property and dates to price. Dates are `YYYY-MM-DD` or RFC 3339.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    #[validate(length(min = 1, max = 128, message = "propertyId is required"))]
    pub property_id: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    /// Only read for leases; defaults to long-term
    #[serde(default)]
    pub lease_term: Option<LeaseTerm>,
}

impl QuoteRequest {
    pub fn interval(&self) -> Result<ReservationInterval, ApiError> {
        Ok(ReservationInterval::new(
            parse_instant(self.start_date.as_deref(), "startDate")?,
            parse_instant(self.end_date.as_deref(), "endDate")?,
        ))
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub quote: QuoteRequest,
    #[validate(length(min = 1, max = 128, message = "requesterId is required"))]
    pub requester_id: String,
    #[serde(default)]
    pub requester_name: Option<String>,
}

impl ReservationRequest {
    pub fn requester(&self) -> Requester {
        Requester {
            id: self.requester_id.clone(),
            full_name: self.requester_name.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyQuery {
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub property_id: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyReport {
    pub year: i32,
    pub month: u32,
    pub property_count: usize,
    pub occupancy_rate: u32,
    pub days: Vec<DayOccupancy>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationQuery {
    pub participant_id: String,
    /// Restrict to the conversation with this other participant
    #[serde(default)]
    pub with: Option<String>,
}

fn parse_instant(raw: Option<&str>, field: &str) -> Result<Option<DateTime<Utc>>, ApiError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(instant.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|day| Some(start_of_day(day)))
        .map_err(|_| ApiError::BadRequest(format!("{} must be YYYY-MM-DD or RFC 3339, got {}", field, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_instant_formats() {
        assert_eq!(
            parse_instant(Some("2024-03-01"), "startDate").unwrap(),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            parse_instant(Some("2024-03-01T15:00:00+02:00"), "startDate").unwrap(),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 13, 0, 0).unwrap())
        );
        assert_eq!(parse_instant(Some(" "), "startDate").unwrap(), None);
        assert_eq!(parse_instant(None, "startDate").unwrap(), None);
        assert!(parse_instant(Some("03/01/2024"), "startDate").is_err());
    }

    #[test]
    fn test_reservation_request_flattens_quote() {
        let request: ReservationRequest = serde_json::from_str(
            r#"{"propertyId":"p1","startDate":"2024-03-01","endDate":"2024-03-04","requesterId":"u1","leaseTerm":"short-term"}"#,
        )
        .unwrap();
        assert_eq!(request.quote.property_id, "p1");
        assert_eq!(request.quote.lease_term, Some(LeaseTerm::ShortTerm));
        assert!(request.validate().is_ok());
        assert_eq!(request.requester().id, "u1");
    }
}
