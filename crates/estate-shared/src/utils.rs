//! Utility functions

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

pub fn parse_entity_id(s: &str) -> Option<Uuid> {
    Uuid::parse_str(s.trim()).ok()
}

/// Midnight UTC of the given calendar day, the instant a bare `YYYY-MM-DD`
/// date input denotes.
pub fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .unwrap_or_else(|| DateTime::<Utc>::MIN_UTC)
}
