//! Dashboard activity feed entries

use chrono::{DateTime, Utc};
use estate_shared::ExternalId;
use serde::{Deserialize, Serialize};

/// Source of an activity entry. Declaration order is the tiebreak order
/// when two entries share a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Payment,
    Booking,
    Alert,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub kind: ActivityKind,
    pub subject_id: ExternalId,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    pub occurred_at: DateTime<Utc>,
}
