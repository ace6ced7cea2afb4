// ============================================================================
// Estate Core - Booking Entity
// File: crates/estate-core/src/domain/booking.rs
// Description: Hotel stay reservation
// ============================================================================

use chrono::{DateTime, NaiveDate, Utc};
use estate_shared::ExternalId;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Booking status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Canceled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Canceled => "canceled",
        }
    }
}

/// Booking create request (no identity yet)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub property_id: ExternalId,
    pub client_id: ExternalId,
    pub check_in_date: DateTime<Utc>,
    pub check_out_date: DateTime<Utc>,
    pub status: BookingStatus,
    pub total_amount: i64,
    pub booked_at: DateTime<Utc>,
}

impl NewBooking {
    /// Create a pending booking. Check-out may not precede check-in.
    pub fn pending(
        property_id: ExternalId,
        client_id: ExternalId,
        check_in_date: DateTime<Utc>,
        check_out_date: DateTime<Utc>,
        total_amount: i64,
    ) -> Result<Self, DomainError> {
        if check_out_date < check_in_date {
            return Err(DomainError::ValidationError(
                "Check-out date must not be before check-in date".to_string(),
            ));
        }

        Ok(Self {
            property_id,
            client_id,
            check_in_date,
            check_out_date,
            status: BookingStatus::Pending,
            total_amount,
            booked_at: Utc::now(),
        })
    }
}

/// Persisted booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", alias = "id")]
    pub id: ExternalId,
    pub property_id: ExternalId,
    pub client_id: ExternalId,
    pub check_in_date: DateTime<Utc>,
    pub check_out_date: DateTime<Utc>,
    pub status: BookingStatus,
    #[serde(default)]
    pub total_amount: i64,
    pub booked_at: DateTime<Utc>,
}

impl Booking {
    /// Pending and confirmed bookings hold the property; canceled ones do not.
    pub fn holds_property(&self) -> bool {
        matches!(self.status, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    /// Inclusive on both ends, compared by calendar day.
    pub fn covers_day(&self, day: NaiveDate) -> bool {
        self.check_in_date.date_naive() <= day && day <= self.check_out_date.date_naive()
    }

    /// Inclusive day-range intersection with `[start, end]`.
    pub fn overlaps_days(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.check_in_date.date_naive() <= end && start <= self.check_out_date.date_naive()
    }
}
