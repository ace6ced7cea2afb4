// ============================================================================
// Estate Core - Reservation Types
// File: crates/estate-core/src/domain/reservation.rs
// Description: Reservation modes, requested intervals and outcomes
// ============================================================================

use chrono::{DateTime, Utc};
use estate_shared::ExternalId;
use serde::{Deserialize, Serialize};

use super::{Booking, Lease, LeaseTerm, PropertyType, Transaction};

/// What the requester wants to do with a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ReservationMode {
    /// Buy a `real_estate` listing
    Purchase,
    /// Lease a `rented_real_estate` listing
    Lease {
        #[serde(default)]
        term: LeaseTerm,
    },
    /// Stay at a `hotel` listing
    Stay,
}

impl ReservationMode {
    /// The mode a property's listing type implies.
    pub fn for_property(property_type: PropertyType, term: LeaseTerm) -> Self {
        match property_type {
            PropertyType::RealEstate => ReservationMode::Purchase,
            PropertyType::RentedRealEstate => ReservationMode::Lease { term },
            PropertyType::Hotel => ReservationMode::Stay,
        }
    }

    pub fn property_type(&self) -> PropertyType {
        match self {
            ReservationMode::Purchase => PropertyType::RealEstate,
            ReservationMode::Lease { .. } => PropertyType::RentedRealEstate,
            ReservationMode::Stay => PropertyType::Hotel,
        }
    }

    pub fn requires_dates(&self) -> bool {
        !matches!(self, ReservationMode::Purchase)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationMode::Purchase => "purchase",
            ReservationMode::Lease { .. } => "lease",
            ReservationMode::Stay => "stay",
        }
    }
}

/// Requested check-in/check-out (or lease start/end). Either end may be
/// missing until the requester has picked it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationInterval {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl ReservationInterval {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    pub fn dated(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::new(Some(start), Some(end))
    }

    pub fn endpoints(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((self.start?, self.end?))
    }
}

/// Identity of the client submitting a reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requester {
    pub id: ExternalId,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Entity created by a successful submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "entity", rename_all = "snake_case")]
pub enum Reservation {
    Booking(Booking),
    Lease(Lease),
    Transaction(Transaction),
}

impl Reservation {
    pub fn id(&self) -> &str {
        match self {
            Reservation::Booking(b) => &b.id,
            Reservation::Lease(l) => &l.id,
            Reservation::Transaction(t) => &t.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_for_property() {
        assert_eq!(
            ReservationMode::for_property(PropertyType::Hotel, LeaseTerm::LongTerm),
            ReservationMode::Stay
        );
        assert_eq!(
            ReservationMode::for_property(PropertyType::RentedRealEstate, LeaseTerm::ShortTerm),
            ReservationMode::Lease { term: LeaseTerm::ShortTerm }
        );
        assert!(!ReservationMode::Purchase.requires_dates());
    }

    #[test]
    fn test_mode_serde() {
        let mode: ReservationMode = serde_json::from_str(r#"{"mode":"lease"}"#).unwrap();
        assert_eq!(mode, ReservationMode::Lease { term: LeaseTerm::LongTerm });

        let mode: ReservationMode =
            serde_json::from_str(r#"{"mode":"lease","term":"short-term"}"#).unwrap();
        assert_eq!(mode, ReservationMode::Lease { term: LeaseTerm::ShortTerm });
    }
}
