// ============================================================================
// Estate Core - Lease Entity
// File: crates/estate-core/src/domain/lease.rs
// Description: Rental lease agreement
// ============================================================================

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use estate_shared::ExternalId;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Lease status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaseStatus {
    Active,
    Pending,
    Terminated,
}

/// Lease term chosen by the applicant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LeaseTerm {
    /// Ends on the date the applicant picked
    ShortTerm,
    /// Ends one calendar year after the start date
    #[default]
    LongTerm,
}

impl LeaseTerm {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaseTerm::ShortTerm => "short-term",
            LeaseTerm::LongTerm => "long-term",
        }
    }

    /// Resolve the lease end date. Short-term leases need a chosen end date.
    pub fn end_date(
        &self,
        start: DateTime<Utc>,
        chosen_end: Option<DateTime<Utc>>,
    ) -> Option<DateTime<Utc>> {
        match self {
            LeaseTerm::ShortTerm => chosen_end,
            LeaseTerm::LongTerm => Some(add_one_calendar_year(start)),
        }
    }
}

/// Same month and day one year later; 29 February rolls to 1 March.
pub fn add_one_calendar_year(start: DateTime<Utc>) -> DateTime<Utc> {
    let next_year = start.year() + 1;
    start.with_year(next_year).unwrap_or_else(|| {
        start
            .with_day(1)
            .and_then(|d| d.with_month(3))
            .and_then(|d| d.with_year(next_year))
            .unwrap_or(start)
    })
}

/// Lease create request (no identity yet)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLease {
    pub property_id: ExternalId,
    pub client_id: ExternalId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: LeaseStatus,
    pub rent_amount: i64,
}

impl NewLease {
    /// Create a pending lease. The end date must be after the start date.
    pub fn pending(
        property_id: ExternalId,
        client_id: ExternalId,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        rent_amount: i64,
    ) -> Result<Self, DomainError> {
        if end_date <= start_date {
            return Err(DomainError::ValidationError(
                "Lease end date must be after its start date".to_string(),
            ));
        }

        Ok(Self {
            property_id,
            client_id,
            start_date,
            end_date,
            status: LeaseStatus::Pending,
            rent_amount,
        })
    }
}

/// Persisted lease
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lease {
    #[serde(rename = "_id", alias = "id")]
    pub id: ExternalId,
    pub property_id: ExternalId,
    pub client_id: ExternalId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: LeaseStatus,
    #[serde(default)]
    pub rent_amount: i64,
}

impl Lease {
    pub fn is_active(&self) -> bool {
        self.status == LeaseStatus::Active
    }

    pub fn overlaps_days(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date.date_naive() <= end && start <= self.end_date.date_naive()
    }
}
