//! Price quote returned to clients before a reservation is submitted

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::LeaseTerm;

/// Monetary breakdown for one reservation mode. All amounts are whole
/// currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum PriceBreakdown {
    Purchase {
        listing_price: i64,
        estimated_taxes: i64,
        total: i64,
    },
    Lease {
        term: LeaseTerm,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
        monthly_rent: i64,
        security_deposit: i64,
        application_fee: i64,
        due_at_signing: i64,
    },
    Stay {
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
        nightly_rate: i64,
        nights: i64,
        /// `nights * nightly_rate`; the amount stored on the booking
        subtotal: i64,
        cleaning_fee: i64,
        total: i64,
    },
}

impl PriceBreakdown {
    /// Headline amount shown to the requester.
    pub fn amount_due(&self) -> i64 {
        match self {
            PriceBreakdown::Purchase { total, .. } => *total,
            PriceBreakdown::Lease { due_at_signing, .. } => *due_at_signing,
            PriceBreakdown::Stay { total, .. } => *total,
        }
    }
}
