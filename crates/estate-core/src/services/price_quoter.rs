// ============================================================================
// Estate Core - Price Quoter
// File: crates/estate-core/src/services/price_quoter.rs
// ============================================================================
//! Monetary breakdown for purchases, leases and hotel stays.

use chrono::{DateTime, Utc};
use estate_shared::constants::{
    DEFAULT_APPLICATION_FEE, DEFAULT_CLEANING_FEE, DEFAULT_CURRENCY, DEFAULT_PURCHASE_TAX_BPS,
};

use crate::domain::{PriceBreakdown, Property, ReservationInterval, ReservationMode};

const MILLIS_PER_DAY: i64 = 86_400_000;
const BPS_DENOMINATOR: i64 = 10_000;

/// Fees and rates applied by the quoter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingPolicy {
    pub application_fee: i64,
    pub cleaning_fee: i64,
    pub purchase_tax_bps: i64,
    pub currency: String,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            application_fee: DEFAULT_APPLICATION_FEE,
            cleaning_fee: DEFAULT_CLEANING_FEE,
            purchase_tax_bps: DEFAULT_PURCHASE_TAX_BPS,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PriceQuoter {
    policy: PricingPolicy,
}

impl PriceQuoter {
    pub fn new(policy: PricingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Quote `property` for `mode`. `None` means the quote is undefined for
    /// the given interval, or an amount overflows, and the reservation must
    /// not be submitted.
    pub fn quote(
        &self,
        property: &Property,
        mode: ReservationMode,
        interval: &ReservationInterval,
    ) -> Option<PriceBreakdown> {
        match mode {
            ReservationMode::Purchase => self.quote_purchase(property),
            ReservationMode::Lease { term } => {
                let start = interval.start?;
                let end = term.end_date(start, interval.end)?;
                if end <= start {
                    return None;
                }
                let rent = property.rent_price_or_zero();
                let due_at_signing = rent
                    .checked_mul(2)?
                    .checked_add(self.policy.application_fee)?;
                Some(PriceBreakdown::Lease {
                    term,
                    start_date: start,
                    end_date: end,
                    monthly_rent: rent,
                    security_deposit: rent,
                    application_fee: self.policy.application_fee,
                    due_at_signing,
                })
            }
            ReservationMode::Stay => {
                let (check_in, check_out) = interval.endpoints()?;
                let nights = nights_between(check_in, check_out)?;
                let rate = property.rent_price_or_zero();
                let subtotal = nights.checked_mul(rate)?;
                let total = subtotal.checked_add(self.policy.cleaning_fee)?;
                Some(PriceBreakdown::Stay {
                    check_in,
                    check_out,
                    nightly_rate: rate,
                    nights,
                    subtotal,
                    cleaning_fee: self.policy.cleaning_fee,
                    total,
                })
            }
        }
    }

    fn quote_purchase(&self, property: &Property) -> Option<PriceBreakdown> {
        let price = property.sell_price_or_zero();
        let taxes = round_bps(price, self.policy.purchase_tax_bps)?;
        Some(PriceBreakdown::Purchase {
            listing_price: price,
            estimated_taxes: taxes,
            total: price.checked_add(taxes)?,
        })
    }
}

/// Started days between the two instants; `None` unless check-out is
/// strictly after check-in.
pub fn nights_between(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> Option<i64> {
    let millis = check_out.signed_duration_since(check_in).num_milliseconds();
    if millis <= 0 {
        return None;
    }
    Some((millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY)
}

/// `amount * bps / 10000`, rounded half toward positive infinity. `None`
/// when the result does not fit in an `i64`.
fn round_bps(amount: i64, bps: i64) -> Option<i64> {
    let scaled = amount as i128 * bps as i128;
    let denominator = BPS_DENOMINATOR as i128;
    i64::try_from((scaled * 2 + denominator).div_euclid(denominator * 2)).ok()
}
