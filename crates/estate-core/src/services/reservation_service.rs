// ============================================================================
// Estate Core - Reservation Submitter
// File: crates/estate-core/src/services/reservation_service.rs
// ============================================================================
//! Turns a quoted request into a Booking, Lease or Transaction and hands it
//! to the reservation collaborator.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::domain::{
    NewBooking, NewLease, NewTransaction, PaymentMethod, PriceBreakdown, Property, Requester,
    Reservation, ReservationInterval, ReservationMode, TransactionStatus, TransactionType,
};
use crate::error::DomainError;
use crate::repositories::ReservationStore;
use crate::services::price_quoter::PriceQuoter;

const ANONYMOUS_BUYER: &str = "Anonymous Buyer";
const UNKNOWN_OWNER: &str = "Unknown Owner";

/// Reservation submission service. Performs at most one create call per
/// submission and never retries.
pub struct ReservationSubmitter {
    store: Arc<dyn ReservationStore>,
    quoter: PriceQuoter,
    reject_overlapping: bool,
}

impl ReservationSubmitter {
    pub fn new(store: Arc<dyn ReservationStore>, quoter: PriceQuoter) -> Self {
        Self {
            store,
            quoter,
            reject_overlapping: false,
        }
    }

    /// Refuse stays overlapping a confirmed booking and leases overlapping
    /// an active lease of the same property.
    pub fn with_overlap_check(mut self, enabled: bool) -> Self {
        self.reject_overlapping = enabled;
        self
    }

    pub fn quoter(&self) -> &PriceQuoter {
        &self.quoter
    }

    /// Validate, quote and submit a reservation request
    pub async fn submit(
        &self,
        property: &Property,
        mode: ReservationMode,
        interval: &ReservationInterval,
        requester: &Requester,
    ) -> Result<Reservation, DomainError> {
        info!(
            "Reservation request: property={}, mode={}, requester={}",
            property.id,
            mode.as_str(),
            requester.id
        );

        // 1. Preconditions (no collaborator call on failure)
        let requester_id = requester.id.trim();
        if requester_id.is_empty() {
            warn!("Reservation blocked: missing requester identity");
            return Err(DomainError::ValidationError(
                "Requester identity is required".to_string(),
            ));
        }
        self.check_mode(property, mode)?;
        if mode.requires_dates() {
            let (start, end) = interval.endpoints().ok_or_else(|| {
                warn!("Reservation blocked: dates missing for property {}", property.id);
                DomainError::ValidationError("Check-in and check-out dates are required".to_string())
            })?;
            if end < start {
                warn!("Reservation blocked: inverted dates for property {}", property.id);
                return Err(DomainError::ValidationError(
                    "Check-out date must not be before check-in date".to_string(),
                ));
            }
        }

        // 2. Quote
        let quote = self.quoter.quote(property, mode, interval).ok_or_else(|| {
            warn!("Reservation blocked: no quote for property {}", property.id);
            DomainError::ValidationError("No price can be quoted for this request".to_string())
        })?;

        // 3. Build and submit the entity
        match quote {
            PriceBreakdown::Stay { check_in, check_out, subtotal, .. } => {
                if self.reject_overlapping {
                    self.ensure_stay_is_free(property, check_in, check_out).await?;
                }
                let draft = NewBooking::pending(
                    property.id.clone(),
                    requester_id.to_string(),
                    check_in,
                    check_out,
                    subtotal,
                )?;
                let booking = self
                    .store
                    .create_booking(&draft)
                    .await
                    .map_err(|e| log_submit_failure("booking", &property.id, e))?;
                info!("Booking {} submitted for property {}", booking.id, property.id);
                Ok(Reservation::Booking(booking))
            }
            PriceBreakdown::Lease { start_date, end_date, monthly_rent, .. } => {
                if self.reject_overlapping {
                    self.ensure_lease_is_free(property, start_date, end_date).await?;
                }
                let draft = NewLease::pending(
                    property.id.clone(),
                    requester_id.to_string(),
                    start_date,
                    end_date,
                    monthly_rent,
                )?;
                let lease = self
                    .store
                    .create_lease(&draft)
                    .await
                    .map_err(|e| log_submit_failure("lease", &property.id, e))?;
                info!("Lease {} submitted for property {}", lease.id, property.id);
                Ok(Reservation::Lease(lease))
            }
            PriceBreakdown::Purchase { total, .. } => {
                let owner_id = owner_of(property)?;
                let draft = NewTransaction {
                    payer_id: requester_id.to_string(),
                    payer_name: requester
                        .full_name
                        .clone()
                        .filter(|n| !n.trim().is_empty())
                        .unwrap_or_else(|| ANONYMOUS_BUYER.to_string()),
                    receiver_id: owner_id.to_string(),
                    receiver_name: property
                        .owner_name
                        .clone()
                        .unwrap_or_else(|| UNKNOWN_OWNER.to_string()),
                    property_id: property.id.clone(),
                    property_name: property.display_name().to_string(),
                    amount: total,
                    currency: self.quoter.policy().currency.clone(),
                    transaction_type: TransactionType::Deposit,
                    status: TransactionStatus::Pending,
                    date: Utc::now(),
                    payment_method: PaymentMethod::CreditCard,
                };
                let transaction = self
                    .store
                    .create_transaction(&draft)
                    .await
                    .map_err(|e| log_submit_failure("transaction", &property.id, e))?;
                info!("Deposit {} submitted for property {}", transaction.id, property.id);
                Ok(Reservation::Transaction(transaction))
            }
        }
    }

    fn check_mode(&self, property: &Property, mode: ReservationMode) -> Result<(), DomainError> {
        let listed = property.property_type.ok_or_else(|| {
            DomainError::ValidationError(format!("Property {} has no listing type", property.id))
        })?;
        if listed != mode.property_type() {
            warn!(
                "Reservation blocked: mode {} does not apply to {} property {}",
                mode.as_str(),
                listed.as_str(),
                property.id
            );
            return Err(DomainError::ValidationError(format!(
                "A {} cannot be requested for a {} property",
                mode.as_str(),
                listed.as_str()
            )));
        }
        if mode == ReservationMode::Purchase {
            owner_of(property)?;
        }
        Ok(())
    }

    async fn ensure_stay_is_free(
        &self,
        property: &Property,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let (from, to) = (check_in.date_naive(), check_out.date_naive());
        let bookings = self.store.list_bookings().await?;
        if let Some(existing) = bookings.iter().find(|b| {
            b.property_id == property.id
                && b.status == crate::domain::BookingStatus::Confirmed
                && b.overlaps_days(from, to)
        }) {
            warn!("Stay on property {} overlaps booking {}", property.id, existing.id);
            return Err(DomainError::ReservationConflict(format!(
                "Property {} is already booked between {} and {}",
                property.id,
                existing.check_in_date.date_naive(),
                existing.check_out_date.date_naive()
            )));
        }
        Ok(())
    }

    async fn ensure_lease_is_free(
        &self,
        property: &Property,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let (from, to) = (start.date_naive(), end.date_naive());
        let leases = self.store.list_leases().await?;
        if let Some(existing) = leases
            .iter()
            .find(|l| l.property_id == property.id && l.is_active() && l.overlaps_days(from, to))
        {
            warn!("Lease on property {} overlaps lease {}", property.id, existing.id);
            return Err(DomainError::ReservationConflict(format!(
                "Property {} is already leased until {}",
                property.id,
                existing.end_date.date_naive()
            )));
        }
        Ok(())
    }
}

fn owner_of(property: &Property) -> Result<&str, DomainError> {
    property
        .owner_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            warn!("Purchase blocked: property {} has no owner", property.id);
            DomainError::ValidationError("Property details are incomplete: missing owner".to_string())
        })
}

fn log_submit_failure(entity: &str, property_id: &str, e: DomainError) -> DomainError {
    error!("Failed to create {} for property {}: {}", entity, property_id, e);
    e
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Booking, BookingStatus, Lease, LeaseStatus, LeaseTerm, PropertyType, Transaction,
    };
    use crate::repositories::MockReservationStore;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn property(property_type: PropertyType) -> Property {
        Property {
            id: "p1".to_string(),
            name: Some("Harbor Loft".to_string()),
            description: None,
            owner_id: Some("owner-1".to_string()),
            owner_name: Some("Olivia Owner".to_string()),
            property_type: Some(property_type),
            status: None,
            category: None,
            sell_price: Some(200_000),
            rent_price: Some(100),
            created_at: None,
        }
    }

    fn requester() -> Requester {
        Requester {
            id: "client-1".to_string(),
            full_name: Some("Carl Client".to_string()),
        }
    }

    fn submitter(store: MockReservationStore) -> ReservationSubmitter {
        ReservationSubmitter::new(Arc::new(store), PriceQuoter::default())
    }

    fn persisted_booking(draft: &NewBooking) -> Booking {
        Booking {
            id: "b-new".to_string(),
            property_id: draft.property_id.clone(),
            client_id: draft.client_id.clone(),
            check_in_date: draft.check_in_date,
            check_out_date: draft.check_out_date,
            status: draft.status,
            total_amount: draft.total_amount,
            booked_at: draft.booked_at,
        }
    }

    #[tokio::test]
    async fn test_stay_creates_pending_booking() {
        let mut store = MockReservationStore::new();
        store
            .expect_create_booking()
            .withf(|b| {
                b.status == BookingStatus::Pending
                    && b.total_amount == 300
                    && b.client_id == "client-1"
                    && b.property_id == "p1"
            })
            .times(1)
            .returning(|b| Ok(persisted_booking(b)));

        let result = submitter(store)
            .submit(
                &property(PropertyType::Hotel),
                ReservationMode::Stay,
                &ReservationInterval::dated(at(2024, 3, 1), at(2024, 3, 4)),
                &requester(),
            )
            .await
            .unwrap();

        assert!(matches!(result, Reservation::Booking(ref b) if b.id == "b-new"));
    }

    #[tokio::test]
    async fn test_long_term_lease_ends_after_one_year() {
        let mut store = MockReservationStore::new();
        store
            .expect_create_lease()
            .withf(|l| {
                l.end_date == at(2025, 1, 10) && l.rent_amount == 100 && l.status == LeaseStatus::Pending
            })
            .times(1)
            .returning(|l| {
                Ok(Lease {
                    id: "l-new".to_string(),
                    property_id: l.property_id.clone(),
                    client_id: l.client_id.clone(),
                    start_date: l.start_date,
                    end_date: l.end_date,
                    status: l.status,
                    rent_amount: l.rent_amount,
                })
            });

        let result = submitter(store)
            .submit(
                &property(PropertyType::RentedRealEstate),
                ReservationMode::Lease { term: LeaseTerm::LongTerm },
                &ReservationInterval::dated(at(2024, 1, 10), at(2024, 1, 20)),
                &requester(),
            )
            .await
            .unwrap();

        assert_eq!(result.id(), "l-new");
    }

    #[tokio::test]
    async fn test_purchase_creates_deposit_transaction() {
        let mut store = MockReservationStore::new();
        store
            .expect_create_transaction()
            .withf(|t| {
                t.amount == 210_000
                    && t.transaction_type == TransactionType::Deposit
                    && t.status == TransactionStatus::Pending
                    && t.receiver_id == "owner-1"
                    && t.payer_name == "Carl Client"
                    && t.currency == "USD"
            })
            .times(1)
            .returning(|t| {
                Ok(Transaction {
                    id: "t-new".to_string(),
                    payer_id: t.payer_id.clone(),
                    payer_name: Some(t.payer_name.clone()),
                    receiver_id: t.receiver_id.clone(),
                    receiver_name: Some(t.receiver_name.clone()),
                    property_id: t.property_id.clone(),
                    property_name: Some(t.property_name.clone()),
                    amount: t.amount,
                    currency: t.currency.clone(),
                    transaction_type: t.transaction_type,
                    status: t.status,
                    date: t.date,
                    payment_method: t.payment_method,
                })
            });

        let result = submitter(store)
            .submit(
                &property(PropertyType::RealEstate),
                ReservationMode::Purchase,
                &ReservationInterval::default(),
                &requester(),
            )
            .await
            .unwrap();

        assert!(matches!(result, Reservation::Transaction(_)));
    }

    #[tokio::test]
    async fn test_missing_dates_block_without_network_call() {
        // No expectations: any store call panics
        let store = MockReservationStore::new();
        let result = submitter(store)
            .submit(
                &property(PropertyType::Hotel),
                ReservationMode::Stay,
                &ReservationInterval::new(Some(at(2024, 3, 1)), None),
                &requester(),
            )
            .await;

        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_same_day_stay_is_blocked() {
        let store = MockReservationStore::new();
        let result = submitter(store)
            .submit(
                &property(PropertyType::Hotel),
                ReservationMode::Stay,
                &ReservationInterval::dated(at(2024, 3, 1), at(2024, 3, 1)),
                &requester(),
            )
            .await;

        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_missing_requester_is_blocked() {
        let store = MockReservationStore::new();
        let anonymous = Requester { id: "  ".to_string(), full_name: None };
        let result = submitter(store)
            .submit(
                &property(PropertyType::RealEstate),
                ReservationMode::Purchase,
                &ReservationInterval::default(),
                &anonymous,
            )
            .await;

        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_purchase_without_owner_is_blocked() {
        let store = MockReservationStore::new();
        let mut ownerless = property(PropertyType::RealEstate);
        ownerless.owner_id = None;

        let result = submitter(store)
            .submit(&ownerless, ReservationMode::Purchase, &ReservationInterval::default(), &requester())
            .await;

        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_mode_must_match_listing() {
        let store = MockReservationStore::new();
        let result = submitter(store)
            .submit(
                &property(PropertyType::Hotel),
                ReservationMode::Purchase,
                &ReservationInterval::default(),
                &requester(),
            )
            .await;

        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_persistence_failure_is_surfaced_once() {
        let mut store = MockReservationStore::new();
        store
            .expect_create_booking()
            .times(1)
            .returning(|_| Err(DomainError::CollaboratorError("503 Service Unavailable".to_string())));

        let result = submitter(store)
            .submit(
                &property(PropertyType::Hotel),
                ReservationMode::Stay,
                &ReservationInterval::dated(at(2024, 3, 1), at(2024, 3, 4)),
                &requester(),
            )
            .await;

        assert!(matches!(result, Err(ref e) if e.is_persistence()));
    }

    #[tokio::test]
    async fn test_overlap_check_rejects_confirmed_conflict() {
        let mut store = MockReservationStore::new();
        store.expect_list_bookings().times(1).returning(|| {
            Ok(vec![Booking {
                id: "b-old".to_string(),
                property_id: "p1".to_string(),
                client_id: "someone".to_string(),
                check_in_date: at(2024, 3, 3),
                check_out_date: at(2024, 3, 6),
                status: BookingStatus::Confirmed,
                total_amount: 350,
                booked_at: at(2024, 2, 1),
            }])
        });
        store.expect_create_booking().never();

        let result = ReservationSubmitter::new(Arc::new(store), PriceQuoter::default())
            .with_overlap_check(true)
            .submit(
                &property(PropertyType::Hotel),
                ReservationMode::Stay,
                &ReservationInterval::dated(at(2024, 3, 1), at(2024, 3, 4)),
                &requester(),
            )
            .await;

        assert!(matches!(result, Err(DomainError::ReservationConflict(_))));
    }

    #[tokio::test]
    async fn test_overlap_check_fails_closed_when_bookings_are_unavailable() {
        let mut store = MockReservationStore::new();
        store
            .expect_list_bookings()
            .times(1)
            .returning(|| Err(DomainError::CollaboratorError("Collection bookings not found (404)".to_string())));
        store.expect_create_booking().never();

        let result = ReservationSubmitter::new(Arc::new(store), PriceQuoter::default())
            .with_overlap_check(true)
            .submit(
                &property(PropertyType::Hotel),
                ReservationMode::Stay,
                &ReservationInterval::dated(at(2024, 3, 1), at(2024, 3, 4)),
                &requester(),
            )
            .await;

        assert!(matches!(result, Err(DomainError::CollaboratorError(_))));
    }

    #[tokio::test]
    async fn test_overlap_check_ignores_pending_and_other_properties() {
        let mut store = MockReservationStore::new();
        store.expect_list_bookings().times(1).returning(|| {
            Ok(vec![
                Booking {
                    id: "pending".to_string(),
                    property_id: "p1".to_string(),
                    client_id: "someone".to_string(),
                    check_in_date: at(2024, 3, 1),
                    check_out_date: at(2024, 3, 4),
                    status: BookingStatus::Pending,
                    total_amount: 0,
                    booked_at: at(2024, 2, 1),
                },
                Booking {
                    id: "elsewhere".to_string(),
                    property_id: "p2".to_string(),
                    client_id: "someone".to_string(),
                    check_in_date: at(2024, 3, 1),
                    check_out_date: at(2024, 3, 4),
                    status: BookingStatus::Confirmed,
                    total_amount: 0,
                    booked_at: at(2024, 2, 1),
                },
            ])
        });
        store
            .expect_create_booking()
            .times(1)
            .returning(|b| Ok(persisted_booking(b)));

        let result = ReservationSubmitter::new(Arc::new(store), PriceQuoter::default())
            .with_overlap_check(true)
            .submit(
                &property(PropertyType::Hotel),
                ReservationMode::Stay,
                &ReservationInterval::dated(at(2024, 3, 1), at(2024, 3, 4)),
                &requester(),
            )
            .await;

        assert!(result.is_ok());
    }
}
