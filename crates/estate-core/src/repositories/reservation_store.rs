//! Reservation collaborator trait (port)

use async_trait::async_trait;

use crate::domain::{Booking, Lease, NewBooking, NewLease, NewTransaction, Property, Transaction};
use crate::error::DomainError;

/// External service that owns properties, bookings, leases and
/// transactions. Every create call assigns the identity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn find_property(&self, id: &str) -> Result<Option<Property>, DomainError>;
    async fn list_properties(&self) -> Result<Vec<Property>, DomainError>;
    async fn list_bookings(&self) -> Result<Vec<Booking>, DomainError>;
    async fn list_leases(&self) -> Result<Vec<Lease>, DomainError>;
    async fn list_transactions(&self) -> Result<Vec<Transaction>, DomainError>;
    async fn create_booking(&self, booking: &NewBooking) -> Result<Booking, DomainError>;
    async fn create_lease(&self, lease: &NewLease) -> Result<Lease, DomainError>;
    async fn create_transaction(&self, transaction: &NewTransaction) -> Result<Transaction, DomainError>;
}
