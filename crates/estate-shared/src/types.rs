//! Common types

use uuid::Uuid;

/// Identity generated by this service (conversations, messages).
pub type EntityId = Uuid;

/// Identity owned by the reservation collaborator (users, properties,
/// bookings, leases, transactions). Opaque to this service.
pub type ExternalId = String;

pub fn new_id() -> EntityId {
    Uuid::new_v4()
}
