//! # Estate Core - Domain Module
//!
//! Domain entities for reservations and messaging.

pub mod property;
pub mod booking;
pub mod lease;
pub mod transaction;
pub mod reservation;
pub mod quote;
pub mod conversation;
pub mod activity;

// Re-export all entities and enums
pub use property::{Property, PropertyStatus, PropertyType};
pub use booking::{Booking, BookingStatus, NewBooking};
pub use lease::{Lease, LeaseStatus, LeaseTerm, NewLease};
pub use transaction::{NewTransaction, PaymentMethod, Transaction, TransactionStatus, TransactionType};
pub use reservation::{Requester, Reservation, ReservationInterval, ReservationMode};
pub use quote::PriceBreakdown;
pub use conversation::{Conversation, ConversationThread, Message, ParticipantPair, SendMessage};
pub use activity::{ActivityItem, ActivityKind};
