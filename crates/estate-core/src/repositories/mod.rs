//! Repository traits (ports)

pub mod reservation_store;
pub mod conversation_repository;

pub use reservation_store::ReservationStore;
pub use conversation_repository::ConversationRepository;

#[cfg(test)]
pub use reservation_store::MockReservationStore;
#[cfg(test)]
pub use conversation_repository::MockConversationRepository;
