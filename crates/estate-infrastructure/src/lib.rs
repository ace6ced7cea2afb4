//! # Estate Infrastructure
//!
//! Conversation stores (PostgreSQL, in-memory) and the REST client of the
//! reservation collaborator.

pub mod database;
pub mod memory;
pub mod http;

pub use database::{create_pool, run_migrations, PgConversationRepository};
pub use memory::InMemoryConversationRepository;
pub use http::{RestClientSettings, RestReservationStore};
