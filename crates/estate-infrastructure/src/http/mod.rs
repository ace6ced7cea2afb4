//! HTTP adapters

pub mod reservation_client;

pub use reservation_client::{RestClientSettings, RestReservationStore};
