//! # Estate Core
//!
//! Domain entities, pricing and availability calculators, repository
//! traits, and services for reservations and real-time messaging.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod gateway;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
