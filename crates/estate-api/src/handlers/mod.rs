//! HTTP handlers

pub mod health;
pub mod quotes;
pub mod reservations;
pub mod occupancy;
pub mod activity;
pub mod conversations;
