//! Application-wide constants

/// Flat fee added to every lease application.
pub const DEFAULT_APPLICATION_FEE: i64 = 50;
/// Flat cleaning fee added to every hotel stay.
pub const DEFAULT_CLEANING_FEE: i64 = 50;
/// Estimated purchase tax in basis points (5 %).
pub const DEFAULT_PURCHASE_TAX_BPS: i64 = 500;
pub const DEFAULT_CURRENCY: &str = "USD";

pub const DEFAULT_ROOM_CAPACITY: usize = 256;
pub const DEFAULT_OUTBOUND_BUFFER: usize = 64;

pub const RECENT_TRANSACTIONS: usize = 3;
pub const RECENT_BOOKINGS: usize = 2;
pub const RECENT_ALERTS: usize = 2;
pub const ACTIVITY_FEED_SIZE: usize = 5;
