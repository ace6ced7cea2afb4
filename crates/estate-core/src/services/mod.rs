//! Application services

pub mod availability;
pub mod price_quoter;
pub mod reservation_service;
pub mod activity_feed;
pub mod conversation_gateway;

pub use availability::{occupancy_calendar, occupancy_for_day, occupancy_rate, CalendarWindow, DayOccupancy};
pub use price_quoter::{PriceQuoter, PricingPolicy};
pub use reservation_service::ReservationSubmitter;
pub use activity_feed::recent_activity;
pub use conversation_gateway::ConversationGateway;
