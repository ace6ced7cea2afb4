//! # Estate API
//!
//! HTTP handlers, DTOs, response envelope, error mapping, the WebSocket
//! transport of the conversation gateway, and the router.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod state;
pub mod ws;

pub use error::ApiError;
pub use response::ApiResponse;
pub use router::build_router;
pub use state::AppState;
