//! Real-time channel: wire events, conversation rooms and per-connection
//! sessions.

pub mod events;
pub mod rooms;
pub mod session;

pub use events::{InboundEvent, OutboundEvent};
pub use rooms::RoomHub;
pub use session::{ChannelSession, ChannelState};
