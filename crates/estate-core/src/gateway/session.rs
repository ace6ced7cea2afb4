// ============================================================================
// Estate Core - Channel Session
// File: crates/estate-core/src/gateway/session.rs
// Description: Per-connection state machine of the real-time channel
// ============================================================================

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use estate_shared::utils::parse_entity_id;
use estate_shared::EntityId;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::DomainError;
use crate::gateway::events::{InboundEvent, OutboundEvent};
use crate::services::ConversationGateway;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelState {
    Connected,
    Joined(BTreeSet<EntityId>),
    Disconnected,
}

/// One connected client. Room messages are forwarded into the outbound
/// queue returned by [`ChannelSession::open`].
pub struct ChannelSession {
    gateway: Arc<ConversationGateway>,
    state: ChannelState,
    outbound: mpsc::Sender<OutboundEvent>,
    forwarders: HashMap<EntityId, JoinHandle<()>>,
}

impl ChannelSession {
    pub fn open(gateway: Arc<ConversationGateway>, buffer: usize) -> (Self, mpsc::Receiver<OutboundEvent>) {
        let (outbound, rx) = mpsc::channel(buffer.max(1));
        let session = Self {
            gateway,
            state: ChannelState::Connected,
            outbound,
            forwarders: HashMap::new(),
        };
        (session, rx)
    }

    pub fn state(&self) -> &ChannelState {
        &self.state
    }

    pub async fn handle(&mut self, event: InboundEvent) -> Result<(), DomainError> {
        if self.state == ChannelState::Disconnected {
            return Err(DomainError::InternalError("Channel is closed".to_string()));
        }

        match event {
            InboundEvent::JoinRoom(room) => self.join(&room),
            // Membership is not required to send
            InboundEvent::SendMessage(request) => self.gateway.send_message(request).await.map(|_| ()),
        }
    }

    /// Subscribe to a conversation room. Joining twice is a no-op.
    pub fn join(&mut self, room: &str) -> Result<(), DomainError> {
        let room_id = parse_entity_id(room.trim()).ok_or_else(|| {
            DomainError::ValidationError(format!("Invalid conversation id: {}", room))
        })?;
        if self.forwarders.contains_key(&room_id) {
            return Ok(());
        }

        let mut messages = self.gateway.join_room(room_id);
        let outbound = self.outbound.clone();
        let handle = tokio::spawn(async move {
            loop {
                match messages.recv().await {
                    Ok(message) => {
                        if outbound.send(OutboundEvent::ReceiveMessage(message)).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("Channel lagging in room {}, {} message(s) dropped", room_id, skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            debug!("Forwarder for room {} stopped", room_id);
        });
        self.forwarders.insert(room_id, handle);

        match &mut self.state {
            ChannelState::Joined(rooms) => {
                rooms.insert(room_id);
            }
            state => *state = ChannelState::Joined(BTreeSet::from([room_id])),
        }
        debug!("Channel joined room {}", room_id);
        Ok(())
    }

    pub fn close(&mut self) {
        for (_, handle) in self.forwarders.drain() {
            handle.abort();
        }
        self.state = ChannelState::Disconnected;
    }
}

impl Drop for ChannelSession {
    fn drop(&mut self) {
        for handle in self.forwarders.values() {
            handle.abort();
        }
    }
}
