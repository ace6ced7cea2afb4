//! Conversation rooms: one bounded broadcast channel per conversation id

use dashmap::DashMap;
use estate_shared::EntityId;
use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::Message;

pub struct RoomHub {
    rooms: DashMap<EntityId, broadcast::Sender<Message>>,
    capacity: usize,
}

impl RoomHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            rooms: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Subscribe to a room, opening it on first use.
    pub fn subscribe(&self, room: EntityId) -> broadcast::Receiver<Message> {
        self.rooms
            .entry(room)
            .or_insert_with(|| {
                debug!("Opening room {}", room);
                broadcast::channel(self.capacity).0
            })
            .subscribe()
    }

    /// Deliver `message` to every subscriber of its conversation room and
    /// return how many received it. A room nobody listens to is closed.
    pub fn publish(&self, message: &Message) -> usize {
        let room = message.conversation_id;
        let sent = match self.rooms.get(&room) {
            Some(tx) => tx.send(message.clone()),
            None => return 0,
        };

        match sent {
            Ok(receivers) => receivers,
            Err(_) => {
                self.rooms.remove_if(&room, |_, tx| tx.receiver_count() == 0);
                debug!("Room {} has no listeners, closed", room);
                0
            }
        }
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Drop rooms whose subscribers have all gone away.
    pub fn prune_idle(&self) -> usize {
        let before = self.rooms.len();
        self.rooms.retain(|_, tx| tx.receiver_count() > 0);
        before.saturating_sub(self.rooms.len())
    }
}

impl Default for RoomHub {
    fn default() -> Self {
        Self::new(estate_shared::constants::DEFAULT_ROOM_CAPACITY)
    }
}
