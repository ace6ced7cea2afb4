// ============================================================================
// Estate Core - Conversation Gateway
// File: crates/estate-core/src/services/conversation_gateway.rs
// ============================================================================
//! Persists direct messages and fans them out to the conversation room.

use std::sync::Arc;

use estate_shared::EntityId;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::domain::{Conversation, ConversationThread, Message, ParticipantPair, SendMessage};
use crate::error::DomainError;
use crate::gateway::RoomHub;
use crate::repositories::ConversationRepository;

pub struct ConversationGateway {
    repo: Arc<dyn ConversationRepository>,
    rooms: Arc<RoomHub>,
}

impl ConversationGateway {
    pub fn new(repo: Arc<dyn ConversationRepository>, rooms: Arc<RoomHub>) -> Self {
        Self { repo, rooms }
    }

    pub fn rooms(&self) -> &RoomHub {
        &self.rooms
    }

    /// Subscribe to messages of one conversation. The conversation need not
    /// exist yet.
    pub fn join_room(&self, conversation_id: EntityId) -> broadcast::Receiver<Message> {
        debug!("Joining room {}", conversation_id);
        self.rooms.subscribe(conversation_id)
    }

    /// Store a message in the conversation of its two participants and
    /// broadcast it to the room. Nothing is broadcast unless both the
    /// upsert and the append succeed.
    pub async fn send_message(&self, request: SendMessage) -> Result<Message, DomainError> {
        let pair = request.participants().map_err(|e| {
            warn!("Rejected message from {}: {}", request.sender_id, e);
            e
        })?;

        let conversation = self.repo.upsert_by_participants(&pair).await.map_err(|e| {
            error!("Failed to open conversation {}: {}", pair.key(), e);
            e
        })?;

        let message = Message::new(conversation.id, &request);
        let stored = self.repo.append_message(&message).await.map_err(|e| {
            error!("Failed to store message in conversation {}: {}", conversation.id, e);
            e
        })?;

        let delivered = self.rooms.publish(&stored);
        info!(
            "Message {} stored in conversation {} and delivered to {} listener(s)",
            stored.id, stored.conversation_id, delivered
        );
        Ok(stored)
    }

    /// Conversation with every message in append order
    pub async fn thread(&self, conversation_id: &EntityId) -> Result<ConversationThread, DomainError> {
        self.repo
            .find_by_id(conversation_id)
            .await?
            .ok_or_else(|| DomainError::ConversationNotFound(conversation_id.to_string()))
    }

    pub async fn conversations_for(&self, participant_id: &str) -> Result<Vec<Conversation>, DomainError> {
        let participant_id = participant_id.trim();
        if participant_id.is_empty() {
            return Err(DomainError::ValidationError("participantId is required".to_string()));
        }
        self.repo.list_for_participant(participant_id).await
    }

    /// The conversation of two participants, if they have ever talked.
    pub async fn conversation_between(&self, a: &str, b: &str) -> Result<Option<Conversation>, DomainError> {
        let pair = ParticipantPair::new(a, b)?;
        self.repo.find_by_participants(&pair).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockConversationRepository;
    use mockall::Sequence;

    fn send(sender: &str, receiver: &str, content: &str) -> SendMessage {
        SendMessage {
            sender_id: sender.to_string(),
            receiver_id: receiver.to_string(),
            content: content.to_string(),
        }
    }

    fn gateway(repo: MockConversationRepository) -> ConversationGateway {
        ConversationGateway::new(Arc::new(repo), Arc::new(RoomHub::new(16)))
    }

    #[tokio::test]
    async fn test_sequential_sends_share_one_conversation() {
        let conversation = Conversation::new(ParticipantPair::new("alice", "bob").unwrap());
        let conversation_id = conversation.id;

        let mut repo = MockConversationRepository::new();
        let mut seq = Sequence::new();
        repo.expect_upsert_by_participants()
            .withf(|pair| pair.low() == "alice" && pair.high() == "bob")
            .times(2)
            .returning(move |_| Ok(conversation.clone()));
        repo.expect_append_message()
            .withf(|m| m.content == "first")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|m| Ok(m.clone()));
        repo.expect_append_message()
            .withf(|m| m.content == "second")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|m| Ok(m.clone()));

        let gateway = gateway(repo);
        let mut room = gateway.join_room(conversation_id);

        let first = gateway.send_message(send("alice", "bob", "first")).await.unwrap();
        let second = gateway.send_message(send("bob", "alice", "second")).await.unwrap();

        assert_eq!(first.conversation_id, conversation_id);
        assert_eq!(second.conversation_id, conversation_id);
        assert_eq!(room.recv().await.unwrap().content, "first");
        assert_eq!(room.recv().await.unwrap().content, "second");
    }

    #[tokio::test]
    async fn test_failed_append_is_not_broadcast() {
        let conversation = Conversation::new(ParticipantPair::new("alice", "bob").unwrap());
        let conversation_id = conversation.id;

        let mut repo = MockConversationRepository::new();
        repo.expect_upsert_by_participants()
            .returning(move |_| Ok(conversation.clone()));
        repo.expect_append_message()
            .times(1)
            .returning(|_| Err(DomainError::DatabaseError("connection reset".to_string())));

        let gateway = gateway(repo);
        let mut room = gateway.join_room(conversation_id);

        let result = gateway.send_message(send("alice", "bob", "lost")).await;
        assert!(matches!(result, Err(DomainError::DatabaseError(_))));
        assert!(room.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_failed_upsert_skips_append() {
        let mut repo = MockConversationRepository::new();
        repo.expect_upsert_by_participants()
            .times(1)
            .returning(|_| Err(DomainError::DatabaseError("timeout".to_string())));
        repo.expect_append_message().never();

        let result = gateway(repo).send_message(send("alice", "bob", "hi")).await;
        assert!(matches!(result, Err(ref e) if e.is_persistence()));
    }

    #[tokio::test]
    async fn test_invalid_send_touches_nothing() {
        let mut repo = MockConversationRepository::new();
        repo.expect_upsert_by_participants().never();
        repo.expect_append_message().never();
        let gateway = gateway(repo);

        assert!(matches!(
            gateway.send_message(send("alice", "bob", "")).await,
            Err(DomainError::ValidationError(_))
        ));
        assert!(matches!(
            gateway.send_message(send("alice", "alice", "echo")).await,
            Err(DomainError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_thread_not_found() {
        let mut repo = MockConversationRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let result = gateway(repo).thread(&estate_shared::new_id()).await;
        assert!(matches!(result, Err(DomainError::ConversationNotFound(_))));
    }

    #[tokio::test]
    async fn test_conversations_for_requires_participant() {
        let mut repo = MockConversationRepository::new();
        repo.expect_list_for_participant().never();

        let result = gateway(repo).conversations_for("  ").await;
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }
}
