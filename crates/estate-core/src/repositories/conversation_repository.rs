//! Conversation repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Conversation, ConversationThread, Message, ParticipantPair};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Return the conversation for `pair`, creating it if absent, as one
    /// atomic operation. Implementations keep at most one conversation per
    /// canonical pair.
    async fn upsert_by_participants(&self, pair: &ParticipantPair) -> Result<Conversation, DomainError>;

    /// Append to the conversation's message log without rewriting earlier
    /// messages. Fails with `ConversationNotFound` for an unknown id.
    async fn append_message(&self, message: &Message) -> Result<Message, DomainError>;

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<ConversationThread>, DomainError>;

    async fn find_by_participants(&self, pair: &ParticipantPair) -> Result<Option<Conversation>, DomainError>;

    /// Conversations the participant belongs to, most recently active first.
    async fn list_for_participant(&self, participant_id: &str) -> Result<Vec<Conversation>, DomainError>;
}
