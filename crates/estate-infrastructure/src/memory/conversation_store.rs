//! In-process conversation store for development and tests

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use estate_core::domain::{Conversation, ConversationThread, Message, ParticipantPair};
use estate_core::error::DomainError;
use estate_core::repositories::ConversationRepository;

/// Thread-safe conversation store.
/// The pair index is claimed through a single `entry` call, so concurrent
/// first messages between the same two users create one conversation.
#[derive(Clone, Default)]
pub struct InMemoryConversationRepository {
    /// Canonical pair key -> conversation id
    by_pair: Arc<DashMap<String, Uuid>>,
    /// Conversation id -> header and message log
    threads: Arc<DashMap<Uuid, Arc<Mutex<ConversationThread>>>>,
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        info!("Initializing in-memory conversation store");
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    fn thread(&self, id: &Uuid) -> Option<Arc<Mutex<ConversationThread>>> {
        self.threads.get(id).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn upsert_by_participants(&self, pair: &ParticipantPair) -> Result<Conversation, DomainError> {
        let id = *self.by_pair.entry(pair.key()).or_insert_with(|| {
            let conversation = Conversation::new(pair.clone());
            let id = conversation.id;
            self.threads.insert(
                id,
                Arc::new(Mutex::new(ConversationThread {
                    conversation,
                    messages: Vec::new(),
                })),
            );
            debug!("Created conversation {} for {}", id, pair.key());
            id
        });

        self.thread(&id)
            .map(|thread| thread.lock().conversation.clone())
            .ok_or_else(|| DomainError::InternalError(format!("Conversation index out of sync for {}", pair.key())))
    }

    async fn append_message(&self, message: &Message) -> Result<Message, DomainError> {
        let thread = self
            .thread(&message.conversation_id)
            .ok_or_else(|| DomainError::ConversationNotFound(message.conversation_id.to_string()))?;

        let mut thread = thread.lock();
        thread.messages.push(message.clone());
        if message.created_at > thread.conversation.updated_at {
            thread.conversation.updated_at = message.created_at;
        }
        Ok(message.clone())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<ConversationThread>, DomainError> {
        Ok(self.thread(id).map(|thread| thread.lock().clone()))
    }

    async fn find_by_participants(&self, pair: &ParticipantPair) -> Result<Option<Conversation>, DomainError> {
        let Some(id) = self.by_pair.get(&pair.key()).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        Ok(self.thread(&id).map(|thread| thread.lock().conversation.clone()))
    }

    async fn list_for_participant(&self, participant_id: &str) -> Result<Vec<Conversation>, DomainError> {
        let mut conversations: Vec<Conversation> = self
            .threads
            .iter()
            .map(|entry| entry.value().lock().conversation.clone())
            .filter(|c| c.participants.contains(participant_id))
            .collect();
        conversations.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(conversations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_core::domain::SendMessage;

    fn pair(a: &str, b: &str) -> ParticipantPair {
        ParticipantPair::new(a, b).unwrap()
    }

    fn message(conversation_id: Uuid, content: &str) -> Message {
        Message::new(
            conversation_id,
            &SendMessage {
                sender_id: "alice".to_string(),
                receiver_id: "bob".to_string(),
                content: content.to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_upsert_is_keyed_by_unordered_pair() {
        let repo = InMemoryConversationRepository::new();
        let first = repo.upsert_by_participants(&pair("alice", "bob")).await.unwrap();
        let second = repo.upsert_by_participants(&pair("bob", "alice")).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_upserts_create_one_conversation() {
        let repo = InMemoryConversationRepository::new();
        let mut handles = Vec::new();
        for i in 0..16 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                let p = if i % 2 == 0 { pair("alice", "bob") } else { pair("bob", "alice") };
                repo.upsert_by_participants(&p).await.unwrap().id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.dedup();
        assert_eq!(ids.len(), 1);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_append_keeps_order() {
        let repo = InMemoryConversationRepository::new();
        let conversation = repo.upsert_by_participants(&pair("alice", "bob")).await.unwrap();

        repo.append_message(&message(conversation.id, "one")).await.unwrap();
        repo.append_message(&message(conversation.id, "two")).await.unwrap();

        let thread = repo.find_by_id(&conversation.id).await.unwrap().unwrap();
        let contents: Vec<&str> = thread.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["one", "two"]);
        assert!(thread.conversation.updated_at >= conversation.updated_at);
    }

    #[tokio::test]
    async fn test_append_to_unknown_conversation() {
        let repo = InMemoryConversationRepository::new();
        let result = repo.append_message(&message(Uuid::new_v4(), "orphan")).await;
        assert!(matches!(result, Err(DomainError::ConversationNotFound(_))));
    }

    #[tokio::test]
    async fn test_lookup_and_listing() {
        let repo = InMemoryConversationRepository::new();
        let older = repo.upsert_by_participants(&pair("alice", "bob")).await.unwrap();
        let newer = repo.upsert_by_participants(&pair("alice", "carol")).await.unwrap();
        repo.upsert_by_participants(&pair("bob", "carol")).await.unwrap();

        let mut latest = message(older.id, "bump");
        latest.created_at = newer.updated_at + chrono::Duration::seconds(5);
        repo.append_message(&latest).await.unwrap();

        let listed = repo.list_for_participant("alice").await.unwrap();
        let ids: Vec<Uuid> = listed.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![older.id, newer.id]);

        let found = repo.find_by_participants(&pair("carol", "alice")).await.unwrap();
        assert_eq!(found.map(|c| c.id), Some(newer.id));
        assert!(repo.find_by_participants(&pair("alice", "dave")).await.unwrap().is_none());
    }
}
