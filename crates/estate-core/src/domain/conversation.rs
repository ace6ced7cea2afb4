// ============================================================================
// Estate Core - Conversation Aggregate
// File: crates/estate-core/src/domain/conversation.rs
// Description: Two-party conversation and its append-only message log
// ============================================================================

use chrono::{DateTime, Utc};
use estate_shared::{new_id, EntityId, ExternalId};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::DomainError;

/// Unordered pair of distinct participants, stored in canonical (sorted)
/// order so that `{a, b}` and `{b, a}` compare and hash equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<ExternalId>", try_from = "Vec<ExternalId>")]
pub struct ParticipantPair {
    low: ExternalId,
    high: ExternalId,
}

impl ParticipantPair {
    pub fn new(a: &str, b: &str) -> Result<Self, DomainError> {
        let (a, b) = (a.trim(), b.trim());
        if a.is_empty() || b.is_empty() {
            return Err(DomainError::ValidationError(
                "Both participant ids are required".to_string(),
            ));
        }
        if a == b {
            return Err(DomainError::ValidationError(
                "A conversation needs two distinct participants".to_string(),
            ));
        }

        let (low, high) = if a < b { (a, b) } else { (b, a) };
        Ok(Self {
            low: low.to_string(),
            high: high.to_string(),
        })
    }

    pub fn low(&self) -> &str {
        &self.low
    }

    pub fn high(&self) -> &str {
        &self.high
    }

    /// Canonical key used for uniqueness in stores.
    pub fn key(&self) -> String {
        format!("{}:{}", self.low, self.high)
    }

    pub fn contains(&self, participant: &str) -> bool {
        self.low == participant || self.high == participant
    }
}

impl From<ParticipantPair> for Vec<ExternalId> {
    fn from(pair: ParticipantPair) -> Self {
        vec![pair.low, pair.high]
    }
}

impl TryFrom<Vec<ExternalId>> for ParticipantPair {
    type Error = DomainError;

    fn try_from(ids: Vec<ExternalId>) -> Result<Self, Self::Error> {
        match ids.as_slice() {
            [a, b] => ParticipantPair::new(a, b),
            _ => Err(DomainError::ValidationError(
                "A conversation has exactly two participants".to_string(),
            )),
        }
    }
}

/// Conversation header; messages live in their own log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: EntityId,
    pub participants: ParticipantPair,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(participants: ParticipantPair) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            participants,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A single immutable message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: EntityId,
    pub conversation_id: EntityId,
    pub sender_id: ExternalId,
    pub receiver_id: ExternalId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Stamp a validated send request with identity and server time.
    pub fn new(conversation_id: EntityId, request: &SendMessage) -> Self {
        Self {
            id: new_id(),
            conversation_id,
            sender_id: request.sender_id.trim().to_string(),
            receiver_id: request.receiver_id.trim().to_string(),
            content: request.content.clone(),
            created_at: Utc::now(),
        }
    }
}

/// Conversation together with its messages in append order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationThread {
    #[serde(flatten)]
    pub conversation: Conversation,
    pub messages: Vec<Message>,
}

/// Inbound `sendMessage` payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMessage {
    #[validate(length(min = 1, max = 128, message = "Sender id is required"))]
    pub sender_id: ExternalId,

    #[validate(length(min = 1, max = 128, message = "Receiver id is required"))]
    pub receiver_id: ExternalId,

    #[validate(length(min = 1, max = 4000, message = "Message content must be 1 to 4000 characters"))]
    pub content: String,
}

impl SendMessage {
    /// Validate the payload and derive the participant pair it addresses.
    pub fn participants(&self) -> Result<ParticipantPair, DomainError> {
        self.validate()?;
        if self.content.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Message content must not be blank".to_string(),
            ));
        }
        ParticipantPair::new(&self.sender_id, &self.receiver_id)
    }
}
