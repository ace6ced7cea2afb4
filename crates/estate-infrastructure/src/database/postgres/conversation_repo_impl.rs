// ============================================================================
// Estate Infrastructure - PostgreSQL Conversation Repository
// File: crates/estate-infrastructure/src/database/postgres/conversation_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{debug, error};
use uuid::Uuid;

use estate_core::domain::{Conversation, ConversationThread, Message, ParticipantPair};
use estate_core::error::DomainError;
use estate_core::repositories::ConversationRepository;

pub struct PgConversationRepository {
    pool: PgPool,
}

impl PgConversationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row types for SQLx mapping
#[derive(Debug, FromRow)]
struct ConversationRow {
    pub id: Uuid,
    pub participant_low: String,
    pub participant_high: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ConversationRow> for Conversation {
    type Error = DomainError;

    fn try_from(row: ConversationRow) -> Result<Self, Self::Error> {
        let participants = ParticipantPair::new(&row.participant_low, &row.participant_high)
            .map_err(|e| DomainError::DatabaseError(format!("Corrupt conversation {}: {}", row.id, e)))?;
        Ok(Conversation {
            id: row.id,
            participants,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct MessageRow {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender_id: String,
    pub receiver_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Message {
            id: row.id,
            conversation_id: row.conversation_id,
            sender_id: row.sender_id,
            receiver_id: row.receiver_id,
            content: row.content,
            created_at: row.created_at,
        }
    }
}

fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e: sqlx::Error| {
        error!("Database error {}: {}", context, e);
        DomainError::DatabaseError(e.to_string())
    }
}

#[async_trait]
impl ConversationRepository for PgConversationRepository {
    async fn upsert_by_participants(&self, pair: &ParticipantPair) -> Result<Conversation, DomainError> {
        // The no-op update makes RETURNING yield the existing row on conflict
        let row: ConversationRow = sqlx::query_as(
            r#"
            INSERT INTO conversations (id, participant_low, participant_high, created_at, updated_at)
            VALUES ($1, $2, $3, NOW(), NOW())
            ON CONFLICT (participant_low, participant_high)
            DO UPDATE SET participant_low = EXCLUDED.participant_low
            RETURNING id, participant_low, participant_high, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(pair.low())
        .bind(pair.high())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("upserting conversation"))?;

        debug!("Conversation {} resolved for {}", row.id, pair.key());
        row.try_into()
    }

    async fn append_message(&self, message: &Message) -> Result<Message, DomainError> {
        let row: Option<MessageRow> = sqlx::query_as(
            r#"
            WITH touched AS (
                UPDATE conversations
                SET updated_at = GREATEST(updated_at, $6)
                WHERE id = $2
                RETURNING id
            )
            INSERT INTO conversation_messages (id, conversation_id, sender_id, receiver_id, content, created_at)
            SELECT $1, touched.id, $3, $4, $5, $6 FROM touched
            RETURNING id, conversation_id, sender_id, receiver_id, content, created_at
            "#,
        )
        .bind(message.id)
        .bind(message.conversation_id)
        .bind(&message.sender_id)
        .bind(&message.receiver_id)
        .bind(&message.content)
        .bind(message.created_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("appending message"))?;

        row.map(Message::from)
            .ok_or_else(|| DomainError::ConversationNotFound(message.conversation_id.to_string()))
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<ConversationThread>, DomainError> {
        let row: Option<ConversationRow> = sqlx::query_as(
            r#"
            SELECT id, participant_low, participant_high, created_at, updated_at
            FROM conversations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding conversation by id"))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let messages: Vec<MessageRow> = sqlx::query_as(
            r#"
            SELECT id, conversation_id, sender_id, receiver_id, content, created_at
            FROM conversation_messages
            WHERE conversation_id = $1
            ORDER BY seq ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("loading conversation messages"))?;

        Ok(Some(ConversationThread {
            conversation: row.try_into()?,
            messages: messages.into_iter().map(Message::from).collect(),
        }))
    }

    async fn find_by_participants(&self, pair: &ParticipantPair) -> Result<Option<Conversation>, DomainError> {
        let row: Option<ConversationRow> = sqlx::query_as(
            r#"
            SELECT id, participant_low, participant_high, created_at, updated_at
            FROM conversations
            WHERE participant_low = $1 AND participant_high = $2
            "#,
        )
        .bind(pair.low())
        .bind(pair.high())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding conversation by participants"))?;

        row.map(Conversation::try_from).transpose()
    }

    async fn list_for_participant(&self, participant_id: &str) -> Result<Vec<Conversation>, DomainError> {
        let rows: Vec<ConversationRow> = sqlx::query_as(
            r#"
            SELECT id, participant_low, participant_high, created_at, updated_at
            FROM conversations
            WHERE participant_low = $1 OR participant_high = $1
            ORDER BY updated_at DESC, created_at DESC
            "#,
        )
        .bind(participant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing conversations"))?;

        rows.into_iter().map(Conversation::try_from).collect()
    }
}
