//! Domain errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input rejected before any collaborator call was made.
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Property not found: {0}")]
    PropertyNotFound(String),

    #[error("Conversation not found: {0}")]
    ConversationNotFound(String),

    #[error("Reservation conflict: {0}")]
    ReservationConflict(String),

    /// The reservation collaborator failed or was unreachable.
    #[error("Collaborator error: {0}")]
    CollaboratorError(String),

    /// The conversation store failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Failures of a create/save call, as opposed to rejected input.
    pub fn is_persistence(&self) -> bool {
        matches!(self, DomainError::CollaboratorError(_) | DomainError::DatabaseError(_))
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
