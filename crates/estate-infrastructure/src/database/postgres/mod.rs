//! PostgreSQL repository implementations

pub mod conversation_repo_impl;

pub use conversation_repo_impl::PgConversationRepository;
