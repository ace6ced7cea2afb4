//! Shared handler state

use std::sync::Arc;

use estate_core::repositories::ReservationStore;
use estate_core::services::{ConversationGateway, PriceQuoter, ReservationSubmitter};
use estate_shared::constants::DEFAULT_OUTBOUND_BUFFER;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ReservationStore>,
    pub submitter: Arc<ReservationSubmitter>,
    pub gateway: Arc<ConversationGateway>,
    /// Queue length of each WebSocket channel
    pub outbound_buffer: usize,
    /// Name of the conversation backend, reported by readiness
    pub storage_backend: &'static str,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ReservationStore>,
        submitter: Arc<ReservationSubmitter>,
        gateway: Arc<ConversationGateway>,
    ) -> Self {
        Self {
            store,
            submitter,
            gateway,
            outbound_buffer: DEFAULT_OUTBOUND_BUFFER,
            storage_backend: "memory",
        }
    }

    pub fn with_outbound_buffer(mut self, outbound_buffer: usize) -> Self {
        self.outbound_buffer = outbound_buffer;
        self
    }

    pub fn with_storage_backend(mut self, storage_backend: &'static str) -> Self {
        self.storage_backend = storage_backend;
        self
    }

    pub fn quoter(&self) -> &PriceQuoter {
        self.submitter.quoter()
    }
}
