// ============================================================================
// Estate API - WebSocket Transport
// File: crates/estate-api/src/ws.rs
// ============================================================================
//! `GET /ws`: JSON text frames `{"event": ..., "data": ...}` carrying
//! `joinRoom`, `sendMessage` and `receiveMessage`.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message as WsMessage, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use estate_core::gateway::{ChannelSession, InboundEvent};
use estate_core::services::ConversationGateway;
use futures::{SinkExt, StreamExt};
use tracing::{debug, error, info, warn};

use crate::state::AppState;

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let gateway = state.gateway.clone();
    let buffer = state.outbound_buffer;
    ws.on_upgrade(move |socket| run_channel(socket, gateway, buffer))
}

async fn run_channel(socket: WebSocket, gateway: Arc<ConversationGateway>, buffer: usize) {
    let (mut sink, mut frames) = socket.split();
    let (mut session, mut outbound) = ChannelSession::open(gateway, buffer);
    info!("Channel connected");

    let writer = tokio::spawn(async move {
        while let Some(event) = outbound.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(e) => {
                    error!("Failed to encode outbound event: {}", e);
                    continue;
                }
            };
            if sink.send(WsMessage::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(frame) = frames.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(e) => {
                debug!("Channel read failed: {}", e);
                break;
            }
        };

        match frame {
            WsMessage::Text(text) => match serde_json::from_str::<InboundEvent>(text.as_str()) {
                // Failures are logged by the gateway; the client gets no error frame
                Ok(event) => {
                    if let Err(e) = session.handle(event).await {
                        debug!("Channel event not applied: {}", e);
                    }
                }
                Err(e) => warn!("Ignoring malformed frame: {}", e),
            },
            WsMessage::Close(_) => break,
            _ => {}
        }
    }

    session.close();
    writer.abort();
    info!("Channel disconnected");
}
