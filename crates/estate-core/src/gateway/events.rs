//! Wire events of the real-time channel

use serde::{Deserialize, Serialize};

use crate::domain::{Message, SendMessage};

/// Frames a client may send
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum InboundEvent {
    /// Conversation id to subscribe to
    JoinRoom(String),
    SendMessage(SendMessage),
}

/// Frames pushed to a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum OutboundEvent {
    ReceiveMessage(Message),
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_shared::new_id;

    #[test]
    fn test_parse_join_room() {
        let event: InboundEvent =
            serde_json::from_str(r#"{"event":"joinRoom","data":"6f1c2a4e-0000-4000-8000-000000000001"}"#).unwrap();
        assert!(matches!(event, InboundEvent::JoinRoom(ref id) if id.starts_with("6f1c2a4e")));
    }

    #[test]
    fn test_parse_send_message() {
        let raw = r#"{"event":"sendMessage","data":{"senderId":"alice","receiverId":"bob","content":"hi"}}"#;
        match serde_json::from_str::<InboundEvent>(raw).unwrap() {
            InboundEvent::SendMessage(send) => {
                assert_eq!(send.sender_id, "alice");
                assert_eq!(send.receiver_id, "bob");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        assert!(serde_json::from_str::<InboundEvent>(r#"{"event":"leaveRoom","data":"x"}"#).is_err());
    }

    #[test]
    fn test_receive_message_frame() {
        let message = Message::new(
            new_id(),
            &SendMessage {
                sender_id: "alice".to_string(),
                receiver_id: "bob".to_string(),
                content: "hi".to_string(),
            },
        );
        let json = serde_json::to_value(OutboundEvent::ReceiveMessage(message)).unwrap();
        assert_eq!(json["event"], "receiveMessage");
        assert_eq!(json["data"]["senderId"], "alice");
    }
}
