//! Conversations recorded from the website chat widget.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ChatMessageId, ChatSessionId, SanitizedText, VisitorId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

text_enum!(ChatRole {
    User => "user",
    Assistant => "assistant",
});

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatSession {
    pub id: ChatSessionId,
    pub visitor_id: VisitorId,
    pub started_at: NaiveDateTime,
    pub last_message_at: NaiveDateTime,
}

/// Session row for the admin overview.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatSessionSummary {
    #[serde(flatten)]
    pub session: ChatSession,
    pub message_count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatMessage {
    pub id: ChatMessageId,
    pub session_id: ChatSessionId,
    pub role: ChatRole,
    pub content: SanitizedText,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewChatMessage {
    pub session_id: ChatSessionId,
    pub role: ChatRole,
    pub content: SanitizedText,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatTranscript {
    pub session: ChatSession,
    pub messages: Vec<ChatMessage>,
}
