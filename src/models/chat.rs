use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::chat::{
    ChatMessage as DomainChatMessage, ChatSession as DomainChatSession,
    NewChatMessage as DomainNewChatMessage,
};
use crate::domain::types::{
    ChatMessageId, ChatSessionId, SanitizedText, TypeConstraintError, VisitorId,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::chat_sessions)]
pub struct ChatSession {
    pub id: i32,
    pub visitor_id: String,
    pub started_at: NaiveDateTime,
    pub last_message_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::chat_sessions)]
pub struct NewChatSession<'a> {
    pub visitor_id: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::chat_messages)]
#[diesel(belongs_to(ChatSession, foreign_key = session_id))]
pub struct ChatMessage {
    pub id: i32,
    pub session_id: i32,
    pub role: String,
    pub content: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::chat_messages)]
pub struct NewChatMessage<'a> {
    pub session_id: i32,
    pub role: &'a str,
    pub content: &'a str,
    pub created_at: NaiveDateTime,
}

impl TryFrom<ChatSession> for DomainChatSession {
    type Error = TypeConstraintError;

    fn try_from(session: ChatSession) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ChatSessionId::try_from(session.id)?,
            visitor_id: VisitorId::new(session.visitor_id)?,
            started_at: session.started_at,
            last_message_at: session.last_message_at,
        })
    }
}

impl TryFrom<ChatMessage> for DomainChatMessage {
    type Error = TypeConstraintError;

    fn try_from(message: ChatMessage) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ChatMessageId::try_from(message.id)?,
            session_id: ChatSessionId::try_from(message.session_id)?,
            role: message.role.parse()?,
            content: SanitizedText::new(message.content)?,
            created_at: message.created_at,
        })
    }
}

impl<'a> NewChatMessage<'a> {
    pub fn new(message: &'a DomainNewChatMessage, created_at: NaiveDateTime) -> Self {
        Self {
            session_id: message.session_id.get(),
            role: message.role.as_str(),
            content: message.content.as_str(),
            created_at,
        }
    }
}
