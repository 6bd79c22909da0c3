use serde::Deserialize;
use validator::Validate;

use crate::domain::chat::{ChatRole, NewChatMessage};
use crate::domain::types::{ChatSessionId, SanitizedText, VisitorId};
use crate::forms::{FormError, parse_field};

#[derive(Debug, Deserialize, Validate)]
pub struct StartChatForm {
    #[validate(length(min = 1, max = 100))]
    pub visitor_id: String,
}

impl TryFrom<StartChatForm> for VisitorId {
    type Error = FormError;

    fn try_from(form: StartChatForm) -> Result<Self, Self::Error> {
        form.validate()?;
        parse_field("visitor_id", || VisitorId::new(form.visitor_id))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChatMessageForm {
    pub role: ChatRole,
    #[validate(length(min = 1, max = 10000))]
    pub content: String,
}

impl ChatMessageForm {
    pub fn into_message(self, session_id: ChatSessionId) -> Result<NewChatMessage, FormError> {
        self.validate()?;
        Ok(NewChatMessage {
            session_id,
            role: self.role,
            content: parse_field("content", || SanitizedText::new(self.content))?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatListParams {
    pub page: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_bound_to_session() {
        let form: ChatMessageForm =
            serde_json::from_str(r#"{"role":"assistant","content":"Hoi! Waarmee kan ik helpen?"}"#)
                .unwrap();
        let session_id = ChatSessionId::new(9).unwrap();
        let message = form.into_message(session_id).unwrap();
        assert_eq!(message.session_id, session_id);
        assert_eq!(message.role, ChatRole::Assistant);
    }

    #[test]
    fn blank_visitor_is_rejected() {
        let form = StartChatForm {
            visitor_id: "   ".into(),
        };
        assert!(VisitorId::try_from(form).is_err());
    }
}
