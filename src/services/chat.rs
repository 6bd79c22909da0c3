use crate::domain::chat::{ChatMessage, ChatSession, ChatSessionSummary, ChatTranscript};
use crate::domain::types::{ChatSessionId, VisitorId};
use crate::forms::chat::{ChatListParams, ChatMessageForm, StartChatForm};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{ChatReader, ChatWriter, Pagination};
use crate::services::{ServiceError, ServiceResult};

pub fn start_session<R>(repo: &R, form: StartChatForm) -> ServiceResult<ChatSession>
where
    R: ChatWriter + ?Sized,
{
    let visitor_id = VisitorId::try_from(form)?;
    repo.create_chat_session(&visitor_id).map_err(|err| {
        log::error!("Failed to start chat session: {err}");
        ServiceError::from(err)
    })
}

/// Appends a message to an existing session.
pub fn append_message<R>(
    repo: &R,
    session_id: i32,
    form: ChatMessageForm,
) -> ServiceResult<ChatMessage>
where
    R: ChatReader + ChatWriter + ?Sized,
{
    let session_id = ChatSessionId::new(session_id)?;
    if repo.get_chat_session(session_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let message = form.into_message(session_id)?;
    repo.append_chat_message(&message).map_err(|err| {
        log::error!("Failed to store chat message for session {session_id}: {err}");
        ServiceError::from(err)
    })
}

/// Sessions with the most recent activity first.
pub fn list_sessions<R>(
    repo: &R,
    params: ChatListParams,
) -> ServiceResult<Paginated<ChatSessionSummary>>
where
    R: ChatReader + ?Sized,
{
    let page = params.page.unwrap_or(1).max(1);
    let pagination = Pagination {
        page,
        per_page: DEFAULT_ITEMS_PER_PAGE,
    };

    let (total, sessions) = repo.list_chat_sessions(Some(pagination)).map_err(|err| {
        log::error!("Failed to list chat sessions: {err}");
        err
    })?;

    Ok(Paginated::new(sessions, total, page, DEFAULT_ITEMS_PER_PAGE))
}

pub fn get_transcript<R>(repo: &R, session_id: i32) -> ServiceResult<ChatTranscript>
where
    R: ChatReader + ?Sized,
{
    let session_id = ChatSessionId::new(session_id)?;
    let session = repo
        .get_chat_session(session_id)?
        .ok_or(ServiceError::NotFound)?;
    let messages = repo.list_chat_messages(session_id)?;

    Ok(ChatTranscript { session, messages })
}

pub fn delete_session<R>(repo: &R, session_id: i32) -> ServiceResult<()>
where
    R: ChatWriter + ?Sized,
{
    let session_id = ChatSessionId::new(session_id)?;
    repo.delete_chat_session(session_id)
        .map_err(ServiceError::from)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::chat::ChatRole;
    use crate::domain::types::{ChatMessageId, SanitizedText};
    use crate::repository::mock::MockRepository;

    fn session(id: i32) -> ChatSession {
        let now = Utc::now().naive_utc();
        ChatSession {
            id: ChatSessionId::new(id).unwrap(),
            visitor_id: VisitorId::new("bezoeker-1").unwrap(),
            started_at: now,
            last_message_at: now,
        }
    }

    #[test]
    fn message_for_unknown_session_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_chat_session().returning(|_| Ok(None));
        repo.expect_append_chat_message().times(0);

        let form = ChatMessageForm {
            role: ChatRole::User,
            content: "Hallo".into(),
        };

        assert!(matches!(
            append_message(&repo, 9, form),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn message_content_is_sanitized() {
        let mut repo = MockRepository::new();
        repo.expect_get_chat_session()
            .returning(|id| Ok(Some(session(id.get()))));
        repo.expect_append_chat_message()
            .withf(|message| !message.content.as_str().contains("<script"))
            .times(1)
            .returning(|message| {
                Ok(ChatMessage {
                    id: ChatMessageId::new(1).unwrap(),
                    session_id: message.session_id,
                    role: message.role,
                    content: message.content.clone(),
                    created_at: Utc::now().naive_utc(),
                })
            });

        let form = ChatMessageForm {
            role: ChatRole::User,
            content: "Wat kost het?<script>alert(1)</script>".into(),
        };
        let stored = append_message(&repo, 2, form).unwrap();

        assert_eq!(stored.content, SanitizedText::new("Wat kost het?").unwrap());
    }

    #[test]
    fn transcript_bundles_session_and_messages() {
        let mut repo = MockRepository::new();
        repo.expect_get_chat_session()
            .returning(|id| Ok(Some(session(id.get()))));
        repo.expect_list_chat_messages().returning(|_| Ok(vec![]));

        let transcript = get_transcript(&repo, 4).unwrap();

        assert_eq!(transcript.session.id.get(), 4);
        assert!(transcript.messages.is_empty());
    }
}
