use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        chat::{ChatMessage, ChatSession, ChatSessionSummary, NewChatMessage},
        types::{ChatSessionId, VisitorId},
    },
    models::chat::{
        ChatMessage as DbChatMessage, ChatSession as DbChatSession,
        NewChatMessage as DbNewChatMessage, NewChatSession as DbNewChatSession,
    },
    repository::{
        ChatReader, ChatWriter, DieselRepository, Pagination,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::{chat_messages, chat_sessions},
};

impl ChatReader for DieselRepository {
    fn get_chat_session(&self, id: ChatSessionId) -> RepositoryResult<Option<ChatSession>> {
        let mut conn = self.conn()?;

        let session = chat_sessions::table
            .find(id.get())
            .first::<DbChatSession>(&mut conn)
            .optional()?;

        session
            .map(ChatSession::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_chat_sessions(
        &self,
        pagination: Option<Pagination>,
    ) -> RepositoryResult<(usize, Vec<ChatSessionSummary>)> {
        let mut conn = self.conn()?;

        let total: i64 = chat_sessions::table.count().get_result(&mut conn)?;

        let mut sessions_query = chat_sessions::table
            .order((
                chat_sessions::last_message_at.desc(),
                chat_sessions::id.desc(),
            ))
            .into_boxed();
        if let Some(pagination) = pagination {
            sessions_query = sessions_query
                .limit(pagination.limit())
                .offset(pagination.offset());
        }
        let sessions = sessions_query.load::<DbChatSession>(&mut conn)?;

        let ids: Vec<i32> = sessions.iter().map(|s| s.id).collect();
        let counts: Vec<(i32, i64)> = chat_messages::table
            .filter(chat_messages::session_id.eq_any(ids))
            .group_by(chat_messages::session_id)
            .select((chat_messages::session_id, diesel::dsl::count_star()))
            .load(&mut conn)?;

        let summaries = sessions
            .into_iter()
            .map(|row| -> RepositoryResult<ChatSessionSummary> {
                let message_count = counts
                    .iter()
                    .find(|(session_id, _)| *session_id == row.id)
                    .map_or(0, |(_, count)| *count as usize);
                Ok(ChatSessionSummary {
                    session: ChatSession::try_from(row)?,
                    message_count,
                })
            })
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total as usize, summaries))
    }

    fn list_chat_messages(
        &self,
        session_id: ChatSessionId,
    ) -> RepositoryResult<Vec<ChatMessage>> {
        let mut conn = self.conn()?;

        chat_messages::table
            .filter(chat_messages::session_id.eq(session_id.get()))
            .order((chat_messages::created_at.asc(), chat_messages::id.asc()))
            .load::<DbChatMessage>(&mut conn)?
            .into_iter()
            .map(|row| ChatMessage::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl ChatWriter for DieselRepository {
    fn create_chat_session(&self, visitor_id: &VisitorId) -> RepositoryResult<ChatSession> {
        let mut conn = self.conn()?;

        let row = diesel::insert_into(chat_sessions::table)
            .values(DbNewChatSession {
                visitor_id: visitor_id.as_str(),
            })
            .get_result::<DbChatSession>(&mut conn)?;

        ChatSession::try_from(row).map_err(RepositoryError::from)
    }

    fn append_chat_message(&self, message: &NewChatMessage) -> RepositoryResult<ChatMessage> {
        let mut conn = self.conn()?;

        let now = Utc::now().naive_utc();
        let insertable = DbNewChatMessage::new(message, now);

        let row = conn.transaction::<DbChatMessage, diesel::result::Error, _>(|conn| {
            let bumped = diesel::update(chat_sessions::table.find(message.session_id.get()))
                .set(chat_sessions::last_message_at.eq(now))
                .execute(conn)?;
            if bumped == 0 {
                return Err(diesel::result::Error::NotFound);
            }

            diesel::insert_into(chat_messages::table)
                .values(&insertable)
                .get_result::<DbChatMessage>(conn)
        })?;

        ChatMessage::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_chat_session(&self, id: ChatSessionId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(chat_sessions::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
