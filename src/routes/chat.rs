use actix_web::{HttpResponse, delete, get, post, web};

use crate::forms::chat::{ChatListParams, ChatMessageForm, StartChatForm};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::chat::{
    append_message, delete_session, get_transcript, list_sessions, start_session,
};

#[post("/chat/sessions")]
pub async fn chat_start(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<StartChatForm>,
) -> Result<HttpResponse, ServiceError> {
    let session = start_session(repo.get_ref(), form)?;
    Ok(HttpResponse::Created().json(session))
}

#[post("/chat/sessions/{session_id}/messages")]
pub async fn chat_message(
    session_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ChatMessageForm>,
) -> Result<HttpResponse, ServiceError> {
    let message = append_message(repo.get_ref(), session_id.into_inner(), form)?;
    Ok(HttpResponse::Created().json(message))
}

#[get("/crm/chat/sessions")]
pub async fn chat_sessions(
    params: web::Query<ChatListParams>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = list_sessions(repo.get_ref(), params.into_inner())?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/crm/chat/sessions/{session_id}")]
pub async fn chat_transcript(
    session_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let transcript = get_transcript(repo.get_ref(), session_id.into_inner())?;
    Ok(HttpResponse::Ok().json(transcript))
}

#[delete("/crm/chat/sessions/{session_id}")]
pub async fn chat_delete(
    session_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    delete_session(repo.get_ref(), session_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
