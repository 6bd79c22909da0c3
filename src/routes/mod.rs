//! HTTP handlers mounted under `/api`.

use actix_web::{HttpResponse, get, web};
use chrono::Utc;

use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::dashboard::dashboard_stats;

pub mod activities;
pub mod chat;
pub mod customers;
pub mod deals;
pub mod drive;
pub mod knowledge_base;
pub mod leads;
pub mod site;
pub mod tasks;

#[get("/crm/dashboard")]
pub async fn dashboard(repo: web::Data<DieselRepository>) -> Result<HttpResponse, ServiceError> {
    let stats = dashboard_stats(repo.get_ref(), Utc::now().naive_utc())?;
    Ok(HttpResponse::Ok().json(stats))
}

/// Registers every API handler. Literal segments come before `{id}`
/// captures on the same method.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(dashboard)
        // marketing site
        .service(site::contact)
        .service(site::pricing_quote)
        .service(site::pricing_request)
        .service(site::quiz_questions)
        .service(site::quiz_score)
        .service(site::quiz_submit)
        .service(site::quiz_result)
        .service(chat::chat_start)
        .service(chat::chat_message)
        .service(knowledge_base::articles_public)
        .service(knowledge_base::article_public)
        // crm
        .service(customers::customers_index)
        .service(customers::customers_create)
        .service(customers::customers_import)
        .service(customers::customers_show)
        .service(customers::customers_update)
        .service(customers::customers_delete)
        .service(deals::pipeline)
        .service(deals::deals_index)
        .service(deals::deals_create)
        .service(deals::deals_show)
        .service(deals::deals_update)
        .service(deals::deals_move)
        .service(deals::deals_delete)
        .service(tasks::tasks_index)
        .service(tasks::tasks_create)
        .service(tasks::tasks_show)
        .service(tasks::tasks_update)
        .service(tasks::tasks_complete)
        .service(tasks::tasks_delete)
        .service(activities::activities_index)
        .service(activities::activities_create)
        .service(activities::activities_delete)
        .service(drive::files_index)
        .service(drive::files_upload)
        .service(drive::files_show)
        .service(drive::files_download)
        .service(drive::files_delete)
        .service(leads::leads_index)
        .service(leads::leads_export)
        .service(leads::leads_show)
        .service(leads::leads_status)
        .service(leads::leads_convert)
        .service(chat::chat_sessions)
        .service(chat::chat_transcript)
        .service(chat::chat_delete)
        .service(knowledge_base::articles_index)
        .service(knowledge_base::articles_create)
        .service(knowledge_base::articles_show)
        .service(knowledge_base::articles_update)
        .service(knowledge_base::articles_delete);
}
