//! Public endpoints behind the marketing pages.

use actix_web::{HttpResponse, get, post, web};

use crate::forms::contact::ContactForm;
use crate::forms::pricing::{PricingParams, QuoteRequestForm};
use crate::forms::quiz::QuizForm;
use crate::mailer::{EmailTemplates, Mailer};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::contact::submit_contact;
use crate::services::pricing::{get_quote, request_quote};
use crate::services::quiz::{get_result, questions, score, submit};

#[post("/contact")]
pub async fn contact(
    repo: web::Data<DieselRepository>,
    mailer: web::Data<dyn Mailer>,
    templates: web::Data<EmailTemplates>,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<ContactForm>,
) -> Result<HttpResponse, ServiceError> {
    let received = submit_contact(
        repo.get_ref(),
        mailer.get_ref(),
        templates.get_ref(),
        &server_config.sales_email,
        form,
    )?;
    Ok(HttpResponse::Created().json(received))
}

#[get("/pricing/quote")]
pub async fn pricing_quote(
    params: web::Query<PricingParams>,
) -> Result<HttpResponse, ServiceError> {
    let quote = get_quote(params.into_inner())?;
    Ok(HttpResponse::Ok().json(quote))
}

#[post("/pricing/request")]
pub async fn pricing_request(
    repo: web::Data<DieselRepository>,
    mailer: web::Data<dyn Mailer>,
    templates: web::Data<EmailTemplates>,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<QuoteRequestForm>,
) -> Result<HttpResponse, ServiceError> {
    let requested = request_quote(
        repo.get_ref(),
        mailer.get_ref(),
        templates.get_ref(),
        &server_config.sales_email,
        form,
    )?;
    Ok(HttpResponse::Created().json(requested))
}

#[get("/quiz/questions")]
pub async fn quiz_questions() -> HttpResponse {
    HttpResponse::Ok().json(questions())
}

#[post("/quiz/score")]
pub async fn quiz_score(web::Json(form): web::Json<QuizForm>) -> Result<HttpResponse, ServiceError> {
    let evaluation = score(form)?;
    Ok(HttpResponse::Ok().json(evaluation))
}

#[post("/quiz")]
pub async fn quiz_submit(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<QuizForm>,
) -> Result<HttpResponse, ServiceError> {
    let evaluation = submit(repo.get_ref(), form)?;
    Ok(HttpResponse::Created().json(evaluation))
}

#[get("/quiz/{result_id}")]
pub async fn quiz_result(
    result_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let evaluation = get_result(repo.get_ref(), result_id.into_inner())?;
    Ok(HttpResponse::Ok().json(evaluation))
}
