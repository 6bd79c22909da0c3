use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, get, patch, post, web};
use chrono::Utc;

use crate::forms::lead::{ConvertLeadForm, LeadListParams, LeadStatusForm};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::leads::{
    change_lead_status, convert_lead, export_leads_csv, get_lead, list_leads,
};

#[get("/crm/leads")]
pub async fn leads_index(
    params: web::Query<LeadListParams>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = list_leads(repo.get_ref(), params.into_inner())?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/crm/leads/export")]
pub async fn leads_export(
    params: web::Query<LeadListParams>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let csv = export_leads_csv(repo.get_ref(), params.into_inner())?;
    let file_name = format!("leads-{}.csv", Utc::now().format("%Y%m%d"));

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file_name)],
        })
        .body(csv))
}

#[get("/crm/leads/{lead_id}")]
pub async fn leads_show(
    lead_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let lead = get_lead(repo.get_ref(), lead_id.into_inner())?;
    Ok(HttpResponse::Ok().json(lead))
}

#[patch("/crm/leads/{lead_id}/status")]
pub async fn leads_status(
    lead_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<LeadStatusForm>,
) -> Result<HttpResponse, ServiceError> {
    let lead = change_lead_status(repo.get_ref(), lead_id.into_inner(), form)?;
    Ok(HttpResponse::Ok().json(lead))
}

#[post("/crm/leads/{lead_id}/convert")]
pub async fn leads_convert(
    lead_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: Option<web::Json<ConvertLeadForm>>,
) -> Result<HttpResponse, ServiceError> {
    let form = form.map(web::Json::into_inner).unwrap_or_default();
    let converted = convert_lead(repo.get_ref(), lead_id.into_inner(), form)?;
    Ok(HttpResponse::Created().json(converted))
}
