use actix_web::{HttpResponse, delete, get, patch, post, put, web};

use crate::forms::deal::{DealForm, DealListParams, StageMoveForm};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::deals::{
    create_deal, delete_deal, get_deal, list_deals, move_deal, pipeline_overview, update_deal,
};

#[get("/crm/pipeline")]
pub async fn pipeline(repo: web::Data<DieselRepository>) -> Result<HttpResponse, ServiceError> {
    let overview = pipeline_overview(repo.get_ref())?;
    Ok(HttpResponse::Ok().json(overview))
}

#[get("/crm/deals")]
pub async fn deals_index(
    params: web::Query<DealListParams>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let deals = list_deals(repo.get_ref(), params.into_inner())?;
    Ok(HttpResponse::Ok().json(deals))
}

#[post("/crm/deals")]
pub async fn deals_create(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<DealForm>,
) -> Result<HttpResponse, ServiceError> {
    let deal = create_deal(repo.get_ref(), form)?;
    Ok(HttpResponse::Created().json(deal))
}

#[get("/crm/deals/{deal_id}")]
pub async fn deals_show(
    deal_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let deal = get_deal(repo.get_ref(), deal_id.into_inner())?;
    Ok(HttpResponse::Ok().json(deal))
}

#[put("/crm/deals/{deal_id}")]
pub async fn deals_update(
    deal_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<DealForm>,
) -> Result<HttpResponse, ServiceError> {
    let deal = update_deal(repo.get_ref(), deal_id.into_inner(), form)?;
    Ok(HttpResponse::Ok().json(deal))
}

/// Drag-and-drop target of the pipeline board.
#[patch("/crm/deals/{deal_id}/stage")]
pub async fn deals_move(
    deal_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<StageMoveForm>,
) -> Result<HttpResponse, ServiceError> {
    let deal = move_deal(repo.get_ref(), deal_id.into_inner(), form)?;
    Ok(HttpResponse::Ok().json(deal))
}

#[delete("/crm/deals/{deal_id}")]
pub async fn deals_delete(
    deal_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    delete_deal(repo.get_ref(), deal_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
