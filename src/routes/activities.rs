use actix_web::{HttpResponse, delete, get, post, web};

use crate::forms::activity::{ActivityForm, ActivityListParams};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::activities::{create_activity, delete_activity, list_activities};

#[get("/crm/activities")]
pub async fn activities_index(
    params: web::Query<ActivityListParams>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let activities = list_activities(repo.get_ref(), params.into_inner())?;
    Ok(HttpResponse::Ok().json(activities))
}

#[post("/crm/activities")]
pub async fn activities_create(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ActivityForm>,
) -> Result<HttpResponse, ServiceError> {
    let activity = create_activity(repo.get_ref(), form)?;
    Ok(HttpResponse::Created().json(activity))
}

#[delete("/crm/activities/{activity_id}")]
pub async fn activities_delete(
    activity_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    delete_activity(repo.get_ref(), activity_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
