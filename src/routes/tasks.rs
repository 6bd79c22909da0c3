use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::Utc;

use crate::forms::task::{TaskForm, TaskListParams};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::tasks::{
    complete_task, create_task, delete_task, get_task, list_tasks, update_task,
};

#[get("/crm/tasks")]
pub async fn tasks_index(
    params: web::Query<TaskListParams>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let today = Utc::now().date_naive();
    let tasks = list_tasks(repo.get_ref(), params.into_inner(), today)?;
    Ok(HttpResponse::Ok().json(tasks))
}

#[post("/crm/tasks")]
pub async fn tasks_create(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<TaskForm>,
) -> Result<HttpResponse, ServiceError> {
    let task = create_task(repo.get_ref(), form)?;
    Ok(HttpResponse::Created().json(task))
}

#[get("/crm/tasks/{task_id}")]
pub async fn tasks_show(
    task_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let task = get_task(repo.get_ref(), task_id.into_inner())?;
    Ok(HttpResponse::Ok().json(task))
}

#[put("/crm/tasks/{task_id}")]
pub async fn tasks_update(
    task_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<TaskForm>,
) -> Result<HttpResponse, ServiceError> {
    let task = update_task(repo.get_ref(), task_id.into_inner(), form)?;
    Ok(HttpResponse::Ok().json(task))
}

#[post("/crm/tasks/{task_id}/complete")]
pub async fn tasks_complete(
    task_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let task = complete_task(repo.get_ref(), task_id.into_inner())?;
    Ok(HttpResponse::Ok().json(task))
}

#[delete("/crm/tasks/{task_id}")]
pub async fn tasks_delete(
    task_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    delete_task(repo.get_ref(), task_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
