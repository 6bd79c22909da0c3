use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::forms::customer::{CustomerForm, CustomerListParams, UploadCustomersForm};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::customers::{
    create_customer, delete_customer, get_customer, import_customers, list_customers,
    update_customer,
};

#[get("/crm/customers")]
pub async fn customers_index(
    params: web::Query<CustomerListParams>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let page = list_customers(repo.get_ref(), params.into_inner())?;
    Ok(HttpResponse::Ok().json(page))
}

#[post("/crm/customers")]
pub async fn customers_create(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CustomerForm>,
) -> Result<HttpResponse, ServiceError> {
    let customer = create_customer(repo.get_ref(), form)?;
    Ok(HttpResponse::Created().json(customer))
}

#[post("/crm/customers/import")]
pub async fn customers_import(
    repo: web::Data<DieselRepository>,
    MultipartForm(mut form): MultipartForm<UploadCustomersForm>,
) -> Result<HttpResponse, ServiceError> {
    let report = import_customers(repo.get_ref(), &mut form)?;
    Ok(HttpResponse::Ok().json(report))
}

#[get("/crm/customers/{customer_id}")]
pub async fn customers_show(
    customer_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let detail = get_customer(repo.get_ref(), customer_id.into_inner())?;
    Ok(HttpResponse::Ok().json(detail))
}

#[put("/crm/customers/{customer_id}")]
pub async fn customers_update(
    customer_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CustomerForm>,
) -> Result<HttpResponse, ServiceError> {
    let customer = update_customer(repo.get_ref(), customer_id.into_inner(), form)?;
    Ok(HttpResponse::Ok().json(customer))
}

#[delete("/crm/customers/{customer_id}")]
pub async fn customers_delete(
    customer_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    delete_customer(repo.get_ref(), customer_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
