use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::forms::article::{ArticleForm, ArticleListParams};
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::knowledge_base::{
    create_article, delete_article, get_article, get_published, list_all, list_published,
    update_article,
};

#[get("/knowledge-base")]
pub async fn articles_public(
    params: web::Query<ArticleListParams>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let articles = list_published(repo.get_ref(), params.into_inner())?;
    Ok(HttpResponse::Ok().json(articles))
}

#[get("/knowledge-base/{slug}")]
pub async fn article_public(
    slug: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let article = get_published(repo.get_ref(), &slug)?;
    Ok(HttpResponse::Ok().json(article))
}

#[get("/crm/articles")]
pub async fn articles_index(
    params: web::Query<ArticleListParams>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let articles = list_all(repo.get_ref(), params.into_inner())?;
    Ok(HttpResponse::Ok().json(articles))
}

#[post("/crm/articles")]
pub async fn articles_create(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ArticleForm>,
) -> Result<HttpResponse, ServiceError> {
    let article = create_article(repo.get_ref(), form)?;
    Ok(HttpResponse::Created().json(article))
}

#[get("/crm/articles/{article_id}")]
pub async fn articles_show(
    article_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let article = get_article(repo.get_ref(), article_id.into_inner())?;
    Ok(HttpResponse::Ok().json(article))
}

#[put("/crm/articles/{article_id}")]
pub async fn articles_update(
    article_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ArticleForm>,
) -> Result<HttpResponse, ServiceError> {
    let article = update_article(repo.get_ref(), article_id.into_inner(), form)?;
    Ok(HttpResponse::Ok().json(article))
}

#[delete("/crm/articles/{article_id}")]
pub async fn articles_delete(
    article_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    delete_article(repo.get_ref(), article_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
