//! Knowledge base articles shown on the site and managed by admins.

use crate::domain::article::{Article, NewArticle};
use crate::domain::types::{ArticleId, ArticleSlug};
use crate::forms::article::{ArticleForm, ArticleListParams};
use crate::repository::{ArticleListQuery, ArticleReader, ArticleWriter};
use crate::services::{ServiceError, ServiceResult};

fn with_filters(mut query: ArticleListQuery, params: ArticleListParams) -> ArticleListQuery {
    if let Some(category) = params.category.filter(|c| !c.trim().is_empty()) {
        query = query.category(category.trim());
    }
    if let Some(term) = params.search.filter(|s| !s.trim().is_empty()) {
        query = query.search(term.trim());
    }
    query
}

/// Published articles for visitors.
pub fn list_published<R>(repo: &R, params: ArticleListParams) -> ServiceResult<Vec<Article>>
where
    R: ArticleReader + ?Sized,
{
    repo.list_articles(with_filters(ArticleListQuery::published(), params))
        .map_err(|err| {
            log::error!("Failed to list articles: {err}");
            ServiceError::from(err)
        })
}

/// Drafts included.
pub fn list_all<R>(repo: &R, params: ArticleListParams) -> ServiceResult<Vec<Article>>
where
    R: ArticleReader + ?Sized,
{
    repo.list_articles(with_filters(ArticleListQuery::all(), params))
        .map_err(ServiceError::from)
}

/// Looks up a published article; drafts are reported as missing.
pub fn get_published<R>(repo: &R, slug: &str) -> ServiceResult<Article>
where
    R: ArticleReader + ?Sized,
{
    let Ok(slug) = ArticleSlug::new(slug) else {
        return Err(ServiceError::NotFound);
    };

    match repo.get_article_by_slug(&slug)? {
        Some(article) if article.published => Ok(article),
        _ => Err(ServiceError::NotFound),
    }
}

pub fn get_article<R>(repo: &R, article_id: i32) -> ServiceResult<Article>
where
    R: ArticleReader + ?Sized,
{
    let article_id = ArticleId::new(article_id)?;
    repo.get_article_by_id(article_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_article<R>(repo: &R, form: ArticleForm) -> ServiceResult<Article>
where
    R: ArticleWriter + ?Sized,
{
    let article = NewArticle::try_from(form)?;
    repo.create_article(&article).map_err(|err| {
        log::error!("Failed to create article {}: {err}", article.slug);
        ServiceError::from(err)
    })
}

pub fn update_article<R>(repo: &R, article_id: i32, form: ArticleForm) -> ServiceResult<Article>
where
    R: ArticleWriter + ?Sized,
{
    let article_id = ArticleId::new(article_id)?;
    let updates = NewArticle::try_from(form)?;
    repo.update_article(article_id, &updates)
        .map_err(ServiceError::from)
}

pub fn delete_article<R>(repo: &R, article_id: i32) -> ServiceResult<()>
where
    R: ArticleWriter + ?Sized,
{
    let article_id = ArticleId::new(article_id)?;
    repo.delete_article(article_id).map_err(ServiceError::from)
}

/// Writes the bundled articles, replacing earlier versions by slug.
/// Returns how many were written.
pub fn seed_articles<R>(repo: &R, articles: &[NewArticle]) -> ServiceResult<usize>
where
    R: ArticleWriter + ?Sized,
{
    for article in articles {
        repo.upsert_article(article).map_err(|err| {
            log::error!("Failed to seed article {}: {err}", article.slug);
            ServiceError::from(err)
        })?;
    }
    Ok(articles.len())
}
