use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::article::{Article as DomainArticle, NewArticle as DomainNewArticle};
use crate::domain::types::{
    ArticleCategory, ArticleId, ArticleSlug, ArticleTitle, NonEmptyString, SanitizedText,
    TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::articles)]
/// Diesel model for [`crate::domain::article::Article`].
pub struct Article {
    pub id: i32,
    pub slug: String,
    pub title: String,
    pub category: String,
    pub summary: String,
    pub body: String,
    pub published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::articles)]
/// Insertable and update form of [`Article`].
pub struct NewArticle<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub category: &'a str,
    pub summary: &'a str,
    pub body: &'a str,
    pub published: bool,
}

impl TryFrom<Article> for DomainArticle {
    type Error = TypeConstraintError;

    fn try_from(article: Article) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ArticleId::try_from(article.id)?,
            slug: ArticleSlug::new(article.slug)?,
            title: ArticleTitle::new(article.title)?,
            category: ArticleCategory::new(article.category)?,
            summary: NonEmptyString::new(article.summary)?,
            body: SanitizedText::new(article.body)?,
            published: article.published,
            created_at: article.created_at,
            updated_at: article.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewArticle> for NewArticle<'a> {
    fn from(article: &'a DomainNewArticle) -> Self {
        Self {
            slug: article.slug.as_str(),
            title: article.title.as_str(),
            category: article.category.as_str(),
            summary: article.summary.as_str(),
            body: article.body.as_str(),
            published: article.published,
        }
    }
}
