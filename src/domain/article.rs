//! Knowledge base articles.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::{
    ArticleCategory, ArticleId, ArticleSlug, ArticleTitle, NonEmptyString, SanitizedText,
};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Article {
    pub id: ArticleId,
    pub slug: ArticleSlug,
    pub title: ArticleTitle,
    pub category: ArticleCategory,
    pub summary: NonEmptyString,
    pub body: SanitizedText,
    pub published: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewArticle {
    pub slug: ArticleSlug,
    pub title: ArticleTitle,
    pub category: ArticleCategory,
    pub summary: NonEmptyString,
    pub body: SanitizedText,
    pub published: bool,
}

pub type UpdateArticle = NewArticle;
