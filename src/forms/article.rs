use serde::Deserialize;
use validator::Validate;

use crate::domain::article::NewArticle;
use crate::domain::types::{
    ArticleCategory, ArticleSlug, ArticleTitle, NonEmptyString, SanitizedText,
};
use crate::forms::{FormError, parse_field};

fn default_published() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate)]
pub struct ArticleForm {
    /// Derived from the title when omitted.
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[validate(length(min = 1, max = 500))]
    pub summary: String,
    #[validate(length(min = 1))]
    pub body: String,
    #[serde(default = "default_published")]
    pub published: bool,
}

impl TryFrom<ArticleForm> for NewArticle {
    type Error = FormError;

    fn try_from(form: ArticleForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let slug = match form.slug.filter(|slug| !slug.trim().is_empty()) {
            Some(slug) => parse_field("slug", || ArticleSlug::new(slug))?,
            None => parse_field("slug", || ArticleSlug::from_title(&form.title))?,
        };

        Ok(NewArticle {
            slug,
            title: parse_field("title", || ArticleTitle::new(form.title))?,
            category: parse_field("category", || ArticleCategory::new(form.category))?,
            summary: parse_field("summary", || NonEmptyString::new(form.summary))?,
            body: parse_field("body", || SanitizedText::new(form.body))?,
            published: form.published,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ArticleListParams {
    pub category: Option<String>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_is_derived_from_title() {
        let form = ArticleForm {
            slug: None,
            title: "Vrijwilligers écht bedanken".into(),
            category: "Waardering".into(),
            summary: "Tips".into(),
            body: "<p>Zeg het vaak.</p>".into(),
            published: true,
        };
        let article = NewArticle::try_from(form).unwrap();
        assert_eq!(article.slug.as_str(), "vrijwilligers-echt-bedanken");
    }

    #[test]
    fn explicit_slug_must_be_valid() {
        let form = ArticleForm {
            slug: Some("Not A Slug".into()),
            title: "Titel".into(),
            category: "Algemeen".into(),
            summary: "Kort".into(),
            body: "Tekst".into(),
            published: false,
        };
        assert!(matches!(
            NewArticle::try_from(form),
            Err(FormError::InvalidField { field: "slug", .. })
        ));
    }
}
