use chrono::Utc;
use diesel::{prelude::*, upsert::excluded};

use crate::{
    domain::{
        article::{Article, NewArticle, UpdateArticle},
        types::{ArticleId, ArticleSlug},
    },
    models::article::{Article as DbArticle, NewArticle as DbNewArticle},
    repository::{
        ArticleListQuery, ArticleReader, ArticleWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::articles,
};

impl ArticleReader for DieselRepository {
    fn get_article_by_id(&self, id: ArticleId) -> RepositoryResult<Option<Article>> {
        let mut conn = self.conn()?;

        let article = articles::table
            .find(id.get())
            .first::<DbArticle>(&mut conn)
            .optional()?;

        article
            .map(Article::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn get_article_by_slug(&self, slug: &ArticleSlug) -> RepositoryResult<Option<Article>> {
        let mut conn = self.conn()?;

        let article = articles::table
            .filter(articles::slug.eq(slug.as_str()))
            .first::<DbArticle>(&mut conn)
            .optional()?;

        article
            .map(Article::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_articles(&self, query: ArticleListQuery) -> RepositoryResult<Vec<Article>> {
        let mut conn = self.conn()?;

        let mut items = articles::table.into_boxed();
        if query.published_only {
            items = items.filter(articles::published.eq(true));
        }
        if let Some(category) = query.category {
            items = items.filter(articles::category.eq(category));
        }
        if let Some(term) = query.search.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
            let pattern = format!("%{term}%");
            items = items.filter(
                articles::title
                    .like(pattern.clone())
                    .or(articles::summary.like(pattern.clone()))
                    .or(articles::body.like(pattern)),
            );
        }

        items
            .order((articles::category.asc(), articles::title.asc()))
            .load::<DbArticle>(&mut conn)?
            .into_iter()
            .map(|row| Article::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl ArticleWriter for DieselRepository {
    fn create_article(&self, new_article: &NewArticle) -> RepositoryResult<Article> {
        let mut conn = self.conn()?;

        let row = diesel::insert_into(articles::table)
            .values(DbNewArticle::from(new_article))
            .get_result::<DbArticle>(&mut conn)?;

        Article::try_from(row).map_err(RepositoryError::from)
    }

    fn update_article(
        &self,
        id: ArticleId,
        updates: &UpdateArticle,
    ) -> RepositoryResult<Article> {
        let mut conn = self.conn()?;

        let changes = DbNewArticle::from(updates);
        let row = diesel::update(articles::table.find(id.get()))
            .set((&changes, articles::updated_at.eq(Utc::now().naive_utc())))
            .get_result::<DbArticle>(&mut conn)?;

        Article::try_from(row).map_err(RepositoryError::from)
    }

    fn upsert_article(&self, article: &NewArticle) -> RepositoryResult<Article> {
        let mut conn = self.conn()?;

        let row = diesel::insert_into(articles::table)
            .values(DbNewArticle::from(article))
            .on_conflict(articles::slug)
            .do_update()
            .set((
                articles::title.eq(excluded(articles::title)),
                articles::category.eq(excluded(articles::category)),
                articles::summary.eq(excluded(articles::summary)),
                articles::body.eq(excluded(articles::body)),
                articles::published.eq(excluded(articles::published)),
                articles::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbArticle>(&mut conn)?;

        Article::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_article(&self, id: ArticleId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(articles::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
