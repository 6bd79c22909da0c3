use chrono::{NaiveDate, NaiveDateTime};

use crate::db::{DbConnection, DbPool};
use crate::domain::{
    activity::{Activity, NewActivity},
    article::{Article, NewArticle, UpdateArticle},
    chat::{ChatMessage, ChatSession, ChatSessionSummary, NewChatMessage},
    customer::{Customer, CustomerStatus, NewCustomer, UpdateCustomer},
    dashboard::DashboardStats,
    deal::{Deal, NewDeal, UpdateDeal},
    drive_file::{DriveFile, NewDriveFile},
    lead::{Lead, LeadSource, LeadStatus, NewLead},
    pipeline::{DealStage, StageUpdate},
    quiz_result::{NewQuizResult, QuizResult},
    task::{NewTask, Task, TaskStatus, UpdateTask},
    types::{
        ActivityId, ArticleId, ArticleSlug, ChatSessionId, CustomerId, CustomerName, DealId,
        DriveFileId, LeadId, QuizResultId, TaskId, VisitorId,
    },
};
use crate::repository::errors::RepositoryResult;

pub mod activity;
pub mod article;
pub mod chat;
pub mod customer;
pub mod dashboard;
pub mod deal;
pub mod drive_file;
pub mod errors;
pub mod lead;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod quiz_result;
pub mod task;

/// Diesel-backed repository shared by every handler.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Offset of the first row; page numbers start at 1.
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1).saturating_mul(self.per_page) as i64
    }

    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerListQuery {
    pub search: Option<String>,
    pub status: Option<CustomerStatus>,
    pub pagination: Option<Pagination>,
}

impl CustomerListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn status(mut self, status: CustomerStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DealListQuery {
    pub stage: Option<DealStage>,
    pub customer_id: Option<CustomerId>,
}

impl DealListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(mut self, stage: DealStage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn customer(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskListQuery {
    pub status: Option<TaskStatus>,
    pub customer_id: Option<CustomerId>,
    pub deal_id: Option<DealId>,
    /// Skip finished tasks.
    pub open_only: bool,
    /// Only unfinished tasks due before this date.
    pub overdue_on: Option<NaiveDate>,
}

impl TaskListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn customer(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn deal(mut self, deal_id: DealId) -> Self {
        self.deal_id = Some(deal_id);
        self
    }

    pub fn open_only(mut self) -> Self {
        self.open_only = true;
        self
    }

    pub fn overdue_on(mut self, today: NaiveDate) -> Self {
        self.overdue_on = Some(today);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityListQuery {
    pub customer_id: Option<CustomerId>,
    pub deal_id: Option<DealId>,
    pub limit: Option<usize>,
}

impl ActivityListQuery {
    pub fn customer(customer_id: CustomerId) -> Self {
        Self {
            customer_id: Some(customer_id),
            ..Self::default()
        }
    }

    pub fn deal(deal_id: DealId) -> Self {
        Self {
            deal_id: Some(deal_id),
            ..Self::default()
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeadListQuery {
    pub status: Option<LeadStatus>,
    pub source: Option<LeadSource>,
    pub pagination: Option<Pagination>,
}

impl LeadListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: LeadStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn source(mut self, source: LeadSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleListQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub published_only: bool,
}

impl ArticleListQuery {
    /// Articles visible on the public site.
    pub fn published() -> Self {
        Self {
            published_only: true,
            ..Self::default()
        }
    }

    /// Every article, drafts included.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}

pub trait CustomerReader {
    fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>>;
    fn list_customers(&self, query: CustomerListQuery)
    -> RepositoryResult<(usize, Vec<Customer>)>;
}

pub trait CustomerWriter {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
    fn create_customers(&self, new_customers: &[NewCustomer]) -> RepositoryResult<usize>;
    fn update_customer(
        &self,
        id: CustomerId,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer>;
    fn delete_customer(&self, id: CustomerId) -> RepositoryResult<()>;
}

pub trait DealReader {
    fn get_deal_by_id(&self, id: DealId) -> RepositoryResult<Option<Deal>>;
    fn list_deals(&self, query: DealListQuery) -> RepositoryResult<Vec<Deal>>;
    /// Deals joined with their customer's name, ordered for the board.
    fn list_deals_with_customer(
        &self,
        query: DealListQuery,
    ) -> RepositoryResult<Vec<(Deal, CustomerName)>>;
}

pub trait DealWriter {
    fn create_deal(&self, new_deal: &NewDeal) -> RepositoryResult<Deal>;
    fn update_deal(&self, id: DealId, updates: &UpdateDeal) -> RepositoryResult<Deal>;
    /// Applies `update` only while the stored stage still equals `expected`.
    ///
    /// Returns `Ok(None)` when the stage changed underneath.
    fn update_deal_stage(
        &self,
        id: DealId,
        expected: DealStage,
        update: StageUpdate,
    ) -> RepositoryResult<Option<Deal>>;
    fn delete_deal(&self, id: DealId) -> RepositoryResult<()>;
}

pub trait TaskReader {
    fn get_task_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>>;
    fn list_tasks(&self, query: TaskListQuery) -> RepositoryResult<Vec<Task>>;
}

pub trait TaskWriter {
    fn create_task(&self, new_task: &NewTask) -> RepositoryResult<Task>;
    fn update_task(
        &self,
        id: TaskId,
        updates: &UpdateTask,
        completed_at: Option<NaiveDateTime>,
    ) -> RepositoryResult<Task>;
    fn delete_task(&self, id: TaskId) -> RepositoryResult<()>;
}

pub trait ActivityReader {
    fn list_activities(&self, query: ActivityListQuery) -> RepositoryResult<Vec<Activity>>;
}

pub trait ActivityWriter {
    fn create_activity(&self, new_activity: &NewActivity) -> RepositoryResult<Activity>;
    fn delete_activity(&self, id: ActivityId) -> RepositoryResult<()>;
}

pub trait DriveFileReader {
    fn get_drive_file_by_id(&self, id: DriveFileId) -> RepositoryResult<Option<DriveFile>>;
    fn list_drive_files(&self, customer_id: Option<CustomerId>)
    -> RepositoryResult<Vec<DriveFile>>;
}

pub trait DriveFileWriter {
    fn create_drive_file(&self, new_file: &NewDriveFile) -> RepositoryResult<DriveFile>;
    fn delete_drive_file(&self, id: DriveFileId) -> RepositoryResult<()>;
}

pub trait LeadReader {
    fn get_lead_by_id(&self, id: LeadId) -> RepositoryResult<Option<Lead>>;
    fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)>;
}

pub trait LeadWriter {
    fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
    /// Sets `status` only while the stored status still equals `expected`.
    ///
    /// Returns `Ok(None)` when the status changed underneath.
    fn update_lead_status(
        &self,
        id: LeadId,
        expected: LeadStatus,
        status: LeadStatus,
    ) -> RepositoryResult<Option<Lead>>;
    /// Creates the customer and marks the lead converted in one transaction.
    ///
    /// Returns `Ok(None)` and writes nothing when the stored lead is no
    /// longer convertible.
    fn convert_lead(
        &self,
        id: LeadId,
        new_customer: &NewCustomer,
    ) -> RepositoryResult<Option<(Lead, Customer)>>;
}

pub trait ChatReader {
    fn get_chat_session(&self, id: ChatSessionId) -> RepositoryResult<Option<ChatSession>>;
    fn list_chat_sessions(
        &self,
        pagination: Option<Pagination>,
    ) -> RepositoryResult<(usize, Vec<ChatSessionSummary>)>;
    fn list_chat_messages(&self, session_id: ChatSessionId) -> RepositoryResult<Vec<ChatMessage>>;
}

pub trait ChatWriter {
    fn create_chat_session(&self, visitor_id: &VisitorId) -> RepositoryResult<ChatSession>;
    /// Stores the message and bumps the session's `last_message_at`.
    fn append_chat_message(&self, message: &NewChatMessage) -> RepositoryResult<ChatMessage>;
    fn delete_chat_session(&self, id: ChatSessionId) -> RepositoryResult<()>;
}

pub trait QuizResultReader {
    fn get_quiz_result(&self, id: QuizResultId) -> RepositoryResult<Option<QuizResult>>;
}

pub trait QuizResultWriter {
    /// Stores the result, creating and linking `lead` first when given.
    /// Both rows are written in one transaction.
    fn create_quiz_result(
        &self,
        result: &NewQuizResult,
        lead: Option<NewLead>,
    ) -> RepositoryResult<QuizResult>;
}

pub trait ArticleReader {
    fn get_article_by_id(&self, id: ArticleId) -> RepositoryResult<Option<Article>>;
    fn get_article_by_slug(&self, slug: &ArticleSlug) -> RepositoryResult<Option<Article>>;
    fn list_articles(&self, query: ArticleListQuery) -> RepositoryResult<Vec<Article>>;
}

pub trait ArticleWriter {
    fn create_article(&self, new_article: &NewArticle) -> RepositoryResult<Article>;
    fn update_article(&self, id: ArticleId, updates: &UpdateArticle)
    -> RepositoryResult<Article>;
    /// Inserts the article or replaces the one with the same slug.
    fn upsert_article(&self, article: &NewArticle) -> RepositoryResult<Article>;
    fn delete_article(&self, id: ArticleId) -> RepositoryResult<()>;
}

pub trait DashboardReader {
    /// Aggregates for the dashboard; `today` drives the overdue count and
    /// `chat_since` the recent chat window.
    fn dashboard_stats(
        &self,
        today: NaiveDate,
        chat_since: NaiveDateTime,
    ) -> RepositoryResult<DashboardStats>;
}
