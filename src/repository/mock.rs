//! Mock repository implementations for isolating services in tests.

use chrono::{NaiveDate, NaiveDateTime};
use mockall::mock;

use crate::domain::activity::{Activity, NewActivity};
use crate::domain::article::{Article, NewArticle, UpdateArticle};
use crate::domain::chat::{ChatMessage, ChatSession, ChatSessionSummary, NewChatMessage};
use crate::domain::customer::{Customer, NewCustomer, UpdateCustomer};
use crate::domain::dashboard::DashboardStats;
use crate::domain::deal::{Deal, NewDeal, UpdateDeal};
use crate::domain::drive_file::{DriveFile, NewDriveFile};
use crate::domain::lead::{Lead, LeadStatus, NewLead};
use crate::domain::pipeline::{DealStage, StageUpdate};
use crate::domain::quiz_result::{NewQuizResult, QuizResult};
use crate::domain::task::{NewTask, Task, UpdateTask};
use crate::domain::types::{
    ActivityId, ArticleId, ArticleSlug, ChatSessionId, CustomerId, CustomerName, DealId,
    DriveFileId, LeadId, QuizResultId, TaskId, VisitorId,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ActivityListQuery, ActivityReader, ActivityWriter, ArticleListQuery, ArticleReader,
    ArticleWriter, ChatReader, ChatWriter, CustomerListQuery, CustomerReader, CustomerWriter,
    DashboardReader, DealListQuery, DealReader, DealWriter, DriveFileReader, DriveFileWriter,
    LeadListQuery, LeadReader, LeadWriter, Pagination, QuizResultReader, QuizResultWriter,
    TaskListQuery, TaskReader, TaskWriter,
};

mock! {
    pub Repository {}

    impl CustomerReader for Repository {
        fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>>;
        fn list_customers(
            &self,
            query: CustomerListQuery,
        ) -> RepositoryResult<(usize, Vec<Customer>)>;
    }

    impl CustomerWriter for Repository {
        fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer>;
        fn create_customers(&self, new_customers: &[NewCustomer]) -> RepositoryResult<usize>;
        fn update_customer(
            &self,
            id: CustomerId,
            updates: &UpdateCustomer,
        ) -> RepositoryResult<Customer>;
        fn delete_customer(&self, id: CustomerId) -> RepositoryResult<()>;
    }

    impl DealReader for Repository {
        fn get_deal_by_id(&self, id: DealId) -> RepositoryResult<Option<Deal>>;
        fn list_deals(&self, query: DealListQuery) -> RepositoryResult<Vec<Deal>>;
        fn list_deals_with_customer(
            &self,
            query: DealListQuery,
        ) -> RepositoryResult<Vec<(Deal, CustomerName)>>;
    }

    impl DealWriter for Repository {
        fn create_deal(&self, new_deal: &NewDeal) -> RepositoryResult<Deal>;
        fn update_deal(&self, id: DealId, updates: &UpdateDeal) -> RepositoryResult<Deal>;
        fn update_deal_stage(
            &self,
            id: DealId,
            expected: DealStage,
            update: StageUpdate,
        ) -> RepositoryResult<Option<Deal>>;
        fn delete_deal(&self, id: DealId) -> RepositoryResult<()>;
    }

    impl TaskReader for Repository {
        fn get_task_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>>;
        fn list_tasks(&self, query: TaskListQuery) -> RepositoryResult<Vec<Task>>;
    }

    impl TaskWriter for Repository {
        fn create_task(&self, new_task: &NewTask) -> RepositoryResult<Task>;
        fn update_task(
            &self,
            id: TaskId,
            updates: &UpdateTask,
            completed_at: Option<NaiveDateTime>,
        ) -> RepositoryResult<Task>;
        fn delete_task(&self, id: TaskId) -> RepositoryResult<()>;
    }

    impl ActivityReader for Repository {
        fn list_activities(&self, query: ActivityListQuery) -> RepositoryResult<Vec<Activity>>;
    }

    impl ActivityWriter for Repository {
        fn create_activity(&self, new_activity: &NewActivity) -> RepositoryResult<Activity>;
        fn delete_activity(&self, id: ActivityId) -> RepositoryResult<()>;
    }

    impl DriveFileReader for Repository {
        fn get_drive_file_by_id(&self, id: DriveFileId) -> RepositoryResult<Option<DriveFile>>;
        fn list_drive_files(
            &self,
            customer_id: Option<CustomerId>,
        ) -> RepositoryResult<Vec<DriveFile>>;
    }

    impl DriveFileWriter for Repository {
        fn create_drive_file(&self, new_file: &NewDriveFile) -> RepositoryResult<DriveFile>;
        fn delete_drive_file(&self, id: DriveFileId) -> RepositoryResult<()>;
    }

    impl LeadReader for Repository {
        fn get_lead_by_id(&self, id: LeadId) -> RepositoryResult<Option<Lead>>;
        fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)>;
    }

    impl LeadWriter for Repository {
        fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead>;
        fn update_lead_status(
            &self,
            id: LeadId,
            expected: LeadStatus,
            status: LeadStatus,
        ) -> RepositoryResult<Option<Lead>>;
        fn convert_lead(
            &self,
            id: LeadId,
            new_customer: &NewCustomer,
        ) -> RepositoryResult<Option<(Lead, Customer)>>;
    }

    impl ChatReader for Repository {
        fn get_chat_session(&self, id: ChatSessionId) -> RepositoryResult<Option<ChatSession>>;
        fn list_chat_sessions(
            &self,
            pagination: Option<Pagination>,
        ) -> RepositoryResult<(usize, Vec<ChatSessionSummary>)>;
        fn list_chat_messages(
            &self,
            session_id: ChatSessionId,
        ) -> RepositoryResult<Vec<ChatMessage>>;
    }

    impl ChatWriter for Repository {
        fn create_chat_session(&self, visitor_id: &VisitorId) -> RepositoryResult<ChatSession>;
        fn append_chat_message(&self, message: &NewChatMessage) -> RepositoryResult<ChatMessage>;
        fn delete_chat_session(&self, id: ChatSessionId) -> RepositoryResult<()>;
    }

    impl QuizResultReader for Repository {
        fn get_quiz_result(&self, id: QuizResultId) -> RepositoryResult<Option<QuizResult>>;
    }

    impl QuizResultWriter for Repository {
        fn create_quiz_result(
            &self,
            result: &NewQuizResult,
            lead: Option<NewLead>,
        ) -> RepositoryResult<QuizResult>;
    }

    impl ArticleReader for Repository {
        fn get_article_by_id(&self, id: ArticleId) -> RepositoryResult<Option<Article>>;
        fn get_article_by_slug(&self, slug: &ArticleSlug) -> RepositoryResult<Option<Article>>;
        fn list_articles(&self, query: ArticleListQuery) -> RepositoryResult<Vec<Article>>;
    }

    impl ArticleWriter for Repository {
        fn create_article(&self, new_article: &NewArticle) -> RepositoryResult<Article>;
        fn update_article(
            &self,
            id: ArticleId,
            updates: &UpdateArticle,
        ) -> RepositoryResult<Article>;
        fn upsert_article(&self, article: &NewArticle) -> RepositoryResult<Article>;
        fn delete_article(&self, id: ArticleId) -> RepositoryResult<()>;
    }

    impl DashboardReader for Repository {
        fn dashboard_stats(
            &self,
            today: NaiveDate,
            chat_since: NaiveDateTime,
        ) -> RepositoryResult<DashboardStats>;
    }
}
