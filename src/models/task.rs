use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::task::{NewTask as DomainNewTask, Task as DomainTask, UpdateTask as DomainUpdateTask};
use crate::domain::types::{CustomerId, DealId, SanitizedText, TaskId, TaskTitle, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::tasks)]
pub struct Task {
    pub id: i32,
    pub customer_id: Option<i32>,
    pub deal_id: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: String,
    pub status: String,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tasks)]
pub struct NewTask<'a> {
    pub customer_id: Option<i32>,
    pub deal_id: Option<i32>,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub due_date: Option<NaiveDate>,
    pub priority: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::tasks)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateTask<'a> {
    pub customer_id: Option<i32>,
    pub deal_id: Option<i32>,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub due_date: Option<NaiveDate>,
    pub priority: &'a str,
    pub status: &'a str,
    pub completed_at: Option<NaiveDateTime>,
}

impl TryFrom<Task> for DomainTask {
    type Error = TypeConstraintError;

    fn try_from(task: Task) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TaskId::try_from(task.id)?,
            customer_id: task.customer_id.map(CustomerId::try_from).transpose()?,
            deal_id: task.deal_id.map(DealId::try_from).transpose()?,
            title: TaskTitle::new(task.title)?,
            description: task.description.map(SanitizedText::new).transpose()?,
            due_date: task.due_date,
            priority: task.priority.parse()?,
            status: task.status.parse()?,
            completed_at: task.completed_at,
            created_at: task.created_at,
            updated_at: task.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewTask> for NewTask<'a> {
    fn from(task: &'a DomainNewTask) -> Self {
        Self {
            customer_id: task.customer_id.map(CustomerId::get),
            deal_id: task.deal_id.map(DealId::get),
            title: task.title.as_str(),
            description: task.description.as_ref().map(|v| v.as_str()),
            due_date: task.due_date,
            priority: task.priority.as_str(),
        }
    }
}

impl<'a> UpdateTask<'a> {
    /// Changeset for `task` with the already resolved completion timestamp.
    pub fn new(task: &'a DomainUpdateTask, completed_at: Option<NaiveDateTime>) -> Self {
        Self {
            customer_id: task.customer_id.map(CustomerId::get),
            deal_id: task.deal_id.map(DealId::get),
            title: task.title.as_str(),
            description: task.description.as_ref().map(|v| v.as_str()),
            due_date: task.due_date,
            priority: task.priority.as_str(),
            status: task.status.as_str(),
            completed_at,
        }
    }
}
