use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::task::{NewTask, TaskPriority, TaskStatus, UpdateTask};
use crate::domain::types::{CustomerId, DealId, SanitizedText, TaskTitle};
use crate::forms::{FormError, parse_field, parse_optional};

#[derive(Debug, Default, Deserialize, Validate)]
pub struct TaskForm {
    pub customer_id: Option<i32>,
    pub deal_id: Option<i32>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: TaskPriority,
    /// Only read on update.
    pub status: Option<TaskStatus>,
}

fn optional_id<T>(
    field: &'static str,
    value: Option<i32>,
    ctor: fn(i32) -> Result<T, crate::domain::types::TypeConstraintError>,
) -> Result<Option<T>, FormError> {
    value.map(|id| parse_field(field, || ctor(id))).transpose()
}

impl TryFrom<TaskForm> for NewTask {
    type Error = FormError;

    fn try_from(form: TaskForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(NewTask {
            customer_id: optional_id("customer_id", form.customer_id, CustomerId::new)?,
            deal_id: optional_id("deal_id", form.deal_id, DealId::new)?,
            title: parse_field("title", || TaskTitle::new(form.title))?,
            description: parse_optional("description", form.description, SanitizedText::new)?,
            due_date: form.due_date,
            priority: form.priority,
        })
    }
}

impl TryFrom<TaskForm> for UpdateTask {
    type Error = FormError;

    fn try_from(form: TaskForm) -> Result<Self, Self::Error> {
        let status = form.status.unwrap_or_default();
        let task = NewTask::try_from(form)?;

        Ok(UpdateTask {
            customer_id: task.customer_id,
            deal_id: task.deal_id,
            title: task.title,
            description: task.description,
            due_date: task.due_date,
            priority: task.priority,
            status,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskListParams {
    pub status: Option<TaskStatus>,
    pub customer_id: Option<i32>,
    pub deal_id: Option<i32>,
    #[serde(default)]
    pub overdue: bool,
    #[serde(default)]
    pub open: bool,
}
