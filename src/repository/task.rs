use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::{
    domain::{
        task::{NewTask, Task, TaskStatus, UpdateTask},
        types::TaskId,
    },
    models::task::{NewTask as DbNewTask, Task as DbTask, UpdateTask as DbUpdateTask},
    repository::{
        DieselRepository, TaskListQuery, TaskReader, TaskWriter,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::tasks,
};

impl TaskReader for DieselRepository {
    fn get_task_by_id(&self, id: TaskId) -> RepositoryResult<Option<Task>> {
        let mut conn = self.conn()?;

        let task = tasks::table
            .find(id.get())
            .first::<DbTask>(&mut conn)
            .optional()?;

        task.map(Task::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_tasks(&self, query: TaskListQuery) -> RepositoryResult<Vec<Task>> {
        let mut conn = self.conn()?;

        let mut items = tasks::table.into_boxed();
        if let Some(status) = query.status {
            items = items.filter(tasks::status.eq(status.as_str()));
        }
        if let Some(customer_id) = query.customer_id {
            items = items.filter(tasks::customer_id.eq(customer_id.get()));
        }
        if let Some(deal_id) = query.deal_id {
            items = items.filter(tasks::deal_id.eq(deal_id.get()));
        }
        if query.open_only || query.overdue_on.is_some() {
            items = items.filter(tasks::status.ne(TaskStatus::Done.as_str()));
        }
        if let Some(today) = query.overdue_on {
            items = items.filter(tasks::due_date.lt(today));
        }

        // Tasks without a due date sort last.
        items
            .order((
                tasks::due_date.is_null(),
                tasks::due_date.asc(),
                tasks::id.asc(),
            ))
            .load::<DbTask>(&mut conn)?
            .into_iter()
            .map(|row| Task::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl TaskWriter for DieselRepository {
    fn create_task(&self, new_task: &NewTask) -> RepositoryResult<Task> {
        let mut conn = self.conn()?;

        let row = diesel::insert_into(tasks::table)
            .values(DbNewTask::from(new_task))
            .get_result::<DbTask>(&mut conn)?;

        Task::try_from(row).map_err(RepositoryError::from)
    }

    fn update_task(
        &self,
        id: TaskId,
        updates: &UpdateTask,
        completed_at: Option<NaiveDateTime>,
    ) -> RepositoryResult<Task> {
        let mut conn = self.conn()?;

        let changes = DbUpdateTask::new(updates, completed_at);
        let row = diesel::update(tasks::table.find(id.get()))
            .set((&changes, tasks::updated_at.eq(Utc::now().naive_utc())))
            .get_result::<DbTask>(&mut conn)?;

        Task::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_task(&self, id: TaskId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(tasks::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
