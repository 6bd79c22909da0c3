use chrono::{NaiveDate, Utc};

use crate::domain::task::{NewTask, Task, TaskStatus, UpdateTask, completion_timestamp};
use crate::domain::types::{CustomerId, DealId, TaskId};
use crate::forms::task::{TaskForm, TaskListParams};
use crate::repository::{TaskListQuery, TaskReader, TaskWriter};
use crate::services::{ServiceError, ServiceResult};

/// Lists tasks; `today` decides what counts as overdue.
pub fn list_tasks<R>(repo: &R, params: TaskListParams, today: NaiveDate) -> ServiceResult<Vec<Task>>
where
    R: TaskReader + ?Sized,
{
    let mut query = TaskListQuery::new();
    if let Some(status) = params.status {
        query = query.status(status);
    }
    if let Some(customer_id) = params.customer_id {
        query = query.customer(CustomerId::new(customer_id)?);
    }
    if let Some(deal_id) = params.deal_id {
        query = query.deal(DealId::new(deal_id)?);
    }
    if params.open {
        query = query.open_only();
    }
    if params.overdue {
        query = query.overdue_on(today);
    }

    repo.list_tasks(query).map_err(|err| {
        log::error!("Failed to list tasks: {err}");
        ServiceError::from(err)
    })
}

pub fn create_task<R>(repo: &R, form: TaskForm) -> ServiceResult<Task>
where
    R: TaskWriter + ?Sized,
{
    let new_task = NewTask::try_from(form)?;
    repo.create_task(&new_task).map_err(|err| {
        log::error!("Failed to create task: {err}");
        ServiceError::from(err)
    })
}

pub fn get_task<R>(repo: &R, task_id: i32) -> ServiceResult<Task>
where
    R: TaskReader + ?Sized,
{
    let task_id = TaskId::new(task_id)?;
    repo.get_task_by_id(task_id)?.ok_or(ServiceError::NotFound)
}

fn save<R>(repo: &R, current: &Task, updates: &UpdateTask) -> ServiceResult<Task>
where
    R: TaskWriter + ?Sized,
{
    let completed_at =
        completion_timestamp(updates.status, current.completed_at, Utc::now().naive_utc());
    repo.update_task(current.id, updates, completed_at)
        .map_err(|err| {
            log::error!("Failed to update task {}: {err}", current.id);
            ServiceError::from(err)
        })
}

/// Replaces the task fields. Moving to `done` stamps `completed_at`,
/// moving away from it clears the stamp.
pub fn update_task<R>(repo: &R, task_id: i32, form: TaskForm) -> ServiceResult<Task>
where
    R: TaskReader + TaskWriter + ?Sized,
{
    let current = get_task(repo, task_id)?;
    let updates = UpdateTask::try_from(form)?;
    save(repo, &current, &updates)
}

/// Marks a task done, keeping the original completion time if it already was.
pub fn complete_task<R>(repo: &R, task_id: i32) -> ServiceResult<Task>
where
    R: TaskReader + TaskWriter + ?Sized,
{
    let current = get_task(repo, task_id)?;
    if current.status == TaskStatus::Done {
        return Ok(current);
    }

    let updates = UpdateTask {
        customer_id: current.customer_id,
        deal_id: current.deal_id,
        title: current.title.clone(),
        description: current.description.clone(),
        due_date: current.due_date,
        priority: current.priority,
        status: TaskStatus::Done,
    };
    save(repo, &current, &updates)
}

pub fn delete_task<R>(repo: &R, task_id: i32) -> ServiceResult<()>
where
    R: TaskWriter + ?Sized,
{
    let task_id = TaskId::new(task_id)?;
    repo.delete_task(task_id).map_err(ServiceError::from)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::task::TaskPriority;
    use crate::domain::types::TaskTitle;
    use crate::repository::mock::MockRepository;

    fn task(status: TaskStatus) -> Task {
        let now = Utc::now().naive_utc();
        Task {
            id: TaskId::new(4).unwrap(),
            customer_id: None,
            deal_id: None,
            title: TaskTitle::new("Offerte sturen").unwrap(),
            description: None,
            due_date: None,
            priority: TaskPriority::High,
            status,
            completed_at: (status == TaskStatus::Done).then_some(now),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn completing_stamps_completed_at() {
        let mut repo = MockRepository::new();
        repo.expect_get_task_by_id()
            .returning(|_| Ok(Some(task(TaskStatus::Open))));
        repo.expect_update_task()
            .withf(|_, updates, completed_at| {
                updates.status == TaskStatus::Done
                    && updates.priority == TaskPriority::High
                    && completed_at.is_some()
            })
            .times(1)
            .returning(|_, _, completed_at| {
                let mut done = task(TaskStatus::Done);
                done.completed_at = completed_at;
                Ok(done)
            });

        let done = complete_task(&repo, 4).unwrap();

        assert_eq!(done.status, TaskStatus::Done);
    }

    #[test]
    fn reopening_clears_completed_at() {
        let mut repo = MockRepository::new();
        repo.expect_get_task_by_id()
            .returning(|_| Ok(Some(task(TaskStatus::Done))));
        repo.expect_update_task()
            .withf(|_, updates, completed_at| {
                updates.status == TaskStatus::Open && completed_at.is_none()
            })
            .times(1)
            .returning(|_, _, _| Ok(task(TaskStatus::Open)));

        let form = TaskForm {
            title: "Offerte sturen".into(),
            status: Some(TaskStatus::Open),
            ..TaskForm::default()
        };
        update_task(&repo, 4, form).unwrap();
    }

    #[test]
    fn completing_a_done_task_writes_nothing() {
        let mut repo = MockRepository::new();
        repo.expect_get_task_by_id()
            .returning(|_| Ok(Some(task(TaskStatus::Done))));
        repo.expect_update_task().times(0);

        complete_task(&repo, 4).unwrap();
    }

    #[test]
    fn overdue_filter_uses_today() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let mut repo = MockRepository::new();
        repo.expect_list_tasks()
            .withf(move |query| query.overdue_on == Some(today))
            .times(1)
            .returning(|_| Ok(vec![]));

        let params = TaskListParams {
            overdue: true,
            ..TaskListParams::default()
        };
        list_tasks(&repo, params, today).unwrap();
    }
}
