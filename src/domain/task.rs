//! Follow-up tasks attached to customers or deals.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CustomerId, DealId, SanitizedText, TaskId, TaskTitle};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

text_enum!(TaskPriority {
    Low => "low",
    Medium => "medium",
    High => "high",
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Open,
    InProgress,
    Done,
}

text_enum!(TaskStatus {
    Open => "open",
    InProgress => "in_progress",
    Done => "done",
});

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub customer_id: Option<CustomerId>,
    pub deal_id: Option<DealId>,
    pub title: TaskTitle,
    pub description: Option<SanitizedText>,
    pub due_date: Option<NaiveDate>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub completed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Task {
    /// Unfinished with a due date before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != TaskStatus::Done && self.due_date.is_some_and(|due| due < today)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewTask {
    pub customer_id: Option<CustomerId>,
    pub deal_id: Option<DealId>,
    pub title: TaskTitle,
    pub description: Option<SanitizedText>,
    pub due_date: Option<NaiveDate>,
    pub priority: TaskPriority,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateTask {
    pub customer_id: Option<CustomerId>,
    pub deal_id: Option<DealId>,
    pub title: TaskTitle,
    pub description: Option<SanitizedText>,
    pub due_date: Option<NaiveDate>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
}

/// `completed_at` after a status change: kept or stamped when done,
/// cleared otherwise.
pub fn completion_timestamp(
    status: TaskStatus,
    previous: Option<NaiveDateTime>,
    now: NaiveDateTime,
) -> Option<NaiveDateTime> {
    match status {
        TaskStatus::Done => Some(previous.unwrap_or(now)),
        TaskStatus::Open | TaskStatus::InProgress => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, day).unwrap()
    }

    fn task(status: TaskStatus, due: Option<NaiveDate>) -> Task {
        let now = date(1).and_hms_opt(9, 0, 0).unwrap();
        Task {
            id: TaskId::new(1).unwrap(),
            customer_id: None,
            deal_id: None,
            title: TaskTitle::new("Demo inplannen").unwrap(),
            description: None,
            due_date: due,
            priority: TaskPriority::High,
            status,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn overdue_only_when_unfinished_and_past_due() {
        assert!(task(TaskStatus::Open, Some(date(9))).is_overdue(date(10)));
        assert!(!task(TaskStatus::Open, Some(date(10))).is_overdue(date(10)));
        assert!(!task(TaskStatus::Done, Some(date(1))).is_overdue(date(10)));
        assert!(!task(TaskStatus::InProgress, None).is_overdue(date(10)));
    }

    #[test]
    fn completion_is_stamped_once_and_cleared_on_reopen() {
        let first = date(2).and_hms_opt(10, 0, 0).unwrap();
        let later = date(3).and_hms_opt(10, 0, 0).unwrap();
        assert_eq!(completion_timestamp(TaskStatus::Done, None, first), Some(first));
        assert_eq!(
            completion_timestamp(TaskStatus::Done, Some(first), later),
            Some(first)
        );
        assert_eq!(completion_timestamp(TaskStatus::Open, Some(first), later), None);
    }

    #[test]
    fn status_text_uses_snake_case() {
        assert_eq!(TaskStatus::InProgress.as_str(), "in_progress");
        assert_eq!("in_progress".parse::<TaskStatus>(), Ok(TaskStatus::InProgress));
    }
}
