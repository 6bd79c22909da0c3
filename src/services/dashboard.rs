use chrono::{Duration, NaiveDateTime};

use crate::domain::dashboard::DashboardStats;
use crate::repository::DashboardReader;
use crate::services::{ServiceError, ServiceResult};

/// Window for the "recent chats" counter.
pub const CHAT_WINDOW_DAYS: i64 = 7;

pub fn dashboard_stats<R>(repo: &R, now: NaiveDateTime) -> ServiceResult<DashboardStats>
where
    R: DashboardReader + ?Sized,
{
    let chat_since = now - Duration::days(CHAT_WINDOW_DAYS);
    repo.dashboard_stats(now.date(), chat_since).map_err(|err| {
        log::error!("Failed to load dashboard: {err}");
        ServiceError::from(err)
    })
}
