use serde::Serialize;

use crate::domain::types::MoneyCents;

/// Headline figures for the admin dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub new_leads: usize,
    pub open_deals: usize,
    pub open_pipeline_value: MoneyCents,
    pub weighted_pipeline_value: MoneyCents,
    pub open_tasks: usize,
    pub overdue_tasks: usize,
    pub chat_sessions_last_week: usize,
    pub quiz_submissions: usize,
}
