use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::{
    domain::{
        dashboard::DashboardStats, lead::LeadStatus, pipeline::DealStage, task::TaskStatus,
        types::{MoneyCents, Probability},
    },
    repository::{DashboardReader, DieselRepository, errors::RepositoryResult},
    schema::{chat_sessions, deals, leads, quiz_results, tasks},
};

const CLOSED_STAGES: [&str; 2] = [DealStage::Won.as_str(), DealStage::Lost.as_str()];

impl DashboardReader for DieselRepository {
    fn dashboard_stats(
        &self,
        today: NaiveDate,
        chat_since: NaiveDateTime,
    ) -> RepositoryResult<DashboardStats> {
        let mut conn = self.conn()?;

        let new_leads: i64 = leads::table
            .filter(leads::status.eq(LeadStatus::New.as_str()))
            .count()
            .get_result(&mut conn)?;

        let open_deals: Vec<(i64, i32)> = deals::table
            .filter(deals::stage.ne_all(CLOSED_STAGES))
            .select((deals::value_cents, deals::probability))
            .load(&mut conn)?;

        let mut open_value = MoneyCents::ZERO;
        let mut weighted_value = MoneyCents::ZERO;
        for &(cents, probability) in &open_deals {
            let value = MoneyCents::new(cents)?;
            let probability = Probability::new(probability)?;
            open_value = open_value.saturating_add(value);
            weighted_value = weighted_value.saturating_add(value.weighted(probability));
        }

        let open_tasks: i64 = tasks::table
            .filter(tasks::status.ne(TaskStatus::Done.as_str()))
            .count()
            .get_result(&mut conn)?;

        let overdue_tasks: i64 = tasks::table
            .filter(tasks::status.ne(TaskStatus::Done.as_str()))
            .filter(tasks::due_date.lt(today))
            .count()
            .get_result(&mut conn)?;

        let chat_sessions_last_week: i64 = chat_sessions::table
            .filter(chat_sessions::last_message_at.ge(chat_since))
            .count()
            .get_result(&mut conn)?;

        let quiz_submissions: i64 = quiz_results::table.count().get_result(&mut conn)?;

        Ok(DashboardStats {
            new_leads: new_leads as usize,
            open_deals: open_deals.len(),
            open_pipeline_value: open_value,
            weighted_pipeline_value: weighted_value,
            open_tasks: open_tasks as usize,
            overdue_tasks: overdue_tasks as usize,
            chat_sessions_last_week: chat_sessions_last_week as usize,
            quiz_submissions: quiz_submissions as usize,
        })
    }
}
