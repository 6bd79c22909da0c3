use diesel::prelude::*;

use crate::{
    domain::{
        activity::{Activity, NewActivity},
        types::ActivityId,
    },
    models::activity::{Activity as DbActivity, NewActivity as DbNewActivity},
    repository::{
        ActivityListQuery, ActivityReader, ActivityWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::activities,
};

impl ActivityReader for DieselRepository {
    fn list_activities(&self, query: ActivityListQuery) -> RepositoryResult<Vec<Activity>> {
        let mut conn = self.conn()?;

        let mut items = activities::table.into_boxed();
        if let Some(customer_id) = query.customer_id {
            items = items.filter(activities::customer_id.eq(customer_id.get()));
        }
        if let Some(deal_id) = query.deal_id {
            items = items.filter(activities::deal_id.eq(deal_id.get()));
        }
        items = items.order((activities::occurred_at.desc(), activities::id.desc()));
        if let Some(limit) = query.limit {
            items = items.limit(limit as i64);
        }

        items
            .load::<DbActivity>(&mut conn)?
            .into_iter()
            .map(|row| Activity::try_from(row).map_err(RepositoryError::from))
            .collect()
    }
}

impl ActivityWriter for DieselRepository {
    fn create_activity(&self, new_activity: &NewActivity) -> RepositoryResult<Activity> {
        let mut conn = self.conn()?;

        let row = diesel::insert_into(activities::table)
            .values(DbNewActivity::from(new_activity))
            .get_result::<DbActivity>(&mut conn)?;

        Activity::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_activity(&self, id: ActivityId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(activities::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
