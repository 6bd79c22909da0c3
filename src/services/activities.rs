use crate::domain::activity::{Activity, NewActivity};
use crate::domain::types::{ActivityId, CustomerId, DealId};
use crate::forms::activity::{ActivityForm, ActivityListParams};
use crate::repository::{ActivityListQuery, ActivityReader, ActivityWriter};
use crate::services::{ServiceError, ServiceResult};

/// Activity timeline of a customer or of a single deal, newest first.
pub fn list_activities<R>(repo: &R, params: ActivityListParams) -> ServiceResult<Vec<Activity>>
where
    R: ActivityReader + ?Sized,
{
    let mut query = match (params.customer_id, params.deal_id) {
        (Some(customer_id), None) => ActivityListQuery::customer(CustomerId::new(customer_id)?),
        (None, Some(deal_id)) => ActivityListQuery::deal(DealId::new(deal_id)?),
        _ => {
            return Err(ServiceError::Form(
                "geef precies een van customer_id of deal_id op".to_string(),
            ));
        }
    };
    if let Some(limit) = params.limit {
        query = query.limit(limit);
    }

    repo.list_activities(query).map_err(|err| {
        log::error!("Failed to list activities: {err}");
        ServiceError::from(err)
    })
}

pub fn create_activity<R>(repo: &R, form: ActivityForm) -> ServiceResult<Activity>
where
    R: ActivityWriter + ?Sized,
{
    let new_activity = NewActivity::try_from(form)?;
    repo.create_activity(&new_activity).map_err(|err| {
        log::error!("Failed to log activity: {err}");
        ServiceError::from(err)
    })
}

pub fn delete_activity<R>(repo: &R, activity_id: i32) -> ServiceResult<()>
where
    R: ActivityWriter + ?Sized,
{
    let activity_id = ActivityId::new(activity_id)?;
    repo.delete_activity(activity_id).map_err(ServiceError::from)
}
