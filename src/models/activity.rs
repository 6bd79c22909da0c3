use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::activity::{Activity as DomainActivity, NewActivity as DomainNewActivity};
use crate::domain::types::{ActivityId, CustomerId, DealId, SanitizedText, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::activities)]
/// Diesel model for [`crate::domain::activity::Activity`].
pub struct Activity {
    pub id: i32,
    pub customer_id: i32,
    pub deal_id: Option<i32>,
    pub kind: String,
    pub summary: String,
    pub occurred_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::activities)]
pub struct NewActivity<'a> {
    pub customer_id: i32,
    pub deal_id: Option<i32>,
    pub kind: &'a str,
    pub summary: &'a str,
    pub occurred_at: NaiveDateTime,
}

impl TryFrom<Activity> for DomainActivity {
    type Error = TypeConstraintError;

    fn try_from(activity: Activity) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ActivityId::try_from(activity.id)?,
            customer_id: CustomerId::try_from(activity.customer_id)?,
            deal_id: activity.deal_id.map(DealId::try_from).transpose()?,
            kind: activity.kind.parse()?,
            summary: SanitizedText::new(activity.summary)?,
            occurred_at: activity.occurred_at,
            created_at: activity.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewActivity> for NewActivity<'a> {
    fn from(activity: &'a DomainNewActivity) -> Self {
        Self {
            customer_id: activity.customer_id.get(),
            deal_id: activity.deal_id.map(DealId::get),
            kind: activity.kind.as_str(),
            summary: activity.summary.as_str(),
            occurred_at: activity.occurred_at,
        }
    }
}
