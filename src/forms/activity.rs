use chrono::{NaiveDateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::domain::activity::{ActivityKind, NewActivity};
use crate::domain::types::{CustomerId, DealId, SanitizedText};
use crate::forms::{FormError, parse_field};

#[derive(Debug, Deserialize, Validate)]
pub struct ActivityForm {
    pub customer_id: i32,
    pub deal_id: Option<i32>,
    pub kind: ActivityKind,
    #[validate(length(min = 1, max = 5000))]
    pub summary: String,
    /// Defaults to now.
    pub occurred_at: Option<NaiveDateTime>,
}

impl TryFrom<ActivityForm> for NewActivity {
    type Error = FormError;

    fn try_from(form: ActivityForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(NewActivity {
            customer_id: parse_field("customer_id", || CustomerId::new(form.customer_id))?,
            deal_id: form
                .deal_id
                .map(|id| parse_field("deal_id", || DealId::new(id)))
                .transpose()?,
            kind: form.kind,
            summary: parse_field("summary", || SanitizedText::new(form.summary))?,
            occurred_at: form
                .occurred_at
                .unwrap_or_else(|| Utc::now().naive_utc()),
        })
    }
}

/// Exactly one of the filters must be present.
#[derive(Debug, Default, Deserialize)]
pub struct ActivityListParams {
    pub customer_id: Option<i32>,
    pub deal_id: Option<i32>,
    pub limit: Option<usize>,
}
