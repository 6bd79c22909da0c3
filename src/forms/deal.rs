use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::deal::{NewDeal, StageMove, UpdateDeal};
use crate::domain::pipeline::DealStage;
use crate::domain::types::{CustomerId, DealTitle, MoneyCents, Probability};
use crate::forms::{FormError, parse_field};

#[derive(Debug, Deserialize, Validate)]
pub struct DealForm {
    pub customer_id: i32,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(range(min = 0))]
    pub value_cents: i64,
    #[serde(default)]
    pub stage: Option<DealStage>,
    #[validate(range(min = 0, max = 100))]
    pub probability: Option<i32>,
    pub expected_close: Option<NaiveDate>,
}

/// Validated deal fields shared by create and update.
pub struct DealPayload {
    pub customer_id: CustomerId,
    pub title: DealTitle,
    pub value: MoneyCents,
    pub stage: DealStage,
    /// `None` keeps the stage default on create and the stored value on update.
    pub probability: Option<Probability>,
    pub expected_close: Option<NaiveDate>,
}

impl TryFrom<DealForm> for DealPayload {
    type Error = FormError;

    fn try_from(form: DealForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            customer_id: parse_field("customer_id", || CustomerId::new(form.customer_id))?,
            title: parse_field("title", || DealTitle::new(form.title))?,
            value: parse_field("value_cents", || MoneyCents::new(form.value_cents))?,
            stage: form.stage.unwrap_or(DealStage::Qualification),
            probability: form
                .probability
                .map(|p| parse_field("probability", || Probability::new(p)))
                .transpose()?,
            expected_close: form.expected_close,
        })
    }
}

impl DealPayload {
    pub fn into_new_deal(self) -> NewDeal {
        NewDeal::new(
            self.customer_id,
            self.title,
            self.value,
            self.stage,
            self.probability,
            self.expected_close,
        )
    }

    /// Update values; the stage in the payload is ignored.
    pub fn into_update(self, current_probability: Probability) -> UpdateDeal {
        UpdateDeal {
            customer_id: self.customer_id,
            title: self.title,
            value: self.value,
            probability: self.probability.unwrap_or(current_probability),
            expected_close: self.expected_close,
        }
    }
}

/// Body of `PATCH /api/crm/deals/{id}/stage`.
#[derive(Debug, Deserialize)]
pub struct StageMoveForm {
    pub stage: DealStage,
    /// Stage the client saw before the drag; enables the conflict check.
    pub from_stage: Option<DealStage>,
}

impl From<StageMoveForm> for StageMove {
    fn from(form: StageMoveForm) -> Self {
        StageMove {
            to: form.stage,
            expected_from: form.from_stage,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DealListParams {
    pub stage: Option<DealStage>,
    pub customer_id: Option<i32>,
}
