use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::domain::pipeline::{DealCard, DealStage};
use crate::domain::types::{CustomerId, DealId, DealTitle, MoneyCents, Probability};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Deal {
    pub id: DealId,
    pub customer_id: CustomerId,
    pub title: DealTitle,
    pub value: MoneyCents,
    pub stage: DealStage,
    pub probability: Probability,
    pub expected_close: Option<NaiveDate>,
    pub closed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Deal {
    pub fn is_open(&self) -> bool {
        !self.stage.is_closed()
    }

    pub fn weighted_value(&self) -> MoneyCents {
        self.value.weighted(self.probability)
    }

    pub fn card(&self, customer_name: impl Into<String>) -> DealCard {
        DealCard {
            id: self.id,
            title: self.title.to_string(),
            customer_name: customer_name.into(),
            value: self.value,
            probability: self.probability,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewDeal {
    pub customer_id: CustomerId,
    pub title: DealTitle,
    pub value: MoneyCents,
    pub stage: DealStage,
    pub probability: Probability,
    pub expected_close: Option<NaiveDate>,
    pub closed_at: Option<NaiveDateTime>,
}

impl NewDeal {
    /// Builds a deal, defaulting the probability to the stage default.
    pub fn new(
        customer_id: CustomerId,
        title: DealTitle,
        value: MoneyCents,
        stage: DealStage,
        probability: Option<Probability>,
        expected_close: Option<NaiveDate>,
    ) -> Self {
        Self {
            customer_id,
            title,
            value,
            stage,
            probability: probability.unwrap_or_else(|| stage.default_probability()),
            expected_close,
            closed_at: stage.is_closed().then(|| Utc::now().naive_utc()),
        }
    }
}

/// Editable deal fields. The stage only changes through a stage move.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateDeal {
    pub customer_id: CustomerId,
    pub title: DealTitle,
    pub value: MoneyCents,
    pub probability: Probability,
    pub expected_close: Option<NaiveDate>,
}

/// Requested stage change for one deal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageMove {
    pub to: DealStage,
    /// Stage the client saw; a mismatch with the stored stage is a conflict.
    pub expected_from: Option<DealStage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_deal_uses_stage_defaults() {
        let deal = NewDeal::new(
            CustomerId::new(1).unwrap(),
            DealTitle::new("Licentie 2025").unwrap(),
            MoneyCents::new(178_800).unwrap(),
            DealStage::Proposal,
            None,
            None,
        );
        assert_eq!(deal.probability.get(), 50);
        assert!(deal.closed_at.is_none());

        let won = NewDeal::new(
            CustomerId::new(1).unwrap(),
            DealTitle::new("Verlenging").unwrap(),
            MoneyCents::ZERO,
            DealStage::Won,
            Some(Probability::new(90).unwrap()),
            None,
        );
        assert_eq!(won.probability.get(), 90);
        assert!(won.closed_at.is_some());
    }
}
