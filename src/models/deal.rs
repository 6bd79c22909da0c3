//! Diesel models for pipeline deals.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::deal::{Deal as DomainDeal, NewDeal as DomainNewDeal, UpdateDeal as DomainUpdateDeal};
use crate::domain::types::{CustomerId, DealId, DealTitle, MoneyCents, Probability, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::deals)]
/// Diesel model for [`crate::domain::deal::Deal`].
pub struct Deal {
    pub id: i32,
    pub customer_id: i32,
    pub title: String,
    pub value_cents: i64,
    pub stage: String,
    pub probability: i32,
    pub expected_close: Option<NaiveDate>,
    pub closed_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::deals)]
/// Insertable form of [`Deal`].
pub struct NewDeal<'a> {
    pub customer_id: i32,
    pub title: &'a str,
    pub value_cents: i64,
    pub stage: &'a str,
    pub probability: i32,
    pub expected_close: Option<NaiveDate>,
    pub closed_at: Option<NaiveDateTime>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::deals)]
#[diesel(treat_none_as_null = true)]
/// Editable columns of a [`Deal`].
pub struct UpdateDeal<'a> {
    pub customer_id: i32,
    pub title: &'a str,
    pub value_cents: i64,
    pub probability: i32,
    pub expected_close: Option<NaiveDate>,
}

impl TryFrom<Deal> for DomainDeal {
    type Error = TypeConstraintError;

    fn try_from(deal: Deal) -> Result<Self, Self::Error> {
        Ok(Self {
            id: DealId::try_from(deal.id)?,
            customer_id: CustomerId::try_from(deal.customer_id)?,
            title: DealTitle::new(deal.title)?,
            value: MoneyCents::new(deal.value_cents)?,
            stage: deal.stage.parse()?,
            probability: Probability::new(deal.probability)?,
            expected_close: deal.expected_close,
            closed_at: deal.closed_at,
            created_at: deal.created_at,
            updated_at: deal.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewDeal> for NewDeal<'a> {
    fn from(deal: &'a DomainNewDeal) -> Self {
        Self {
            customer_id: deal.customer_id.get(),
            title: deal.title.as_str(),
            value_cents: deal.value.get(),
            stage: deal.stage.as_str(),
            probability: deal.probability.into(),
            expected_close: deal.expected_close,
            closed_at: deal.closed_at,
        }
    }
}

impl<'a> From<&'a DomainUpdateDeal> for UpdateDeal<'a> {
    fn from(deal: &'a DomainUpdateDeal) -> Self {
        Self {
            customer_id: deal.customer_id.get(),
            title: deal.title.as_str(),
            value_cents: deal.value.get(),
            probability: deal.probability.into(),
            expected_close: deal.expected_close,
        }
    }
}
