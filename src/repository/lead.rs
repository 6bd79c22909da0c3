use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        customer::{Customer, NewCustomer},
        lead::{Lead, LeadStatus, NewLead},
        types::LeadId,
    },
    models::{
        customer::{Customer as DbCustomer, NewCustomer as DbNewCustomer},
        lead::{Lead as DbLead, NewLead as DbNewLead},
    },
    repository::{
        DieselRepository, LeadListQuery, LeadReader, LeadWriter,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::{customers, leads},
};

fn filtered(query: LeadListQuery) -> leads::BoxedQuery<'static, diesel::sqlite::Sqlite> {
    let mut items = leads::table.into_boxed();
    if let Some(status) = query.status {
        items = items.filter(leads::status.eq(status.as_str()));
    }
    if let Some(source) = query.source {
        items = items.filter(leads::source.eq(source.as_str()));
    }
    items
}

fn convertible_statuses() -> Vec<&'static str> {
    LeadStatus::ALL
        .iter()
        .filter(|status| status.is_convertible())
        .map(|status| status.as_str())
        .collect()
}

impl LeadReader for DieselRepository {
    fn get_lead_by_id(&self, id: LeadId) -> RepositoryResult<Option<Lead>> {
        let mut conn = self.conn()?;

        let lead = leads::table
            .find(id.get())
            .first::<DbLead>(&mut conn)
            .optional()?;

        lead.map(Lead::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(query).count().get_result(&mut conn)?;

        let mut items = filtered(query).order((leads::created_at.desc(), leads::id.desc()));
        if let Some(pagination) = query.pagination {
            items = items.limit(pagination.limit()).offset(pagination.offset());
        }

        let leads = items
            .load::<DbLead>(&mut conn)?
            .into_iter()
            .map(|row| Lead::try_from(row).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total as usize, leads))
    }
}

impl LeadWriter for DieselRepository {
    fn create_lead(&self, new_lead: &NewLead) -> RepositoryResult<Lead> {
        let mut conn = self.conn()?;

        let row = diesel::insert_into(leads::table)
            .values(DbNewLead::from(new_lead))
            .get_result::<DbLead>(&mut conn)?;

        Lead::try_from(row).map_err(RepositoryError::from)
    }

    fn update_lead_status(
        &self,
        id: LeadId,
        expected: LeadStatus,
        status: LeadStatus,
    ) -> RepositoryResult<Option<Lead>> {
        let mut conn = self.conn()?;

        let row = diesel::update(
            leads::table
                .filter(leads::id.eq(id.get()))
                .filter(leads::status.eq(expected.as_str())),
        )
        .set((
            leads::status.eq(status.as_str()),
            leads::updated_at.eq(Utc::now().naive_utc()),
        ))
        .get_result::<DbLead>(&mut conn)
        .optional()?;

        row.map(Lead::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn convert_lead(
        &self,
        id: LeadId,
        new_customer: &NewCustomer,
    ) -> RepositoryResult<Option<(Lead, Customer)>> {
        let mut conn = self.conn()?;

        let insertable = DbNewCustomer::from(new_customer);
        let converted = conn.transaction::<(DbLead, DbCustomer), diesel::result::Error, _>(|conn| {
            let customer = diesel::insert_into(customers::table)
                .values(&insertable)
                .get_result::<DbCustomer>(conn)?;

            // No convertible row rolls back the customer insert.
            let lead = diesel::update(
                leads::table
                    .filter(leads::id.eq(id.get()))
                    .filter(leads::status.eq_any(convertible_statuses())),
            )
            .set((
                leads::status.eq(LeadStatus::Converted.as_str()),
                leads::customer_id.eq(Some(customer.id)),
                leads::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbLead>(conn)
            .optional()?
            .ok_or(diesel::result::Error::RollbackTransaction)?;

            Ok((lead, customer))
        });

        let (lead_row, customer_row) = match converted {
            Ok(rows) => rows,
            Err(diesel::result::Error::RollbackTransaction) => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let lead = Lead::try_from(lead_row)?;
        let customer = Customer::try_from(customer_row)?;
        Ok(Some((lead, customer)))
    }
}
