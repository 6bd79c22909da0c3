use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        deal::{Deal, NewDeal, UpdateDeal},
        pipeline::{DealStage, StageUpdate},
        types::{CustomerName, DealId, TypeConstraintError},
    },
    models::deal::{Deal as DbDeal, NewDeal as DbNewDeal, UpdateDeal as DbUpdateDeal},
    repository::{
        DealListQuery, DealReader, DealWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::{customers, deals},
};

fn filtered(query: DealListQuery) -> deals::BoxedQuery<'static, diesel::sqlite::Sqlite> {
    let mut items = deals::table.into_boxed();
    if let Some(stage) = query.stage {
        items = items.filter(deals::stage.eq(stage.as_str()));
    }
    if let Some(customer_id) = query.customer_id {
        items = items.filter(deals::customer_id.eq(customer_id.get()));
    }
    items
}

impl DealReader for DieselRepository {
    fn get_deal_by_id(&self, id: DealId) -> RepositoryResult<Option<Deal>> {
        let mut conn = self.conn()?;

        let deal = deals::table
            .find(id.get())
            .first::<DbDeal>(&mut conn)
            .optional()?;

        deal.map(Deal::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_deals(&self, query: DealListQuery) -> RepositoryResult<Vec<Deal>> {
        let mut conn = self.conn()?;

        filtered(query)
            .order((deals::updated_at.desc(), deals::id.desc()))
            .load::<DbDeal>(&mut conn)?
            .into_iter()
            .map(|row| Deal::try_from(row).map_err(RepositoryError::from))
            .collect()
    }

    fn list_deals_with_customer(
        &self,
        query: DealListQuery,
    ) -> RepositoryResult<Vec<(Deal, CustomerName)>> {
        let mut conn = self.conn()?;

        let mut items = deals::table
            .inner_join(customers::table)
            .select((DbDeal::as_select(), customers::name))
            .into_boxed();
        if let Some(stage) = query.stage {
            items = items.filter(deals::stage.eq(stage.as_str()));
        }
        if let Some(customer_id) = query.customer_id {
            items = items.filter(deals::customer_id.eq(customer_id.get()));
        }

        items
            .order((deals::created_at.asc(), deals::id.asc()))
            .load::<(DbDeal, String)>(&mut conn)?
            .into_iter()
            .map(|(row, name)| -> Result<_, TypeConstraintError> {
                Ok((Deal::try_from(row)?, CustomerName::new(name)?))
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(RepositoryError::from)
    }
}

impl DealWriter for DieselRepository {
    fn create_deal(&self, new_deal: &NewDeal) -> RepositoryResult<Deal> {
        let mut conn = self.conn()?;

        let row = diesel::insert_into(deals::table)
            .values(DbNewDeal::from(new_deal))
            .get_result::<DbDeal>(&mut conn)?;

        Deal::try_from(row).map_err(RepositoryError::from)
    }

    fn update_deal(&self, id: DealId, updates: &UpdateDeal) -> RepositoryResult<Deal> {
        let mut conn = self.conn()?;

        let changes = DbUpdateDeal::from(updates);
        let row = diesel::update(deals::table.find(id.get()))
            .set((&changes, deals::updated_at.eq(Utc::now().naive_utc())))
            .get_result::<DbDeal>(&mut conn)?;

        Deal::try_from(row).map_err(RepositoryError::from)
    }

    fn update_deal_stage(
        &self,
        id: DealId,
        expected: DealStage,
        update: StageUpdate,
    ) -> RepositoryResult<Option<Deal>> {
        let mut conn = self.conn()?;

        let row = diesel::update(
            deals::table
                .filter(deals::id.eq(id.get()))
                .filter(deals::stage.eq(expected.as_str())),
        )
        .set((
            deals::stage.eq(update.stage.as_str()),
            deals::probability.eq(i32::from(update.probability)),
            deals::closed_at.eq(update.closed_at),
            deals::updated_at.eq(Utc::now().naive_utc()),
        ))
        .get_result::<DbDeal>(&mut conn)
        .optional()?;

        row.map(Deal::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn delete_deal(&self, id: DealId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(deals::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
