use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        customer::{Customer, NewCustomer, UpdateCustomer},
        types::CustomerId,
    },
    models::customer::{Customer as DbCustomer, NewCustomer as DbNewCustomer},
    repository::{
        CustomerListQuery, CustomerReader, CustomerWriter, DieselRepository,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::customers,
};

fn into_domain(rows: Vec<DbCustomer>) -> RepositoryResult<Vec<Customer>> {
    rows.into_iter()
        .map(|row| Customer::try_from(row).map_err(RepositoryError::from))
        .collect()
}

/// Boxed filter shared by the page query and the count query.
fn filtered(query: &CustomerListQuery) -> customers::BoxedQuery<'static, diesel::sqlite::Sqlite> {
    let mut items = customers::table.into_boxed();

    if let Some(status) = query.status {
        items = items.filter(customers::status.eq(status.as_str()));
    }

    if let Some(term) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{term}%");
        items = items.filter(
            customers::name
                .like(pattern.clone())
                .or(customers::contact_name.like(pattern.clone()))
                .or(customers::email.like(pattern.clone()))
                .or(customers::city.like(pattern)),
        );
    }

    items
}

impl CustomerReader for DieselRepository {
    fn get_customer_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>> {
        let mut conn = self.conn()?;

        let customer = customers::table
            .find(id.get())
            .first::<DbCustomer>(&mut conn)
            .optional()?;

        customer
            .map(Customer::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_customers(
        &self,
        query: CustomerListQuery,
    ) -> RepositoryResult<(usize, Vec<Customer>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(&query).count().get_result(&mut conn)?;

        let mut items = filtered(&query).order(customers::name.asc());
        if let Some(pagination) = query.pagination {
            items = items.limit(pagination.limit()).offset(pagination.offset());
        }
        let rows = items.load::<DbCustomer>(&mut conn)?;

        Ok((total as usize, into_domain(rows)?))
    }
}

impl CustomerWriter for DieselRepository {
    fn create_customer(&self, new_customer: &NewCustomer) -> RepositoryResult<Customer> {
        let mut conn = self.conn()?;

        let insertable = DbNewCustomer::from(new_customer);
        let row = diesel::insert_into(customers::table)
            .values(&insertable)
            .get_result::<DbCustomer>(&mut conn)?;

        Customer::try_from(row).map_err(RepositoryError::from)
    }

    fn create_customers(&self, new_customers: &[NewCustomer]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let insertables: Vec<DbNewCustomer> = new_customers.iter().map(Into::into).collect();

        conn.transaction::<usize, diesel::result::Error, _>(|conn| {
            diesel::insert_into(customers::table)
                .values(&insertables)
                .execute(conn)
        })
        .map_err(RepositoryError::from)
    }

    fn update_customer(
        &self,
        id: CustomerId,
        updates: &UpdateCustomer,
    ) -> RepositoryResult<Customer> {
        let mut conn = self.conn()?;

        let changes = DbNewCustomer::from(updates);
        let row = diesel::update(customers::table.find(id.get()))
            .set((&changes, customers::updated_at.eq(Utc::now().naive_utc())))
            .get_result::<DbCustomer>(&mut conn)?;

        Customer::try_from(row).map_err(RepositoryError::from)
    }

    fn delete_customer(&self, id: CustomerId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let affected = diesel::delete(customers::table.find(id.get())).execute(&mut conn)?;
        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
