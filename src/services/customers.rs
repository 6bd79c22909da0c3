//! Customer management: listing, detail view, edits and CSV import.

use crate::domain::customer::{Customer, CustomerDetail, ImportReport, NewCustomer};
use crate::domain::types::CustomerId;
use crate::forms::customer::{CustomerForm, CustomerListParams, UploadCustomersForm};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{
    ActivityListQuery, ActivityReader, CustomerListQuery, CustomerReader, CustomerWriter,
    DealListQuery, DealReader, TaskListQuery, TaskReader,
};
use crate::services::{ServiceError, ServiceResult};

/// Number of activities shown on the customer detail page.
pub const RECENT_ACTIVITY_LIMIT: usize = 10;

/// Returns one page of customers matching the search and status filter.
pub fn list_customers<R>(repo: &R, params: CustomerListParams) -> ServiceResult<Paginated<Customer>>
where
    R: CustomerReader + ?Sized,
{
    let page = params.page.unwrap_or(1).max(1);
    let mut query = CustomerListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(term) = params
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    {
        query = query.search(term);
    }
    if let Some(status) = params.status {
        query = query.status(status);
    }

    let (total, customers) = repo.list_customers(query).map_err(|err| {
        log::error!("Failed to list customers: {err}");
        err
    })?;

    Ok(Paginated::new(customers, total, page, DEFAULT_ITEMS_PER_PAGE))
}

/// Loads a customer with its deals, open tasks and latest activities.
pub fn get_customer<R>(repo: &R, customer_id: i32) -> ServiceResult<CustomerDetail>
where
    R: CustomerReader + DealReader + TaskReader + ActivityReader + ?Sized,
{
    let customer_id = CustomerId::new(customer_id)?;

    let customer = repo
        .get_customer_by_id(customer_id)?
        .ok_or(ServiceError::NotFound)?;

    let deals = repo.list_deals(DealListQuery::new().customer(customer_id))?;
    let open_tasks = repo.list_tasks(TaskListQuery::new().customer(customer_id).open_only())?;
    let recent_activities = repo.list_activities(
        ActivityListQuery::customer(customer_id).limit(RECENT_ACTIVITY_LIMIT),
    )?;

    Ok(CustomerDetail {
        customer,
        deals,
        open_tasks,
        recent_activities,
    })
}

pub fn create_customer<R>(repo: &R, form: CustomerForm) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    let new_customer = NewCustomer::try_from(form)?;

    repo.create_customer(&new_customer).map_err(|err| {
        log::error!("Failed to create customer: {err}");
        ServiceError::from(err)
    })
}

pub fn update_customer<R>(repo: &R, customer_id: i32, form: CustomerForm) -> ServiceResult<Customer>
where
    R: CustomerWriter + ?Sized,
{
    let customer_id = CustomerId::new(customer_id)?;
    let updates = NewCustomer::try_from(form)?;

    repo.update_customer(customer_id, &updates)
        .map_err(ServiceError::from)
}

/// Deletes the customer; deals, tasks and activities go with it.
pub fn delete_customer<R>(repo: &R, customer_id: i32) -> ServiceResult<()>
where
    R: CustomerWriter + ?Sized,
{
    let customer_id = CustomerId::new(customer_id)?;

    repo.delete_customer(customer_id).map_err(ServiceError::from)
}

/// Imports the uploaded CSV. Valid rows are inserted, the others reported.
pub fn import_customers<R>(repo: &R, form: &mut UploadCustomersForm) -> ServiceResult<ImportReport>
where
    R: CustomerWriter + ?Sized,
{
    let import = form.parse().map_err(|err| {
        log::error!("Failed to parse customers: {err}");
        ServiceError::from(err)
    })?;

    let inserted = if import.customers.is_empty() {
        0
    } else {
        repo.create_customers(&import.customers).map_err(|err| {
            log::error!("Failed to import customers: {err}");
            err
        })?
    };

    if !import.errors.is_empty() {
        log::warn!(
            "Customer import skipped {} row(s), inserted {inserted}",
            import.errors.len()
        );
    }

    Ok(ImportReport {
        inserted,
        errors: import.errors,
    })
}
