//! Lead inbox: triage, conversion into customers and CSV export.

use crate::domain::lead::Lead;
use crate::domain::types::LeadId;
use crate::dto::leads::ConvertedLead;
use crate::forms::lead::{ConvertLeadForm, LeadListParams, LeadStatusForm};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{LeadListQuery, LeadReader, LeadWriter};
use crate::services::{ServiceError, ServiceResult};

const EXPORT_HEADER: [&str; 9] = [
    "id",
    "created_at",
    "name",
    "email",
    "organization",
    "phone",
    "source",
    "status",
    "message",
];

fn filtered_query(params: &LeadListParams) -> LeadListQuery {
    let mut query = LeadListQuery::new();
    if let Some(status) = params.status {
        query = query.status(status);
    }
    if let Some(source) = params.source {
        query = query.source(source);
    }
    query
}

/// Newest leads first, one page at a time.
pub fn list_leads<R>(repo: &R, params: LeadListParams) -> ServiceResult<Paginated<Lead>>
where
    R: LeadReader + ?Sized,
{
    let page = params.page.unwrap_or(1).max(1);
    let query = filtered_query(&params).paginate(page, DEFAULT_ITEMS_PER_PAGE);

    let (total, leads) = repo.list_leads(query).map_err(|err| {
        log::error!("Failed to list leads: {err}");
        err
    })?;

    Ok(Paginated::new(leads, total, page, DEFAULT_ITEMS_PER_PAGE))
}

pub fn get_lead<R>(repo: &R, lead_id: i32) -> ServiceResult<Lead>
where
    R: LeadReader + ?Sized,
{
    let lead_id = LeadId::new(lead_id)?;
    repo.get_lead_by_id(lead_id)?.ok_or(ServiceError::NotFound)
}

/// Changes the funnel status; setting the current status again is a no-op.
pub fn change_lead_status<R>(repo: &R, lead_id: i32, form: LeadStatusForm) -> ServiceResult<Lead>
where
    R: LeadReader + LeadWriter + ?Sized,
{
    let lead = get_lead(repo, lead_id)?;
    if lead.status == form.status {
        return Ok(lead);
    }
    if !lead.status.can_transition_to(form.status) {
        return Err(ServiceError::Conflict(format!(
            "lead {} kan niet van {} naar {}",
            lead.id, lead.status, form.status
        )));
    }

    repo.update_lead_status(lead.id, lead.status, form.status)
        .map_err(|err| {
            log::error!("Failed to update lead {}: {err}", lead.id);
            ServiceError::from(err)
        })?
        .ok_or_else(|| {
            ServiceError::Conflict(format!("lead {} is tegelijk gewijzigd", lead.id))
        })
}

/// Turns the lead into a customer and links both.
pub fn convert_lead<R>(repo: &R, lead_id: i32, form: ConvertLeadForm) -> ServiceResult<ConvertedLead>
where
    R: LeadReader + LeadWriter + ?Sized,
{
    let lead = get_lead(repo, lead_id)?;
    if !lead.status.is_convertible() {
        return Err(ServiceError::Conflict(format!(
            "lead {} met status {} kan niet worden omgezet",
            lead.id, lead.status
        )));
    }

    let new_customer = form.into_customer(&lead)?;
    let (lead, customer) = repo
        .convert_lead(lead.id, &new_customer)
        .map_err(|err| {
            log::error!("Failed to convert lead {}: {err}", lead.id);
            ServiceError::from(err)
        })?
        .ok_or_else(|| {
            ServiceError::Conflict(format!("lead {} is al omgezet of afgewezen", lead.id))
        })?;

    log::info!("Lead {} converted into customer {}", lead.id, customer.id);
    Ok(ConvertedLead { lead, customer })
}

/// Every lead matching the filter as CSV, newest first.
pub fn export_leads_csv<R>(repo: &R, params: LeadListParams) -> ServiceResult<Vec<u8>>
where
    R: LeadReader + ?Sized,
{
    let (_, leads) = repo.list_leads(filtered_query(&params)).map_err(|err| {
        log::error!("Failed to load leads for export: {err}");
        err
    })?;

    write_csv(&leads).map_err(|err| {
        log::error!("Failed to write lead export: {err}");
        ServiceError::Internal(err.to_string())
    })
}

fn write_csv(leads: &[Lead]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADER)?;

    for lead in leads {
        writer.write_record([
            lead.id.to_string(),
            lead.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            lead.name.to_string(),
            lead.email.to_string(),
            lead.organization
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            lead.phone.as_ref().map(ToString::to_string).unwrap_or_default(),
            lead.source.to_string(),
            lead.status.to_string(),
            lead.message
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))
}
