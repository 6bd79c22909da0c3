use crate::domain::pricing::PriceQuote;
use crate::dto::site::QuoteRequested;
use crate::forms::pricing::{PricingParams, QuoteRequestForm};
use crate::mailer::{EmailTemplates, Mailer, deliver};
use crate::repository::LeadWriter;
use crate::services::{ServiceError, ServiceResult};

pub fn get_quote(params: PricingParams) -> ServiceResult<PriceQuote> {
    Ok(params.quote()?)
}

/// Records a `pricing` lead carrying the quote and lets sales know.
pub fn request_quote<R, M>(
    repo: &R,
    mailer: &M,
    templates: &EmailTemplates,
    sales_email: &str,
    form: QuoteRequestForm,
) -> ServiceResult<QuoteRequested>
where
    R: LeadWriter + ?Sized,
    M: Mailer + ?Sized,
{
    let (new_lead, quote) = form.into_lead()?;
    let lead = repo.create_lead(&new_lead).map_err(|err| {
        log::error!("Failed to store quote request: {err}");
        ServiceError::from(err)
    })?;

    deliver(
        mailer,
        templates.quote_notification(&lead, &quote, sales_email),
    );

    Ok(QuoteRequested {
        lead_id: lead.id,
        quote,
    })
}
