use serde::Deserialize;
use validator::Validate;

use crate::domain::lead::{LeadSource, NewLead};
use crate::domain::pricing::{BillingPeriod, PriceQuote, quote};
use crate::domain::roi::DEFAULT_HOURS_PER_MONTH;
use crate::domain::types::{EmailAddress, NonEmptyString, PersonName, SanitizedText};
use crate::forms::{FormError, parse_field, parse_optional};

/// Query of the public pricing calculator.
#[derive(Debug, Deserialize, Validate)]
pub struct PricingParams {
    #[validate(range(max = 1_000_000))]
    pub volunteers: u32,
    #[validate(range(min = 0.0, max = 744.0))]
    pub hours_per_month: Option<f64>,
    #[serde(default)]
    pub billing: BillingPeriod,
}

impl PricingParams {
    pub fn quote(&self) -> Result<PriceQuote, FormError> {
        self.validate()?;
        Ok(quote(
            self.volunteers,
            self.hours_per_month.unwrap_or(DEFAULT_HOURS_PER_MONTH),
            self.billing,
        ))
    }
}

/// "Send me an offer" request from the pricing page.
#[derive(Debug, Deserialize, Validate)]
pub struct QuoteRequestForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub organization: Option<String>,
    #[serde(flatten)]
    #[validate(nested)]
    pub pricing: PricingParams,
}

impl QuoteRequestForm {
    /// Lead carrying a summary of the requested quote.
    pub fn into_lead(self) -> Result<(NewLead, PriceQuote), FormError> {
        self.validate()?;
        let quote = self.pricing.quote()?;

        let price = match quote.period_price {
            Some(price) => price.to_string(),
            None => "op aanvraag".to_string(),
        };
        let billing = match quote.billing {
            BillingPeriod::Monthly => "maandelijks",
            BillingPeriod::Yearly => "jaarlijks",
        };
        let summary = format!(
            "Offerte {} ({billing}) voor {} vrijwilligers: {price}",
            quote.plan_label, quote.volunteer_count
        );

        let lead = NewLead {
            name: parse_field("name", || PersonName::new(self.name))?,
            email: parse_field("email", || EmailAddress::new(self.email))?,
            organization: parse_optional("organization", self.organization, NonEmptyString::new)?,
            phone: None,
            source: LeadSource::Pricing,
            message: Some(parse_field("message", || SanitizedText::new(summary))?),
        };
        Ok((lead, quote))
    }
}
