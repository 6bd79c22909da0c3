use serde::Deserialize;
use validator::Validate;

use crate::domain::customer::NewCustomer;
use crate::domain::lead::{Lead, LeadSource, LeadStatus};
use crate::domain::types::CustomerName;
use crate::forms::{FormError, parse_field};

#[derive(Debug, Default, Deserialize)]
pub struct LeadListParams {
    pub status: Option<LeadStatus>,
    pub source: Option<LeadSource>,
    pub page: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct LeadStatusForm {
    pub status: LeadStatus,
}

/// Optional overrides used when turning a lead into a customer.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ConvertLeadForm {
    #[validate(length(min = 1, max = 200))]
    pub customer_name: Option<String>,
    #[validate(range(max = 1_000_000))]
    pub volunteer_count: Option<u32>,
}

impl ConvertLeadForm {
    /// Customer record for `lead`: named after its organisation, or the
    /// person when no organisation was given.
    pub fn into_customer(self, lead: &Lead) -> Result<NewCustomer, FormError> {
        self.validate()?;

        let name = match self.customer_name {
            Some(name) => name,
            None => lead
                .organization
                .as_ref()
                .map(|org| org.as_str().to_string())
                .unwrap_or_else(|| lead.name.as_str().to_string()),
        };

        let mut customer = NewCustomer::named(parse_field("customer_name", || {
            CustomerName::new(name)
        })?);
        customer.contact_name = Some(lead.name.clone());
        customer.email = Some(lead.email.clone());
        customer.phone = lead.phone.clone();
        customer.volunteer_count = self.volunteer_count;
        customer.notes = lead.message.clone();
        Ok(customer)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::{EmailAddress, LeadId, NonEmptyString, PersonName};

    fn lead(organization: Option<&str>) -> Lead {
        let now = Utc::now().naive_utc();
        Lead {
            id: LeadId::new(1).unwrap(),
            name: PersonName::new("Ria de Vries").unwrap(),
            email: EmailAddress::new("ria@example.nl").unwrap(),
            organization: organization.map(|o| NonEmptyString::new(o).unwrap()),
            phone: None,
            source: LeadSource::Contact,
            message: None,
            status: LeadStatus::New,
            customer_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn customer_is_named_after_organization() {
        let customer = ConvertLeadForm::default()
            .into_customer(&lead(Some("Zorgboerderij De Hoeve")))
            .unwrap();
        assert_eq!(customer.name.as_str(), "Zorgboerderij De Hoeve");
        assert_eq!(customer.contact_name.unwrap().as_str(), "Ria de Vries");
        assert_eq!(customer.email.unwrap().as_str(), "ria@example.nl");
    }

    #[test]
    fn falls_back_to_person_name() {
        let customer = ConvertLeadForm::default()
            .into_customer(&lead(None))
            .unwrap();
        assert_eq!(customer.name.as_str(), "Ria de Vries");
    }
}
