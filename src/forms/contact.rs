//! Public contact form.

use serde::Deserialize;
use validator::Validate;

use crate::domain::lead::{LeadSource, NewLead};
use crate::domain::types::{EmailAddress, NonEmptyString, PersonName, PhoneNumber, SanitizedText};
use crate::forms::{FormError, parse_field, parse_optional};

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 200))]
    pub organization: Option<String>,
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
    /// Demo requests arrive through the same endpoint.
    #[serde(default)]
    pub demo: bool,
}

impl TryFrom<ContactForm> for NewLead {
    type Error = FormError;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(NewLead {
            name: parse_field("name", || PersonName::new(form.name))?,
            email: parse_field("email", || EmailAddress::new(form.email))?,
            organization: parse_optional("organization", form.organization, NonEmptyString::new)?,
            phone: parse_optional("phone", form.phone, PhoneNumber::new)?,
            source: if form.demo {
                LeadSource::Demo
            } else {
                LeadSource::Contact
            },
            message: Some(parse_field("message", || SanitizedText::new(form.message))?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "Jan Jansen".into(),
            email: "jan@vereniging.nl".into(),
            message: "Graag meer informatie".into(),
            ..ContactForm::default()
        }
    }

    #[test]
    fn contact_form_becomes_contact_lead() {
        let lead = NewLead::try_from(form()).unwrap();
        assert_eq!(lead.source, LeadSource::Contact);
        assert_eq!(lead.message.unwrap().as_str(), "Graag meer informatie");
    }

    #[test]
    fn demo_flag_changes_source() {
        let mut form = form();
        form.demo = true;
        assert_eq!(NewLead::try_from(form).unwrap().source, LeadSource::Demo);
    }

    #[test]
    fn invalid_email_fails_validation() {
        let mut form = form();
        form.email = "jan-at-vereniging".into();
        assert!(matches!(
            NewLead::try_from(form),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn message_with_only_markup_is_rejected() {
        let mut form = form();
        form.message = "<script></script>".into();
        assert!(NewLead::try_from(form).is_err());
    }
}
