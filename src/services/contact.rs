//! Contact and demo requests from the marketing site.

use crate::domain::lead::NewLead;
use crate::dto::site::ContactReceived;
use crate::forms::contact::ContactForm;
use crate::mailer::{EmailTemplates, Mailer, deliver};
use crate::repository::LeadWriter;
use crate::services::{ServiceError, ServiceResult};

pub const CONTACT_THANKS: &str = "Bedankt! We nemen binnen twee werkdagen contact met je op.";

/// Stores the request as a lead, then notifies sales and confirms to the
/// visitor. Mail problems do not fail the request.
pub fn submit_contact<R, M>(
    repo: &R,
    mailer: &M,
    templates: &EmailTemplates,
    sales_email: &str,
    form: ContactForm,
) -> ServiceResult<ContactReceived>
where
    R: LeadWriter + ?Sized,
    M: Mailer + ?Sized,
{
    let new_lead = NewLead::try_from(form)?;
    let lead = repo.create_lead(&new_lead).map_err(|err| {
        log::error!("Failed to store contact request: {err}");
        ServiceError::from(err)
    })?;

    log::info!("New {} lead {}", lead.source, lead.id);
    deliver(mailer, templates.contact_notification(&lead, sales_email));
    deliver(mailer, templates.contact_confirmation(&lead));

    Ok(ContactReceived {
        lead_id: lead.id,
        message: CONTACT_THANKS,
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::lead::{Lead, LeadSource, LeadStatus};
    use crate::domain::types::LeadId;
    use crate::mailer::MailerError;
    use crate::mailer::mock::MockMailer;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn form(demo: bool) -> ContactForm {
        ContactForm {
            name: "Pieter Jansen".into(),
            email: "pieter@sportclub.nl".into(),
            organization: Some("Sportclub Oost".into()),
            phone: None,
            message: "Graag meer informatie".into(),
            demo,
        }
    }

    fn repo() -> MockRepository {
        let mut repo = MockRepository::new();
        repo.expect_create_lead().returning(|new_lead| {
            let now = Utc::now().naive_utc();
            Ok(Lead {
                id: LeadId::new(31).unwrap(),
                name: new_lead.name.clone(),
                email: new_lead.email.clone(),
                organization: new_lead.organization.clone(),
                phone: new_lead.phone.clone(),
                source: new_lead.source,
                message: new_lead.message.clone(),
                status: LeadStatus::New,
                customer_id: None,
                created_at: now,
                updated_at: now,
            })
        });
        repo
    }

    fn templates() -> EmailTemplates {
        EmailTemplates::new("https://daar.nl").unwrap()
    }

    #[test]
    fn sends_notification_and_confirmation() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .withf(|message| message.to == "sales@daar.nl")
            .times(1)
            .returning(|_| Ok(()));
        mailer
            .expect_send()
            .withf(|message| message.to == "pieter@sportclub.nl")
            .times(1)
            .returning(|_| Ok(()));

        let received =
            submit_contact(&repo(), &mailer, &templates(), "sales@daar.nl", form(false)).unwrap();

        assert_eq!(received.lead_id.get(), 31);
    }

    #[test]
    fn mail_failure_does_not_fail_the_request() {
        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .times(2)
            .returning(|_| Err(MailerError::Closed));

        assert!(
            submit_contact(&repo(), &mailer, &templates(), "sales@daar.nl", form(true)).is_ok()
        );
    }

    #[test]
    fn demo_flag_creates_demo_lead() {
        let mut repo = MockRepository::new();
        repo.expect_create_lead()
            .withf(|new_lead| new_lead.source == LeadSource::Demo)
            .times(1)
            .returning(|_| Err(RepositoryError::DatabaseError("database is locked".into())));
        let mailer = MockMailer::new();

        let result = submit_contact(&repo, &mailer, &templates(), "sales@daar.nl", form(true));
        assert!(result.is_err());
    }

    #[test]
    fn invalid_email_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_create_lead().times(0);
        let mailer = MockMailer::new();
        let mut form = form(false);
        form.email = "geen-adres".into();

        assert!(matches!(
            submit_contact(&repo, &mailer, &templates(), "sales@daar.nl", form),
            Err(ServiceError::Form(_))
        ));
    }
}
