//! Outbound email: templates rendered with tera and published as JSON on the
//! emailer's ZeroMQ socket.

use std::sync::mpsc::{self, Sender};
use std::thread;

use tera::{Context, Tera};
use thiserror::Error;

use crate::domain::lead::{Lead, LeadSource};
use crate::domain::pricing::{BillingPeriod, PriceQuote};
use crate::models::email::EmailMessage;

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("zmq error: {0}")]
    Zmq(#[from] zmq::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("mailer thread has stopped")]
    Closed,
}

/// Sink for outgoing email.
pub trait Mailer: Send + Sync {
    fn send(&self, message: EmailMessage) -> Result<(), MailerError>;
}

/// Publishes messages on a ZeroMQ PUB socket owned by a background thread.
pub struct ZmqMailer {
    queue: Sender<EmailMessage>,
}

impl ZmqMailer {
    /// Connects the PUB socket to `endpoint` and starts the sender thread.
    pub fn start(endpoint: &str) -> Result<Self, MailerError> {
        let context = zmq::Context::new();
        let socket = context.socket(zmq::PUB)?;
        socket.connect(endpoint)?;

        let (queue, inbox) = mpsc::channel::<EmailMessage>();
        thread::Builder::new()
            .name("zmq-mailer".into())
            .spawn(move || {
                // Keeps the context alive for as long as the socket is used.
                let _context = context;
                for message in inbox {
                    let payload = match serde_json::to_vec(&message) {
                        Ok(payload) => payload,
                        Err(err) => {
                            log::error!("Failed to serialize email to {}: {err}", message.to);
                            continue;
                        }
                    };
                    if let Err(err) = socket.send(payload, 0) {
                        log::error!("Failed to publish email to {}: {err}", message.to);
                    }
                }
                log::info!("Mailer queue closed");
            })
            .map_err(|_| MailerError::Closed)?;

        Ok(Self { queue })
    }
}

impl Mailer for ZmqMailer {
    fn send(&self, message: EmailMessage) -> Result<(), MailerError> {
        self.queue.send(message).map_err(|_| MailerError::Closed)
    }
}

const CONTACT_NOTIFICATION: &str = "contact_notification.txt";
const CONTACT_CONFIRMATION: &str = "contact_confirmation.txt";
const QUOTE_NOTIFICATION: &str = "quote_notification.txt";

/// Email bodies bundled into the binary.
#[derive(Clone)]
pub struct EmailTemplates {
    tera: Tera,
    site_url: String,
}

impl EmailTemplates {
    pub fn new(site_url: impl Into<String>) -> Result<Self, MailerError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (
                CONTACT_NOTIFICATION,
                include_str!("../templates/email/contact_notification.txt"),
            ),
            (
                CONTACT_CONFIRMATION,
                include_str!("../templates/email/contact_confirmation.txt"),
            ),
            (
                QUOTE_NOTIFICATION,
                include_str!("../templates/email/quote_notification.txt"),
            ),
        ])?;

        Ok(Self {
            tera,
            site_url: site_url.into(),
        })
    }

    fn context(&self, lead: &Lead) -> Context {
        let mut context = Context::new();
        context.insert("lead", lead);
        context.insert("site_url", &self.site_url);
        context
    }

    /// Notice for the sales inbox about a new contact or demo request.
    pub fn contact_notification(
        &self,
        lead: &Lead,
        sales_email: &str,
    ) -> Result<EmailMessage, MailerError> {
        let body = self
            .tera
            .render(CONTACT_NOTIFICATION, &self.context(lead))?;
        Ok(EmailMessage {
            to: sales_email.to_string(),
            subject: format!("Nieuwe {} van {}", request_kind(lead), lead.name),
            body,
            reply_to: Some(lead.email.to_string()),
        })
    }

    /// Confirmation sent back to the visitor.
    pub fn contact_confirmation(&self, lead: &Lead) -> Result<EmailMessage, MailerError> {
        let body = self
            .tera
            .render(CONTACT_CONFIRMATION, &self.context(lead))?;
        Ok(EmailMessage {
            to: lead.email.to_string(),
            subject: "We hebben je bericht ontvangen".to_string(),
            body,
            reply_to: None,
        })
    }

    pub fn quote_notification(
        &self,
        lead: &Lead,
        quote: &PriceQuote,
        sales_email: &str,
    ) -> Result<EmailMessage, MailerError> {
        let mut context = self.context(lead);
        context.insert("plan", quote.plan_label);
        context.insert("volunteers", &quote.volunteer_count);
        context.insert(
            "billing",
            match quote.billing {
                BillingPeriod::Monthly => "maandelijks",
                BillingPeriod::Yearly => "jaarlijks",
            },
        );
        context.insert(
            "price",
            &quote
                .period_price
                .map(|price| price.to_string())
                .unwrap_or_else(|| "op aanvraag".to_string()),
        );
        context.insert("happiness_moments", &quote.happiness_moments_per_month);

        let body = self.tera.render(QUOTE_NOTIFICATION, &context)?;
        Ok(EmailMessage {
            to: sales_email.to_string(),
            subject: format!("Offerteaanvraag {} van {}", quote.plan_label, lead.name),
            body,
            reply_to: Some(lead.email.to_string()),
        })
    }
}

fn request_kind(lead: &Lead) -> &'static str {
    match lead.source {
        LeadSource::Demo => "demo-aanvraag",
        _ => "contactaanvraag",
    }
}

/// Renders and sends one message. Failures are logged and swallowed so a
/// broken mail relay never fails the visitor's request.
pub fn deliver<M>(mailer: &M, message: Result<EmailMessage, MailerError>)
where
    M: Mailer + ?Sized,
{
    let result = message.and_then(|message| {
        let to = message.to.clone();
        mailer.send(message).map(|_| to)
    });
    match result {
        Ok(to) => log::info!("Queued email to {to}"),
        Err(err) => log::error!("Failed to send email: {err}"),
    }
}

#[cfg(feature = "test-mocks")]
pub mod mock {
    use mockall::mock;

    use super::{Mailer as MailSink, MailerError};
    use crate::models::email::EmailMessage;

    mock! {
        pub Mailer {}

        impl MailSink for Mailer {
            fn send(&self, message: EmailMessage) -> Result<(), MailerError>;
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::lead::LeadStatus;
    use crate::domain::pricing::quote;
    use crate::domain::types::{EmailAddress, LeadId, NonEmptyString, PersonName, SanitizedText};

    fn lead(source: LeadSource) -> Lead {
        let now = Utc::now().naive_utc();
        Lead {
            id: LeadId::new(21).unwrap(),
            name: PersonName::new("Fatima Bakker").unwrap(),
            email: EmailAddress::new("fatima@hospice.nl").unwrap(),
            organization: Some(NonEmptyString::new("Hospice Zonnehuis").unwrap()),
            phone: None,
            source,
            message: Some(SanitizedText::new("Kunnen jullie iets betekenen?").unwrap()),
            status: LeadStatus::New,
            customer_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn templates() -> EmailTemplates {
        EmailTemplates::new("https://daar.nl").unwrap()
    }

    #[test]
    fn notification_goes_to_sales_with_reply_to_visitor() {
        let message = templates()
            .contact_notification(&lead(LeadSource::Contact), "sales@daar.nl")
            .unwrap();

        assert_eq!(message.to, "sales@daar.nl");
        assert_eq!(message.reply_to.as_deref(), Some("fatima@hospice.nl"));
        assert!(message.subject.contains("contactaanvraag"));
        assert!(message.body.contains("Organisatie: Hospice Zonnehuis"));
        assert!(message.body.contains("Kunnen jullie iets betekenen?"));
        assert!(!message.body.contains("Telefoon"));
    }

    #[test]
    fn demo_requests_are_labelled() {
        let message = templates()
            .contact_notification(&lead(LeadSource::Demo), "sales@daar.nl")
            .unwrap();

        assert!(message.subject.starts_with("Nieuwe demo-aanvraag"));
    }

    #[test]
    fn confirmation_addresses_the_visitor() {
        let message = templates()
            .contact_confirmation(&lead(LeadSource::Contact))
            .unwrap();

        assert_eq!(message.to, "fatima@hospice.nl");
        assert!(message.body.starts_with("Beste Fatima Bakker,"));
        assert!(message.body.contains("https://daar.nl"));
    }

    #[test]
    fn quote_notification_lists_the_plan() {
        let quote = quote(60, 8.0, BillingPeriod::Yearly);
        let message = templates()
            .quote_notification(&lead(LeadSource::Pricing), &quote, "sales@daar.nl")
            .unwrap();

        assert!(message.body.contains(quote.plan_label));
        assert!(message.body.contains("Vrijwilligers: 60"));
        assert!(message.body.contains("Facturatie: jaarlijks"));
    }
}
