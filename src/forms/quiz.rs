//! Quiz submissions from the public assessment widget.

use serde::Deserialize;
use validator::Validate;

use crate::domain::lead::{LeadSource, NewLead};
use crate::domain::quiz::{Answer, OrganizationSize};
use crate::domain::quiz_result::NewQuizResult;
use crate::domain::roi::DEFAULT_HOURS_PER_MONTH;
use crate::domain::types::{EmailAddress, NonEmptyString, PersonName};
use crate::forms::{FormError, parse_optional};

#[derive(Debug, Deserialize, Validate)]
pub struct QuizForm {
    pub organization_size: OrganizationSize,
    #[validate(range(max = 1_000_000))]
    pub volunteer_count: Option<u32>,
    #[validate(range(min = 0.0, max = 744.0))]
    pub hours_per_month: Option<f64>,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub answers: Vec<Answer>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub organization: Option<String>,
}

/// A scored submission and, when contact details were left, its lead.
pub struct QuizSubmission {
    pub result: NewQuizResult,
    pub lead: Option<NewLead>,
}

impl QuizForm {
    fn evaluate(&self) -> NewQuizResult {
        NewQuizResult::evaluate(
            self.organization_size,
            self.volunteer_count,
            self.hours_per_month.unwrap_or(DEFAULT_HOURS_PER_MONTH),
            self.answers.clone(),
        )
    }

    /// Scores the answers without looking at the contact fields.
    pub fn score_only(self) -> Result<NewQuizResult, FormError> {
        self.validate()?;
        Ok(self.evaluate())
    }
}

impl TryFrom<QuizForm> for QuizSubmission {
    type Error = FormError;

    fn try_from(form: QuizForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let result = form.evaluate();

        let name = parse_optional("name", form.name, PersonName::new)?;
        let email = parse_optional("email", form.email, EmailAddress::new)?;
        let lead = match (name, email) {
            (Some(name), Some(email)) => Some(NewLead {
                name,
                email,
                organization: parse_optional(
                    "organization",
                    form.organization,
                    NonEmptyString::new,
                )?,
                phone: None,
                source: LeadSource::Quiz,
                message: None,
            }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(FormError::field("email", "required together with name"));
            }
            (None, Some(_)) => {
                return Err(FormError::field("name", "required together with email"));
            }
        };

        Ok(Self { result, lead })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quiz::{Profile, QUESTIONS};

    fn form(score: u8) -> QuizForm {
        QuizForm {
            organization_size: OrganizationSize::Sm,
            volunteer_count: None,
            hours_per_month: None,
            answers: QUESTIONS.iter().map(|q| Answer::new(q.id, score)).collect(),
            name: None,
            email: None,
            organization: None,
        }
    }

    #[test]
    fn anonymous_submission_has_no_lead() {
        let submission = QuizSubmission::try_from(form(3)).unwrap();
        assert!(submission.lead.is_none());
        assert_eq!(submission.result.scores.overall, 100.0);
        assert_eq!(submission.result.profile, Profile::Kampioen);
        assert_eq!(submission.result.volunteer_count, 60);
        assert_eq!(submission.result.hours_per_month, DEFAULT_HOURS_PER_MONTH);
    }

    #[test]
    fn contact_details_create_quiz_lead() {
        let mut form = form(1);
        form.name = Some("Piet".into());
        form.email = Some("piet@club.nl".into());
        let lead = QuizSubmission::try_from(form).unwrap().lead.unwrap();
        assert_eq!(lead.source, LeadSource::Quiz);
        assert_eq!(lead.email.as_str(), "piet@club.nl");
    }

    #[test]
    fn name_without_email_is_rejected() {
        let mut form = form(1);
        form.name = Some("Piet".into());
        assert!(matches!(
            QuizSubmission::try_from(form),
            Err(FormError::InvalidField { field: "email", .. })
        ));
    }

    #[test]
    fn negative_hours_fail_validation() {
        let mut form = form(2);
        form.hours_per_month = Some(-4.0);
        assert!(form.score_only().is_err());
    }
}
