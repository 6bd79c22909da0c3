//! Inbound leads collected by the marketing site.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CustomerId, EmailAddress, LeadId, NonEmptyString, PersonName, PhoneNumber, SanitizedText,
};

/// Form or widget a lead came in through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadSource {
    Contact,
    Quiz,
    Pricing,
    Demo,
    Chat,
}

text_enum!(LeadSource {
    Contact => "contact",
    Quiz => "quiz",
    Pricing => "pricing",
    Demo => "demo",
    Chat => "chat",
});

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Converted,
    Discarded,
}

text_enum!(LeadStatus {
    New => "new",
    Contacted => "contacted",
    Qualified => "qualified",
    Converted => "converted",
    Discarded => "discarded",
});

impl LeadStatus {
    /// Whether a manual status change from `self` to `next` is allowed.
    ///
    /// Leads move forward through the funnel, may be discarded at any open
    /// step and a discarded lead may be reopened. `Converted` is terminal and
    /// only reachable through conversion.
    pub fn can_transition_to(self, next: LeadStatus) -> bool {
        use LeadStatus::*;
        matches!(
            (self, next),
            (New, Contacted)
                | (New, Qualified)
                | (Contacted, Qualified)
                | (New | Contacted | Qualified, Discarded)
                | (Discarded, New)
        )
    }

    /// Whether the lead may still be converted into a customer.
    pub fn is_convertible(self) -> bool {
        matches!(self, LeadStatus::New | LeadStatus::Contacted | LeadStatus::Qualified)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Lead {
    pub id: LeadId,
    pub name: PersonName,
    pub email: EmailAddress,
    pub organization: Option<NonEmptyString>,
    pub phone: Option<PhoneNumber>,
    pub source: LeadSource,
    pub message: Option<SanitizedText>,
    pub status: LeadStatus,
    pub customer_id: Option<CustomerId>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewLead {
    pub name: PersonName,
    pub email: EmailAddress,
    pub organization: Option<NonEmptyString>,
    pub phone: Option<PhoneNumber>,
    pub source: LeadSource,
    pub message: Option<SanitizedText>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn funnel_moves_forward() {
        assert!(LeadStatus::New.can_transition_to(LeadStatus::Contacted));
        assert!(LeadStatus::Contacted.can_transition_to(LeadStatus::Qualified));
        assert!(!LeadStatus::Qualified.can_transition_to(LeadStatus::New));
    }

    #[test]
    fn converted_is_terminal_and_not_set_manually() {
        for status in LeadStatus::ALL {
            assert!(!status.can_transition_to(LeadStatus::Converted));
            assert!(!LeadStatus::Converted.can_transition_to(*status));
        }
        assert!(!LeadStatus::Converted.is_convertible());
        assert!(!LeadStatus::Discarded.is_convertible());
    }

    #[test]
    fn discarded_lead_can_be_reopened() {
        assert!(LeadStatus::Qualified.can_transition_to(LeadStatus::Discarded));
        assert!(LeadStatus::Discarded.can_transition_to(LeadStatus::New));
    }
}
