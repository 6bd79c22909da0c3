use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ActivityId, CustomerId, DealId, SanitizedText};

/// Kind of customer contact being logged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Call,
    Email,
    Meeting,
    Note,
}

text_enum!(ActivityKind {
    Call => "call",
    Email => "email",
    Meeting => "meeting",
    Note => "note",
});

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Activity {
    pub id: ActivityId,
    pub customer_id: CustomerId,
    pub deal_id: Option<DealId>,
    pub kind: ActivityKind,
    pub summary: SanitizedText,
    pub occurred_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewActivity {
    pub customer_id: CustomerId,
    pub deal_id: Option<DealId>,
    pub kind: ActivityKind,
    pub summary: SanitizedText,
    pub occurred_at: NaiveDateTime,
}
