use serde::{Deserialize, Serialize};

/// Message published to the emailer service.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}
