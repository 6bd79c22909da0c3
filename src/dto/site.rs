//! Replies to the public marketing forms.

use serde::Serialize;

use crate::domain::pricing::PriceQuote;
use crate::domain::types::LeadId;

#[derive(Debug, Serialize)]
pub struct ContactReceived {
    pub lead_id: LeadId,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct QuoteRequested {
    pub lead_id: LeadId,
    pub quote: PriceQuote,
}
