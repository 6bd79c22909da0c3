use serde::Serialize;

use crate::domain::customer::Customer;
use crate::domain::lead::Lead;

/// Result of converting a lead: the updated lead and its new customer.
#[derive(Debug, Serialize)]
pub struct ConvertedLead {
    pub lead: Lead,
    pub customer: Customer,
}
