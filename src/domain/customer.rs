//! CRM customers: volunteer organisations using or considering DAAR.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::activity::Activity;
use crate::domain::deal::Deal;
use crate::domain::task::Task;
use crate::domain::types::{
    CustomerId, CustomerName, EmailAddress, NonEmptyString, PersonName, PhoneNumber,
    SanitizedText,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    #[default]
    Prospect,
    Active,
    Inactive,
}

text_enum!(CustomerStatus {
    Prospect => "prospect",
    Active => "active",
    Inactive => "inactive",
});

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: CustomerName,
    pub contact_name: Option<PersonName>,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub city: Option<NonEmptyString>,
    pub volunteer_count: Option<u32>,
    pub status: CustomerStatus,
    pub notes: Option<SanitizedText>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Validated values for inserting or replacing a customer.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCustomer {
    pub name: CustomerName,
    pub contact_name: Option<PersonName>,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub city: Option<NonEmptyString>,
    pub volunteer_count: Option<u32>,
    pub status: CustomerStatus,
    pub notes: Option<SanitizedText>,
}

impl NewCustomer {
    /// Minimal customer with only a name, as created when converting a lead.
    pub fn named(name: CustomerName) -> Self {
        Self {
            name,
            contact_name: None,
            email: None,
            phone: None,
            city: None,
            volunteer_count: None,
            status: CustomerStatus::Prospect,
            notes: None,
        }
    }
}

/// Updates replace every editable column.
pub type UpdateCustomer = NewCustomer;

/// Customer with the related records shown on its detail page.
#[derive(Clone, Debug, Serialize)]
pub struct CustomerDetail {
    pub customer: Customer,
    pub deals: Vec<Deal>,
    pub open_tasks: Vec<Task>,
    pub recent_activities: Vec<Activity>,
}

/// A CSV line that could not be imported.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImportRowError {
    /// One-based line number in the uploaded file, header included.
    pub line: usize,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub inserted: usize,
    pub errors: Vec<ImportRowError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_text() {
        for status in CustomerStatus::ALL {
            assert_eq!(status.as_str().parse::<CustomerStatus>(), Ok(*status));
        }
        assert!("archived".parse::<CustomerStatus>().is_err());
    }

    #[test]
    fn named_customer_starts_as_prospect() {
        let customer = NewCustomer::named(CustomerName::new("Stichting Buurtkracht").unwrap());
        assert_eq!(customer.status, CustomerStatus::Prospect);
        assert!(customer.email.is_none());
    }
}
