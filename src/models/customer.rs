//! Diesel models for customers.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::customer::{Customer as DomainCustomer, NewCustomer as DomainNewCustomer};
use crate::domain::types::{
    CustomerId, CustomerName, EmailAddress, NonEmptyString, PersonName, PhoneNumber,
    SanitizedText, TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::customers)]
/// Diesel model for [`crate::domain::customer::Customer`].
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub volunteer_count: Option<i32>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::customers)]
#[diesel(treat_none_as_null = true)]
/// Insertable and update form of [`Customer`].
pub struct NewCustomer<'a> {
    pub name: &'a str,
    pub contact_name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub city: Option<&'a str>,
    pub volunteer_count: Option<i32>,
    pub status: &'a str,
    pub notes: Option<&'a str>,
}

pub(crate) fn volunteer_count_to_db(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

pub(crate) fn volunteer_count_from_db(value: i32) -> Result<u32, TypeConstraintError> {
    u32::try_from(value).map_err(|_| TypeConstraintError::OutOfRange {
        value: i64::from(value),
        min: 0,
        max: i64::from(i32::MAX),
    })
}

impl TryFrom<Customer> for DomainCustomer {
    type Error = TypeConstraintError;

    fn try_from(customer: Customer) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CustomerId::try_from(customer.id)?,
            name: CustomerName::new(customer.name)?,
            contact_name: customer.contact_name.map(PersonName::new).transpose()?,
            email: customer.email.map(EmailAddress::new).transpose()?,
            phone: customer.phone.map(PhoneNumber::new).transpose()?,
            city: customer.city.map(NonEmptyString::new).transpose()?,
            volunteer_count: customer
                .volunteer_count
                .map(volunteer_count_from_db)
                .transpose()?,
            status: customer.status.parse()?,
            notes: customer.notes.map(SanitizedText::new).transpose()?,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewCustomer> for NewCustomer<'a> {
    fn from(customer: &'a DomainNewCustomer) -> Self {
        Self {
            name: customer.name.as_str(),
            contact_name: customer.contact_name.as_ref().map(|v| v.as_str()),
            email: customer.email.as_ref().map(|v| v.as_str()),
            phone: customer.phone.as_ref().map(|v| v.as_str()),
            city: customer.city.as_ref().map(|v| v.as_str()),
            volunteer_count: customer.volunteer_count.map(volunteer_count_to_db),
            status: customer.status.as_str(),
            notes: customer.notes.as_ref().map(|v| v.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::CustomerStatus;
    use chrono::Utc;

    fn row() -> Customer {
        let now = Utc::now().naive_utc();
        Customer {
            id: 3,
            name: "Vrijwilligerscentrale Noord".to_string(),
            contact_name: Some("Sanne de Vries".to_string()),
            email: Some("sanne@vcnoord.nl".to_string()),
            phone: Some("+31201234567".to_string()),
            city: Some("Groningen".to_string()),
            volunteer_count: Some(120),
            status: "active".to_string(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn row_converts_into_domain() {
        let customer = DomainCustomer::try_from(row()).unwrap();
        assert_eq!(customer.id.get(), 3);
        assert_eq!(customer.status, CustomerStatus::Active);
        assert_eq!(customer.volunteer_count, Some(120));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let mut row = row();
        row.status = "gearchiveerd".to_string();
        assert!(DomainCustomer::try_from(row).is_err());
    }

    #[test]
    fn insertable_borrows_domain_values() {
        let domain = DomainNewCustomer::named(CustomerName::new("Buurtteam Oost").unwrap());
        let insertable = NewCustomer::from(&domain);
        assert_eq!(insertable.name, "Buurtteam Oost");
        assert_eq!(insertable.status, "prospect");
        assert!(insertable.email.is_none());
    }
}
