//! Diesel models for leads.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::lead::{Lead as DomainLead, NewLead as DomainNewLead};
use crate::domain::types::{
    CustomerId, EmailAddress, LeadId, NonEmptyString, PersonName, PhoneNumber, SanitizedText,
    TypeConstraintError,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::leads)]
/// Diesel model for [`crate::domain::lead::Lead`].
pub struct Lead {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub organization: Option<String>,
    pub phone: Option<String>,
    pub source: String,
    pub message: Option<String>,
    pub status: String,
    pub customer_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::leads)]
/// Insertable form of [`Lead`].
pub struct NewLead<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub organization: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub source: &'a str,
    pub message: Option<&'a str>,
}

impl TryFrom<Lead> for DomainLead {
    type Error = TypeConstraintError;

    fn try_from(lead: Lead) -> Result<Self, Self::Error> {
        Ok(Self {
            id: LeadId::try_from(lead.id)?,
            name: PersonName::new(lead.name)?,
            email: EmailAddress::new(lead.email)?,
            organization: lead.organization.map(NonEmptyString::new).transpose()?,
            phone: lead.phone.map(PhoneNumber::new).transpose()?,
            source: lead.source.parse()?,
            message: lead.message.map(SanitizedText::new).transpose()?,
            status: lead.status.parse()?,
            customer_id: lead.customer_id.map(CustomerId::try_from).transpose()?,
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewLead> for NewLead<'a> {
    fn from(lead: &'a DomainNewLead) -> Self {
        Self {
            name: lead.name.as_str(),
            email: lead.email.as_str(),
            organization: lead.organization.as_ref().map(|v| v.as_str()),
            phone: lead.phone.as_ref().map(|v| v.as_str()),
            source: lead.source.as_str(),
            message: lead.message.as_ref().map(|v| v.as_str()),
        }
    }
}
