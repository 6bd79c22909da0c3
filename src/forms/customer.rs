//! Forms for creating, editing and importing customers.

use std::io::{Read, Seek};

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use validator::Validate;

use crate::domain::customer::{CustomerStatus, ImportRowError, NewCustomer};
use crate::domain::types::{
    CustomerName, EmailAddress, NonEmptyString, PersonName, PhoneNumber, SanitizedText,
};
use crate::forms::{FormError, parse_field, parse_optional};

/// Create and update body for a customer.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CustomerForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    #[validate(range(max = 1_000_000))]
    pub volunteer_count: Option<u32>,
    #[serde(default)]
    pub status: CustomerStatus,
    pub notes: Option<String>,
}

impl TryFrom<CustomerForm> for NewCustomer {
    type Error = FormError;

    fn try_from(form: CustomerForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(NewCustomer {
            name: parse_field("name", || CustomerName::new(form.name))?,
            contact_name: parse_optional("contact_name", form.contact_name, PersonName::new)?,
            email: parse_optional("email", form.email, EmailAddress::new)?,
            phone: parse_optional("phone", form.phone, PhoneNumber::new)?,
            city: parse_optional("city", form.city, NonEmptyString::new)?,
            volunteer_count: form.volunteer_count,
            status: form.status,
            notes: parse_optional("notes", form.notes, SanitizedText::new)?,
        })
    }
}

/// Query string of the customer list.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerListParams {
    pub search: Option<String>,
    pub status: Option<CustomerStatus>,
    pub page: Option<usize>,
}

#[derive(MultipartForm)]
pub struct UploadCustomersForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

/// Outcome of reading an import file: valid rows and the rejected ones.
#[derive(Debug, Default)]
pub struct CustomerImport {
    pub customers: Vec<NewCustomer>,
    pub errors: Vec<ImportRowError>,
}

/// Column layout of the import header; unknown columns are ignored.
struct ImportColumns {
    name: usize,
    contact_name: Option<usize>,
    email: Option<usize>,
    phone: Option<usize>,
    city: Option<usize>,
    volunteer_count: Option<usize>,
}

impl ImportColumns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, FormError> {
        let find = |wanted: &str| {
            headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(wanted))
        };
        Ok(Self {
            name: find("name").ok_or_else(|| FormError::Csv("missing `name` column".into()))?,
            contact_name: find("contact_name"),
            email: find("email"),
            phone: find("phone"),
            city: find("city"),
            volunteer_count: find("volunteer_count"),
        })
    }

    fn row_to_form(&self, record: &csv::StringRecord) -> Result<CustomerForm, String> {
        let cell = |index: Option<usize>| {
            index
                .and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        let volunteer_count = match cell(self.volunteer_count) {
            Some(raw) => Some(
                raw.parse::<u32>()
                    .map_err(|_| format!("invalid volunteer_count: {raw}"))?,
            ),
            None => None,
        };

        Ok(CustomerForm {
            name: cell(Some(self.name)).unwrap_or_default(),
            contact_name: cell(self.contact_name),
            email: cell(self.email),
            phone: cell(self.phone),
            city: cell(self.city),
            volunteer_count,
            status: CustomerStatus::default(),
            notes: None,
        })
    }
}

impl CustomerImport {
    /// Reads `name,contact_name,email,phone,city,volunteer_count` rows.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FormError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let headers = rdr
            .headers()
            .map_err(|err| FormError::Csv(err.to_string()))?
            .clone();
        let columns = ImportColumns::from_headers(&headers)?;

        let mut import = CustomerImport::default();
        for (index, record) in rdr.records().enumerate() {
            // The header occupies line 1.
            let line = index + 2;
            let parsed = record
                .map_err(|err| err.to_string())
                .and_then(|record| columns.row_to_form(&record))
                .and_then(|form| NewCustomer::try_from(form).map_err(|err| err.to_string()));
            match parsed {
                Ok(customer) => import.customers.push(customer),
                Err(message) => import.errors.push(ImportRowError { line, message }),
            }
        }
        Ok(import)
    }
}

impl UploadCustomersForm {
    pub fn parse(&mut self) -> Result<CustomerImport, FormError> {
        let file = self.csv.file.as_file_mut();
        file.rewind()
            .map_err(|err| FormError::Upload(err.to_string()))?;
        CustomerImport::from_reader(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_normalizes_optional_fields() {
        let form = CustomerForm {
            name: " Stichting Buurtzorg ".into(),
            email: Some("INFO@Buurt.nl ".into()),
            phone: Some("020 123 4567".into()),
            city: Some("  ".into()),
            ..CustomerForm::default()
        };

        let customer = NewCustomer::try_from(form).unwrap();

        assert_eq!(customer.name.as_str(), "Stichting Buurtzorg");
        assert_eq!(customer.email.unwrap().as_str(), "info@buurt.nl");
        assert_eq!(customer.phone.unwrap().as_str(), "+31201234567");
        assert!(customer.city.is_none());
    }

    #[test]
    fn empty_name_is_rejected() {
        let form = CustomerForm::default();
        assert!(matches!(
            NewCustomer::try_from(form),
            Err(FormError::Validation(_))
        ));
    }

    #[test]
    fn import_reports_bad_rows_and_keeps_good_ones() {
        let csv = "name,contact_name,email,phone,city,volunteer_count,ignored\n\
                   Voedselbank Utrecht,Anna,anna@vb.nl,,Utrecht,120,x\n\
                   ,Nobody,,,,,\n\
                   Sportclub,,not-an-email,,,,\n\
                   Hospice,,,,Zwolle,veel,\n\
                   Dorpshuis,,,,,15,\n";

        let import = CustomerImport::from_reader(csv.as_bytes()).unwrap();

        let names: Vec<_> = import.customers.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Voedselbank Utrecht", "Dorpshuis"]);
        assert_eq!(import.customers[0].volunteer_count, Some(120));
        let lines: Vec<_> = import.errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 4, 5]);
    }

    #[test]
    fn import_requires_name_column() {
        let result = CustomerImport::from_reader("email\na@b.nl\n".as_bytes());
        assert!(matches!(result, Err(FormError::Csv(_))));
    }
}
