use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::drive_file::{DriveFile as DomainDriveFile, NewDriveFile as DomainNewDriveFile};
use crate::domain::types::{CustomerId, DriveFileId, FileName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::drive_files)]
pub struct DriveFile {
    pub id: i32,
    pub customer_id: Option<i32>,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub storage_key: String,
    pub uploaded_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::drive_files)]
pub struct NewDriveFile<'a> {
    pub customer_id: Option<i32>,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub size_bytes: i64,
    pub storage_key: String,
}

impl TryFrom<DriveFile> for DomainDriveFile {
    type Error = TypeConstraintError;

    fn try_from(file: DriveFile) -> Result<Self, Self::Error> {
        Ok(Self {
            id: DriveFileId::try_from(file.id)?,
            customer_id: file.customer_id.map(CustomerId::try_from).transpose()?,
            file_name: FileName::new(file.file_name)?,
            content_type: file.content_type,
            size_bytes: u64::try_from(file.size_bytes)
                .map_err(|_| TypeConstraintError::NegativeAmount)?,
            storage_key: file.storage_key.parse()?,
            uploaded_at: file.uploaded_at,
        })
    }
}

impl<'a> From<&'a DomainNewDriveFile> for NewDriveFile<'a> {
    fn from(file: &'a DomainNewDriveFile) -> Self {
        Self {
            customer_id: file.customer_id.map(CustomerId::get),
            file_name: file.file_name.as_str(),
            content_type: file.content_type.as_str(),
            size_bytes: i64::try_from(file.size_bytes).unwrap_or(i64::MAX),
            storage_key: file.storage_key.to_string(),
        }
    }
}
