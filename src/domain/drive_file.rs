//! Files uploaded to the CRM drive.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::{CustomerId, DriveFileId, FileName, StorageKey, TypeConstraintError};

/// Content type used when the upload does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DriveFile {
    pub id: DriveFileId,
    pub customer_id: Option<CustomerId>,
    pub file_name: FileName,
    pub content_type: String,
    pub size_bytes: u64,
    pub storage_key: StorageKey,
    pub uploaded_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewDriveFile {
    pub customer_id: Option<CustomerId>,
    pub file_name: FileName,
    pub content_type: String,
    pub size_bytes: u64,
    pub storage_key: StorageKey,
}

/// Keeps only the last path component of a client supplied file name.
pub fn upload_file_name(raw: &str) -> Result<FileName, TypeConstraintError> {
    let base = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim_matches(|c: char| c.is_whitespace() || c == '.');
    FileName::new(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_are_stripped_from_upload_names() {
        assert_eq!(upload_file_name("offerte.pdf").unwrap().as_str(), "offerte.pdf");
        assert_eq!(
            upload_file_name("C:\\Users\\anna\\contract.docx").unwrap().as_str(),
            "contract.docx"
        );
        assert_eq!(upload_file_name("../../etc/passwd").unwrap().as_str(), "passwd");
        assert!(upload_file_name("../").is_err());
        assert!(upload_file_name("..").is_err());
    }
}
