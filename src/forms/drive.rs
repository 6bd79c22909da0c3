use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use serde::Deserialize;

use crate::domain::drive_file::{DEFAULT_CONTENT_TYPE, upload_file_name};
use crate::domain::types::{CustomerId, FileName};
use crate::forms::{FormError, parse_field};

/// Multipart body of a drive upload.
///
/// The file field has no limit of its own; the `total_limit` registered from
/// `max_upload_mb` caps the body while it streams in.
#[derive(MultipartForm)]
pub struct UploadFileForm {
    pub file: TempFile,
    pub customer_id: Option<Text<i32>>,
}

/// Upload metadata checked against the configured limit.
#[derive(Debug)]
pub struct UploadMeta {
    pub customer_id: Option<CustomerId>,
    pub file_name: FileName,
    pub content_type: String,
    pub size_bytes: u64,
}

impl UploadFileForm {
    pub fn meta(&self, max_bytes: usize) -> Result<UploadMeta, FormError> {
        if self.file.size > max_bytes {
            return Err(FormError::Upload(format!(
                "bestand is groter dan {} MB",
                max_bytes / (1024 * 1024)
            )));
        }

        let raw_name = self.file.file_name.as_deref().unwrap_or_default();
        let customer_id = match &self.customer_id {
            Some(id) => Some(parse_field("customer_id", || CustomerId::new(id.0))?),
            None => None,
        };

        Ok(UploadMeta {
            customer_id,
            file_name: parse_field("file", || upload_file_name(raw_name))?,
            content_type: self
                .file
                .content_type
                .as_ref()
                .map(|mime| mime.essence_str().to_string())
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            size_bytes: self.file.size as u64,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DriveListParams {
    pub customer_id: Option<i32>,
}
