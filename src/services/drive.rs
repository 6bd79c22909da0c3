//! CRM file drive: uploads land under the configured upload directory, the
//! database keeps the metadata.

use std::path::PathBuf;

use crate::domain::drive_file::{DriveFile, NewDriveFile};
use crate::domain::types::{CustomerId, DriveFileId, StorageKey};
use crate::forms::drive::{DriveListParams, UploadFileForm};
use crate::repository::{DriveFileReader, DriveFileWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::storage::FileStore;

pub fn list_files<R>(repo: &R, params: DriveListParams) -> ServiceResult<Vec<DriveFile>>
where
    R: DriveFileReader + ?Sized,
{
    let customer_id = params.customer_id.map(CustomerId::new).transpose()?;
    repo.list_drive_files(customer_id).map_err(|err| {
        log::error!("Failed to list drive files: {err}");
        ServiceError::from(err)
    })
}

pub fn get_file<R>(repo: &R, file_id: i32) -> ServiceResult<DriveFile>
where
    R: DriveFileReader + ?Sized,
{
    let file_id = DriveFileId::new(file_id)?;
    repo.get_drive_file_by_id(file_id)?
        .ok_or(ServiceError::NotFound)
}

/// Metadata and on-disk location of a file for download.
pub fn file_for_download<R>(
    repo: &R,
    store: &FileStore,
    file_id: i32,
) -> ServiceResult<(DriveFile, PathBuf)>
where
    R: DriveFileReader + ?Sized,
{
    let file = get_file(repo, file_id)?;
    let path = store.path_for(&file.storage_key);
    if !path.is_file() {
        log::error!("Drive file {} is missing from {}", file.id, path.display());
        return Err(ServiceError::NotFound);
    }
    Ok((file, path))
}

/// Stores the upload and records it. The copy is removed again when the row
/// cannot be written.
pub fn upload_file<R>(
    repo: &R,
    store: &FileStore,
    max_bytes: usize,
    form: UploadFileForm,
) -> ServiceResult<DriveFile>
where
    R: DriveFileWriter + ?Sized,
{
    let meta = form.meta(max_bytes)?;
    let storage_key = StorageKey::new();

    store
        .store(&storage_key, form.file.file.path())
        .map_err(|err| {
            log::error!("Failed to store upload {}: {err}", meta.file_name);
            ServiceError::Internal(err.to_string())
        })?;

    let new_file = NewDriveFile {
        customer_id: meta.customer_id,
        file_name: meta.file_name,
        content_type: meta.content_type,
        size_bytes: meta.size_bytes,
        storage_key,
    };

    repo.create_drive_file(&new_file).map_err(|err| {
        log::error!("Failed to record upload {}: {err}", new_file.file_name);
        if let Err(cleanup) = store.remove(&storage_key) {
            log::warn!("Failed to remove orphaned upload {storage_key}: {cleanup}");
        }
        ServiceError::from(err)
    })
}

/// Deletes the row first, then the stored bytes.
pub fn delete_file<R>(repo: &R, store: &FileStore, file_id: i32) -> ServiceResult<()>
where
    R: DriveFileReader + DriveFileWriter + ?Sized,
{
    let file = get_file(repo, file_id)?;
    repo.delete_drive_file(file.id)?;

    if let Err(err) = store.remove(&file.storage_key) {
        log::warn!("Failed to remove stored file {}: {err}", file.storage_key);
    }
    Ok(())
}
