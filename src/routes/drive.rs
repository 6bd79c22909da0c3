use actix_files::{NamedFile, file_extension_to_mime};
use actix_multipart::form::MultipartForm;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, delete, get, post, web};

use crate::forms::drive::{DriveListParams, UploadFileForm};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::drive::{delete_file, file_for_download, get_file, list_files, upload_file};
use crate::storage::FileStore;

#[get("/crm/files")]
pub async fn files_index(
    params: web::Query<DriveListParams>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let files = list_files(repo.get_ref(), params.into_inner())?;
    Ok(HttpResponse::Ok().json(files))
}

#[post("/crm/files")]
pub async fn files_upload(
    repo: web::Data<DieselRepository>,
    store: web::Data<FileStore>,
    server_config: web::Data<ServerConfig>,
    MultipartForm(form): MultipartForm<UploadFileForm>,
) -> Result<HttpResponse, ServiceError> {
    let file = upload_file(
        repo.get_ref(),
        store.get_ref(),
        server_config.max_upload_bytes(),
        form,
    )?;
    Ok(HttpResponse::Created().json(file))
}

#[get("/crm/files/{file_id}")]
pub async fn files_show(
    file_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let file = get_file(repo.get_ref(), file_id.into_inner())?;
    Ok(HttpResponse::Ok().json(file))
}

#[get("/crm/files/{file_id}/download")]
pub async fn files_download(
    file_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    store: web::Data<FileStore>,
) -> Result<NamedFile, ServiceError> {
    let (file, path) = file_for_download(repo.get_ref(), store.get_ref(), file_id.into_inner())?;

    let named = NamedFile::open(&path).map_err(|err| {
        log::error!("Failed to open {}: {err}", path.display());
        ServiceError::Internal(err.to_string())
    })?;

    let extension = file.file_name.rsplit_once('.').map(|(_, ext)| ext);
    let named = match extension {
        Some(ext) => named.set_content_type(file_extension_to_mime(ext)),
        None => named,
    };

    Ok(named.set_content_disposition(ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(file.file_name.into_inner())],
    }))
}

#[delete("/crm/files/{file_id}")]
pub async fn files_delete(
    file_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    store: web::Data<FileStore>,
) -> Result<HttpResponse, ServiceError> {
    delete_file(repo.get_ref(), store.get_ref(), file_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
