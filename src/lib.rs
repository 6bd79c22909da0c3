#[cfg(feature = "server")]
use std::sync::Arc;

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_multipart::form::MultipartFormConfig;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "server")]
use crate::mailer::{EmailTemplates, Mailer, ZmqMailer};
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;
#[cfg(feature = "server")]
use crate::services::ServiceError;
#[cfg(feature = "server")]
use crate::storage::FileStore;

#[cfg(feature = "server")]
pub mod content;
#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "data")]
pub mod error_conversions;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod mailer;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod storage;

/// Shared state handed to every worker.
#[cfg(feature = "server")]
#[derive(Clone)]
pub struct AppState {
    pub repo: DieselRepository,
    pub mailer: Arc<dyn Mailer>,
    pub templates: EmailTemplates,
    pub store: FileStore,
    pub server_config: ServerConfig,
}

#[cfg(feature = "server")]
impl AppState {
    /// Registers the state and the `/api` scope on an app or test service.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.repo.clone()))
            .app_data(web::Data::from(self.mailer.clone()))
            .app_data(web::Data::new(self.templates.clone()))
            .app_data(web::Data::new(self.store.clone()))
            .app_data(web::Data::new(self.server_config.clone()))
            .app_data(
                MultipartFormConfig::default()
                    .total_limit(self.server_config.max_upload_bytes().max(1))
                    .error_handler(|err, _| rejected_payload(err)),
            )
            .app_data(web::JsonConfig::default().error_handler(|err, _| rejected_payload(err)))
            .app_data(web::QueryConfig::default().error_handler(|err, _| rejected_payload(err)))
            .app_data(web::PathConfig::default().error_handler(|err, _| rejected_payload(err)))
            .service(web::scope("/api").configure(routes::configure));
    }
}

/// Extractor failures answer with the same JSON error body as the handlers.
#[cfg(feature = "server")]
fn rejected_payload(err: impl std::fmt::Display) -> actix_web::Error {
    log::debug!("Rejected request payload: {err}");
    ServiceError::Form(err.to_string()).into()
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Background ZeroMQ publisher for outbound email.
    let mailer = ZmqMailer::start(&server_config.zmq_emailer_pub)
        .map_err(|e| std::io::Error::other(format!("Failed to start mailer: {e}")))?;

    let pool = db::establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let templates = EmailTemplates::new(server_config.site_url.clone())
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let store = FileStore::new(&server_config.upload_dir);
    store.ensure_root()?;

    let state = AppState {
        repo: DieselRepository::new(pool),
        mailer: Arc::new(mailer),
        templates,
        store,
        server_config: server_config.clone(),
    };

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .configure(|cfg| state.configure(cfg))
    })
    .bind(bind_address)?
    .run()
    .await
}
