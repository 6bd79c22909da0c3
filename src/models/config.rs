//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Settings shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// ZeroMQ endpoint the emailer service subscribes to.
    pub zmq_emailer_pub: String,
    /// Directory drive uploads are written to.
    pub upload_dir: String,
    /// Upload size limit in megabytes.
    pub max_upload_mb: usize,
    /// Inbox receiving contact form notifications.
    pub sales_email: String,
    /// Public URL of the marketing site, used in emails.
    pub site_url: String,
}

impl ServerConfig {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}
