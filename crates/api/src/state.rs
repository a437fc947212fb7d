use std::sync::Arc;

use pita_core::media::MediaStorage;
use pita_mail::Mailer;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pita_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Uploaded files under the media root.
    pub media: Arc<MediaStorage>,
    /// Outbound mail for the contact form.
    pub mailer: Arc<dyn Mailer>,
}
