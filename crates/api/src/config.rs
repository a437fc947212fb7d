use std::path::PathBuf;

use pita_core::imaging::{ThumbnailConfig, DEFAULT_THUMBNAIL_QUALITY, DEFAULT_THUMBNAIL_SIZE};

use crate::auth::jwt::JwtConfig;

/// The single admin account, configured out of band.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    /// Argon2 PHC string, see `pita-api hash-password`.
    pub password_hash: String,
}

impl AdminCredentials {
    /// Load the admin account from environment variables.
    ///
    /// | Env Var               | Required | Default |
    /// |-----------------------|----------|---------|
    /// | `ADMIN_USERNAME`      | no       | `admin` |
    /// | `ADMIN_PASSWORD_HASH` | **yes**  | --      |
    pub fn from_env() -> Self {
        let username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into());
        let password_hash = std::env::var("ADMIN_PASSWORD_HASH")
            .expect("ADMIN_PASSWORD_HASH must be set in the environment");
        Self {
            username,
            password_hash,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local
/// development. Runtime-editable site settings live in the database, not
/// here.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory uploaded media is stored in and served from.
    pub media_root: PathBuf,
    /// Request body limit for uploads, in bytes (default: 20 MiB).
    pub max_upload_bytes: usize,
    pub thumbnail: ThumbnailConfig,
    pub jwt: JwtConfig,
    pub admin: AdminCredentials,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default |
    /// |------------------------|---------|
    /// | `HOST`                 | `0.0.0.0` |
    /// | `PORT`                 | `8000`  |
    /// | `REQUEST_TIMEOUT_SECS` | `30`    |
    /// | `MEDIA_ROOT`           | `media` |
    /// | `MAX_UPLOAD_MB`        | `20`    |
    /// | `THUMBNAIL_SIZE`       | `400`   |
    /// | `THUMBNAIL_QUALITY`    | `75`    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let media_root = PathBuf::from(std::env::var("MEDIA_ROOT").unwrap_or_else(|_| "media".into()));

        let max_upload_mb: usize = std::env::var("MAX_UPLOAD_MB")
            .unwrap_or_else(|_| "20".into())
            .parse()
            .expect("MAX_UPLOAD_MB must be a valid usize");

        let size: u32 = std::env::var("THUMBNAIL_SIZE")
            .unwrap_or_else(|_| DEFAULT_THUMBNAIL_SIZE.to_string())
            .parse()
            .expect("THUMBNAIL_SIZE must be a valid u32");
        let quality: u8 = std::env::var("THUMBNAIL_QUALITY")
            .unwrap_or_else(|_| DEFAULT_THUMBNAIL_QUALITY.to_string())
            .parse()
            .expect("THUMBNAIL_QUALITY must be a number between 1 and 100");

        Self {
            host,
            port,
            request_timeout_secs,
            media_root,
            max_upload_bytes: max_upload_mb * 1024 * 1024,
            thumbnail: ThumbnailConfig::new(size, quality),
            jwt: JwtConfig::from_env(),
            admin: AdminCredentials::from_env(),
        }
    }
}
