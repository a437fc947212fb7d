//! Local filesystem storage for uploaded media.
//!
//! Paths handed to [`MediaStorage`] are relative, `/`-separated storage keys
//! (see [`crate::naming`]); they are resolved against the media root and
//! served to browsers under the media URL prefix.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Invalid media path '{0}'")]
    InvalidPath(String),

    #[error("Media I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl MediaError {
    fn io(path: &str, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_string(),
            source,
        }
    }
}

/// Media files rooted at a local directory.
#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
    url_prefix: String,
}

impl MediaStorage {
    /// Create storage rooted at `root`, served under `url_prefix` (e.g. `/media`).
    pub fn new(root: impl Into<PathBuf>, url_prefix: &str) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a storage key to a filesystem path, rejecting keys that are
    /// absolute or climb out of the root.
    pub fn path(&self, key: &str) -> Result<PathBuf, MediaError> {
        let relative = Path::new(key);
        let is_clean = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !is_clean {
            return Err(MediaError::InvalidPath(key.to_string()));
        }
        Ok(self.root.join(relative))
    }

    /// Public URL of a storage key.
    pub fn url(&self, key: &str) -> String {
        format!("{}/{key}", self.url_prefix)
    }

    async fn ensure_parent(&self, key: &str, path: &Path) -> Result<(), MediaError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| MediaError::io(key, e))?;
        }
        Ok(())
    }

    /// Write `bytes` to `key`, creating parent directories as needed.
    pub async fn write(&self, key: &str, bytes: &[u8]) -> Result<(), MediaError> {
        let path = self.path(key)?;
        self.ensure_parent(key, &path).await?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| MediaError::io(key, e))?;
        tracing::debug!(key, bytes = bytes.len(), "Media file written");
        Ok(())
    }

    pub async fn read(&self, key: &str) -> Result<Vec<u8>, MediaError> {
        let path = self.path(key)?;
        tokio::fs::read(&path)
            .await
            .map_err(|e| MediaError::io(key, e))
    }

    /// Move `from` to `to`, replacing any file already at `to`.
    pub async fn rename(&self, from: &str, to: &str) -> Result<(), MediaError> {
        let src = self.path(from)?;
        let dst = self.path(to)?;
        self.ensure_parent(to, &dst).await?;
        tokio::fs::rename(&src, &dst)
            .await
            .map_err(|e| MediaError::io(from, e))?;
        tracing::debug!(from, to, "Media file renamed");
        Ok(())
    }

    /// Delete `key`. Returns `false` if the file did not exist.
    pub async fn delete(&self, key: &str) -> Result<bool, MediaError> {
        let path = self.path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(key, "Media file deleted");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(MediaError::io(key, e)),
        }
    }

    /// Delete `key`, logging instead of failing. Used for cleanup paths where
    /// the primary error is already being reported.
    pub async fn discard(&self, key: &str) {
        if let Err(e) = self.delete(key).await {
            tracing::warn!(key, error = %e, "Failed to remove media file");
        }
    }

    pub async fn exists(&self, key: &str) -> Result<bool, MediaError> {
        let path = self.path(key)?;
        tokio::fs::try_exists(&path)
            .await
            .map_err(|e| MediaError::io(key, e))
    }

    /// Whether the media root is an existing directory.
    pub async fn is_available(&self) -> bool {
        tokio::fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }
}
