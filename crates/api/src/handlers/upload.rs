//! Multipart form parsing shared by the upload handlers.

use std::collections::HashMap;
use std::str::FromStr;

use axum::extract::Multipart;

use crate::error::{AppError, AppResult};
use crate::services::Upload;

/// A parsed multipart form: at most one `file` part plus text fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<Upload>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name == "file" {
                let filename = field.file_name().unwrap_or("").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.file = Some(Upload {
                    filename,
                    bytes: bytes.to_vec(),
                });
            } else {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.fields.insert(name, text);
            }
        }
        Ok(form)
    }

    pub fn take_file(&mut self) -> AppResult<Upload> {
        self.file
            .take()
            .ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))
    }

    pub fn text(&mut self, name: &str) -> String {
        self.fields.remove(name).unwrap_or_default()
    }

    /// Parse an optional field. Blank values count as absent.
    pub fn parse<T>(&mut self, name: &str) -> AppResult<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.fields.remove(name) {
            Some(value) if !value.trim().is_empty() => value
                .trim()
                .parse()
                .map(Some)
                .map_err(|e| AppError::BadRequest(format!("Invalid '{name}': {e}"))),
            _ => Ok(None),
        }
    }
}
