//! HTTP client for the photo upload endpoint
//!
//! Sends every staged photo as one `multipart/form-data` POST to
//! `{backend_url}/api/upload`, one part per file under the `files` field.

use super::traits::PhotoUploader;
use crate::error::UploadError;
use crate::state::{PhotoFile, UploadReceipt};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

/// Multipart field name shared by every uploaded file
const FILE_FIELD: &str = "files";

/// Message used when the server gives no reason for a failure
const GENERIC_FAILURE: &str = "Error uploading photos";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Uploads photos with reqwest
#[derive(Debug, Clone)]
pub struct HttpPhotoUploader {
    client: Client,
    backend_url: String,
}

impl HttpPhotoUploader {
    pub fn new(backend_url: &str) -> Result<Self, UploadError> {
        let client = Client::builder()
            .user_agent(concat!("quote-tui/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            backend_url: backend_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL of the upload endpoint
    pub fn endpoint(&self) -> String {
        format!("{}/api/upload", self.backend_url)
    }

    async fn build_form(files: Vec<PhotoFile>) -> Result<Form, UploadError> {
        let mut form = Form::new();
        for file in files {
            let bytes = tokio::fs::read(&file.path)
                .await
                .map_err(|source| UploadError::Io {
                    path: file.path.display().to_string(),
                    source,
                })?;
            let part = Part::bytes(bytes)
                .file_name(file.name)
                .mime_str(&file.content_type)?;
            form = form.part(FILE_FIELD, part);
        }
        Ok(form)
    }
}

#[async_trait]
impl PhotoUploader for HttpPhotoUploader {
    async fn upload(&self, files: Vec<PhotoFile>) -> Result<UploadReceipt, UploadError> {
        let count = files.len();
        let form = Self::build_form(files).await?;
        let url = self.endpoint();

        tracing::debug!(%url, count, "uploading photos");
        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return parse_receipt(&body);
        }

        let message = parse_error_message(&body);
        tracing::warn!(status = status.as_u16(), %message, "photo upload rejected");
        Err(UploadError::Server {
            status: status.as_u16(),
            message,
        })
    }
}

fn parse_receipt(body: &str) -> Result<UploadReceipt, UploadError> {
    serde_json::from_str(body).map_err(|e| UploadError::Decode(e.to_string()))
}

fn parse_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}
