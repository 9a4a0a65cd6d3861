//! Backend REST client
//!
//! Thin blocking wrapper over the two external collaborators: the upload
//! endpoint (single file in, extracted text or stored path out) and the
//! persistence endpoint (whole-document multipart replace). Nothing here
//! retries; a rejected or failed request leaves the in-memory course
//! state untouched and the error is surfaced to the caller.

use crate::course_model::Course;
use crate::payload::{PayloadError, SavePayload};
use reqwest::blocking::multipart::{Form, Part};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Errors from backend calls
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Payload error: {0}")]
    PayloadError(#[from] PayloadError),

    #[error("Backend rejected the request: {0}")]
    Rejected(String),
}

/// Response of the save endpoint
#[derive(Debug, Deserialize)]
struct SaveResponse {
    success: bool,
}

/// Response of the text-extraction upload endpoint
#[derive(Debug, Deserialize)]
struct ExtractResponse {
    success: bool,
    text: Option<String>,
}

/// Response of the media upload endpoint
#[derive(Debug, Deserialize)]
struct UploadResponse {
    success: bool,
    path: Option<String>,
}

/// Blocking client for the course backend
#[derive(Debug)]
pub struct BackendClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl BackendClient {
    /// Create a client for the given backend base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Replace the course document server-side
    ///
    /// Builds the whole-document payload (JSON tree plus still-local
    /// binaries keyed by coordinates) and posts it as one multipart
    /// request.
    pub fn push_course(&self, course: &Course) -> Result<(), ClientError> {
        let payload = SavePayload::build(course)?;

        let mut form = Form::new().text("document", payload.document);
        for part in payload.parts {
            form = form.part(
                part.name,
                Part::bytes(part.bytes).file_name(part.file_name),
            );
        }

        let url = self.endpoint("formations");
        log::info!("Pushing course to {}", url);
        let response: SaveResponse = self
            .http
            .post(url)
            .multipart(form)
            .send()?
            .error_for_status()?
            .json()?;

        if !response.success {
            return Err(ClientError::Rejected("save was not accepted".to_string()));
        }
        Ok(())
    }

    /// Extract text from an uploaded document, to seed a sub-chapter's
    /// content
    pub fn extract_text(&self, file: &Path) -> Result<String, ClientError> {
        let form = Form::new().part("file", Part::file(file)?);

        let response: ExtractResponse = self
            .http
            .post(self.endpoint("uploads/extract"))
            .multipart(form)
            .send()?
            .error_for_status()?
            .json()?;

        if !response.success {
            return Err(ClientError::Rejected("extraction failed".to_string()));
        }
        Ok(response.text.unwrap_or_default())
    }

    /// Upload one media file, returning the stored server-side path
    pub fn upload_media(&self, file: &Path) -> Result<String, ClientError> {
        let form = Form::new().part("file", Part::file(file)?);

        let response: UploadResponse = self
            .http
            .post(self.endpoint("uploads/media"))
            .multipart(form)
            .send()?
            .error_for_status()?
            .json()?;

        match (response.success, response.path) {
            (true, Some(path)) => Ok(path),
            _ => Err(ClientError::Rejected(
                "upload did not return a stored path".to_string(),
            )),
        }
    }

    /// Join a route onto the base URL
    fn endpoint(&self, route: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_join() {
        let client = BackendClient::new("https://api.example.com/");
        assert_eq!(
            client.endpoint("formations"),
            "https://api.example.com/formations"
        );
    }
}
