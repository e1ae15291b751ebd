//! GeminiFileStore - Gemini File API client for native document ingestion.
//!
//! Documents are uploaded as raw bytes via the File API's multipart
//! endpoint and referenced afterwards by the URI the service assigns.

use askdoc_core::document::{DocumentHandle, DocumentMetadata};
use askdoc_core::error::{AskdocError, Result};
use askdoc_core::remote::RemoteDocumentStore;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

const UPLOAD_URL: &str = "https://generativelanguage.googleapis.com/upload/v1beta/files";
const FILE_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application-level timeout per round-trip; expiry counts as a remote
/// failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Document store backed by the Gemini File API.
#[derive(Clone)]
pub struct GeminiFileStore {
    client: Client,
    api_key: String,
}

impl GeminiFileStore {
    /// Creates a new store client with the provided API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AskdocError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl RemoteDocumentStore for GeminiFileStore {
    async fn upload(
        &self,
        staged: &Path,
        display_name: &str,
        mime_type: &str,
    ) -> Result<DocumentHandle> {
        let bytes = tokio::fs::read(staged).await.map_err(|e| {
            AskdocError::io(format!(
                "Failed to read staged file {}: {e}",
                staged.display()
            ))
        })?;
        let size_bytes = bytes.len() as u64;

        let metadata = serde_json::to_string(&serde_json::json!({
            "file": { "display_name": display_name }
        }))?;
        let form = Form::new()
            .part(
                "metadata",
                Part::text(metadata)
                    .mime_str("application/json")
                    .map_err(|e| AskdocError::remote_upload(format!("Invalid metadata part: {e}")))?,
            )
            .part(
                "file",
                Part::bytes(bytes)
                    .file_name(display_name.to_string())
                    .mime_str(mime_type)
                    .map_err(|e| {
                        AskdocError::remote_upload(format!("Invalid MIME type '{mime_type}': {e}"))
                    })?,
            );

        tracing::debug!(display_name, size_bytes, "uploading document to File API");

        let url = format!("{UPLOAD_URL}?key={}", self.api_key);
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| AskdocError::remote_upload(format!("File API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read File API error body".to_string());
            return Err(AskdocError::remote_upload(format_api_error(status, &body_text)));
        }

        let parsed: UploadResponse = response.json().await.map_err(|err| {
            AskdocError::remote_upload(format!("Failed to parse File API response: {err}"))
        })?;

        Ok(parsed.file.into_handle(display_name, mime_type, size_bytes))
    }

    async fn get_metadata(&self, handle: &DocumentHandle) -> Result<DocumentMetadata> {
        // handle.name is the full resource path, e.g. "files/abc123"
        let url = format!("{FILE_BASE_URL}/{}?key={}", handle.name, self.api_key);
        let response = self.client.get(url).send().await.map_err(|err| {
            AskdocError::remote_metadata(format!("File API request failed: {err}"))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read File API error body".to_string());
            return Err(AskdocError::remote_metadata(format_api_error(status, &body_text)));
        }

        let resource: FileResource = response.json().await.map_err(|err| {
            AskdocError::remote_metadata(format!("Failed to parse File API response: {err}"))
        })?;

        Ok(DocumentMetadata {
            display_name: resource
                .display_name
                .unwrap_or_else(|| handle.display_name.clone()),
            mime_type: resource.mime_type.unwrap_or_else(|| "unknown".to_string()),
            processing_state: resource.state.unwrap_or_else(|| "unknown".to_string()),
        })
    }
}

#[derive(Deserialize)]
struct UploadResponse {
    file: FileResource,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileResource {
    name: String,
    uri: String,
    display_name: Option<String>,
    mime_type: Option<String>,
    /// The File API reports sizes as decimal strings.
    size_bytes: Option<String>,
    state: Option<String>,
}

impl FileResource {
    /// Builds the session-owned handle, falling back to locally known
    /// values for fields the service omitted.
    fn into_handle(self, display_name: &str, mime_type: &str, local_size: u64) -> DocumentHandle {
        DocumentHandle {
            name: self.name,
            uri: self.uri,
            display_name: self.display_name.unwrap_or_else(|| display_name.to_string()),
            mime_type: self.mime_type.unwrap_or_else(|| mime_type.to_string()),
            size_bytes: self
                .size_bytes
                .and_then(|s| s.parse().ok())
                .unwrap_or(local_size),
        }
    }
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[allow(dead_code)]
    code: Option<i32>,
    message: Option<String>,
    status: Option<String>,
}

fn format_api_error(status: StatusCode, body: &str) -> String {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.to_string());

    format!("File API error ({status}): {message}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_response_deserialization() {
        let body = r#"{
            "file": {
                "name": "files/abc123",
                "uri": "https://generativelanguage.googleapis.com/v1beta/files/abc123",
                "displayName": "report.pdf",
                "mimeType": "application/pdf",
                "sizeBytes": "10240",
                "state": "ACTIVE"
            }
        }"#;
        let parsed: UploadResponse = serde_json::from_str(body).unwrap();
        let handle = parsed.file.into_handle("report.pdf", "application/pdf", 0);
        assert_eq!(handle.name, "files/abc123");
        assert_eq!(handle.display_name, "report.pdf");
        assert_eq!(handle.size_bytes, 10240);
    }

    #[test]
    fn test_into_handle_falls_back_to_local_values() {
        let resource = FileResource {
            name: "files/xyz".to_string(),
            uri: "https://example.invalid/files/xyz".to_string(),
            display_name: None,
            mime_type: None,
            size_bytes: None,
            state: None,
        };
        let handle = resource.into_handle("notes.md", "text/markdown", 512);
        assert_eq!(handle.display_name, "notes.md");
        assert_eq!(handle.mime_type, "text/markdown");
        assert_eq!(handle.size_bytes, 512);
    }

    #[test]
    fn test_format_api_error() {
        let body = r#"{"error": {"code": 403, "message": "API key invalid", "status": "PERMISSION_DENIED"}}"#;
        let message = format_api_error(StatusCode::FORBIDDEN, body);
        assert!(message.contains("PERMISSION_DENIED: API key invalid"));
    }
}
