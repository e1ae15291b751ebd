//! GeminiAnswerEngine - Direct REST API implementation for Gemini
//! generate-content.
//!
//! This client calls the Gemini REST API directly without CLI
//! dependency. Uploaded documents are referenced by their File API URI;
//! no text extraction happens on either side.

use askdoc_core::document::DocumentHandle;
use askdoc_core::error::{AskdocError, Result};
use askdoc_core::remote::RemoteAnswerEngine;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default model, matching the reference deployment.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Prompt used for the availability probe round-trip.
const PROBE_PROMPT: &str = "Hello";

/// Application-level timeout for a single generate-content round-trip.
/// Expiry is treated as a remote failure; requests are not cancellable
/// mid-flight beyond this.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Answer engine that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiAnswerEngine {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiAnswerEngine {
    /// Creates a new engine with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AskdocError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// The model this engine is configured for.
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, parts: Vec<Part>) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts,
            }],
        };

        tracing::debug!(model = %self.model, "sending generate-content request");

        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            BASE_URL,
            model = self.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|err| AskdocError::remote_answer(format!("Gemini API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(AskdocError::remote_answer(format_api_error(status, &body_text)));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| AskdocError::remote_answer(format!("Failed to parse Gemini response: {err}")))?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl RemoteAnswerEngine for GeminiAnswerEngine {
    async fn probe(&self) -> Result<()> {
        self.generate(vec![Part::Text {
            text: PROBE_PROMPT.to_string(),
        }])
        .await
        .map(|_| ())
    }

    async fn answer(&self, prompt: &str, handle: &DocumentHandle) -> Result<String> {
        let parts = vec![
            Part::Text {
                text: prompt.to_string(),
            },
            Part::FileData {
                file_data: FileDataPayload {
                    mime_type: handle.mime_type.clone(),
                    file_uri: handle.uri.clone(),
                },
            },
        ];
        self.generate(parts).await
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    FileData {
        #[serde(rename = "fileData")]
        file_data: FileDataPayload,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FileDataPayload {
    mime_type: String,
    file_uri: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
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

fn extract_text_response(response: GenerateContentResponse) -> Result<String> {
    response
        .candidates
        .and_then(|mut candidates| candidates.pop())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| {
            AskdocError::remote_answer("Gemini API returned no text in the response candidates")
        })
}

/// Formats a non-success HTTP status plus the Gemini error body into a
/// single human-readable cause string.
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

    format!("Gemini API error ({status}): {message}")
}
