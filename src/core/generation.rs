//! The external text-generation call.
//!
//! [`TextGenerator`] is the seam the orchestrator talks to; [`GeminiClient`]
//! is the production implementation. The reply is returned as raw text and
//! interpreted elsewhere.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::error::Error as StdError;
use std::fmt;
use tracing::debug;

use crate::api::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, RequestContent,
    RequestPart,
};
use crate::utils::url::generate_content_url;

/// An image sent inline with the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub mime_type: String,
    pub bytes: Vec<u8>,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub image: Option<ImageAttachment>,
}

#[derive(Debug)]
pub enum GenerationError {
    /// The request never produced an HTTP response.
    Transport(String),
    /// The service answered with a non-success status.
    Api { status: u16, message: String },
    /// The response body was not the expected shape.
    Decode(String),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Transport(err) => write!(f, "Request failed: {err}"),
            GenerationError::Api { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            GenerationError::Decode(err) => write!(f, "Unexpected response body: {err}"),
        }
    }
}

impl StdError for GenerationError {}

#[async_trait(?Send)]
pub trait TextGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    system_instruction: String,
    temperature: f32,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        system_instruction: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
            system_instruction: system_instruction.into(),
            temperature,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn build_request(&self, request: &GenerationRequest) -> GenerateContentRequest {
        let mut parts = Vec::new();
        if !request.prompt.is_empty() {
            parts.push(RequestPart::text(request.prompt.clone()));
        }
        if let Some(image) = &request.image {
            parts.push(RequestPart::inline(
                image.mime_type.clone(),
                BASE64.encode(&image.bytes),
            ));
        }

        GenerateContentRequest {
            contents: vec![RequestContent {
                role: Some("user".to_string()),
                parts,
            }],
            system_instruction: RequestContent {
                role: None,
                parts: vec![RequestPart::text(self.system_instruction.clone())],
            },
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        }
    }
}

#[async_trait(?Send)]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let url = generate_content_url(&self.base_url, &self.model);
        let body = self.build_request(request);
        debug!(model = %self.model, has_image = request.image.is_some(), "sending generateContent");

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| GenerationError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message: summarize_api_error(&error_text),
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| GenerationError::Decode(err.to_string()))?;
        let text = parsed.text();
        debug!(chars = text.chars().count(), "generateContent reply received");
        Ok(text)
    }
}

fn extract_error_summary(value: &serde_json::Value) -> Option<String> {
    let summary = value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .or_else(|| {
            value.get("error").and_then(|v| match v {
                serde_json::Value::String(s) => Some(s.to_string()),
                _ => None,
            })
        })
        .or_else(|| {
            value
                .get("message")
                .and_then(|v| v.as_str().map(str::to_owned))
        });

    summary.map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// One-line description of an error body, preferring the service's own message.
pub fn summarize_api_error(error_text: &str) -> String {
    let trimmed = error_text.trim();
    if trimmed.is_empty() {
        return "<empty>".to_string();
    }

    if let Ok(json_value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        if let Some(summary) = extract_error_summary(&json_value) {
            if !summary.is_empty() {
                return summary;
            }
        }
    }

    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}
