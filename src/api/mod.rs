//! Wire payloads for the `generateContent` endpoint.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone)]
pub struct InlineData {
    pub mime_type: String,
    /// Base64-encoded bytes.
    pub data: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct RequestPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl RequestPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn inline(mime_type: impl Into<String>, data: String) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data,
            }),
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct RequestContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub parts: Vec<RequestPart>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
    pub system_instruction: RequestContent,
    pub generation_config: GenerationConfig,
}

#[derive(Deserialize, Debug, Default)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<ResponseContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate; empty when the model
    /// returned nothing.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_in_camel_case_and_skips_empty_fields() {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: Some("user".to_string()),
                parts: vec![
                    RequestPart::text("oi"),
                    RequestPart::inline("image/png", "AAAA".to_string()),
                ],
            }],
            system_instruction: RequestContent {
                role: None,
                parts: vec![RequestPart::text("sys")],
            },
            generation_config: GenerationConfig { temperature: 0.5 },
        };

        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            value,
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        { "text": "oi" },
                        { "inline_data": { "mime_type": "image/png", "data": "AAAA" } }
                    ]
                }],
                "systemInstruction": { "parts": [{ "text": "sys" }] },
                "generationConfig": { "temperature": 0.5 }
            })
        );
    }

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "Olá, " }, { "text": "mundo" }] }, "finishReason": "STOP" },
                { "content": { "parts": [{ "text": "ignorado" }] } }
            ]
        }))
        .expect("deserialize");
        assert_eq!(response.text(), "Olá, mundo");
    }

    #[test]
    fn blocked_response_yields_empty_text() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({ "promptFeedback": { "blockReason": "SAFETY" } }))
                .expect("deserialize");
        assert_eq!(response.text(), "");
    }
}
