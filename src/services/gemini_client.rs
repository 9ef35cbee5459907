// src/services/gemini_client.rs

// Cliente REST do Gemini (generateContent). Só transporta: monta o corpo,
// envia e devolve o texto do primeiro candidato. Quem decide o que fazer
// com falhas é o AiService.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::AiSettings;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("API key do Gemini não configurada")]
    MissingApiKey,

    #[error("Falha de rede: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Gemini respondeu {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Resposta vazia do modelo")]
    EmptyResponse,

    #[error("JSON inválido na resposta do modelo: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(String),
    InlineData { mime_type: String, data: String },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerateRequest {
    pub parts: Vec<Part>,
    /// Quando presente, pede `application/json` no formato deste schema.
    pub response_schema: Option<Value>,
}

impl GenerateRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::Text(prompt.into())],
            response_schema: None,
        }
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn with_part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    fn to_body(&self) -> Value {
        let parts: Vec<Value> = self
            .parts
            .iter()
            .map(|part| match part {
                Part::Text(text) => json!({ "text": text }),
                Part::InlineData { mime_type, data } => json!({
                    "inline_data": { "mime_type": mime_type, "data": data }
                }),
            })
            .collect();

        let mut body = json!({ "contents": [{ "parts": parts }] });
        if let Some(schema) = &self.response_schema {
            body["generationConfig"] = json!({
                "responseMimeType": "application/json",
                "responseSchema": schema,
            });
        }
        body
    }
}

/// Costura entre o domínio e o modelo hospedado (trocada por um fake nos testes).
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    fn model_name(&self) -> &str;

    fn is_configured(&self) -> bool;

    async fn generate(&self, request: GenerateRequest) -> Result<String, AiError>;
}

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(settings: &AiSettings) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        // Chaves coladas de .env às vezes vêm com aspas
        let api_key = settings
            .api_key
            .as_deref()
            .map(|k| k.trim().trim_matches(|c: char| c == '"' || c == '\'').to_string())
            .filter(|k| !k.is_empty());

        Ok(Self {
            http,
            api_key,
            model: settings.model.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, request: GenerateRequest) -> Result<String, AiError> {
        let api_key = self.api_key.as_deref().ok_or(AiError::MissingApiKey)?;

        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request.to_body())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = resp.json().await?;
        extract_text(&json).ok_or(AiError::EmptyResponse)
    }
}

/// Texto do primeiro candidato; cercas de markdown ficam para quem espera JSON.
pub(crate) fn extract_text(response: &Value) -> Option<String> {
    let text = response["candidates"][0]["content"]["parts"][0]["text"].as_str()?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

pub(crate) fn strip_code_fences(text: &str) -> &str {
    text.trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_carries_schema_and_inline_image() {
        let body = GenerateRequest::text("analyze")
            .with_part(Part::InlineData {
                mime_type: "image/png".into(),
                data: "AAAA".into(),
            })
            .with_schema(json!({ "type": "OBJECT" }))
            .to_body();

        assert_eq!(body["contents"][0]["parts"][0]["text"], "analyze");
        assert_eq!(body["contents"][0]["parts"][1]["inline_data"]["mime_type"], "image/png");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn plain_text_request_has_no_generation_config() {
        let body = GenerateRequest::text("hello").to_body();
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn extracts_first_candidate_trimmed() {
        let response = json!({
            "candidates": [{ "content": { "parts": [{ "text": "  ```json\n{\"a\":1}\n```\n" }] } }]
        });
        assert_eq!(extract_text(&response).as_deref(), Some("```json\n{\"a\":1}\n```"));

        assert_eq!(extract_text(&json!({ "candidates": [] })), None);
        let blank = json!({ "candidates": [{ "content": { "parts": [{ "text": "  " }] } }] });
        assert_eq!(extract_text(&blank), None);
    }

    #[test]
    fn code_fences_are_stripped_once() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n[]\n```"), "[]");
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
    }

    #[tokio::test]
    async fn missing_key_fails_without_network() {
        let client = GeminiClient::new(&AiSettings {
            api_key: Some("  ".into()),
            model: "gemini-2.5-flash".into(),
            base_url: "http://127.0.0.1:9".into(),
            timeout_secs: 1,
        })
        .unwrap();

        assert!(!client.is_configured());
        let err = client.generate(GenerateRequest::text("hi")).await.unwrap_err();
        assert!(matches!(err, AiError::MissingApiKey));
    }
}
