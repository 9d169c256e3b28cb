//! Generative-language gateway.
//!
//! [`LanguageModel`] is the seam between the orchestrators and the remote
//! provider. [`GeminiClient`] talks to Google's `generateContent` REST API;
//! tests substitute their own implementation. [`Gateway`] wraps an optional
//! model so "not configured" is a first-class state rather than an error at
//! startup.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::AiConfig;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("language model is not configured")]
    NotConfigured,

    #[error("request to language model failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("language model returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("language model returned an empty completion")]
    Empty,
}

/// Turns a single prompt into a single text completion.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError>;
}

/// Shared handle to the configured model, if any.
#[derive(Clone, Default)]
pub struct Gateway {
    model: Option<Arc<dyn LanguageModel>>,
}

impl Gateway {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model: Some(model) }
    }

    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Build from config. Returns an unconfigured gateway when no API key is set.
    pub fn from_config(config: &AiConfig) -> Result<Self, GatewayError> {
        match &config.api_key {
            Some(key) => Ok(Self::new(Arc::new(GeminiClient::new(config, key.clone())?))),
            None => Ok(Self::unconfigured()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.model.is_some()
    }

    pub async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        let model = self.model.as_ref().ok_or(GatewayError::NotConfigured)?;
        model.complete(prompt).await
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("configured", &self.is_configured())
            .finish()
    }
}

// ── Gemini REST client ───────────────────────────────────────────────────────

pub struct GeminiClient {
    client: Client,
    url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &AiConfig, api_key: String) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            url: format!(
                "{}/v1beta/models/{}:generateContent",
                config.endpoint, config.model
            ),
            api_key,
        })
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [TextPart<'a>; 1],
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        let body = GenerateRequest {
            contents: [Content {
                role: "user",
                parts: [TextPart { text: prompt }],
            }],
        };
        debug!(url = %self.url, prompt_chars = prompt.chars().count(), "calling language model");

        let resp = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "language model request rejected");
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = resp.json().await?;
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GatewayError::Empty);
        }
        Ok(text)
    }
}

/// Test double that replays a fixed reply (or failure) and records prompts.
#[cfg(test)]
pub(crate) struct ScriptedModel {
    reply: Option<String>,
    pub prompts: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl ScriptedModel {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(text.to_owned()),
            prompts: Default::default(),
        })
    }

    /// Every call fails with a 500 from the "provider".
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            prompts: Default::default(),
        })
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[cfg(test)]
#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        self.reply.clone().ok_or_else(|| GatewayError::Status {
            status: 500,
            body: "scripted failure".into(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(endpoint: &str) -> AiConfig {
        AiConfig {
            api_key: Some("test-key".into()),
            model: "gemini-test".into(),
            endpoint: endpoint.to_owned(),
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn joins_text_parts_of_first_candidate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-test:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [
                    {"content": {"parts": [{"text": "Hello "}, {"text": "there"}]}},
                    {"content": {"parts": [{"text": "ignored"}]}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = Gateway::from_config(&config(&server.uri())).unwrap();
        assert!(gateway.is_configured());
        assert_eq!(gateway.complete("hi").await.unwrap(), "Hello there");
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota"))
            .mount(&server)
            .await;

        let gateway = Gateway::from_config(&config(&server.uri())).unwrap();
        match gateway.complete("hi").await {
            Err(GatewayError::Status { status, body }) => {
                assert_eq!(status, 429);
                assert_eq!(body, "quota");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_candidates_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&server)
            .await;

        let gateway = Gateway::from_config(&config(&server.uri())).unwrap();
        assert!(matches!(
            gateway.complete("hi").await,
            Err(GatewayError::Empty)
        ));
    }

    #[tokio::test]
    async fn unconfigured_gateway_refuses_to_complete() {
        let mut cfg = config("http://127.0.0.1:9");
        cfg.api_key = None;
        let gateway = Gateway::from_config(&cfg).unwrap();
        assert!(!gateway.is_configured());
        assert!(matches!(
            gateway.complete("hi").await,
            Err(GatewayError::NotConfigured)
        ));
    }
}
