// src/api/poem.rs
// Client for the remote poem generation flow.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;

use crate::api::models::*;
use crate::config::GeneratorConfig;

pub const API_KEY_ENV: &str = "PHOTOPOET_API_KEY";

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("{0}")]
    Service(String),
    #[error("malformed response from poem service: {0}")]
    Malformed(String),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Anything that can turn a photo into a poem.
#[async_trait]
pub trait PoemGenerator: Send + Sync {
    async fn generate(&self, input: GeneratePoemInput) -> Result<GeneratePoemOutput, GenerateError>;
}

/// Calls a poem flow exposed over HTTP.
#[derive(Clone)]
pub struct HttpPoemGenerator {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    envelope: bool,
}

impl HttpPoemGenerator {
    pub fn new(config: &GeneratorConfig) -> Self {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|k| !k.is_empty());
        Self {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            api_key,
            envelope: config.envelope,
        }
    }
}

#[async_trait]
impl PoemGenerator for HttpPoemGenerator {
    async fn generate(&self, input: GeneratePoemInput) -> Result<GeneratePoemOutput, GenerateError> {
        let mut req = self.http.post(&self.endpoint);
        req = if self.envelope {
            req.json(&FlowRequest { data: &input })
        } else {
            req.json(&input)
        };
        if let Some(key) = &self.api_key {
            req = req.header(AUTHORIZATION, format!("Bearer {}", key));
        }

        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        tracing::debug!(%status, bytes = body.len(), "poem service responded");

        if !status.is_success() {
            return Err(GenerateError::Service(error_message(status, &body)));
        }
        parse_output(&body)
    }
}

/// Parse a success body, accepting both the wrapped and the bare shape.
pub fn parse_output(body: &str) -> Result<GeneratePoemOutput, GenerateError> {
    serde_json::from_str::<FlowResponse>(body)
        .map(FlowResponse::into_output)
        .map_err(|_| GenerateError::Malformed("expected a `poem` field".to_string()))
}

/// Best available message for a failed request.
pub fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.best_message())
        .unwrap_or_else(|| format!("HTTP {}", status))
}
