// src/api/models.rs

use serde::{Deserialize, Serialize};

// ── Flow input/output ──

/// Input of the poem generation flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePoemInput {
    pub photo_url: String,
}

/// Output of the poem generation flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratePoemOutput {
    pub poem: String,
}

// ── Envelopes ──

/// Request body for flow servers that wrap the input as `{"data": …}`.
#[derive(Debug, Clone, Serialize)]
pub struct FlowRequest<'a> {
    pub data: &'a GeneratePoemInput,
}

/// A successful response, either wrapped as `{"result": …}` or bare.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FlowResponse {
    Wrapped { result: GeneratePoemOutput },
    Bare(GeneratePoemOutput),
}

impl FlowResponse {
    pub fn into_output(self) -> GeneratePoemOutput {
        match self {
            FlowResponse::Wrapped { result } => result,
            FlowResponse::Bare(output) => output,
        }
    }
}

/// Error bodies seen from flow servers and API gateways.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    pub error: Option<ErrorField>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorField {
    Detailed {
        message: Option<String>,
        status: Option<String>,
    },
    Text(String),
}

impl ErrorBody {
    /// The most specific human-readable message in the body, if any.
    pub fn best_message(&self) -> Option<String> {
        let from_error = match &self.error {
            Some(ErrorField::Detailed { message, status }) => {
                message.clone().or_else(|| status.clone())
            }
            Some(ErrorField::Text(text)) => Some(text.clone()),
            None => None,
        };
        from_error
            .or_else(|| self.message.clone())
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}
