use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::api::models::{Extractiveness, SummaryFormat, SummaryLength, SummaryRequest};
use crate::error::{AppError, Result};

/// Produces a free-text summary of article text using the options of a validated request.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, text: &str, options: &SummaryRequest) -> Result<String>;
}

#[derive(Serialize)]
struct SummarizeRequest<'a> {
    text: &'a str,
    temperature: f64,
    extractiveness: Extractiveness,
    format: SummaryFormat,
    length: SummaryLength,
    #[serde(skip_serializing_if = "Option::is_none")]
    additional_command: Option<&'a str>,
}

#[derive(Deserialize)]
struct SummarizeResponse {
    summary: Option<String>,
}

#[derive(Deserialize)]
struct ServiceError {
    message: Option<String>,
}

/// Client for Cohere's summarize endpoint.
#[derive(Clone)]
pub struct CohereSummarizer {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl CohereSummarizer {
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Summarizer for CohereSummarizer {
    async fn summarize(&self, text: &str, options: &SummaryRequest) -> Result<String> {
        let body = SummarizeRequest {
            text,
            temperature: options.temperature,
            extractiveness: options.extractiveness,
            format: options.format,
            length: options.length,
            additional_command: options.additional_command.as_deref(),
        };

        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::SummaryError(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let detail = res
                .json::<ServiceError>()
                .await
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| "no error message".to_string());
            return Err(AppError::SummaryError(format!("{}: {}", status, detail)));
        }

        let parsed: SummarizeResponse = res
            .json()
            .await
            .map_err(|e| AppError::SummaryError(format!("Invalid response format: {}", e)))?;

        parsed
            .summary
            .ok_or_else(|| AppError::SummaryError("Response did not include a summary".to_string()))
    }
}
