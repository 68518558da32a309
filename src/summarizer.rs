use reqwest::Client;
use serde::Serialize;
use tracing::instrument;

use crate::config::Config;
use crate::error::{AppError, Result};

pub const GEMINI_MODEL: &str = "gemini-1.5-flash";

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

/// Gemini `generateContent` client. Built once at startup from [`Config`] and
/// handed to the handlers through application state, so tests can point it at
/// a stub server.
#[derive(Clone)]
pub struct Summarizer {
    http: Client,
    api_key: Option<String>,
    base_url: String,
    max_chars: usize,
}

impl Summarizer {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            api_key: config.gemini_api_key.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            max_chars: config.summary_max_chars,
        }
    }

    /// The instruction sent to the model: a Japanese summary within the
    /// configured character budget.
    pub fn prompt(&self, text: &str) -> String {
        format!(
            "以下のWebページの内容を日本語で{}文字以内で簡潔に要約してください:\n\n{}",
            self.max_chars, text
        )
    }

    #[instrument(skip_all)]
    pub async fn summarize(&self, text: &str) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or(AppError::MissingApiKey)?;

        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, GEMINI_MODEL
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: self.prompt(text),
                }],
            }],
        };

        let response = self
            .http
            .post(&endpoint)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Summarize(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Summarize(format!("Gemini API returned {}", status)));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::Summarize(e.to_string()))?;

        let summary = json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| AppError::Summarize("Unexpected response format from Gemini".to_string()))?;

        Ok(summary.trim().to_string())
    }
}
