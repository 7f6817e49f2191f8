use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::llm::{build_prompt, ResponseGenerator, FALLBACK_REPLY};
use crate::models::{ChatContext, Product};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Thin client for the Google Generative Language API
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http_client: Client::new(),
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the API endpoint, for proxies and tests
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub async fn generate_content(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .context("Failed to call the Gemini API")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API failed with status {}: {}", status, error_text);
        }

        let generate_response: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini response")?;

        let text = generate_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| anyhow::anyhow!("Gemini response contained no candidates"))?;

        Ok(text.trim().to_string())
    }
}

/// Reply generation backed by Gemini. Transport and quota failures are
/// logged and replaced with the fixed fallback reply; the caller never
/// sees an error from this type.
#[derive(Clone)]
pub struct GeminiGenerator {
    client: GeminiClient,
}

impl GeminiGenerator {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResponseGenerator for GeminiGenerator {
    async fn generate(
        &self,
        user_message: &str,
        products: &[Product],
        context: &ChatContext,
    ) -> String {
        let prompt = build_prompt(user_message, products, context);
        tracing::debug!("Gemini prompt length: {} chars", prompt.len());

        match self.client.generate_content(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Gemini generation failed: {}", e);
                FALLBACK_REPLY.to_string()
            }
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}
