use super::http_client::build_rating_client;
use super::scrub::upstream_error;
use super::traits::RatingClient;
use crate::error::RatingError;
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

const GENERATE_PATH: &str = "api/generate";

/// Client for Ollama's `/api/generate` endpoint.
pub struct OllamaClient {
    endpoint: Url,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    think: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            endpoint: generate_endpoint(base_url)?,
            client: build_rating_client(timeout)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// `<base>/api/generate`, keeping any path prefix on the base URL.
fn generate_endpoint(base_url: &str) -> anyhow::Result<Url> {
    let mut base =
        Url::parse(base_url.trim()).with_context(|| format!("parse Ollama URL '{base_url}'"))?;
    if !matches!(base.scheme(), "http" | "https") {
        anyhow::bail!("Ollama URL must use http or https, got '{}'", base.scheme());
    }
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(GENERATE_PATH)
        .with_context(|| format!("build generate endpoint from '{base_url}'"))
}

#[async_trait]
impl RatingClient for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn query(&self, model: &str, prompt: &str) -> Result<String, RatingError> {
        let request = GenerateRequest {
            model,
            prompt,
            stream: false,
            think: false,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(upstream_error(response).await);
        }

        let body = response.bytes().await?;
        let parsed: GenerateResponse = serde_json::from_slice(&body)
            .map_err(|e| RatingError::Decode(format!("generate response: {e}")))?;
        Ok(parsed.response)
    }
}
