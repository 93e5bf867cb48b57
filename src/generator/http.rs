//! HTTP Generation Client
//!
//! JSON client for the remote generation endpoint. Sends the description,
//! receives the image artifact. One request per generation, no retries;
//! errors bubble up to the caller untouched.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{GeneratedImage, GenerationRequest, GenerationService};

/// Default request timeout for the generation endpoint
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Response body of the generation endpoint
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    /// Image payload as a data URL
    image_data: String,

    /// Prompt the service used
    prompt: String,
}

/// Generation service backed by an HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpGenerator {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpGenerator {
    /// Create a client for the given endpoint with the default timeout
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Endpoint this client posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GenerationService for HttpGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage> {
        debug!("Requesting generation from {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .with_context(|| format!("generation request to {} failed", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("generation service returned {}: {}", status, body);
        }

        let body: GenerateResponse = response
            .json()
            .await
            .context("failed to parse generation response")?;

        debug!("Generation succeeded for prompt: {}", body.prompt);
        Ok(GeneratedImage {
            image_data: body.image_data,
            prompt: body.prompt,
        })
    }
}
