//! Generation Service Collaborator
//!
//! The gate does not generate images itself; it invokes a remote
//! generation service once a request has been allowed through. This
//! module defines that collaborator seam, the HTTP implementation, and a
//! mock for tests. Failures are propagated untouched: the gate neither
//! retries nor interprets them, and the quota stays charged.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use http::HttpGenerator;

/// Parameters of one generation request, exactly as the user submitted them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Text description of the coloring page to generate
    pub description: String,
}

impl GenerationRequest {
    /// Create a request from a description
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Artifact returned by the generation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// Image payload as a data URL (e.g. `data:image/png;base64,...`)
    pub image_data: String,

    /// Prompt the service actually used, for display alongside the image
    pub prompt: String,
}

/// Remote service that turns a text description into a printable image
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Perform one generation, returning the image artifact or an error
    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<GeneratedImage>;
}

/// Mock generation service for tests
///
/// Records every request it receives and returns either a canned image or
/// a canned failure.
#[derive(Debug, Default)]
pub struct MockGenerator {
    calls: std::sync::Mutex<Vec<GenerationRequest>>,
    fail: bool,
}

impl MockGenerator {
    /// Create a mock that succeeds with a placeholder image
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails every request
    pub fn failing() -> Self {
        Self {
            calls: std::sync::Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Requests received so far, in order
    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationService for MockGenerator {
    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<GeneratedImage> {
        self.calls.lock().unwrap().push(request.clone());

        if self.fail {
            anyhow::bail!("mock generation failure");
        }

        Ok(GeneratedImage {
            image_data: "data:image/png;base64,TEST".to_string(),
            prompt: request.description.clone(),
        })
    }
}
