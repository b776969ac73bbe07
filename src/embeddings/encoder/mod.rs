//! HTTP adapter for the external sentence-encoder service.
//!
//! Speaks the Ollama embedding API: `POST /api/embed` with a batch of
//! inputs, `GET /api/tags` for health checks. Calls are blocking with a
//! bounded timeout and are NOT retried here; a failed call surfaces as
//! [`PlannerError::Encoding`] so the orchestrator can report it.

#[cfg(test)]
mod tests;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::EncoderConfig;
use crate::embeddings::{TextEncoder, l2_normalize};
use crate::{PlannerError, Result};

#[derive(Debug, Clone)]
pub struct EncoderClient {
    base_url: Url,
    model: String,
    batch_size: u32,
    agent: ureq::Agent,
}

#[derive(Debug, Serialize)]
struct EmbedRequest {
    model: String,
    #[serde(rename = "input")]
    inputs: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Debug, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub size: Option<u64>,
    pub digest: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    models: Vec<ModelInfo>,
}

impl EncoderClient {
    #[inline]
    pub fn new(config: &EncoderConfig) -> Result<Self> {
        let base_url = config
            .service_url()
            .map_err(|e| PlannerError::Encoding(format!("Invalid encoder URL: {}", e)))?;

        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_seconds)))
            .build()
            .into();

        Ok(Self {
            base_url,
            model: config.model.clone(),
            batch_size: config.batch_size,
            agent,
        })
    }

    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        self
    }

    /// Check that the encoder service is reachable and the model is present.
    #[inline]
    pub fn health_check(&self) -> Result<()> {
        self.ping()?;
        self.validate_model()?;
        info!(
            "Encoder health check passed for {} with model {}",
            self.base_url, self.model
        );
        Ok(())
    }

    /// Ping the encoder service to check if it's responsive.
    #[inline]
    pub fn ping(&self) -> Result<()> {
        let url = self.join("/api/tags")?;
        debug!("Pinging encoder service at {}", url);

        self.agent
            .get(url.as_str())
            .call()
            .and_then(|mut resp| resp.body_mut().read_to_string())
            .map_err(|e| PlannerError::Encoding(format!("Encoder service unreachable: {}", e)))?;

        Ok(())
    }

    /// Validate that the configured embedding model is available.
    #[inline]
    pub fn validate_model(&self) -> Result<()> {
        let models = self.list_models()?;

        if models.iter().any(|m| m.name == self.model) {
            debug!("Model {} is available", self.model);
            Ok(())
        } else {
            let available: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
            warn!(
                "Model {} not found. Available models: {:?}",
                self.model, available
            );
            Err(PlannerError::Encoding(format!(
                "Model '{}' is not available. Available models: {:?}",
                self.model, available
            )))
        }
    }

    /// List all models the encoder service offers.
    #[inline]
    pub fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let url = self.join("/api/tags")?;

        let response_text = self
            .agent
            .get(url.as_str())
            .call()
            .and_then(|mut resp| resp.body_mut().read_to_string())
            .map_err(|e| PlannerError::Encoding(format!("Failed to fetch models: {}", e)))?;

        let models_response: ModelsResponse = serde_json::from_str(&response_text)
            .map_err(|e| PlannerError::Encoding(format!("Failed to parse models response: {}", e)))?;

        Ok(models_response.models)
    }

    fn join(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| PlannerError::Encoding(format!("Failed to build URL {}: {}", path, e)))
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let request = EmbedRequest {
            model: self.model.clone(),
            inputs: texts.to_vec(),
        };

        let url = self.join("/api/embed")?;
        let request_json = serde_json::to_string(&request)
            .map_err(|e| PlannerError::Encoding(format!("Failed to serialize request: {}", e)))?;

        let response_text = self
            .agent
            .post(url.as_str())
            .header("Content-Type", "application/json")
            .send(&request_json)
            .and_then(|mut resp| resp.body_mut().read_to_string())
            .map_err(|e| PlannerError::Encoding(format!("Embedding request failed: {}", e)))?;

        let response: EmbedResponse = serde_json::from_str(&response_text).map_err(|e| {
            PlannerError::Encoding(format!("Failed to parse embedding response: {}", e))
        })?;

        if response.embeddings.len() != texts.len() {
            return Err(PlannerError::Encoding(format!(
                "Mismatch between request and response counts: {} vs {}",
                texts.len(),
                response.embeddings.len()
            )));
        }

        Ok(response
            .embeddings
            .iter()
            .map(|embedding| l2_normalize(embedding))
            .collect())
    }
}

impl TextEncoder for EncoderClient {
    #[inline]
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Encoding {} texts", texts.len());

        let mut vectors = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(self.batch_size as usize) {
            vectors.extend(self.embed_batch(chunk)?);
        }

        debug!("Encoded {} vectors", vectors.len());
        Ok(vectors)
    }
}
