//! Ollama `/api/generate` client.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{InsightsBackend, Result};
use crate::config::InsightsConfig;
use crate::error::InsightsError;

pub(crate) struct OllamaBackend {
    http_client: Client,
    base_url: String,
    model: String,
}

impl OllamaBackend {
    pub(crate) fn new(base_url: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    /// Build from configuration. Fails when no host is configured.
    pub(crate) fn from_config(config: &InsightsConfig) -> Result<Self> {
        let host = config.host.as_deref().ok_or(InsightsError::NotConfigured)?;
        Ok(Self::new(host, &config.model))
    }

    pub(crate) fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

impl InsightsBackend for OllamaBackend {
    fn generate(&self, prompt: &str) -> Result<String> {
        let request = OllamaRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .http_client
            .post(self.endpoint())
            .json(&request)
            .send()?
            .error_for_status()?;

        let body: OllamaResponse = response.json()?;
        debug!("Ollama response: {}", body.response);
        Ok(body.response)
    }
}
