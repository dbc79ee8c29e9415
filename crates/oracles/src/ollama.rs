use std::time::Duration;

use charisma::{DialogueService, ServiceError};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::transport;

#[derive(Debug, Deserialize)]
pub(crate) struct Generated {
    #[serde(default)]
    pub response: String,
}

/// Non-streaming client for Ollama's `/api/generate`.
pub struct Ollama {
    client: Client,
    url: String,
    model: String,
    max_tokens: u32,
}

impl Ollama {
    pub fn new(
        url: &str,
        model: &str,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport)?;
        Ok(Self {
            client,
            url: url.to_string(),
            model: model.to_string(),
            max_tokens,
        })
    }

    pub(crate) fn request_body(&self, system: &str, user: &str) -> Value {
        json!({
            "model": self.model,
            "prompt": format!("{}\n\n{}", system.trim(), user.trim()),
            "stream": false,
            "options": { "num_predict": self.max_tokens },
        })
    }
}

impl DialogueService for Ollama {
    fn say(&self, system: &str, user: &str) -> Result<String, ServiceError> {
        let body = self.request_body(system, user);
        debug!(model = %self.model, "dialogue request");
        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Status(status.as_u16()));
        }
        let generated = response
            .json::<Generated>()
            .map_err(|e| ServiceError::Malformed(e.to_string()))?;
        reply_text(generated)
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

pub(crate) fn reply_text(generated: Generated) -> Result<String, ServiceError> {
    let text = generated.response.trim();
    if text.is_empty() {
        Err(ServiceError::Empty)
    } else {
        Ok(text.to_string())
    }
}
