// src/probe/generative.rs
use super::{endpoint_url, CheckError, ServiceProbe};
use crate::config::{Configuration, Settings, API_KEY_VAR};
use crate::health::ServiceName;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;
use url::Url;

const PROBE_MAX_OUTPUT_TOKENS: u32 = 16;

/// Gemini reachability through an API key and one tiny generation request.
pub struct GenerativeProbe {
    client: Client,
    api_key: String,
    endpoint: Url,
    model: String,
    prompt: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<serde_json::Value>,
}

impl GenerativeProbe {
    pub fn new(client: Client, config: &Configuration, settings: &Settings) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            endpoint: settings.generative_endpoint.clone(),
            model: settings.generative_model.clone(),
            prompt: settings.probe_prompt.clone(),
            timeout: settings.timeout(),
        }
    }
}

#[async_trait]
impl ServiceProbe for GenerativeProbe {
    fn service(&self) -> ServiceName {
        ServiceName::Generative
    }

    async fn authenticate_and_probe(&self) -> Result<(), CheckError> {
        // Never send an empty key over the wire.
        if self.api_key.is_empty() {
            return Err(CheckError::Authentication(format!("{} is not set", API_KEY_VAR)));
        }

        let path = format!("v1beta/models/{}:generateContent", self.model);
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": self.prompt }] }],
            "generationConfig": { "maxOutputTokens": PROBE_MAX_OUTPUT_TOKENS },
        });

        let response = self
            .client
            .post(endpoint_url(&self.endpoint, &path))
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&body)
            .send()
            .await
            .map_err(|e| CheckError::from_transport(e, self.timeout))?;

        let status = response.status();
        if status.is_success() {
            // The content is irrelevant; only log what came back.
            match response.json::<GenerateContentResponse>().await {
                Ok(parsed) => debug!(
                    "{} answered with {} candidate(s)",
                    self.model,
                    parsed.candidates.len()
                ),
                Err(e) => debug!("{} answered {} with an unexpected body: {}", self.model, status, e),
            }
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(CheckError::from_google_response(status, &body))
    }
}
