// src/config/models.rs
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;

pub const CREDENTIALS_PATH_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const PROJECT_ID_VAR: &str = "GOOGLE_CLOUD_PROJECT_ID";
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

const DEFAULT_SPEECH_ENDPOINT: &str = "https://speech.googleapis.com";
const DEFAULT_GENERATIVE_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Credentials handed to the Audio Notes application.
///
/// Values are kept exactly as found; an empty string means the variable was
/// not set anywhere.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    pub credentials_path: String,
    pub project_id: String,
    pub api_key: String,
}

impl Configuration {
    pub fn new(
        credentials_path: impl Into<String>,
        project_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            credentials_path: credentials_path.into(),
            project_id: project_id.into(),
            api_key: api_key.into(),
        }
    }

    /// Environment names whose values are empty, in declaration order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            (CREDENTIALS_PATH_VAR, &self.credentials_path),
            (PROJECT_ID_VAR, &self.project_id),
            (API_KEY_VAR, &self.api_key),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("Configuration")
            .field("credentials_path", &self.credentials_path)
            .field("project_id", &self.project_id)
            .field("api_key", &api_key)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

/// Tool settings, independent of the credentials being checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub timeout_secs: u64,
    pub speech_endpoint: Url,
    pub generative_endpoint: Url,
    pub generative_model: String,
    pub probe_prompt: String,
    pub strict_exit: bool,
    pub output: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            speech_endpoint: Url::parse(DEFAULT_SPEECH_ENDPOINT)
                .expect("default speech endpoint is a valid URL"),
            generative_endpoint: Url::parse(DEFAULT_GENERATIVE_ENDPOINT)
                .expect("default generative endpoint is a valid URL"),
            generative_model: "gemini-2.5-flash".to_string(),
            probe_prompt: "Reply with the single word: ok".to_string(),
            strict_exit: true,
            output: OutputFormat::Text,
        }
    }
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }
        if self.generative_model.trim().is_empty() {
            bail!("generative_model must not be empty");
        }
        if self.probe_prompt.trim().is_empty() {
            bail!("probe_prompt must not be empty");
        }
        for endpoint in [&self.speech_endpoint, &self.generative_endpoint] {
            if !matches!(endpoint.scheme(), "http" | "https") {
                bail!("unsupported endpoint scheme: {}", endpoint);
            }
        }
        Ok(())
    }
}
