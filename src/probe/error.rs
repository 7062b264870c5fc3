// src/probe/error.rs
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Why a connectivity probe failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Authentication(String),

    #[error("{0}")]
    ApiDisabled(String),

    #[error("{0}")]
    QuotaExceeded(String),

    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Unknown(String),
}

/// Comparable, serializable tag of a [`CheckError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckErrorKind {
    ConfigurationError,
    AuthenticationError,
    ApiDisabledError,
    QuotaExceededError,
    TimeoutError,
    UnknownError,
}

impl fmt::Display for CheckErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl CheckError {
    pub fn kind(&self) -> CheckErrorKind {
        match self {
            CheckError::Configuration(_) => CheckErrorKind::ConfigurationError,
            CheckError::Authentication(_) => CheckErrorKind::AuthenticationError,
            CheckError::ApiDisabled(_) => CheckErrorKind::ApiDisabledError,
            CheckError::QuotaExceeded(_) => CheckErrorKind::QuotaExceededError,
            CheckError::Timeout(_) => CheckErrorKind::TimeoutError,
            CheckError::Unknown(_) => CheckErrorKind::UnknownError,
        }
    }

    /// Map a transport failure from the HTTP client.
    pub fn from_transport(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            CheckError::Timeout(timeout)
        } else {
            CheckError::Unknown(error.to_string())
        }
    }

    /// Classify a non-success response from a Google API.
    pub fn from_google_response(status: StatusCode, body: &str) -> Self {
        let parsed = serde_json::from_str::<GoogleErrorEnvelope>(body)
            .ok()
            .map(|envelope| envelope.error);

        let (message, api_status, reasons) = match &parsed {
            Some(error) => (
                error.message.clone(),
                error.status.clone().unwrap_or_default(),
                error
                    .details
                    .iter()
                    .filter_map(|detail| detail.reason.clone())
                    .collect::<Vec<_>>(),
            ),
            None => (body.trim().to_string(), String::new(), Vec::new()),
        };

        let message = if message.is_empty() {
            format!("HTTP {}", status)
        } else {
            message
        };
        let has_reason = |wanted: &str| reasons.iter().any(|reason| reason == wanted);
        let lowered = message.to_lowercase();

        if has_reason("SERVICE_DISABLED")
            || lowered.contains("has not been used in project")
            || lowered.contains("it is disabled")
        {
            return CheckError::ApiDisabled(message);
        }

        if status == StatusCode::TOO_MANY_REQUESTS
            || api_status == "RESOURCE_EXHAUSTED"
            || has_reason("RATE_LIMIT_EXCEEDED")
            || has_reason("BILLING_DISABLED")
        {
            return CheckError::QuotaExceeded(message);
        }

        if status == StatusCode::UNAUTHORIZED
            || status == StatusCode::FORBIDDEN
            || api_status == "UNAUTHENTICATED"
            || api_status == "PERMISSION_DENIED"
            || has_reason("API_KEY_INVALID")
            || has_reason("API_KEY_SERVICE_BLOCKED")
        {
            return CheckError::Authentication(message);
        }

        CheckError::Unknown(format!("HTTP {}: {}", status, message))
    }
}

#[derive(Debug, Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    details: Vec<GoogleErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorDetail {
    #[serde(default)]
    reason: Option<String>,
}
