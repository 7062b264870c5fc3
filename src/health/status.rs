// src/health/status.rs
use crate::probe::{CheckError, CheckErrorKind};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ServiceName {
    Transcription,
    Generative,
}

impl ServiceName {
    /// Vendor product name shown next to the service in reports.
    pub fn product(&self) -> &'static str {
        match self {
            ServiceName::Transcription => "Cloud Speech-to-Text",
            ServiceName::Generative => "Gemini API",
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CheckStatus {
    Success,
    Failure,
}

/// Outcome of checking one service. Built per run and never stored.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub service: ServiceName,
    pub status: CheckStatus,
    pub detail: String,
    pub error: Option<CheckErrorKind>,
    pub elapsed_ms: u64,
    pub checked_at: DateTime<Utc>,
}

impl CheckResult {
    pub fn success(service: ServiceName, elapsed: Duration) -> Self {
        Self {
            service,
            status: CheckStatus::Success,
            detail: String::new(),
            error: None,
            elapsed_ms: elapsed.as_millis() as u64,
            checked_at: Utc::now(),
        }
    }

    pub fn failure(service: ServiceName, error: &CheckError, elapsed: Duration) -> Self {
        Self {
            service,
            status: CheckStatus::Failure,
            detail: error.to_string(),
            error: Some(error.kind()),
            elapsed_ms: elapsed.as_millis() as u64,
            checked_at: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == CheckStatus::Success
    }
}
