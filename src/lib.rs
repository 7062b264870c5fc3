// src/lib.rs
//! Pre-flight check for the Google Cloud credentials used by Audio Notes.
//!
//! Loads the service-account path, project id and Gemini API key, then makes
//! one authenticated request to Cloud Speech-to-Text and one to the Gemini
//! API, reporting a pass/fail result per service.

pub mod auth;
pub mod config;
pub mod health;
pub mod probe;
pub mod report;

pub use config::{Configuration, ConfigurationError, Settings};
pub use health::{CheckResult, CheckStatus, ConnectivityChecker, ServiceName};
pub use probe::{CheckError, CheckErrorKind, ServiceProbe};
