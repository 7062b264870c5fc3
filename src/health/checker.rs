// src/health/checker.rs
use super::status::{CheckResult, ServiceName};
use crate::config::{Configuration, Settings};
use crate::probe::{CheckError, GenerativeProbe, ServiceProbe, TranscriptionProbe};
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

/// Runs one probe per service and turns every outcome into a [`CheckResult`].
///
/// Holds no state between runs; calling [`run_all_checks`] again re-runs both
/// probes from scratch.
///
/// [`run_all_checks`]: ConnectivityChecker::run_all_checks
pub struct ConnectivityChecker {
    settings: Settings,
    client: Client,
}

impl ConnectivityChecker {
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { settings, client })
    }

    pub async fn check_transcription_service(&self, config: &Configuration) -> CheckResult {
        let probe = TranscriptionProbe::new(self.client.clone(), config, &self.settings);
        self.check(&probe).await
    }

    pub async fn check_generative_service(&self, config: &Configuration) -> CheckResult {
        let probe = GenerativeProbe::new(self.client.clone(), config, &self.settings);
        self.check(&probe).await
    }

    /// Check both services. Always yields `[Transcription, Generative]`.
    pub async fn run_all_checks(&self, config: &Configuration) -> Vec<CheckResult> {
        let transcription = TranscriptionProbe::new(self.client.clone(), config, &self.settings);
        let generative = GenerativeProbe::new(self.client.clone(), config, &self.settings);
        self.run_probes(&transcription, &generative).await
    }

    /// Run both probes concurrently; a failure in one never skips the other.
    pub async fn run_probes(
        &self,
        transcription: &dyn ServiceProbe,
        generative: &dyn ServiceProbe,
    ) -> Vec<CheckResult> {
        let run_id = Uuid::new_v4();
        let span = info_span!("preflight", %run_id);

        async move {
            let (first, second) =
                futures::future::join(self.check(transcription), self.check(generative)).await;
            let results = vec![first, second];

            let passed = results.iter().filter(|r| r.is_success()).count();
            info!(
                "Connectivity check complete: {} passed, {} failed",
                passed,
                results.len() - passed
            );
            results
        }
        .instrument(span)
        .await
    }

    /// Run a single probe under the configured deadline.
    pub async fn check(&self, probe: &dyn ServiceProbe) -> CheckResult {
        let service: ServiceName = probe.service();
        let start = Instant::now();

        let outcome = timeout(self.settings.timeout(), probe.authenticate_and_probe()).await;
        let elapsed = start.elapsed();

        let result = match outcome {
            Ok(Ok(())) => CheckResult::success(service, elapsed),
            Ok(Err(e)) => CheckResult::failure(service, &e, elapsed),
            Err(_) => CheckResult::failure(
                service,
                &CheckError::Timeout(self.settings.timeout()),
                elapsed,
            ),
        };

        if result.is_success() {
            info!("{} reachable in {}ms", service.product(), result.elapsed_ms);
        } else {
            warn!(
                "{} check failed ({:?}): {}",
                service.product(),
                result.error,
                result.detail
            );
        }

        result
    }
}
