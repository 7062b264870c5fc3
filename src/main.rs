// src/main.rs
use anyhow::Result;
use audio_notes_preflight::{config, report, ConnectivityChecker};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Logs go to stderr; stdout carries only the report.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("audio_notes_preflight=info")),
        )
        .init();

    let settings = config::load_settings()?;
    let strict = settings.strict_exit;
    let output = settings.output;

    let configuration = match config::load_configuration() {
        Ok(configuration) => configuration,
        Err(e) => {
            error!("Cannot load credentials: {}", e);
            report::write_configuration_error(&mut std::io::stdout().lock(), &e, output)?;
            return Ok(ExitCode::from(report::exit_status(false, strict)));
        }
    };

    info!(
        "Checking credentials for project {:?}",
        configuration.project_id
    );

    let checker = ConnectivityChecker::new(settings)?;
    let results = checker.run_all_checks(&configuration).await;

    report::write_report(&mut std::io::stdout().lock(), &results, output)?;

    let all_passed = results.iter().all(|r| r.is_success());
    Ok(ExitCode::from(report::exit_status(all_passed, strict)))
}
