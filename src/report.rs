// src/report.rs
use crate::config::{ConfigurationError, OutputFormat};
use crate::health::{CheckResult, CheckStatus};
use anyhow::Result;
use serde_json::json;
use std::io::Write;

const SUCCESS_MARKER: &str = "✅";
const FAILURE_MARKER: &str = "❌";

/// One line per result, in the order given.
pub fn render_text(results: &[CheckResult]) -> String {
    let mut out = String::new();
    for result in results {
        let line = match result.status {
            CheckStatus::Success => format!(
                "{} {} ({}): OK",
                SUCCESS_MARKER,
                result.service,
                result.service.product()
            ),
            CheckStatus::Failure => {
                let class = result
                    .error
                    .map(|kind| kind.to_string())
                    .unwrap_or_else(|| "UnknownError".to_string());
                format!(
                    "{} {} ({}): {}: {}",
                    FAILURE_MARKER,
                    result.service,
                    result.service.product(),
                    class,
                    result.detail
                )
            }
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub fn render_json(results: &[CheckResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

pub fn write_report<W: Write>(
    writer: &mut W,
    results: &[CheckResult],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => writer.write_all(render_text(results).as_bytes())?,
        OutputFormat::Json => writeln!(writer, "{}", render_json(results)?)?,
    }
    writer.flush()?;
    Ok(())
}

/// Report that no check could run because the credentials could not be loaded.
pub fn write_configuration_error<W: Write>(
    writer: &mut W,
    error: &ConfigurationError,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(
            writer,
            "{} Configuration: ConfigurationError: {}",
            FAILURE_MARKER, error
        )?,
        OutputFormat::Json => {
            let body = json!({ "error": "ConfigurationError", "detail": error.to_string() });
            writeln!(writer, "{}", serde_json::to_string_pretty(&body)?)?
        }
    }
    writer.flush()?;
    Ok(())
}

/// Process exit status: 1 when anything failed and `strict` is set, else 0.
pub fn exit_status(all_passed: bool, strict: bool) -> u8 {
    if strict && !all_passed {
        1
    } else {
        0
    }
}
