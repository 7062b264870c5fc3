// src/config/mod.rs
mod models;

pub use models::*;

use ::config::{Config as SettingsSource, Environment, File};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::env::VarError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Settings file looked up in the working directory (any extension the
/// `config` crate understands).
pub const SETTINGS_FILE_STEM: &str = "preflight";
pub const SETTINGS_ENV_PREFIX: &str = "PREFLIGHT";
pub const DOTENV_FILE: &str = ".env";

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("cannot read environment file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// Load credentials from the process environment, falling back to `.env`.
pub fn load_configuration() -> Result<Configuration, ConfigurationError> {
    load_configuration_from(Path::new(DOTENV_FILE), process_env)
}

fn process_env(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) => Some(value),
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(_)) => {
            warn!("{} is set but is not valid UTF-8; ignoring it", name);
            None
        }
    }
}

/// Load credentials from `lookup`, falling back to the values in `dotenv_path`.
///
/// A missing environment file is fine; one that exists but cannot be read
/// or parsed is a [`ConfigurationError`]. Absent variables come back as empty
/// strings.
pub fn load_configuration_from<F>(
    dotenv_path: &Path,
    lookup: F,
) -> Result<Configuration, ConfigurationError>
where
    F: Fn(&str) -> Option<String>,
{
    let file_values = read_dotenv(dotenv_path)?;
    let resolve = |name: &str| {
        lookup(name)
            .or_else(|| file_values.get(name).cloned())
            .unwrap_or_default()
    };

    let configuration = Configuration {
        credentials_path: resolve(CREDENTIALS_PATH_VAR),
        project_id: resolve(PROJECT_ID_VAR),
        api_key: resolve(API_KEY_VAR),
    };

    if configuration.is_complete() {
        debug!("All credentials present");
    } else {
        for name in configuration.missing_fields() {
            warn!("{} is not set", name);
        }
    }

    Ok(configuration)
}

fn read_dotenv(path: &Path) -> Result<HashMap<String, String>, ConfigurationError> {
    let unreadable = |source| ConfigurationError::Unreadable {
        path: path.to_path_buf(),
        source,
    };

    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(e) if e.not_found() => {
            debug!("No environment file at {}", path.display());
            return Ok(HashMap::new());
        }
        Err(e) => return Err(unreadable(e)),
    };

    let values = entries
        .collect::<Result<HashMap<_, _>, _>>()
        .map_err(unreadable)?;
    debug!("Read {} entries from {}", values.len(), path.display());
    Ok(values)
}

/// Load tool settings from `preflight.*` and `PREFLIGHT__*` variables.
pub fn load_settings() -> Result<Settings> {
    load_settings_from(
        File::with_name(SETTINGS_FILE_STEM).required(false),
        settings_environment(),
    )
}

/// Load tool settings from an explicit file (YAML, JSON or TOML).
pub fn load_settings_file<P: AsRef<Path>>(path: P) -> Result<Settings> {
    load_settings_from(File::from(path.as_ref()), settings_environment())
}

fn settings_environment() -> Environment {
    Environment::with_prefix(SETTINGS_ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

fn load_settings_from<S>(file: S, environment: Environment) -> Result<Settings>
where
    S: ::config::Source + Send + Sync + 'static,
{
    let settings: Settings = SettingsSource::builder()
        .add_source(file)
        .add_source(environment)
        .build()
        .context("Failed to read settings")?
        .try_deserialize()
        .context("Failed to parse settings")?;

    settings.validate()?;
    Ok(settings)
}
