//! Runtime configuration.
//!
//! Values are layered: CLI flags, then environment, then the JSON config
//! file, then built-in defaults. The file is read-only input; nothing here
//! writes to disk.
use crate::employee::DEFAULT_ENDPOINT;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const ENV_CONFIG: &str = "COFFEETBL_CONFIG";
pub const ENV_ENDPOINT: &str = "COFFEETBL_ENDPOINT";
pub const ENV_TIMEOUT_SECS: &str = "COFFEETBL_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Effective settings after all layers are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
    /// Prefills the sender name in the interactive wizard.
    pub sender_name: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            sender_name: None,
        }
    }
}

impl AppConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// On-disk shape; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    endpoint: Option<String>,
    timeout_secs: Option<u64>,
    sender_name: Option<String>,
}

/// Flag values that take precedence over everything else.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Resolve the effective config from flags, the process environment, and the
/// config file.
pub fn resolve(overrides: &ConfigOverrides) -> Result<AppConfig> {
    resolve_with_env(overrides, |key| env::var(key).ok())
}

fn resolve_with_env<F>(overrides: &ConfigOverrides, lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let file = match config_file_path(overrides, &lookup) {
        Some((path, true)) => load_file(&path)?,
        Some((path, false)) if path.is_file() => load_file(&path)?,
        _ => ConfigFile::default(),
    };

    let mut config = AppConfig::default();
    if let Some(endpoint) = file.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(timeout) = file.timeout_secs {
        config.timeout_secs = timeout;
    }
    config.sender_name = file.sender_name.filter(|name| !name.is_empty());

    if let Some(endpoint) = lookup(ENV_ENDPOINT) {
        config.endpoint = endpoint;
    }
    if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
        config.timeout_secs = raw
            .trim()
            .parse()
            .with_context(|| format!("parse {ENV_TIMEOUT_SECS}={raw:?}"))?;
    }

    if let Some(endpoint) = &overrides.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(timeout) = overrides.timeout_secs {
        config.timeout_secs = timeout;
    }

    validate(&config)?;
    tracing::debug!(?config, "resolved config");
    Ok(config)
}

/// Returns the config path and whether it was named explicitly.
fn config_file_path<F>(overrides: &ConfigOverrides, lookup: &F) -> Option<(PathBuf, bool)>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = &overrides.config_path {
        return Some((path.clone(), true));
    }
    if let Some(path) = lookup(ENV_CONFIG) {
        return Some((PathBuf::from(path), true));
    }
    dirs::config_dir().map(|dir| (dir.join("coffeetbl").join("config.json"), false))
}

fn load_file(path: &Path) -> Result<ConfigFile> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let file: ConfigFile = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config JSON {}", path.display()))?;
    Ok(file)
}

/// Reject configs that cannot produce a working client.
pub fn validate(config: &AppConfig) -> Result<()> {
    let url = Url::parse(&config.endpoint)
        .with_context(|| format!("endpoint is not a URL: {:?}", config.endpoint))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(anyhow!(
            "endpoint must use http or https (got {:?})",
            url.scheme()
        ));
    }
    if config.timeout_secs == 0 {
        return Err(anyhow!("timeout_secs must be greater than zero"));
    }
    if config.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(anyhow!(
            "timeout_secs must be at most {MAX_TIMEOUT_SECS} (got {})",
            config.timeout_secs
        ));
    }
    Ok(())
}
