//! Backend and view configuration.
//!
//! Values are layered: defaults, then the JSON config file, then the
//! environment, then command-line flags.
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_TOAST_SECS: u64 = 4;
/// Upper bound for every configured duration (one day).
const MAX_SECS: u64 = 86_400;
const CONFIG_DIR: &str = "alfa";
const CONFIG_FILE: &str = "config.json";

const URL_VARS: [&str; 2] = ["ALFA_SUPABASE_URL", "VITE_SUPABASE_URL"];
const KEY_VARS: [&str; 2] = ["ALFA_SUPABASE_ANON_KEY", "VITE_SUPABASE_ANON_KEY"];

const MISSING_CREDENTIALS: &str =
    "Supabase URL or Anon Key is missing. Credentials not found in environment.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub gateway: GatewayConfig,
    pub toast_ttl: Duration,
    pub refresh_interval: Option<Duration>,
}

/// On-disk config, `<config_dir>/alfa/config.json` by default.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub toast_secs: Option<u64>,
    pub refresh_secs: Option<u64>,
}

/// Values supplied on the command line; each wins over every other source.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
    pub toast_secs: Option<u64>,
    pub refresh_secs: Option<u64>,
}

/// Load the effective config from disk, the process environment and flags.
pub fn load_config(overrides: &ConfigOverrides) -> Result<AppConfig> {
    let file = match overrides.config_path.as_deref() {
        Some(path) => read_config_file(path)?,
        None => match default_config_path().filter(|path| path.exists()) {
            Some(path) => read_config_file(&path)?,
            None => ConfigFile::default(),
        },
    };
    resolve(file, |name| std::env::var(name).ok(), overrides)
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

pub fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let file: ConfigFile = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config JSON {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(file)
}

/// Merge every layer. `env` is injected so tests never touch the process
/// environment.
pub fn resolve<F>(file: ConfigFile, env: F, overrides: &ConfigOverrides) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let from_env = |names: &[&str]| {
        names
            .iter()
            .find_map(|name| env(name).filter(|value| !value.trim().is_empty()))
    };

    let url = overrides
        .url
        .clone()
        .or_else(|| from_env(&URL_VARS))
        .or(file.url);
    let api_key = overrides
        .api_key
        .clone()
        .or_else(|| from_env(&KEY_VARS))
        .or(file.anon_key);
    let (Some(url), Some(api_key)) = (non_blank(url), non_blank(api_key)) else {
        return Err(anyhow!(MISSING_CREDENTIALS));
    };

    let timeout_secs = overrides
        .timeout_secs
        .or(file.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    let toast_secs = overrides
        .toast_secs
        .or(file.toast_secs)
        .unwrap_or(DEFAULT_TOAST_SECS);
    let refresh_secs = overrides.refresh_secs.or(file.refresh_secs);

    Ok(AppConfig {
        gateway: GatewayConfig {
            base_url: normalize_url(&url)?,
            api_key: api_key.trim().to_string(),
            timeout: positive_secs(timeout_secs, "timeout_secs")?,
        },
        toast_ttl: positive_secs(toast_secs, "toast_secs")?,
        refresh_interval: refresh_secs
            .map(|secs| positive_secs(secs, "refresh_secs"))
            .transpose()?,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn normalize_url(url: &str) -> Result<String> {
    let url = url.trim().trim_end_matches('/');
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(anyhow!("backend url must start with http:// or https:// (got {url:?})"));
    }
    Ok(url.to_string())
}

fn positive_secs(secs: u64, field: &str) -> Result<Duration> {
    if secs == 0 {
        return Err(anyhow!("{field} must be greater than zero"));
    }
    if secs > MAX_SECS {
        return Err(anyhow!("{field} must be at most {MAX_SECS} seconds (got {secs})"));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
