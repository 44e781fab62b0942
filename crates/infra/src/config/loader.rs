//! Session configuration loader
//!
//! Loads a [`SessionConfig`] from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `YAMETRIKA_CLIENT_ID`: OAuth application id
//! - `YAMETRIKA_USERNAME` / `YAMETRIKA_PASSWORD`: password grant
//! - `YAMETRIKA_CODE`: authorization code grant
//! - `YAMETRIKA_TOKEN`: pre-obtained token
//! - `YAMETRIKA_USER_AGENT`: `User-Agent` header value
//! - `YAMETRIKA_TIMEOUT_SECS`: request timeout in seconds
//! - `YAMETRIKA_OAUTH_URL`, `YAMETRIKA_STABLE_HOST`, `YAMETRIKA_BETA_HOST`:
//!   endpoint overrides
//!
//! Either `YAMETRIKA_TOKEN` or `YAMETRIKA_CLIENT_ID` must be set.
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./yametrika.json` or `./yametrika.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use url::Url;
use yametrika_domain::{MetrikaError, Result, SessionConfig};

use crate::errors::InfraError;

const CONFIG_NAMES: [&str; 4] = ["yametrika.json", "yametrika.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If they do not
/// describe a usable session, falls back to loading from a config file.
///
/// # Errors
/// Returns `MetrikaError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - The loaded configuration fails validation
pub fn load() -> Result<SessionConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `MetrikaError::Config` if neither a token nor a client id is set,
/// a value is invalid, or the result fails validation.
pub fn load_from_env() -> Result<SessionConfig> {
    let token = env_opt("YAMETRIKA_TOKEN");
    let client_id = env_opt("YAMETRIKA_CLIENT_ID");
    if token.is_none() && client_id.is_none() {
        return Err(MetrikaError::Config(
            "Missing required environment variable: YAMETRIKA_TOKEN or YAMETRIKA_CLIENT_ID".into(),
        ));
    }

    let mut config = SessionConfig {
        client_id: client_id.unwrap_or_default(),
        username: env_opt("YAMETRIKA_USERNAME").unwrap_or_default(),
        password: env_opt("YAMETRIKA_PASSWORD").unwrap_or_default(),
        code: env_opt("YAMETRIKA_CODE").unwrap_or_default(),
        token: token.unwrap_or_default(),
        ..SessionConfig::default()
    };

    if let Some(user_agent) = env_opt("YAMETRIKA_USER_AGENT") {
        config.user_agent = user_agent;
    }
    if let Some(timeout) = env_opt("YAMETRIKA_TIMEOUT_SECS") {
        config.timeout_secs = timeout
            .parse::<u64>()
            .map_err(|e| MetrikaError::Config(format!("Invalid timeout: {e}")))?;
    }
    if let Some(url) = env_opt("YAMETRIKA_OAUTH_URL") {
        config.endpoints.oauth_url = url;
    }
    if let Some(url) = env_opt("YAMETRIKA_STABLE_HOST") {
        config.endpoints.stable_host = url;
    }
    if let Some(url) = env_opt("YAMETRIKA_BETA_HOST") {
        config.endpoints.beta_host = url;
    }

    check(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `MetrikaError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - The loaded configuration fails validation
pub fn load_from_file(path: Option<PathBuf>) -> Result<SessionConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(MetrikaError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            MetrikaError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| MetrikaError::Config(format!("Failed to read config file: {e}")))?;

    check(parse_config(&contents, &config_path)?)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<SessionConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| MetrikaError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| MetrikaError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(MetrikaError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

// Validation shared by both sources; endpoints must be absolute URLs
fn check(config: SessionConfig) -> Result<SessionConfig> {
    config.validate()?;
    for endpoint in [
        &config.endpoints.oauth_url,
        &config.endpoints.stable_host,
        &config.endpoints.beta_host,
    ] {
        Url::parse(endpoint).map_err(InfraError::from)?;
    }
    Ok(config)
}

/// Non-empty environment variable
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
