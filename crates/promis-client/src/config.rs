//! Client configuration and credential resolution.
//!
//! Credentials come from (lowest to highest precedence) the built-in
//! public demo GUIDs, a `promis.toml` config file,
//! `PROMIS_REGISTRATION`/`PROMIS_TOKEN` environment variables, and CLI
//! flags applied by the caller.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Base URL of the public Assessment Center API.
pub const DEFAULT_BASE_URL: &str = "https://www.assessmentcenter.net/ac_api";
/// API version path segment.
pub const DEFAULT_API_VERSION: &str = "2014-01";
/// Public demo registration GUID published by the Assessment Center.
pub const DEFAULT_REGISTRATION: &str = "86EBE839-C808-4CD9-B308-8EC79FAB2B76";
/// Public demo token GUID paired with [`DEFAULT_REGISTRATION`].
pub const DEFAULT_TOKEN: &str = "2460B692-2B83-463B-88B1-8F353D6698DD";

/// Connection settings for the Assessment Center API.
///
/// Note: Custom Debug impl masks the token to prevent accidental
/// exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct PromisConfig {
    /// Registration GUID (the Basic auth username).
    #[serde(default = "default_registration")]
    pub registration: String,
    /// Token GUID (the Basic auth password).
    #[serde(default = "default_token")]
    pub token: String,
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API version path segment.
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

impl std::fmt::Debug for PromisConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromisConfig")
            .field("registration", &self.registration)
            .field("token", &"***")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

fn default_registration() -> String {
    DEFAULT_REGISTRATION.to_string()
}
fn default_token() -> String {
    DEFAULT_TOKEN.to_string()
}
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

impl Default for PromisConfig {
    fn default() -> Self {
        Self {
            registration: default_registration(),
            token: default_token(),
            base_url: default_base_url(),
            api_version: default_api_version(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `promis.toml` in the current directory
/// 2. `~/.config/promis/config.toml`
///
/// Environment variable overrides: `PROMIS_REGISTRATION`, `PROMIS_TOKEN`.
pub fn load_config() -> Result<PromisConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<PromisConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("promis.toml");
        if local.exists() {
            Some(local)
        } else if let Some(dir) = config_dir() {
            let global = dir.join("config.toml");
            global.exists().then_some(global)
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<PromisConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => PromisConfig::default(),
    };

    // Apply env var overrides
    if let Ok(registration) = std::env::var("PROMIS_REGISTRATION") {
        config.registration = registration;
    }
    if let Ok(token) = std::env::var("PROMIS_TOKEN") {
        config.token = token;
    }

    // Resolve env vars in all fields
    config.registration = resolve_env_vars(&config.registration);
    config.token = resolve_env_vars(&config.token);
    config.base_url = resolve_env_vars(&config.base_url);
    config.api_version = resolve_env_vars(&config.api_version);

    Ok(config)
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("promis"))
}
