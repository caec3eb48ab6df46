//! Configuration loading for the OncoAI client.
//! Reads oncoai.toml from the current directory or the path in ONCOAI_CONFIG.

use std::path::{Path, PathBuf};

use anyhow::Context;
use oncoai_common::ClientConfig;
use tracing::{info, warn};

pub const DEFAULT_CONFIG_FILE: &str = "oncoai.toml";

/// Overrides `[api] base_url`.
pub const API_URL_ENV: &str = "ONCOAI_API_URL";
pub const CONFIG_ENV: &str = "ONCOAI_CONFIG";


/// Resolve the config file: explicit path, then ONCOAI_CONFIG, then ./oncoai.toml.
pub fn config_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Load the configuration. A missing file yields defaults; a file that
/// exists but does not parse is an error.
pub fn load(explicit: Option<&Path>) -> anyhow::Result<ClientConfig> {
    let path = config_path(explicit);
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = parse(&content).with_context(|| format!("parsing {}", path.display()))?;
        info!(path = %path.display(), "Configuration loaded");
        config
    } else {
        warn!(path = %path.display(), "Config file not found, using defaults");
        warn!("Copy oncoai.example.toml to oncoai.toml and edit it.");
        ClientConfig::default()
    };
    apply_env_overrides(&mut config, std::env::var(API_URL_ENV).ok());
    Ok(config)
}

pub fn parse(content: &str) -> anyhow::Result<ClientConfig> {
    Ok(toml::from_str(content)?)
}

/// Apply the base URL override; blank values are ignored.
pub fn apply_env_overrides(config: &mut ClientConfig, api_url: Option<String>) {
    if let Some(url) = api_url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
        info!(base_url = %url, "API base URL overridden by {}", API_URL_ENV);
        config.api.base_url = url;
    }
}
