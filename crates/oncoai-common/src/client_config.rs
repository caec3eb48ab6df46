//! Client configuration injected into every controller.
//!
//! Replaces the hardcoded `apiBaseUrl` and page names of the browser
//! frontend. Loaded from `oncoai.toml` by the binary, or built with
//! `ClientConfig::default()` in tests.

use serde::{Deserialize, Serialize};

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Prediction API connection
    #[serde(default)]
    pub api: ApiConfig,

    /// Where the session is persisted
    #[serde(default)]
    pub storage: StorageConfig,

    /// Page names and form layout
    #[serde(default)]
    pub pages: PageConfig,
}

// ── API ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the prediction service, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional per-request timeout. `None` waits for the server indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String { "http://127.0.0.1:8000".to_string() }

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: default_base_url(), timeout_secs: None }
    }
}

impl ApiConfig {
    /// Join an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

// ── Storage ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Session file path. Defaults to `<config dir>/oncoai/storage.json`.
    #[serde(default)]
    pub path: Option<String>,
}

// ── Pages ─────────────────────────────────────────────────────────────────────

/// Markup used for the dynamic feature form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldLayout {
    /// One row per gene with expression and SCNA columns.
    #[default]
    Table,
    /// Free layout, two labelled fields per row.
    Paired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default)]
    pub field_layout: FieldLayout,

    /// Page shown after login and when the dashboard is opened without a session
    #[serde(default = "default_landing_page")]
    pub landing_page: String,

    /// Prediction dashboard page
    #[serde(default = "default_dashboard_page")]
    pub dashboard_page: String,
}

fn default_landing_page() -> String { "oncoai-landing.html".to_string() }
fn default_dashboard_page() -> String { "oncoai-model-survival.html".to_string() }

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            field_layout: FieldLayout::default(),
            landing_page: default_landing_page(),
            dashboard_page: default_dashboard_page(),
        }
    }
}
