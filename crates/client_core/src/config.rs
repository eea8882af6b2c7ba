use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;
use shared::protocol::DEFAULT_PAGE_SIZE;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const SETTINGS_FILE: &str = "admin.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub api_url: String,
    pub page_size: u32,
    pub toast_ms: u64,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            page_size: DEFAULT_PAGE_SIZE,
            toast_ms: 4000,
            request_timeout_secs: 15,
        }
    }
}

/// Defaults, then `admin.toml` in the working directory, then the environment.
pub fn load_settings() -> Settings {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(
    file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(file) {
        match toml::from_str::<HashMap<String, toml::Value>>(&raw) {
            Ok(file_cfg) => apply_file(&mut settings, &file_cfg),
            Err(err) => tracing::warn!(path = %file.display(), "ignoring unreadable settings file: {err}"),
        }
    }

    if let Some(v) = env("ADMIN_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = env("APP__TOAST_MS").and_then(|v| v.parse().ok()) {
        settings.toast_ms = v;
    }

    settings.api_url = normalize_api_url(&settings.api_url);
    settings
}

fn apply_file(settings: &mut Settings, file_cfg: &HashMap<String, toml::Value>) {
    if let Some(v) = file_cfg.get("api_url").and_then(toml::Value::as_str) {
        settings.api_url = v.to_string();
    }
    if let Some(v) = file_cfg
        .get("page_size")
        .and_then(toml::Value::as_integer)
        .and_then(|v| u32::try_from(v).ok())
        .filter(|v| *v > 0)
    {
        settings.page_size = v;
    }
    if let Some(v) = file_cfg
        .get("toast_ms")
        .and_then(toml::Value::as_integer)
        .and_then(|v| u64::try_from(v).ok())
    {
        settings.toast_ms = v;
    }
    if let Some(v) = file_cfg
        .get("request_timeout_secs")
        .and_then(toml::Value::as_integer)
        .and_then(|v| u64::try_from(v).ok())
    {
        settings.request_timeout_secs = v;
    }
}

/// Trims, drops trailing slashes, and falls back to the default for blank or
/// unparseable input.
pub fn normalize_api_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_API_URL.to_string();
    }

    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => trimmed.to_string(),
        Ok(url) => {
            tracing::warn!(scheme = url.scheme(), "unsupported api url scheme; using default");
            DEFAULT_API_URL.to_string()
        }
        Err(err) => {
            tracing::warn!(url = trimmed, "invalid api url ({err}); using default");
            DEFAULT_API_URL.to_string()
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
