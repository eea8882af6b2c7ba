use super::*;

use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_settings_file(contents: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("admin_settings_test_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join(SETTINGS_FILE);
    fs::write(&path, contents).expect("write settings");
    path
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings = load_settings_from(Path::new("/nonexistent/admin.toml"), |_| None);
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.api_url, "http://localhost:8000");
    assert_eq!(settings.page_size, 10);
    assert_eq!(settings.toast_ms, 4000);
}

#[test]
fn file_values_override_defaults() {
    let path = temp_settings_file(
        "api_url = \"https://hr.internal/\"\npage_size = 25\ntoast_ms = 1500\n",
    );
    let settings = load_settings_from(&path, |_| None);
    assert_eq!(settings.api_url, "https://hr.internal");
    assert_eq!(settings.page_size, 25);
    assert_eq!(settings.toast_ms, 1500);
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let path = temp_settings_file("api_url = \"https://from-file.example\"\n");
    let settings = load_settings_from(&path, |key| match key {
        "ADMIN_API_URL" => Some("http://legacy.example".to_string()),
        "APP__API_URL" => Some("http://app.example:9000/".to_string()),
        "APP__REQUEST_TIMEOUT_SECS" => Some("3".to_string()),
        "APP__TOAST_MS" => Some("not-a-number".to_string()),
        _ => None,
    });
    assert_eq!(settings.api_url, "http://app.example:9000");
    assert_eq!(settings.request_timeout_secs, 3);
    assert_eq!(settings.toast_ms, 4000);
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn malformed_file_is_ignored() {
    let path = temp_settings_file("api_url = [unterminated");
    let settings = load_settings_from(&path, |_| None);
    assert_eq!(settings, Settings::default());
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn normalizes_api_urls() {
    assert_eq!(normalize_api_url("  http://localhost:8000//  "), "http://localhost:8000");
    assert_eq!(normalize_api_url(""), DEFAULT_API_URL);
    assert_eq!(normalize_api_url("not a url"), DEFAULT_API_URL);
    assert_eq!(normalize_api_url("ftp://files.example"), DEFAULT_API_URL);
    assert_eq!(
        normalize_api_url("https://api.example.com/v1/"),
        "https://api.example.com/v1"
    );
}
