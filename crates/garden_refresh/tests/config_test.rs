//! Loading refresh configuration from TOML files.

use garden_core::{StatsSnapshot, default_commands};
use garden_refresh::{RefreshConfig, RefreshConfigBuilder};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn toml_file(content: &str) -> anyhow::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[test]
fn test_partial_file_keeps_defaults() -> anyhow::Result<()> {
    let file = toml_file(
        r#"
        rate_limit_window_secs = 60
        api_base_url = "http://localhost:3000"
        "#,
    )?;

    let config = RefreshConfig::from_file(file.path())?;

    assert_eq!(config.rate_limit_window(), Duration::from_secs(60));
    assert_eq!(config.api_base_url(), "http://localhost:3000");
    assert_eq!(config.validity_window(), Duration::from_secs(600));
    assert_eq!(config.request_timeout(), Duration::from_secs(10));
    assert_eq!(config.refresh_interval(), Duration::from_secs(300));
    assert_eq!(config.error_banner_duration(), Duration::from_secs(15));
    assert_eq!(config.fallback_stats(), &StatsSnapshot::fallback());
    assert_eq!(config.fallback_commands(), &default_commands());
    Ok(())
}

#[test]
fn test_file_overrides_fallback_stats() -> anyhow::Result<()> {
    let file = toml_file(
        r#"
        [fallback_stats]
        servers = 1
        users = 2
        notifications = 3
        uptime = "5m 0s"
        "#,
    )?;

    let config = RefreshConfig::from_file(file.path())?;

    assert_eq!(config.fallback_stats().servers, 1);
    assert_eq!(config.fallback_stats().uptime, "5m 0s");
    Ok(())
}

#[test]
fn test_missing_file_is_an_error() {
    let result = RefreshConfig::from_file("/nonexistent/garden_notifier/refresh.toml");
    assert!(result.is_err());
}

#[test]
fn test_zero_window_is_rejected() -> anyhow::Result<()> {
    let file = toml_file("validity_window_secs = 0\n")?;
    assert!(RefreshConfig::from_file(file.path()).is_err());
    Ok(())
}

#[test]
fn test_builder_and_setters_agree() -> anyhow::Result<()> {
    let built = RefreshConfigBuilder::default()
        .rate_limit_window_secs(30u64)
        .api_base_url("http://127.0.0.1:9000")
        .build()?;

    let set = RefreshConfig::default()
        .with_rate_limit_window_secs(30)
        .with_api_base_url("http://127.0.0.1:9000");

    assert_eq!(built, set);
    Ok(())
}
