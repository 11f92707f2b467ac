#![allow(clippy::unwrap_used)]
//! Config priority contract tests.
//!
//! Priority order (highest to lowest):
//! 1. CLI arguments
//! 2. Config file values (environment first for the API key)
//! 3. Built-in defaults

use std::time::Duration;

use serial_test::serial;
use ytr_cli::config::{ApiConfig, ConfigFile, ResolveOptions, YtrConfig, resolve_config};

const KEY_ENV: &str = "YTR_PRIORITY_TEST_API_KEY";

fn make_config_with_defaults() -> ConfigFile {
    ConfigFile {
        ytr: YtrConfig {
            from: Some("en".to_string()),
            to: Some("ru".to_string()),
        },
        api: ApiConfig {
            endpoint: Some("http://config.local/translate".to_string()),
            api_key: Some("config-key".to_string()),
            api_key_env: Some(KEY_ENV.to_string()),
            timeout_secs: Some(30),
            max_retries: Some(5),
            retry_backoff_ms: None,
        },
    }
}

#[test]
fn test_cli_languages_override_config() {
    let options = ResolveOptions {
        from: Some("de".to_string()),
        to: Some("fr".to_string()),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &make_config_with_defaults()).unwrap();

    assert_eq!(resolved.from, "de");
    assert_eq!(resolved.to, "fr");
}

#[test]
fn test_cli_transport_settings_override_config() {
    let options = ResolveOptions {
        endpoint: Some("http://cli.local/translate".to_string()),
        timeout_secs: Some(3),
        max_retries: Some(0),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &make_config_with_defaults()).unwrap();

    assert_eq!(resolved.endpoint, "http://cli.local/translate");
    assert_eq!(resolved.transport.timeout, Duration::from_secs(3));
    assert_eq!(resolved.transport.retry.max_retries, 0);
}

#[test]
fn test_config_values_used_without_cli() {
    let resolved =
        resolve_config(&ResolveOptions::default(), &make_config_with_defaults()).unwrap();

    assert_eq!(resolved.from, "en");
    assert_eq!(resolved.to, "ru");
    assert_eq!(resolved.endpoint, "http://config.local/translate");
    assert_eq!(resolved.transport.timeout, Duration::from_secs(30));
    assert_eq!(resolved.transport.retry.max_retries, 5);
    assert_eq!(
        resolved.transport.retry.base_delay,
        Duration::from_millis(250)
    );
}

#[test]
#[serial]
fn test_env_api_key_overrides_config_key() {
    // SAFETY: serialised; only this test's variable is touched
    unsafe { std::env::set_var(KEY_ENV, "env-key") };

    let resolved =
        resolve_config(&ResolveOptions::default(), &make_config_with_defaults()).unwrap();
    assert_eq!(resolved.credentials.api_key().unwrap(), "env-key");

    unsafe { std::env::remove_var(KEY_ENV) };
}

#[test]
#[serial]
fn test_config_api_key_used_without_env() {
    unsafe { std::env::remove_var(KEY_ENV) };

    let resolved =
        resolve_config(&ResolveOptions::default(), &make_config_with_defaults()).unwrap();
    assert_eq!(resolved.credentials.api_key().unwrap(), "config-key");
}

#[test]
#[serial]
fn test_missing_api_key_is_deferred_to_call_time() {
    unsafe { std::env::remove_var(KEY_ENV) };

    let mut config = make_config_with_defaults();
    config.api.api_key = None;

    let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();
    assert!(!resolved.credentials.is_set());
}
