#![allow(clippy::unwrap_used)]
//! Config priority contract tests.
//!
//! These tests verify that CLI options take priority over config file settings.
//! Priority order (highest to lowest):
//! 1. CLI arguments
//! 2. Config file settings
//! 3. Built-in defaults

use mtgate::config::{
    BingConfig, ConfigFile, DefaultsConfig, GoogleConfig, ResolveOptions, resolve_config,
};
use mtgate::translation::{Backend, BingCredentials, Credentials, GoogleCredentials};

fn make_config_with_defaults() -> ConfigFile {
    ConfigFile {
        defaults: DefaultsConfig {
            backend: Some(Backend::Bing),
            to: Some("ja".to_string()),
            from: Some("fr".to_string()),
            timeout_secs: Some(5),
        },
        google: GoogleConfig {
            api_key: Some("google_file_key".to_string()),
            api_key_env: None,
            quota_user: Some("config_quota".to_string()),
            referer: Some("https://config.example/".to_string()),
            endpoint: None,
        },
        bing: BingConfig {
            api_key: Some("bing_file_key".to_string()),
            api_key_env: None,
            region: Some("westeurope".to_string()),
            endpoint: Some("http://bing.local".to_string()),
        },
    }
}

#[test]
fn test_config_defaults_used_when_cli_not_specified() {
    let config = make_config_with_defaults();

    let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();

    assert_eq!(resolved.backend, Backend::Bing);
    assert_eq!(resolved.target_language.as_deref(), Some("ja"));
    assert_eq!(resolved.source_language.as_deref(), Some("fr"));
    assert_eq!(resolved.endpoint.as_deref(), Some("http://bing.local"));
    assert_eq!(resolved.timeout, Some(std::time::Duration::from_secs(5)));
    assert_eq!(
        resolved.credentials,
        Credentials::Bing(BingCredentials {
            api_key: "bing_file_key".to_string(),
            region: Some("westeurope".to_string()),
        })
    );
}

#[test]
fn test_cli_backend_overrides_config_backend() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        backend: Some(Backend::Google),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &config).unwrap();

    // Google settings come from the [google] section, not [bing]
    assert_eq!(resolved.backend, Backend::Google);
    assert_eq!(resolved.endpoint, None);
    assert_eq!(
        resolved.credentials,
        Credentials::Google(GoogleCredentials {
            key: "google_file_key".to_string(),
            quota_user: Some("config_quota".to_string()),
            referer: Some("https://config.example/".to_string()),
        })
    );
}

#[test]
fn test_cli_to_overrides_config_to() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        to: Some("en".to_string()),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &config).unwrap();

    assert_eq!(resolved.require_target().unwrap(), "en");
}

#[test]
fn test_cli_auto_source_overrides_config_from() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        from: Some("auto".to_string()),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &config).unwrap();

    // "auto" from the CLI beats the configured source and means auto-detect
    assert_eq!(resolved.source_language, None);
}

#[test]
fn test_cli_key_overrides_config_key() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        key: Some("cli_key".to_string()),
        region: Some("eastus".to_string()),
        endpoint: Some("http://cli.local".to_string()),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &config).unwrap();

    assert_eq!(resolved.endpoint.as_deref(), Some("http://cli.local"));
    assert_eq!(
        resolved.credentials,
        Credentials::Bing(BingCredentials {
            api_key: "cli_key".to_string(),
            region: Some("eastus".to_string()),
        })
    );
}

#[test]
fn test_all_cli_options_override_config() {
    let config = make_config_with_defaults();
    let options = ResolveOptions {
        backend: Some(Backend::Google),
        from: Some("de".to_string()),
        to: Some("zh-TW".to_string()),
        key: Some("cli_key".to_string()),
        quota_user: Some("cli_quota".to_string()),
        referer: Some("https://cli.example/".to_string()),
        region: None,
        endpoint: Some("http://google.local".to_string()),
    };

    let resolved = resolve_config(&options, &config).unwrap();

    assert_eq!(resolved.backend, Backend::Google);
    assert_eq!(resolved.source_language.as_deref(), Some("de"));
    assert_eq!(resolved.target_language.as_deref(), Some("zh-TW"));
    assert_eq!(resolved.endpoint.as_deref(), Some("http://google.local"));
    assert_eq!(
        resolved.credentials,
        Credentials::Google(GoogleCredentials {
            key: "cli_key".to_string(),
            quota_user: Some("cli_quota".to_string()),
            referer: Some("https://cli.example/".to_string()),
        })
    );
}

#[test]
fn test_missing_target_is_reported() {
    let mut config = make_config_with_defaults();
    config.defaults.to = None;

    let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();

    let err = resolved.require_target().unwrap_err();
    assert!(err.to_string().contains("'to'"));
}
