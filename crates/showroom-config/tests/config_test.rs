#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::ExposeSecret;
use tempfile::TempDir;

use showroom_config::{
    Config, ConfigError, Defaults, Profile, load_config_from, profile_to_client_config,
    resolve_api_key, save_config_to,
};
use showroom_core::TlsVerification;

fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

// ── Loading ─────────────────────────────────────────────────────────

#[test]
fn missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();

    let config = load_config_from(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.defaults.timeout, 30);
}

#[test]
fn profiles_and_defaults_are_read_from_toml() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
default_profile = "prod"

[defaults]
timeout = 12

[profiles.prod]
url = "https://xyz.supabase.co"
api_key_env = "SHOWROOM_TEST_UNSET_KEY_VAR"
api_key = "anon-key"

[profiles.staging]
url = "https://staging.example"
timeout = 5
ca_cert = "/etc/ssl/staging.pem"
"#,
    );

    let config = load_config_from(&path).unwrap();

    let (name, profile) = config.profile(None).unwrap();
    assert_eq!(name, "prod");
    assert_eq!(profile.url, "https://xyz.supabase.co");

    let prod = config.client_config(None).unwrap();
    assert_eq!(prod.timeout, Duration::from_secs(12));
    assert_eq!(prod.tls, TlsVerification::SystemDefaults);

    let staging = config.client_config(Some("staging")).unwrap();
    assert_eq!(staging.timeout, Duration::from_secs(5));
    assert_eq!(
        staging.tls,
        TlsVerification::CustomCa(PathBuf::from("/etc/ssl/staging.pem"))
    );
}

#[test]
fn malformed_toml_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[profiles.prod\nurl = ");

    assert!(matches!(
        load_config_from(&path),
        Err(ConfigError::Figment(_))
    ));
}

// ── Saving ──────────────────────────────────────────────────────────

#[test]
fn saved_config_loads_back() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let mut config = Config::default();
    config.profiles.insert(
        "default".into(),
        Profile {
            url: "https://xyz.supabase.co".into(),
            timeout: Some(8),
            ..Profile::default()
        },
    );

    save_config_to(&path, &config).unwrap();

    assert_eq!(load_config_from(&path).unwrap(), config);
}

// ── Credentials ─────────────────────────────────────────────────────

#[test]
fn env_var_wins_over_plaintext_key() {
    // Cargo exports this to every test process.
    let profile = Profile {
        url: "https://xyz.supabase.co".into(),
        api_key: Some("from-file".into()),
        api_key_env: Some("CARGO_MANIFEST_DIR".into()),
        ..Profile::default()
    };

    let key = resolve_api_key(&profile, "env-test").unwrap();

    assert_eq!(key.expose_secret(), env!("CARGO_MANIFEST_DIR"));
}

#[test]
fn profile_without_key_has_no_credentials() {
    let profile = Profile {
        url: "https://xyz.supabase.co".into(),
        ..Profile::default()
    };

    assert!(matches!(
        resolve_api_key(&profile, "showroom-test-no-key"),
        Err(ConfigError::NoCredentials { .. })
    ));
    let config = profile_to_client_config(&profile, "showroom-test-no-key", &Defaults::default())
        .unwrap();
    assert!(config.api_key.is_none());
}

#[test]
fn invalid_profile_values_are_rejected() {
    let bad_url = Profile {
        url: "not a url".into(),
        ..Profile::default()
    };
    let zero_timeout = Profile {
        url: "https://xyz.supabase.co".into(),
        timeout: Some(0),
        ..Profile::default()
    };

    let err = profile_to_client_config(&bad_url, "p", &Defaults::default()).unwrap_err();
    assert_eq!(err.to_string(), "invalid url: invalid URL: not a url");
    assert!(matches!(
        profile_to_client_config(&zero_timeout, "p", &Defaults::default()),
        Err(ConfigError::Validation { field, .. }) if field == "timeout"
    ));
}
