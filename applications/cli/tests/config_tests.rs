//! Tests for CLI configuration loading

use expensify_cli::{AppConfig, CliError};
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
    Some(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

#[test]
fn test_load_from_file() {
    let file = config_file(
        r#"
[remote]
url = "https://expensify-test.firebaseio.com"
auth_token = "id_token"

[session]
uid = "u1"
"#,
    );

    let config = AppConfig::load_with_env(Some(file.path()), env(&[])).unwrap();

    assert_eq!(config.remote.url, "https://expensify-test.firebaseio.com");
    assert_eq!(config.remote.auth_token.as_deref(), Some("id_token"));
    assert_eq!(config.session.uid, "u1");
    assert!(config.validate().is_ok());
}

#[test]
fn test_environment_overrides_file() {
    let file = config_file(
        r#"
[remote]
url = "https://expensify-test.firebaseio.com"

[session]
uid = "u1"
"#,
    );

    let config = AppConfig::load_with_env(
        Some(file.path()),
        env(&[
            ("EXPENSIFY_SESSION__UID", "u2"),
            ("EXPENSIFY_REMOTE__AUTH_TOKEN", "from_env"),
        ]),
    )
    .unwrap();

    assert_eq!(config.session.uid, "u2");
    assert_eq!(config.remote.auth_token.as_deref(), Some("from_env"));
    assert_eq!(config.remote.url, "https://expensify-test.firebaseio.com");
}

#[test]
fn test_environment_only() {
    let config = AppConfig::load_with_env(
        None,
        env(&[
            ("EXPENSIFY_REMOTE__URL", "http://localhost:9000"),
            ("EXPENSIFY_SESSION__UID", "u1"),
        ]),
    )
    .unwrap();

    assert!(config.validate().is_ok());
    assert_eq!(config.remote_config().url, "http://localhost:9000");
    assert!(config.remote_config().auth_token.is_none());
    assert_eq!(config.session().unwrap().user_id().as_str(), "u1");
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    match AppConfig::load_with_env(Some(&missing), env(&[])) {
        Err(CliError::Config(msg)) => assert!(msg.contains("not found")),
        other => panic!("Expected Config error, got: {:?}", other),
    }
}

#[test]
fn test_validate_requires_url_and_uid() {
    let mut config = AppConfig::default();
    match config.validate() {
        Err(CliError::Config(msg)) => assert!(msg.contains("Remote URL")),
        other => panic!("Expected Config error, got: {:?}", other),
    }

    config.remote.url = "https://expensify-test.firebaseio.com".into();
    match config.validate() {
        Err(CliError::Config(msg)) => assert!(msg.contains("User id")),
        other => panic!("Expected Config error, got: {:?}", other),
    }

    config.session.uid = "u1".into();
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_uid_rejected_when_building_session() {
    let mut config = AppConfig::default();
    config.session.uid = "a/b".into();

    assert!(matches!(config.session(), Err(CliError::Expensify(_))));
}

#[test]
fn test_empty_token_treated_as_absent() {
    let mut config = AppConfig::default();
    config.remote.auth_token = Some(String::new());

    assert!(config.remote_config().auth_token.is_none());
}
