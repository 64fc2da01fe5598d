//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_parse_error() {
    let result = load_from_path(Path::new("/tmp/nonexistent_easydiet_config.toml"));
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert!(matches!(err, easydiet_common::ConfigError::ParseError(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[ai]
api_keys = ["KEY_1", "KEY_2"]
model = "gemini-2.5-pro"
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.ai.api_keys, vec!["KEY_1", "KEY_2"]);
    assert_eq!(config.ai.model, "gemini-2.5-pro");
    // Defaults preserved
    assert_eq!(config.ai.max_output_tokens, 4096);
    assert_eq!(config.history.max_turn_pairs, 30);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert!(matches!(err, easydiet_common::ConfigError::ParseError(_)));
}

#[test]
fn load_with_empty_key_pool_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[history]
max_turn_pairs = 10
"#,
    )
    .unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(
        err,
        easydiet_common::ConfigError::ValidationError(_)
    ));
    assert!(err.to_string().contains("ai.api_keys"));
}

#[test]
fn create_default_config_writes_template() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    create_default_config(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("[ai]"));
    assert!(content.contains("api_keys"));
    assert!(content.contains("[history]"));

    // The template itself parses, though its empty pool fails validation.
    let parsed: crate::schema::EasydietConfig = toml::from_str(&content).unwrap();
    assert!(parsed.ai.api_keys.is_empty());
}

#[test]
fn default_config_path_ends_with_expected_suffix() {
    let path = default_config_path().unwrap();
    assert!(path.ends_with(Path::new("easydiet").join("config.toml")));
}
