//! Configuration Loader Tests
//!
//! Every test pins an explicit file path and a private environment prefix so
//! files and variables of the host never leak in.

use std::env;

use tempfile::TempDir;
use wirebox_domain::error::Error;
use wirebox_infrastructure::config::{
    ConfigBuilder, ConfigLoader, ContainerConfig, LoggingConfig, RebindPolicy,
};
use wirebox_infrastructure::constants::DEFAULT_LOG_LEVEL;

fn isolated_loader(temp_dir: &TempDir, file: &str, prefix: &str) -> ConfigLoader {
    ConfigLoader::new()
        .with_config_path(temp_dir.path().join(file))
        .with_env_prefix(prefix)
}

#[test]
fn test_defaults_when_file_missing() {
    let temp_dir = TempDir::new().unwrap();
    let config = isolated_loader(&temp_dir, "missing.toml", "WIREBOX_TEST_DEFAULTS")
        .load()
        .unwrap();

    assert_eq!(config, ContainerConfig::default());
    assert_eq!(config.bindings.rebind, RebindPolicy::Replace);
    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    assert!(!config.logging.json_format);
    assert!(config.logging.file_output.is_none());
}

#[test]
fn test_load_from_toml_file() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("wirebox.toml"),
        r#"
[bindings]
rebind = "reject"

[logging]
level = "debug"
json_format = true
"#,
    )
    .unwrap();

    let loader = isolated_loader(&temp_dir, "wirebox.toml", "WIREBOX_TEST_FILE");
    let config = loader.load().unwrap();

    assert_eq!(config.bindings.rebind, RebindPolicy::Reject);
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json_format);
    assert_eq!(
        loader.config_path(),
        Some(temp_dir.path().join("wirebox.toml").as_path())
    );
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("partial.toml"),
        "[bindings]\nrebind = \"warn\"\n",
    )
    .unwrap();

    let config = isolated_loader(&temp_dir, "partial.toml", "WIREBOX_TEST_PARTIAL")
        .load()
        .unwrap();

    assert_eq!(config.bindings.rebind, RebindPolicy::Warn);
    assert_eq!(config.logging, LoggingConfig::default());
}

#[test]
fn test_invalid_log_level_rejected() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("bad.toml"),
        "[logging]\nlevel = \"loud\"\n",
    )
    .unwrap();

    match isolated_loader(&temp_dir, "bad.toml", "WIREBOX_TEST_BAD_LEVEL").load() {
        Err(Error::Configuration { message, .. }) => assert!(message.contains("loud")),
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_unknown_rebind_policy_rejected() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("bad.toml"),
        "[bindings]\nrebind = \"sometimes\"\n",
    )
    .unwrap();

    match isolated_loader(&temp_dir, "bad.toml", "WIREBOX_TEST_BAD_POLICY").load() {
        Err(Error::Configuration { source, .. }) => assert!(source.is_some()),
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_config_save_load() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("saved.toml");

    let original = ConfigBuilder::new()
        .with_rebind_policy(RebindPolicy::Warn)
        .with_logging(LoggingConfig {
            level: "trace".to_string(),
            json_format: true,
            file_output: Some(temp_dir.path().join("wirebox.log")),
        })
        .build();

    let loader = isolated_loader(&temp_dir, "saved.toml", "WIREBOX_TEST_SAVE");
    loader.save_to_file(&original, &config_path).unwrap();

    assert_eq!(loader.load().unwrap(), original);
}

#[test]
fn test_save_into_missing_directory_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("absent").join("wirebox.toml");

    match ConfigLoader::new().save_to_file(&ContainerConfig::default(), &config_path) {
        Err(Error::Io { message, source }) => {
            assert!(message.contains("wirebox.toml"));
            assert!(source.is_some());
        }
        other => panic!("Expected Io error, got {other:?}"),
    }
}

/// Run with: `cargo test -p wirebox-infrastructure --test unit config_tests -- --ignored`
#[test]
#[ignore = "mutates process environment"]
fn test_env_overrides_file() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("wirebox.toml"),
        "[bindings]\nrebind = \"reject\"\n",
    )
    .unwrap();

    // SAFETY: the variables use a prefix no other test reads
    unsafe {
        env::set_var("WIREBOX_TEST_ENV_BINDINGS__REBIND", "warn");
        env::set_var("WIREBOX_TEST_ENV_LOGGING__LEVEL", "error");
    }

    let config = isolated_loader(&temp_dir, "wirebox.toml", "WIREBOX_TEST_ENV").load();

    // SAFETY: see above
    unsafe {
        env::remove_var("WIREBOX_TEST_ENV_BINDINGS__REBIND");
        env::remove_var("WIREBOX_TEST_ENV_LOGGING__LEVEL");
    }

    let config = config.unwrap();
    assert_eq!(config.bindings.rebind, RebindPolicy::Warn);
    assert_eq!(config.logging.level, "error");
}
