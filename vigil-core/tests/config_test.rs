//! Config parsing and defaults.

use vigil_core::VigilConfig;

#[test]
fn defaults_apply_when_fields_are_absent() {
    let config = VigilConfig::from_toml_str("").unwrap();
    assert_eq!(config.effective_read_pool_size(), 4);
    assert_eq!(config.effective_stale_run_timeout_secs(), 900);
    assert!(config.database_path.is_none());
}

#[test]
fn explicit_fields_override_defaults() {
    let config = VigilConfig::from_toml_str(
        r#"
        database_path = "/var/lib/vigil/core.db"
        read_pool_size = 2
        stale_run_timeout_secs = 120
        "#,
    )
    .unwrap();
    assert_eq!(config.effective_read_pool_size(), 2);
    assert_eq!(config.effective_stale_run_timeout_secs(), 120);
    assert_eq!(
        config.database_path.as_deref().map(|p| p.to_str()),
        Some(Some("/var/lib/vigil/core.db"))
    );
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = VigilConfig::from_toml_str("read_pool_size = \"many\"").unwrap_err();
    assert!(err.to_string().contains("parse"));
}

#[test]
fn load_reads_from_disk() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("vigil.toml");
    std::fs::write(&path, "stale_run_timeout_secs = 60\n").unwrap();

    let config = VigilConfig::load(&path).unwrap();
    assert_eq!(config.effective_stale_run_timeout_secs(), 60);

    let missing = VigilConfig::load(&dir.path().join("absent.toml"));
    assert!(missing.is_err());
}
