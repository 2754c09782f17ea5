//! Configuration loading from disk

use cassette_playlist::{PlayerConfig, PlaylistError, RemovalPolicy};
use std::fs;
use tempfile::tempdir;

#[test]
fn loads_settings_from_toml_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("player.toml");
    fs::write(
        &path,
        r#"
        shuffle = true
        idle_label = "Nothing queued"
        max_shuffle_draws = 8
        removal_policy = "neighbor"
        "#,
    )
    .unwrap();

    let config = PlayerConfig::load(Some(&path)).unwrap();

    assert!(config.shuffle);
    assert!(!config.repeat);
    assert_eq!(config.idle_label, "Nothing queued");
    assert_eq!(config.max_shuffle_draws, 8);
    assert_eq!(config.removal_policy, RemovalPolicy::Neighbor);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let config = PlayerConfig::load(Some(&path)).unwrap();

    assert_eq!(config.max_shuffle_draws, 32);
    assert_eq!(config.removal_policy, RemovalPolicy::Literal);
}

#[test]
fn invalid_file_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("player.toml");
    fs::write(&path, "max_shuffle_draws = 0\n").unwrap();

    let err = PlayerConfig::load(Some(&path)).unwrap_err();

    assert!(matches!(err, PlaylistError::Config(_)));
}

#[test]
fn unknown_removal_policy_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("player.toml");
    fs::write(&path, "removal_policy = \"sideways\"\n").unwrap();

    assert!(PlayerConfig::load(Some(&path)).is_err());
}
