//! Config loading tests - file handling, defaults and validation

use std::fs;
use std::path::Path;

use blockfall::config::{Config, ConfigError, SpawnMode};
use blockfall::core::SpawnPolicy;
use blockfall::types::{PieceKind, GRAVITY_TICKS};
use tempfile::TempDir;

#[test]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[board]
width = 12

[timing]
input_repeat_ticks = 5
lock_on_landing = true

[spawn]
mode = "fixed"
kind = "I"
"#,
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.board.width, 12);
    assert_eq!(config.board.height, 20);
    assert_eq!(config.timing.gravity_ticks, GRAVITY_TICKS);

    let settings = config.session_settings();
    assert_eq!(settings.width, 12);
    assert_eq!(settings.input_repeat_ticks, 5);
    assert!(settings.lock_on_landing);
    assert_eq!(settings.spawn, SpawnPolicy::Fixed(PieceKind::I));
    assert_eq!(config.view, Default::default());
}

#[test]
fn test_random_spawn_uses_seed() {
    let config = Config::from_toml("[spawn]\nseed = 99\n", Path::new("inline")).unwrap();
    assert_eq!(config.spawn.mode, SpawnMode::Random);
    assert_eq!(config.spawn_policy(), SpawnPolicy::Random { seed: 99 });
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[board\nwidth = ").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn test_wrong_field_type_is_parse_error() {
    let err = Config::from_toml("[board]\nwidth = \"wide\"\n", Path::new("inline")).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_invalid_values_are_rejected() {
    for contents in [
        "[board]\nwidth = 0\n",
        "[board]\nheight = 0\n",
        "[timing]\nfps = 0\n",
        "[timing]\nfps = 5000\n",
        "[timing]\ngravity_ticks = 0\n",
        "[timing]\ninput_repeat_ticks = 0\n",
        "[view]\ncell_width = 0\n",
        "[spawn]\nmode = \"fixed\"\nkind = \"x\"\n",
    ] {
        let result = Config::from_toml(contents, Path::new("inline"));
        assert!(
            matches!(result, Err(ConfigError::Invalid(_))),
            "{contents:?} gave {result:?}"
        );
    }
}

#[test]
fn test_unknown_spawn_kind_is_ignored_in_random_mode() {
    let config = Config::from_toml("[spawn]\nkind = \"x\"\n", Path::new("inline")).unwrap();
    assert_eq!(config.spawn_policy(), SpawnPolicy::Random { seed: 1 });
}

#[test]
fn test_unreadable_path_is_io_error() {
    let dir = TempDir::new().unwrap();
    // A directory exists but cannot be read as a file.
    let err = Config::load_from(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_default_config_round_trips_through_toml() {
    let text = toml::to_string(&Config::default()).unwrap();
    let parsed = Config::from_toml(&text, Path::new("inline")).unwrap();
    assert_eq!(parsed, Config::default());
}
