//! Integration tests for Settings loading from an explicit config file.
//!
//! Precedence: defaults → config file → WILLOW2YEW_* env → CLI flags.
//! Env overrides are covered in config_env_test.rs, which runs as its own binary.

use std::fs;

use tempfile::TempDir;

use willow2yew::application::ApplicationError;
use willow2yew::cli::ConvertArgs;
use willow2yew::config::Settings;

#[test]
fn given_config_file_when_load_then_overrides_only_specified_values() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("willow2yew.toml");
    fs::write(
        &path,
        r#"
indent = 2
overwrite = false
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(&path)).expect("load settings");

    // Assert
    assert_eq!(settings.indent, 2);
    assert!(!settings.overwrite);
    assert_eq!(settings.output_extension, "yew");
    assert!(!settings.strict_references);
}

#[test]
fn given_extension_with_dot_when_load_then_strips_it() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("willow2yew.toml");
    fs::write(&path, "output_extension = \".json\"\n").unwrap();

    // Act
    let settings = Settings::load(Some(&path)).unwrap();

    // Assert
    assert_eq!(settings.output_extension, "json");
}

#[test]
fn given_missing_config_file_when_load_then_fails() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.toml");

    // Act
    let result = Settings::load(Some(&path));

    // Assert
    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_invalid_toml_when_load_then_fails_with_path() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.toml");
    fs::write(&path, "indent = \"four\"\n").unwrap();

    // Act
    let result = Settings::load(Some(&path));

    // Assert
    match result {
        Err(ApplicationError::Config { message }) => {
            assert!(message.contains("broken.toml"), "message: {}", message)
        }
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn given_cli_flags_when_applied_then_override_loaded_settings() {
    // Arrange
    let loaded = Settings {
        indent: 2,
        ..Settings::default()
    };
    let args = ConvertArgs {
        compact: true,
        strict: true,
        no_clobber: true,
        ..ConvertArgs::default()
    };

    // Act
    let settings = args.apply(loaded);

    // Assert
    assert_eq!(settings.indent, 0);
    assert!(settings.strict_references);
    assert!(!settings.overwrite);
}

#[test]
fn given_settings_when_rendering_toml_then_parses_back() {
    // Arrange
    let settings = Settings::default();

    // Act
    let rendered = settings.to_toml().unwrap();

    // Assert
    let parsed: Settings = toml::from_str(&rendered).unwrap();
    assert_eq!(parsed, settings);
    assert!(rendered.contains("output_extension = \"yew\""));
}
