//! Malformed env var overrides, in a binary of their own so the variables cannot
//! leak into other tests.

use tempfile::TempDir;

use willow2yew::application::ApplicationError;
use willow2yew::config::Settings;

#[test]
fn given_malformed_env_values_when_load_then_fails_instead_of_ignoring_them() {
    // Arrange: no user config file in the way
    let temp = TempDir::new().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", temp.path());
    std::env::set_var("WILLOW2YEW_OVERWRITE", "nope");

    // Act
    let bad_bool = Settings::load(None);
    std::env::remove_var("WILLOW2YEW_OVERWRITE");
    std::env::set_var("WILLOW2YEW_INDENT", "four");
    let bad_int = Settings::load(None);
    std::env::remove_var("WILLOW2YEW_INDENT");

    // Assert
    assert!(matches!(bad_bool, Err(ApplicationError::Config { .. })));
    assert!(matches!(bad_int, Err(ApplicationError::Config { .. })));
}
