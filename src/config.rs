//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `--config-file <path>`, else `$XDG_CONFIG_HOME/willow2yew/willow2yew.toml`
//! 3. Environment variables: `WILLOW2YEW_*` prefix
//! 4. Command-line flags (applied by the CLI layer)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// Unified configuration for willow2yew.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Extension of the written node file, without the dot (default: yew)
    pub output_extension: String,
    /// Spaces per indentation level in the written JSON; 0 writes one line
    pub indent: usize,
    /// Reject references that resolve to a later statement
    pub strict_references: bool,
    /// Replace an existing output file
    pub overwrite: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_extension: "yew".into(),
            indent: 4,
            strict_references: false,
            overwrite: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub output_extension: Option<String>,
    pub indent: Option<usize>,
    pub strict_references: Option<bool>,
    pub overwrite: Option<bool>,
}

/// Get the XDG config directory for willow2yew.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "willow2yew").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("willow2yew.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// An unset variable is `None`; a value of the wrong type is an error.
fn present<T>(value: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match value {
        Ok(v) => Ok(Some(v)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            output_extension: overlay
                .output_extension
                .clone()
                .unwrap_or_else(|| self.output_extension.clone()),
            indent: overlay.indent.unwrap_or(self.indent),
            strict_references: overlay.strict_references.unwrap_or(self.strict_references),
            overwrite: overlay.overwrite.unwrap_or(self.overwrite),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Explicit config file; must exist. Without it the global
    ///   XDG file is used when present.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        let file = match config_file {
            Some(path) if !path.is_file() => {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                })
            }
            Some(path) => Some(path.to_path_buf()),
            None => global_config_path().filter(|p| p.is_file()),
        };
        if let Some(path) = file {
            debug!("loading config from {}", path.display());
            current = current.merge_with(&load_raw_settings(&path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.normalize()?;
        Ok(current)
    }

    /// Apply WILLOW2YEW_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("WILLOW2YEW")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = present(config.get_string("output_extension"))? {
            settings.output_extension = val;
        }
        if let Some(val) = present(config.get_int("indent"))? {
            settings.indent = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("indent must not be negative: {}", val),
            })?;
        }
        if let Some(val) = present(config.get_bool("strict_references"))? {
            settings.strict_references = val;
        }
        if let Some(val) = present(config.get_bool("overwrite"))? {
            settings.overwrite = val;
        }

        Ok(settings)
    }

    /// Accept `.yew` as well as `yew`.
    fn normalize(&mut self) -> Result<(), ApplicationError> {
        let trimmed = self.output_extension.trim().trim_start_matches('.');
        if trimmed.is_empty() {
            return Err(ApplicationError::Config {
                message: "output_extension must not be empty".into(),
            });
        }
        self.output_extension = trimmed.to_string();
        Ok(())
    }

    /// Effective settings as TOML, for `willow2yew config`.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_unspecified_values() {
        let overlay = RawSettings {
            indent: Some(2),
            ..RawSettings::default()
        };
        let merged = Settings::default().merge_with(&overlay);
        assert_eq!(merged.indent, 2);
        assert_eq!(merged.output_extension, "yew");
        assert!(merged.overwrite);
    }

    #[test]
    fn test_present_separates_missing_from_invalid() {
        let missing: Result<bool, ConfigError> = Err(ConfigError::NotFound("overwrite".into()));
        assert_eq!(present(missing).unwrap(), None);

        let invalid: Result<bool, ConfigError> = Err(ConfigError::Message("not a bool".into()));
        assert!(matches!(present(invalid), Err(ApplicationError::Config { .. })));

        assert_eq!(present(Ok(false)).unwrap(), Some(false));
    }

    #[test]
    fn test_normalize_strips_leading_dot() {
        let mut settings = Settings {
            output_extension: ".json".into(),
            ..Settings::default()
        };
        settings.normalize().unwrap();
        assert_eq!(settings.output_extension, "json");
    }

    #[test]
    fn test_normalize_rejects_empty_extension() {
        let mut settings = Settings {
            output_extension: " . ".into(),
            ..Settings::default()
        };
        assert!(settings.normalize().is_err());
    }
}
