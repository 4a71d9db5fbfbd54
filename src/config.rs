//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rpptree/rpptree.toml`
//! 3. Explicit config file passed on the command line
//! 4. Environment variables: `RPPTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::ParseOptions;

/// How trees are rendered on the terminal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplaySettings {
    /// Deepest level to render, None for unlimited
    pub max_depth: Option<usize>,
    /// Print node values next to type tags
    pub show_values: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            max_depth: None,
            show_values: true,
        }
    }
}

/// Unified configuration for rpptree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Parser behaviour
    pub parser: ParseOptions,
    /// Tree rendering
    pub display: DisplaySettings,
}

/// Raw parser settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawParserSettings {
    pub skip_blank_lines: Option<bool>,
}

/// Raw display settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDisplaySettings {
    pub max_depth: Option<usize>,
    pub show_values: Option<bool>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub parser: RawParserSettings,
    pub display: RawDisplaySettings,
}

/// Get the XDG config directory for rpptree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rpptree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rpptree.toml"))
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

impl Settings {
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            parser: ParseOptions {
                skip_blank_lines: overlay
                    .parser
                    .skip_blank_lines
                    .unwrap_or(self.parser.skip_blank_lines),
            },
            display: DisplaySettings {
                max_depth: overlay.display.max_depth.or(self.display.max_depth),
                show_values: overlay
                    .display
                    .show_values
                    .unwrap_or(self.display.show_values),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; it must exist
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/rpptree/rpptree.toml`
    /// 3. Explicit config file
    /// 4. Environment variables: `RPPTREE_*` prefix, `__` between sections
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|p| p.exists());
        Self::load_from(global.as_deref(), explicit)
    }

    /// Same as [`load`](Self::load) with the global config path supplied.
    pub fn load_from(global: Option<&Path>, explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global {
            debug!("global config: {}", global_path.display());
            current = current.merge_with(&load_raw_settings(global_path)?);
        }

        if let Some(path) = explicit {
            debug!("explicit config: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply RPPTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("RPPTREE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_bool("parser.skip_blank_lines") {
            settings.parser.skip_blank_lines = val;
        }
        if let Ok(val) = config.get_int("display.max_depth") {
            settings.display.max_depth = usize::try_from(val).ok();
        }
        if let Ok(val) = config.get_bool("display.show_values") {
            settings.display.show_values = val;
        }

        Ok(settings)
    }

    /// Render settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_then_blank_lines_kept_and_values_shown() {
        let settings = Settings::default();
        assert!(!settings.parser.skip_blank_lines);
        assert!(settings.display.show_values);
        assert!(settings.display.max_depth.is_none());
    }

    #[test]
    fn given_partial_overlay_when_merge_then_unset_fields_inherit() {
        let base = Settings::default();
        let overlay: RawSettings = toml::from_str("[display]\nmax_depth = 2\n").unwrap();
        let merged = base.merge_with(&overlay);
        assert_eq!(merged.display.max_depth, Some(2));
        assert!(merged.display.show_values);
        assert!(!merged.parser.skip_blank_lines);
    }

    #[test]
    fn given_settings_when_to_toml_then_round_trips_through_raw() {
        let mut settings = Settings::default();
        settings.parser.skip_blank_lines = true;
        let text = settings.to_toml().unwrap();
        let raw: RawSettings = toml::from_str(&text).unwrap();
        assert_eq!(Settings::default().merge_with(&raw), settings);
    }
}
