//! Render settings for quill.
//!
//! Parses `quill.toml` files with serde and provides auto-discovery of the
//! file in parent directories.
//!
//! Programmatic settings can be applied during load via [`Overrides`].
//!
//! ```toml
//! [render]
//! indent_width = 2
//! indent_style = "spaces"
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "quill.toml";

/// Widest indentation accepted from a config file.
const MAX_INDENT_WIDTH: usize = 8;

/// Settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct Overrides {
    /// Override indentation width.
    pub indent_width: Option<usize>,
    /// Override indentation style.
    pub indent_style: Option<IndentStyle>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering configuration.
    pub render: RenderConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Character used for one level of indentation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentStyle {
    /// Indent with spaces, `indent_width` per level.
    #[default]
    Spaces,
    /// Indent with tabs, `indent_width` per level.
    Tabs,
}

/// Rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Characters per indentation level.
    pub indent_width: usize,
    /// Indentation character.
    pub indent_style: IndentStyle,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            indent_style: IndentStyle::Spaces,
        }
    }
}

impl RenderConfig {
    /// The string emitted for one level of indentation.
    ///
    /// # Example
    ///
    /// ```
    /// use quill_config::{IndentStyle, RenderConfig};
    ///
    /// assert_eq!(RenderConfig::default().indent_unit(), "  ");
    ///
    /// let tabs = RenderConfig { indent_width: 1, indent_style: IndentStyle::Tabs };
    /// assert_eq!(tabs.indent_unit(), "\t");
    /// ```
    #[must_use]
    pub fn indent_unit(&self) -> String {
        let ch = match self.indent_style {
            IndentStyle::Spaces => " ",
            IndentStyle::Tabs => "\t",
        };
        ch.repeat(self.indent_width)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional overrides.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `quill.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// Overrides are applied after loading, so they take precedence over
    /// config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting values are invalid.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&Overrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            tracing::debug!(path = %discovered.display(), "Discovered config file");
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
            config.validate()?;
        }

        Ok(config)
    }

    /// Parse configuration from a TOML string and validate it.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides to the configuration.
    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(width) = overrides.indent_width {
            self.render.indent_width = width;
        }
        if let Some(style) = overrides.indent_style {
            self.render.indent_style = style;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.config_path = Some(path.to_path_buf());
        tracing::debug!(
            path = %path.display(),
            indent_width = config.render.indent_width,
            "Loaded config"
        );
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render.indent_width > MAX_INDENT_WIDTH {
            return Err(ConfigError::Validation(format!(
                "render.indent_width cannot exceed {MAX_INDENT_WIDTH}"
            )));
        }
        Ok(())
    }
}
