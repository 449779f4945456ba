//! Playground configuration

use crate::document::BASE_STYLE;
use crate::error::ConfigError;
use folio_sandbox::SandboxConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for [`crate::Playground`]
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// debounce_ms = 500
/// default_template = "todo"
///
/// [sandbox]
/// loop_iteration_limit = 100000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Quiet interval after the last edit before a render fires
    pub debounce_ms: u64,
    /// Style placed before the presentation fragment
    pub base_style: String,
    /// Template loaded when the playground is built
    pub default_template: Option<String>,
    /// Extra templates loaded on top of the built-ins
    pub templates_dir: Option<PathBuf>,
    /// Script sandbox limits
    pub sandbox: SandboxConfig,
}

impl PlaygroundConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With debounce quiet interval in milliseconds
    #[inline]
    #[must_use]
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// With base style
    #[inline]
    #[must_use]
    pub fn with_base_style(mut self, style: impl Into<String>) -> Self {
        self.base_style = style.into();
        self
    }

    /// With (or without) a template loaded at build time
    #[inline]
    #[must_use]
    pub fn with_default_template(mut self, name: Option<&str>) -> Self {
        self.default_template = name.map(str::to_owned);
        self
    }

    /// With extra template directory
    #[inline]
    #[must_use]
    pub fn with_templates_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.templates_dir = Some(dir.into());
        self
    }

    /// With sandbox configuration
    #[inline]
    #[must_use]
    pub fn with_sandbox(mut self, sandbox: SandboxConfig) -> Self {
        self.sandbox = sandbox;
        self
    }

    /// Debounce quiet interval
    #[inline]
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Parse and validate TOML text
    ///
    /// # Errors
    /// [`ConfigError::Parse`] for malformed TOML, [`ConfigError::Invalid`]
    /// for out-of-range values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded playground config");
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// [`ConfigError::Invalid`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.debounce_ms == 0 {
            return Err(ConfigError::Invalid("debounce_ms must be positive".into()));
        }
        if self.sandbox.loop_iteration_limit == 0 {
            return Err(ConfigError::Invalid(
                "sandbox.loop_iteration_limit must be positive".into(),
            ));
        }
        if self.sandbox.recursion_limit == 0 {
            return Err(ConfigError::Invalid(
                "sandbox.recursion_limit must be positive".into(),
            ));
        }
        if let Some(name) = &self.default_template {
            folio_template::validate_name(name)
                .map_err(|e| ConfigError::Invalid(format!("default_template: {e}")))?;
        }
        Ok(())
    }
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 1000,
            base_style: BASE_STYLE.to_owned(),
            default_template: Some(folio_template::builtin::DEFAULT.to_owned()),
            templates_dir: None,
            sandbox: SandboxConfig::default(),
        }
    }
}
