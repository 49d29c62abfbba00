//! Preview link configuration.
//!
//! Mirrors the parameters the hosting platform stores for the plugin: the
//! site's base URL, the preview route, an optional preview secret, the path
//! template, and the site's locales.

use std::fs;
use std::path::{Path, PathBuf};

use bon::Builder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for one preview link set.
///
/// # Example
///
/// ```
/// use preview_links::PreviewConfig;
///
/// let config = PreviewConfig::builder()
///     .instance_url("https://example.com/")
///     .preview_path("/api/preview")
///     .entity_path("/blog/$slug")
///     .locales(vec!["en".to_string()])
///     .build();
///
/// assert!(config.use_default_lang);
/// assert_eq!(config.secret(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
#[serde(rename_all = "camelCase")]
pub struct PreviewConfig {
    /// Base URL of the front-end site. A trailing `/` is ignored.
    pub instance_url: String,

    /// Route that enables preview mode, e.g. `/api/preview`.
    #[builder(default)]
    #[serde(default)]
    pub preview_path: String,

    /// Shared secret passed to the preview route as `?secret=`.
    pub preview_secret: Option<String>,

    /// Prefix single-locale URLs with the site's only locale.
    #[builder(default = true)]
    #[serde(default = "default_true")]
    pub use_default_lang: bool,

    /// Path template with `$field` placeholders.
    #[builder(default)]
    #[serde(default)]
    pub entity_path: String,

    /// Locales enabled on the site. The first one is the default.
    pub locales: Vec<String>,
}

fn default_true() -> bool {
    true
}

/// Errors that occur while loading a [`PreviewConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error when reading the configuration.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON, or JSON missing required keys.
    #[error("{path}:{line}:{column}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// The site declares no locales.
    #[error("configuration must list at least one locale")]
    NoLocales,
}

impl PreviewConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Load configuration from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, Path::new("<string>"))
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: PreviewConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                line: e.line(),
                column: e.column(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.locales.is_empty() {
            return Err(ConfigError::NoLocales);
        }
        Ok(())
    }

    /// The preview secret, if one is configured and non-empty.
    pub fn secret(&self) -> Option<&str> {
        self.preview_secret.as_deref().filter(|s| !s.is_empty())
    }

    /// Returns true if the site has more than one locale.
    pub fn is_multi_locale(&self) -> bool {
        self.locales.len() > 1
    }
}
