//! Miette diagnostic wrapper for JSON input errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use preview_links::ConfigError;
use thiserror::Error;

/// A miette-compatible diagnostic for malformed config or script files.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid JSON: {message}")]
#[diagnostic(code(preview_links::json))]
pub struct JsonDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl JsonDiagnostic {
    /// Create a diagnostic pointing at `line`:`column` of `content`.
    pub fn new(path: &Path, content: &str, line: usize, column: usize, message: String) -> Self {
        // Convert line:column to byte offset.
        // Sum of (line_length + 1) for lines before error line, plus column.
        let offset = content
            .lines()
            .take(line.saturating_sub(1))
            .map(|l| l.len() + 1)
            .sum::<usize>()
            + column.saturating_sub(1);

        // Clamp offset to content length to avoid miette panic on out-of-bounds
        let offset = offset.min(content.len());

        JsonDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, 1).into(),
            message,
            help: None,
        }
    }

    /// Create a diagnostic from a serde_json error.
    pub fn from_serde_error(path: &Path, content: &str, err: &serde_json::Error) -> Self {
        Self::new(path, content, err.line(), err.column(), err.to_string())
    }

    /// Create a diagnostic from a config error. Returns `None` for errors
    /// without a source location.
    pub fn from_config_error(path: &Path, content: &str, err: &ConfigError) -> Option<Self> {
        match err {
            ConfigError::Parse {
                line,
                column,
                message,
                ..
            } => Some(
                Self::new(path, content, *line, *column, message.clone()).with_help(
                    "expected keys: instanceUrl, previewPath, previewSecret, useDefaultLang, entityPath, locales",
                ),
            ),
            ConfigError::Io { .. } | ConfigError::NoLocales => None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}
