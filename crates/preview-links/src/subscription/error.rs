//! Error types for change-listener registration.

use thiserror::Error;

/// An error reported by a locale or field source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The source cannot accept listeners right now.
    #[error("change source unavailable: {reason}")]
    Unavailable { reason: String },

    /// The source does not know the requested field.
    #[error("unknown field '{field}'")]
    UnknownField { field: String },
}
