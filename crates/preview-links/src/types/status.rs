use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Publication status of the record being previewed.
///
/// Only [`RecordStatus::New`] matters to this crate: a record that was never
/// saved has no stable path, so no links are produced for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// Never persisted.
    New,
    #[default]
    Draft,
    /// Published, with unpublished changes.
    Updated,
    Published,
}

impl RecordStatus {
    pub fn is_new(self) -> bool {
        self == RecordStatus::New
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecordStatus::New => "new",
            RecordStatus::Draft => "draft",
            RecordStatus::Updated => "updated",
            RecordStatus::Published => "published",
        }
    }
}

impl Display for RecordStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unrecognized record status name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown record status '{0}', expected one of: new, draft, updated, published")]
pub struct UnknownStatus(pub String);

impl FromStr for RecordStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(RecordStatus::New),
            "draft" => Ok(RecordStatus::Draft),
            "updated" => Ok(RecordStatus::Updated),
            "published" => Ok(RecordStatus::Published),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}
