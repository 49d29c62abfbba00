use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// The value of a record field as seen by a path template.
///
/// Fields are either scalars or localized strings keyed by locale code.
/// Field sources are expected to narrow localized values with
/// [`FieldValue::localize`] before handing them out, but the resolver copes
/// with either.
///
/// # Example
///
/// ```
/// use preview_links::FieldValue;
/// use std::collections::BTreeMap;
///
/// let title = FieldValue::Localized(BTreeMap::from([
///     ("en".to_string(), "launch".to_string()),
///     ("it".to_string(), "lancio".to_string()),
/// ]));
///
/// assert_eq!(title.localize("it").path_text().as_deref(), Some("lancio"));
/// assert_eq!(FieldValue::from(42).path_text().as_deref(), Some("42"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    /// Per-locale text, keyed by locale code.
    Localized(BTreeMap<String, String>),
    /// The field exists but holds no value.
    Null,
}

impl FieldValue {
    /// Narrow a localized value to the entry for `locale`.
    ///
    /// Scalars are returned unchanged. A localized value without an entry
    /// for `locale` becomes [`FieldValue::Null`].
    pub fn localize(&self, locale: &str) -> FieldValue {
        match self {
            FieldValue::Localized(entries) => entries
                .get(locale)
                .map_or(FieldValue::Null, |text| FieldValue::Text(text.clone())),
            other => other.clone(),
        }
    }

    /// Text substituted for a placeholder bound to this value.
    ///
    /// Returns `None` for `Null` and for values that are still localized;
    /// such placeholders are left unreplaced.
    pub fn path_text(&self) -> Option<String> {
        match self {
            FieldValue::Boolean(b) => Some(b.to_string()),
            FieldValue::Integer(n) => Some(n.to_string()),
            FieldValue::Float(n) => Some(n.to_string()),
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Localized(_) | FieldValue::Null => None,
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            FieldValue::Localized(entries) => {
                let pairs: Vec<String> = entries.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
            FieldValue::Null => write!(f, "null"),
            other => write!(f, "{}", other.path_text().unwrap_or_default()),
        }
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Integer(i64::from(n))
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Integer(n)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Float(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<BTreeMap<String, String>> for FieldValue {
    fn from(entries: BTreeMap<String, String>) -> Self {
        FieldValue::Localized(entries)
    }
}
