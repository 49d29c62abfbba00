use std::collections::BTreeMap;

use crate::types::FieldValue;

/// Local copy of the placeholder field values and the active locale.
///
/// A name with no entry has not been resolved yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    fields: BTreeMap<String, FieldValue>,
    locale: String,
}

impl Snapshot {
    /// Create an empty snapshot for `locale`.
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            fields: BTreeMap::new(),
            locale: locale.into(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Store `value` for `name`, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    /// Forget the value for `name`, returning it to the unresolved state.
    pub fn clear(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    /// Number of resolved fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
