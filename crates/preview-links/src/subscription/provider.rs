//! Contract between the subscription engine and the hosting platform.

use std::rc::Rc;

use crate::subscription::{ListenerHandle, ProviderError};
use crate::types::FieldValue;

/// Callback invoked when a field changes. It carries no value: listeners
/// read the field back through [`FieldSource::field_value`].
pub type FieldListener = Rc<dyn Fn()>;

/// Callback invoked with the new locale code when the active locale changes.
pub type LocaleListener = Rc<dyn Fn(&str)>;

/// Source of the active editing locale.
pub trait LocaleSource {
    /// The locale active right now.
    fn current_locale(&self) -> String;

    /// Register a listener for locale changes.
    fn add_locale_listener(
        &self,
        listener: LocaleListener,
    ) -> Result<ListenerHandle, ProviderError>;
}

/// Source of record field values.
pub trait FieldSource {
    /// Read the current value of `field` under `locale`.
    ///
    /// Returns `None` when the field has no value yet.
    fn field_value(&self, field: &str, locale: &str) -> Option<FieldValue>;

    /// Register a listener for changes to `field`.
    fn add_field_listener(
        &self,
        field: &str,
        listener: FieldListener,
    ) -> Result<ListenerHandle, ProviderError>;
}
