//! In-memory record implementing both change sources.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::subscription::{
    FieldListener, FieldSource, ListenerHandle, LocaleListener, LocaleSource, ProviderError,
};
use crate::types::FieldValue;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    fields: BTreeMap<u64, (String, FieldListener)>,
    locales: BTreeMap<u64, LocaleListener>,
    releases: usize,
}

impl Listeners {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// A record held in memory, with change notification.
///
/// Stands in for the hosting platform when driving a session from the
/// command line or from tests. Mutations notify listeners synchronously.
/// Live registrations and releases are counted so callers can check that
/// nothing leaks.
///
/// # Example
///
/// ```
/// use preview_links::{FieldSource, MemoryRecord};
///
/// let record = MemoryRecord::new("en").with_field("slug", "hello");
/// assert_eq!(
///     record.field_value("slug", "en").and_then(|v| v.path_text()).as_deref(),
///     Some("hello")
/// );
/// ```
pub struct MemoryRecord {
    locale: RefCell<String>,
    values: RefCell<BTreeMap<String, FieldValue>>,
    listeners: Rc<RefCell<Listeners>>,
    /// Registrations still accepted, or `None` for no limit.
    registration_budget: Cell<Option<usize>>,
}

impl MemoryRecord {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: RefCell::new(locale.into()),
            values: RefCell::new(BTreeMap::new()),
            listeners: Rc::new(RefCell::new(Listeners::default())),
            registration_budget: Cell::new(None),
        }
    }

    /// Set an initial field value without notifying anyone.
    pub fn with_field(self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.values.borrow_mut().insert(name.into(), value.into());
        self
    }

    /// Change a field and notify its listeners.
    pub fn set_field(&self, name: &str, value: impl Into<FieldValue>) {
        self.values
            .borrow_mut()
            .insert(name.to_string(), value.into());
        self.notify_field(name);
    }

    /// Remove a field's value and notify its listeners.
    pub fn remove_field(&self, name: &str) {
        self.values.borrow_mut().remove(name);
        self.notify_field(name);
    }

    /// Change the active locale and notify locale listeners.
    pub fn set_locale(&self, locale: &str) {
        *self.locale.borrow_mut() = locale.to_string();
        let callbacks: Vec<LocaleListener> =
            self.listeners.borrow().locales.values().cloned().collect();
        for callback in callbacks {
            callback(locale);
        }
    }

    /// Refuse registrations once `limit` more have been accepted.
    /// `None` removes the limit.
    pub fn limit_registrations(&self, limit: Option<usize>) {
        self.registration_budget.set(limit);
    }

    /// Number of live field listeners, across all fields.
    pub fn field_listener_count(&self) -> usize {
        self.listeners.borrow().fields.len()
    }

    /// Number of live listeners on `field`.
    pub fn listeners_on(&self, field: &str) -> usize {
        self.listeners
            .borrow()
            .fields
            .values()
            .filter(|(name, _)| name == field)
            .count()
    }

    /// Number of live locale listeners.
    pub fn locale_listener_count(&self) -> usize {
        self.listeners.borrow().locales.len()
    }

    /// Number of registrations released so far.
    pub fn release_count(&self) -> usize {
        self.listeners.borrow().releases
    }

    fn notify_field(&self, name: &str) {
        let callbacks: Vec<FieldListener> = self
            .listeners
            .borrow()
            .fields
            .values()
            .filter(|(field, _)| field == name)
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in callbacks {
            callback();
        }
    }

    fn take_registration(&self) -> Result<(), ProviderError> {
        match self.registration_budget.get() {
            Some(0) => Err(ProviderError::Unavailable {
                reason: "registration limit reached".to_string(),
            }),
            Some(n) => {
                self.registration_budget.set(Some(n - 1));
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl LocaleSource for MemoryRecord {
    fn current_locale(&self) -> String {
        self.locale.borrow().clone()
    }

    fn add_locale_listener(
        &self,
        listener: LocaleListener,
    ) -> Result<ListenerHandle, ProviderError> {
        self.take_registration()?;
        let id = {
            let mut listeners = self.listeners.borrow_mut();
            let id = listeners.next_id();
            listeners.locales.insert(id, listener);
            id
        };

        let listeners = Rc::downgrade(&self.listeners);
        Ok(ListenerHandle::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                let mut listeners = listeners.borrow_mut();
                if listeners.locales.remove(&id).is_some() {
                    listeners.releases += 1;
                }
            }
        }))
    }
}

impl FieldSource for MemoryRecord {
    fn field_value(&self, field: &str, locale: &str) -> Option<FieldValue> {
        self.values
            .borrow()
            .get(field)
            .map(|value| value.localize(locale))
    }

    fn add_field_listener(
        &self,
        field: &str,
        listener: FieldListener,
    ) -> Result<ListenerHandle, ProviderError> {
        self.take_registration()?;
        let id = {
            let mut listeners = self.listeners.borrow_mut();
            let id = listeners.next_id();
            listeners.fields.insert(id, (field.to_string(), listener));
            id
        };

        let listeners = Rc::downgrade(&self.listeners);
        Ok(ListenerHandle::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                let mut listeners = listeners.borrow_mut();
                if listeners.fields.remove(&id).is_some() {
                    listeners.releases += 1;
                }
            }
        }))
    }
}
