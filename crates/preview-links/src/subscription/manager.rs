//! Subscription lifecycle for one activation.

use std::cell::{Cell, RefCell};
use std::mem;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::parser::PlaceholderSet;
use crate::subscription::{
    FieldListener, FieldSource, ListenerHandle, LocaleListener, LocaleSource, ProviderError,
    Snapshot,
};

type Observer = Rc<dyn Fn(&Snapshot)>;

/// State shared between an [`ActiveSubscriptions`] and its listeners.
///
/// Listeners hold it weakly, so the providers never keep it alive.
/// Releasing the handles on teardown drops the listeners and with them
/// their strong references to the sources.
struct Shared {
    snapshot: RefCell<Snapshot>,
    active: Cell<bool>,
    observers: RefCell<Vec<Observer>>,
}

impl Shared {
    /// Apply `update` to the snapshot and notify observers.
    ///
    /// Does nothing once the owning subscriptions have been torn down.
    fn apply(&self, update: impl FnOnce(&mut Snapshot)) {
        if !self.active.get() {
            trace!("change notification after teardown ignored");
            return;
        }

        // Observers get a copy so they may trigger further notifications.
        let current = {
            let mut snapshot = self.snapshot.borrow_mut();
            update(&mut snapshot);
            snapshot.clone()
        };
        let observers: Vec<Observer> = self.observers.borrow().clone();
        for observer in observers {
            observer(&current);
        }
    }
}

/// Live subscriptions for one activation.
///
/// Owns one locale listener and one listener per distinct placeholder.
/// [`ActiveSubscriptions::teardown`] releases all of them; dropping the value
/// does the same.
pub struct ActiveSubscriptions {
    shared: Rc<Shared>,
    handles: Vec<ListenerHandle>,
    field_subscriptions: usize,
}

/// Subscribe to the locale and to every field named in `names`.
///
/// The snapshot is filled with one read of every field under the locale
/// current at activation time before this returns. Afterwards each field
/// listener re-reads its field under the locale current when the
/// notification arrives; the locale listener only records the new locale.
///
/// # Errors
///
/// Returns the first registration error from either source. Listeners
/// registered before the failure are released.
pub fn activate<L, F>(
    names: &PlaceholderSet,
    locale_source: &Rc<L>,
    field_source: &Rc<F>,
) -> Result<ActiveSubscriptions, ProviderError>
where
    L: LocaleSource + ?Sized + 'static,
    F: FieldSource + ?Sized + 'static,
{
    let locale = locale_source.current_locale();
    let mut snapshot = Snapshot::new(locale.clone());
    for name in names.iter() {
        if let Some(value) = field_source.field_value(name, &locale) {
            snapshot.set(name, value);
        }
    }

    let mut subscriptions = ActiveSubscriptions {
        shared: Rc::new(Shared {
            snapshot: RefCell::new(snapshot),
            active: Cell::new(true),
            observers: RefCell::new(Vec::new()),
        }),
        handles: Vec::with_capacity(names.len() + 1),
        field_subscriptions: 0,
    };

    let listener = locale_listener(Rc::downgrade(&subscriptions.shared));
    subscriptions
        .handles
        .push(locale_source.add_locale_listener(listener)?);

    for name in names.iter() {
        let listener = field_listener(
            name,
            Rc::downgrade(&subscriptions.shared),
            Rc::clone(locale_source),
            Rc::clone(field_source),
        );
        subscriptions
            .handles
            .push(field_source.add_field_listener(name, listener)?);
        subscriptions.field_subscriptions += 1;
    }

    debug!(
        fields = subscriptions.field_subscriptions,
        locale = %locale,
        "activated field subscriptions"
    );
    Ok(subscriptions)
}

fn locale_listener(shared: Weak<Shared>) -> LocaleListener {
    Rc::new(move |locale: &str| {
        let Some(shared) = shared.upgrade() else {
            return;
        };
        trace!(locale, "locale changed");
        shared.apply(|snapshot| snapshot.set_locale(locale));
    })
}

/// The listener keeps both sources alive until its handle is released, so a
/// source adapter owned only by the subscriptions keeps delivering changes.
fn field_listener<L, F>(
    name: &str,
    shared: Weak<Shared>,
    locale_source: Rc<L>,
    field_source: Rc<F>,
) -> FieldListener
where
    L: LocaleSource + ?Sized + 'static,
    F: FieldSource + ?Sized + 'static,
{
    let name = name.to_string();
    Rc::new(move || {
        let Some(shared) = shared.upgrade() else {
            return;
        };
        if !shared.active.get() {
            trace!(field = %name, "field notification after teardown ignored");
            return;
        }

        let locale = locale_source.current_locale();
        let value = field_source.field_value(&name, &locale);
        trace!(field = %name, %locale, "field changed");
        shared.apply(|snapshot| match value {
            Some(value) => snapshot.set(name.as_str(), value),
            None => {
                snapshot.clear(&name);
            }
        });
    })
}

impl ActiveSubscriptions {
    /// A copy of the current snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.shared.snapshot.borrow().clone()
    }

    /// Read the current snapshot without copying it.
    pub fn with_snapshot<R>(&self, f: impl FnOnce(&Snapshot) -> R) -> R {
        f(&self.shared.snapshot.borrow())
    }

    /// Register an observer called with the snapshot after every change.
    ///
    /// Observers are dropped on teardown.
    pub fn on_change(&self, observer: impl Fn(&Snapshot) + 'static) {
        if self.is_active() {
            self.shared.observers.borrow_mut().push(Rc::new(observer));
        }
    }

    /// Number of field listeners created by this activation.
    pub fn field_subscriptions(&self) -> usize {
        self.field_subscriptions
    }

    /// Number of registrations not yet released.
    pub fn live_handles(&self) -> usize {
        self.handles.len()
    }

    pub fn is_active(&self) -> bool {
        self.shared.active.get()
    }

    /// Release every registration and stop reacting to notifications.
    ///
    /// Safe to call repeatedly; only the first call releases anything.
    pub fn teardown(&mut self) {
        if !self.shared.active.replace(false) {
            return;
        }

        let handles = mem::take(&mut self.handles);
        let released = handles.len();
        for handle in handles {
            handle.release();
        }
        self.shared.observers.borrow_mut().clear();
        debug!(released, "tore down field subscriptions");
    }
}

impl Drop for ActiveSubscriptions {
    fn drop(&mut self) {
        self.teardown();
    }
}
