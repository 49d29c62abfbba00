//! Tests for field subscriptions, snapshot updates, and teardown.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use preview_links::subscription::activate;
use preview_links::{
    FieldListener, FieldSource, FieldValue, ListenerHandle, LocaleListener, LocaleSource,
    MemoryRecord, PlaceholderSet, ProviderError, parse_path_template,
};

fn placeholders(template: &str) -> PlaceholderSet {
    PlaceholderSet::from_template(&parse_path_template(template))
}

fn localized(pairs: &[(&str, &str)]) -> FieldValue {
    FieldValue::Localized(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
    )
}

/// Source that forwards to a shared record, as a platform adapter would.
struct Forwarding(Rc<MemoryRecord>);

impl LocaleSource for Forwarding {
    fn current_locale(&self) -> String {
        self.0.current_locale()
    }

    fn add_locale_listener(
        &self,
        listener: LocaleListener,
    ) -> Result<ListenerHandle, ProviderError> {
        self.0.add_locale_listener(listener)
    }
}

impl FieldSource for Forwarding {
    fn field_value(&self, field: &str, locale: &str) -> Option<FieldValue> {
        self.0.field_value(field, locale)
    }

    fn add_field_listener(
        &self,
        field: &str,
        listener: FieldListener,
    ) -> Result<ListenerHandle, ProviderError> {
        self.0.add_field_listener(field, listener)
    }
}

fn text(value: Option<&FieldValue>) -> Option<String> {
    value.and_then(FieldValue::path_text)
}

// =============================================================================
// Activation
// =============================================================================

#[test]
fn activation_reads_initial_values() {
    let record = Rc::new(
        MemoryRecord::new("en")
            .with_field("category", "news")
            .with_field("slug", "launch"),
    );
    let subs = activate(&placeholders("/$category/$slug"), &record, &record).unwrap();

    let snapshot = subs.snapshot();
    assert_eq!(snapshot.locale(), "en");
    assert_eq!(text(snapshot.get("category")).as_deref(), Some("news"));
    assert_eq!(text(snapshot.get("slug")).as_deref(), Some("launch"));
}

#[test]
fn activation_reads_under_current_locale() {
    let record = Rc::new(
        MemoryRecord::new("it").with_field("slug", localized(&[("en", "hello"), ("it", "ciao")])),
    );
    let subs = activate(&placeholders("/$slug"), &record, &record).unwrap();
    assert_eq!(text(subs.snapshot().get("slug")).as_deref(), Some("ciao"));
}

#[test]
fn unknown_fields_start_unresolved() {
    let record = Rc::new(MemoryRecord::new("en").with_field("slug", "x"));
    let subs = activate(&placeholders("/$slug/$missing"), &record, &record).unwrap();
    let snapshot = subs.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert!(snapshot.get("missing").is_none());
}

#[test]
fn subscribes_once_per_distinct_placeholder_plus_locale() {
    let record = Rc::new(MemoryRecord::new("en"));
    let subs = activate(&placeholders("$a/$b-$a/$c"), &record, &record).unwrap();

    assert_eq!(subs.field_subscriptions(), 3);
    assert_eq!(subs.live_handles(), 4);
    assert_eq!(record.field_listener_count(), 3);
    assert_eq!(record.listeners_on("a"), 1);
    assert_eq!(record.locale_listener_count(), 1);
}

#[test]
fn empty_placeholder_set_still_listens_for_locale() {
    let record = Rc::new(MemoryRecord::new("en"));
    let mut subs = activate(&placeholders("/about"), &record, &record).unwrap();

    assert_eq!(record.field_listener_count(), 0);
    assert_eq!(record.locale_listener_count(), 1);

    subs.teardown();
    assert_eq!(record.locale_listener_count(), 0);
    assert_eq!(record.release_count(), 1);
}

// =============================================================================
// Teardown
// =============================================================================

#[test]
fn teardown_releases_everything() {
    let record = Rc::new(MemoryRecord::new("en"));
    let mut subs = activate(&placeholders("/$category/$slug"), &record, &record).unwrap();

    subs.teardown();
    assert!(!subs.is_active());
    assert_eq!(subs.live_handles(), 0);
    assert_eq!(record.field_listener_count(), 0);
    assert_eq!(record.locale_listener_count(), 0);
    assert_eq!(record.release_count(), 3);
}

#[test]
fn teardown_twice_releases_once() {
    let record = Rc::new(MemoryRecord::new("en"));
    let mut subs = activate(&placeholders("/$category/$slug"), &record, &record).unwrap();

    subs.teardown();
    subs.teardown();
    assert_eq!(record.release_count(), 3);
}

#[test]
fn teardown_before_any_notification() {
    let record = Rc::new(MemoryRecord::new("en"));
    let mut subs = activate(&placeholders("/$slug"), &record, &record).unwrap();
    subs.teardown();
    record.set_field("slug", "late");
    record.set_locale("de");
    assert!(subs.snapshot().get("slug").is_none());
    assert_eq!(subs.snapshot().locale(), "en");
}

#[test]
fn drop_releases_everything() {
    let record = Rc::new(MemoryRecord::new("en"));
    {
        let _subs = activate(&placeholders("/$slug"), &record, &record).unwrap();
        assert_eq!(record.field_listener_count(), 1);
    }
    assert_eq!(record.field_listener_count(), 0);
    assert_eq!(record.locale_listener_count(), 0);
    assert_eq!(record.release_count(), 2);
}

#[test]
fn observers_are_not_called_after_teardown() {
    let record = Rc::new(MemoryRecord::new("en"));
    let mut subs = activate(&placeholders("/$slug"), &record, &record).unwrap();
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    subs.on_change(move |_| *counter.borrow_mut() += 1);

    record.set_field("slug", "one");
    subs.teardown();
    record.set_field("slug", "two");

    assert_eq!(*calls.borrow(), 1);
}

// =============================================================================
// Registration failures
// =============================================================================

#[test]
fn registration_failure_propagates() {
    let record = Rc::new(MemoryRecord::new("en"));
    record.limit_registrations(Some(0));

    let err = activate(&placeholders("/$slug"), &record, &record).err().unwrap();
    assert!(matches!(err, ProviderError::Unavailable { .. }));
    assert_eq!(record.locale_listener_count(), 0);
}

#[test]
fn partial_registration_is_rolled_back() {
    let record = Rc::new(MemoryRecord::new("en"));
    // Locale listener and one field listener succeed, the second field fails.
    record.limit_registrations(Some(2));

    let result = activate(&placeholders("/$category/$slug"), &record, &record);
    assert!(result.is_err());
    assert_eq!(record.field_listener_count(), 0);
    assert_eq!(record.locale_listener_count(), 0);
    assert_eq!(record.release_count(), 2);
}

// =============================================================================
// Change propagation
// =============================================================================

#[test]
fn locale_change_updates_only_locale() {
    let record = Rc::new(
        MemoryRecord::new("en")
            .with_field("slug", localized(&[("en", "hello"), ("it", "ciao")])),
    );
    let subs = activate(&placeholders("/$slug"), &record, &record).unwrap();

    record.set_locale("it");

    let snapshot = subs.snapshot();
    assert_eq!(snapshot.locale(), "it");
    assert_eq!(text(snapshot.get("slug")).as_deref(), Some("hello"));
}

#[test]
fn field_change_updates_only_that_field() {
    let record = Rc::new(
        MemoryRecord::new("en")
            .with_field("category", "news")
            .with_field("slug", "launch"),
    );
    let subs = activate(&placeholders("/$category/$slug"), &record, &record).unwrap();

    record.set_field("slug", "launch-2");

    let snapshot = subs.snapshot();
    assert_eq!(text(snapshot.get("slug")).as_deref(), Some("launch-2"));
    assert_eq!(text(snapshot.get("category")).as_deref(), Some("news"));
}

#[test]
fn field_change_reads_under_locale_at_notification_time() {
    let record = Rc::new(
        MemoryRecord::new("en")
            .with_field("slug", localized(&[("en", "hello"), ("it", "ciao")])),
    );
    let subs = activate(&placeholders("/$slug"), &record, &record).unwrap();

    record.set_locale("it");
    record.set_field("slug", localized(&[("en", "hello-2"), ("it", "ciao-2")]));

    assert_eq!(text(subs.snapshot().get("slug")).as_deref(), Some("ciao-2"));
}

#[test]
fn changes_to_unsubscribed_fields_are_ignored() {
    let record = Rc::new(MemoryRecord::new("en").with_field("slug", "a"));
    let subs = activate(&placeholders("/$slug"), &record, &record).unwrap();
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    subs.on_change(move |_| *counter.borrow_mut() += 1);

    record.set_field("title", "Something");

    assert_eq!(*calls.borrow(), 0);
    assert!(subs.snapshot().get("title").is_none());
}

#[test]
fn removed_field_returns_to_unresolved() {
    let record = Rc::new(MemoryRecord::new("en").with_field("slug", "a"));
    let subs = activate(&placeholders("/$slug"), &record, &record).unwrap();

    record.remove_field("slug");
    assert!(subs.snapshot().get("slug").is_none());
}

#[test]
fn observers_see_each_mutation() {
    let record = Rc::new(MemoryRecord::new("en").with_field("slug", "a"));
    let subs = activate(&placeholders("/$slug"), &record, &record).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    subs.on_change(move |snapshot| {
        log.borrow_mut().push((
            snapshot.locale().to_string(),
            snapshot.get("slug").and_then(FieldValue::path_text),
        ));
    });

    record.set_field("slug", "b");
    record.set_locale("fr");

    assert_eq!(
        *seen.borrow(),
        vec![
            ("en".to_string(), Some("b".to_string())),
            ("fr".to_string(), Some("b".to_string())),
        ]
    );
}

#[test]
fn trait_objects_are_accepted() {
    let record = Rc::new(MemoryRecord::new("en").with_field("slug", "a"));
    let locales: Rc<dyn preview_links::LocaleSource> = record.clone();
    let fields: Rc<dyn preview_links::FieldSource> = record.clone();

    let subs = activate(&placeholders("/$slug"), &locales, &fields).unwrap();
    record.set_field("slug", "b");
    assert_eq!(text(subs.snapshot().get("slug")).as_deref(), Some("b"));
}

// =============================================================================
// Source ownership
// =============================================================================

#[test]
fn field_changes_arrive_when_only_subscriptions_hold_the_source() {
    let record = Rc::new(MemoryRecord::new("en").with_field("slug", "a"));
    let mut subs = {
        let source = Rc::new(Forwarding(Rc::clone(&record)));
        activate(&placeholders("/$slug"), &source, &source).unwrap()
    };

    record.set_locale("it");
    record.set_field("slug", "b");

    let snapshot = subs.snapshot();
    assert_eq!(snapshot.locale(), "it");
    assert_eq!(text(snapshot.get("slug")).as_deref(), Some("b"));

    subs.teardown();
    assert_eq!(record.field_listener_count(), 0);
    assert_eq!(record.locale_listener_count(), 0);
}

#[test]
fn teardown_drops_listener_references_to_sources() {
    let record = Rc::new(MemoryRecord::new("en"));
    let source = Rc::new(Forwarding(Rc::clone(&record)));
    let mut subs = activate(&placeholders("/$a/$b"), &source, &source).unwrap();
    assert!(Rc::strong_count(&source) > 1);

    subs.teardown();
    assert_eq!(Rc::strong_count(&source), 1);
}

// =============================================================================
// Nested notifications
// =============================================================================

#[test]
fn observer_can_change_another_field() {
    let record = Rc::new(
        MemoryRecord::new("en")
            .with_field("category", "news")
            .with_field("slug", "a"),
    );
    let subs = activate(&placeholders("/$category/$slug"), &record, &record).unwrap();
    let source = Rc::clone(&record);
    subs.on_change(move |snapshot| {
        let slug = snapshot.get("slug").and_then(FieldValue::path_text);
        let category = snapshot.get("category").and_then(FieldValue::path_text);
        if slug.as_deref() == Some("b") && category.as_deref() != Some("events") {
            source.set_field("category", "events");
        }
    });

    record.set_field("slug", "b");

    let snapshot = subs.snapshot();
    assert_eq!(text(snapshot.get("slug")).as_deref(), Some("b"));
    assert_eq!(text(snapshot.get("category")).as_deref(), Some("events"));
}

#[test]
fn observer_can_change_locale() {
    let record = Rc::new(MemoryRecord::new("en").with_field("slug", "a"));
    let subs = activate(&placeholders("/$slug"), &record, &record).unwrap();
    let source = Rc::clone(&record);
    subs.on_change(move |snapshot| {
        if snapshot.locale() == "en" {
            source.set_locale("it");
        }
    });

    record.set_field("slug", "b");

    let snapshot = subs.snapshot();
    assert_eq!(snapshot.locale(), "it");
    assert_eq!(text(snapshot.get("slug")).as_deref(), Some("b"));
}
