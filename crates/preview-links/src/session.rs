//! Preview link sessions.
//!
//! A session ties a path template, the record's change sources, and a
//! [`UrlComposer`] together: it subscribes on activation, recomputes the
//! links whenever a placeholder field or the locale changes, and releases
//! everything on teardown.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::rc::Rc;

use thiserror::Error;
use tracing::debug;

use crate::compose::{PreviewUrls, UrlComposer};
use crate::config::PreviewConfig;
use crate::parser::{PathTemplate, PlaceholderSet, parse_path_template};
use crate::subscription::{
    ActiveSubscriptions, FieldSource, LocaleSource, ProviderError, Snapshot, activate, resolve,
};
use crate::types::RecordStatus;

/// Message shown instead of links for a record that was never saved.
pub const UNSAVED_MESSAGE: &str = "Must save entity at least once before previewing";

/// An error that prevents a session from starting.
#[derive(Debug, Error)]
pub enum ActivationError {
    /// A change source refused a listener.
    #[error("failed to subscribe to record changes: {0}")]
    Subscribe(#[from] ProviderError),
}

/// Outcome of activating preview links for a record.
pub enum PreviewState {
    /// The record was never saved. No subscriptions exist.
    Unsaved(UnsavedNotice),
    /// Links are live and follow the record.
    Active(PreviewSession),
}

impl PreviewState {
    /// The session, if the record could be previewed.
    pub fn into_session(self) -> Option<PreviewSession> {
        match self {
            PreviewState::Active(session) => Some(session),
            PreviewState::Unsaved(_) => None,
        }
    }
}

/// Blocking notice for unsaved records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsavedNotice;

impl UnsavedNotice {
    pub fn message(self) -> &'static str {
        UNSAVED_MESSAGE
    }
}

impl Display for UnsavedNotice {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(UNSAVED_MESSAGE)
    }
}

/// Live preview links for one record.
pub struct PreviewSession {
    template: Rc<PathTemplate>,
    placeholders: PlaceholderSet,
    composer: Rc<UrlComposer>,
    subscriptions: ActiveSubscriptions,
}

impl PreviewSession {
    /// Start following a record.
    ///
    /// The path template is read from `config` once. New records short-circuit
    /// to [`PreviewState::Unsaved`] without touching either source.
    ///
    /// # Errors
    ///
    /// Returns [`ActivationError::Subscribe`] if a source refuses a listener.
    pub fn activate<L, F>(
        config: &PreviewConfig,
        status: RecordStatus,
        locale_source: &Rc<L>,
        field_source: &Rc<F>,
    ) -> Result<PreviewState, ActivationError>
    where
        L: LocaleSource + ?Sized + 'static,
        F: FieldSource + ?Sized + 'static,
    {
        if status.is_new() {
            debug!("record is unsaved, preview links disabled");
            return Ok(PreviewState::Unsaved(UnsavedNotice));
        }

        let template = parse_path_template(&config.entity_path);
        let placeholders = PlaceholderSet::from_template(&template);
        let subscriptions = activate(&placeholders, locale_source, field_source)?;

        Ok(PreviewState::Active(PreviewSession {
            template: Rc::new(template),
            placeholders,
            composer: Rc::new(UrlComposer::new(config)),
            subscriptions,
        }))
    }

    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    /// Distinct placeholder names this session subscribes to.
    pub fn placeholders(&self) -> &PlaceholderSet {
        &self.placeholders
    }

    /// A copy of the current field values and locale.
    pub fn snapshot(&self) -> Snapshot {
        self.subscriptions.snapshot()
    }

    pub fn locale(&self) -> String {
        self.subscriptions
            .with_snapshot(|snapshot| snapshot.locale().to_string())
    }

    /// The template resolved against the current snapshot.
    pub fn resolved_path(&self) -> String {
        self.subscriptions
            .with_snapshot(|snapshot| resolve(&self.template, snapshot))
    }

    /// The links for the current snapshot.
    pub fn urls(&self) -> PreviewUrls {
        self.subscriptions.with_snapshot(|snapshot| {
            self.composer
                .compose(&resolve(&self.template, snapshot), snapshot.locale())
        })
    }

    /// Call `callback` with freshly composed links after every change.
    pub fn on_update(&self, callback: impl Fn(&PreviewUrls) + 'static) {
        let template = Rc::clone(&self.template);
        let composer = Rc::clone(&self.composer);
        self.subscriptions.on_change(move |snapshot| {
            let urls = composer.compose(&resolve(&template, snapshot), snapshot.locale());
            callback(&urls);
        });
    }

    /// Number of registrations held: one per placeholder plus the locale.
    pub fn live_subscriptions(&self) -> usize {
        self.subscriptions.live_handles()
    }

    pub fn is_active(&self) -> bool {
        self.subscriptions.is_active()
    }

    /// Release all subscriptions. Further changes are ignored.
    pub fn teardown(&mut self) {
        self.subscriptions.teardown();
    }
}
