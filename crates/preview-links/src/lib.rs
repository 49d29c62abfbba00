pub mod compose;
pub mod config;
pub mod lint;
pub mod parser;
pub mod session;
pub mod subscription;
pub mod types;

pub use compose::{LocaleSegment, PreviewUrls, UrlComposer};
pub use config::{ConfigError, PreviewConfig};
pub use lint::{PlaceholderWarning, compute_suggestions, lint_placeholders};
pub use parser::{PathTemplate, PlaceholderSet, Segment, extract_placeholders, parse_path_template};
pub use session::{ActivationError, PreviewSession, PreviewState, UNSAVED_MESSAGE, UnsavedNotice};
pub use subscription::{
    ActiveSubscriptions, FieldListener, FieldSource, ListenerHandle, LocaleListener, LocaleSource,
    MemoryRecord, ProviderError, Snapshot, resolve, resolve_str,
};
pub use types::{FieldValue, RecordStatus, UnknownStatus};

/// Creates a [`Snapshot`] from a locale and name/value pairs.
///
/// Values are converted via `Into<FieldValue>`.
///
/// # Example
///
/// ```
/// use preview_links::{resolve_str, snapshot};
///
/// let s = snapshot! { "en"; "slug" => "hello", "page" => 2 };
/// assert_eq!(s.locale(), "en");
/// assert_eq!(resolve_str("/posts/$slug/$page", &s), "/posts/hello/2");
/// ```
#[macro_export]
macro_rules! snapshot {
    { $locale:expr } => {
        $crate::Snapshot::new($locale)
    };
    { $locale:expr; $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut snapshot = $crate::Snapshot::new($locale);
            $(
                snapshot.set($key, ::std::convert::Into::<$crate::FieldValue>::into($value));
            )+
            snapshot
        }
    };
}
