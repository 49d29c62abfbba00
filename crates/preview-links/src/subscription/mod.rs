//! Field subscriptions and path resolution.
//!
//! [`activate`] subscribes to every placeholder field of a template plus the
//! record's locale, keeps a [`Snapshot`] of their current values, and
//! notifies observers after every change. [`resolve`] turns a template and a
//! snapshot into a concrete path.

mod error;
mod handle;
mod manager;
mod memory;
mod provider;
mod resolver;
mod snapshot;

pub use error::ProviderError;
pub use handle::ListenerHandle;
pub use manager::{ActiveSubscriptions, activate};
pub use memory::MemoryRecord;
pub use provider::{FieldListener, FieldSource, LocaleListener, LocaleSource};
pub use resolver::{resolve, resolve_str};
pub use snapshot::Snapshot;
