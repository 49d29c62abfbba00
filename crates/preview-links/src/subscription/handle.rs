use std::fmt::{Debug, Formatter, Result as FmtResult};

/// Registration handle returned by a change source.
///
/// Releasing the handle unregisters its listener. A handle releases at most
/// once: [`ListenerHandle::release`] consumes it, and a handle dropped
/// without being released releases itself.
#[must_use = "dropping a ListenerHandle immediately unregisters its listener"]
pub struct ListenerHandle {
    release: Option<Box<dyn FnOnce()>>,
}

impl ListenerHandle {
    /// Create a handle that runs `release` when released.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Unregister the listener.
    pub fn release(mut self) {
        self.run_release();
    }

    fn run_release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.run_release();
    }
}

impl Debug for ListenerHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ListenerHandle")
            .field("pending", &self.release.is_some())
            .finish()
    }
}
