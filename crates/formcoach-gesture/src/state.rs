//! Shared navigation state.
//!
//! One [`SystemState`] instance is shared between the frame-processing
//! loop, the command router, and whatever front end renders the pages.
//! Clones are cheap handles onto the same inner state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use formcoach_core::{Mode, PageId};

/// Shared, thread-safe navigation state.
///
/// Reads take a short read lock; writes take a write lock only for the
/// duration of the field swap. The stop flag is a relaxed atomic because
/// it is a latch, not a synchronization point.
#[derive(Debug, Clone, Default)]
pub struct SystemState {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    current_page: RwLock<PageId>,
    mode: RwLock<Mode>,
    stop_requested: AtomicBool,
}

impl SystemState {
    /// Create a new state handle on the Home page in Control mode
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The page currently shown.
    #[must_use]
    pub fn current_page(&self) -> PageId {
        *self.inner.current_page.read()
    }

    /// Navigates to the given page.
    pub fn set_page(&self, page: PageId) {
        let mut current = self.inner.current_page.write();
        if *current != page {
            debug!(from = %*current, to = %page, "page change");
            *current = page;
        }
    }

    /// The current interaction mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        *self.inner.mode.read()
    }

    /// Sets the interaction mode.
    pub fn set_mode(&self, mode: Mode) {
        let mut current = self.inner.mode.write();
        if *current != mode {
            info!(from = ?*current, to = ?mode, "mode change");
            *current = mode;
        }
    }

    /// Flips between Control and Exercise mode, returning the new mode.
    pub fn toggle_mode(&self) -> Mode {
        let mut current = self.inner.mode.write();
        *current = current.toggled();
        info!(mode = ?*current, "mode toggled");
        *current
    }

    /// Returns `true` once shutdown has been requested.
    #[must_use]
    pub fn stop_requested(&self) -> bool {
        self.inner.stop_requested.load(Ordering::Relaxed)
    }

    /// Requests shutdown. Irreversible for the lifetime of the state.
    pub fn request_stop(&self) {
        self.inner.stop_requested.store(true, Ordering::Relaxed);
        info!("stop requested");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = SystemState::new();
        assert_eq!(state.current_page(), PageId::Home);
        assert_eq!(state.mode(), Mode::Control);
        assert!(!state.stop_requested());
    }

    #[test]
    fn test_clones_share_state() {
        let state = SystemState::new();
        let handle = state.clone();
        handle.set_page(PageId::Calendar);
        assert_eq!(state.current_page(), PageId::Calendar);
    }

    #[test]
    fn test_toggle_mode() {
        let state = SystemState::new();
        assert_eq!(state.toggle_mode(), Mode::Exercise);
        assert_eq!(state.toggle_mode(), Mode::Control);
    }

    #[test]
    fn test_stop_latch() {
        let state = SystemState::new();
        state.request_stop();
        assert!(state.stop_requested());
    }
}
