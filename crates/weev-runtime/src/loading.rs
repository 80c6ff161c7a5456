//! Global loading overlay.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Overlay shown while at least one user action is pending.
#[derive(Debug, Clone, Default)]
pub struct LoadingOverlay {
    pending: Arc<AtomicUsize>,
}

impl LoadingOverlay {
    /// Shows the overlay until the returned guard is dropped.
    pub fn show(&self) -> LoadingGuard {
        self.pending.fetch_add(1, Ordering::SeqCst);
        LoadingGuard {
            pending: self.pending.clone(),
        }
    }

    /// Returns whether the overlay is visible.
    pub fn is_visible(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }
}

/// Keeps the overlay visible while alive.
#[must_use = "the overlay hides as soon as the guard is dropped"]
#[derive(Debug)]
pub struct LoadingGuard {
    pending: Arc<AtomicUsize>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.pending.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_tracks_nested_guards() {
        let overlay = LoadingOverlay::default();
        assert!(!overlay.is_visible());

        let first = overlay.show();
        let second = overlay.show();
        drop(first);
        assert!(overlay.is_visible());
        drop(second);
        assert!(!overlay.is_visible());
    }
}
