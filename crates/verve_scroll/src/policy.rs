//! Scroll policy
//!
//! Whether the page may scroll is process-wide state, so it lives in one
//! explicit object instead of an ambient flag. Lock holders get a guard;
//! scroll stays locked while any guard is alive and is restored the moment
//! the last one drops - including the early-unmount case, where the owner
//! (and its guard) simply goes away.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared scroll-lock state
///
/// Cheap to clone; clones share the same lock count.
#[derive(Clone)]
pub struct ScrollPolicy {
    locks: Arc<AtomicUsize>,
}

impl ScrollPolicy {
    pub fn new() -> Self {
        Self {
            locks: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Acquire a scroll lock; scroll is disabled until the guard drops
    pub fn lock(&self) -> ScrollLockGuard {
        self.locks.fetch_add(1, Ordering::SeqCst);
        tracing::debug!("scroll locked");
        ScrollLockGuard {
            locks: Arc::clone(&self.locks),
        }
    }

    /// Whether any lock guard is currently alive
    pub fn is_locked(&self) -> bool {
        self.locks.load(Ordering::SeqCst) > 0
    }
}

impl Default for ScrollPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard for a scroll lock
pub struct ScrollLockGuard {
    locks: Arc<AtomicUsize>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.locks.fetch_sub(1, Ordering::SeqCst);
        tracing::debug!("scroll lock released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_restores_on_drop() {
        let policy = ScrollPolicy::new();
        assert!(!policy.is_locked());

        {
            let _guard = policy.lock();
            assert!(policy.is_locked());
        }
        assert!(!policy.is_locked());
    }

    #[test]
    fn test_nested_locks() {
        let policy = ScrollPolicy::new();
        let outer = policy.lock();
        let inner = policy.lock();

        drop(inner);
        assert!(policy.is_locked());
        drop(outer);
        assert!(!policy.is_locked());
    }

    #[test]
    fn test_clones_share_state() {
        let policy = ScrollPolicy::new();
        let clone = policy.clone();
        let _guard = policy.lock();
        assert!(clone.is_locked());
    }
}
