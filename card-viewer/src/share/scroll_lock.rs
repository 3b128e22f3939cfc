// Background scroll suppression while the share dialog is open
//
// The profile page owns the scroll offset; the dialog holds a `ScrollLockGuard` for as long as it
// is open. Release happens in `Drop`, so every exit path (close, success, teardown) unlocks.

use std::sync::atomic::{AtomicU16, AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct ScrollHost {
    locks: Arc<AtomicUsize>,
    offset: Arc<AtomicU16>,
}

impl ScrollHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> ScrollLockGuard {
        self.locks.fetch_add(1, Ordering::SeqCst);
        ScrollLockGuard {
            locks: Arc::clone(&self.locks),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locks.load(Ordering::SeqCst) > 0
    }

    pub fn offset(&self) -> u16 {
        self.offset.load(Ordering::SeqCst)
    }

    /// Scroll the page by `delta` lines. Refused (returns false) while locked.
    pub fn scroll_by(&self, delta: i32) -> bool {
        if self.is_locked() {
            return false;
        }
        let current = i32::from(self.offset());
        let next = (current + delta).clamp(0, i32::from(u16::MAX));
        self.offset.store(next as u16, Ordering::SeqCst);
        true
    }

    pub fn reset(&self) {
        self.offset.store(0, Ordering::SeqCst);
    }
}

#[derive(Debug)]
pub struct ScrollLockGuard {
    locks: Arc<AtomicUsize>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.locks.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrolling_is_refused_while_locked() {
        let host = ScrollHost::new();
        assert!(host.scroll_by(3));
        assert_eq!(host.offset(), 3);

        let guard = host.lock();
        assert!(host.is_locked());
        assert!(!host.scroll_by(5));
        assert_eq!(host.offset(), 3);

        drop(guard);
        assert!(!host.is_locked());
        assert!(host.scroll_by(-10));
        assert_eq!(host.offset(), 0);
    }

    #[test]
    fn lock_is_released_when_owner_unwinds() {
        let host = ScrollHost::new();
        let h = host.clone();
        let result = std::panic::catch_unwind(move || {
            let _guard = h.lock();
            panic!("dialog blew up");
        });
        assert!(result.is_err());
        assert!(!host.is_locked());
    }
}
