// One-way user notifications ("toasts")

use log::{info, warn};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

/// Fire-and-forget notification channel. No acknowledgment is expected.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Toasts shown by the terminal front end; each expires after `ttl`.
#[derive(Debug)]
pub struct ToastQueue {
    ttl: Duration,
    items: Mutex<VecDeque<(Instant, Toast)>>,
}

impl ToastQueue {
    const MAX_VISIBLE: usize = 3;

    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            items: Mutex::new(VecDeque::new()),
        }
    }

    fn push(&self, kind: ToastKind, message: &str) {
        let Ok(mut items) = self.items.lock() else {
            return;
        };
        items.push_back((
            Instant::now(),
            Toast {
                kind,
                message: message.to_string(),
            },
        ));
        while items.len() > Self::MAX_VISIBLE {
            items.pop_front();
        }
    }

    /// Drop expired toasts and return the ones still visible, oldest first.
    pub fn visible(&self) -> Vec<Toast> {
        self.visible_at(Instant::now())
    }

    fn visible_at(&self, now: Instant) -> Vec<Toast> {
        let Ok(mut items) = self.items.lock() else {
            return Vec::new();
        };
        items.retain(|(at, _)| now.saturating_duration_since(*at) < self.ttl);
        items.iter().map(|(_, t)| t.clone()).collect()
    }
}

impl Notifier for ToastQueue {
    fn success(&self, message: &str) {
        info!("[PHASE: notify] [STEP: toast] success: {}", message);
        self.push(ToastKind::Success, message);
    }

    fn error(&self, message: &str) {
        warn!("[PHASE: notify] [STEP: toast] error: {}", message);
        self.push(ToastKind::Error, message);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Records every toast for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        pub toasts: Mutex<Vec<Toast>>,
    }

    impl RecordingNotifier {
        pub fn all(&self) -> Vec<Toast> {
            self.toasts.lock().unwrap().clone()
        }

        pub fn last(&self) -> Option<Toast> {
            self.toasts.lock().unwrap().last().cloned()
        }
    }

    impl Notifier for RecordingNotifier {
        fn success(&self, message: &str) {
            self.toasts.lock().unwrap().push(Toast {
                kind: ToastKind::Success,
                message: message.to_string(),
            });
        }

        fn error(&self, message: &str) {
            self.toasts.lock().unwrap().push(Toast {
                kind: ToastKind::Error,
                message: message.to_string(),
            });
        }
    }
}
