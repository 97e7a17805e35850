//! Transient notification queue.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use moviesearch_core::Notification;

/// Maximum number of toasts kept on screen.
const MAX_VISIBLE: usize = 3;

/// A notification with the time it was raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Notification to display.
    pub notification: Notification,
    /// When it was raised.
    pub raised_at: Instant,
}

/// Toasts currently on screen, oldest first.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct ToastQueue {
    lifetime: Duration,
    toasts: VecDeque<Toast>,
}

impl ToastQueue {
    /// Creates an empty queue; each toast lives for `lifetime`.
    #[must_use]
    pub const fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            toasts: VecDeque::new(),
        }
    }

    /// Shows `notification`, dropping the oldest toast when full.
    pub fn push(&mut self, notification: Notification, now: Instant) {
        tracing::debug!(message = notification.message(), "toast");
        if self.toasts.len() >= MAX_VISIBLE {
            self.toasts.pop_front();
        }
        self.toasts.push_back(Toast {
            notification,
            raised_at: now,
        });
    }

    /// Removes toasts older than the lifetime.
    pub fn expire(&mut self, now: Instant) {
        let lifetime = self.lifetime;
        self.toasts
            .retain(|toast| now.saturating_duration_since(toast.raised_at) < lifetime);
    }

    /// Toasts to draw, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    /// Number of toasts on screen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    /// Returns `true` if nothing is on screen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
