//! Fire-and-forget user notifications ("toasts").
//!
//! The surface only ever calls [`Notifier::notify`]; what happens next is up
//! to the host. The window host renders a [`ToastQueue`], headless callers
//! can use [`TracingNotifier`].

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Success,
    Error,
    Info,
    Warning,
}

impl NotifyKind {
    /// Accent colour for the toast border, 0x00RRGGBB.
    pub fn accent(self) -> u32 {
        match self {
            NotifyKind::Success => 0x00_4C_AF_50,
            NotifyKind::Error => 0x00_F4_43_36,
            NotifyKind::Info => 0x00_21_96_F3,
            NotifyKind::Warning => 0x00_FF_98_00,
        }
    }
}

pub trait Notifier {
    fn notify(&self, kind: NotifyKind, message: &str);
}

/// Writes notifications to the log and nowhere else.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, kind: NotifyKind, message: &str) {
        log_notification(kind, message);
    }
}

fn log_notification(kind: NotifyKind, message: &str) {
    match kind {
        NotifyKind::Success | NotifyKind::Info => tracing::info!(?kind, "{message}"),
        NotifyKind::Warning => tracing::warn!(?kind, "{message}"),
        NotifyKind::Error => tracing::error!(?kind, "{message}"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: NotifyKind,
    pub message: String,
    pub shown_at: Instant,
}

/// Shared queue of recent toasts. Clones share the same queue, so the
/// surface can hold one handle while the window host renders another.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    inner: Rc<RefCell<VecDeque<Toast>>>,
    ttl: Duration,
    capacity: usize,
}

impl ToastQueue {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(2);

    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            inner: Rc::new(RefCell::new(VecDeque::with_capacity(capacity))),
            ttl,
            capacity: capacity.max(1),
        }
    }

    pub fn push_at(&self, kind: NotifyKind, message: &str, now: Instant) {
        let mut q = self.inner.borrow_mut();
        if q.len() == self.capacity {
            q.pop_front(); // oldest toast makes room
        }
        q.push_back(Toast { kind, message: message.to_string(), shown_at: now });
    }

    /// Drop expired toasts and return the rest, oldest first.
    pub fn visible(&self, now: Instant) -> Vec<Toast> {
        let mut q = self.inner.borrow_mut();
        q.retain(|t| now.saturating_duration_since(t.shown_at) < self.ttl);
        q.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL, 4)
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, kind: NotifyKind, message: &str) {
        log_notification(kind, message);
        self.push_at(kind, message, Instant::now());
    }
}
