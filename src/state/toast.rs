//! Transient notifications raised by pages.
//!
//! Failed gateway calls surface here instead of replacing view state: pages
//! route a `Result` through [`Toasts::report`] and keep rendering what they
//! had when it yields `None`.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use std::fmt::Display;
use std::time::{Duration, Instant};

/// How long a toast stays visible unless dismissed.
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Clone, Debug)]
pub struct Toasts {
    items: Vec<Toast>,
    next_id: u64,
    ttl: Duration,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::with_ttl(DEFAULT_TOAST_TTL)
    }
}

impl Toasts {
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { items: Vec::new(), next_id: 1, ttl }
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push_at(ToastKind::Success, message.into(), Instant::now())
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push_at(ToastKind::Error, message.into(), Instant::now())
    }

    /// Pass a successful value through; on failure log the error, raise an
    /// error toast with `message` and yield `None`.
    pub fn report<T, E: Display>(&mut self, result: Result<T, E>, message: &str) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, "{message}");
                self.error(message);
                None
            }
        }
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    /// Drop every toast that has expired by `now`.
    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|t| t.expires_at > now);
    }

    /// Toasts still visible at `now`, oldest first.
    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &Toast> {
        self.items.iter().filter(move |t| t.expires_at > now)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drain every held toast, oldest first.
    pub fn take_all(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.items)
    }

    fn push_at(&mut self, kind: ToastKind, message: String, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast { id, kind, message, expires_at: now + self.ttl });
        id
    }
}
