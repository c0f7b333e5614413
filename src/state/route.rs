//! Current application location.
//!
//! DESIGN
//! ======
//! The request pipeline only knows how to "navigate to a path"; this is the
//! concrete target it talks to. Guards and the CLI read the current location
//! back to decide what to render next.

#[cfg(test)]
#[path = "route_test.rs"]
mod route_test;

use std::sync::{Mutex, PoisonError};

use crate::net::pipeline::Navigator;

#[derive(Debug)]
pub struct RouteState {
    inner: Mutex<RouteInner>,
}

#[derive(Debug)]
struct RouteInner {
    current: String,
    history: Vec<String>,
}

impl RouteState {
    pub fn new(initial: impl Into<String>) -> Self {
        Self { inner: Mutex::new(RouteInner { current: initial.into(), history: Vec::new() }) }
    }

    #[must_use]
    pub fn current(&self) -> String {
        self.lock().current.clone()
    }

    /// Locations left behind, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.lock().history.clone()
    }

    /// Whether the current location is `path`.
    #[must_use]
    pub fn is_at(&self, path: &str) -> bool {
        self.lock().current == path
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RouteInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RouteState {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Navigator for RouteState {
    fn navigate(&self, path: &str) {
        let mut inner = self.lock();
        if inner.current == path {
            return;
        }
        tracing::debug!(from = %inner.current, to = path, "navigate");
        let previous = std::mem::replace(&mut inner.current, path.to_owned());
        inner.history.push(previous);
    }
}
