//! A single compiled route and its selection state.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::schema::{RouteConfig, RouteKind};

/// Backend selection policy for a route.
#[derive(Debug)]
enum Target {
    /// One fixed backend.
    Static(String),
    /// Ordered backend list walked one entry per request.
    Ordinal(Vec<String>),
}

/// A compiled route: a forwarding target plus rotation state.
///
/// The cursor is the only mutable piece; it is advanced by [`Route::select`]
/// on ordinal routes and zeroed by [`Route::reset`].
#[derive(Debug)]
pub struct Route {
    target: Target,
    cursor: AtomicUsize,
}

impl Route {
    /// Create a static route with a single backend.
    pub fn fixed(backend: impl Into<String>) -> Self {
        Self {
            target: Target::Static(backend.into()),
            cursor: AtomicUsize::new(0),
        }
    }

    /// Create an ordinal route over an ordered backend list.
    pub fn rotating(backends: Vec<String>) -> Self {
        Self {
            target: Target::Ordinal(backends),
            cursor: AtomicUsize::new(0),
        }
    }

    /// Compile a route from its configuration.
    pub fn from_config(config: RouteConfig) -> Self {
        match config.kind {
            RouteKind::Static => Self::fixed(config.backend.unwrap_or_default()),
            RouteKind::Ordinal => Self::rotating(config.backends.unwrap_or_default()),
        }
    }

    /// Select the backend for the next request.
    ///
    /// Static routes always return their one backend. Ordinal routes return
    /// the entry under the cursor and advance it, saturating at the last
    /// index; the first `len - 1` selections walk the list and every
    /// selection after that sticks on the final entry. Returns `None` for an
    /// ordinal route with no backends.
    pub fn select(&self) -> Option<&str> {
        match &self.target {
            Target::Static(backend) => Some(backend),
            Target::Ordinal(backends) => {
                if backends.is_empty() {
                    return None;
                }

                // fetch_update keeps the advance-and-saturate exact under
                // contention: the closure refuses to move past the last
                // index, and the pre-advance value is what this request
                // observes either way.
                let index = self
                    .cursor
                    .fetch_update(Ordering::AcqRel, Ordering::Acquire, |i| {
                        (i + 1 < backends.len()).then_some(i + 1)
                    })
                    .unwrap_or_else(|held| held);

                backends.get(index).map(String::as_str)
            }
        }
    }

    /// Zero the rotation cursor.
    pub fn reset(&self) {
        self.cursor.store(0, Ordering::Release);
    }

    /// Current cursor position, for logging and tests.
    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::Acquire)
    }
}
