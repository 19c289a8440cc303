use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error};

use crate::error::{QeventError, Result};

/// Tracks which request a view is waiting for.
///
/// Every `begin()` starts a new generation; a result is applied only when it
/// belongs to the latest generation and the view has not been torn down.
/// Clones share state, so a teardown can come from another task.
#[derive(Debug, Clone, Default)]
pub struct ViewGuard {
    inner: Arc<GuardState>,
}

#[derive(Debug, Default)]
struct GuardState {
    generation: AtomicU64,
    torn_down: AtomicBool,
}

/// Issued when a request starts, presented again when its result arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
}

impl ViewGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> RequestTicket {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket { generation }
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        !self.is_torn_down() && self.inner.generation.load(Ordering::SeqCst) == ticket.generation
    }

    pub fn teardown(&self) {
        self.inner.torn_down.store(true, Ordering::SeqCst);
    }

    pub fn is_torn_down(&self) -> bool {
        self.inner.torn_down.load(Ordering::SeqCst)
    }
}

/// Result slot of a list view: items, loading flag and a user-facing error
#[derive(Debug)]
pub struct ListView<T> {
    guard: ViewGuard,
    items: Vec<T>,
    loading: bool,
    error: Option<String>,
    fallback_message: &'static str,
}

impl<T> ListView<T> {
    /// `fallback_message` is shown when a failure carries no text of its own
    pub fn new(fallback_message: &'static str) -> Self {
        Self {
            guard: ViewGuard::new(),
            items: Vec::new(),
            loading: true,
            error: None,
            fallback_message,
        }
    }

    pub fn guard(&self) -> ViewGuard {
        self.guard.clone()
    }

    /// Start a request. Earlier tickets become stale.
    pub fn begin(&mut self) -> RequestTicket {
        self.loading = true;
        self.error = None;
        self.guard.begin()
    }

    /// Apply a finished request. Returns false when the result was discarded.
    pub fn apply(&mut self, ticket: RequestTicket, outcome: Result<Vec<T>>) -> bool {
        if !self.guard.is_current(ticket) {
            debug!(
                torn_down = self.guard.is_torn_down(),
                "Discarding result for an abandoned request"
            );
            return false;
        }

        match outcome {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(e) => {
                error!("Error loading view: {}", e);
                self.items = Vec::new();
                self.error = Some(user_message(&e, self.fallback_message));
            }
        }
        self.loading = false;
        true
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Loaded successfully but nothing to show
    pub fn is_empty_state(&self) -> bool {
        !self.loading && self.error.is_none() && self.items.is_empty()
    }
}

/// The failure's own message, or `fallback` when it has none
pub fn user_message(err: &QeventError, fallback: &str) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
