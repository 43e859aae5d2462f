//! Single-slot debounce with cancel-then-arm semantics.

use std::time::Duration;

use crate::scheduler::TimerId;

/// Default quiet period before a search is sent.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// What the caller must do with its timer after an input change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceStep {
    /// Cancel `cancelled` (if any), then arm `timer`.
    Armed {
        cancelled: Option<TimerId>,
        timer: TimerId,
    },
    /// Cancel `cancelled` (if any); the input is blank so nothing is armed.
    Cleared { cancelled: Option<TimerId> },
}

impl DebounceStep {
    pub fn cancelled(&self) -> Option<TimerId> {
        match self {
            DebounceStep::Armed { cancelled, .. } | DebounceStep::Cleared { cancelled } => *cancelled,
        }
    }
}

#[derive(Debug)]
struct Pending {
    timer: TimerId,
    query: String,
}

/// One pending-query slot.
///
/// Every input change replaces the slot, so at most one timer is live and only
/// the live timer can yield a query when it fires.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    next_timer: u64,
    pending: Option<Pending>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_timer: 0,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record an input change. The trimmed text becomes the pending query.
    pub fn input(&mut self, raw: &str) -> DebounceStep {
        let cancelled = self.cancel();
        let query = raw.trim();
        if query.is_empty() {
            return DebounceStep::Cleared { cancelled };
        }

        self.next_timer += 1;
        let timer = TimerId(self.next_timer);
        self.pending = Some(Pending {
            timer,
            query: query.to_string(),
        });
        DebounceStep::Armed { cancelled, timer }
    }

    /// A timer fired. Yields the query only if `timer` is the live one.
    pub fn fire(&mut self, timer: TimerId) -> Option<String> {
        match self.pending.take() {
            Some(pending) if pending.timer == timer => Some(pending.query),
            other => {
                self.pending = other;
                None
            }
        }
    }

    /// Drop the pending query, returning the timer to cancel.
    pub fn cancel(&mut self) -> Option<TimerId> {
        self.pending.take().map(|p| p.timer)
    }

    pub fn pending_query(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.query.as_str())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
