//! Request tickets for discarding out-of-order responses.

use std::fmt;

/// Sequence number attached to an outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues tickets for one logical operation and remembers the latest.
///
/// A response is current only if it carries the most recently issued ticket.
#[derive(Debug, Default)]
pub struct Sequencer {
    latest: u64,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket, superseding every earlier one.
    pub fn issue(&mut self) -> Ticket {
        self.latest += 1;
        Ticket(self.latest)
    }

    /// Supersede all outstanding tickets without issuing a request.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        ticket.0 == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_is_current() {
        let mut seq = Sequencer::new();
        let first = seq.issue();
        let second = seq.issue();

        assert!(first < second);
        assert!(!seq.is_latest(first));
        assert!(seq.is_latest(second));
    }

    #[test]
    fn test_invalidate_supersedes_outstanding() {
        let mut seq = Sequencer::new();
        let ticket = seq.issue();
        seq.invalidate();

        assert!(!seq.is_latest(ticket));
        let next = seq.issue();
        assert!(seq.is_latest(next));
        assert!(next > ticket);
    }
}
