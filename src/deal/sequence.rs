//! Last-request-wins slot for results that arrive out of order
//!
//! Trade-in lookups may resolve after the customer has already changed the
//! vehicle description. Each request takes a ticket; only a result carrying
//! the newest ticket is accepted.

use log::debug;

/// Ticket identifying one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Holds the result of the most recent request only
#[derive(Debug, Clone)]
pub struct LatestResult<T> {
    issued: u64,
    value: Option<T>,
}

impl<T> Default for LatestResult<T> {
    fn default() -> Self {
        Self {
            issued: 0,
            value: None,
        }
    }
}

impl<T> LatestResult<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding all outstanding ones
    pub fn issue(&mut self) -> RequestTicket {
        self.issued += 1;
        RequestTicket(self.issued)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Store a result if its ticket is still current. Stale results are dropped.
    pub fn offer(&mut self, ticket: RequestTicket, value: T) -> bool {
        if self.is_current(ticket) {
            self.value = Some(value);
            true
        } else {
            debug!(
                "dropping stale result #{} (latest #{})",
                ticket.0, self.issued
            );
            false
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Forget the stored result and invalidate outstanding tickets
    pub fn reset(&mut self) {
        self.issued += 1;
        self.value = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_request_wins() {
        let mut slot = LatestResult::new();
        let first = slot.issue();
        let second = slot.issue();

        // Second lookup resolves first
        assert!(slot.offer(second, 18_000));
        // First lookup arrives late and must not overwrite
        assert!(!slot.offer(first, 12_000));
        assert_eq!(slot.get(), Some(&18_000));
    }

    #[test]
    fn test_in_order_results() {
        let mut slot = LatestResult::new();

        let t = slot.issue();
        assert!(slot.offer(t, "a"));
        let t = slot.issue();
        assert!(slot.offer(t, "b"));
        assert_eq!(slot.get(), Some(&"b"));
    }

    #[test]
    fn test_reset_invalidates_outstanding() {
        let mut slot = LatestResult::new();
        let t = slot.issue();
        slot.reset();

        assert!(!slot.offer(t, 1));
        assert_eq!(slot.get(), None);
    }
}
