//! Discarding results of loads that are no longer wanted.
//!
//! Each load is begun with the key that triggered it (an id, a form mode)
//! and gets a `Ticket`. Beginning another load, or cancelling, retires the
//! previous ticket; a retired ticket's result must be dropped.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    key: K,
    generation: u64,
}

impl<K> Ticket<K> {
    pub fn key(&self) -> &K {
        &self.key
    }
}

#[derive(Debug)]
pub struct FetchGuard<K> {
    active: Option<Ticket<K>>,
    generation: u64,
}

impl<K> Default for FetchGuard<K> {
    fn default() -> Self {
        Self {
            active: None,
            generation: 0,
        }
    }
}

impl<K: Clone + PartialEq> FetchGuard<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, key: K) -> Ticket<K> {
        self.generation += 1;
        let ticket = Ticket {
            key,
            generation: self.generation,
        };
        self.active = Some(ticket.clone());
        ticket
    }

    /// Consumes the active ticket if `ticket` is it. Returns whether the
    /// caller may apply the result.
    pub fn settle(&mut self, ticket: &Ticket<K>) -> bool {
        if self.active.as_ref() == Some(ticket) {
            self.active = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }

    pub fn in_flight(&self) -> Option<&K> {
        self.active.as_ref().map(Ticket::key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_ticket_wins() {
        let mut guard = FetchGuard::new();
        let first = guard.begin(1);
        let second = guard.begin(2);

        assert!(!guard.settle(&first));
        assert_eq!(guard.in_flight(), Some(&2));
        assert!(guard.settle(&second));
        assert_eq!(guard.in_flight(), None);
    }

    #[test]
    fn same_key_reissued_still_retires_old_ticket() {
        let mut guard = FetchGuard::new();
        let first = guard.begin("a");
        let again = guard.begin("a");
        assert!(!guard.settle(&first));
        assert!(guard.settle(&again));
    }

    #[test]
    fn settled_ticket_cannot_apply_twice() {
        let mut guard = FetchGuard::new();
        let ticket = guard.begin(());
        assert!(guard.settle(&ticket));
        assert!(!guard.settle(&ticket));
    }

    #[test]
    fn cancel_retires_active_ticket() {
        let mut guard = FetchGuard::new();
        let ticket = guard.begin(5);
        guard.cancel();
        assert!(!guard.settle(&ticket));
    }
}
