//! Last-issued-wins bookkeeping for collaborator requests.
//!
//! Every request is issued with a [`Ticket`]. When its response arrives it
//! is applied only if that ticket is still the most recent one; anything
//! older has been superseded and is dropped. No request is ever cancelled.

use std::fmt;

/// Identifies one issued request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    seq: u64,
    key: K,
}

impl<K> Ticket<K> {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn key(&self) -> &K {
        &self.key
    }
}

impl<K: fmt::Display> fmt::Display for Ticket<K> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "#{} ({})", self.seq, self.key)
    }
}

#[derive(Debug, Clone)]
pub struct LatestRequest<K> {
    next_seq: u64,
    latest: Option<Ticket<K>>,
}

impl<K> Default for LatestRequest<K> {
    fn default() -> Self {
        Self {
            next_seq: 1,
            latest: None,
        }
    }
}

impl<K: Clone + PartialEq> LatestRequest<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new ticket for `key`, superseding every earlier one.
    pub fn issue(
        &mut self,
        key: K,
    ) -> Ticket<K> {
        let ticket = Ticket {
            seq: self.next_seq,
            key,
        };
        self.next_seq += 1;
        self.latest = Some(ticket.clone());
        ticket
    }

    /// True if no newer ticket has been issued since `ticket`.
    pub fn is_current(
        &self,
        ticket: &Ticket<K>,
    ) -> bool {
        self.latest
            .as_ref()
            .is_some_and(|latest| latest.seq == ticket.seq)
    }

    /// True when `key` differs from the latest issued key, i.e. the data
    /// on screen was fetched for something else.
    pub fn key_changed(
        &self,
        key: &K,
    ) -> bool {
        self.latest.as_ref().is_none_or(|latest| latest.key != *key)
    }

    pub fn latest_key(&self) -> Option<&K> {
        self.latest.as_ref().map(|t| &t.key)
    }

    /// Forgets the latest ticket so that any outstanding response is
    /// dropped.
    pub fn invalidate(&mut self) {
        self.latest = None;
    }
}
