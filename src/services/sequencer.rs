// src/services/sequencer.rs

use indexmap::IndexMap;

/// Views tracked at once. The least recently used view is forgotten first.
pub const MAX_TRACKED_VIEWS: usize = 1024;

/// Handle for one in-flight request against a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub view: String,
    pub seq: u64,
}

/// Orders AI responses per view: only the newest request for a view may
/// publish its response, so a slow earlier answer never replaces a later one.
///
/// Both maps are kept in use order and capped at `capacity`. A request whose
/// view was evicted while in flight is treated as stale.
#[derive(Debug)]
pub struct RequestSequencer {
    next_seq: u64,
    capacity: usize,
    pending: IndexMap<String, u64>,
    published: IndexMap<String, String>,
}

impl Default for RequestSequencer {
    fn default() -> Self {
        Self::with_capacity(MAX_TRACKED_VIEWS)
    }
}

impl RequestSequencer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            next_seq: 0,
            capacity: capacity.max(1),
            pending: IndexMap::new(),
            published: IndexMap::new(),
        }
    }

    pub fn issue(&mut self, view: &str) -> Ticket {
        self.next_seq += 1;
        self.pending.shift_remove(view);
        self.pending.insert(view.to_string(), self.next_seq);
        evict_oldest(&mut self.pending, self.capacity);
        Ticket {
            view: view.to_string(),
            seq: self.next_seq,
        }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.pending.get(&ticket.view) == Some(&ticket.seq)
    }

    /// Stores the response if the ticket is still the newest for its view.
    pub fn publish(&mut self, ticket: &Ticket, response: String) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!("Discarding stale response {} for {}", ticket.seq, ticket.view);
            return false;
        }
        self.pending.shift_remove(&ticket.view);
        self.published.shift_remove(&ticket.view);
        self.published.insert(ticket.view.clone(), response);
        evict_oldest(&mut self.published, self.capacity);
        true
    }

    /// Forgets a request that failed, unless a newer one has been issued since.
    pub fn retire(&mut self, ticket: &Ticket) {
        if self.is_current(ticket) {
            self.pending.shift_remove(&ticket.view);
        }
    }

    pub fn published(&self, view: &str) -> Option<&str> {
        self.published.get(view).map(String::as_str)
    }

    /// Number of views with a request in flight.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn published_len(&self) -> usize {
        self.published.len()
    }
}

fn evict_oldest<V>(map: &mut IndexMap<String, V>, capacity: usize) {
    while map.len() > capacity {
        map.shift_remove_index(0);
    }
}
