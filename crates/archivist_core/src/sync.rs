//! Refresh signals for the list and the aggregates.
//!
//! Both are boolean dirty flags, not queues: any number of triggers between
//! two requests collapse into one request, and at most one request of each
//! kind is outstanding. A trigger that arrives while a request is in flight
//! is answered by exactly one follow-up once it completes.

use crate::types::{FetchTicket, StatusScope};

/// Observable state of the list fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    Clean,
    Dirty,
    Fetching,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCoordinator {
    dirty: bool,
    in_flight: Option<FetchTicket>,
    next_ticket: u64,
    last_total_hits: u64,
}

impl Default for FetchCoordinator {
    fn default() -> Self {
        // Starts dirty so the first reconcile loads the queue.
        Self {
            dirty: true,
            in_flight: None,
            next_ticket: 1,
            last_total_hits: 0,
        }
    }
}

impl FetchCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FetchPhase {
        match (self.in_flight, self.dirty) {
            (Some(_), _) => FetchPhase::Fetching,
            (None, true) => FetchPhase::Dirty,
            (None, false) => FetchPhase::Clean,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn in_flight(&self) -> Option<FetchTicket> {
        self.in_flight
    }

    /// True when a follow-up fetch is owed after the outstanding one.
    pub fn has_follow_up(&self) -> bool {
        self.in_flight.is_some() && self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Claims the next fetch if one is due and none is outstanding.
    pub fn try_issue(&mut self) -> Option<FetchTicket> {
        if !self.dirty || self.in_flight.is_some() {
            return None;
        }
        let ticket = FetchTicket(self.next_ticket);
        self.next_ticket += 1;
        self.dirty = false;
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// Releases the outstanding fetch. Returns false for an unknown ticket,
    /// which leaves the coordinator untouched.
    pub fn finish(&mut self, ticket: FetchTicket) -> bool {
        if self.in_flight != Some(ticket) {
            return false;
        }
        self.in_flight = None;
        true
    }

    pub fn last_total_hits(&self) -> u64 {
        self.last_total_hits
    }

    /// Records the hit count of a successful fetch; true if it changed.
    pub fn record_total_hits(&mut self, total_hits: u64) -> bool {
        if total_hits == self.last_total_hits {
            return false;
        }
        self.last_total_hits = total_hits;
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationRefresher {
    dirty: bool,
    in_flight: Option<StatusScope>,
}

impl Default for AggregationRefresher {
    fn default() -> Self {
        Self {
            dirty: true,
            in_flight: None,
        }
    }
}

impl AggregationRefresher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn in_flight(&self) -> Option<StatusScope> {
        self.in_flight
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn try_issue(&mut self, scope: StatusScope) -> Option<StatusScope> {
        if !self.dirty || self.in_flight.is_some() {
            return None;
        }
        self.dirty = false;
        self.in_flight = Some(scope);
        Some(scope)
    }

    /// Releases the outstanding request for `scope`. False if none matched.
    pub fn finish(&mut self, scope: StatusScope) -> bool {
        if self.in_flight != Some(scope) {
            return false;
        }
        self.in_flight = None;
        true
    }
}
