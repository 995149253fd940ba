use std::collections::HashSet;

use archivist_logging::{archivist_debug, archivist_info, archivist_warn};

use crate::filters::{resolve_filters, FilterState, LocationQuery};
use crate::prefs::UserPreferences;
use crate::sync::{AggregationRefresher, FetchCoordinator, FetchPhase};
use crate::types::{
    AggregationBucket, FetchTicket, Notification, QueueItem, QueuePage, RequestFailure,
    StatusScope,
};
use crate::Effect;

/// Everything the queue view knows. Owned by a single loop; all changes go
/// through [`crate::update`].
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    location: LocationQuery,
    prefs: UserPreferences,
    search_text: String,
    current_page: u32,
    filters: FilterState,
    fetch: FetchCoordinator,
    aggregation: AggregationRefresher,
    page: Option<QueuePage>,
    buckets: Option<(StatusScope, Vec<AggregationBucket>)>,
    enqueue_input: String,
    notification: Option<Notification>,
    dirty: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(LocationQuery::default(), UserPreferences::default())
    }
}

impl ViewState {
    pub fn new(location: LocationQuery, prefs: UserPreferences) -> Self {
        let filters = resolve_filters(&location, &prefs, "");
        Self {
            location,
            prefs,
            search_text: String::new(),
            current_page: 1,
            filters,
            fetch: FetchCoordinator::new(),
            aggregation: AggregationRefresher::new(),
            page: None,
            buckets: None,
            enqueue_input: String::new(),
            notification: None,
            dirty: false,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.prefs
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn fetch_phase(&self) -> FetchPhase {
        self.fetch.phase()
    }

    pub fn fetch(&self) -> &FetchCoordinator {
        &self.fetch
    }

    pub fn aggregation(&self) -> &AggregationRefresher {
        &self.aggregation
    }

    pub fn queue_page(&self) -> Option<&QueuePage> {
        self.page.as_ref()
    }

    /// Buckets for the scope currently displayed. Buckets computed under the
    /// other scope are never returned.
    pub fn buckets(&self) -> &[AggregationBucket] {
        match &self.buckets {
            Some((scope, buckets)) if *scope == self.filters.scope() => buckets,
            _ => &[],
        }
    }

    pub fn enqueue_input(&self) -> &str {
        &self.enqueue_input
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Returns whether a re-render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_location(&mut self, location: LocationQuery) {
        self.location = location;
        self.refilter();
    }

    /// Applies a preference snapshot; snapshots older than the current one
    /// are dropped.
    pub(crate) fn set_preferences(&mut self, prefs: UserPreferences) {
        if prefs.version < self.prefs.version {
            archivist_debug!(
                "Dropping preference snapshot v{} (have v{})",
                prefs.version,
                self.prefs.version
            );
            return;
        }
        if prefs != self.prefs {
            self.dirty = true;
        }
        self.prefs = prefs;
        self.refilter();
    }

    pub(crate) fn set_search(&mut self, search_text: String) {
        self.search_text = search_text;
        self.refilter();
    }

    pub(crate) fn select_page(&mut self, page: u32) {
        let page = page.max(1);
        if page == self.current_page {
            return;
        }
        self.current_page = page;
        self.fetch.mark_dirty();
        self.dirty = true;
    }

    pub(crate) fn request_refresh(&mut self) {
        self.fetch.mark_dirty();
    }

    pub(crate) fn set_enqueue_input(&mut self, text: String) {
        if self.enqueue_input != text {
            self.enqueue_input = text;
            self.dirty = true;
        }
    }

    pub(crate) fn clear_enqueue_input(&mut self, submitted: &str) {
        // Keep anything typed after the submission went out.
        if self.enqueue_input.trim() == submitted {
            self.set_enqueue_input(String::new());
        }
    }

    pub(crate) fn notify(&mut self, notification: Notification) -> Effect {
        self.notification = Some(notification.clone());
        self.dirty = true;
        Effect::Notify(notification)
    }

    pub(crate) fn dismiss_notification(&mut self) {
        if self.notification.take().is_some() {
            self.dirty = true;
        }
    }

    /// Re-derives the effective filters and reacts to any difference.
    fn refilter(&mut self) {
        let next = resolve_filters(&self.location, &self.prefs, &self.search_text);
        if next == self.filters {
            return;
        }
        if next.show_ignored != self.filters.show_ignored {
            self.aggregation.mark_dirty();
        }
        archivist_debug!("Filters changed: {:?} -> {:?}", self.filters, next);
        self.filters = next;
        self.current_page = 1;
        self.fetch.mark_dirty();
        self.dirty = true;
    }

    /// Issues whatever requests are due, built from the values current now.
    pub(crate) fn reconcile(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if let Some(ticket) = self.fetch.try_issue() {
            let query = self.filters.query(self.current_page);
            archivist_info!("LoadQueue ticket={} query={:?}", ticket, query);
            effects.push(Effect::LoadQueue { ticket, query });
            self.dirty = true;
        } else if self.fetch.has_follow_up() {
            archivist_debug!("Queue fetch pending behind {:?}", self.fetch.in_flight());
        }
        if let Some(scope) = self.aggregation.try_issue(self.filters.scope()) {
            archivist_info!("LoadAggregates scope={}", scope.as_str());
            effects.push(Effect::LoadAggregates { scope });
        }
        effects
    }

    pub(crate) fn apply_queue_loaded(
        &mut self,
        ticket: FetchTicket,
        result: Result<QueuePage, RequestFailure>,
    ) -> Vec<Effect> {
        if !self.fetch.finish(ticket) {
            archivist_warn!("Ignoring queue response for unknown ticket {}", ticket);
            return Vec::new();
        }
        self.dirty = true;
        match result {
            Ok(mut page) => {
                page.items = dedupe_items(page.items);
                let total_hits = page.pagination.total_hits;
                if self.fetch.record_total_hits(total_hits) {
                    archivist_info!("Queue size changed to {}", total_hits);
                    self.aggregation.mark_dirty();
                }
                self.page = Some(page);
                Vec::new()
            }
            Err(failure) => {
                // Previous data stays on screen; a later trigger retries.
                archivist_warn!("Queue fetch {} failed: {}", ticket, failure);
                vec![self.notify(Notification::error(format!(
                    "Failed to load download queue: {failure}"
                )))]
            }
        }
    }

    pub(crate) fn apply_aggregates_loaded(
        &mut self,
        scope: StatusScope,
        result: Result<Vec<AggregationBucket>, RequestFailure>,
    ) {
        if !self.aggregation.finish(scope) {
            archivist_warn!("Ignoring aggregation response for {}", scope.as_str());
            return;
        }
        match result {
            Ok(buckets) if scope == self.filters.scope() => {
                self.buckets = Some((scope, buckets));
                self.dirty = true;
            }
            Ok(_) => {
                archivist_debug!("Discarding aggregates computed for {}", scope.as_str());
                self.aggregation.mark_dirty();
            }
            Err(failure) => {
                archivist_warn!("Aggregation fetch failed: {}", failure);
            }
        }
    }
}

fn dedupe_items(items: Vec<QueueItem>) -> Vec<QueueItem> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| {
            let fresh = seen.insert(item.key());
            if !fresh {
                archivist_warn!("Dropping duplicate queue item {}", item.youtube_id);
            }
            fresh
        })
        .collect()
}
