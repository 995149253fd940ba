//! Archivist core: pure view-synchronization state machine for the download
//! queue, plus the view-model helpers built on it.
mod effect;
mod filters;
mod msg;
mod prefs;
mod state;
mod sync;
mod types;
mod update;
mod view_model;

pub use effect::Effect;
pub use filters::{resolve_filters, FilterState, LocationQuery};
pub use msg::Msg;
pub use prefs::{
    validate_preference, MemoryPreferenceStore, PreferenceError, PreferenceKey, PreferenceStore,
    PreferenceValue, UserPreferences, ViewStyle, GRID_ITEMS_MAX, GRID_ITEMS_MIN,
};
pub use state::ViewState;
pub use sync::{AggregationRefresher, FetchCoordinator, FetchPhase};
pub use types::{
    AggregationBucket, BulkFilter, FetchTicket, MutationKind, Notification, Pagination,
    QueueItem, QueueItemKey, QueuePage, QueueQuery, QueueStatus, RequestFailure, Severity,
    StatusScope, SCOPE_BY_SHOW_IGNORED,
};
pub use update::{update, update_batch};
pub use view_model::{
    format_total_hits, LayoutView, PaginationView, QueueRowView, QueueViewModel, TOTAL_HITS_CAP,
};
