use crate::filters::LocationQuery;
use crate::prefs::{UserPreferences, ViewStyle};
use crate::types::{
    AggregationBucket, FetchTicket, MutationKind, QueuePage, QueueStatus, RequestFailure,
    StatusScope,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The location query string changed (navigation, filter shortcut).
    LocationChanged(LocationQuery),
    /// The preference store published a new snapshot.
    PreferencesChanged(UserPreferences),
    /// User edited the free-text search.
    SearchChanged(String),
    /// User picked a page.
    PageSelected(u32),
    /// User asked for a reload of the current view.
    RefreshRequested,
    /// User edited the enqueue input box.
    EnqueueInputChanged(String),
    /// User submitted the enqueue input.
    EnqueueSubmitted,
    /// Apply a status to every item matching the current filters.
    BulkStatusRequested(QueueStatus),
    /// Remove every item matching the current filters.
    BulkDeleteRequested,
    /// Change the status of a single item.
    ItemStatusRequested {
        youtube_id: String,
        status: QueueStatus,
    },
    /// Remove a single item.
    ItemDeleteRequested { youtube_id: String },
    ViewStyleSelected(ViewStyle),
    GridItemsSelected(u8),
    /// User changed the stored default for the ignored-scope toggle.
    ShowIgnoredDefaultSelected(bool),
    NotificationDismissed,
    /// List request completed.
    QueueLoaded {
        ticket: FetchTicket,
        result: Result<QueuePage, RequestFailure>,
    },
    /// Aggregation request completed.
    AggregatesLoaded {
        scope: StatusScope,
        result: Result<Vec<AggregationBucket>, RequestFailure>,
    },
    /// Enqueue request completed.
    UrlSubmitted {
        text: String,
        result: Result<(), RequestFailure>,
    },
    /// A bulk or single-item mutation completed.
    MutationFinished {
        kind: MutationKind,
        result: Result<(), RequestFailure>,
    },
    /// Reconcile without any input change (mount, idle wake-up).
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
