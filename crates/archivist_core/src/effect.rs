use crate::prefs::{PreferenceKey, PreferenceValue};
use crate::types::{BulkFilter, FetchTicket, Notification, QueueQuery, QueueStatus, StatusScope};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadQueue {
        ticket: FetchTicket,
        query: QueueQuery,
    },
    LoadAggregates {
        scope: StatusScope,
    },
    SubmitUrl {
        text: String,
        auto_start: bool,
        priority: bool,
    },
    UpdateQueueByFilter {
        filter: BulkFilter,
        status: QueueStatus,
    },
    DeleteQueueByFilter {
        filter: BulkFilter,
    },
    UpdateItem {
        youtube_id: String,
        status: QueueStatus,
    },
    DeleteItem {
        youtube_id: String,
    },
    StorePreference {
        key: PreferenceKey,
        value: PreferenceValue,
    },
    Notify(Notification),
}
