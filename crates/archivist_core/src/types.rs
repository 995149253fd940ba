use std::fmt;

/// Status of a queued download job as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueueStatus {
    Pending,
    Ignore,
    Priority,
    /// Any status this client does not know about; kept verbatim.
    Other(String),
}

impl QueueStatus {
    pub fn as_str(&self) -> &str {
        match self {
            QueueStatus::Pending => "pending",
            QueueStatus::Ignore => "ignore",
            QueueStatus::Priority => "priority",
            QueueStatus::Other(raw) => raw,
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw {
            "pending" => QueueStatus::Pending,
            "ignore" => QueueStatus::Ignore,
            "priority" => QueueStatus::Priority,
            other => QueueStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The status subset selected by the ignored-scope toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusScope {
    Pending,
    Ignore,
}

/// Ignored-scope lookup, indexed by `usize::from(show_ignored)`.
///
/// `show_ignored == false` operates on `pending`, `true` on `ignore`.
pub const SCOPE_BY_SHOW_IGNORED: [StatusScope; 2] = [StatusScope::Pending, StatusScope::Ignore];

impl StatusScope {
    pub fn from_show_ignored(show_ignored: bool) -> Self {
        SCOPE_BY_SHOW_IGNORED[usize::from(show_ignored)]
    }

    pub fn shows_ignored(self) -> bool {
        self == StatusScope::Ignore
    }

    /// Wire name used by the `filter` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusScope::Pending => "pending",
            StatusScope::Ignore => "ignore",
        }
    }

    pub fn status(self) -> QueueStatus {
        match self {
            StatusScope::Pending => QueueStatus::Pending,
            StatusScope::Ignore => QueueStatus::Ignore,
        }
    }
}

/// Identity of a queue item within one fetch result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueueItemKey {
    pub channel_id: String,
    pub timestamp: Option<i64>,
    pub youtube_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueueItem {
    pub channel_id: String,
    pub channel_name: String,
    pub channel_indexed: bool,
    pub youtube_id: String,
    pub title: String,
    pub duration: String,
    pub published: Option<String>,
    pub timestamp: Option<i64>,
    pub status: QueueStatus,
    pub vid_type: String,
    pub auto_start: bool,
    pub message: Option<String>,
    pub thumbnail_url: String,
    pub index: String,
    pub score: f64,
}

impl QueueItem {
    pub fn key(&self) -> QueueItemKey {
        QueueItemKey {
            channel_id: self.channel_id.clone(),
            timestamp: self.timestamp,
            youtube_id: self.youtube_id.clone(),
        }
    }
}

/// Pagination block of a list response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page_size: u32,
    pub total_hits: u64,
    pub last_page: Option<u32>,
}

impl Pagination {
    /// Last page reported by the server, or derived from the hit count.
    pub fn last_page(&self) -> u32 {
        self.last_page.unwrap_or_else(|| {
            if self.page_size == 0 {
                return 1;
            }
            let pages = self.total_hits.div_ceil(u64::from(self.page_size));
            u32::try_from(pages).unwrap_or(u32::MAX).max(1)
        })
    }
}

/// One successful list response.
#[derive(Debug, Clone, PartialEq)]
pub struct QueuePage {
    pub items: Vec<QueueItem>,
    pub pagination: Pagination,
}

/// Per-channel item count for the current ignored-scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationBucket {
    pub channel_id: String,
    pub channel_name: String,
    pub count: u64,
}

/// Predicate of a bulk-by-filter mutation. Pagination never narrows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkFilter {
    pub scope: StatusScope,
    pub channel_id: Option<String>,
    pub vid_type: Option<String>,
    pub error: Option<bool>,
}

impl BulkFilter {
    /// Whether `item` falls inside the subset this filter addresses.
    pub fn matches(&self, item: &QueueItem) -> bool {
        if item.status != self.scope.status() {
            return false;
        }
        if let Some(channel_id) = &self.channel_id {
            if &item.channel_id != channel_id {
                return false;
            }
        }
        if let Some(vid_type) = &self.vid_type {
            if &item.vid_type != vid_type {
                return false;
            }
        }
        match self.error {
            Some(true) => item.message.is_some(),
            Some(false) => item.message.is_none(),
            None => true,
        }
    }
}

/// Parameters of one list request, captured when the request is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueQuery {
    pub page: u32,
    pub channel_id: Option<String>,
    pub vid_type: Option<String>,
    pub error: Option<bool>,
    pub show_ignored: bool,
    pub search: String,
}

impl QueueQuery {
    pub fn scope(&self) -> StatusScope {
        StatusScope::from_show_ignored(self.show_ignored)
    }
}

/// Correlates a list response with the request that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FetchTicket(pub u64);

impl fmt::Display for FetchTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A collaborator call that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    pub message: String,
}

impl RequestFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// A dismissible message for the notification collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }
}

/// Server-side mutations whose completion re-synchronizes the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    BulkUpdate,
    BulkDelete,
    ItemUpdate,
    ItemDelete,
}

impl MutationKind {
    pub fn label(self) -> &'static str {
        match self {
            MutationKind::BulkUpdate => "bulk status update",
            MutationKind::BulkDelete => "bulk delete",
            MutationKind::ItemUpdate => "status update",
            MutationKind::ItemDelete => "delete",
        }
    }
}
