use crate::filters::FilterState;
use crate::prefs::ViewStyle;
use crate::sync::FetchPhase;
use crate::types::{AggregationBucket, Notification, QueueItem, QueueItemKey, QueueStatus};
use crate::ViewState;

/// The search backend stops counting here; totals at the cap are shown as `N+`.
pub const TOTAL_HITS_CAP: u64 = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct QueueViewModel {
    pub title: String,
    /// `None` until the first list response arrived.
    pub headline: Option<String>,
    pub filters: FilterState,
    pub rows: Vec<QueueRowView>,
    pub pagination: Option<PaginationView>,
    pub buckets: Vec<AggregationBucket>,
    pub layout: LayoutView,
    pub enqueue_input: String,
    pub phase: FetchPhase,
    pub notification: Option<Notification>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueRowView {
    pub key: QueueItemKey,
    pub youtube_id: String,
    pub title: String,
    pub channel_name: String,
    pub duration: String,
    pub published: Option<String>,
    pub timestamp: Option<i64>,
    pub status: QueueStatus,
    pub vid_type: String,
    pub auto_start: bool,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: u32,
    pub last_page: u32,
    pub total_hits: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutView {
    pub style: ViewStyle,
    pub grid_items: u8,
    pub container_class: String,
    pub list_class: String,
}

pub fn format_total_hits(total_hits: u64) -> String {
    if total_hits == TOTAL_HITS_CAP {
        format!("{total_hits}+")
    } else {
        total_hits.to_string()
    }
}

impl ViewState {
    pub fn view(&self) -> QueueViewModel {
        let filters = self.filters().clone();
        let page = self.queue_page();
        let items = page.map(|page| page.items.as_slice()).unwrap_or(&[]);

        let channel_name = match (&filters.channel_id, items.first()) {
            (Some(_), Some(first)) => Some(first.channel_name.clone()),
            _ => None,
        };

        let title = match &channel_name {
            Some(name) => format!("Downloads for {name}"),
            None => "Downloads".to_string(),
        };

        let headline = page.map(|page| {
            let mut line = format!(
                "Total videos in queue: {}",
                format_total_hits(page.pagination.total_hits)
            );
            if filters.channel_id.is_some() {
                line.push_str(" - from channel ");
                line.push_str(channel_name.as_deref().unwrap_or(""));
            }
            if let Some(vid_type) = &filters.vid_type {
                line.push_str(" - by type ");
                line.push_str(vid_type);
            }
            line
        });

        let pagination = page.map(|page| PaginationView {
            current_page: self.current_page(),
            last_page: page.pagination.last_page(),
            total_hits: page.pagination.total_hits,
        });

        QueueViewModel {
            title,
            headline,
            rows: items.iter().map(row_view).collect(),
            pagination,
            buckets: self.buckets().to_vec(),
            layout: layout_view(
                self.preferences().view_style_downloads,
                self.preferences().grid_items,
            ),
            enqueue_input: self.enqueue_input().to_string(),
            phase: self.fetch_phase(),
            notification: self.notification().cloned(),
            filters,
        }
    }
}

fn row_view(item: &QueueItem) -> QueueRowView {
    QueueRowView {
        key: item.key(),
        youtube_id: item.youtube_id.clone(),
        title: item.title.clone(),
        channel_name: item.channel_name.clone(),
        duration: item.duration.clone(),
        published: item.published.clone(),
        timestamp: item.timestamp,
        status: item.status.clone(),
        vid_type: item.vid_type.clone(),
        auto_start: item.auto_start,
        message: item.message.clone(),
    }
}

fn layout_view(style: ViewStyle, grid_items: u8) -> LayoutView {
    let (container_class, list_class) = match style {
        ViewStyle::Grid => (
            format!("boxed-content boxed-{grid_items}"),
            format!("video-list grid grid-{grid_items}"),
        ),
        ViewStyle::List => ("boxed-content".to_string(), "video-list list".to_string()),
    };
    LayoutView {
        style,
        grid_items,
        container_class,
        list_class,
    }
}
