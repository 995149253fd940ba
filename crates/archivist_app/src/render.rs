//! Plain-text rendering of the queue view model.

use std::fmt::Write;

use archivist_core::{FetchPhase, QueueRowView, QueueViewModel, Severity, ViewStyle};
use chrono::DateTime;

pub fn render(view: &QueueViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", view.title);

    if let Some(notification) = &view.notification {
        let marker = match notification.severity {
            Severity::Error => "!!",
            Severity::Info => "--",
        };
        let _ = writeln!(out, "{marker} {} (dismiss to hide)", notification.message);
    }

    let scope = if view.filters.show_ignored {
        "ignored"
    } else {
        "pending"
    };
    let mut status_line = format!("[{scope}]");
    if !view.filters.search_text.is_empty() {
        let _ = write!(status_line, " search {:?}", view.filters.search_text);
    }
    match view.phase {
        FetchPhase::Fetching => status_line.push_str(" loading..."),
        FetchPhase::Dirty => status_line.push_str(" refresh pending"),
        FetchPhase::Clean => {}
    }
    let _ = writeln!(out, "{status_line}");

    match &view.headline {
        Some(headline) => {
            let _ = writeln!(out, "{headline}");
        }
        None => {
            let _ = writeln!(out, "Loading download queue...");
        }
    }

    if view.headline.is_some() && view.rows.is_empty() {
        let _ = writeln!(out, "No videos in queue.");
    }
    match view.layout.style {
        ViewStyle::List => {
            for row in &view.rows {
                render_list_row(&mut out, row);
            }
        }
        ViewStyle::Grid => {
            let columns = usize::from(view.layout.grid_items.max(1));
            for chunk in view.rows.chunks(columns) {
                let cells: Vec<String> = chunk.iter().map(grid_cell).collect();
                let _ = writeln!(out, "  {}", cells.join(" | "));
            }
        }
    }

    if let Some(pagination) = &view.pagination {
        let _ = writeln!(
            out,
            "Page {} of {}",
            pagination.current_page, pagination.last_page
        );
    }

    if !view.buckets.is_empty() {
        let channels: Vec<String> = view
            .buckets
            .iter()
            .map(|bucket| format!("{} ({})", bucket.channel_name, bucket.count))
            .collect();
        let _ = writeln!(out, "Channels: {}", channels.join(", "));
    }

    if !view.enqueue_input.is_empty() {
        let _ = writeln!(out, "Add to queue: {}", view.enqueue_input);
    }
    out
}

fn render_list_row(out: &mut String, row: &QueueRowView) {
    let _ = write!(
        out,
        "  [{}] {} | {} | {}",
        row.status, row.title, row.channel_name, row.duration
    );
    if let Some(published) = &row.published {
        let _ = write!(out, " | published {published}");
    }
    if let Some(added) = row.timestamp.and_then(format_timestamp) {
        let _ = write!(out, " | added {added}");
    }
    if row.auto_start {
        out.push_str(" | auto");
    }
    let _ = writeln!(out, " | {}", row.youtube_id);
    if let Some(message) = &row.message {
        let _ = writeln!(out, "      error: {message}");
    }
}

fn grid_cell(row: &QueueRowView) -> String {
    let mut cell = format!("{} [{}]", row.title, row.youtube_id);
    if row.message.is_some() {
        cell.push_str(" !");
    }
    cell
}

fn format_timestamp(secs: i64) -> Option<String> {
    DateTime::from_timestamp(secs, 0).map(|at| at.format("%Y-%m-%d %H:%M").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use archivist_core::{
        LocationQuery, Msg, Pagination, QueueItem, QueuePage, QueueStatus, UserPreferences,
        ViewState,
    };

    fn item(id: &str) -> QueueItem {
        QueueItem {
            auto_start: false,
            channel_id: "UC1".to_string(),
            channel_indexed: true,
            channel_name: "Channel One".to_string(),
            duration: "3:21".to_string(),
            message: None,
            published: Some("2024-05-01".to_string()),
            status: QueueStatus::Pending,
            timestamp: Some(1_714_521_600),
            title: format!("Video {id}"),
            thumbnail_url: format!("/cache/{id}.jpg"),
            vid_type: "videos".to_string(),
            youtube_id: id.to_string(),
            index: "ta_download".to_string(),
            score: 0.0,
        }
    }

    fn loaded(prefs: UserPreferences, items: Vec<QueueItem>, total_hits: u64) -> ViewState {
        let state = ViewState::new(LocationQuery::default(), prefs);
        let (state, effects) = archivist_core::update(state, Msg::Tick);
        let ticket = effects
            .iter()
            .find_map(|effect| match effect {
                archivist_core::Effect::LoadQueue { ticket, .. } => Some(*ticket),
                _ => None,
            })
            .unwrap();
        let page = QueuePage {
            items,
            pagination: Pagination {
                page_size: 12,
                total_hits,
                last_page: None,
            },
        };
        let (state, _) = archivist_core::update(
            state,
            Msg::QueueLoaded {
                ticket,
                result: Ok(page),
            },
        );
        state
    }

    #[test]
    fn before_first_response_shows_loading() {
        let state = ViewState::new(LocationQuery::default(), UserPreferences::default());
        let text = render(&state.view());
        assert!(text.starts_with("== Downloads =="));
        assert!(text.contains("Loading download queue..."));
    }

    #[test]
    fn list_rows_carry_status_and_added_time() {
        let state = loaded(UserPreferences::default(), vec![item("abc")], 1);
        let text = render(&state.view());
        assert!(text.contains("Total videos in queue: 1"));
        assert!(text.contains("[pending] Video abc | Channel One | 3:21"));
        assert!(text.contains("added 2024-05-01 00:00"));
        assert!(text.contains("Page 1 of 1"));
    }

    #[test]
    fn grid_groups_rows_by_grid_items() {
        let prefs = UserPreferences {
            view_style_downloads: ViewStyle::Grid,
            grid_items: 3,
            ..UserPreferences::default()
        };
        let items = ["a", "b", "c", "d"].into_iter().map(item).collect();
        let state = loaded(prefs, items, 4);
        let text = render(&state.view());
        assert!(text.contains("  Video a [a] | Video b [b] | Video c [c]\n"));
        assert!(text.contains("  Video d [d]\n"));
    }

    #[test]
    fn capped_total_renders_with_plus() {
        let state = loaded(UserPreferences::default(), vec![item("abc")], 10_000);
        assert!(render(&state.view()).contains("Total videos in queue: 10000+"));
    }

    #[test]
    fn empty_queue_says_so() {
        let state = loaded(UserPreferences::default(), Vec::new(), 0);
        assert!(render(&state.view()).contains("No videos in queue."));
    }
}
