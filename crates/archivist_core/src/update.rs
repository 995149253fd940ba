use archivist_logging::{archivist_debug, archivist_info, archivist_warn};

use crate::prefs::{validate_preference, PreferenceKey, PreferenceValue};
use crate::types::Notification;
use crate::{Effect, Msg, ViewState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(state: ViewState, msg: Msg) -> (ViewState, Vec<Effect>) {
    if matches!(msg, Msg::NoOp) {
        return (state, Vec::new());
    }
    update_batch(state, [msg])
}

/// Applies every message of a drained batch, then issues the requests the
/// settled state calls for. A burst of input changes costs one fetch.
pub fn update_batch(
    mut state: ViewState,
    msgs: impl IntoIterator<Item = Msg>,
) -> (ViewState, Vec<Effect>) {
    let mut effects = Vec::new();
    for msg in msgs {
        effects.extend(apply(&mut state, msg));
    }
    effects.extend(state.reconcile());
    (state, effects)
}

fn apply(state: &mut ViewState, msg: Msg) -> Vec<Effect> {
    match msg {
        Msg::LocationChanged(location) => {
            state.set_location(location);
            Vec::new()
        }
        Msg::PreferencesChanged(prefs) => {
            state.set_preferences(prefs);
            Vec::new()
        }
        Msg::SearchChanged(text) => {
            state.set_search(text);
            Vec::new()
        }
        Msg::PageSelected(page) => {
            state.select_page(page);
            Vec::new()
        }
        Msg::RefreshRequested => {
            state.request_refresh();
            Vec::new()
        }
        Msg::EnqueueInputChanged(text) => {
            state.set_enqueue_input(text);
            Vec::new()
        }
        Msg::EnqueueSubmitted => {
            let text = state.enqueue_input().trim();
            if text.is_empty() {
                return Vec::new();
            }
            archivist_info!("SubmitUrl len={}", text.len());
            vec![Effect::SubmitUrl {
                text: text.to_string(),
                auto_start: true,
                priority: false,
            }]
        }
        Msg::BulkStatusRequested(status) => {
            let filter = state.filters().bulk_filter();
            archivist_info!("UpdateQueueByFilter status={} filter={:?}", status, filter);
            vec![Effect::UpdateQueueByFilter { filter, status }]
        }
        Msg::BulkDeleteRequested => {
            let filter = state.filters().bulk_filter();
            archivist_info!("DeleteQueueByFilter filter={:?}", filter);
            vec![Effect::DeleteQueueByFilter { filter }]
        }
        Msg::ItemStatusRequested { youtube_id, status } => {
            if youtube_id.trim().is_empty() {
                return Vec::new();
            }
            vec![Effect::UpdateItem { youtube_id, status }]
        }
        Msg::ItemDeleteRequested { youtube_id } => {
            if youtube_id.trim().is_empty() {
                return Vec::new();
            }
            vec![Effect::DeleteItem { youtube_id }]
        }
        Msg::ViewStyleSelected(style) => store_preference(
            state,
            PreferenceKey::ViewStyleDownloads,
            PreferenceValue::ViewStyle(style),
        ),
        Msg::GridItemsSelected(items) => store_preference(
            state,
            PreferenceKey::GridItems,
            PreferenceValue::GridItems(items),
        ),
        Msg::ShowIgnoredDefaultSelected(flag) => store_preference(
            state,
            PreferenceKey::ShowIgnoredOnly,
            PreferenceValue::Flag(flag),
        ),
        Msg::NotificationDismissed => {
            state.dismiss_notification();
            Vec::new()
        }
        Msg::QueueLoaded { ticket, result } => state.apply_queue_loaded(ticket, result),
        Msg::AggregatesLoaded { scope, result } => {
            state.apply_aggregates_loaded(scope, result);
            Vec::new()
        }
        Msg::UrlSubmitted { text, result } => match result {
            Ok(()) => {
                state.clear_enqueue_input(&text);
                state.request_refresh();
                Vec::new()
            }
            Err(failure) => {
                archivist_warn!("SubmitUrl failed: {}", failure);
                vec![state.notify(Notification::error(format!(
                    "Failed to add {text} to the queue: {failure}"
                )))]
            }
        },
        Msg::MutationFinished { kind, result } => {
            // The server may have applied part of the change either way.
            state.request_refresh();
            match result {
                Ok(()) => {
                    archivist_debug!("{} finished", kind.label());
                    Vec::new()
                }
                Err(failure) => {
                    archivist_warn!("{} failed: {}", kind.label(), failure);
                    vec![state.notify(Notification::error(format!(
                        "The {} failed: {failure}",
                        kind.label()
                    )))]
                }
            }
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    }
}

fn store_preference(
    state: &ViewState,
    key: PreferenceKey,
    value: PreferenceValue,
) -> Vec<Effect> {
    let value = match validate_preference(key, value) {
        Ok(value) => value,
        Err(err) => {
            archivist_warn!("Rejected preference: {}", err);
            return Vec::new();
        }
    };
    let prefs = state.preferences();
    let unchanged = match value {
        PreferenceValue::ViewStyle(style) => prefs.view_style_downloads == style,
        PreferenceValue::GridItems(items) => prefs.grid_items == items,
        PreferenceValue::Flag(flag) => prefs.show_ignored_only == flag,
    };
    if unchanged {
        return Vec::new();
    }
    vec![Effect::StorePreference { key, value }]
}
