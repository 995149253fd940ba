mod common;

use archivist_core::{
    format_total_hits, update, Effect, FetchPhase, LocationQuery, Msg, Pagination,
    PreferenceKey, PreferenceValue, QueueStatus, UserPreferences, ViewState, ViewStyle,
    GRID_ITEMS_MAX, TOTAL_HITS_CAP,
};
use common::{init_logging, item, page, prefs, respond_all, settled};
use pretty_assertions::assert_eq;

#[test]
fn capped_total_is_marked_with_plus() {
    assert_eq!(format_total_hits(TOTAL_HITS_CAP), "10000+");
    assert_eq!(format_total_hits(9_999), "9999");
    assert_eq!(format_total_hits(0), "0");
}

#[test]
fn headline_names_channel_and_type_filters() {
    init_logging();
    let state = ViewState::new(
        LocationQuery::parse("channel=UC1&vid-type=shorts"),
        UserPreferences::default(),
    );
    let (state, effects) = update(state, Msg::Tick);
    let (state, _) = respond_all(state, effects, |_| {
        page(
            vec![
                item("UC1", "a", QueueStatus::Pending),
                item("UC1", "b", QueueStatus::Pending),
            ],
            10_000,
        )
    });

    let view = state.view();
    assert_eq!(view.title, "Downloads for Channel UC1");
    assert_eq!(
        view.headline.as_deref(),
        Some("Total videos in queue: 10000+ - from channel Channel UC1 - by type shorts")
    );
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.phase, FetchPhase::Clean);
}

#[test]
fn nothing_loaded_yet_has_no_headline() {
    let view = ViewState::default().view();
    assert_eq!(view.title, "Downloads");
    assert_eq!(view.headline, None);
    assert_eq!(view.pagination, None);
    assert_eq!(view.phase, FetchPhase::Dirty);
}

#[test]
fn duplicate_items_in_one_response_are_dropped() {
    init_logging();
    let (state, effects) = update(ViewState::default(), Msg::Tick);
    let (state, _) = respond_all(state, effects, |_| {
        page(
            vec![
                item("c1", "same", QueueStatus::Pending),
                item("c1", "other", QueueStatus::Pending),
                item("c1", "same", QueueStatus::Priority),
            ],
            3,
        )
    });

    let ids: Vec<_> = state.view().rows.iter().map(|row| row.youtube_id.clone()).collect();
    assert_eq!(ids, vec!["same".to_string(), "other".to_string()]);
    assert_eq!(state.view().rows[0].status, QueueStatus::Pending);
}

#[test]
fn last_page_falls_back_to_hit_count() {
    let derived = Pagination {
        page_size: 12,
        total_hits: 25,
        last_page: None,
    };
    assert_eq!(derived.last_page(), 3);

    let reported = Pagination {
        last_page: Some(7),
        ..derived.clone()
    };
    assert_eq!(reported.last_page(), 7);

    let empty = Pagination {
        total_hits: 0,
        ..derived
    };
    assert_eq!(empty.last_page(), 1);
}

#[test]
fn grid_preference_shapes_layout_classes() {
    let state = settled("", prefs(false, 1), 4);
    assert_eq!(state.view().layout.list_class, "video-list list");

    let grid = UserPreferences {
        view_style_downloads: ViewStyle::Grid,
        grid_items: 5,
        show_ignored_only: false,
        version: 2,
    };
    let (mut state, effects) = update(state, Msg::PreferencesChanged(grid));
    // Layout is not a list filter.
    assert!(effects.is_empty());
    assert!(state.consume_dirty());

    let layout = state.view().layout;
    assert_eq!(layout.container_class, "boxed-content boxed-5");
    assert_eq!(layout.list_class, "video-list grid grid-5");
}

#[test]
fn preference_selection_goes_through_the_store() {
    let state = settled("", prefs(false, 1), 4);

    let (state, effects) = update(state, Msg::ViewStyleSelected(ViewStyle::Grid));
    assert_eq!(
        effects,
        vec![Effect::StorePreference {
            key: PreferenceKey::ViewStyleDownloads,
            value: PreferenceValue::ViewStyle(ViewStyle::Grid),
        }]
    );
    // Nothing changes locally until the store publishes a snapshot.
    assert_eq!(state.preferences().view_style_downloads, ViewStyle::List);

    let (state, effects) = update(state, Msg::ViewStyleSelected(ViewStyle::List));
    assert!(effects.is_empty());

    let (_state, effects) = update(state, Msg::ShowIgnoredDefaultSelected(true));
    assert_eq!(
        effects,
        vec![Effect::StorePreference {
            key: PreferenceKey::ShowIgnoredOnly,
            value: PreferenceValue::Flag(true),
        }]
    );
}

#[test]
fn grid_size_is_clamped_before_comparing_with_stored_value() {
    let widest = UserPreferences {
        grid_items: GRID_ITEMS_MAX,
        version: 1,
        ..UserPreferences::default()
    };
    let state = settled("", widest, 4);
    let (state, effects) = update(state, Msg::GridItemsSelected(12));
    assert!(effects.is_empty());
    let (_state, effects) = update(state, Msg::GridItemsSelected(GRID_ITEMS_MAX));
    assert!(effects.is_empty());

    let state = settled("", prefs(false, 1), 4);
    let (state, effects) = update(state, Msg::GridItemsSelected(0));
    assert!(effects.is_empty());
    let (_state, effects) = update(state, Msg::GridItemsSelected(9));
    assert_eq!(
        effects,
        vec![Effect::StorePreference {
            key: PreferenceKey::GridItems,
            value: PreferenceValue::GridItems(GRID_ITEMS_MAX),
        }]
    );
}

#[test]
fn notification_can_be_dismissed() {
    let state = settled("", prefs(false, 1), 4);
    let (state, effects) = update(state, Msg::RefreshRequested);
    let ticket = match &effects[0] {
        Effect::LoadQueue { ticket, .. } => *ticket,
        other => panic!("unexpected effect {other:?}"),
    };
    let (state, _) = update(
        state,
        Msg::QueueLoaded {
            ticket,
            result: Err(archivist_core::RequestFailure::new("boom")),
        },
    );
    assert!(state.view().notification.is_some());

    let (mut state, effects) = update(state, Msg::NotificationDismissed);
    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    assert!(state.view().notification.is_none());
}
