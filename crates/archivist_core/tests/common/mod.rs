#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Once;

use archivist_core::{
    update, AggregationBucket, Effect, FetchTicket, LocationQuery, Msg, Pagination, QueueItem,
    QueuePage, QueueQuery, QueueStatus, StatusScope, UserPreferences, ViewState,
};

pub const PAGE_SIZE: u32 = 12;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(archivist_logging::initialize_for_tests);
}

pub fn prefs(show_ignored_only: bool, version: u64) -> UserPreferences {
    UserPreferences {
        show_ignored_only,
        version,
        ..UserPreferences::default()
    }
}

pub fn item(channel_id: &str, youtube_id: &str, status: QueueStatus) -> QueueItem {
    QueueItem {
        channel_id: channel_id.to_string(),
        channel_name: format!("Channel {channel_id}"),
        channel_indexed: true,
        youtube_id: youtube_id.to_string(),
        title: format!("Video {youtube_id}"),
        duration: "3:21".to_string(),
        published: Some("2024-05-01".to_string()),
        timestamp: Some(1_714_521_600),
        status,
        vid_type: "videos".to_string(),
        auto_start: false,
        message: None,
        thumbnail_url: format!("/cache/videos/{youtube_id}.jpg"),
        index: "ta_download".to_string(),
        score: 1.0,
    }
}

pub fn page(items: Vec<QueueItem>, total_hits: u64) -> QueuePage {
    QueuePage {
        items,
        pagination: Pagination {
            page_size: PAGE_SIZE,
            total_hits,
            last_page: None,
        },
    }
}

pub fn buckets(scope: StatusScope) -> Vec<AggregationBucket> {
    vec![AggregationBucket {
        channel_id: format!("{}-channel", scope.as_str()),
        channel_name: format!("{} channel", scope.as_str()),
        count: 3,
    }]
}

pub fn queue_loads(effects: &[Effect]) -> Vec<(FetchTicket, QueueQuery)> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::LoadQueue { ticket, query } => Some((*ticket, query.clone())),
            _ => None,
        })
        .collect()
}

pub fn aggregate_loads(effects: &[Effect]) -> Vec<StatusScope> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::LoadAggregates { scope } => Some(*scope),
            _ => None,
        })
        .collect()
}

/// Answers every request in `effects` (and whatever they trigger) until the
/// state asks for nothing more. Returns the state and all issued effects.
pub fn respond_all(
    mut state: ViewState,
    effects: Vec<Effect>,
    mut answer: impl FnMut(&QueueQuery) -> QueuePage,
) -> (ViewState, Vec<Effect>) {
    let mut pending: VecDeque<Effect> = effects.into();
    let mut issued = Vec::new();
    while let Some(effect) = pending.pop_front() {
        let msg = match &effect {
            Effect::LoadQueue { ticket, query } => Msg::QueueLoaded {
                ticket: *ticket,
                result: Ok(answer(query)),
            },
            Effect::LoadAggregates { scope } => Msg::AggregatesLoaded {
                scope: *scope,
                result: Ok(buckets(*scope)),
            },
            _ => continue,
        };
        issued.push(effect);
        let (next, more) = update(state, msg);
        state = next;
        pending.extend(more);
    }
    (state, issued)
}

/// A mounted view with every initial request answered with `total_hits`.
pub fn settled(location: &str, prefs: UserPreferences, total_hits: u64) -> ViewState {
    init_logging();
    let state = ViewState::new(LocationQuery::parse(location), prefs);
    let (state, effects) = update(state, Msg::Tick);
    let (state, _) = respond_all(state, effects, |_| page(Vec::new(), total_hits));
    state
}
