//! Effective filter resolution.
//!
//! The list, the aggregates and the bulk actions all read one [`FilterState`]
//! derived from the location query and the stored preferences. A query
//! parameter that is present always wins over the stored preference.

use url::Url;

use crate::prefs::UserPreferences;
use crate::types::{BulkFilter, QueueQuery, StatusScope};

/// Raw query parameters of the current location.
///
/// Values are kept verbatim; interpretation happens in [`resolve_filters`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocationQuery {
    pub channel: Option<String>,
    pub ignored: Option<String>,
    pub vid_type: Option<String>,
    pub error: Option<String>,
}

impl LocationQuery {
    /// Parses either a bare query string (`?channel=abc&ignored=true`) or a
    /// full URL. The first occurrence of a repeated key wins.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(url) = Url::parse(raw) {
            return Self::from_pairs(url.query_pairs());
        }
        let query = raw.trim_start_matches('?');
        Self::from_pairs(url::form_urlencoded::parse(query.as_bytes()))
    }

    fn from_pairs<'a>(
        pairs: impl Iterator<Item = (std::borrow::Cow<'a, str>, std::borrow::Cow<'a, str>)>,
    ) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "channel" => &mut query.channel,
                "ignored" => &mut query.ignored,
                "vid-type" => &mut query.vid_type,
                "error" => &mut query.error,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        query
    }
}

/// The single effective filter set every component works from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub channel_id: Option<String>,
    pub vid_type: Option<String>,
    pub error: Option<bool>,
    pub show_ignored: bool,
    pub search_text: String,
}

impl FilterState {
    pub fn scope(&self) -> StatusScope {
        StatusScope::from_show_ignored(self.show_ignored)
    }

    /// List request for `page` under these filters.
    pub fn query(&self, page: u32) -> QueueQuery {
        QueueQuery {
            page,
            channel_id: self.channel_id.clone(),
            vid_type: self.vid_type.clone(),
            error: self.error,
            show_ignored: self.show_ignored,
            search: self.search_text.clone(),
        }
    }

    /// Predicate addressed by bulk mutations. Search text does not narrow it.
    pub fn bulk_filter(&self) -> BulkFilter {
        BulkFilter {
            scope: self.scope(),
            channel_id: self.channel_id.clone(),
            vid_type: self.vid_type.clone(),
            error: self.error,
        }
    }
}

/// Derives the effective filters. Pure; never fails.
pub fn resolve_filters(
    location: &LocationQuery,
    prefs: &UserPreferences,
    search_text: &str,
) -> FilterState {
    let show_ignored = match location.ignored.as_deref() {
        Some(raw) => raw == "true",
        None => prefs.show_ignored_only,
    };

    FilterState {
        channel_id: non_empty(location.channel.as_deref()),
        vid_type: non_empty(location.vid_type.as_deref()),
        error: location.error.as_deref().and_then(parse_flag),
        show_ignored,
        search_text: search_text.trim().to_string(),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}
