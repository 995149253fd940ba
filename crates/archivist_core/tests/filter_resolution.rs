use archivist_core::{resolve_filters, LocationQuery, UserPreferences};

fn prefs(show_ignored_only: bool) -> UserPreferences {
    UserPreferences {
        show_ignored_only,
        ..UserPreferences::default()
    }
}

#[test]
fn url_ignored_parameter_always_beats_preference() {
    for param in [None, Some("true"), Some("false")] {
        for stored in [true, false] {
            let location = LocationQuery {
                ignored: param.map(str::to_string),
                ..LocationQuery::default()
            };
            let filters = resolve_filters(&location, &prefs(stored), "");
            let expected = match param {
                Some(raw) => raw == "true",
                None => stored,
            };
            assert_eq!(
                filters.show_ignored, expected,
                "param={param:?} stored={stored}"
            );
        }
    }
}

#[test]
fn ignored_parameter_needs_exact_true() {
    for raw in ["TRUE", "1", "yes", " true", ""] {
        let location = LocationQuery::parse(&format!("ignored={raw}"));
        let filters = resolve_filters(&location, &prefs(true), "");
        assert!(!filters.show_ignored, "raw={raw:?}");
    }
}

#[test]
fn parses_query_string_with_or_without_question_mark() {
    let with = LocationQuery::parse("?channel=UC123&vid-type=shorts&error=true&ignored=true");
    let without = LocationQuery::parse("channel=UC123&vid-type=shorts&error=true&ignored=true");
    assert_eq!(with, without);
    assert_eq!(with.channel.as_deref(), Some("UC123"));
    assert_eq!(with.vid_type.as_deref(), Some("shorts"));
    assert_eq!(with.error.as_deref(), Some("true"));
    assert_eq!(with.ignored.as_deref(), Some("true"));
}

#[test]
fn parses_full_url_and_decodes_values() {
    let location = LocationQuery::parse(
        "https://archive.example.com/downloads/?channel=a%20b&vid_type=x&page=3",
    );
    assert_eq!(location.channel.as_deref(), Some("a b"));
    // Only `vid-type` is understood.
    assert_eq!(location.vid_type, None);
}

#[test]
fn first_occurrence_of_a_key_wins() {
    let location = LocationQuery::parse("channel=first&channel=second");
    assert_eq!(location.channel.as_deref(), Some("first"));
}

#[test]
fn absent_or_malformed_values_mean_not_applied() {
    let location = LocationQuery::parse("channel=&vid-type=%20&error=maybe");
    let filters = resolve_filters(&location, &prefs(false), "  ");
    assert_eq!(filters.channel_id, None);
    assert_eq!(filters.vid_type, None);
    assert_eq!(filters.error, None);
    assert_eq!(filters.search_text, "");

    let filters = resolve_filters(&LocationQuery::parse("error=false"), &prefs(false), " cats ");
    assert_eq!(filters.error, Some(false));
    assert_eq!(filters.search_text, "cats");
}

#[test]
fn resolved_filters_build_list_query() {
    let location = LocationQuery::parse("channel=abc&ignored=true");
    let filters = resolve_filters(&location, &prefs(false), "music");
    let query = filters.query(2);
    assert_eq!(query.page, 2);
    assert_eq!(query.channel_id.as_deref(), Some("abc"));
    assert!(query.show_ignored);
    assert_eq!(query.scope().as_str(), "ignore");
    assert_eq!(query.search, "music");
}
