use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

pub const GRID_ITEMS_MIN: u8 = 3;
pub const GRID_ITEMS_MAX: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewStyle {
    #[default]
    List,
    Grid,
}

impl ViewStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewStyle::List => "list",
            ViewStyle::Grid => "grid",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "list" => Some(ViewStyle::List),
            "grid" => Some(ViewStyle::Grid),
            _ => None,
        }
    }
}

/// Keys understood by the preference store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PreferenceKey {
    ViewStyleDownloads,
    GridItems,
    ShowIgnoredOnly,
}

impl PreferenceKey {
    pub const ALL: [PreferenceKey; 3] = [
        PreferenceKey::ViewStyleDownloads,
        PreferenceKey::GridItems,
        PreferenceKey::ShowIgnoredOnly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PreferenceKey::ViewStyleDownloads => "view_style_downloads",
            PreferenceKey::GridItems => "grid_items",
            PreferenceKey::ShowIgnoredOnly => "show_ignored_only",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == raw)
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceValue {
    ViewStyle(ViewStyle),
    GridItems(u8),
    Flag(bool),
}

impl PreferenceValue {
    pub fn fits(self, key: PreferenceKey) -> bool {
        matches!(
            (key, self),
            (PreferenceKey::ViewStyleDownloads, PreferenceValue::ViewStyle(_))
                | (PreferenceKey::GridItems, PreferenceValue::GridItems(_))
                | (PreferenceKey::ShowIgnoredOnly, PreferenceValue::Flag(_))
        )
    }

    /// Textual form used by file-backed stores.
    pub fn encode(self) -> String {
        match self {
            PreferenceValue::ViewStyle(style) => style.as_str().to_string(),
            PreferenceValue::GridItems(items) => items.to_string(),
            PreferenceValue::Flag(flag) => flag.to_string(),
        }
    }

    pub fn decode(key: PreferenceKey, raw: &str) -> Option<Self> {
        match key {
            PreferenceKey::ViewStyleDownloads => {
                ViewStyle::parse(raw).map(PreferenceValue::ViewStyle)
            }
            PreferenceKey::GridItems => raw.parse().ok().map(PreferenceValue::GridItems),
            PreferenceKey::ShowIgnoredOnly => raw.parse().ok().map(PreferenceValue::Flag),
        }
    }

    fn normalized(self) -> Self {
        match self {
            PreferenceValue::GridItems(items) => {
                PreferenceValue::GridItems(items.clamp(GRID_ITEMS_MIN, GRID_ITEMS_MAX))
            }
            other => other,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreferenceError {
    #[error("value {value:?} does not fit preference {key}")]
    TypeMismatch {
        key: PreferenceKey,
        value: PreferenceValue,
    },
    #[error("preference storage failed: {0}")]
    Storage(String),
}

/// Versioned key-value store holding the user's view preferences.
///
/// Every successful `set` bumps `version`, so readers can tell a fresh
/// snapshot from a stale one.
pub trait PreferenceStore {
    fn get(&self, key: PreferenceKey) -> Option<PreferenceValue>;
    fn set(&mut self, key: PreferenceKey, value: PreferenceValue) -> Result<(), PreferenceError>;
    fn version(&self) -> u64;
}

/// Checks `value` against `key` and applies the store's value rules.
pub fn validate_preference(
    key: PreferenceKey,
    value: PreferenceValue,
) -> Result<PreferenceValue, PreferenceError> {
    if value.fits(key) {
        Ok(value.normalized())
    } else {
        Err(PreferenceError::TypeMismatch { key, value })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<PreferenceKey, PreferenceValue>,
    version: u64,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: PreferenceKey) -> Option<PreferenceValue> {
        self.values.get(&key).copied()
    }

    fn set(&mut self, key: PreferenceKey, value: PreferenceValue) -> Result<(), PreferenceError> {
        let value = validate_preference(key, value)?;
        self.values.insert(key, value);
        self.version += 1;
        Ok(())
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Snapshot of the preferences the queue view reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPreferences {
    pub view_style_downloads: ViewStyle,
    pub grid_items: u8,
    pub show_ignored_only: bool,
    pub version: u64,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            view_style_downloads: ViewStyle::List,
            grid_items: GRID_ITEMS_MIN,
            show_ignored_only: false,
            version: 0,
        }
    }
}

impl UserPreferences {
    /// Reads a snapshot, falling back to defaults for missing keys.
    pub fn from_store(store: &dyn PreferenceStore) -> Self {
        let mut prefs = Self {
            version: store.version(),
            ..Self::default()
        };
        if let Some(PreferenceValue::ViewStyle(style)) =
            store.get(PreferenceKey::ViewStyleDownloads)
        {
            prefs.view_style_downloads = style;
        }
        if let Some(PreferenceValue::GridItems(items)) = store.get(PreferenceKey::GridItems) {
            prefs.grid_items = items.clamp(GRID_ITEMS_MIN, GRID_ITEMS_MAX);
        }
        if let Some(PreferenceValue::Flag(flag)) = store.get(PreferenceKey::ShowIgnoredOnly) {
            prefs.show_ignored_only = flag;
        }
        prefs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_bumps_version_and_clamps_grid_items() {
        let mut store = MemoryPreferenceStore::new();
        assert_eq!(store.version(), 0);

        store
            .set(PreferenceKey::GridItems, PreferenceValue::GridItems(12))
            .unwrap();
        assert_eq!(store.version(), 1);
        assert_eq!(
            store.get(PreferenceKey::GridItems),
            Some(PreferenceValue::GridItems(GRID_ITEMS_MAX))
        );
    }

    #[test]
    fn mismatched_value_is_rejected_without_version_bump() {
        let mut store = MemoryPreferenceStore::new();
        let err = store
            .set(PreferenceKey::ShowIgnoredOnly, PreferenceValue::GridItems(4))
            .unwrap_err();
        assert!(matches!(err, PreferenceError::TypeMismatch { .. }));
        assert_eq!(store.version(), 0);
        assert_eq!(store.get(PreferenceKey::ShowIgnoredOnly), None);
    }

    #[test]
    fn snapshot_reads_store_values() {
        let mut store = MemoryPreferenceStore::new();
        store
            .set(
                PreferenceKey::ViewStyleDownloads,
                PreferenceValue::ViewStyle(ViewStyle::Grid),
            )
            .unwrap();
        store
            .set(PreferenceKey::ShowIgnoredOnly, PreferenceValue::Flag(true))
            .unwrap();

        let prefs = UserPreferences::from_store(&store);
        assert_eq!(prefs.view_style_downloads, ViewStyle::Grid);
        assert!(prefs.show_ignored_only);
        assert_eq!(prefs.grid_items, GRID_ITEMS_MIN);
        assert_eq!(prefs.version, 2);
    }

    #[test]
    fn values_decode_from_their_encoding() {
        for (key, value) in [
            (
                PreferenceKey::ViewStyleDownloads,
                PreferenceValue::ViewStyle(ViewStyle::Grid),
            ),
            (PreferenceKey::GridItems, PreferenceValue::GridItems(5)),
            (PreferenceKey::ShowIgnoredOnly, PreferenceValue::Flag(true)),
        ] {
            assert_eq!(PreferenceValue::decode(key, &value.encode()), Some(value));
        }
        assert_eq!(PreferenceValue::decode(PreferenceKey::GridItems, "many"), None);
    }
}
