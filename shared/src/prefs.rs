use serde::{Deserialize, Serialize};

use crate::colors::Format;
use crate::storage::{self, FORMAT_KEY, GRID_SIZE_KEY, KeyValueStore, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Follow the system color scheme until the user picks one.
    #[default]
    Auto,
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "auto" => Some(Self::Auto),
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn is_dark(self, system_dark: bool) -> bool {
        match self {
            Self::Auto => system_dark,
            Self::Light => false,
            Self::Dark => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridSize {
    #[default]
    Small,
    Large,
}

impl GridSize {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Large => "large",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "small" => Some(Self::Small),
            "large" => Some(Self::Large),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Small => Self::Large,
            Self::Large => Self::Small,
        }
    }
}

/// Site-wide preferences and favorites, loaded once and written through on change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    pub theme: ThemePreference,
    pub format: Format,
    pub grid_size: GridSize,
    pub favorites: Vec<String>,
    /// Debug builds only: unlimited lives and hints in the game.
    pub god_mode: bool,
}

impl AppState {
    pub fn load(store: &impl KeyValueStore) -> Self {
        let theme = store
            .get(THEME_KEY)
            .and_then(|raw| ThemePreference::parse(&raw))
            .unwrap_or_default();
        let format = store
            .get(FORMAT_KEY)
            .and_then(|raw| Format::parse(&raw))
            .unwrap_or_default();
        let grid_size = store
            .get(GRID_SIZE_KEY)
            .and_then(|raw| GridSize::parse(&raw))
            .unwrap_or_default();

        Self {
            theme,
            format,
            grid_size,
            favorites: dedup_keep_order(storage::load_favorites(store)),
            god_mode: false,
        }
    }

    /// Flip between light and dark. `Auto` flips away from what the system shows.
    pub fn toggle_theme(&mut self, store: &mut impl KeyValueStore, system_dark: bool) {
        self.theme = if self.theme.is_dark(system_dark) {
            ThemePreference::Light
        } else {
            ThemePreference::Dark
        };
        storage::save_raw(store, THEME_KEY, self.theme.as_str());
    }

    pub fn cycle_format(&mut self, store: &mut impl KeyValueStore) {
        self.format = self.format.next();
        storage::save_raw(store, FORMAT_KEY, self.format.as_str());
    }

    pub fn toggle_grid_size(&mut self, store: &mut impl KeyValueStore) {
        self.grid_size = self.grid_size.toggled();
        storage::save_raw(store, GRID_SIZE_KEY, self.grid_size.as_str());
    }

    pub fn is_favorite(&self, keyword: &str) -> bool {
        self.favorites.iter().any(|f| f == keyword)
    }

    pub fn add_favorite(&mut self, store: &mut impl KeyValueStore, keyword: &str) {
        if self.is_favorite(keyword) {
            return;
        }
        self.favorites.push(keyword.to_string());
        storage::save_favorites(store, &self.favorites);
    }

    pub fn remove_favorite(&mut self, store: &mut impl KeyValueStore, keyword: &str) {
        let before = self.favorites.len();
        self.favorites.retain(|f| f != keyword);
        if self.favorites.len() != before {
            storage::save_favorites(store, &self.favorites);
        }
    }
}

fn dedup_keep_order(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FAVORITES_KEY, MemoryStore};

    #[test]
    fn loads_defaults_from_empty_store() {
        let state = AppState::load(&MemoryStore::new());
        assert_eq!(state, AppState::default());
        assert_eq!(state.format, Format::Hex);
        assert_eq!(state.grid_size, GridSize::Small);
    }

    #[test]
    fn loads_stored_preferences_and_ignores_unknown_values() {
        let store = MemoryStore::new()
            .with_entry(THEME_KEY, "dark")
            .with_entry(FORMAT_KEY, "rgb")
            .with_entry(GRID_SIZE_KEY, "huge")
            .with_entry(FAVORITES_KEY, r#"["tan","red","tan"]"#);
        let state = AppState::load(&store);
        assert_eq!(state.theme, ThemePreference::Dark);
        assert_eq!(state.format, Format::Rgb);
        assert_eq!(state.grid_size, GridSize::Small);
        assert_eq!(state.favorites, vec!["tan", "red"]);
    }

    #[test]
    fn toggles_write_through() {
        let mut store = MemoryStore::new();
        let mut state = AppState::default();

        state.toggle_theme(&mut store, true);
        assert_eq!(state.theme, ThemePreference::Light);
        state.toggle_theme(&mut store, true);
        assert_eq!(state.theme, ThemePreference::Dark);
        assert_eq!(store.get(THEME_KEY).as_deref(), Some("dark"));

        state.cycle_format(&mut store);
        assert_eq!(state.format, Format::Keyword);
        assert_eq!(store.get(FORMAT_KEY).as_deref(), Some("keyword"));

        state.toggle_grid_size(&mut store);
        assert_eq!(store.get(GRID_SIZE_KEY).as_deref(), Some("large"));

        assert_eq!(AppState::load(&store).grid_size, GridSize::Large);
    }

    #[test]
    fn favorites_are_unique_and_ordered() {
        let mut store = MemoryStore::new();
        let mut state = AppState::default();
        state.add_favorite(&mut store, "red");
        state.add_favorite(&mut store, "blue");
        state.add_favorite(&mut store, "red");
        assert_eq!(state.favorites, vec!["red", "blue"]);
        assert!(state.is_favorite("blue"));

        state.remove_favorite(&mut store, "red");
        state.remove_favorite(&mut store, "missing");
        assert_eq!(state.favorites, vec!["blue"]);
        assert_eq!(storage::load_favorites(&store), vec!["blue"]);
    }

    #[test]
    fn failed_writes_keep_in_memory_changes() {
        let mut store = MemoryStore::failing();
        let mut state = AppState::default();
        state.add_favorite(&mut store, "plum");
        state.cycle_format(&mut store);
        assert!(state.is_favorite("plum"));
        assert_eq!(state.format, Format::Keyword);
    }
}
