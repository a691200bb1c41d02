//! String-keyed persistence boundary for favorites, the game session, high scores and
//! display preferences.
//!
//! Reads validate what they find and fall back to defaults on anything unexpected.
//! Writes are fire-and-forget: a failure is logged and the in-memory state stays as is.

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::game::{GameSession, HighScores};

pub const FAVORITES_KEY: &str = "favorites";
pub const GAME_STATE_KEY: &str = "game-state";
pub const HIGH_SCORES_KEY: &str = "high-scores";
pub const THEME_KEY: &str = "theme-preference";
pub const FORMAT_KEY: &str = "format-preference";
pub const GRID_SIZE_KEY: &str = "grid-size-preference";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("write rejected for key {key}: {reason}")]
    WriteRejected { key: String, reason: String },
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Raw get/set over string blobs. The browser implementation wraps `localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every `set` fails, for exercising the write-failure path.
    pub fn failing() -> Self {
        Self {
            entries: HashMap::new(),
            fail_writes: true,
        }
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::WriteRejected {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            });
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Parse the JSON blob under `key`, or `None` if it is absent or malformed.
pub fn load_json<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(key, error = %e, "discarding malformed stored value");
            None
        }
    }
}

pub fn save_json<T: Serialize + ?Sized>(store: &mut impl KeyValueStore, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(StoreError::from)
        .and_then(|json| store.set(key, &json));
    if let Err(e) = result {
        tracing::warn!(key, error = %e, "failed to persist value");
    }
}

/// Store a plain string (preference values are kept unquoted).
pub fn save_raw(store: &mut impl KeyValueStore, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        tracing::warn!(key, error = %e, "failed to persist value");
    }
}

pub fn load_favorites(store: &impl KeyValueStore) -> Vec<String> {
    load_json(store, FAVORITES_KEY).unwrap_or_default()
}

pub fn save_favorites(store: &mut impl KeyValueStore, favorites: &[String]) {
    save_json(store, FAVORITES_KEY, favorites);
}

/// The stored session if it parses and is internally consistent, else a fresh one.
pub fn load_session(store: &impl KeyValueStore) -> GameSession {
    match load_json::<GameSession>(store, GAME_STATE_KEY) {
        Some(session) if session.is_valid() => session,
        Some(_) => {
            tracing::debug!("discarding inconsistent stored game session");
            GameSession::default()
        }
        None => GameSession::default(),
    }
}

pub fn save_session(store: &mut impl KeyValueStore, session: &GameSession) {
    save_json(store, GAME_STATE_KEY, session);
}

pub fn load_high_scores(store: &impl KeyValueStore) -> HighScores {
    load_json::<HighScores>(store, HIGH_SCORES_KEY)
        .filter(HighScores::is_valid)
        .unwrap_or_default()
}

pub fn save_high_scores(store: &mut impl KeyValueStore, scores: &HighScores) {
    save_json(store, HIGH_SCORES_KEY, scores);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameMode, GameState};

    #[test]
    fn favorites_roundtrip_and_fallback() {
        let mut store = MemoryStore::new();
        assert!(load_favorites(&store).is_empty());
        save_favorites(&mut store, &["red".to_string(), "tan".to_string()]);
        assert_eq!(load_favorites(&store), vec!["red", "tan"]);

        let corrupt = MemoryStore::new().with_entry(FAVORITES_KEY, "{not json");
        assert!(load_favorites(&corrupt).is_empty());
        let wrong_shape = MemoryStore::new().with_entry(FAVORITES_KEY, r#"{"red":true}"#);
        assert!(load_favorites(&wrong_shape).is_empty());
    }

    #[test]
    fn invalid_state_field_falls_back_to_same_default_every_time() {
        let blob = r#"{"state":"paused","mode":"nametags","set":[],"index":0,
            "guesses":[],"score":0,"lives":3,"hints":3}"#;
        let store = MemoryStore::new().with_entry(GAME_STATE_KEY, blob);
        let first = load_session(&store);
        let second = load_session(&store);
        assert_eq!(first, GameSession::default());
        assert_eq!(first, second);
        assert_eq!(first.state, GameState::Menu);
        assert_eq!(first.mode, GameMode::Nametags);
    }

    #[test]
    fn inconsistent_session_is_discarded() {
        let blob = r#"{"state":"playing","mode":"nametags","set":[],"index":4,
            "guesses":[],"score":0,"lives":3,"hints":3}"#;
        let store = MemoryStore::new().with_entry(GAME_STATE_KEY, blob);
        assert_eq!(load_session(&store), GameSession::default());
    }

    #[test]
    fn high_scores_reject_missing_or_negative_fields() {
        let missing = MemoryStore::new().with_entry(HIGH_SCORES_KEY, r#"{"nametags":4}"#);
        assert_eq!(load_high_scores(&missing), HighScores::default());
        let negative =
            MemoryStore::new().with_entry(HIGH_SCORES_KEY, r#"{"nametags":-1,"sliders":2}"#);
        assert_eq!(load_high_scores(&negative), HighScores::default());
        let ok = MemoryStore::new().with_entry(HIGH_SCORES_KEY, r#"{"nametags":4,"sliders":2.5}"#);
        let scores = load_high_scores(&ok);
        assert_eq!(scores.get(GameMode::Nametags), 4.0);
        assert_eq!(scores.get(GameMode::Sliders), 2.5);
    }

    #[test]
    fn write_failures_do_not_panic() {
        let mut store = MemoryStore::failing();
        save_favorites(&mut store, &["red".to_string()]);
        save_raw(&mut store, THEME_KEY, "dark");
        assert!(store.get(FAVORITES_KEY).is_none());
        assert!(store.get(THEME_KEY).is_none());
    }
}
