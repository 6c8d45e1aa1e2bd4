//! Lifetime progress
//!
//! Read at session start, merged with the finished session and written back
//! on game over and level clear. Every value is stored as its own string key.

use serde::{Deserialize, Serialize};

use crate::persistence::KeyValueStore;
use crate::sim::{AchievementId, GameState};

/// Storage keys
pub mod keys {
    pub const BEST_SCORE: &str = "bestScore";
    pub const BEST_COMBO: &str = "bestCombo";
    pub const TOTAL_TARGETS_HIT: &str = "totalTargetsHit";
    pub const UNLOCKED_ACHIEVEMENTS: &str = "unlockedAchievements";
    pub const GAMES_PLAYED: &str = "gamesPlayed";
    pub const HAS_SEEN_TUTORIAL: &str = "hasSeenTutorial";
}

/// Stored lifetime stats
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub best_score: u64,
    pub best_combo: u32,
    pub total_targets_hit: u64,
    /// Achievement ids as stored; ids from other versions are kept verbatim
    pub unlocked_achievements: Vec<String>,
    pub games_played: u32,
    pub has_seen_tutorial: bool,
}

impl Progress {
    /// Read progress; unreadable values fall back to their defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        let progress = Self {
            best_score: read_number(store, keys::BEST_SCORE),
            best_combo: read_number(store, keys::BEST_COMBO),
            total_targets_hit: read_number(store, keys::TOTAL_TARGETS_HIT),
            unlocked_achievements: read_achievements(store),
            games_played: read_number(store, keys::GAMES_PLAYED),
            has_seen_tutorial: store.get_item(keys::HAS_SEEN_TUTORIAL).is_some(),
        };
        log::info!(
            "Loaded progress: best score {}, {} games, {} achievements",
            progress.best_score,
            progress.games_played,
            progress.unlocked_achievements.len()
        );
        progress
    }

    /// Write every key
    pub fn save(&self, store: &mut impl KeyValueStore) {
        store.set_item(keys::BEST_SCORE, &self.best_score.to_string());
        store.set_item(keys::BEST_COMBO, &self.best_combo.to_string());
        store.set_item(keys::TOTAL_TARGETS_HIT, &self.total_targets_hit.to_string());
        match serde_json::to_string(&self.unlocked_achievements) {
            Ok(json) => store.set_item(keys::UNLOCKED_ACHIEVEMENTS, &json),
            Err(e) => log::warn!("Could not encode achievements: {}", e),
        }
        store.set_item(keys::GAMES_PLAYED, &self.games_played.to_string());
        if self.has_seen_tutorial {
            store.set_item(keys::HAS_SEEN_TUTORIAL, "true");
        }
    }

    /// Fold a finished session into these stats
    pub fn merge_session(&mut self, state: &GameState) {
        self.best_score = self.best_score.max(state.score);
        self.best_combo = self.best_combo.max(state.combo.best);
        self.total_targets_hit += u64::from(state.total_targets_hit);

        // Session unlocks first, then anything stored that the session lacks
        let mut merged: Vec<String> = state.unlocked.iter().map(|id| id.as_str().to_string()).collect();
        for id in self.unlocked_achievements.drain(..) {
            if !merged.contains(&id) {
                merged.push(id);
            }
        }
        self.unlocked_achievements = merged;
        self.games_played += 1;
    }

    /// Merge the session into whatever is stored and write it back
    pub fn record_session(store: &mut impl KeyValueStore, state: &GameState) -> Self {
        let mut progress = Self::load(store);
        progress.merge_session(state);
        progress.save(store);
        log::info!(
            "Progress saved (best score {}, {} games)",
            progress.best_score,
            progress.games_played
        );
        progress
    }

    /// Remember that the tutorial has been seen
    pub fn mark_tutorial_seen(store: &mut impl KeyValueStore) {
        store.set_item(keys::HAS_SEEN_TUTORIAL, "true");
    }

    /// Achievement ids this version knows about
    pub fn known_achievements(&self) -> Vec<AchievementId> {
        self.unlocked_achievements
            .iter()
            .filter_map(|s| AchievementId::from_str(s))
            .collect()
    }

    /// Seed a fresh session with lifetime unlocks and the tutorial flag
    pub fn apply(&self, state: &mut GameState) {
        for id in self.known_achievements() {
            if !state.unlocked.contains(&id) {
                state.unlocked.push(id);
            }
        }
        state.show_tutorial = !self.has_seen_tutorial;
    }
}

fn read_number<T: std::str::FromStr + Default>(store: &impl KeyValueStore, key: &str) -> T {
    match store.get_item(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring unreadable {} value {:?}", key, raw);
            T::default()
        }),
        None => T::default(),
    }
}

fn read_achievements(store: &impl KeyValueStore) -> Vec<String> {
    let Some(raw) = store.get_item(keys::UNLOCKED_ACHIEVEMENTS) else {
        return Vec::new();
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        log::warn!("Ignoring unreadable achievement list: {}", e);
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::tuning::Tuning;

    fn finished_session(score: u64, best_combo: u32, hits: u32, unlocked: &[AchievementId]) -> GameState {
        let mut state = GameState::new(1, 800.0, 900.0, Tuning::default());
        state.score = score;
        state.combo.best = best_combo;
        state.total_targets_hit = hits;
        state.unlocked = unlocked.to_vec();
        state
    }

    #[test]
    fn test_empty_store_loads_defaults() {
        let store = MemoryStore::new();
        assert_eq!(Progress::load(&store), Progress::default());
    }

    #[test]
    fn test_garbage_values_fall_back() {
        let mut store = MemoryStore::new();
        store.set_item(keys::BEST_SCORE, "lots");
        store.set_item(keys::GAMES_PLAYED, "-3");
        store.set_item(keys::UNLOCKED_ACHIEVEMENTS, "{broken");
        store.set_item(keys::BEST_COMBO, " 4 ");

        let progress = Progress::load(&store);
        assert_eq!(progress.best_score, 0);
        assert_eq!(progress.games_played, 0);
        assert!(progress.unlocked_achievements.is_empty());
        assert_eq!(progress.best_combo, 4);
    }

    #[test]
    fn test_record_session_merges() {
        let mut store = MemoryStore::new();
        store.set_item(keys::BEST_SCORE, "900");
        store.set_item(keys::BEST_COMBO, "5");
        store.set_item(keys::TOTAL_TARGETS_HIT, "7");
        store.set_item(keys::UNLOCKED_ACHIEVEMENTS, r#"["hat_trick","first_goal","legacy"]"#);
        store.set_item(keys::GAMES_PLAYED, "2");

        let state = finished_session(1200, 3, 4, &[AchievementId::FirstGoal, AchievementId::HighScorer]);
        let progress = Progress::record_session(&mut store, &state);

        assert_eq!(progress.best_score, 1200);
        assert_eq!(progress.best_combo, 5);
        assert_eq!(progress.total_targets_hit, 11);
        assert_eq!(progress.games_played, 3);
        assert_eq!(
            progress.unlocked_achievements,
            vec!["first_goal", "high_scorer", "hat_trick", "legacy"]
        );

        assert_eq!(store.get_item(keys::BEST_SCORE).as_deref(), Some("1200"));
        assert_eq!(store.get_item(keys::TOTAL_TARGETS_HIT).as_deref(), Some("11"));
        assert_eq!(
            store.get_item(keys::UNLOCKED_ACHIEVEMENTS).as_deref(),
            Some(r#"["first_goal","high_scorer","hat_trick","legacy"]"#)
        );
        assert_eq!(store.get_item(keys::GAMES_PLAYED).as_deref(), Some("3"));
    }

    #[test]
    fn test_apply_seeds_session() {
        let mut store = MemoryStore::new();
        store.set_item(keys::UNLOCKED_ACHIEVEMENTS, r#"["level_up","legacy"]"#);
        let progress = Progress::load(&store);

        let mut state = GameState::new(1, 800.0, 900.0, Tuning::default());
        progress.apply(&mut state);
        assert_eq!(state.unlocked, vec![AchievementId::LevelUp]);
        assert!(state.show_tutorial);

        Progress::mark_tutorial_seen(&mut store);
        let progress = Progress::load(&store);
        progress.apply(&mut state);
        assert!(!state.show_tutorial);
        assert_eq!(state.unlocked, vec![AchievementId::LevelUp]);
    }
}
