//! Achievements
//!
//! Each achievement is a pure predicate over a `SessionSnapshot`. The tick
//! re-evaluates the whole table and unlocks anything newly satisfied.

use serde::{Deserialize, Serialize};

use crate::consts::{STARTING_LIVES, TARGETS_PER_LEVEL};

/// Stable achievement identifiers (serialised as the stored id strings)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstGoal,
    HatTrick,
    PerfectAim,
    ComboMaster,
    HighScorer,
    LevelUp,
    Survivor,
    Completionist,
}

impl AchievementId {
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementId::FirstGoal => "first_goal",
            AchievementId::HatTrick => "hat_trick",
            AchievementId::PerfectAim => "perfect_aim",
            AchievementId::ComboMaster => "combo_master",
            AchievementId::HighScorer => "high_scorer",
            AchievementId::LevelUp => "level_up",
            AchievementId::Survivor => "survivor",
            AchievementId::Completionist => "completionist",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        ACHIEVEMENTS.iter().map(|a| a.id).find(|id| id.as_str() == s)
    }

    pub fn info(&self) -> &'static Achievement {
        // Table order matches declaration order
        &ACHIEVEMENTS[*self as usize]
    }
}

/// Read-only view of the session that predicates inspect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub score: u64,
    pub level: u32,
    pub lives: u32,
    pub combo: u32,
    pub total_targets_hit: u32,
    pub targets_hit_this_level: u32,
    pub misses_this_level: u32,
    pub all_targets_cleared: bool,
}

/// Achievement metadata and its unlock condition
#[derive(Debug)]
pub struct Achievement {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub check: fn(&SessionSnapshot) -> bool,
}

/// Every achievement, in display order
pub static ACHIEVEMENTS: [Achievement; 8] = [
    Achievement {
        id: AchievementId::FirstGoal,
        title: "First Goal",
        description: "Hit your first target",
        icon: "⚽",
        check: |s| s.total_targets_hit >= 1,
    },
    Achievement {
        id: AchievementId::HatTrick,
        title: "Hat Trick",
        description: "Hit 3 targets in one game",
        icon: "🎩",
        check: |s| s.total_targets_hit >= 3,
    },
    Achievement {
        id: AchievementId::PerfectAim,
        title: "Perfect Aim",
        description: "Complete a level without missing",
        icon: "🎯",
        check: |s| s.targets_hit_this_level as usize == TARGETS_PER_LEVEL && s.misses_this_level == 0,
    },
    Achievement {
        id: AchievementId::ComboMaster,
        title: "Combo Master",
        description: "Get a 3x combo",
        icon: "⚡",
        check: |s| s.combo >= 3,
    },
    Achievement {
        id: AchievementId::HighScorer,
        title: "High Scorer",
        description: "Score 1000+ points",
        icon: "💯",
        check: |s| s.score >= 1000,
    },
    Achievement {
        id: AchievementId::LevelUp,
        title: "Level Up",
        description: "Reach level 2",
        icon: "📈",
        check: |s| s.level >= 2,
    },
    // Survivor and Completionist share the all-cleared trigger on purpose
    Achievement {
        id: AchievementId::Survivor,
        title: "Survivor",
        description: "Complete a level with all 3 lives",
        icon: "❤️",
        check: |s| s.all_targets_cleared && s.lives == STARTING_LIVES,
    },
    Achievement {
        id: AchievementId::Completionist,
        title: "Completionist",
        description: "Unlock all resume sections",
        icon: "🏆",
        check: |s| s.all_targets_cleared,
    },
];

/// Achievements satisfied by `snapshot` that are not in `unlocked`, in table order
pub fn newly_unlocked(snapshot: &SessionSnapshot, unlocked: &[AchievementId]) -> Vec<AchievementId> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| !unlocked.contains(&a.id) && (a.check)(snapshot))
        .map(|a| a.id)
        .collect()
}
