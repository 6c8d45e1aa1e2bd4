//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod achievements;
pub mod aim;
pub mod autoplay;
pub mod collision;
pub mod physics;
pub mod state;
pub mod tick;

pub use achievements::{ACHIEVEMENTS, Achievement, AchievementId, SessionSnapshot, newly_unlocked};
pub use aim::{AimReadout, AimState, Launch, Viewport};
pub use autoplay::choose_launch;
pub use collision::{GroundContact, circle_circle_overlap, circle_rect_overlap, out_of_bounds, resolve_ground};
pub use physics::{integrate_step, predict_trajectory};
pub use state::{
    Ball, Combo, GameEvent, GamePhase, GameState, Keeper, Layout, Particle, Rect, Section, Target,
};
pub use tick::{TickInput, generate_level, next_level, tick};
