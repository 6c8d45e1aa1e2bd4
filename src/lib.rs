//! Kick Résumé - a kick-the-ball-at-a-target gamified résumé
//!
//! Core modules:
//! - `sim`: Deterministic simulation (flight, collisions, aiming, scoring)
//! - `persistence`: Key/value storage backends
//! - `progress`: Lifetime progress merged into storage at game end
//! - `content`: Résumé sections shown when targets are hit
//! - `tuning`: Data-driven physics and gameplay balance

pub mod content;
pub mod persistence;
pub mod progress;
pub mod sim;
pub mod tuning;

pub use content::ResumeData;
pub use progress::Progress;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation steps per second (one step per displayed frame)
    pub const TICK_RATE: u32 = 60;

    /// Goal frame size and offset from the bottom of the surface
    pub const GOAL_WIDTH: f32 = 280.0;
    pub const GOAL_HEIGHT: f32 = 100.0;
    pub const GOAL_BOTTOM_OFFSET: f32 = 485.0;

    /// Keeper rectangle; it stands slightly in front of the goal line
    pub const KEEPER_WIDTH: f32 = 60.0;
    pub const KEEPER_HEIGHT: f32 = 70.0;
    pub const KEEPER_DEPTH_OFFSET: f32 = 10.0;
    /// Gap between the keeper and each post
    pub const KEEPER_POST_MARGIN: f32 = 12.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 16.0;
    /// Ball spawn height above the bottom edge
    pub const BALL_SPAWN_OFFSET: f32 = 60.0;
    /// Cosmetic spin per frame while flying
    pub const BALL_ROTATION_STEP: f32 = 0.2;

    /// Targets
    pub const TARGETS_PER_LEVEL: usize = 4;
    pub const TARGET_BASE_RADIUS: f32 = 32.0;
    pub const TARGET_MIN_RADIUS: f32 = 12.0;
    /// Gap kept between target edges and the posts
    pub const TARGET_POST_MARGIN: f32 = 20.0;
    /// Vertical offset of target centres below the crossbar
    pub const TARGET_ROW_OFFSET: f32 = 40.0;
    pub const TARGET_GLOW_STEP: f32 = 0.05;

    /// Lives per game
    pub const STARTING_LIVES: u32 = 3;

    /// Particles per target hit and global cap
    pub const HIT_PARTICLES: usize = 20;
    pub const MAX_PARTICLES: usize = 256;

    /// Countdown lengths in ticks
    pub const KEEPER_SAVE_COOLDOWN_TICKS: u32 = super::ticks_from_ms(360);
    pub const LEVEL_COMPLETE_DELAY_TICKS: u32 = super::ticks_from_ms(650);
    pub const COMBO_NOTICE_TICKS: u32 = super::ticks_from_ms(1500);
    pub const ACHIEVEMENT_NOTICE_TICKS: u32 = super::ticks_from_ms(3000);
    pub const GOAL_FLASH_TICKS: u32 = 10;
}

/// Convert a duration in milliseconds to whole simulation ticks (rounded)
pub const fn ticks_from_ms(ms: u32) -> u32 {
    (ms * consts::TICK_RATE + 500) / 1000
}

/// Install the platform logger.
///
/// Native builds log through `env_logger` (`RUST_LOG` controls the level);
/// wasm builds forward to the browser console and install the panic hook.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_from_ms_matches_frame_basis() {
        assert_eq!(consts::KEEPER_SAVE_COOLDOWN_TICKS, 22);
        assert_eq!(consts::LEVEL_COMPLETE_DELAY_TICKS, 39);
        assert_eq!(consts::COMBO_NOTICE_TICKS, 90);
        assert_eq!(consts::ACHIEVEMENT_NOTICE_TICKS, 180);
        assert_eq!(ticks_from_ms(0), 0);
        assert_eq!(ticks_from_ms(8), 0);
        assert_eq!(ticks_from_ms(9), 1);
    }
}
