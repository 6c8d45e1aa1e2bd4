//! Game state and core simulation types
//!
//! The whole session lives in one `GameState`; `tick` is the only thing that
//! advances it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::achievements::{AchievementId, SessionSnapshot};
use super::aim::Launch;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Intro,
    /// Active gameplay
    Playing,
    /// Every target is down; the congrats screen shows once the delay runs out
    LevelComplete { delay_ticks: u32 },
    /// Out of lives
    GameOver,
}

/// Résumé section a target unlocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Projects,
    Skills,
    Education,
    Contact,
}

impl Section {
    /// Targets in left-to-right order
    pub const ALL: [Section; TARGETS_PER_LEVEL] = [
        Section::Projects,
        Section::Skills,
        Section::Education,
        Section::Contact,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Projects => "Projects",
            Section::Skills => "Skills",
            Section::Education => "Education",
            Section::Contact => "Contact",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Section::Projects => "💼",
            Section::Skills => "⚡",
            Section::Education => "🎓",
            Section::Contact => "📧",
        }
    }

    /// RGB colour, 0xRRGGBB
    pub fn color(&self) -> u32 {
        match self {
            Section::Projects => 0x3b82f6,
            Section::Skills => 0x8b5cf6,
            Section::Education => 0xf59e0b,
            Section::Contact => 0x10b981,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "projects" => Some(Section::Projects),
            "skills" => Some(Section::Skills),
            "education" => Some(Section::Education),
            "contact" => Some(Section::Contact),
            _ => None,
        }
    }
}

/// Axis-aligned rectangle in surface coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Closest point inside the rectangle to `p`
    #[inline]
    pub fn nearest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x.clamp(self.x, self.right()), p.y.clamp(self.y, self.bottom()))
    }
}

/// Surface geometry derived from the viewport size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub goal: Rect,
}

impl Layout {
    pub fn new(width: f32, height: f32) -> Self {
        let goal = Rect::new(
            (width - GOAL_WIDTH) / 2.0,
            height - GOAL_BOTTOM_OFFSET,
            GOAL_WIDTH,
            GOAL_HEIGHT,
        );
        Self { width, height, goal }
    }

    /// Ground plane (the bottom edge of the surface)
    #[inline]
    pub fn ground(&self) -> f32 {
        self.height
    }

    /// Where the ball rests before every kick
    pub fn ball_spawn(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height - BALL_SPAWN_OFFSET)
    }

    /// Keeper rectangle centred in the goal mouth
    pub fn keeper_rect(&self) -> Rect {
        Rect::new(
            self.goal.x + (self.goal.w - KEEPER_WIDTH) / 2.0,
            self.goal.bottom() - KEEPER_HEIGHT + KEEPER_DEPTH_OFFSET,
            KEEPER_WIDTH,
            KEEPER_HEIGHT,
        )
    }

    /// Leftmost and rightmost keeper x (top-left corner)
    pub fn keeper_range(&self) -> (f32, f32) {
        (
            self.goal.x + KEEPER_POST_MARGIN,
            self.goal.right() - KEEPER_WIDTH - KEEPER_POST_MARGIN,
        )
    }

    /// Horizontal span target edges must stay inside
    pub fn target_range(&self) -> (f32, f32) {
        (
            self.goal.x + TARGET_POST_MARGIN,
            self.goal.right() - TARGET_POST_MARGIN,
        )
    }

    /// Resting centre of the target at `index`
    pub fn target_home(&self, index: usize) -> Vec2 {
        let spacing = (self.goal.w - 2.0 * TARGET_POST_MARGIN) / (TARGETS_PER_LEVEL + 1) as f32;
        Vec2::new(
            self.goal.x + spacing * (index + 1) as f32,
            self.goal.y + TARGET_ROW_OFFSET,
        )
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub spin: f32,
    pub radius: f32,
    pub moving: bool,
    /// Render rotation (radians)
    pub rotation: f32,
}

impl Ball {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            pos: spawn,
            vel: Vec2::ZERO,
            spin: 0.0,
            radius: BALL_RADIUS,
            moving: false,
            rotation: 0.0,
        }
    }

    /// Put the ball back on the spot, at rest
    pub fn reset(&mut self, spawn: Vec2) {
        self.pos = spawn;
        self.vel = Vec2::ZERO;
        self.spin = 0.0;
        self.moving = false;
        self.rotation = 0.0;
    }

    /// Kick the ball from where it rests
    pub fn launch(&mut self, launch: &Launch) {
        self.vel = launch.velocity;
        self.spin = launch.spin;
        self.moving = true;
    }
}

/// A circular résumé target sliding across the goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub section: Section,
    pub center: Vec2,
    pub radius: f32,
    pub speed: f32,
    /// +1.0 moving right, -1.0 moving left
    pub dir: f32,
    pub active: bool,
    /// Pulse phase for the glow (cosmetic)
    pub glow_phase: f32,
}

impl Target {
    /// Slide one step, bouncing off the posts
    pub fn advance(&mut self, min_x: f32, max_x: f32) {
        self.center.x += self.speed * self.dir;
        if self.center.x - self.radius < min_x {
            self.center.x = min_x + self.radius;
            self.dir = 1.0;
        }
        if self.center.x + self.radius > max_x {
            self.center.x = max_x - self.radius;
            self.dir = -1.0;
        }
        self.glow_phase += TARGET_GLOW_STEP;
    }

    /// Glow intensity in [0.2, 0.8]
    pub fn glow_intensity(&self) -> f32 {
        0.5 + self.glow_phase.sin() * 0.3
    }
}

/// The goalkeeper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keeper {
    pub rect: Rect,
    pub speed: f32,
    pub dir: f32,
    /// Ticks before another save gets the full cue
    pub save_cooldown: u32,
}

impl Keeper {
    /// Patrol one step between the posts
    pub fn advance(&mut self, min_x: f32, max_x: f32) {
        self.rect.x += self.speed * self.dir;
        if self.rect.x <= min_x {
            self.dir = 1.0;
        }
        if self.rect.x >= max_x {
            self.dir = -1.0;
        }
        self.rect.x = self.rect.x.clamp(min_x, max_x);
        if self.save_cooldown > 0 {
            self.save_cooldown -= 1;
        }
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining frames
    pub life: f32,
    pub radius: f32,
    pub color: u32,
}

impl Particle {
    /// Opacity for rendering, fades over the last 60 frames
    pub fn alpha(&self) -> f32 {
        (self.life / 60.0).clamp(0.0, 1.0)
    }
}

/// Consecutive-hit tracking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combo {
    pub count: u32,
    /// Ticks left before the combo lapses
    pub timer: u32,
    pub best: u32,
}

impl Combo {
    /// Register a hit and restart the window
    pub fn hit(&mut self, window: u32) {
        self.count += 1;
        self.timer = window;
        self.best = self.best.max(self.count);
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.timer = 0;
    }

    /// Count down the window; returns true when the combo just lapsed
    pub fn advance(&mut self) -> bool {
        if self.timer > 0 {
            self.timer -= 1;
            if self.timer == 0 {
                let lapsed = self.count > 0;
                self.count = 0;
                return lapsed;
            }
        }
        false
    }
}

/// Something the host should react to (sound, popup, persistence)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Player pressed start
    Started,
    /// The ball left the spot
    Kicked,
    /// Ball went through a target
    TargetHit {
        section: Section,
        points: u64,
        combo: u32,
    },
    /// Keeper stopped the ball; `cue` is false for saves inside the
    /// keeper's cooldown, which hosts play without the celebration
    Saved { cue: bool },
    /// Ball came to rest or left the field without hitting anything
    Missed,
    /// Combo window ran out
    ComboLapsed,
    AchievementUnlocked(AchievementId),
    /// Congrats screen is due; progress should be persisted
    LevelCleared { level: u32, score: u64 },
    /// A fresh set of targets is up
    LevelStarted { level: u32 },
    /// Lives exhausted; progress should be persisted
    GameOver { score: u64, total_targets_hit: u32 },
    TutorialDismissed,
    Restarted,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub layout: Layout,
    pub phase: GamePhase,
    /// 1-based level
    pub level: u32,
    pub score: u64,
    pub lives: u32,
    /// Misses and saves this game
    pub attempts_used: u32,
    pub targets_hit_this_level: u32,
    pub misses_this_level: u32,
    pub total_targets_hit: u32,
    pub combo: Combo,
    pub ball: Ball,
    pub keeper: Keeper,
    pub targets: Vec<Target>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Lifetime unlocks, in unlock order
    pub unlocked: Vec<AchievementId>,
    /// Tutorial overlay is up
    pub show_tutorial: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub goal_flash_ticks: u32,
    pub combo_notice_ticks: u32,
    pub achievement_notice_ticks: u32,
    /// Most recent unlock, for the notification banner
    pub last_unlocked: Option<AchievementId>,
}

impl GameState {
    /// Create a session on the intro screen
    pub fn new(seed: u64, width: f32, height: f32, tuning: Tuning) -> Self {
        let layout = Layout::new(width, height);
        let mut rng = Pcg32::seed_from_u64(seed);
        let keeper_dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };

        let mut state = Self {
            seed,
            rng,
            layout,
            phase: GamePhase::Intro,
            level: 1,
            score: 0,
            lives: STARTING_LIVES,
            attempts_used: 0,
            targets_hit_this_level: 0,
            misses_this_level: 0,
            total_targets_hit: 0,
            combo: Combo::default(),
            ball: Ball::new(layout.ball_spawn()),
            keeper: Keeper {
                rect: layout.keeper_rect(),
                speed: tuning.keeper_speed(1),
                dir: keeper_dir,
                save_cooldown: 0,
            },
            targets: Vec::new(),
            particles: Vec::new(),
            unlocked: Vec::new(),
            show_tutorial: false,
            time_ticks: 0,
            goal_flash_ticks: 0,
            combo_notice_ticks: 0,
            achievement_notice_ticks: 0,
            last_unlocked: None,
            tuning,
        };
        super::tick::generate_level(&mut state);
        state
    }

    /// Create a session with a random seed
    pub fn with_random_seed(width: f32, height: f32, tuning: Tuning) -> Self {
        Self::new(rand::random(), width, height, tuning)
    }

    /// Lives left for a number of used attempts
    pub fn lives_for_attempts(attempts_used: u32) -> u32 {
        STARTING_LIVES.saturating_sub(attempts_used)
    }

    pub fn all_targets_cleared(&self) -> bool {
        self.targets.iter().all(|t| !t.active)
    }

    pub fn active_targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter().filter(|t| t.active)
    }

    /// Immutable view used by achievement predicates
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            score: self.score,
            level: self.level,
            lives: self.lives,
            combo: self.combo.count,
            total_targets_hit: self.total_targets_hit,
            targets_hit_this_level: self.targets_hit_this_level,
            misses_this_level: self.misses_this_level,
            all_targets_cleared: self.all_targets_cleared(),
        }
    }

    /// Aim accepts input only while the ball sits on the spot mid-game
    pub fn can_aim(&self) -> bool {
        self.phase == GamePhase::Playing && !self.ball.moving
    }

    /// Return the ball to the spot
    pub fn reset_ball(&mut self) {
        self.ball.reset(self.layout.ball_spawn());
    }

    /// Adopt a new surface size. Targets and keeper keep their offset from the
    /// left post; hit targets stay down.
    pub fn resize(&mut self, width: f32, height: f32) {
        let old_goal = self.layout.goal;
        self.layout = Layout::new(width, height);
        let shift = Vec2::new(
            self.layout.goal.x - old_goal.x,
            self.layout.goal.y - old_goal.y,
        );
        for target in &mut self.targets {
            target.center += shift;
        }
        self.keeper.rect.x += shift.x;
        self.keeper.rect.y = self.layout.keeper_rect().y;
        self.reset_ball();
        log::info!("Surface resized to {}x{}", width, height);
    }

    /// Wipe the session back to level 1 (lifetime unlocks survive)
    pub fn restart(&mut self) {
        self.phase = GamePhase::Playing;
        self.level = 1;
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.attempts_used = 0;
        self.targets_hit_this_level = 0;
        self.misses_this_level = 0;
        self.total_targets_hit = 0;
        self.combo = Combo::default();
        self.particles.clear();
        self.goal_flash_ticks = 0;
        self.combo_notice_ticks = 0;
        self.achievement_notice_ticks = 0;
        self.last_unlocked = None;
        self.keeper.rect = self.layout.keeper_rect();
        self.keeper.speed = self.tuning.keeper_speed(1);
        self.keeper.dir = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.keeper.save_cooldown = 0;
        self.reset_ball();
        super::tick::generate_level(self);
        log::info!("Session restarted");
    }

    /// Spray particles from a hit target, respecting the cap
    pub fn spawn_particles(&mut self, at: Vec2, color: u32, count: usize) {
        let room = MAX_PARTICLES.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            let vx = (self.rng.random::<f32>() - 0.5) * 6.0;
            let vy = (self.rng.random::<f32>() - 1.2) * 4.0 - 1.0;
            let life = 30.0 + self.rng.random::<f32>() * 30.0;
            let radius = 2.0 + self.rng.random::<f32>() * 3.0;
            self.particles.push(Particle {
                pos: at,
                vel: Vec2::new(vx, vy),
                life,
                radius,
                color,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_geometry() {
        let layout = Layout::new(800.0, 900.0);
        assert_eq!(layout.goal, Rect::new(260.0, 415.0, 280.0, 100.0));
        assert_eq!(layout.ball_spawn(), Vec2::new(400.0, 840.0));

        let keeper = layout.keeper_rect();
        assert_eq!(keeper.x, 370.0);
        assert_eq!(keeper.y, 455.0);
        assert_eq!(layout.keeper_range(), (272.0, 468.0));

        // (280 - 40) / 5 = 48
        assert_eq!(layout.target_home(0), Vec2::new(308.0, 455.0));
        assert_eq!(layout.target_home(3), Vec2::new(452.0, 455.0));
    }

    #[test]
    fn test_new_state_starts_at_intro() {
        let state = GameState::new(7, 800.0, 900.0, Tuning::default());
        assert_eq!(state.phase, GamePhase::Intro);
        assert_eq!(state.lives, 3);
        assert_eq!(state.targets.len(), TARGETS_PER_LEVEL);
        assert!(state.targets.iter().all(|t| t.active));
        assert!(!state.ball.moving);
    }

    #[test]
    fn test_rect_nearest_point() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(rect.nearest_point(Vec2::new(5.0, 5.0)), Vec2::new(5.0, 5.0));
        assert_eq!(rect.nearest_point(Vec2::new(-3.0, 20.0)), Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_combo_lapses_after_window() {
        let mut combo = Combo::default();
        combo.hit(3);
        combo.hit(3);
        assert_eq!(combo.count, 2);
        assert!(!combo.advance());
        assert!(!combo.advance());
        assert!(combo.advance());
        assert_eq!(combo.count, 0);
        assert_eq!(combo.best, 2);
    }

    #[test]
    fn test_target_bounces_off_posts() {
        let mut target = Target {
            section: Section::Skills,
            center: Vec2::new(95.0, 0.0),
            radius: 10.0,
            speed: 2.0,
            dir: 1.0,
            active: true,
            glow_phase: 0.0,
        };
        target.advance(0.0, 100.0);
        assert_eq!(target.center.x, 90.0);
        assert_eq!(target.dir, -1.0);
    }

    #[test]
    fn test_restart_clears_notices_and_rerolls_keeper() {
        let mut state = GameState::new(21, 800.0, 900.0, Tuning::default());
        state.achievement_notice_ticks = ACHIEVEMENT_NOTICE_TICKS;
        state.last_unlocked = Some(AchievementId::FirstGoal);
        state.unlocked.push(AchievementId::FirstGoal);
        state.keeper.save_cooldown = 5;

        let mut dirs = Vec::new();
        for _ in 0..32 {
            state.restart();
            dirs.push(state.keeper.dir);
        }
        assert_eq!(state.achievement_notice_ticks, 0);
        assert_eq!(state.last_unlocked, None);
        assert_eq!(state.keeper.save_cooldown, 0);
        assert_eq!(state.unlocked, vec![AchievementId::FirstGoal]);
        assert!(dirs.contains(&1.0) && dirs.contains(&-1.0));
    }

    #[test]
    fn test_resize_keeps_hit_targets_down() {
        let mut state = GameState::new(1, 800.0, 900.0, Tuning::default());
        state.targets[2].active = false;
        let before = state.targets[0].center;
        state.resize(1000.0, 900.0);
        assert!(!state.targets[2].active);
        assert_eq!(state.targets[0].center, before + Vec2::new(100.0, 0.0));
        assert_eq!(state.ball.pos, state.layout.ball_spawn());
    }

    #[test]
    fn test_particles_respect_cap() {
        let mut state = GameState::new(1, 800.0, 900.0, Tuning::default());
        for _ in 0..20 {
            state.spawn_particles(Vec2::ZERO, 0xffffff, HIT_PARTICLES);
        }
        assert_eq!(state.particles.len(), MAX_PARTICLES);
    }
}
