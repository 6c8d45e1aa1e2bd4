//! Per-frame simulation tick
//!
//! Core game loop that advances the session by one frame.

use std::f32::consts::TAU;

use rand::Rng;

use super::achievements::newly_unlocked;
use super::aim::Launch;
use super::collision::{GroundContact, circle_circle_overlap, circle_rect_overlap, out_of_bounds, resolve_ground};
use super::physics::integrate_step;
use super::state::{GameEvent, GamePhase, GameState, Section, Target};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Leave the intro screen
    pub start: bool,
    /// Kick committed by pointer-up since the last tick
    pub launch: Option<Launch>,
    /// Move on from the congrats screen
    pub advance: bool,
    /// Start over from level 1
    pub restart: bool,
    /// Close the tutorial overlay
    pub dismiss_tutorial: bool,
}

/// How a flight ended this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlightOutcome {
    Saved { cue: bool },
    Missed,
    Hit(usize),
}

/// Advance the session by one frame, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.dismiss_tutorial && state.show_tutorial {
        state.show_tutorial = false;
        events.push(GameEvent::TutorialDismissed);
    }

    if input.restart && state.phase != GamePhase::Intro {
        state.restart();
        events.push(GameEvent::Restarted);
        events.push(GameEvent::LevelStarted { level: state.level });
        return events;
    }

    if state.phase == GamePhase::Intro {
        if input.start {
            state.phase = GamePhase::Playing;
            log::info!("Game started (seed {})", state.seed);
            events.push(GameEvent::Started);
            events.push(GameEvent::LevelStarted { level: state.level });
        }
        return events;
    }

    state.time_ticks += 1;
    state.goal_flash_ticks = state.goal_flash_ticks.saturating_sub(1);
    state.combo_notice_ticks = state.combo_notice_ticks.saturating_sub(1);
    state.achievement_notice_ticks = state.achievement_notice_ticks.saturating_sub(1);

    match state.phase {
        GamePhase::Playing => {
            if let Some(launch) = input.launch {
                if !state.ball.moving {
                    state.ball.launch(&launch);
                    log::debug!("Kick: vel {:?} spin {:.2}", launch.velocity, launch.spin);
                    events.push(GameEvent::Kicked);
                }
            }

            advance_targets(state);
            let outcome = advance_keeper_and_ball(state);
            match outcome {
                Some(FlightOutcome::Saved { cue }) => register_miss(state, Some(cue), &mut events),
                Some(FlightOutcome::Missed) => register_miss(state, None, &mut events),
                Some(FlightOutcome::Hit(index)) => register_hit(state, index, &mut events),
                None => {}
            }
        }

        GamePhase::LevelComplete { delay_ticks } => {
            // The field keeps moving behind the congrats screen
            advance_targets(state);
            let (min_x, max_x) = state.layout.keeper_range();
            state.keeper.advance(min_x, max_x);

            if delay_ticks > 0 {
                let delay_ticks = delay_ticks - 1;
                state.phase = GamePhase::LevelComplete { delay_ticks };
                if delay_ticks == 0 {
                    log::info!("Level {} cleared, score {}", state.level, state.score);
                    events.push(GameEvent::LevelCleared {
                        level: state.level,
                        score: state.score,
                    });
                }
            } else if input.advance {
                next_level(state);
                events.push(GameEvent::LevelStarted { level: state.level });
            }
        }

        GamePhase::GameOver | GamePhase::Intro => {}
    }

    advance_particles(state);

    if state.combo.advance() {
        events.push(GameEvent::ComboLapsed);
    }

    if state.phase != GamePhase::GameOver || events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })) {
        check_achievements(state, &mut events);
    }

    events
}

/// Slide every live target one step
fn advance_targets(state: &mut GameState) {
    let (min_x, max_x) = state.layout.target_range();
    for target in state.targets.iter_mut().filter(|t| t.active) {
        target.advance(min_x, max_x);
    }
}

/// Move the keeper and the ball and report the first terminating collision
fn advance_keeper_and_ball(state: &mut GameState) -> Option<FlightOutcome> {
    let (min_x, max_x) = state.layout.keeper_range();
    state.keeper.advance(min_x, max_x);

    let ball = &mut state.ball;
    if !ball.moving {
        return None;
    }

    // Every contact is a save; the cooldown only rations the host's cue
    if circle_rect_overlap(ball.pos, ball.radius, &state.keeper.rect) {
        let cue = state.keeper.save_cooldown == 0;
        if cue {
            state.keeper.save_cooldown = KEEPER_SAVE_COOLDOWN_TICKS;
        }
        return Some(FlightOutcome::Saved { cue });
    }

    ball.rotation += BALL_ROTATION_STEP;
    integrate_step(&mut ball.pos, &mut ball.vel, ball.spin, &state.tuning);

    if resolve_ground(ball, state.layout.ground(), &state.tuning) == GroundContact::Rested {
        return Some(FlightOutcome::Missed);
    }

    if out_of_bounds(ball.pos, &state.layout, &state.tuning) {
        return Some(FlightOutcome::Missed);
    }

    state
        .targets
        .iter()
        .position(|t| t.active && circle_circle_overlap(ball.pos, ball.radius, t.center, t.radius))
        .map(FlightOutcome::Hit)
}

/// A save or a miss costs a life and breaks the combo; `saved` carries the
/// save's cue flag
fn register_miss(state: &mut GameState, saved: Option<bool>, events: &mut Vec<GameEvent>) {
    state.attempts_used += 1;
    state.misses_this_level += 1;
    state.lives = GameState::lives_for_attempts(state.attempts_used);
    state.combo.reset();
    state.combo_notice_ticks = 0;
    state.reset_ball();

    match saved {
        Some(cue) => {
            log::debug!("Saved by the keeper, {} lives left", state.lives);
            events.push(GameEvent::Saved { cue });
        }
        None => {
            log::debug!("Missed, {} lives left", state.lives);
            events.push(GameEvent::Missed);
        }
    }

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over: score {}, {} targets hit",
            state.score,
            state.total_targets_hit
        );
        events.push(GameEvent::GameOver {
            score: state.score,
            total_targets_hit: state.total_targets_hit,
        });
    }
}

/// Knock down a target and score it
fn register_hit(state: &mut GameState, index: usize, events: &mut Vec<GameEvent>) {
    let target = &mut state.targets[index];
    target.active = false;
    let section = target.section;
    let center = target.center;

    state.targets_hit_this_level += 1;
    state.total_targets_hit += 1;
    state.combo.hit(state.tuning.combo_window_ticks);

    let combo = state.combo.count;
    let mut points = state.tuning.hit_points;
    if combo >= 2 {
        points += state.tuning.combo_bonus * combo as u64;
        state.combo_notice_ticks = COMBO_NOTICE_TICKS;
    }
    state.score += points;
    state.goal_flash_ticks = GOAL_FLASH_TICKS;

    state.spawn_particles(center, section.color(), HIT_PARTICLES);
    state.reset_ball();

    log::debug!("Hit {} for {} points (combo {})", section.label(), points, combo);
    events.push(GameEvent::TargetHit { section, points, combo });

    if state.all_targets_cleared() {
        state.phase = GamePhase::LevelComplete {
            delay_ticks: LEVEL_COMPLETE_DELAY_TICKS,
        };
    }
}

/// Move sparks and drop the spent ones
fn advance_particles(state: &mut GameState) {
    let gravity = state.tuning.particle_gravity;
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel;
        particle.vel.y += gravity;
        particle.life -= 1.0;
    }
    state.particles.retain(|p| p.life > 0.0);
}

/// Unlock anything newly earned
fn check_achievements(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let snapshot = state.snapshot();
    for id in newly_unlocked(&snapshot, &state.unlocked) {
        log::info!("Achievement unlocked: {}", id.info().title);
        state.unlocked.push(id);
        state.last_unlocked = Some(id);
        state.achievement_notice_ticks = ACHIEVEMENT_NOTICE_TICKS;
        events.push(GameEvent::AchievementUnlocked(id));
    }
}

/// Move to the next level: faster keeper, fresh targets
pub fn next_level(state: &mut GameState) {
    state.level += 1;
    state.targets_hit_this_level = 0;
    state.misses_this_level = 0;
    state.keeper.speed = state.tuning.keeper_speed(state.level);
    state.reset_ball();
    generate_level(state);
    state.phase = GamePhase::Playing;
    log::info!("Level {} (keeper speed {:.1})", state.level, state.keeper.speed);
}

/// Lay out a full set of active targets for the current level
pub fn generate_level(state: &mut GameState) {
    let level = state.level;
    let radius = state.tuning.target_radius(level);
    let speed = state.tuning.target_speed(level);

    let mut targets = Vec::with_capacity(TARGETS_PER_LEVEL);
    for (i, &section) in Section::ALL.iter().enumerate() {
        targets.push(Target {
            section,
            center: state.layout.target_home(i),
            radius,
            speed,
            dir: if i % 2 == 0 { 1.0 } else { -1.0 },
            active: true,
            glow_phase: state.rng.random::<f32>() * TAU,
        });
    }
    state.targets = targets;
}
