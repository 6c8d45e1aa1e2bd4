//! Demo-mode kicker
//!
//! Searches a grid of launches by running cloned sessions forward, so the
//! chosen kick accounts for moving targets and the keeper exactly.

use glam::Vec2;

use super::aim::Launch;
use super::state::{GameEvent, GameState};
use super::tick::{TickInput, tick};

/// Launch directions tried, spread across the upward cone
const ANGLE_STEPS: usize = 48;
/// Launch powers tried between the tuning's min and max
const POWER_STEPS: usize = 10;
/// Longest flight followed before giving up on a candidate
const MAX_FLIGHT_TICKS: usize = 400;

/// Pick a kick for the current session, or `None` if the ball can't be kicked.
///
/// Prefers the first candidate that ends in a hit; otherwise falls back to
/// a full-power shot at the nearest live target.
pub fn choose_launch(state: &GameState) -> Option<Launch> {
    if !state.can_aim() {
        return None;
    }

    let tuning = &state.tuning;
    for p in 0..POWER_STEPS {
        let power = tuning.min_power + (tuning.max_power - tuning.min_power) * (p as f32 + 1.0) / POWER_STEPS as f32;
        for a in 0..ANGLE_STEPS {
            // Sweep from 45 to 135 degrees above the horizon
            let t = a as f32 / (ANGLE_STEPS - 1) as f32;
            let angle = -std::f32::consts::FRAC_PI_4 * (1.0 + 2.0 * t);
            let launch = Launch {
                velocity: Vec2::new(angle.cos(), angle.sin()) * power,
                spin: 0.0,
            };
            if scores_hit(state, launch) {
                log::debug!("Autoplay found a hit at power {:.1}, angle {:.2}", power, angle);
                return Some(launch);
            }
        }
    }

    let ball = state.ball.pos;
    let nearest = state
        .active_targets()
        .min_by(|a, b| {
            a.center
                .distance_squared(ball)
                .partial_cmp(&b.center.distance_squared(ball))
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;
    log::debug!("Autoplay found no clean hit, shooting at {}", nearest.section.label());
    let dir = (nearest.center - ball).normalize_or_zero();
    Some(Launch {
        velocity: dir * tuning.max_power,
        spin: 0.0,
    })
}

/// Run a throwaway copy of the session and report whether the kick scores
fn scores_hit(state: &GameState, launch: Launch) -> bool {
    let mut trial = state.clone();
    trial.particles.clear();

    let mut input = TickInput {
        launch: Some(launch),
        ..Default::default()
    };
    for _ in 0..MAX_FLIGHT_TICKS {
        for event in tick(&mut trial, &input) {
            match event {
                GameEvent::TargetHit { .. } => return true,
                GameEvent::Missed | GameEvent::Saved { .. } => return false,
                _ => {}
            }
        }
        input = TickInput::default();
    }
    false
}
