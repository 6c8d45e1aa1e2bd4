//! Drag-to-kick aiming
//!
//! Pointer-down anchors the drag, every move recomputes the launch and a
//! trajectory preview, pointer-up commits the launch. The preview is never
//! written back into the session.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics::predict_trajectory;
use super::state::GameState;
use crate::tuning::Tuning;

/// Velocity and spin handed to the ball on release
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Launch {
    pub velocity: Vec2,
    pub spin: f32,
}

impl Launch {
    /// Launch for a drag from `start` to `current` with the ball at `ball`.
    ///
    /// Direction points from the ball toward the pointer, power grows with
    /// drag length and a sideways drag curls the ball the opposite way.
    pub fn from_drag(ball: Vec2, start: Vec2, current: Vec2, tuning: &Tuning) -> Self {
        let dist = (current - start).length();
        let aim = current - ball;
        let angle = aim.y.atan2(aim.x);
        let power = (dist / tuning.power_divisor).clamp(tuning.min_power, tuning.max_power);
        let spin = ((start.x - current.x) / tuning.spin_divisor).clamp(-tuning.max_spin, tuning.max_spin);

        Self {
            velocity: Vec2::new(angle.cos(), angle.sin()) * power,
            spin,
        }
    }

    /// Launch speed
    pub fn power(&self) -> f32 {
        self.velocity.length()
    }
}

/// Meter readings and preview for the current drag
#[derive(Debug, Clone, PartialEq)]
pub struct AimReadout {
    /// Power meter fill, 0-100
    pub power_percent: f32,
    /// Curve meter fill, 0-100
    pub curve_percent: f32,
    pub launch: Launch,
    /// Predicted ball positions, one per step
    pub preview: Vec<Vec2>,
}

/// Maps client (CSS pixel) coordinates onto the drawing surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Top-left of the surface element in client space
    pub origin: Vec2,
    /// Displayed size of the surface element
    pub client_size: Vec2,
    /// Backing surface size
    pub surface_size: Vec2,
}

impl Viewport {
    /// Viewport where client and surface pixels coincide
    pub fn identity(width: f32, height: f32) -> Self {
        let size = Vec2::new(width, height);
        Self {
            origin: Vec2::ZERO,
            client_size: size,
            surface_size: size,
        }
    }

    pub fn to_surface(&self, client: Vec2) -> Vec2 {
        let scale = self.surface_size / self.client_size.max(Vec2::splat(f32::EPSILON));
        (client - self.origin) * scale
    }
}

/// Pointer aiming state
#[derive(Debug, Clone, Default)]
pub struct AimState {
    start: Option<Vec2>,
    current: Vec2,
}

impl AimState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_aiming(&self) -> bool {
        self.start.is_some()
    }

    /// Pointer down; ignored unless the ball is waiting on the spot.
    /// Returns true when aiming began.
    pub fn press(&mut self, state: &GameState, pos: Vec2) -> bool {
        if !state.can_aim() {
            return false;
        }
        self.start = Some(pos);
        self.current = pos;
        true
    }

    /// Pointer move; returns the updated readout while aiming
    pub fn drag(&mut self, state: &GameState, pos: Vec2) -> Option<AimReadout> {
        let start = self.start?;
        self.current = pos;

        let tuning = &state.tuning;
        let dist = (pos - start).length();
        let power_percent = (dist / tuning.power_meter_full * 100.0).clamp(0.0, 100.0);
        let curve_percent = ((start.x - pos.x).abs() / tuning.spin_divisor * 100.0).clamp(0.0, 100.0);

        let launch = Launch::from_drag(state.ball.pos, start, pos, tuning);
        let preview = predict_trajectory(state.ball.pos, state.ball.radius, &launch, &state.layout, tuning);

        Some(AimReadout {
            power_percent,
            curve_percent,
            launch,
            preview,
        })
    }

    /// Pointer up; returns the launch to feed into the next tick
    pub fn release(&mut self, state: &GameState, pos: Vec2) -> Option<Launch> {
        let start = self.start.take()?;
        if !state.can_aim() {
            return None;
        }
        Some(Launch::from_drag(state.ball.pos, start, pos, &state.tuning))
    }

    /// Drop the drag without kicking
    pub fn cancel(&mut self) {
        self.start = None;
    }
}
