//! Ball flight integrator
//!
//! Explicit Euler with drag, spin curl and gravity, one step per frame.
//! The live ball and the aiming preview both go through `integrate_step`.

use glam::Vec2;

use super::aim::Launch;
use super::state::Layout;
use crate::tuning::Tuning;

/// Advance position and velocity by one step
#[inline]
pub fn integrate_step(pos: &mut Vec2, vel: &mut Vec2, spin: f32, tuning: &Tuning) {
    vel.x += spin * tuning.spin_factor;
    vel.x *= tuning.drag;
    vel.y *= tuning.drag;
    *pos += *vel;
    vel.y += tuning.gravity;
}

/// Predicted ball centres for a launch, one per step.
///
/// Stops before the first point that would touch the ground (the live ball
/// bounces there), after the first point that leaves the surface by
/// `preview_margin`, or once the ball has slowed to a crawl.
pub fn predict_trajectory(
    start: Vec2,
    radius: f32,
    launch: &Launch,
    layout: &Layout,
    tuning: &Tuning,
) -> Vec<Vec2> {
    let mut points = Vec::with_capacity(tuning.preview_steps);
    let mut pos = start;
    let mut vel = launch.velocity;
    let margin = tuning.preview_margin;

    for i in 0..tuning.preview_steps {
        integrate_step(&mut pos, &mut vel, launch.spin, tuning);

        if pos.y + radius > layout.ground() {
            break;
        }
        points.push(pos);

        if pos.x < -margin || pos.x > layout.width + margin || pos.y < -margin {
            break;
        }
        if vel.x.abs() < tuning.preview_rest_speed
            && vel.y.abs() < tuning.preview_rest_speed
            && i > tuning.preview_min_steps
        {
            break;
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order() {
        let tuning = Tuning::default();
        let mut pos = Vec2::ZERO;
        let mut vel = Vec2::new(1.0, -10.0);
        integrate_step(&mut pos, &mut vel, 2.0, &tuning);

        let vx = (1.0 + 2.0 * 0.05) * 0.9998;
        let vy = -10.0 * 0.9998;
        assert!((pos.x - vx).abs() < 1e-5);
        assert!((pos.y - vy).abs() < 1e-5);
        // Gravity lands after the position update
        assert!((vel.y - (vy + 0.42)).abs() < 1e-5);
    }

    #[test]
    fn test_preview_stops_above_ground() {
        let tuning = Tuning::default();
        let layout = Layout::new(800.0, 900.0);
        let launch = Launch {
            velocity: Vec2::new(0.0, -10.0),
            spin: 0.0,
        };
        let points = predict_trajectory(layout.ball_spawn(), 16.0, &launch, &layout, &tuning);
        assert!(!points.is_empty());
        assert!(points.len() < tuning.preview_steps);
        assert!(points.iter().all(|p| p.y + 16.0 <= layout.ground()));
        assert!(points.iter().all(|p| p.x == 400.0));
    }

    #[test]
    fn test_preview_stops_off_surface() {
        let tuning = Tuning::default();
        let layout = Layout::new(800.0, 900.0);
        let launch = Launch {
            velocity: Vec2::new(34.0, -5.0),
            spin: 0.0,
        };
        let points = predict_trajectory(layout.ball_spawn(), 16.0, &launch, &layout, &tuning);
        let last = points.last().unwrap();
        assert!(last.x > layout.width + tuning.preview_margin);
        assert!(points[..points.len() - 1]
            .iter()
            .all(|p| p.x <= layout.width + tuning.preview_margin));
    }

    #[test]
    fn test_preview_caps_steps() {
        let tuning = Tuning {
            preview_steps: 5,
            ..Tuning::default()
        };
        let layout = Layout::new(800.0, 900.0);
        let launch = Launch {
            velocity: Vec2::new(0.0, -30.0),
            spin: 0.0,
        };
        let points = predict_trajectory(layout.ball_spawn(), 16.0, &launch, &layout, &tuning);
        assert_eq!(points.len(), 5);
    }
}
