//! Collision detection and response
//!
//! Ball against the keeper (circle vs rectangle), the targets (circle vs
//! circle), the ground plane and the edges of play.

use glam::Vec2;

use super::state::{Ball, Layout, Rect};
use crate::tuning::Tuning;

/// Outcome of a ground check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundContact {
    /// Ball is in the air
    None,
    /// Ball bounced and keeps going
    Bounced,
    /// Ball bounced and has no energy left
    Rested,
}

/// Circle against axis-aligned rectangle, nearest-point method
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let nearest = rect.nearest_point(center);
    (center - nearest).length_squared() <= radius * radius
}

/// Circle against circle, touching counts
#[inline]
pub fn circle_circle_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) <= ra + rb
}

/// Bounce the ball off the ground plane with energy loss
pub fn resolve_ground(ball: &mut Ball, ground: f32, tuning: &Tuning) -> GroundContact {
    if ball.pos.y + ball.radius <= ground {
        return GroundContact::None;
    }

    ball.pos.y = ground - ball.radius;
    ball.vel.y *= tuning.bounce;
    ball.vel.x *= tuning.ground_friction;
    ball.spin *= tuning.ground_spin_retention;

    // Gravity lands after the move, so a bouncing ball never rebounds slower
    // than about two steps of it. Anything below that is spent.
    let rebound = ball.vel.y.abs() - 2.0 * tuning.gravity;
    if ball.vel.x.abs() < tuning.rest_speed && rebound < tuning.rest_speed {
        GroundContact::Rested
    } else {
        GroundContact::Bounced
    }
}

/// Ball has left play (far past a side, or far above the top)
pub fn out_of_bounds(pos: Vec2, layout: &Layout, tuning: &Tuning) -> bool {
    pos.x < -tuning.out_of_bounds_side
        || pos.x > layout.width + tuning.out_of_bounds_side
        || pos.y < -tuning.out_of_bounds_top
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball_at(pos: Vec2, vel: Vec2) -> Ball {
        let mut ball = Ball::new(pos);
        ball.vel = vel;
        ball.moving = true;
        ball
    }

    #[test]
    fn test_circle_rect_overlap() {
        let rect = Rect::new(100.0, 100.0, 60.0, 70.0);
        // Inside
        assert!(circle_rect_overlap(Vec2::new(130.0, 130.0), 16.0, &rect));
        // Touching the left edge
        assert!(circle_rect_overlap(Vec2::new(84.0, 130.0), 16.0, &rect));
        // Just outside the corner diagonal
        assert!(!circle_rect_overlap(Vec2::new(88.0, 88.0), 16.0, &rect));
        assert!(!circle_rect_overlap(Vec2::new(50.0, 130.0), 16.0, &rect));
    }

    #[test]
    fn test_circle_circle_overlap() {
        assert!(circle_circle_overlap(Vec2::ZERO, 16.0, Vec2::new(48.0, 0.0), 32.0));
        assert!(!circle_circle_overlap(Vec2::ZERO, 16.0, Vec2::new(48.1, 0.0), 32.0));
    }

    #[test]
    fn test_ground_bounce_loses_energy() {
        let tuning = Tuning::default();
        let mut ball = ball_at(Vec2::new(0.0, 890.0), Vec2::new(10.0, 12.0));
        ball.spin = 2.0;

        assert_eq!(resolve_ground(&mut ball, 900.0, &tuning), GroundContact::Bounced);
        assert_eq!(ball.pos.y, 884.0);
        assert!((ball.vel.y + 6.6).abs() < 1e-5);
        assert!((ball.vel.x - 8.0).abs() < 1e-5);
        assert_eq!(ball.spin, 1.0);
    }

    #[test]
    fn test_ground_rest() {
        let tuning = Tuning::default();
        let mut ball = ball_at(Vec2::new(0.0, 885.0), Vec2::new(0.1, 0.5));
        assert_eq!(resolve_ground(&mut ball, 900.0, &tuning), GroundContact::Rested);

        let mut airborne = ball_at(Vec2::new(0.0, 500.0), Vec2::new(0.0, 0.1));
        assert_eq!(resolve_ground(&mut airborne, 900.0, &tuning), GroundContact::None);
    }

    #[test]
    fn test_weak_rebound_rests() {
        let tuning = Tuning::default();
        // A rebound gravity cancels within two steps is spent
        let mut ball = ball_at(Vec2::new(0.0, 885.0), Vec2::new(0.1, 1.8));
        assert_eq!(resolve_ground(&mut ball, 900.0, &tuning), GroundContact::Rested);

        let mut ball = ball_at(Vec2::new(0.0, 885.0), Vec2::new(0.1, 2.4));
        assert_eq!(resolve_ground(&mut ball, 900.0, &tuning), GroundContact::Bounced);
    }

    #[test]
    fn test_dropped_ball_settles() {
        let tuning = Tuning::default();
        let mut ball = ball_at(Vec2::new(400.0, 600.0), Vec2::ZERO);
        let mut rested_at = None;
        for step in 0..1000 {
            crate::sim::physics::integrate_step(&mut ball.pos, &mut ball.vel, ball.spin, &tuning);
            if resolve_ground(&mut ball, 900.0, &tuning) == GroundContact::Rested {
                rested_at = Some(step);
                break;
            }
        }
        assert!(rested_at.is_some(), "ball kept bouncing: {:?}", ball);
    }

    #[test]
    fn test_out_of_bounds() {
        let tuning = Tuning::default();
        let layout = Layout::new(800.0, 900.0);
        assert!(!out_of_bounds(Vec2::new(-119.0, 0.0), &layout, &tuning));
        assert!(out_of_bounds(Vec2::new(-121.0, 0.0), &layout, &tuning));
        assert!(out_of_bounds(Vec2::new(921.0, 0.0), &layout, &tuning));
        assert!(out_of_bounds(Vec2::new(400.0, -301.0), &layout, &tuning));
        // Below the surface is the ground's business
        assert!(!out_of_bounds(Vec2::new(400.0, 2000.0), &layout, &tuning));
    }
}
