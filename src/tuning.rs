//! Data-driven game balance
//!
//! Flight constants are shared by the live ball and the trajectory preview,
//! so the preview can only be accurate when both read the same `Tuning`.

use serde::{Deserialize, Serialize};

/// Physics and gameplay balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Flight ===
    /// Downward acceleration per step
    pub gravity: f32,
    /// Per-step velocity retention (air drag)
    pub drag: f32,
    /// Horizontal acceleration per unit of spin per step
    pub spin_factor: f32,

    // === Ground ===
    /// Vertical velocity multiplier on bounce (negative reflects)
    pub bounce: f32,
    /// Horizontal velocity retained on bounce
    pub ground_friction: f32,
    /// Spin retained on bounce
    pub ground_spin_retention: f32,
    /// Both velocity components under this after a bounce end the flight
    pub rest_speed: f32,

    // === Bounds ===
    /// Horizontal distance past either edge that counts as out of play
    pub out_of_bounds_side: f32,
    /// Height above the top edge that counts as out of play
    pub out_of_bounds_top: f32,

    // === Launch ===
    pub min_power: f32,
    pub max_power: f32,
    pub max_spin: f32,
    /// Drag distance per unit of launch power
    pub power_divisor: f32,
    /// Horizontal drag distance per unit of spin
    pub spin_divisor: f32,
    /// Drag distance that fills the power meter
    pub power_meter_full: f32,

    // === Preview ===
    pub preview_steps: usize,
    /// Preview stops once the path leaves the surface by this margin
    pub preview_margin: f32,
    /// Preview stops when both velocity components fall under this
    pub preview_rest_speed: f32,
    /// Steps before the rest check applies
    pub preview_min_steps: usize,

    // === Scoring ===
    pub hit_points: u64,
    pub combo_bonus: u64,
    pub combo_window_ticks: u32,

    // === Difficulty ===
    pub keeper_base_speed: f32,
    pub keeper_speed_step: f32,
    pub target_base_speed: f32,
    pub target_speed_step: f32,
    pub target_radius_step: f32,

    // === Particles ===
    pub particle_gravity: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.42,
            drag: 0.9998,
            spin_factor: 0.05,

            bounce: -0.55,
            ground_friction: 0.8,
            ground_spin_retention: 0.5,
            rest_speed: 0.35,

            out_of_bounds_side: 120.0,
            out_of_bounds_top: 300.0,

            min_power: 8.0,
            max_power: 34.0,
            max_spin: 2.4,
            power_divisor: 9.0,
            spin_divisor: 50.0,
            power_meter_full: 30.0,

            preview_steps: 100,
            preview_margin: 100.0,
            preview_rest_speed: 0.1,
            preview_min_steps: 20,

            hit_points: 150,
            combo_bonus: 50,
            combo_window_ticks: 180,

            keeper_base_speed: 2.2,
            keeper_speed_step: 0.6,
            target_base_speed: 1.2,
            target_speed_step: 0.2,
            target_radius_step: 2.0,

            particle_gravity: 0.18,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields take their default value
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse tuning, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring malformed tuning ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Keeper speed for a 1-based level
    pub fn keeper_speed(&self, level: u32) -> f32 {
        self.keeper_base_speed + self.keeper_speed_step * level.saturating_sub(1) as f32
    }

    /// Target oscillation speed for a 1-based level
    pub fn target_speed(&self, level: u32) -> f32 {
        self.target_base_speed + self.target_speed_step * level.saturating_sub(1) as f32
    }

    /// Target radius for a 1-based level (shrinks with level, floored)
    pub fn target_radius(&self, level: u32) -> f32 {
        let r = crate::consts::TARGET_BASE_RADIUS
            - self.target_radius_step * level.saturating_sub(1) as f32;
        r.max(crate::consts::TARGET_MIN_RADIUS)
    }
}
