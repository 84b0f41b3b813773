//! Data-driven game balance
//!
//! Every gameplay constant lives here so balance can be tweaked from JSON
//! without rebuilding. Missing fields fall back to the defaults in
//! [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which player position the hitbox follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitboxSource {
    /// Spring-smoothed position (what is drawn on screen)
    #[default]
    Smoothed,
    /// Unsmoothed wheel position
    Raw,
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub wheel_sensitivity: f32,
    pub player_radius: f32,
    pub player_x_fraction: f32,
    pub spring_stiffness: f32,
    pub spring_damping: f32,
    pub spring_mass: f32,
    pub hitbox: HitboxSource,

    // === Spawning ===
    pub spawn_floor_ms: f32,
    pub spawn_base_ms: f32,
    pub spawn_rate_factor: f32,
    pub cluster_difficulty: f32,
    pub cluster_chance: f64,
    pub cluster_delay_ms: f32,

    // === Obstacles ===
    pub obstacle_y_min: f32,
    pub obstacle_y_max: f32,
    pub obstacle_height_min: f32,
    pub obstacle_height_max: f32,
    pub obstacle_aspect: f32,
    pub obstacle_speed_min: f32,
    pub obstacle_speed_max: f32,
    pub obstacle_retire_x: f32,

    // === Difficulty ===
    pub difficulty_increment: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            wheel_sensitivity: WHEEL_SENSITIVITY,
            player_radius: PLAYER_RADIUS,
            player_x_fraction: PLAYER_X_FRACTION,
            spring_stiffness: SPRING_STIFFNESS,
            spring_damping: SPRING_DAMPING,
            spring_mass: SPRING_MASS,
            hitbox: HitboxSource::Smoothed,

            spawn_floor_ms: SPAWN_FLOOR_MS,
            spawn_base_ms: SPAWN_BASE_MS,
            spawn_rate_factor: SPAWN_RATE_FACTOR,
            cluster_difficulty: CLUSTER_DIFFICULTY,
            cluster_chance: CLUSTER_CHANCE,
            cluster_delay_ms: CLUSTER_DELAY_MS,

            obstacle_y_min: OBSTACLE_Y_MIN,
            obstacle_y_max: OBSTACLE_Y_MAX,
            obstacle_height_min: OBSTACLE_HEIGHT_MIN,
            obstacle_height_max: OBSTACLE_HEIGHT_MAX,
            obstacle_aspect: OBSTACLE_ASPECT,
            obstacle_speed_min: OBSTACLE_SPEED_MIN,
            obstacle_speed_max: OBSTACLE_SPEED_MAX,
            obstacle_retire_x: OBSTACLE_RETIRE_X,

            difficulty_increment: DIFFICULTY_INCREMENT,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON (missing fields keep their defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse tuning from JSON, logging and falling back to defaults on error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning JSON ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// A tuning that never spawns obstacles (sandbox/testing)
    pub fn without_spawning() -> Self {
        Self {
            spawn_base_ms: f32::INFINITY,
            spawn_floor_ms: f32::INFINITY,
            ..Self::default()
        }
    }

    /// Current spawn interval for a difficulty level
    pub fn spawn_interval_ms(&self, difficulty: f32) -> f32 {
        self.spawn_floor_ms
            .max(self.spawn_base_ms - difficulty * self.spawn_rate_factor)
    }
}
