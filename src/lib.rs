//! Scroll Reflex - a wheel-steered obstacle dodging mini game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, obstacles, collisions, game state)
//! - `platform`: Frame scheduling and the game loop driver
//! - `session`: Wires the game loop driver to the simulation
//! - `renderer`: Reconciles visual elements from simulation data
//! - `hud`: Score/menu text and FPS tracking
//! - `overlay`: Open/close state of the game overlay
//! - `tuning`: Data-driven game balance

pub mod hud;
pub mod overlay;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Player vertical position range (percent of viewport height)
    pub const PLAYER_Y_MIN: f32 = 0.0;
    pub const PLAYER_Y_MAX: f32 = 100.0;
    /// Raw player position at startup (mid-screen)
    pub const PLAYER_START_Y: f32 = 50.0;
    /// Position change per unit of wheel delta
    pub const WHEEL_SENSITIVITY: f32 = 0.05;
    /// Player hitbox radius in pixels (the orb is drawn 60x40)
    pub const PLAYER_RADIUS: f32 = 20.0;
    /// Player's fixed horizontal position as a fraction of viewport width
    pub const PLAYER_X_FRACTION: f32 = 0.1;

    /// Spring smoothing of the player orb
    pub const SPRING_STIFFNESS: f32 = 300.0;
    pub const SPRING_DAMPING: f32 = 20.0;
    pub const SPRING_MASS: f32 = 0.5;

    /// Spawn interval = max(FLOOR, BASE - difficulty * RATE_FACTOR), in ms
    pub const SPAWN_FLOOR_MS: f32 = 600.0;
    pub const SPAWN_BASE_MS: f32 = 2000.0;
    pub const SPAWN_RATE_FACTOR: f32 = 300.0;
    /// Staggered second spawn (difficulty gate, chance, delay)
    pub const CLUSTER_DIFFICULTY: f32 = 1.2;
    pub const CLUSTER_CHANCE: f64 = 0.3;
    pub const CLUSTER_DELAY_MS: f32 = 300.0;

    /// Obstacle spawn ranges
    pub const OBSTACLE_SPAWN_X: f32 = 100.0;
    pub const OBSTACLE_Y_MIN: f32 = 5.0;
    pub const OBSTACLE_Y_MAX: f32 = 95.0;
    pub const OBSTACLE_HEIGHT_MIN: f32 = 20.0;
    pub const OBSTACLE_HEIGHT_MAX: f32 = 60.0;
    pub const OBSTACLE_ASPECT: f32 = 1.5;
    /// Base speed range in viewport-width percent per reference frame
    pub const OBSTACLE_SPEED_MIN: f32 = 0.2;
    pub const OBSTACLE_SPEED_MAX: f32 = 0.5;
    /// Obstacles are retired once their x drops below this (percent)
    pub const OBSTACLE_RETIRE_X: f32 = -10.0;

    /// Reference frame length that obstacle speed is expressed against
    pub const REFERENCE_FRAME_MS: f32 = 16.0;

    /// Difficulty starts here and grows by the increment every update
    pub const DIFFICULTY_START: f32 = 1.0;
    pub const DIFFICULTY_INCREMENT: f32 = 0.0005;

    /// Viewport used until the host reports its real size
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 720.0;
}

/// Convert a percentage of some extent into pixels
#[inline]
pub fn percent_to_px(percent: f32, extent: f32) -> f32 {
    percent / 100.0 * extent
}

/// Convert a (vw %, vh %) pair into pixel coordinates for the given viewport
#[inline]
pub fn viewport_point(x_percent: f32, y_percent: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(percent_to_px(x_percent, width), percent_to_px(y_percent, height))
}
