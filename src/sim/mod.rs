//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Time only arrives as frame deltas
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod obstacles;
pub mod player;
pub mod spring;
pub mod state;
pub mod tick;

pub use collision::{Rect, circle_rect_collision};
pub use obstacles::ObstacleSystem;
pub use player::{PlayerPhysics, accepts_input};
pub use spring::Spring;
pub use state::{GameEvent, GamePhase, GameState, Obstacle, Viewport};
pub use tick::{first_collision, tick};
