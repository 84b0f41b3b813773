//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling (requestAnimationFrame in the browser, manual natively)
//! - The game loop driver built on top of it

pub mod clock;

pub use clock::{FrameScheduler, GameLoop, ManualScheduler};
