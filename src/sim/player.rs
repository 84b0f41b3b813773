//! Player physics: wheel input to a smoothed vertical position

use serde::{Deserialize, Serialize};

use super::spring::Spring;
use super::state::GamePhase;
use crate::consts::*;
use crate::tuning::Tuning;

/// Whether wheel input is listened to in this phase
///
/// The orb can be warmed up on the start screen, but input is ignored once
/// the run is over.
pub fn accepts_input(phase: GamePhase) -> bool {
    matches!(phase, GamePhase::Idle | GamePhase::Playing)
}

/// The player orb's vertical position, raw and smoothed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerPhysics {
    /// Unsmoothed position, percent of viewport height
    raw: f32,
    /// Spring chasing `raw`
    spring: Spring,
    sensitivity: f32,
    smoothing: bool,
}

impl PlayerPhysics {
    pub fn new(tuning: &Tuning, smoothing: bool) -> Self {
        Self {
            raw: PLAYER_START_Y,
            spring: Spring::new(
                PLAYER_START_Y,
                tuning.spring_stiffness,
                tuning.spring_damping,
                tuning.spring_mass,
            ),
            sensitivity: tuning.wheel_sensitivity,
            smoothing,
        }
    }

    /// Unsmoothed position in [0, 100]
    pub fn raw(&self) -> f32 {
        self.raw
    }

    /// Smoothed position in [0, 100]
    pub fn smoothed(&self) -> f32 {
        if self.smoothing {
            self.spring.value.clamp(PLAYER_Y_MIN, PLAYER_Y_MAX)
        } else {
            self.raw
        }
    }

    /// Apply one wheel event
    pub fn on_wheel(&mut self, delta_y: f32) {
        if delta_y == 0.0 || !delta_y.is_finite() {
            return;
        }
        self.raw = (self.raw + delta_y * self.sensitivity).clamp(PLAYER_Y_MIN, PLAYER_Y_MAX);
        self.spring.target = self.raw;
        if !self.smoothing {
            self.spring.settle();
        }
    }

    /// Snap the smoothed position onto the raw one
    pub fn settle(&mut self) {
        self.spring.settle();
    }

    /// Advance smoothing by a frame
    pub fn advance(&mut self, dt_ms: f32) {
        self.spring.advance(dt_ms / 1000.0);
    }
}
