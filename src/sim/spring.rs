//! Damped spring used to smooth the player orb toward its wheel position

use serde::{Deserialize, Serialize};

/// Largest integration step in seconds (keeps the stiff spring stable)
const MAX_SUBSTEP: f32 = 0.004;
/// Distance to target below which the spring may come to rest
const REST_DELTA: f32 = 0.01;
/// Speed below which the spring may come to rest
const REST_SPEED: f32 = 0.01;

/// One-dimensional damped spring chasing a target value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    pub value: f32,
    pub velocity: f32,
    pub target: f32,
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Spring {
    pub fn new(value: f32, stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            stiffness,
            damping,
            mass,
        }
    }

    /// Whether the spring has settled on its target
    pub fn at_rest(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Jump straight to the target and stop
    pub fn settle(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
    }

    /// Integrate the spring forward by `dt` seconds (semi-implicit Euler)
    pub fn advance(&mut self, dt: f32) {
        if dt <= 0.0 || self.at_rest() {
            return;
        }

        let steps = (dt / MAX_SUBSTEP).ceil().max(1.0) as u32;
        let h = dt / steps as f32;
        for _ in 0..steps {
            let displacement = self.value - self.target;
            let accel = (-self.stiffness * displacement - self.damping * self.velocity) / self.mass;
            self.velocity += accel * h;
            self.value += self.velocity * h;
        }

        if (self.value - self.target).abs() < REST_DELTA && self.velocity.abs() < REST_SPEED {
            self.settle();
        }
    }
}
