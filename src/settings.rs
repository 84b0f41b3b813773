//! Player preferences
//!
//! Supplied by the host page as JSON; nothing is persisted by the game.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Flip wheel direction (scroll up moves the orb down)
    pub invert_wheel: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (orb follows the wheel without spring smoothing)
    pub reduced_motion: bool,
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse settings, logging and using defaults when the JSON is bad
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings");
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings JSON ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Apply the wheel direction preference to a raw wheel delta
    pub fn effective_wheel_delta(&self, delta_y: f32) -> f32 {
        if self.invert_wheel { -delta_y } else { delta_y }
    }

    /// Whether the orb should be spring-smoothed
    pub fn effective_smoothing(&self) -> bool {
        !self.reduced_motion
    }
}
