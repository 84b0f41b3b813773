//! Game state and core simulation types
//!
//! Everything one run of the game needs lives in [`GameState`]; each
//! instance is independent and can be reset on its own.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::obstacles::ObstacleSystem;
use super::player::{PlayerPhysics, accepts_input};
use crate::consts::*;
use crate::settings::Settings;
use crate::tuning::{HitboxSource, Tuning};
use crate::{percent_to_px, viewport_point};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, orb can be warmed up
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Notifications for the UI layer, drained by the host every frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new run began
    Started,
    /// Survival time changed (seconds)
    ScoreUpdated { score: f64 },
    /// The orb hit an obstacle; emitted once per run
    GameOver { final_score: f64 },
}

/// An obstacle flying right to left
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge, percent of viewport width
    pub x: f32,
    /// Left edge before the latest move
    pub prev_x: f32,
    /// Top edge, percent of viewport height
    pub y: f32,
    /// Pixels
    pub width: f32,
    pub height: f32,
    /// Viewport-width percent per reference frame
    pub speed: f32,
    pub active: bool,
}

impl Obstacle {
    /// Pixel bounding box at the current position
    pub fn rect(&self, viewport: Viewport) -> Rect {
        let min = viewport_point(self.x, self.y, viewport.width, viewport.height);
        Rect::new(min, Vec2::new(self.width, self.height))
    }

    /// Pixel box covering everything the obstacle passed over this frame
    pub fn swept_rect(&self, viewport: Viewport) -> Rect {
        let left = percent_to_px(self.x.min(self.prev_x), viewport.width);
        let right = percent_to_px(self.x.max(self.prev_x), viewport.width) + self.width;
        let top = percent_to_px(self.y, viewport.height);
        Rect::new(Vec2::new(left, top), Vec2::new(right - left, self.height))
    }
}

/// Viewport size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }
}

/// RNG seed wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete state of one game instance
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Seconds survived in the current run
    pub score: f64,
    pub viewport: Viewport,
    pub player: PlayerPhysics,
    pub obstacles: ObstacleSystem,
    pub tuning: Tuning,
    pub settings: Settings,
    /// Pending notifications for the UI layer
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with default balance
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, Tuning::default(), Settings::default())
    }

    pub fn with_config(seed: u64, tuning: Tuning, settings: Settings) -> Self {
        let rng_state = RngState::new(seed);
        Self {
            seed,
            phase: GamePhase::Idle,
            score: 0.0,
            viewport: Viewport::default(),
            player: PlayerPhysics::new(&tuning, settings.effective_smoothing()),
            obstacles: ObstacleSystem::new(rng_state.to_rng()),
            tuning,
            settings,
            events: Vec::new(),
        }
    }

    /// Begin a new run from `Idle` or `GameOver`
    ///
    /// Returns false (and changes nothing) if a run is already in progress.
    pub fn start(&mut self) -> bool {
        if self.phase == GamePhase::Playing {
            log::debug!("start() ignored: already playing");
            return false;
        }
        let cleared = self.obstacles.reset();
        self.score = 0.0;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Started);
        log::info!("Run started (cleared {} obstacles)", cleared);
        true
    }

    /// End the run, freezing the score
    pub fn end(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
        });
        log::info!("Game over: survived {:.2}s", self.score);
    }

    /// Feed a wheel event to the player
    pub fn on_wheel(&mut self, delta_y: f32) {
        if !accepts_input(self.phase) {
            return;
        }
        let delta = self.settings.effective_wheel_delta(delta_y);
        self.player.on_wheel(delta);
        // No frame loop runs on the start screen, so warm-up moves are immediate
        if self.phase == GamePhase::Idle {
            self.player.settle();
        }
    }

    /// Update the viewport size in pixels
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.viewport = Viewport { width, height };
        }
    }

    /// Player hitbox position (percent of viewport height)
    pub fn hitbox_y(&self) -> f32 {
        match self.tuning.hitbox {
            HitboxSource::Smoothed => self.player.smoothed(),
            HitboxSource::Raw => self.player.raw(),
        }
    }

    /// Player circle centre in pixels
    pub fn player_center(&self) -> Vec2 {
        Vec2::new(
            self.viewport.width * self.tuning.player_x_fraction,
            percent_to_px(self.hitbox_y(), self.viewport.height),
        )
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0.0);
        assert!(state.obstacles.obstacles().is_empty());
    }

    #[test]
    fn test_start_twice_is_noop() {
        let mut state = GameState::new(1);
        assert!(state.start());
        state.score = 3.0;
        assert!(!state.start());
        assert_eq!(state.score, 3.0);
        assert_eq!(state.drain_events(), vec![GameEvent::Started]);
    }

    #[test]
    fn test_end_emits_once() {
        let mut state = GameState::new(1);
        state.start();
        state.score = 2.5;
        state.end();
        state.end();
        let events = state.drain_events();
        assert_eq!(
            events,
            vec![GameEvent::Started, GameEvent::GameOver { final_score: 2.5 }]
        );
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_wheel_ignored_after_game_over() {
        let mut state = GameState::new(1);
        state.start();
        state.end();
        state.on_wheel(200.0);
        assert_eq!(state.player.raw(), 50.0);
    }

    #[test]
    fn test_idle_warmup_is_immediate() {
        let mut state = GameState::new(1);
        state.on_wheel(200.0);
        assert!((state.player.raw() - 60.0).abs() < 1e-4);
        assert_eq!(state.player.smoothed(), state.player.raw());
    }

    #[test]
    fn test_player_center() {
        let mut state = GameState::new(1);
        state.resize(1000.0, 600.0);
        let center = state.player_center();
        assert!((center.x - 100.0).abs() < 1e-4);
        assert!((center.y - 300.0).abs() < 1e-4);
    }

    #[test]
    fn test_swept_rect_covers_travel() {
        let obstacle = Obstacle {
            id: 1,
            x: 10.0,
            prev_x: 20.0,
            y: 50.0,
            width: 30.0,
            height: 20.0,
            speed: 1.0,
            active: true,
        };
        let viewport = Viewport {
            width: 1000.0,
            height: 600.0,
        };
        let swept = obstacle.swept_rect(viewport);
        assert_eq!(swept.min, Vec2::new(100.0, 300.0));
        assert_eq!(swept.size, Vec2::new(130.0, 20.0));
        let rect = obstacle.rect(viewport);
        assert_eq!(rect.size, Vec2::new(30.0, 20.0));
    }
}
