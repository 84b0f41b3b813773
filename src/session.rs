//! A game session: one simulation driven by one game loop
//!
//! The host forwards input and frame callbacks here and drains
//! [`GameEvent`]s for its HUD. The loop runs only while the game is playing.

use crate::platform::{FrameScheduler, GameLoop};
use crate::renderer::RenderSnapshot;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, tick};
use crate::tuning::Tuning;

pub struct Session<S: FrameScheduler> {
    state: GameState,
    game_loop: GameLoop<S>,
}

impl<S: FrameScheduler> Session<S> {
    pub fn new(seed: u64, tuning: Tuning, settings: Settings, scheduler: S) -> Self {
        Self {
            state: GameState::with_config(seed, tuning, settings),
            game_loop: GameLoop::new(scheduler),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn game_loop(&self) -> &GameLoop<S> {
        &self.game_loop
    }

    pub fn game_loop_mut(&mut self) -> &mut GameLoop<S> {
        &mut self.game_loop
    }

    /// Start a run from the start screen or after game over
    ///
    /// Ignored while a run is in progress, so the loop is never doubled.
    /// A run whose loop failed to schedule gets its loop started again.
    pub fn start(&mut self) -> bool {
        let started = self.state.start();
        if self.state.phase == GamePhase::Playing && !self.game_loop.is_running() {
            self.game_loop.start();
        }
        started
    }

    /// Start again after game over (same as [`Session::start`])
    pub fn restart(&mut self) -> bool {
        self.start()
    }

    pub fn on_wheel(&mut self, delta_y: f32) {
        self.state.on_wheel(delta_y);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    /// Handle a display frame at `timestamp` (ms)
    pub fn on_frame(&mut self, timestamp: f64) {
        let Some(delta) = self.game_loop.on_frame(timestamp) else {
            return;
        };
        if self.state.phase != GamePhase::Playing {
            self.game_loop.stop();
            return;
        }
        if tick(&mut self.state, delta) {
            self.game_loop.stop();
        }
    }

    /// Tab hidden: don't count the time away as one huge frame
    pub fn on_hidden(&mut self) {
        self.game_loop.rebase();
    }

    /// Stop everything and go back to a fresh start screen
    pub fn close(&mut self) {
        self.game_loop.stop();
        let seed = self.state.seed.wrapping_add(1);
        let tuning = self.state.tuning.clone();
        let settings = self.state.settings.clone();
        let viewport = self.state.viewport;
        self.state = GameState::with_config(seed, tuning, settings);
        self.state.viewport = viewport;
        log::info!("Session closed");
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn render_snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::from_state(&self.state)
    }
}
