//! Per-frame simulation tick
//!
//! Order is fixed: score, then obstacles, then collision.

use super::collision::circle_rect_collision;
use super::state::{GameEvent, GamePhase, GameState};

/// Advance the game by one frame of `dt_ms` milliseconds
///
/// Does nothing unless the game is `Playing`. Returns true if this frame
/// ended the run.
pub fn tick(state: &mut GameState, dt_ms: f64) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    let dt_ms = dt_ms.max(0.0);

    // 1. Score
    state.score += dt_ms / 1000.0;
    state.push_event(GameEvent::ScoreUpdated { score: state.score });

    // 2. Obstacles and player smoothing
    let step = dt_ms as f32;
    state.obstacles.update(state.phase, step, &state.tuning);
    state.player.advance(step);

    // 3. Collision
    if let Some(id) = first_collision(state) {
        log::debug!("Player hit obstacle {}", id);
        state.end();
        return true;
    }

    false
}

/// ID of the first obstacle (in spawn order) overlapping the player
pub fn first_collision(state: &GameState) -> Option<u32> {
    let center = state.player_center();
    let radius = state.tuning.player_radius;

    state
        .obstacles
        .obstacles()
        .iter()
        .filter(|o| o.active)
        .find(|o| circle_rect_collision(center, radius, &o.swept_rect(state.viewport)))
        .map(|o| o.id)
}
