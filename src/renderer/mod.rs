//! Rendering adapter
//!
//! The simulation never touches visual elements. Each frame the host takes a
//! [`RenderSnapshot`] and lets a [`Reconciler`] work out which obstacle
//! elements to create, move or remove. The browser backend in `dom` applies
//! those operations to the page.

#[cfg(target_arch = "wasm32")]
pub mod dom;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::sim::GameState;

/// Where to draw the player orb
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    /// Left edge of the orb's column, percent of viewport width
    pub left_percent: f32,
    /// Smoothed vertical position, percent of viewport height
    pub top_percent: f32,
}

/// An obstacle's on-screen box in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub player: PlayerView,
    pub obstacles: Vec<ObstacleView>,
}

impl RenderSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        let obstacles = state
            .obstacles
            .obstacles()
            .iter()
            .map(|o| {
                let rect = o.rect(state.viewport);
                ObstacleView {
                    id: o.id,
                    x: rect.min.x,
                    y: rect.min.y,
                    width: rect.size.x,
                    height: rect.size.y,
                }
            })
            .collect();

        Self {
            player: PlayerView {
                left_percent: state.tuning.player_x_fraction * 100.0,
                top_percent: state.player.smoothed(),
            },
            obstacles,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A change to apply to the visual elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderOp {
    Create(ObstacleView),
    Update(ObstacleView),
    Remove(u32),
}

/// Tracks which obstacle elements exist and diffs them against new data
#[derive(Debug, Default)]
pub struct Reconciler {
    known: BTreeMap<u32, ObstacleView>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements currently on screen
    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    /// Work out the operations that make the screen match `obstacles`
    ///
    /// Removals come first, then creations and updates in id order.
    /// Unchanged obstacles produce no operation.
    pub fn reconcile(&mut self, obstacles: &[ObstacleView]) -> Vec<RenderOp> {
        let next: BTreeMap<u32, ObstacleView> = obstacles.iter().map(|o| (o.id, *o)).collect();
        let mut ops = Vec::new();

        for id in self.known.keys() {
            if !next.contains_key(id) {
                ops.push(RenderOp::Remove(*id));
            }
        }

        for (id, view) in &next {
            match self.known.get(id) {
                None => ops.push(RenderOp::Create(*view)),
                Some(old) if old != view => ops.push(RenderOp::Update(*view)),
                Some(_) => {}
            }
        }

        self.known = next;
        ops
    }

    /// Remove every element (overlay closed)
    pub fn clear(&mut self) -> Vec<RenderOp> {
        let ops = self.known.keys().map(|id| RenderOp::Remove(*id)).collect();
        self.known.clear();
        ops
    }
}
