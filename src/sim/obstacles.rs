//! Obstacle spawning, movement and retirement
//!
//! Owns the obstacle collection together with the difficulty ramp and spawn
//! timer. Nothing else mutates them.

use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{GamePhase, Obstacle};
use crate::consts::*;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct ObstacleSystem {
    /// Active obstacles in spawn order
    obstacles: Vec<Obstacle>,
    /// Remaining delays (ms) of staggered second spawns
    pending: Vec<f32>,
    /// Time since the last spawn (ms)
    spawn_timer: f32,
    difficulty: f32,
    rng: Pcg32,
    /// Next obstacle ID (never reused, even across resets)
    next_id: u32,
}

impl ObstacleSystem {
    pub fn new(rng: Pcg32) -> Self {
        Self {
            obstacles: Vec::new(),
            pending: Vec::new(),
            spawn_timer: 0.0,
            difficulty: DIFFICULTY_START,
            rng,
            next_id: 1,
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn difficulty(&self) -> f32 {
        self.difficulty
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    /// Number of staggered spawns still waiting
    pub fn pending_spawns(&self) -> usize {
        self.pending.len()
    }

    /// Clear everything for a new run; returns how many obstacles were removed
    pub fn reset(&mut self) -> usize {
        let cleared = self.obstacles.len();
        self.obstacles.clear();
        self.pending.clear();
        self.difficulty = DIFFICULTY_START;
        self.spawn_timer = 0.0;
        cleared
    }

    /// Advance spawning, movement and the difficulty ramp by one frame
    pub fn update(&mut self, phase: GamePhase, dt_ms: f32, tuning: &Tuning) {
        if phase != GamePhase::Playing {
            return;
        }

        self.spawn_timer += dt_ms;
        self.update_pending(dt_ms, tuning);

        if self.spawn_timer > tuning.spawn_interval_ms(self.difficulty) {
            self.spawn(tuning);

            if self.difficulty > tuning.cluster_difficulty
                && self.rng.random_bool(tuning.cluster_chance.clamp(0.0, 1.0))
            {
                self.pending.push(tuning.cluster_delay_ms);
            }

            self.spawn_timer = 0.0;
        }

        let step = dt_ms / REFERENCE_FRAME_MS;
        for obstacle in &mut self.obstacles {
            obstacle.prev_x = obstacle.x;
            obstacle.x -= obstacle.speed * step;
            if obstacle.x < tuning.obstacle_retire_x {
                obstacle.active = false;
            }
        }

        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.active);
        let retired = before - self.obstacles.len();
        if retired > 0 {
            log::debug!("Retired {} obstacles", retired);
        }

        self.difficulty += tuning.difficulty_increment;
    }

    /// Count down staggered spawns, spawning the ones that are due
    fn update_pending(&mut self, dt_ms: f32, tuning: &Tuning) {
        if self.pending.is_empty() {
            return;
        }
        for delay in &mut self.pending {
            *delay -= dt_ms;
        }
        let due = self.pending.iter().filter(|d| **d <= 0.0).count();
        self.pending.retain(|d| *d > 0.0);
        for _ in 0..due {
            self.spawn(tuning);
        }
    }

    /// Spawn one obstacle at the right edge
    fn spawn(&mut self, tuning: &Tuning) {
        let y = random_in(&mut self.rng, tuning.obstacle_y_min, tuning.obstacle_y_max);
        let height = random_in(
            &mut self.rng,
            tuning.obstacle_height_min,
            tuning.obstacle_height_max,
        );
        let speed = random_in(
            &mut self.rng,
            tuning.obstacle_speed_min,
            tuning.obstacle_speed_max,
        ) * self.difficulty;

        let id = self.next_id;
        self.next_id += 1;

        log::debug!(
            "Spawned obstacle {} (y={:.1}%, h={:.0}px, speed={:.2})",
            id,
            y,
            height,
            speed
        );

        self.obstacles.push(Obstacle {
            id,
            x: OBSTACLE_SPAWN_X,
            prev_x: OBSTACLE_SPAWN_X,
            y,
            width: height * tuning.obstacle_aspect,
            height,
            speed,
            active: true,
        });
    }
}

/// Uniform sample in [min, max), tolerating an empty range
fn random_in(rng: &mut Pcg32, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::RngState;
    use proptest::prelude::*;

    fn system(seed: u64) -> ObstacleSystem {
        ObstacleSystem::new(RngState::new(seed).to_rng())
    }

    /// Run until the first spawn happens
    fn run_until_spawn(system: &mut ObstacleSystem, tuning: &Tuning) {
        while system.obstacles().is_empty() {
            system.update(GamePhase::Playing, 16.0, tuning);
        }
    }

    #[test]
    fn test_update_outside_playing_is_noop() {
        let tuning = Tuning::default();
        let mut system = system(1);
        system.update(GamePhase::Idle, 5000.0, &tuning);
        system.update(GamePhase::GameOver, 5000.0, &tuning);
        assert!(system.obstacles().is_empty());
        assert_eq!(system.difficulty(), 1.0);
        assert_eq!(system.spawn_timer(), 0.0);
    }

    #[test]
    fn test_first_spawn_after_interval() {
        let tuning = Tuning::default();
        let mut system = system(7);
        // Interval at difficulty 1.0 is 1700ms; the timer must exceed it
        system.update(GamePhase::Playing, 1700.0, &tuning);
        assert!(system.obstacles().is_empty());
        system.update(GamePhase::Playing, 1.0, &tuning);
        assert_eq!(system.obstacles().len(), 1);
        assert_eq!(system.spawn_timer(), 0.0);
    }

    #[test]
    fn test_spawn_parameters_in_range() {
        let tuning = Tuning::default();
        let mut system = system(42);
        run_until_spawn(&mut system, &tuning);
        let o = &system.obstacles()[0];
        assert!((5.0..95.0).contains(&o.y));
        assert!((20.0..60.0).contains(&o.height));
        assert!((o.width - o.height * 1.5).abs() < 1e-4);
        // Speed range scaled by difficulty (just over 1.0 at first spawn)
        assert!(o.speed >= 0.2 && o.speed < 0.5 * 1.1);
        assert!(o.active);
        // Spawned at 100 then moved once in the same update
        assert!(o.x < 100.0);
        assert_eq!(o.prev_x, 100.0);
    }

    #[test]
    fn test_movement_scales_with_delta() {
        let tuning = Tuning::default();
        let mut system = system(3);
        run_until_spawn(&mut system, &tuning);
        let before = system.obstacles()[0].clone();
        system.update(GamePhase::Playing, 32.0, &tuning);
        let after = &system.obstacles()[0];
        assert!((before.x - after.x - before.speed * 2.0).abs() < 1e-4);
        assert_eq!(after.prev_x, before.x);
    }

    #[test]
    fn test_obstacles_retire_below_threshold() {
        let tuning = Tuning::default();
        let mut system = system(5);
        run_until_spawn(&mut system, &tuning);
        let id = system.obstacles()[0].id;
        // Slowest obstacle needs 110 / 0.2 reference frames to leave
        for _ in 0..600 {
            system.update(GamePhase::Playing, 16.0, &tuning);
        }
        assert!(system.obstacles().iter().all(|o| o.id != id));
        assert!(system.obstacles().iter().all(|o| o.active && o.x >= -10.0));
    }

    #[test]
    fn test_difficulty_ramps_per_update() {
        let tuning = Tuning::default();
        let mut system = system(1);
        for _ in 0..100 {
            system.update(GamePhase::Playing, 0.0, &tuning);
        }
        assert!((system.difficulty() - 1.05).abs() < 1e-4);
    }

    #[test]
    fn test_zero_delta_is_bookkeeping_only() {
        let tuning = Tuning::default();
        let mut system = system(1);
        system.update(GamePhase::Playing, 0.0, &tuning);
        assert!(system.obstacles().is_empty());
        assert_eq!(system.spawn_timer(), 0.0);
    }

    #[test]
    fn test_cluster_spawns_second_obstacle_after_delay() {
        let tuning = Tuning {
            cluster_difficulty: 0.0,
            cluster_chance: 1.0,
            ..Tuning::default()
        };
        let mut system = system(9);
        system.update(GamePhase::Playing, 1701.0, &tuning);
        assert_eq!(system.obstacles().len(), 1);
        assert_eq!(system.pending_spawns(), 1);

        system.update(GamePhase::Playing, 200.0, &tuning);
        assert_eq!(system.obstacles().len(), 1);

        system.update(GamePhase::Playing, 100.0, &tuning);
        assert_eq!(system.obstacles().len(), 2);
        assert_eq!(system.pending_spawns(), 0);
    }

    #[test]
    fn test_no_cluster_below_difficulty_gate() {
        let tuning = Tuning {
            cluster_chance: 1.0,
            ..Tuning::default()
        };
        let mut system = system(9);
        system.update(GamePhase::Playing, 1701.0, &tuning);
        assert_eq!(system.pending_spawns(), 0);
    }

    #[test]
    fn test_reset_clears_everything() {
        let tuning = Tuning {
            cluster_difficulty: 0.0,
            cluster_chance: 1.0,
            ..Tuning::default()
        };
        let mut system = system(11);
        system.update(GamePhase::Playing, 1701.0, &tuning);
        system.update(GamePhase::Playing, 10.0, &tuning);
        let last_id = system.obstacles()[0].id;

        assert_eq!(system.reset(), 1);
        assert!(system.obstacles().is_empty());
        assert_eq!(system.pending_spawns(), 0);
        assert_eq!(system.difficulty(), 1.0);
        assert_eq!(system.spawn_timer(), 0.0);

        // Cancelled cluster spawn never fires
        system.update(GamePhase::Playing, 500.0, &tuning);
        assert!(system.obstacles().is_empty());

        // IDs keep counting up
        system.update(GamePhase::Playing, 1701.0, &tuning);
        assert!(system.obstacles()[0].id > last_id);

        // Resetting an empty system is fine
        system.reset();
        assert_eq!(system.reset(), 0);
    }

    #[test]
    fn test_spawning_disabled() {
        let tuning = Tuning::without_spawning();
        let mut system = system(1);
        for _ in 0..1000 {
            system.update(GamePhase::Playing, 16.0, &tuning);
        }
        assert!(system.obstacles().is_empty());
    }

    #[test]
    fn test_same_seed_same_obstacles() {
        let tuning = Tuning::default();
        let mut a = system(1234);
        let mut b = system(1234);
        for _ in 0..500 {
            a.update(GamePhase::Playing, 16.0, &tuning);
            b.update(GamePhase::Playing, 16.0, &tuning);
        }
        assert_eq!(a.obstacles(), b.obstacles());
    }

    proptest! {
        #[test]
        fn prop_difficulty_non_decreasing(deltas in prop::collection::vec(0.0f32..100.0, 1..300)) {
            let tuning = Tuning::default();
            let mut system = system(77);
            let mut last = system.difficulty();
            for dt in deltas {
                system.update(GamePhase::Playing, dt, &tuning);
                prop_assert!(system.difficulty() >= last);
                last = system.difficulty();
            }
        }

        #[test]
        fn prop_every_obstacle_eventually_retires(speed in 0.1f32..20.0, dt in 1.0f32..50.0) {
            let tuning = Tuning::without_spawning();
            let mut system = system(1);
            system.obstacles.push(Obstacle {
                id: 99,
                x: 100.0,
                prev_x: 100.0,
                y: 50.0,
                width: 30.0,
                height: 20.0,
                speed,
                active: true,
            });
            // Distance 110 (+ one frame of slack) at `speed` per 16ms
            let frames = ((111.0 / speed) * (16.0 / dt)).ceil() as usize + 1;
            for _ in 0..frames {
                system.update(GamePhase::Playing, dt, &tuning);
            }
            prop_assert!(system.obstacles().is_empty());
        }
    }
}
