//! Frame scheduling and the game loop driver
//!
//! The driver asks a [`FrameScheduler`] for one frame at a time and turns
//! frame timestamps into elapsed milliseconds. At most one frame request is
//! ever outstanding.

use std::collections::BTreeSet;

/// Something that can call back once on the next display frame
pub trait FrameScheduler {
    type Handle: Copy + PartialEq + std::fmt::Debug;

    /// Schedule one frame callback; `None` if the platform refused
    fn request_frame(&mut self) -> Option<Self::Handle>;

    /// Cancel a previously requested frame
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Drives a per-frame callback with elapsed time
#[derive(Debug)]
pub struct GameLoop<S: FrameScheduler> {
    scheduler: S,
    /// Outstanding frame request
    pending: Option<S::Handle>,
    /// Timestamp of the previous frame (ms); `None` until the first frame
    last_time: Option<f64>,
}

impl<S: FrameScheduler> GameLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: None,
            last_time: None,
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Whether a frame is scheduled
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Begin scheduling frames with a fresh timestamp baseline
    ///
    /// Returns false if the loop was already running.
    pub fn start(&mut self) -> bool {
        if self.pending.is_some() {
            log::debug!("Game loop already running");
            return false;
        }
        self.last_time = None;
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() {
            log::warn!("Frame request failed, game loop not started");
            return false;
        }
        true
    }

    /// Cancel the outstanding frame, if any
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.last_time = None;
    }

    /// Forget the timestamp baseline (e.g. the tab was hidden)
    pub fn rebase(&mut self) {
        self.last_time = None;
    }

    /// Handle a frame firing at `timestamp` (ms)
    ///
    /// Returns the elapsed time since the previous frame, or `None` for the
    /// first frame after (re)start and for stale callbacks that arrive after
    /// `stop`. Schedules the next frame while running.
    pub fn on_frame(&mut self, timestamp: f64) -> Option<f64> {
        if self.pending.take().is_none() {
            log::debug!("Ignoring stale frame at {:.1}ms", timestamp);
            return None;
        }

        let delta = self.last_time.map(|last| (timestamp - last).max(0.0));
        self.last_time = Some(timestamp);
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() {
            log::warn!("Frame request failed, game loop stopped");
            self.last_time = None;
        }
        delta
    }
}

/// Scheduler driven by hand (tests and the headless runner)
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_handle: u64,
    requested: BTreeSet<u64>,
    /// Total requests ever made
    pub requests: u64,
    /// Total cancellations
    pub cancels: u64,
    /// Refuse new requests
    pub refuse: bool,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frame requests waiting to fire
    pub fn outstanding(&self) -> usize {
        self.requested.len()
    }

    /// Fire the oldest outstanding request, as the display would
    pub fn fire(&mut self) -> Option<u64> {
        self.requested.pop_first()
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u64;

    fn request_frame(&mut self) -> Option<u64> {
        if self.refuse {
            return None;
        }
        self.next_handle += 1;
        self.requests += 1;
        self.requested.insert(self.next_handle);
        Some(self.next_handle)
    }

    fn cancel_frame(&mut self, handle: u64) {
        if self.requested.remove(&handle) {
            self.cancels += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire(game_loop: &mut GameLoop<ManualScheduler>, timestamp: f64) -> Option<f64> {
        game_loop.scheduler_mut().fire()?;
        game_loop.on_frame(timestamp)
    }

    #[test]
    fn test_first_frame_sets_baseline() {
        let mut game_loop = GameLoop::new(ManualScheduler::new());
        assert!(game_loop.start());
        assert_eq!(fire(&mut game_loop, 1000.0), None);
        assert_eq!(fire(&mut game_loop, 1016.0), Some(16.0));
        assert_eq!(fire(&mut game_loop, 1048.0), Some(32.0));
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut game_loop = GameLoop::new(ManualScheduler::new());
        assert!(game_loop.start());
        assert!(!game_loop.start());
        assert_eq!(game_loop.scheduler().outstanding(), 1);
        assert_eq!(game_loop.scheduler().requests, 1);
    }

    #[test]
    fn test_one_request_outstanding_per_frame() {
        let mut game_loop = GameLoop::new(ManualScheduler::new());
        game_loop.start();
        for i in 0..10 {
            fire(&mut game_loop, i as f64 * 16.0);
            assert_eq!(game_loop.scheduler().outstanding(), 1);
        }
    }

    #[test]
    fn test_stop_cancels_pending() {
        let mut game_loop = GameLoop::new(ManualScheduler::new());
        game_loop.start();
        game_loop.stop();
        assert!(!game_loop.is_running());
        assert_eq!(game_loop.scheduler().outstanding(), 0);
        assert_eq!(game_loop.scheduler().cancels, 1);

        // Safe when not running
        game_loop.stop();
        assert_eq!(game_loop.scheduler().cancels, 1);
    }

    #[test]
    fn test_stale_frame_ignored() {
        let mut game_loop = GameLoop::new(ManualScheduler::new());
        game_loop.start();
        fire(&mut game_loop, 0.0);
        game_loop.stop();
        // A callback that was already in flight when stop() ran
        assert_eq!(game_loop.on_frame(16.0), None);
        assert!(!game_loop.is_running());
        assert_eq!(game_loop.scheduler().outstanding(), 0);
    }

    #[test]
    fn test_restart_gets_fresh_baseline() {
        let mut game_loop = GameLoop::new(ManualScheduler::new());
        game_loop.start();
        fire(&mut game_loop, 0.0);
        fire(&mut game_loop, 16.0);
        game_loop.stop();

        game_loop.start();
        // Long gap while stopped must not show up as a delta
        assert_eq!(fire(&mut game_loop, 60_000.0), None);
        assert_eq!(fire(&mut game_loop, 60_016.0), Some(16.0));
    }

    #[test]
    fn test_rebase_skips_gap() {
        let mut game_loop = GameLoop::new(ManualScheduler::new());
        game_loop.start();
        fire(&mut game_loop, 0.0);
        game_loop.rebase();
        assert_eq!(fire(&mut game_loop, 30_000.0), None);
        assert_eq!(fire(&mut game_loop, 30_020.0), Some(20.0));
    }

    #[test]
    fn test_refused_request_leaves_loop_stopped() {
        let mut game_loop = GameLoop::new(ManualScheduler::new());
        game_loop.scheduler_mut().refuse = true;
        assert!(!game_loop.start());
        assert!(!game_loop.is_running());

        // Retry succeeds once the platform accepts requests again
        game_loop.scheduler_mut().refuse = false;
        assert!(game_loop.start());
        fire(&mut game_loop, 0.0);

        // Refused mid-run: the delta still arrives, then the loop stops
        game_loop.scheduler_mut().refuse = true;
        assert_eq!(fire(&mut game_loop, 16.0), Some(16.0));
        assert!(!game_loop.is_running());
        assert_eq!(game_loop.scheduler().outstanding(), 0);
    }
}
