//! HUD view model: which menu is showing and what the score text says

use crate::sim::GamePhase;

/// Which overlay screen is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudScreen {
    /// Title, instructions and the start button
    Start,
    /// Live score only
    Playing,
    /// Final time and the try-again button
    GameOver,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HudView {
    pub screen: HudScreen,
    /// Live timer, hidden on the start screen
    pub score_text: Option<String>,
    /// Summary line for the game-over screen
    pub result_text: Option<String>,
}

impl HudView {
    pub fn from_state(phase: GamePhase, score: f64) -> Self {
        match phase {
            GamePhase::Idle => Self {
                screen: HudScreen::Start,
                score_text: None,
                result_text: None,
            },
            GamePhase::Playing => Self {
                screen: HudScreen::Playing,
                score_text: Some(format_score(score)),
                result_text: None,
            },
            GamePhase::GameOver => Self {
                screen: HudScreen::GameOver,
                score_text: Some(format_score(score)),
                result_text: Some(format!("You survived: {:.2}s", score)),
            },
        }
    }
}

/// Live timer text, e.g. `TIME: 12.34s`
pub fn format_score(score: f64) -> String {
    format!("TIME: {:.2}s", score)
}

/// Rolling frames-per-second over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }

    /// Record a frame timestamp (ms) and return the current FPS
    pub fn record(&mut self, time: f64) -> u32 {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % 60;

        // Oldest sample is the one we'll overwrite next
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = (59_000.0 / elapsed).round() as u32;
            }
        }
        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_screen_hides_score() {
        let hud = HudView::from_state(GamePhase::Idle, 0.0);
        assert_eq!(hud.screen, HudScreen::Start);
        assert_eq!(hud.score_text, None);
    }

    #[test]
    fn test_playing_score_text() {
        let hud = HudView::from_state(GamePhase::Playing, 12.3456);
        assert_eq!(hud.screen, HudScreen::Playing);
        assert_eq!(hud.score_text.as_deref(), Some("TIME: 12.35s"));
        assert_eq!(hud.result_text, None);
    }

    #[test]
    fn test_game_over_text() {
        let hud = HudView::from_state(GamePhase::GameOver, 7.5);
        assert_eq!(hud.screen, HudScreen::GameOver);
        assert_eq!(hud.result_text.as_deref(), Some("You survived: 7.50s"));
    }

    #[test]
    fn test_fps_counter() {
        let mut fps = FpsCounter::new();
        let mut last = 0;
        // Start at 1000ms so no sample is zero
        for i in 0..120 {
            last = fps.record(1000.0 + i as f64 * (1000.0 / 60.0));
        }
        assert_eq!(last, 60);
    }
}
