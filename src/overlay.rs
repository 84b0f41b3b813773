//! Game overlay visibility
//!
//! The game sits in a full-screen overlay opened from the navigation bar.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    Open,
    Close,
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayState {
    pub open: bool,
}

impl OverlayState {
    /// Apply an action, returning the new state
    pub fn reduce(self, action: OverlayAction) -> Self {
        let open = match action {
            OverlayAction::Open => true,
            OverlayAction::Close => false,
            OverlayAction::Toggle => !self.open,
        };
        Self { open }
    }

    /// Whether going from `self` to `next` closes the overlay
    pub fn closes(self, next: Self) -> bool {
        self.open && !next.open
    }
}
