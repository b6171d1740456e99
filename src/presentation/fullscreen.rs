//! Fullscreen presentation mode and its auto-hiding exit affordance

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Inactivity before the exit affordance hides
pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_secs(3);

/// Keys the presentation layer cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other(String),
}

impl Key {
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "escape" | "esc" => Key::Escape,
            _ => Key::Other(name.to_string()),
        }
    }
}

/// Dispatch phase of a keyboard event. Capture runs before the embedded player sees the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPhase {
    Capture,
    Bubble,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// Handled here; default action prevented and propagation stopped
    Consumed,
    PassThrough,
}

/// Binary fullscreen mode plus exit-chrome visibility.
///
/// Every show of the chrome bumps `generation`; a scheduled hide only applies
/// if its generation is still current.
#[derive(Debug, Clone, Default)]
pub struct FullscreenState {
    active: bool,
    chrome_visible: bool,
    generation: u64,
}

/// Serializable view of [`FullscreenState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullscreenSnapshot {
    pub active: bool,
    pub chrome_visible: bool,
}

impl FullscreenState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn chrome_visible(&self) -> bool {
        self.chrome_visible
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Flip the mode; returns the new value
    pub fn toggle(&mut self) -> bool {
        if self.active {
            self.exit();
        } else {
            self.enter();
        }
        self.active
    }

    /// Enter fullscreen with the exit chrome showing; returns the hide generation to arm
    pub fn enter(&mut self) -> u64 {
        if !self.active {
            info!("Entering fullscreen");
        }
        self.active = true;
        self.show_chrome()
    }

    pub fn exit(&mut self) {
        if self.active {
            info!("Exiting fullscreen");
        }
        self.active = false;
        self.chrome_visible = false;
        // invalidate any pending hide
        self.generation += 1;
    }

    /// Pointer movement while fullscreen re-shows the chrome.
    ///
    /// Returns the generation the caller should arm a hide for, or `None` when
    /// not fullscreen.
    pub fn pointer_activity(&mut self) -> Option<u64> {
        if !self.active {
            return None;
        }
        Some(self.show_chrome())
    }

    /// Hide the chrome if `generation` is still the latest show
    pub fn hide_chrome(&mut self, generation: u64) -> bool {
        if !self.active || generation != self.generation || !self.chrome_visible {
            debug!("Skipping stale chrome hide (generation {} vs {})", generation, self.generation);
            return false;
        }
        self.chrome_visible = false;
        debug!("Fullscreen chrome hidden after inactivity");
        true
    }

    /// Escape exits fullscreen, intercepted during the capture phase
    pub fn handle_key(&mut self, key: &Key, phase: EventPhase) -> KeyDisposition {
        match (key, phase) {
            (Key::Escape, EventPhase::Capture) if self.active => {
                self.exit();
                KeyDisposition::Consumed
            }
            _ => KeyDisposition::PassThrough,
        }
    }

    pub fn snapshot(&self) -> FullscreenSnapshot {
        FullscreenSnapshot {
            active: self.active,
            chrome_visible: self.chrome_visible,
        }
    }

    fn show_chrome(&mut self) -> u64 {
        self.chrome_visible = true;
        self.generation += 1;
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_mode_and_shows_chrome() {
        let mut state = FullscreenState::new();
        assert!(state.toggle());
        assert!(state.chrome_visible());
        assert!(!state.toggle());
        assert!(!state.chrome_visible());
    }

    #[test]
    fn stale_hide_is_ignored() {
        let mut state = FullscreenState::new();
        let first = state.enter();
        let second = state.pointer_activity().expect("fullscreen");
        assert!(second > first);
        assert!(!state.hide_chrome(first));
        assert!(state.chrome_visible());
        assert!(state.hide_chrome(second));
        assert!(!state.chrome_visible());
        assert!(state.pointer_activity().is_some());
        assert!(state.chrome_visible());
    }

    #[test]
    fn hide_after_exit_is_ignored() {
        let mut state = FullscreenState::new();
        let generation = state.enter();
        state.exit();
        assert!(!state.hide_chrome(generation));
        assert!(state.pointer_activity().is_none());
    }

    #[test]
    fn escape_is_consumed_at_capture_only_while_fullscreen() {
        let mut state = FullscreenState::new();
        assert_eq!(state.handle_key(&Key::Escape, EventPhase::Capture), KeyDisposition::PassThrough);
        state.enter();
        assert_eq!(state.handle_key(&Key::Escape, EventPhase::Bubble), KeyDisposition::PassThrough);
        assert!(state.is_active());
        assert_eq!(state.handle_key(&Key::parse("a"), EventPhase::Capture), KeyDisposition::PassThrough);
        assert_eq!(state.handle_key(&Key::parse("Esc"), EventPhase::Capture), KeyDisposition::Consumed);
        assert!(!state.is_active());
    }
}
