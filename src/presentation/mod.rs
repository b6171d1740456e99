//! Presentation module
//!
//! Fullscreen mode, keyboard interception and the auto-hiding exit chrome.

pub mod fullscreen;

// Re-export main types
pub use fullscreen::{
    EventPhase, FullscreenSnapshot, FullscreenState, Key, KeyDisposition, DEFAULT_HIDE_DELAY,
};
