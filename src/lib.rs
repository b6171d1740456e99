//! Countdown Overlay - an interactive countdown timer composited over a video
//!
//! This library provides the overlay engine: a countdown scheduler with
//! play/pause/reset, drag and resize of the timer readout inside its
//! container, font sizing derived from the readout box, and a fullscreen
//! presentation mode with auto-hiding chrome.

pub mod config;
pub mod state;
pub mod api;
pub mod overlay;
pub mod presentation;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, Session};
pub use api::{handle_command, Command};
pub use utils::signals::shutdown_signal;
