//! State management module
//!
//! The countdown, style and geometry slices, the session controller that owns
//! them, and the shared handle the command loop and scheduled tasks use.

pub mod app_state;
pub mod overlay_state;
pub mod session;
pub mod style_state;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, SessionEvent};
pub use overlay_state::OverlayGeometry;
pub use session::{ControlsState, PointerOutcome, Session, Snapshot, TimerSnapshot, DEFAULT_CONTAINER};
pub use style_state::{StylePatch, TimerStyle};
pub use timer_state::{
    clamp_duration, TickOutcome, TimerPhase, TimerSession, DEFAULT_DURATION_SECONDS,
    MAX_DURATION_SECONDS, MIN_DURATION_SECONDS,
};
