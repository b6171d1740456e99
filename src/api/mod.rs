//! Command API module
//!
//! The in-process surface the presentation shell drives: text commands from
//! the controls, pointer and keyboard, and the JSON responses sent back.

pub mod commands;
pub mod handlers;
pub mod responses;

// Re-export main types
pub use commands::{quantize_duration_input, Command};
pub use handlers::handle_command;
pub use responses::{ApiResponse, FontsResponse, HealthResponse, Response, StatusResponse};
