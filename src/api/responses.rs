//! API response structures

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{services::FontCategory, state::Snapshot};

/// Response to a command that acts on the session
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<Snapshot>,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, session: Option<Snapshot>) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            session,
        }
    }

    /// The command changed the session
    pub fn ok(message: String, session: Snapshot) -> Self {
        Self::new("ok".to_string(), message, Some(session))
    }

    /// The command was valid but had nothing to act on
    pub fn ignored(message: String, session: Snapshot) -> Self {
        Self::new("ignored".to_string(), message, Some(session))
    }

    /// The command was applied with a different value than requested
    pub fn adjusted(message: String, session: Snapshot) -> Self {
        Self::new("adjusted".to_string(), message, Some(session))
    }

    /// Create an error response
    pub fn error(message: String) -> Self {
        Self::new("error".to_string(), message, None)
    }
}

/// Full status with process metadata
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub session: Snapshot,
    pub countdown_scheduled: bool,
    pub uptime: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// The font catalog plus the label of the current selection
#[derive(Debug, Clone, Serialize)]
pub struct FontsResponse {
    pub selected: String,
    pub selected_label: String,
    pub categories: &'static [FontCategory],
}

/// Any response the command loop can print
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Response {
    Api(ApiResponse),
    Status(StatusResponse),
    Health(HealthResponse),
    Fonts(FontsResponse),
}

impl Response {
    /// One JSON line for stdout
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("Failed to serialize response: {}", e))
    }
}
