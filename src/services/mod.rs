//! External collaborator module
//!
//! This module contains the pieces the overlay engine talks to but does not
//! own: video identifier extraction, the embed target and the font catalog.

pub mod fonts;
pub mod video;

// Re-export main functions
pub use fonts::{find_font, label_for, FontCategory, FontOption, FONT_CATEGORIES};
pub use video::{embed_url, extract_video_id, fullscreen_embed_url, watch_url, EmbedTarget};
