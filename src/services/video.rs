//! Video identifier extraction and the embed target

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Length of a video identifier
pub const VIDEO_ID_LEN: usize = 11;

static VIDEO_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#)
        .expect("valid video id regex")
});

/// Pull the 11-character video identifier out of a pasted link.
///
/// Handles `watch?v=`, `youtu.be/` short links and `/embed/` links. Anything
/// else, including empty input, yields `None`.
pub fn extract_video_id(url: &str) -> Option<String> {
    let id = VIDEO_ID_RE
        .captures(url.trim())
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string());
    match &id {
        Some(id) => debug!("Extracted video id {} from input", id),
        None if !url.trim().is_empty() => debug!("No video id in input {:?}", url),
        None => {}
    }
    id
}

/// Player URL for the inline preview
pub fn embed_url(video_id: &str) -> String {
    format!(
        "https://www.youtube.com/embed/{}?autoplay=0&modestbranding=1&rel=0&showinfo=0&fs=1",
        video_id
    )
}

/// Player URL for the fullscreen presentation (autoplays, native fullscreen disabled)
pub fn fullscreen_embed_url(video_id: &str) -> String {
    format!(
        "https://www.youtube.com/embed/{}?autoplay=1&modestbranding=1&rel=0&fs=0",
        video_id
    )
}

/// External link offered when the video cannot be embedded
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// The configured overlay target and whether embedding it failed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedTarget {
    pub url: String,
    pub video_id: Option<String>,
    pub embed_error: bool,
}

impl EmbedTarget {
    /// Replace the pasted URL; clears any previous embed error
    pub fn set_url(&mut self, url: &str) -> Option<&str> {
        self.url = url.to_string();
        self.video_id = extract_video_id(url);
        self.embed_error = false;
        self.video_id.as_deref()
    }

    pub fn has_target(&self) -> bool {
        self.video_id.is_some()
    }

    /// The player reported it cannot embed the target; returns whether the flag changed
    pub fn report_error(&mut self) -> bool {
        if self.video_id.is_none() || self.embed_error {
            return false;
        }
        warn!("Embed failed for video {:?}", self.video_id);
        self.embed_error = true;
        true
    }

    pub fn embed_url(&self) -> Option<String> {
        self.video_id.as_deref().map(embed_url)
    }

    /// Player URL for the fullscreen presentation
    pub fn fullscreen_embed_url(&self) -> Option<String> {
        self.video_id.as_deref().map(fullscreen_embed_url)
    }

    /// Fallback link, only offered while the embed is failing
    pub fn fallback_link(&self) -> Option<String> {
        if !self.embed_error {
            return None;
        }
        self.video_id.as_deref().map(watch_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_common_link_forms() {
        let expected = Some("dQw4w9WgXcQ".to_string());
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10s"), expected);
        assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ"), expected);
        assert_eq!(extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ?rel=0"), expected);
        assert_eq!(extract_video_id("youtube.com/watch?feature=share&v=dQw4w9WgXcQ"), expected);
        assert_eq!(extract_video_id("  https://youtu.be/dQw4w9WgXcQ  "), expected);
    }

    #[test]
    fn rejects_non_matching_input() {
        assert_eq!(extract_video_id("not a url"), None);
        assert_eq!(extract_video_id(""), None);
        assert_eq!(extract_video_id("https://youtu.be/short"), None);
        assert_eq!(extract_video_id("https://example.com/watch?v=dQw4w9WgXcQ"), None);
    }

    #[test]
    fn embed_error_exposes_fallback_link() {
        let mut target = EmbedTarget::default();
        assert!(!target.report_error(), "no target, nothing to fail");
        target.set_url("https://youtu.be/dQw4w9WgXcQ");
        assert!(target.fallback_link().is_none());
        assert!(target.report_error());
        assert!(!target.report_error());
        assert_eq!(
            target.fallback_link().as_deref(),
            Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
        );
        target.set_url("https://youtu.be/dQw4w9WgXcQ");
        assert!(!target.embed_error);
    }

    #[test]
    fn embed_urls_carry_player_parameters() {
        assert!(embed_url("abc").contains("autoplay=0"));
        assert!(fullscreen_embed_url("abc").contains("autoplay=1"));
        assert!(fullscreen_embed_url("abc").contains("fs=0"));
    }
}
