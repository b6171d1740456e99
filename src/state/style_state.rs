//! Timer readout style and field-by-field partial updates

use serde::{Deserialize, Serialize};

use crate::overlay::FontBounds;

pub const DEFAULT_FONT_SIZE_PX: u32 = 24;
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";
pub const DEFAULT_BACKGROUND_OPACITY: u8 = 70;

/// Visual configuration of the readout, independent of its placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerStyle {
    pub font_size_px: u32,
    /// Opaque descriptor from the font catalog
    pub font_family: String,
    pub background_opacity_percent: u8,
}

/// A partial style update; absent fields leave the current value alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size_px: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_opacity_percent: Option<u8>,
}

impl StylePatch {
    pub fn font_size(px: u32) -> Self {
        Self {
            font_size_px: Some(px),
            ..Self::default()
        }
    }

    pub fn font_family(family: impl Into<String>) -> Self {
        Self {
            font_family: Some(family.into()),
            ..Self::default()
        }
    }

    pub fn background_opacity(percent: u8) -> Self {
        Self {
            background_opacity_percent: Some(percent),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.font_size_px.is_none() && self.font_family.is_none() && self.background_opacity_percent.is_none()
    }
}

impl TimerStyle {
    /// Return a copy with the fields present in `patch` replaced.
    ///
    /// Values are bounded: font size to `FontBounds::DEFAULT`, opacity to 0–100.
    pub fn merge(&self, patch: &StylePatch) -> TimerStyle {
        TimerStyle {
            font_size_px: patch
                .font_size_px
                .map(|px| FontBounds::DEFAULT.clamp(px as i64))
                .unwrap_or(self.font_size_px),
            font_family: patch
                .font_family
                .clone()
                .unwrap_or_else(|| self.font_family.clone()),
            background_opacity_percent: patch
                .background_opacity_percent
                .map(|percent| percent.min(100))
                .unwrap_or(self.background_opacity_percent),
        }
    }

    /// In-place variant of [`TimerStyle::merge`]
    pub fn apply(&mut self, patch: &StylePatch) {
        *self = self.merge(patch);
    }
}

impl Default for TimerStyle {
    fn default() -> Self {
        Self {
            font_size_px: DEFAULT_FONT_SIZE_PX,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            background_opacity_percent: DEFAULT_BACKGROUND_OPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styled() -> TimerStyle {
        TimerStyle {
            font_size_px: 48,
            font_family: "Georgia".to_string(),
            background_opacity_percent: 35,
        }
    }

    #[test]
    fn merge_changes_only_present_fields() {
        let style = styled();
        let merged = style.merge(&StylePatch::font_size(30));
        assert_eq!(merged.font_size_px, 30);
        assert_eq!(merged.font_family, "Georgia");
        assert_eq!(merged.background_opacity_percent, 35);
        assert_eq!(style.font_size_px, 48, "input is untouched");
    }

    #[test]
    fn empty_patch_is_identity() {
        let patch = StylePatch::default();
        assert!(patch.is_empty());
        assert_eq!(styled().merge(&patch), styled());
    }

    #[test]
    fn merge_bounds_values() {
        let mut style = styled();
        style.apply(&StylePatch::font_size(1));
        assert_eq!(style.font_size_px, 12);
        style.apply(&StylePatch::font_size(999));
        assert_eq!(style.font_size_px, 200);
        style.apply(&StylePatch::background_opacity(250));
        assert_eq!(style.background_opacity_percent, 100);
        assert_eq!(style.font_family, "Georgia");
    }

    #[test]
    fn patch_deserializes_with_missing_fields() {
        let patch: StylePatch = serde_json::from_str(r#"{"font_family":"Impact"}"#).expect("valid patch");
        assert_eq!(patch, StylePatch::font_family("Impact"));
        let merged = styled().merge(&patch);
        assert_eq!(merged.font_size_px, 48);
        assert_eq!(merged.font_family, "Impact");
    }
}
