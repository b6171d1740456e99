//! Placement of the timer readout over the video

use serde::{Deserialize, Serialize};

use crate::overlay::{box_for_font, FontBounds, PercentPoint, Size};

use super::style_state::DEFAULT_FONT_SIZE_PX;

/// Overlay placement: center-anchored percentage position plus the last measured box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlayGeometry {
    pub position: PercentPoint,
    /// Written only by the size-observation path
    pub dimensions: Size,
}

impl OverlayGeometry {
    pub fn new(position: PercentPoint, dimensions: Size) -> Self {
        Self { position, dimensions }
    }
}

impl Default for OverlayGeometry {
    fn default() -> Self {
        Self::new(
            PercentPoint::new(50.0, 10.0),
            box_for_font(DEFAULT_FONT_SIZE_PX, FontBounds::DEFAULT),
        )
    }
}
