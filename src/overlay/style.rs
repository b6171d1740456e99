//! Font-size derivation from the overlay box
//!
//! The readout always shows five glyphs ("MM:SS"). The largest font that fits
//! is bounded by a width estimate (glyph count times average glyph aspect,
//! minus horizontal padding) and a height estimate (line height, minus
//! vertical padding); the smaller of the two wins so text never overflows.

use super::geometry::Size;
use super::interaction::MIN_ELEMENT_SIZE;

/// Number of glyphs in the "MM:SS" readout
pub const READOUT_GLYPHS: f64 = 5.0;
/// Average glyph width as a fraction of the font size
pub const GLYPH_ASPECT: f64 = 0.6;
pub const LINE_HEIGHT: f64 = 1.2;
pub const PADDING_X: f64 = 16.0;
pub const PADDING_Y: f64 = 8.0;

const FLOAT_SLACK: f64 = 1e-9;

/// Inclusive font-size range in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontBounds {
    pub min: u32,
    pub max: u32,
}

impl FontBounds {
    pub const DEFAULT: FontBounds = FontBounds { min: 12, max: 200 };

    /// Font that fills the 100x50 resize floor. Requests below this are
    /// raised to it, since the box can not shrink further.
    pub const MIN_BOXED_PX: u32 = 22;

    pub fn clamp(&self, font_px: i64) -> u32 {
        font_px.clamp(self.min as i64, self.max as i64) as u32
    }
}

impl Default for FontBounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Largest font size whose "MM:SS" readout fits inside `size`
pub fn fit_font(size: Size, bounds: FontBounds) -> u32 {
    let by_width = (size.width - 2.0 * PADDING_X) / (READOUT_GLYPHS * GLYPH_ASPECT);
    let by_height = (size.height - 2.0 * PADDING_Y) / LINE_HEIGHT;
    let fitted = by_width.min(by_height);
    if !fitted.is_finite() {
        return bounds.min;
    }
    bounds.clamp((fitted + FLOAT_SLACK).floor() as i64)
}

/// Smallest box that renders `font_px` without overflow, never below the resize floor
pub fn box_for_font(font_px: u32, bounds: FontBounds) -> Size {
    let font = bounds.clamp(font_px as i64) as f64;
    let width = (font * READOUT_GLYPHS * GLYPH_ASPECT + 2.0 * PADDING_X - FLOAT_SLACK).ceil();
    let height = (font * LINE_HEIGHT + 2.0 * PADDING_Y - FLOAT_SLACK).ceil();
    Size::new(
        width.max(MIN_ELEMENT_SIZE.width),
        height.max(MIN_ELEMENT_SIZE.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_box_fits_the_minimum_boxed_font() {
        assert_eq!(fit_font(MIN_ELEMENT_SIZE, FontBounds::DEFAULT), FontBounds::MIN_BOXED_PX);
        assert_eq!(box_for_font(FontBounds::MIN_BOXED_PX, FontBounds::DEFAULT), MIN_ELEMENT_SIZE);
    }

    #[test]
    fn width_is_the_binding_axis_for_wide_short_boxes() {
        // width allows 24, height allows 28
        assert_eq!(fit_font(Size::new(104.0, 50.0), FontBounds::DEFAULT), 24);
    }

    #[test]
    fn height_is_the_binding_axis_for_tall_narrow_boxes() {
        // width allows 100, height allows 20
        assert_eq!(fit_font(Size::new(332.0, 40.0), FontBounds::DEFAULT), 20);
    }

    #[test]
    fn result_is_clamped_to_bounds() {
        assert_eq!(fit_font(Size::new(10.0, 10.0), FontBounds::DEFAULT), 12);
        assert_eq!(fit_font(Size::new(5000.0, 5000.0), FontBounds::DEFAULT), 200);
        assert_eq!(fit_font(Size::new(f64::NAN, 80.0), FontBounds::DEFAULT), 12);
    }

    #[test]
    fn box_for_font_fits_the_requested_font() {
        for font in [12, 24, 30, 48, 100, 200] {
            let size = box_for_font(font, FontBounds::DEFAULT);
            assert!(size.width >= MIN_ELEMENT_SIZE.width);
            assert!(size.height >= MIN_ELEMENT_SIZE.height);
            assert!(fit_font(size, FontBounds::DEFAULT) >= font, "font {font} box {size:?}");
        }
        assert_eq!(box_for_font(30, FontBounds::DEFAULT), Size::new(122.0, 52.0));
        assert_eq!(fit_font(Size::new(122.0, 52.0), FontBounds::DEFAULT), 30);
    }
}
