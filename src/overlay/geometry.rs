//! Pixel and percentage geometry primitives used by the overlay

use serde::{Deserialize, Serialize};

/// A point in absolute pixels, relative to the container's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - origin`
    pub fn delta_from(&self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }

    pub fn offset(&self, delta: Point) -> Point {
        Point::new(self.x + delta.x, self.y + delta.y)
    }
}

/// A width/height pair in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size::new(0.0, 0.0);

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A size is usable for layout math only when both sides are positive and finite
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// An axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Half-open containment test: left/top edges inclusive, right/bottom exclusive
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// True when `self` lies entirely inside a `bounds`-sized box anchored at (0, 0)
    pub fn fits_within(&self, bounds: Size) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.right() <= bounds.width && self.bottom() <= bounds.height
    }
}

/// Position expressed as a percentage (0–100) of the container's width and height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentPoint {
    pub x_percent: f64,
    pub y_percent: f64,
}

impl PercentPoint {
    pub fn new(x_percent: f64, y_percent: f64) -> Self {
        Self {
            x_percent: clamp_percent(x_percent),
            y_percent: clamp_percent(y_percent),
        }
    }

    /// Resolve against a container size to an absolute pixel point
    pub fn to_pixels(&self, container: Size) -> Point {
        Point::new(
            self.x_percent * container.width / 100.0,
            self.y_percent * container.height / 100.0,
        )
    }

    /// Convert an absolute pixel point back to percentages of `container`.
    ///
    /// Returns `None` when the container has no measurable size yet.
    pub fn from_pixels(point: Point, container: Size) -> Option<Self> {
        if !container.is_measurable() {
            return None;
        }
        Some(Self::new(
            point.x * 100.0 / container.width,
            point.y * 100.0 / container.height,
        ))
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Clamp `value` into `[min, max]`, preferring `min` when the range is inverted
pub fn clamp_floor_first(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_round_trips_through_pixels() {
        let container = Size::new(800.0, 450.0);
        let point = PercentPoint::new(92.5, 40.0);
        let px = point.to_pixels(container);
        assert_eq!(px, Point::new(740.0, 180.0));
        assert_eq!(PercentPoint::from_pixels(px, container), Some(point));
    }

    #[test]
    fn percent_is_clamped_into_range() {
        let point = PercentPoint::new(-5.0, 140.0);
        assert_eq!(point.x_percent, 0.0);
        assert_eq!(point.y_percent, 100.0);
        assert_eq!(PercentPoint::new(f64::NAN, 10.0).x_percent, 0.0);
    }

    #[test]
    fn unmeasured_container_yields_no_percentage() {
        assert!(PercentPoint::from_pixels(Point::new(10.0, 10.0), Size::ZERO).is_none());
        assert!(PercentPoint::from_pixels(Point::new(10.0, 10.0), Size::new(100.0, 0.0)).is_none());
    }

    #[test]
    fn rect_edges_and_containment() {
        let rect = Rect::new(20.0, 20.0, 120.0, 60.0);
        assert_eq!(rect.right(), 140.0);
        assert_eq!(rect.bottom(), 80.0);
        assert_eq!(rect.center(), Point::new(80.0, 50.0));
        assert!(rect.contains(Point::new(20.0, 20.0)));
        assert!(!rect.contains(Point::new(140.0, 50.0)));
        assert!(rect.fits_within(Size::new(800.0, 450.0)));
        assert!(!rect.fits_within(Size::new(100.0, 450.0)));
    }

    #[test]
    fn floor_wins_on_inverted_range() {
        assert_eq!(clamp_floor_first(5.0, 100.0, 50.0), 100.0);
        assert_eq!(clamp_floor_first(75.0, 10.0, 50.0), 50.0);
    }
}
