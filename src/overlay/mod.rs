//! Overlay engine module
//!
//! Geometry, the composition surface, pointer interaction and the font-size
//! resolver for the timer readout overlay.

pub mod geometry;
pub mod interaction;
pub mod style;
pub mod surface;

// Re-export main types
pub use geometry::{PercentPoint, Point, Rect, Size};
pub use interaction::{
    GestureAnchor, GestureUpdate, HitTarget, InteractionEngine, InteractionMode, ResizeDirection,
    MIN_ELEMENT_SIZE,
};
pub use style::{box_for_font, fit_font, FontBounds};
pub use surface::{CompositionSurface, GlobalListeners, ListenerGuard, ListenerKind, SizeObserver};
