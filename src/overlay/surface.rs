//! Composition surface: the container box the overlay is anchored to
//!
//! The stored position is the element's *center* as a percentage of the
//! container. Rendering resolves it to a pixel rectangle against the
//! container's current measurement; gesture commits convert back.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tracing::{debug, warn};

use super::geometry::{PercentPoint, Point, Rect, Size};
use super::interaction::{HitTarget, ResizeDirection};

/// Side length of the square resize handles at each corner
pub const CORNER_HANDLE_PX: f64 = 16.0;
/// Thickness of the edge resize strips between the corners
pub const EDGE_HANDLE_PX: f64 = 8.0;

/// Sub-pixel jitter below this is not reported as a size change
const SIZE_EPSILON: f64 = 0.01;

/// The container region and its coordinate conversions
#[derive(Debug, Clone, Default)]
pub struct CompositionSurface {
    container: Size,
}

impl CompositionSurface {
    pub fn new(container: Size) -> Self {
        Self { container }
    }

    /// Record a new container measurement (layout reflow, window resize, fullscreen)
    pub fn set_container(&mut self, container: Size) {
        if !container.is_measurable() {
            debug!("Container measured as {:?}, deferring interaction", container);
        }
        self.container = container;
    }

    /// Current container size, or `None` while it has not been laid out
    pub fn container(&self) -> Option<Size> {
        self.container.is_measurable().then_some(self.container)
    }

    /// Raw last measurement, including unusable ones
    pub fn raw_container(&self) -> Size {
        self.container
    }

    /// Pixel rectangle of an element whose center sits at `position`
    pub fn element_rect(&self, position: PercentPoint, element: Size) -> Option<Rect> {
        let container = self.container()?;
        let center = position.to_pixels(container);
        Some(Rect::new(
            center.x - element.width / 2.0,
            center.y - element.height / 2.0,
            element.width,
            element.height,
        ))
    }

    /// Percentage position (center anchor) of a pixel rectangle
    pub fn position_for(&self, rect: Rect) -> Option<PercentPoint> {
        PercentPoint::from_pixels(rect.center(), self.container()?)
    }

    /// Shift `rect` the minimum amount needed to keep it inside the container.
    ///
    /// When the element is larger than the container on an axis it is pinned to 0.
    pub fn constrain(&self, rect: Rect) -> Option<Rect> {
        let container = self.container()?;
        let x = rect.x.min(container.width - rect.width).max(0.0);
        let y = rect.y.min(container.height - rect.height).max(0.0);
        Some(Rect::new(x, y, rect.width, rect.height))
    }

    /// Classify a pointer-down location relative to the rendered element.
    ///
    /// Corners take precedence over edges, edges over the body.
    pub fn hit_test(&self, pointer: Point, element: Rect) -> HitTarget {
        if !element.contains(pointer) {
            return HitTarget::Outside;
        }

        let near_left = pointer.x < element.x + CORNER_HANDLE_PX;
        let near_right = pointer.x >= element.right() - CORNER_HANDLE_PX;
        let near_top = pointer.y < element.y + CORNER_HANDLE_PX;
        let near_bottom = pointer.y >= element.bottom() - CORNER_HANDLE_PX;

        let corner = match (near_top, near_bottom, near_left, near_right) {
            (true, _, true, _) => Some(ResizeDirection::NW),
            (true, _, _, true) => Some(ResizeDirection::NE),
            (_, true, true, _) => Some(ResizeDirection::SW),
            (_, true, _, true) => Some(ResizeDirection::SE),
            _ => None,
        };
        if let Some(direction) = corner {
            return HitTarget::Handle(direction);
        }

        if pointer.y < element.y + EDGE_HANDLE_PX {
            HitTarget::Handle(ResizeDirection::N)
        } else if pointer.y >= element.bottom() - EDGE_HANDLE_PX {
            HitTarget::Handle(ResizeDirection::S)
        } else if pointer.x < element.x + EDGE_HANDLE_PX {
            HitTarget::Handle(ResizeDirection::W)
        } else if pointer.x >= element.right() - EDGE_HANDLE_PX {
            HitTarget::Handle(ResizeDirection::E)
        } else {
            HitTarget::Body
        }
    }
}

/// Size observation for the overlay element: reports only real changes
#[derive(Debug, Clone, Default)]
pub struct SizeObserver {
    last: Option<Size>,
}

impl SizeObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a measurement; returns it back only if it differs from the last one
    pub fn observe(&mut self, size: Size) -> Option<Size> {
        if !size.is_measurable() {
            return None;
        }
        let changed = match self.last {
            Some(last) => {
                (last.width - size.width).abs() > SIZE_EPSILON
                    || (last.height - size.height).abs() > SIZE_EPSILON
            }
            None => true,
        };
        if changed {
            self.last = Some(size);
            Some(size)
        } else {
            None
        }
    }

    pub fn last(&self) -> Option<Size> {
        self.last
    }
}

/// Window-level event kinds a gesture listens to while it is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerMove,
    PointerUp,
}

/// Registry of window-level listeners currently attached.
///
/// Attaching returns a [`ListenerGuard`]; the listener stays registered exactly
/// as long as the guard is alive.
#[derive(Debug, Clone, Default)]
pub struct GlobalListeners {
    active: Arc<Mutex<HashMap<ListenerKind, usize>>>,
}

impl GlobalListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, kind: ListenerKind) -> ListenerGuard {
        match self.active.lock() {
            Ok(mut active) => *active.entry(kind).or_insert(0) += 1,
            Err(e) => warn!("Failed to lock listener registry: {}", e),
        }
        ListenerGuard {
            kind,
            registry: self.clone(),
        }
    }

    pub fn count(&self, kind: ListenerKind) -> usize {
        self.active
            .lock()
            .map(|active| active.get(&kind).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.count(kind) > 0
    }

    pub fn total(&self) -> usize {
        self.active
            .lock()
            .map(|active| active.values().sum())
            .unwrap_or(0)
    }

    fn detach(&self, kind: ListenerKind) {
        match self.active.lock() {
            Ok(mut active) => {
                if let Some(count) = active.get_mut(&kind) {
                    *count = count.saturating_sub(1);
                    if *count == 0 {
                        active.remove(&kind);
                    }
                }
            }
            Err(e) => warn!("Failed to lock listener registry: {}", e),
        }
    }
}

/// A registered window-level listener; detaches on drop
#[derive(Debug)]
pub struct ListenerGuard {
    kind: ListenerKind,
    registry: GlobalListeners,
}

impl ListenerGuard {
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.registry.detach(self.kind);
    }
}
