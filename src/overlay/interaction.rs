//! Pointer-driven drag and resize of the overlay inside its container
//!
//! A gesture starts on pointer-down (drag on the body, resize on a handle),
//! follows pointer moves from anywhere in the window while it is active, and
//! ends on pointer-up. All math during a gesture is in container pixels,
//! measured from the anchor captured at gesture start.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::geometry::{clamp_floor_first, Point, Rect, Size};
use super::surface::{GlobalListeners, ListenerGuard, ListenerKind};

/// Resize floor; the element never shrinks below this
pub const MIN_ELEMENT_SIZE: Size = Size::new(100.0, 50.0);

/// Edge or corner being dragged during a resize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeDirection {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl ResizeDirection {
    pub const ALL: [ResizeDirection; 8] = [
        ResizeDirection::N,
        ResizeDirection::S,
        ResizeDirection::E,
        ResizeDirection::W,
        ResizeDirection::NE,
        ResizeDirection::NW,
        ResizeDirection::SE,
        ResizeDirection::SW,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "n" => Some(Self::N),
            "s" => Some(Self::S),
            "e" => Some(Self::E),
            "w" => Some(Self::W),
            "ne" => Some(Self::NE),
            "nw" => Some(Self::NW),
            "se" => Some(Self::SE),
            "sw" => Some(Self::SW),
            _ => None,
        }
    }

    fn moves_left(self) -> bool {
        matches!(self, Self::W | Self::NW | Self::SW)
    }

    fn moves_right(self) -> bool {
        matches!(self, Self::E | Self::NE | Self::SE)
    }

    fn moves_top(self) -> bool {
        matches!(self, Self::N | Self::NE | Self::NW)
    }

    fn moves_bottom(self) -> bool {
        matches!(self, Self::S | Self::SE | Self::SW)
    }
}

/// What a pointer-down landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Outside,
    Body,
    Handle(ResizeDirection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "direction", rename_all = "lowercase")]
pub enum InteractionMode {
    Idle,
    Dragging,
    Resizing(ResizeDirection),
}

/// Pointer and element state captured when a gesture begins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureAnchor {
    pub pointer_start: Point,
    pub element_start: Rect,
    /// Font size at gesture start, for font-coupled readouts
    pub font_start: u32,
}

/// Result of feeding one pointer move into the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureUpdate {
    /// No gesture in progress
    Ignored,
    /// Container has no usable measurement yet; nothing was computed
    Deferred,
    Moved(Rect),
    Resized(Rect),
}

#[derive(Debug)]
struct ActiveGesture {
    mode: InteractionMode,
    anchor: GestureAnchor,
    _listeners: [ListenerGuard; 2],
}

/// Drag/resize state machine for the single overlay element
#[derive(Debug)]
pub struct InteractionEngine {
    gesture: Option<ActiveGesture>,
    listeners: GlobalListeners,
}

impl InteractionEngine {
    pub fn new(listeners: GlobalListeners) -> Self {
        Self {
            gesture: None,
            listeners,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.gesture
            .as_ref()
            .map(|gesture| gesture.mode)
            .unwrap_or(InteractionMode::Idle)
    }

    pub fn anchor(&self) -> Option<&GestureAnchor> {
        self.gesture.as_ref().map(|gesture| &gesture.anchor)
    }

    pub fn listeners(&self) -> &GlobalListeners {
        &self.listeners
    }

    /// Route a pointer-down to the right gesture.
    ///
    /// A press on a resize handle is consumed by the handle and never also
    /// starts a drag. Returns whether a gesture started.
    pub fn pointer_down(&mut self, pointer: Point, target: HitTarget, element: Rect, font_px: u32) -> bool {
        match target {
            HitTarget::Handle(direction) => self.begin_resize(pointer, direction, element, font_px),
            HitTarget::Body => self.begin_drag(pointer, element, font_px),
            HitTarget::Outside => false,
        }
    }

    /// Start dragging; only valid from idle
    pub fn begin_drag(&mut self, pointer: Point, element: Rect, font_px: u32) -> bool {
        if self.gesture.is_some() {
            debug!("Ignoring drag start, gesture already active: {:?}", self.mode());
            return false;
        }
        self.start(InteractionMode::Dragging, pointer, element, font_px);
        true
    }

    /// Start resizing from `direction`. Preempts a drag; never preempts another resize.
    pub fn begin_resize(&mut self, pointer: Point, direction: ResizeDirection, element: Rect, font_px: u32) -> bool {
        match self.mode() {
            InteractionMode::Resizing(current) => {
                debug!("Ignoring resize start, already resizing {:?}", current);
                return false;
            }
            InteractionMode::Dragging => {
                debug!("Resize requested during drag, resize wins");
                self.gesture = None;
            }
            InteractionMode::Idle => {}
        }
        self.start(InteractionMode::Resizing(direction), pointer, element, font_px);
        true
    }

    /// Apply a pointer move against the container's *current* size
    pub fn on_pointer_move(&mut self, pointer: Point, container: Option<Size>) -> GestureUpdate {
        let Some(gesture) = self.gesture.as_ref() else {
            return GestureUpdate::Ignored;
        };
        let Some(container) = container.filter(Size::is_measurable) else {
            return GestureUpdate::Deferred;
        };

        match gesture.mode {
            InteractionMode::Dragging => GestureUpdate::Moved(drag_to(&gesture.anchor, pointer, container)),
            InteractionMode::Resizing(direction) => {
                GestureUpdate::Resized(resize_to(&gesture.anchor, direction, pointer, container))
            }
            InteractionMode::Idle => GestureUpdate::Ignored,
        }
    }

    /// End whatever gesture is active and detach its window listeners.
    ///
    /// Returns the mode that was active.
    pub fn end_gesture(&mut self) -> InteractionMode {
        let previous = self.mode();
        if self.gesture.take().is_some() {
            info!("Gesture ended: {:?}", previous);
        }
        previous
    }

    fn start(&mut self, mode: InteractionMode, pointer: Point, element: Rect, font_px: u32) {
        info!("Gesture started: {:?} at ({:.1}, {:.1})", mode, pointer.x, pointer.y);
        self.gesture = Some(ActiveGesture {
            mode,
            anchor: GestureAnchor {
                pointer_start: pointer,
                element_start: element,
                font_start: font_px,
            },
            _listeners: [
                self.listeners.attach(ListenerKind::PointerMove),
                self.listeners.attach(ListenerKind::PointerUp),
            ],
        });
    }
}

impl Default for InteractionEngine {
    fn default() -> Self {
        Self::new(GlobalListeners::new())
    }
}

/// Element rectangle after dragging the pointer to `pointer`, kept fully inside `container`
pub fn drag_to(anchor: &GestureAnchor, pointer: Point, container: Size) -> Rect {
    let start = anchor.element_start;
    let target = start.origin().offset(pointer.delta_from(anchor.pointer_start));
    let x = clamp_floor_first(target.x, 0.0, container.width - start.width);
    let y = clamp_floor_first(target.y, 0.0, container.height - start.height);
    Rect::from_origin_size(Point::new(x, y), start.size())
}

/// Element rectangle after resizing from `direction`.
///
/// The edges opposite the grabbed ones stay fixed. Each axis is bounded
/// below by [`MIN_ELEMENT_SIZE`] and above by the container edge; the floor
/// wins when the container is too small to honour both.
pub fn resize_to(anchor: &GestureAnchor, direction: ResizeDirection, pointer: Point, container: Size) -> Rect {
    let start = anchor.element_start;
    let delta = pointer.delta_from(anchor.pointer_start);

    let (x, width) = if direction.moves_right() {
        let width = clamp_floor_first(start.width + delta.x, MIN_ELEMENT_SIZE.width, container.width - start.x);
        (start.x, width)
    } else if direction.moves_left() {
        let right = start.right();
        let width = clamp_floor_first(start.width - delta.x, MIN_ELEMENT_SIZE.width, right);
        (right - width, width)
    } else {
        (start.x, start.width)
    };

    let (y, height) = if direction.moves_bottom() {
        let height = clamp_floor_first(start.height + delta.y, MIN_ELEMENT_SIZE.height, container.height - start.y);
        (start.y, height)
    } else if direction.moves_top() {
        let bottom = start.bottom();
        let height = clamp_floor_first(start.height - delta.y, MIN_ELEMENT_SIZE.height, bottom);
        (bottom - height, height)
    } else {
        (start.y, start.height)
    };

    Rect::new(x, y, width, height)
}
