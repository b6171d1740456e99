//! The session controller: one owner for timer, style, geometry and interaction
//!
//! Every mutation goes through a method here. Methods are plain functions of
//! the previous state plus one event, so a single call can touch several
//! slices (a resize also re-derives the font) without lost updates.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    overlay::{
        box_for_font, fit_font, CompositionSurface, FontBounds, GestureUpdate, GlobalListeners,
        HitTarget, InteractionEngine, InteractionMode, PercentPoint, Point, Rect, Size,
        SizeObserver, MIN_ELEMENT_SIZE,
    },
    presentation::{EventPhase, FullscreenSnapshot, FullscreenState, Key, KeyDisposition},
    services::{label_for, EmbedTarget},
    utils::{format_clock, format_duration},
};

use super::{
    overlay_state::OverlayGeometry,
    style_state::{StylePatch, TimerStyle},
    timer_state::{TickOutcome, TimerPhase, TimerSession},
};

/// Default container: a 16:9 preview surface
pub const DEFAULT_CONTAINER: Size = Size::new(800.0, 450.0);

/// Which controls are usable right now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlsState {
    pub play_enabled: bool,
    pub reset_enabled: bool,
    pub fullscreen_enabled: bool,
    /// The player could not embed the target; the countdown still works
    pub embed_degraded: bool,
}

/// Countdown view for the readout and the configuration panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub duration_seconds: u32,
    pub remaining_seconds: u32,
    pub phase: TimerPhase,
    pub running: bool,
    pub readout: String,
    pub duration_label: String,
}

/// Read-only view of the whole session, published after each change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub video_id: Option<String>,
    /// Player URL for the current presentation, inline or fullscreen
    pub embed_url: Option<String>,
    pub embed_error: bool,
    pub fallback_link: Option<String>,
    pub timer: TimerSnapshot,
    pub style: TimerStyle,
    pub font_label: String,
    pub geometry: OverlayGeometry,
    /// Rendered element box in container pixels, absent until the container is laid out
    pub element: Option<Rect>,
    /// Whether the readout is drawn; fullscreen hides it once the countdown hits zero
    pub overlay_visible: bool,
    pub container: Size,
    pub interaction: InteractionMode,
    pub fullscreen: FullscreenSnapshot,
    pub controls: ControlsState,
}

/// What a pointer event did to the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    /// Not consumed by the overlay
    Ignored,
    GestureStarted(InteractionMode),
    Deferred,
    Moved(PercentPoint),
    Resized { dimensions: Size, font_size_px: u32 },
    GestureEnded(InteractionMode),
}

/// Aggregate state owned by the session controller
#[derive(Debug)]
pub struct Session {
    target: EmbedTarget,
    timer: TimerSession,
    style: TimerStyle,
    geometry: OverlayGeometry,
    surface: CompositionSurface,
    observer: SizeObserver,
    interaction: InteractionEngine,
    fullscreen: FullscreenState,
    font_bounds: FontBounds,
}

impl Session {
    pub fn new(duration_seconds: i64, container: Size) -> Self {
        let geometry = OverlayGeometry::default();
        let mut session = Self {
            target: EmbedTarget::default(),
            timer: TimerSession::new(duration_seconds),
            style: TimerStyle::default(),
            geometry,
            surface: CompositionSurface::new(container),
            observer: SizeObserver::new(),
            interaction: InteractionEngine::new(GlobalListeners::new()),
            fullscreen: FullscreenState::new(),
            font_bounds: FontBounds::DEFAULT,
        };
        session.report_element_size(geometry.dimensions);
        session
    }

    pub fn timer(&self) -> &TimerSession {
        &self.timer
    }

    pub fn style(&self) -> &TimerStyle {
        &self.style
    }

    pub fn geometry(&self) -> &OverlayGeometry {
        &self.geometry
    }

    pub fn target(&self) -> &EmbedTarget {
        &self.target
    }

    pub fn fullscreen(&self) -> &FullscreenState {
        &self.fullscreen
    }

    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    pub fn listeners(&self) -> &GlobalListeners {
        self.interaction.listeners()
    }

    pub fn has_target(&self) -> bool {
        self.target.has_target()
    }

    // ---- video target -------------------------------------------------

    /// Paste a new URL. Returns the extracted identifier, if any.
    ///
    /// Losing the target resets the countdown and leaves fullscreen, since
    /// neither is available without one.
    pub fn set_url(&mut self, url: &str) -> Option<String> {
        let id = self.target.set_url(url).map(str::to_string);
        match &id {
            Some(id) => {
                info!("Overlay target set to {}", id);
                if !self.timer.is_running() {
                    self.timer.reset();
                }
            }
            None => {
                debug!("No overlay target configured");
                self.timer.reset();
                self.fullscreen.exit();
            }
        }
        id
    }

    pub fn report_embed_error(&mut self) -> bool {
        self.target.report_error()
    }

    // ---- countdown ----------------------------------------------------

    pub fn set_duration(&mut self, seconds: i64) -> u32 {
        self.timer.set_duration(seconds)
    }

    /// Start or resume; a no-op without an overlay target
    pub fn play(&mut self) -> bool {
        if !self.has_target() {
            debug!("Play ignored, no overlay target");
            return false;
        }
        self.timer.play()
    }

    pub fn pause(&mut self) -> bool {
        self.timer.pause()
    }

    /// The play button: pause when running, otherwise play
    pub fn toggle_play(&mut self) -> bool {
        if self.timer.is_running() {
            self.pause();
            false
        } else {
            self.play()
        }
    }

    pub fn reset(&mut self) {
        self.timer.reset();
    }

    pub fn tick(&mut self) -> TickOutcome {
        self.timer.tick()
    }

    // ---- style --------------------------------------------------------

    /// Merge a partial style update.
    ///
    /// Font size is derived from the overlay box, so a requested size is
    /// honoured by resizing the box to fit it; the font is then re-derived
    /// from the new box.
    pub fn apply_style(&mut self, patch: &StylePatch) -> &TimerStyle {
        let requested_font = patch.font_size_px;
        let rest = StylePatch {
            font_size_px: None,
            ..patch.clone()
        };
        self.style.apply(&rest);

        if let Some(px) = requested_font {
            let size = self.box_within_container(box_for_font(px, self.font_bounds));
            let center = self.element_center();
            self.report_element_size(size);
            if let Some(center) = center {
                self.recenter(center, size);
            }
        }
        &self.style
    }

    // ---- geometry -----------------------------------------------------

    /// Move the overlay's center to `position`
    pub fn set_position(&mut self, position: PercentPoint) {
        self.geometry.position = position;
    }

    /// New container measurement; stored percentages keep the overlay anchored
    pub fn set_container(&mut self, container: Size) {
        self.surface.set_container(container);
    }

    /// Size observation for the overlay element.
    ///
    /// Only an actual change updates the geometry and re-derives the font.
    pub fn report_element_size(&mut self, size: Size) -> bool {
        let Some(size) = self.observer.observe(size) else {
            return false;
        };
        self.geometry.dimensions = size;
        let font = fit_font(size, self.font_bounds);
        if font != self.style.font_size_px {
            debug!("Font re-derived {} -> {}px for box {:?}", self.style.font_size_px, font, size);
        }
        self.style.apply(&StylePatch::font_size(font));
        true
    }

    /// Rendered element box, or `None` until the container is measured
    pub fn element_rect(&self) -> Option<Rect> {
        self.surface
            .element_rect(self.geometry.position, self.geometry.dimensions)
    }

    // ---- pointer ------------------------------------------------------

    /// Pointer pressed at `pointer` (container pixels)
    pub fn pointer_down(&mut self, pointer: Point) -> PointerOutcome {
        let Some(element) = self.element_rect() else {
            return PointerOutcome::Deferred;
        };
        let target = self.surface.hit_test(pointer, element);
        if target == HitTarget::Outside {
            return PointerOutcome::Ignored;
        }
        if self
            .interaction
            .pointer_down(pointer, target, element, self.style.font_size_px)
        {
            PointerOutcome::GestureStarted(self.interaction.mode())
        } else {
            PointerOutcome::Ignored
        }
    }

    /// Pointer moved anywhere in the window.
    ///
    /// Any movement re-shows the fullscreen chrome. Only reaches the gesture
    /// while its window-level move listener is attached.
    pub fn pointer_move(&mut self, pointer: Point) -> PointerOutcome {
        self.fullscreen.pointer_activity();
        if self.interaction.mode() == InteractionMode::Idle {
            return PointerOutcome::Ignored;
        }
        match self.interaction.on_pointer_move(pointer, self.surface.container()) {
            GestureUpdate::Ignored => PointerOutcome::Ignored,
            GestureUpdate::Deferred => PointerOutcome::Deferred,
            GestureUpdate::Moved(rect) => match self.surface.position_for(rect) {
                Some(position) => {
                    self.geometry.position = position;
                    PointerOutcome::Moved(position)
                }
                None => PointerOutcome::Deferred,
            },
            GestureUpdate::Resized(rect) => {
                let Some(position) = self.surface.position_for(rect) else {
                    return PointerOutcome::Deferred;
                };
                self.geometry.position = position;
                self.report_element_size(rect.size());
                PointerOutcome::Resized {
                    dimensions: self.geometry.dimensions,
                    font_size_px: self.style.font_size_px,
                }
            }
        }
    }

    /// Pointer released anywhere; always ends the gesture
    pub fn pointer_up(&mut self) -> PointerOutcome {
        match self.interaction.end_gesture() {
            InteractionMode::Idle => PointerOutcome::Ignored,
            mode => PointerOutcome::GestureEnded(mode),
        }
    }

    // ---- fullscreen ---------------------------------------------------

    /// Flip fullscreen; `None` when there is no target to present.
    ///
    /// On entry, returns the chrome generation to arm a hide timer for.
    pub fn toggle_fullscreen(&mut self) -> Option<(bool, Option<u64>)> {
        if !self.has_target() && !self.fullscreen.is_active() {
            debug!("Fullscreen ignored, no overlay target");
            return None;
        }
        let active = self.fullscreen.toggle();
        let generation = active.then(|| self.fullscreen.generation());
        Some((active, generation))
    }

    pub fn hide_chrome(&mut self, generation: u64) -> bool {
        self.fullscreen.hide_chrome(generation)
    }

    /// Keyboard input at the given dispatch phase
    pub fn handle_key(&mut self, key: &Key, phase: EventPhase) -> KeyDisposition {
        self.fullscreen.handle_key(key, phase)
    }

    // ---- lifecycle ----------------------------------------------------

    /// Drop any in-flight gesture and its window listeners
    pub fn teardown(&mut self) {
        self.interaction.end_gesture();
        self.timer.pause();
        self.fullscreen.exit();
    }

    pub fn overlay_visible(&self) -> bool {
        !self.fullscreen.is_active() || self.timer.remaining_seconds() > 0
    }

    pub fn controls(&self) -> ControlsState {
        let has_target = self.has_target();
        ControlsState {
            play_enabled: has_target,
            reset_enabled: has_target,
            fullscreen_enabled: has_target,
            embed_degraded: self.target.embed_error,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            video_id: self.target.video_id.clone(),
            embed_url: if self.fullscreen.is_active() {
                self.target.fullscreen_embed_url()
            } else {
                self.target.embed_url()
            },
            embed_error: self.target.embed_error,
            fallback_link: self.target.fallback_link(),
            timer: TimerSnapshot {
                duration_seconds: self.timer.duration_seconds(),
                remaining_seconds: self.timer.remaining_seconds(),
                phase: self.timer.phase(),
                running: self.timer.is_running(),
                readout: format_clock(self.timer.remaining_seconds()),
                duration_label: format_duration(self.timer.duration_seconds()),
            },
            style: self.style.clone(),
            font_label: label_for(&self.style.font_family).to_string(),
            geometry: self.geometry,
            element: self.element_rect(),
            overlay_visible: self.overlay_visible(),
            container: self.surface.raw_container(),
            interaction: self.interaction.mode(),
            fullscreen: self.fullscreen.snapshot(),
            controls: self.controls(),
        }
    }

    /// Cap a requested box at the measured container; the resize floor still wins
    fn box_within_container(&self, size: Size) -> Size {
        match self.surface.container() {
            Some(container) => Size::new(
                size.width.min(container.width).max(MIN_ELEMENT_SIZE.width),
                size.height.min(container.height).max(MIN_ELEMENT_SIZE.height),
            ),
            None => size,
        }
    }

    fn element_center(&self) -> Option<Point> {
        self.element_rect().map(|rect| rect.center())
    }

    /// Place an element of `size` centered on `center`, nudged back inside the container
    fn recenter(&mut self, center: Point, size: Size) {
        let rect = Rect::new(
            center.x - size.width / 2.0,
            center.y - size.height / 2.0,
            size.width,
            size.height,
        );
        let placed = self
            .surface
            .constrain(rect)
            .and_then(|rect| self.surface.position_for(rect));
        if let Some(position) = placed {
            self.geometry.position = position;
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(
            super::timer_state::DEFAULT_DURATION_SECONDS as i64,
            DEFAULT_CONTAINER,
        )
    }
}
