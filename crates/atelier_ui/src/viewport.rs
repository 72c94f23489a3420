//! Zoom, pan and drag state for the enlarged image.
//!
//! The rendering layer applies the state as `scale(s) translate(x, y)`, so the
//! offset is expressed in unscaled image-space pixels and every pointer delta
//! is divided by the current scale before it lands in the offset.

use crate::constants::{
    snap_scale, CURSOR_GRAB, CURSOR_GRABBING, REFERENCE_ZOOM, SCALE_DEFAULT, SCALE_MAX, SCALE_MIN,
    TRANSFORM_TRANSITION, TRANSFORM_TRANSITION_NONE, WHEEL_ZOOM_STEP,
};
use crate::event::Point;

/// Pan drag interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// Not dragging
    #[default]
    Idle,
    /// Dragging; `origin` anchors pointer travel to the offset at drag start
    Dragging { origin: Point },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    /// The drag anchor, present exactly while dragging.
    pub fn origin(&self) -> Option<Point> {
        match self {
            DragState::Dragging { origin } => Some(*origin),
            DragState::Idle => None,
        }
    }
}

/// Snapshot of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    /// Zoom multiplier, always within `[SCALE_MIN, SCALE_MAX]`
    pub scale: f32,
    /// Pan translation in unscaled image-space pixels
    pub offset: Point,
    /// Drag gesture
    pub drag: DragState,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scale: SCALE_DEFAULT,
            offset: Point::zero(),
            drag: DragState::Idle,
        }
    }
}

/// Translates zoom/pan/drag gestures into a consistent [`ViewportState`].
///
/// None of the operations can fail: out-of-range zoom requests clamp and
/// drag updates outside a drag are ignored.
#[derive(Debug, Clone)]
pub struct ViewportController {
    state: ViewportState,
    wheel_step: f32,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportController {
    pub fn new() -> Self {
        Self {
            state: ViewportState::default(),
            wheel_step: WHEEL_ZOOM_STEP,
        }
    }

    /// Use a different per-event wheel step.
    pub fn with_wheel_step(mut self, step: f32) -> Self {
        self.wheel_step = step.abs();
        self
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn scale(&self) -> f32 {
        self.state.scale
    }

    pub fn offset(&self) -> Point {
        self.state.offset
    }

    pub fn drag_origin(&self) -> Option<Point> {
        self.state.drag.origin()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.drag.is_dragging()
    }

    /// Add `delta` to the scale, clamped to `[SCALE_MIN, SCALE_MAX]`.
    ///
    /// Only float drift is rounded away, so arbitrarily small deltas still
    /// move the scale. Landing exactly on 1.0 recenters the image.
    pub fn zoom(&mut self, delta: f32) {
        if !delta.is_finite() {
            log::warn!("Ignoring non-finite zoom delta {delta}");
            return;
        }
        let scale = snap_scale(self.state.scale + delta).clamp(SCALE_MIN, SCALE_MAX);
        self.state.scale = scale;
        if scale == SCALE_DEFAULT {
            self.state.offset = Point::zero();
        }
        log::trace!("Zoom {delta:+.2} -> {scale:.2}");
    }

    /// Map one discrete wheel event to a fixed zoom step.
    ///
    /// Negative `delta_y` (scrolling toward the viewer) zooms in. A zero delta
    /// (horizontal-only scroll) leaves the scale alone, unlike the sign test
    /// `deltaY > 0 ? out : in` of a plain DOM handler, which zooms in on it.
    pub fn wheel(&mut self, delta_y: f32) {
        if delta_y > 0.0 {
            self.zoom(-self.wheel_step);
        } else if delta_y < 0.0 {
            self.zoom(self.wheel_step);
        }
    }

    /// Start a drag at the pointer position. Ignored if a drag is already active.
    pub fn begin_drag(&mut self, pointer: Point) {
        if self.is_dragging() {
            log::debug!("Drag already active, ignoring second press");
            return;
        }
        let origin = Point::new(
            pointer.x - self.state.offset.x * self.state.scale,
            pointer.y - self.state.offset.y * self.state.scale,
        );
        self.state.drag = DragState::Dragging { origin };
    }

    /// Follow the pointer while dragging; no-op otherwise.
    pub fn continue_drag(&mut self, pointer: Point) {
        if let DragState::Dragging { origin } = self.state.drag {
            self.state.offset = Point::new(
                (pointer.x - origin.x) / self.state.scale,
                (pointer.y - origin.y) / self.state.scale,
            );
        }
    }

    /// Finish the drag. Pointer-up and pointer-leave both route here.
    pub fn end_drag(&mut self) {
        self.state.drag = DragState::Idle;
    }

    /// Double-click behavior: jump to the reference zoom, or back to the
    /// default view if already there.
    pub fn toggle_reference_zoom(&mut self) {
        if self.state.scale == REFERENCE_ZOOM {
            self.reset();
        } else {
            self.state.scale = REFERENCE_ZOOM;
            self.state.offset = Point::zero();
        }
    }

    /// Back to scale 1.0, centered. An active drag is left untouched.
    pub fn reset(&mut self) {
        self.state.scale = SCALE_DEFAULT;
        self.state.offset = Point::zero();
    }

    /// CSS transform for the image element.
    pub fn css_transform(&self) -> String {
        format!(
            "scale({}) translate({}px, {}px)",
            self.state.scale, self.state.offset.x, self.state.offset.y
        )
    }

    /// Smoothing is off while dragging so the image follows the pointer directly.
    pub fn transition(&self) -> &'static str {
        if self.is_dragging() {
            TRANSFORM_TRANSITION_NONE
        } else {
            TRANSFORM_TRANSITION
        }
    }

    pub fn cursor(&self) -> &'static str {
        if self.is_dragging() {
            CURSOR_GRABBING
        } else {
            CURSOR_GRAB
        }
    }
}
