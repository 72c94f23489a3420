//! Display dimensions of the enlarged container.

use crate::constants::{CAPTION_WIDTH_FRACTION, VIEWPORT_FRACTION};
use serde::Serialize;

/// Size of the enlarged container in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ViewportDimensions {
    pub width: f32,
    pub height: f32,
}

/// Keeps [`ViewportDimensions`] at a fixed fraction of the browser viewport.
///
/// Hosts call [`ResizeObserver::observe`] once at mount and on every resize.
#[derive(Debug, Clone)]
pub struct ResizeObserver {
    fraction: f32,
    dimensions: ViewportDimensions,
}

impl Default for ResizeObserver {
    fn default() -> Self {
        Self::new(VIEWPORT_FRACTION)
    }
}

impl ResizeObserver {
    pub fn new(fraction: f32) -> Self {
        Self {
            fraction,
            dimensions: ViewportDimensions::default(),
        }
    }

    /// Recompute from the current viewport box.
    pub fn observe(&mut self, viewport_width: f32, viewport_height: f32) -> ViewportDimensions {
        let width = viewport_width.max(0.0) * self.fraction;
        let height = viewport_height.max(0.0) * self.fraction;
        self.dimensions = ViewportDimensions { width, height };
        log::trace!("Viewer container resized to {width:.0}x{height:.0}");
        self.dimensions
    }

    pub fn dimensions(&self) -> ViewportDimensions {
        self.dimensions
    }

    /// Maximum width of the caption block.
    pub fn caption_width(&self) -> f32 {
        self.dimensions.width * CAPTION_WIDTH_FRACTION
    }
}

/// Viewport box as browsers report it: the larger of the document client box
/// and the window inner box, per axis.
pub fn viewport_box(client: (f32, f32), inner: (f32, f32)) -> (f32, f32) {
    (client.0.max(inner.0), client.1.max(inner.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_zero_before_first_observation() {
        let observer = ResizeObserver::default();
        assert_eq!(observer.dimensions(), ViewportDimensions::default());
    }

    #[test]
    fn test_observe_takes_ninety_percent() {
        let mut observer = ResizeObserver::default();
        let dims = observer.observe(1000.0, 800.0);
        assert!(approx_eq(dims.width, 900.0));
        assert!(approx_eq(dims.height, 720.0));
        assert!(approx_eq(observer.caption_width(), 630.0));
    }

    #[test]
    fn test_every_resize_is_applied() {
        let mut observer = ResizeObserver::default();
        observer.observe(1000.0, 800.0);
        observer.observe(500.0, 400.0);
        assert!(approx_eq(observer.dimensions().width, 450.0));
        assert!(approx_eq(observer.dimensions().height, 360.0));
    }

    #[test]
    fn test_negative_sizes_floor_at_zero() {
        let mut observer = ResizeObserver::default();
        let dims = observer.observe(-10.0, 100.0);
        assert_eq!(dims.width, 0.0);
    }

    #[test]
    fn test_viewport_box_takes_larger_axis() {
        assert_eq!(viewport_box((1024.0, 600.0), (1040.0, 580.0)), (1040.0, 600.0));
    }
}
