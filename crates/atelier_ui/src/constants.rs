//! Centralized constants for atelier_ui
//!
//! Every tuning number the enlarged-image viewer depends on lives here so the
//! hosts and the tests agree on the same values.

use std::time::Duration;

// =============================================================================
// Zoom
// =============================================================================

/// Smallest scale the viewport can reach
pub const SCALE_MIN: f32 = 0.75;

/// Largest scale the viewport can reach
pub const SCALE_MAX: f32 = 3.0;

/// Neutral scale (image fits the wrapper)
pub const SCALE_DEFAULT: f32 = 1.0;

/// Scale applied by a double click (and undone by a second one)
pub const REFERENCE_ZOOM: f32 = 1.5;

/// Zoom delta for the +/- buttons and keys
pub const BUTTON_ZOOM_STEP: f32 = 0.05;

/// Zoom delta for one discrete wheel event
pub const WHEEL_ZOOM_STEP: f32 = 0.05;

/// Grid that float drift in the scale is cleaned up onto.
/// Keeps repeated +/- steps landing exactly on 1.0 again.
pub const SCALE_RESOLUTION: f32 = 1000.0;

/// Largest distance from the grid that still counts as float drift
pub const SCALE_DRIFT: f32 = 1e-4;

/// Smallest configurable zoom step
pub const MIN_ZOOM_STEP: f32 = 1.0 / SCALE_RESOLUTION;

// =============================================================================
// Layout
// =============================================================================

/// Fraction of the browser viewport the enlarged container occupies
pub const VIEWPORT_FRACTION: f32 = 0.9;

/// Fraction of the container width the caption block may use
pub const CAPTION_WIDTH_FRACTION: f32 = 0.7;

/// Captions longer than this are truncated in the title
pub const CAPTION_MAX_CHARS: usize = 80;

/// Suffix appended to truncated captions
pub const CAPTION_ELLIPSIS: &str = "...";

// =============================================================================
// Rendering
// =============================================================================

/// Transition used for the image transform when not dragging
pub const TRANSFORM_TRANSITION: &str = "transform 0.1s ease-out";

/// Transition used while dragging (direct manipulation)
pub const TRANSFORM_TRANSITION_NONE: &str = "none";

/// Cursor over the image when idle
pub const CURSOR_GRAB: &str = "grab";

/// Cursor over the image while dragging
pub const CURSOR_GRABBING: &str = "grabbing";

// =============================================================================
// Timing
// =============================================================================

/// How long the "copied" acknowledgement stays visible
pub const COPY_ACK_DURATION: Duration = Duration::from_millis(2000);

/// Maximum interval between two presses counted as a double click
/// (only used by hosts that do not report double clicks themselves)
pub const DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(400);

// =============================================================================
// Downloads
// =============================================================================

/// File name used when downloading from the enlarged view
pub const DEFAULT_DOWNLOAD_NAME: &str = "image.png";

/// Remove float drift: a scale within `SCALE_DRIFT` of the
/// `SCALE_RESOLUTION` grid lands on it, anything else is returned unchanged.
pub fn snap_scale(scale: f32) -> f32 {
    let snapped = (scale * SCALE_RESOLUTION).round() / SCALE_RESOLUTION;
    if (snapped - scale).abs() <= SCALE_DRIFT {
        snapped
    } else {
        scale
    }
}

/// Format a scale as a whole percentage, e.g. `1.25` -> `"125%"`.
pub fn format_percent(scale: f32) -> String {
    format!("{}%", (scale * 100.0).round() as i32)
}
