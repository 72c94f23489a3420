//! Read model the hosts render from.

use crate::constants::{CAPTION_ELLIPSIS, CAPTION_MAX_CHARS};
use crate::resize::ViewportDimensions;
use serde::Serialize;

/// Everything needed to paint one state of the enlarged view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewerFrame {
    /// Source of the image element
    pub image_url: String,
    /// CSS transform for the image element
    pub transform: String,
    /// CSS transition for the image element
    pub transition: &'static str,
    /// Cursor over the image wrapper
    pub cursor: &'static str,
    /// Current zoom, e.g. `125%`
    pub zoom_label: String,
    /// Position in the list, e.g. `2 / 7`
    pub counter: String,
    /// Caption, truncated for the title line
    pub title: String,
    /// Metadata line under the title
    pub subtitle: String,
    /// Show the check mark instead of the copy icon
    pub copy_acknowledged: bool,
    /// Previous/next buttons exist at all
    pub show_navigation: bool,
    pub can_previous: bool,
    pub can_next: bool,
    /// Size of the enlarged container
    pub container: ViewportDimensions,
    /// Maximum width of the caption block
    pub caption_width: f32,
}

impl ViewerFrame {
    /// One-line summary, used as the native window title.
    pub fn summary(&self) -> String {
        format!("{} ({}, {})", self.title, self.counter, self.zoom_label)
    }
}

/// Shorten `caption` to at most `max_chars` characters, ending in `...`.
pub fn truncate_caption(caption: &str, max_chars: usize) -> String {
    if caption.chars().count() <= max_chars {
        return caption.to_string();
    }
    let keep = max_chars.saturating_sub(CAPTION_ELLIPSIS.chars().count());
    let mut out: String = caption.chars().take(keep).collect();
    out.push_str(CAPTION_ELLIPSIS);
    out
}

/// [`truncate_caption`] with the default limit.
pub fn truncate_title(caption: &str) -> String {
    truncate_caption(caption, CAPTION_MAX_CHARS)
}
