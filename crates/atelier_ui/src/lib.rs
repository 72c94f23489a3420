//! atelier_ui - State machines behind the enlarged image viewer
//!
//! This crate holds the platform-independent part of the viewer: zoom and
//! pan, previous/next navigation, container sizing, copy acknowledgement,
//! download requests and scoped listener registration. Hosts feed it
//! [`Event`]s and paint the [`ViewerFrame`] it produces.

mod callback;
mod clipboard;
mod clock;
pub mod constants;
mod download;
mod event;
mod frame;
mod listener;
mod navigation;
mod projection;
mod resize;
mod viewer;
mod viewport;

#[cfg(test)]
mod tests;

pub use callback::Callback;
pub use clipboard::{ClipboardError, ClipboardExporter, ClipboardSink, RevertTicket};
pub use clock::{Clock, ManualClock, SystemClock};
pub use download::{
    thumbnail_file_name, trigger_download, DownloadError, DownloadRequest, DownloadSink,
};
pub use event::{Control, Direction, Event, Key, Modifiers, MouseButton, Point};
pub use frame::{truncate_caption, truncate_title, ViewerFrame};
pub use listener::{ListenerError, ListenerHost, ListenerKind, ListenerScope};
pub use navigation::{NavState, NavigationController};
pub use projection::Projection;
pub use resize::{viewport_box, ResizeObserver, ViewportDimensions};
pub use viewer::{Selection, Viewer, ViewerSettings};
pub use viewport::{DragState, ViewportController, ViewportState};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Callback, Control, Direction, Event, Key, Modifiers, MouseButton, NavigationController,
        Point, Projection, Selection, Viewer, ViewerFrame, ViewerSettings,
    };
}
