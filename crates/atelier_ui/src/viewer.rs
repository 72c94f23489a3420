//! The enlarged-image viewer.
//!
//! One viewer type serves every page: the page supplies a [`Projection`] for
//! its record type and callbacks for the requests only it can fulfil (close,
//! navigate, download). The viewer owns the viewport, the container size and
//! the copy acknowledgement; it never owns the records or the open index.
//!
//! Host contract: after the page changes the open index it must call
//! [`Viewer::reset_view`] so the new image starts centered at 100%.

use std::time::Duration;
use web_time::Instant;

use crate::callback::Callback;
use crate::clipboard::{ClipboardError, ClipboardExporter, ClipboardSink, RevertTicket};
use crate::constants::{
    format_percent, BUTTON_ZOOM_STEP, CAPTION_MAX_CHARS, COPY_ACK_DURATION, VIEWPORT_FRACTION,
    WHEEL_ZOOM_STEP,
};
use crate::download::DownloadRequest;
use crate::event::{Control, Direction, Event, Key, MouseButton};
use crate::frame::{truncate_caption, ViewerFrame};
use crate::projection::Projection;
use crate::resize::{ResizeObserver, ViewportDimensions};
use crate::viewport::ViewportController;

/// Tunables of the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerSettings {
    /// Zoom delta of the +/- buttons and keys
    pub button_zoom_step: f32,
    /// Zoom delta of one wheel event
    pub wheel_zoom_step: f32,
    /// Container size as a fraction of the browser viewport
    pub viewport_fraction: f32,
    /// Visibility of the "copied" acknowledgement
    pub copy_ack: Duration,
    /// Title truncation limit
    pub caption_max_chars: usize,
    /// Show previous/next controls (off for single-image views)
    pub navigation: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            button_zoom_step: BUTTON_ZOOM_STEP,
            wheel_zoom_step: WHEEL_ZOOM_STEP,
            viewport_fraction: VIEWPORT_FRACTION,
            copy_ack: COPY_ACK_DURATION,
            caption_max_chars: CAPTION_MAX_CHARS,
            navigation: true,
        }
    }
}

/// Read-only view of the page's list and the open index.
#[derive(Debug)]
pub struct Selection<'a, T> {
    items: &'a [T],
    index: usize,
}

impl<T> Clone for Selection<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Selection<'_, T> {}

impl<'a, T> Selection<'a, T> {
    /// `None` unless `index` is in range.
    pub fn new(items: &'a [T], index: usize) -> Option<Self> {
        (index < items.len()).then_some(Self { items, index })
    }

    pub fn record(&self) -> &'a T {
        &self.items[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.items.len()
    }

    /// `2 / 7` style position label.
    pub fn counter(&self) -> String {
        format!("{} / {}", self.index + 1, self.items.len())
    }
}

pub struct Viewer<T, M> {
    projection: Projection<T>,
    settings: ViewerSettings,
    viewport: ViewportController,
    resize: ResizeObserver,
    clipboard: ClipboardExporter,
    on_close: Callback<(), M>,
    on_navigate: Callback<Direction, M>,
    on_download: Callback<DownloadRequest, M>,
}

impl<T, M> Viewer<T, M> {
    pub fn new(projection: Projection<T>) -> Self {
        Self::with_settings(projection, ViewerSettings::default())
    }

    pub fn with_settings(projection: Projection<T>, settings: ViewerSettings) -> Self {
        Self {
            projection,
            viewport: ViewportController::new().with_wheel_step(settings.wheel_zoom_step),
            resize: ResizeObserver::new(settings.viewport_fraction),
            clipboard: ClipboardExporter::new(settings.copy_ack),
            settings,
            on_close: Callback::none(),
            on_navigate: Callback::none(),
            on_download: Callback::none(),
        }
    }

    /// Viewer for a lone image: no previous/next controls, counter `1 / 1`.
    pub fn single(projection: Projection<T>, mut settings: ViewerSettings) -> Self {
        settings.navigation = false;
        Self::with_settings(projection, settings)
    }

    pub fn on_close<F>(mut self, f: F) -> Self
    where
        F: Fn(()) -> M + 'static,
    {
        self.on_close = Callback::new(f);
        self
    }

    pub fn on_navigate<F>(mut self, f: F) -> Self
    where
        F: Fn(Direction) -> M + 'static,
    {
        self.on_navigate = Callback::new(f);
        self
    }

    pub fn on_download<F>(mut self, f: F) -> Self
    where
        F: Fn(DownloadRequest) -> M + 'static,
    {
        self.on_download = Callback::new(f);
        self
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    pub fn projection(&self) -> &Projection<T> {
        &self.projection
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn dimensions(&self) -> ViewportDimensions {
        self.resize.dimensions()
    }

    pub fn is_copy_acknowledged(&self) -> bool {
        self.clipboard.is_acknowledged()
    }

    /// Back to 100%, centered. Called by the host after every navigation.
    pub fn reset_view(&mut self) {
        self.viewport.reset();
    }

    /// Size the container from the browser viewport box (mount and resize).
    pub fn observe_viewport(&mut self, width: f32, height: f32) -> ViewportDimensions {
        self.resize.observe(width, height)
    }

    /// Handle one input event. Returns a host message for requests the
    /// viewer cannot fulfil itself.
    pub fn on_event(&mut self, event: &Event, selection: Selection<'_, T>) -> Option<M> {
        match event {
            Event::PointerPressed {
                button: MouseButton::Left,
                position,
            } => {
                self.viewport.begin_drag(*position);
                None
            }
            Event::PointerPressed { .. } => None,
            Event::PointerMoved { position } => {
                self.viewport.continue_drag(*position);
                None
            }
            // Leaving the wrapper ends the drag exactly like a release
            Event::PointerReleased { .. } | Event::PointerLeft => {
                self.viewport.end_drag();
                None
            }
            Event::DoubleClicked { .. } => {
                self.viewport.toggle_reference_zoom();
                None
            }
            Event::Wheel { delta_y, .. } => {
                self.viewport.wheel(*delta_y);
                None
            }
            Event::Resized { width, height } => {
                self.resize.observe(*width, *height);
                None
            }
            Event::KeyPressed { key, modifiers } => {
                if modifiers.any_command() {
                    return None;
                }
                match key {
                    Key::Escape => self.control(Control::Close, selection),
                    Key::Left => self.control(Control::Previous, selection),
                    Key::Right => self.control(Control::Next, selection),
                    Key::Char('+') | Key::Char('=') => self.control(Control::ZoomIn, selection),
                    Key::Char('-') | Key::Char('_') => self.control(Control::ZoomOut, selection),
                    Key::Char('0') => self.control(Control::ResetZoom, selection),
                    Key::Char(_) => None,
                }
            }
            Event::Control(control) => self.control(*control, selection),
        }
    }

    fn control(&mut self, control: Control, selection: Selection<'_, T>) -> Option<M> {
        match control {
            Control::ZoomIn => {
                self.viewport.zoom(self.settings.button_zoom_step);
                None
            }
            Control::ZoomOut => {
                self.viewport.zoom(-self.settings.button_zoom_step);
                None
            }
            Control::ResetZoom => {
                self.viewport.reset();
                None
            }
            Control::Previous => {
                if !self.settings.navigation || selection.is_first() {
                    return None;
                }
                self.on_navigate.call(Direction::Previous)
            }
            Control::Next => {
                if !self.settings.navigation || selection.is_last() {
                    return None;
                }
                self.on_navigate.call(Direction::Next)
            }
            Control::Close => self.on_close.call(()),
            Control::Download => {
                let url = self.projection.url(selection.record());
                self.on_download.call(DownloadRequest::enlarged(url))
            }
        }
    }

    /// Full caption of the open record (what the copy button copies).
    pub fn caption(&self, selection: Selection<'_, T>) -> String {
        self.projection.caption(selection.record())
    }

    /// Copy the open record's caption through a synchronous clipboard.
    pub fn copy_caption<S: ClipboardSink + ?Sized>(
        &mut self,
        sink: &mut S,
        selection: Selection<'_, T>,
        now: Instant,
    ) -> Option<RevertTicket> {
        let caption = self.caption(selection);
        self.clipboard.copy(sink, &caption, now)
    }

    /// Asynchronous clipboard write resolved.
    pub fn copy_succeeded(&mut self, now: Instant) -> RevertTicket {
        self.clipboard.acknowledge(now)
    }

    /// Asynchronous clipboard write rejected.
    pub fn copy_failed(&self, err: &ClipboardError) {
        self.clipboard.report_failure(err);
    }

    /// Timer-driven revert of the acknowledgement.
    pub fn revert_copy(&mut self, ticket: RevertTicket) -> bool {
        self.clipboard.revert(ticket)
    }

    /// Polling-driven revert of the acknowledgement.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.clipboard.tick(now)
    }

    /// Pending acknowledgement deadline, for hosts that sleep until it.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.clipboard.deadline()
    }

    /// Tear down transient state when the viewer is unmounted.
    pub fn unmount(&mut self) {
        self.viewport.end_drag();
        self.clipboard.cancel();
    }

    pub fn frame(&self, selection: Selection<'_, T>) -> ViewerFrame {
        let record = selection.record();
        let navigation = self.settings.navigation;
        let counter = if navigation {
            selection.counter()
        } else {
            "1 / 1".to_string()
        };
        ViewerFrame {
            image_url: self.projection.url(record),
            transform: self.viewport.css_transform(),
            transition: self.viewport.transition(),
            cursor: self.viewport.cursor(),
            zoom_label: format_percent(self.viewport.scale()),
            counter,
            title: truncate_caption(
                &self.projection.caption(record),
                self.settings.caption_max_chars,
            ),
            subtitle: self.projection.subtitle(record),
            copy_acknowledged: self.clipboard.is_acknowledged(),
            show_navigation: navigation,
            can_previous: navigation && !selection.is_first(),
            can_next: navigation && !selection.is_last(),
            container: self.resize.dimensions(),
            caption_width: self.resize.caption_width(),
        }
    }
}

impl<T, M> std::fmt::Debug for Viewer<T, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Viewer")
            .field("settings", &self.settings)
            .field("viewport", self.viewport.state())
            .field("dimensions", &self.resize.dimensions())
            .field("copy_acknowledged", &self.clipboard.is_acknowledged())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Modifiers, Point};

    #[derive(Debug, PartialEq)]
    enum Msg {
        Close,
        Navigate(Direction),
        Download(DownloadRequest),
    }

    struct Item {
        url: &'static str,
        prompt: &'static str,
    }

    static ITEMS: [Item; 3] = [
        Item {
            url: "/img/0.png",
            prompt: "first",
        },
        Item {
            url: "/img/1.png",
            prompt: "second",
        },
        Item {
            url: "/img/2.png",
            prompt: "third",
        },
    ];

    fn viewer() -> Viewer<Item, Msg> {
        let projection = Projection::new(|i: &Item| i.url.to_string(), |i: &Item| i.prompt.to_string())
            .field("Created", |_| Some("01/02/2025 10:00:00".to_string()));
        Viewer::new(projection)
            .on_close(|()| Msg::Close)
            .on_navigate(Msg::Navigate)
            .on_download(Msg::Download)
    }

    fn at(index: usize) -> Selection<'static, Item> {
        Selection::new(&ITEMS, index).expect("index in range")
    }

    fn key(key: Key) -> Event {
        Event::KeyPressed {
            key,
            modifiers: Modifiers::default(),
        }
    }

    #[test]
    fn test_selection_bounds() {
        assert!(Selection::new(&ITEMS, 3).is_none());
        let sel = at(2);
        assert!(sel.is_last());
        assert!(!sel.is_first());
        assert_eq!(sel.counter(), "3 / 3");
    }

    #[test]
    fn test_pointer_leave_ends_drag() {
        let mut v = viewer();
        let press = Event::PointerPressed {
            button: MouseButton::Left,
            position: Point::new(10.0, 10.0),
        };
        assert_eq!(v.on_event(&press, at(0)), None);
        assert!(v.viewport().is_dragging());

        v.on_event(&Event::PointerLeft, at(0));
        assert!(!v.viewport().is_dragging());
    }

    #[test]
    fn test_right_button_does_not_drag() {
        let mut v = viewer();
        let press = Event::PointerPressed {
            button: MouseButton::Right,
            position: Point::new(10.0, 10.0),
        };
        v.on_event(&press, at(0));
        assert!(!v.viewport().is_dragging());
    }

    #[test]
    fn test_navigation_requests_are_guarded() {
        let mut v = viewer();
        assert_eq!(v.on_event(&Event::Control(Control::Previous), at(0)), None);
        assert_eq!(
            v.on_event(&Event::Control(Control::Next), at(0)),
            Some(Msg::Navigate(Direction::Next))
        );
        assert_eq!(v.on_event(&key(Key::Right), at(2)), None);
        assert_eq!(
            v.on_event(&key(Key::Left), at(2)),
            Some(Msg::Navigate(Direction::Previous))
        );
    }

    #[test]
    fn test_close_and_download_requests() {
        let mut v = viewer();
        assert_eq!(v.on_event(&key(Key::Escape), at(1)), Some(Msg::Close));
        assert_eq!(
            v.on_event(&Event::Control(Control::Download), at(1)),
            Some(Msg::Download(DownloadRequest::new("/img/1.png", "image.png")))
        );
    }

    #[test]
    fn test_zoom_keys_and_command_modifiers() {
        let mut v = viewer();
        v.on_event(&key(Key::Char('+')), at(0));
        assert_eq!(v.frame(at(0)).zoom_label, "105%");

        let ctrl_plus = Event::KeyPressed {
            key: Key::Char('+'),
            modifiers: Modifiers {
                ctrl: true,
                ..Default::default()
            },
        };
        v.on_event(&ctrl_plus, at(0));
        assert_eq!(v.frame(at(0)).zoom_label, "105%");

        v.on_event(&key(Key::Char('0')), at(0));
        assert_eq!(v.frame(at(0)).zoom_label, "100%");
    }

    #[test]
    fn test_single_image_viewer_has_no_navigation() {
        let projection = Projection::new(|i: &Item| i.url.to_string(), |i: &Item| i.prompt.to_string());
        let mut v: Viewer<Item, Msg> =
            Viewer::single(projection, ViewerSettings::default()).on_navigate(Msg::Navigate);
        assert_eq!(v.on_event(&Event::Control(Control::Next), at(0)), None);

        let frame = v.frame(at(0));
        assert!(!frame.show_navigation);
        assert!(!frame.can_next);
        assert_eq!(frame.counter, "1 / 1");
    }

    #[test]
    fn test_frame_contents() {
        let mut v = viewer();
        v.on_event(
            &Event::Resized {
                width: 1000.0,
                height: 500.0,
            },
            at(1),
        );
        let frame = v.frame(at(1));
        assert_eq!(frame.image_url, "/img/1.png");
        assert_eq!(frame.title, "second");
        assert_eq!(frame.subtitle, "Created: 01/02/2025 10:00:00");
        assert_eq!(frame.counter, "2 / 3");
        assert_eq!(frame.zoom_label, "100%");
        assert!(frame.can_previous && frame.can_next);
        assert_eq!(frame.container.width, 900.0);
        assert_eq!(frame.container.height, 450.0);
        assert!(!frame.copy_acknowledged);
        assert_eq!(frame.summary(), "second (2 / 3, 100%)");
    }

    #[test]
    fn test_unmount_clears_transient_state() {
        let mut v = viewer();
        v.on_event(
            &Event::PointerPressed {
                button: MouseButton::Left,
                position: Point::zero(),
            },
            at(0),
        );
        let ticket = v.copy_succeeded(Instant::now());
        v.unmount();
        assert!(!v.viewport().is_dragging());
        assert!(!v.is_copy_acknowledged());
        assert!(!v.revert_copy(ticket));
    }
}
