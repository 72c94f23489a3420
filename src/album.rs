//! A page's list of images together with its enlarged viewer.
//!
//! [`Album`] owns the ordered records, which one is open, and the viewer
//! showing it. It applies the viewer's requests (close, navigate) itself and
//! hands download requests back to the host, which owns the download sink.

use atelier_ui::{
    ClipboardError, ClipboardSink, Direction, DownloadRequest, Event, NavigationController,
    Projection, RevertTicket, Selection, Viewer, ViewerFrame, ViewerSettings,
};
use web_time::Instant;

/// Requests the viewer raises toward its page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlbumMessage {
    Close,
    Navigate(Direction),
    Download(DownloadRequest),
}

pub struct Album<T> {
    items: Vec<T>,
    nav: NavigationController,
    viewer: Viewer<T, AlbumMessage>,
}

impl<T> Album<T> {
    pub fn new(items: Vec<T>, projection: Projection<T>, settings: ViewerSettings) -> Self {
        let viewer: Viewer<T, AlbumMessage> = if settings.navigation {
            Viewer::with_settings(projection, settings)
        } else {
            Viewer::single(projection, settings)
        };
        Self {
            items,
            nav: NavigationController::new(),
            viewer: viewer
                .on_close(|()| AlbumMessage::Close)
                .on_navigate(AlbumMessage::Navigate)
                .on_download(AlbumMessage::Download),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn viewer(&self) -> &Viewer<T, AlbumMessage> {
        &self.viewer
    }

    pub fn is_open(&self) -> bool {
        self.nav.is_open()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.nav.current()
    }

    pub fn current(&self) -> Option<&T> {
        self.nav.current().and_then(|index| self.items.get(index))
    }

    fn selection(&self) -> Option<Selection<'_, T>> {
        Selection::new(&self.items, self.nav.current()?)
    }

    /// Open the viewer on `index`. Out-of-range indices are ignored.
    pub fn open(&mut self, index: usize) -> bool {
        if !self.nav.open(index, self.items.len()) {
            log::warn!("Cannot open image {index} of {}", self.items.len());
            return false;
        }
        self.viewer.reset_view();
        log::debug!("Opened image {} / {}", index + 1, self.items.len());
        true
    }

    /// Close the viewer and drop its transient state.
    pub fn close(&mut self) {
        if self.nav.is_open() {
            self.viewer.unmount();
            self.nav.close();
            log::debug!("Closed viewer");
        }
    }

    /// Move to the neighbouring image. The view resets only if the index changed.
    pub fn step(&mut self, direction: Direction) -> bool {
        let moved = self.nav.step(direction, self.items.len());
        if moved {
            self.viewer.reset_view();
        }
        moved
    }

    /// Jump straight to `index` (thumbnail click while open).
    pub fn jump(&mut self, index: usize) -> bool {
        let moved = self.nav.jump(index, self.items.len());
        if moved {
            self.viewer.reset_view();
        }
        moved
    }

    /// Route an input event to the open viewer.
    ///
    /// Returns a download request for the host to carry out.
    pub fn on_event(&mut self, event: &Event) -> Option<DownloadRequest> {
        let index = self.nav.current()?;
        let selection = Selection::new(&self.items, index)?;
        match self.viewer.on_event(event, selection)? {
            AlbumMessage::Close => {
                self.close();
                None
            }
            AlbumMessage::Navigate(direction) => {
                self.step(direction);
                None
            }
            AlbumMessage::Download(request) => Some(request),
        }
    }

    pub fn observe_viewport(&mut self, width: f32, height: f32) {
        self.viewer.observe_viewport(width, height);
    }

    /// Render model of the open viewer.
    pub fn frame(&self) -> Option<ViewerFrame> {
        self.selection().map(|selection| self.viewer.frame(selection))
    }

    /// Full caption of the open image.
    pub fn caption(&self) -> Option<String> {
        self.selection().map(|selection| self.viewer.caption(selection))
    }

    pub fn copy_caption<S: ClipboardSink + ?Sized>(
        &mut self,
        sink: &mut S,
        now: Instant,
    ) -> Option<RevertTicket> {
        let index = self.nav.current()?;
        let selection = Selection::new(&self.items, index)?;
        self.viewer.copy_caption(sink, selection, now)
    }

    pub fn copy_succeeded(&mut self, now: Instant) -> RevertTicket {
        self.viewer.copy_succeeded(now)
    }

    pub fn copy_failed(&self, err: &ClipboardError) {
        self.viewer.copy_failed(err);
    }

    pub fn revert_copy(&mut self, ticket: RevertTicket) -> bool {
        self.viewer.revert_copy(ticket)
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.viewer.tick(now)
    }

    /// Download request for the thumbnail at `index` (`image_{n}.png`).
    pub fn thumbnail_download(&self, index: usize) -> Option<DownloadRequest> {
        let item = self.items.get(index)?;
        Some(DownloadRequest::thumbnail(
            self.viewer.projection().url(item),
            index,
        ))
    }

    /// Add records at the end. The open index stays on the same record.
    pub fn append(&mut self, records: impl IntoIterator<Item = T>) {
        let before = self.items.len();
        self.items.extend(records);
        log::debug!("Appended {} images", self.items.len() - before);
    }

    /// Add records at the front, newest first. The open index follows its record.
    pub fn prepend(&mut self, records: Vec<T>) {
        let count = records.len();
        if count == 0 {
            return;
        }
        self.items.splice(0..0, records);
        self.nav.shift_for_prepend(count);
        log::debug!("Prepended {count} images");
    }

    /// Swap in a new list. An open viewer closes.
    pub fn replace(&mut self, items: Vec<T>) {
        self.close();
        self.items = items;
    }
}

impl<T> std::fmt::Debug for Album<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Album")
            .field("len", &self.items.len())
            .field("nav", &self.nav.state())
            .field("viewer", &self.viewer)
            .finish()
    }
}
