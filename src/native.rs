//! Native host: a winit window driving the gallery viewer.
//!
//! The window has no image surface; the current frame is summarized in the
//! title bar. Ctrl+C copies the caption, Ctrl+S saves the image, Ctrl+T
//! cycles the sort order. Closing the viewer closes the window.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use atelier_ui::{
    ClipboardError, ClipboardSink, Clock, Control, Event, Key, Modifiers, MouseButton, Point,
    SystemClock, trigger_download,
};
use web_time::Instant;
use winit::event::{ElementState, Event as WinitEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key as WinitKey, NamedKey};
use winit::window::{Window, WindowBuilder};

use crate::config::AppConfig;
use crate::constants::window;
use crate::gallery::GalleryPage;
use crate::local_download::{FileCopyDownloads, SaveDialog};
use crate::model::{GalleryError, parse_gallery};

#[derive(Debug, thiserror::Error)]
pub enum NativeError {
    #[error("Failed to load gallery {path:?}: {source}")]
    Gallery {
        path: PathBuf,
        #[source]
        source: GalleryError,
    },

    #[error("Gallery {0:?} has no images")]
    EmptyGallery(PathBuf),

    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
}

/// System clipboard through arboard.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        match self.inner.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_owned())
                .map_err(|e| ClipboardError::Rejected(e.to_string())),
            None => Err(ClipboardError::Unavailable("no clipboard".to_string())),
        }
    }
}

/// Turns a second press close in time and space into a double click.
#[derive(Debug, Clone)]
pub struct DoubleClickDetector {
    interval: Duration,
    last_press: Option<(Instant, Point)>,
}

impl DoubleClickDetector {
    /// Presses further apart than this many pixels never pair up.
    const SLOP: f32 = 4.0;

    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_press: None,
        }
    }

    /// Record a left press. Returns true if it completes a double click.
    pub fn press(&mut self, now: Instant, position: Point) -> bool {
        if let Some((at, previous)) = self.last_press.take() {
            let close_in_time = now.saturating_duration_since(at) <= self.interval;
            let close_in_space = (position.x - previous.x).abs() <= Self::SLOP
                && (position.y - previous.y).abs() <= Self::SLOP;
            if close_in_time && close_in_space {
                return true;
            }
        }
        self.last_press = Some((now, position));
        false
    }
}

/// Map a winit key to a viewer key.
fn map_key(key: &WinitKey) -> Option<Key> {
    match key {
        WinitKey::Named(NamedKey::Escape) => Some(Key::Escape),
        WinitKey::Named(NamedKey::ArrowLeft) => Some(Key::Left),
        WinitKey::Named(NamedKey::ArrowRight) => Some(Key::Right),
        WinitKey::Character(text) => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Key::Char(c)),
                _ => None,
            }
        }
        _ => None,
    }
}

fn map_button(button: winit::event::MouseButton) -> Option<MouseButton> {
    match button {
        winit::event::MouseButton::Left => Some(MouseButton::Left),
        winit::event::MouseButton::Right => Some(MouseButton::Right),
        winit::event::MouseButton::Middle => Some(MouseButton::Middle),
        winit::event::MouseButton::Other(n) => Some(MouseButton::Other(n)),
        _ => None,
    }
}

/// Wheel delta in DOM orientation (positive scrolls away from the viewer).
fn wheel_delta(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_x, y) => -y,
        MouseScrollDelta::PixelDelta(pos) => -(pos.y as f32),
    }
}

struct NativeApp {
    window: Arc<Window>,
    page: GalleryPage,
    clipboard: SystemClipboard,
    downloads: FileCopyDownloads<SaveDialog>,
    double_click: DoubleClickDetector,
    clock: SystemClock,
    cursor: Point,
    modifiers: Modifiers,
    title: String,
    config: AppConfig,
}

impl NativeApp {
    fn dispatch(&mut self, event: Event) {
        if let Some(request) = self.page.on_event(&event) {
            trigger_download(&mut self.downloads, &request);
        }
    }

    fn on_key(&mut self, key: Key) {
        if self.modifiers.ctrl || self.modifiers.meta {
            match key {
                Key::Char('c') => {
                    self.page
                        .album_mut()
                        .copy_caption(&mut self.clipboard, self.clock.now());
                }
                Key::Char('s') => self.dispatch(Event::Control(Control::Download)),
                Key::Char('t') => self.cycle_sort(),
                _ => {}
            }
            return;
        }
        self.dispatch(Event::KeyPressed {
            key,
            modifiers: self.modifiers,
        });
    }

    /// Next sort order; the viewer reopens on the first image and the
    /// order is remembered in the config file.
    fn cycle_sort(&mut self) {
        let sort = self.page.sort().cycle();
        self.page.set_sort(sort);
        self.page.open(0);
        log::info!("Sorted by {}", sort.name());

        self.config.gallery.sort = sort;
        if let Err(e) = self.config.save_to_default_path() {
            log::warn!("Cannot save sort order: {e}");
        }
    }

    fn refresh_title(&mut self) {
        let Some(frame) = self.page.frame() else {
            return;
        };
        let mut title = frame.summary();
        if frame.copy_acknowledged {
            title.push_str(" - copied");
        }
        if title != self.title {
            self.window.set_title(&title);
            self.title = title;
        }
    }

    fn control_flow(&self) -> ControlFlow {
        match self.page.album().viewer().next_deadline() {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        }
    }
}

fn load_page(gallery_path: &Path, config: &AppConfig) -> Result<GalleryPage, NativeError> {
    let json = std::fs::read_to_string(gallery_path).map_err(|e| NativeError::Gallery {
        path: gallery_path.to_path_buf(),
        source: GalleryError::Io(e),
    })?;
    let entries = parse_gallery(&json).map_err(|source| NativeError::Gallery {
        path: gallery_path.to_path_buf(),
        source,
    })?;
    if entries.is_empty() {
        return Err(NativeError::EmptyGallery(gallery_path.to_path_buf()));
    }
    Ok(GalleryPage::with_view(
        entries,
        config.viewer.to_settings(),
        config.gallery.sort,
        config.gallery.filter.clone(),
    ))
}

/// Open a window on the gallery file at `gallery_path` and run until it closes.
pub fn run(gallery_path: &Path, config: &AppConfig) -> Result<(), NativeError> {
    let mut page = load_page(gallery_path, config)?;
    if !page.open(0) {
        // The configured filter hides everything
        return Err(NativeError::EmptyGallery(gallery_path.to_path_buf()));
    }

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(window::TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(
                window::DEFAULT_SIZE.0,
                window::DEFAULT_SIZE.1,
            ))
            .build(&event_loop)?,
    );

    let size = window.inner_size();
    page.album_mut()
        .observe_viewport(size.width as f32, size.height as f32);

    let base = gallery_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let mut app = NativeApp {
        window: Arc::clone(&window),
        page,
        clipboard: SystemClipboard::default(),
        downloads: FileCopyDownloads::new(base, SaveDialog),
        double_click: DoubleClickDetector::new(config.viewer.double_click_interval()),
        clock: SystemClock,
        cursor: Point::zero(),
        modifiers: Modifiers::default(),
        title: String::new(),
        config: config.clone(),
    };
    app.refresh_title();
    log::info!("Viewer ready: {}", app.title);

    event_loop.run(move |event, elwt| {
        match event {
            WinitEvent::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    elwt.exit();
                }
                WindowEvent::Resized(size) => {
                    app.dispatch(Event::Resized {
                        width: size.width as f32,
                        height: size.height as f32,
                    });
                }
                WindowEvent::CursorMoved { position, .. } => {
                    app.cursor = Point::new(position.x as f32, position.y as f32);
                    app.dispatch(Event::PointerMoved {
                        position: app.cursor,
                    });
                }
                WindowEvent::CursorLeft { .. } => {
                    app.dispatch(Event::PointerLeft);
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    let Some(button) = map_button(button) else {
                        return;
                    };
                    let position = app.cursor;
                    match state {
                        ElementState::Pressed => {
                            let double = button == MouseButton::Left
                                && app.double_click.press(app.clock.now(), position);
                            if double {
                                app.dispatch(Event::DoubleClicked { position });
                            } else {
                                app.dispatch(Event::PointerPressed { button, position });
                            }
                        }
                        ElementState::Released => {
                            app.dispatch(Event::PointerReleased { button, position });
                        }
                    }
                }
                WindowEvent::MouseWheel { delta, .. } => {
                    app.dispatch(Event::Wheel {
                        delta_y: wheel_delta(delta),
                        position: app.cursor,
                    });
                }
                WindowEvent::ModifiersChanged(modifiers) => {
                    let state = modifiers.state();
                    app.modifiers = Modifiers {
                        shift: state.shift_key(),
                        ctrl: state.control_key(),
                        alt: state.alt_key(),
                        meta: state.super_key(),
                    };
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    if event.state == ElementState::Pressed {
                        if let Some(key) = map_key(&event.logical_key) {
                            app.on_key(key);
                        }
                    }
                }
                _ => {}
            },
            WinitEvent::AboutToWait => {
                let now = app.clock.now();
                app.page.album_mut().tick(now);
            }
            _ => {}
        }

        if !app.page.album().is_open() {
            log::info!("Viewer closed");
            elwt.exit();
            return;
        }
        app.refresh_title();
        elwt.set_control_flow(app.control_flow());
    })?;
    Ok(())
}
