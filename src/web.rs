//! Browser host: the gallery grid and its enlarged viewer in the DOM.
//!
//! Page scripts create a [`WebGallery`] with the id of the grid element and
//! the gallery JSON. The overlay is built once and shown while an image is
//! open; window-level listeners only exist while it is shown.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use atelier_ui::{
    ClipboardError, Clock, Control, DownloadError, DownloadRequest, DownloadSink, Event, Key,
    ListenerError, ListenerHost, ListenerKind, ListenerScope, Modifiers, MouseButton, Point,
    RevertTicket, SystemClock, ViewerFrame, trigger_download, viewport_box,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AddEventListenerOptions, Document, Element, EventTarget, HtmlAnchorElement, HtmlElement,
    HtmlImageElement, KeyboardEvent, MouseEvent, Storage, WheelEvent,
};
use web_time::Instant;

use crate::config::AppConfig;
use crate::constants::web::{CONTAINER_CLASS, GRID_CLASS, OVERLAY_CLASS, WRAPPER_CLASS};
use crate::gallery::{GalleryPage, SortOrder, TypeFilter};
use crate::model::parse_gallery;
use crate::snapshot::{GALLERY_SNAPSHOT_KEY, PageSnapshot, SnapshotError, SnapshotStore};

type Listener = Closure<dyn FnMut(web_sys::Event)>;

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("No document available"))
}

fn create<T: JsCast>(document: &Document, tag: &str, class: &str) -> Result<T, JsValue> {
    let element = document.create_element(tag)?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("<{tag}> has an unexpected type")))
}

fn set_style(element: &HtmlElement, name: &str, value: &str) {
    if let Err(e) = element.style().set_property(name, value) {
        log::warn!("Failed to set {name}: {e:?}");
    }
}

fn set_disabled(element: &Element, disabled: bool) {
    let result = if disabled {
        element.set_attribute("disabled", "")
    } else {
        element.remove_attribute("disabled")
    };
    if let Err(e) = result {
        log::warn!("Failed to toggle disabled: {e:?}");
    }
}

/// Run `f` on the shared state unless it is gone or already borrowed.
fn with_inner(weak: &Weak<RefCell<Inner>>, f: impl FnOnce(&mut Inner)) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    match inner.try_borrow_mut() {
        Ok(mut inner) => f(&mut inner),
        Err(_) => log::debug!("Ignoring re-entrant DOM event"),
    };
}

/// A DOM listener that maps the raw event and dispatches it to the viewer.
fn listener<F>(weak: Weak<RefCell<Inner>>, map: F) -> Listener
where
    F: Fn(&web_sys::Event) -> Option<Event> + 'static,
{
    Closure::wrap(Box::new(move |event: web_sys::Event| {
        if let Some(ui_event) = map(&event) {
            with_inner(&weak, |inner| inner.dispatch(ui_event));
        }
    }) as Box<dyn FnMut(web_sys::Event)>)
}

fn mouse(event: &web_sys::Event) -> Option<(MouseButton, Point)> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some((
        MouseButton::from_dom(mouse.button()),
        Point::new(mouse.client_x() as f32, mouse.client_y() as f32),
    ))
}

fn keyboard(event: &web_sys::Event) -> Option<Event> {
    let keyboard = event.dyn_ref::<KeyboardEvent>()?;
    let key = Key::from_dom(&keyboard.key())?;
    Some(Event::KeyPressed {
        key,
        modifiers: Modifiers {
            shift: keyboard.shift_key(),
            ctrl: keyboard.ctrl_key(),
            alt: keyboard.alt_key(),
            meta: keyboard.meta_key(),
        },
    })
}

/// The browser viewport box: the larger of the document and window sizes.
fn viewport_size() -> Option<(f32, f32)> {
    let window = web_sys::window()?;
    let inner = (
        window.inner_width().ok()?.as_f64()? as f32,
        window.inner_height().ok()?.as_f64()? as f32,
    );
    let client = window
        .document()
        .and_then(|document| document.document_element())
        .map(|root| (root.client_width() as f32, root.client_height() as f32))
        .unwrap_or((0.0, 0.0));
    Some(viewport_box(client, inner))
}

/// Start `navigator.clipboard.writeText(text)`.
fn clipboard_write(text: &str) -> Result<js_sys::Promise, ClipboardError> {
    let window =
        web_sys::window().ok_or_else(|| ClipboardError::Unavailable("no window".into()))?;
    let navigator = window.navigator();
    let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
        .ok()
        .filter(|value| !value.is_undefined())
        .ok_or_else(|| ClipboardError::Unavailable("navigator.clipboard missing".into()))?;
    let write = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))
        .ok()
        .and_then(|value| value.dyn_into::<js_sys::Function>().ok())
        .ok_or_else(|| ClipboardError::Unavailable("writeText missing".into()))?;
    write
        .call1(&clipboard, &JsValue::from_str(text))
        .map_err(|e| ClipboardError::Rejected(format!("{e:?}")))?
        .dyn_into::<js_sys::Promise>()
        .map_err(|_| ClipboardError::Rejected("writeText returned no promise".into()))
}

/// Downloads through a temporary `<a download>` element.
struct AnchorDownloads;

impl DownloadSink for AnchorDownloads {
    fn download(&mut self, request: &DownloadRequest) -> Result<(), DownloadError> {
        let dom = |e: JsValue| DownloadError::Dom(format!("{e:?}"));
        let document = document().map_err(dom)?;
        let body = document
            .body()
            .ok_or_else(|| DownloadError::Dom("No body in document".into()))?;
        let anchor: HtmlAnchorElement = create(&document, "a", "").map_err(dom)?;
        anchor.set_href(&request.url);
        anchor.set_download(&request.file_name);
        body.append_child(&anchor).map_err(dom)?;
        anchor.click();
        anchor.remove();
        Ok(())
    }
}

/// Page snapshots in `sessionStorage`.
struct SessionStore;

impl SessionStore {
    fn storage(&self) -> Result<Storage, SnapshotError> {
        web_sys::window()
            .ok_or_else(|| SnapshotError::Storage("No window object available".into()))?
            .session_storage()
            .map_err(|e| SnapshotError::Storage(format!("sessionStorage access error: {e:?}")))?
            .ok_or_else(|| SnapshotError::Storage("sessionStorage not available".into()))
    }
}

impl SnapshotStore for SessionStore {
    fn read(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| SnapshotError::Storage(format!("{e:?}")))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SnapshotError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| SnapshotError::Storage(format!("{e:?}")))
    }
}

struct DomListener {
    target: EventTarget,
    kind: ListenerKind,
    closure: Listener,
}

/// Attaches the viewer's window listeners and the wheel listener.
///
/// Detached closures are parked in `graveyard` because a listener may be
/// detached from inside its own callback (Escape closes the viewer).
struct DomListeners {
    window: web_sys::Window,
    wrapper: HtmlElement,
    inner: Weak<RefCell<Inner>>,
    graveyard: Rc<RefCell<Vec<Listener>>>,
}

impl ListenerHost for DomListeners {
    type Handle = DomListener;

    fn attach(&mut self, kind: ListenerKind) -> Result<DomListener, ListenerError> {
        let weak = self.inner.clone();
        let closure = match kind {
            ListenerKind::Resize => listener(weak, |_| {
                viewport_size().map(|(width, height)| Event::Resized { width, height })
            }),
            ListenerKind::PointerMove => listener(weak, |event| {
                mouse(event).map(|(_, position)| Event::PointerMoved { position })
            }),
            ListenerKind::PointerUp => listener(weak, |event| {
                mouse(event).map(|(button, position)| Event::PointerReleased { button, position })
            }),
            ListenerKind::Wheel => listener(weak, |event| {
                let wheel = event.dyn_ref::<WheelEvent>()?;
                event.prevent_default();
                Some(Event::Wheel {
                    delta_y: wheel.delta_y() as f32,
                    position: Point::new(wheel.client_x() as f32, wheel.client_y() as f32),
                })
            }),
            ListenerKind::KeyDown => listener(weak, keyboard),
        };
        let target: EventTarget = match kind {
            ListenerKind::Wheel => self.wrapper.clone().into(),
            _ => self.window.clone().into(),
        };
        let options = AddEventListenerOptions::new();
        options.set_passive(kind.passive());
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind.event_type(),
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|e| ListenerError::Attach {
                kind,
                reason: format!("{e:?}"),
            })?;
        Ok(DomListener {
            target,
            kind,
            closure,
        })
    }

    fn detach(&mut self, handle: DomListener) {
        if let Err(e) = handle.target.remove_event_listener_with_callback(
            handle.kind.event_type(),
            handle.closure.as_ref().unchecked_ref(),
        ) {
            log::warn!("Failed to detach {:?} listener: {e:?}", handle.kind);
        }
        self.graveyard.borrow_mut().push(handle.closure);
    }
}

/// The enlarged view's DOM.
struct Overlay {
    root: HtmlElement,
    container: HtmlElement,
    wrapper: HtmlElement,
    image: HtmlImageElement,
    caption_box: HtmlElement,
    title: Element,
    subtitle: Element,
    zoom_label: Element,
    counter: Element,
    copy: HtmlElement,
    previous: HtmlElement,
    next: HtmlElement,
    buttons: Vec<(HtmlElement, Control)>,
}

impl Overlay {
    fn build(document: &Document) -> Result<Self, JsValue> {
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("No body in document"))?;
        let button = |label: &str, class: &str| -> Result<HtmlElement, JsValue> {
            let button: HtmlElement = create(document, "button", class)?;
            button.set_text_content(Some(label));
            button.set_attribute("title", label)?;
            Ok(button)
        };

        let root: HtmlElement = create(document, "div", OVERLAY_CLASS)?;
        let container: HtmlElement = create(document, "div", CONTAINER_CLASS)?;
        let wrapper: HtmlElement = create(document, "div", WRAPPER_CLASS)?;
        let image: HtmlImageElement = create(document, "img", "enlarged-image")?;
        image.set_draggable(false);
        wrapper.append_child(&image)?;

        let caption_box: HtmlElement = create(document, "div", "enlarged-image-title-container")?;
        let title: Element = create(document, "h2", "enlarged-image-title")?;
        let subtitle: Element = create(document, "p", "enlarged-image-subtitle")?;
        let copy = button("Copy prompt", "icon-button copy-button")?;
        caption_box.append_child(&title)?;
        caption_box.append_child(&subtitle)?;
        caption_box.append_child(&copy)?;

        let zoom_label: Element = create(document, "span", "zoom-level")?;
        let counter: Element = create(document, "span", "image-counter")?;
        let previous = button("Previous", "nav-button prev-button")?;
        let next = button("Next", "nav-button next-button")?;
        let buttons = vec![
            (button("Zoom in", "icon-button zoom-in")?, Control::ZoomIn),
            (button("Zoom out", "icon-button zoom-out")?, Control::ZoomOut),
            (button("Reset zoom", "icon-button zoom-reset")?, Control::ResetZoom),
            (button("Download image", "icon-button download-button")?, Control::Download),
            (button("Close", "icon-button close-button")?, Control::Close),
            (previous.clone(), Control::Previous),
            (next.clone(), Control::Next),
        ];

        let toolbar: HtmlElement = create(document, "div", "zoom-controls")?;
        toolbar.append_child(&zoom_label)?;
        for (button, control) in &buttons {
            if !matches!(control, Control::Previous | Control::Next) {
                toolbar.append_child(button)?;
            }
        }

        container.append_child(&wrapper)?;
        container.append_child(&previous)?;
        container.append_child(&next)?;
        container.append_child(&counter)?;
        container.append_child(&toolbar)?;
        container.append_child(&caption_box)?;
        root.append_child(&container)?;
        set_style(&root, "display", "none");
        body.append_child(&root)?;

        Ok(Self {
            root,
            container,
            wrapper,
            image,
            caption_box,
            title,
            subtitle,
            zoom_label,
            counter,
            copy,
            previous,
            next,
            buttons,
        })
    }

    /// Listeners that live as long as the overlay: buttons and wrapper input.
    fn wire(&self, weak: &Weak<RefCell<Inner>>) -> Result<Vec<Listener>, JsValue> {
        let mut listeners = Vec::new();
        let mut on = |target: &HtmlElement, event_type: &str, closure: Listener| {
            target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
            listeners.push(closure);
            Ok::<(), JsValue>(())
        };

        for (button, control) in &self.buttons {
            let control = *control;
            on(button, "click", listener(weak.clone(), move |_| Some(Event::Control(control))))?;
        }

        let copy_weak = weak.clone();
        let copy = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            with_inner(&copy_weak, Inner::copy_caption);
        }) as Box<dyn FnMut(web_sys::Event)>);
        on(&self.copy, "click", copy)?;

        on(
            &self.wrapper,
            "mousedown",
            listener(weak.clone(), |event| {
                // Keep the browser's own image drag out of the way
                event.prevent_default();
                mouse(event).map(|(button, position)| Event::PointerPressed { button, position })
            }),
        )?;
        on(
            &self.wrapper,
            "dblclick",
            listener(weak.clone(), |event| {
                mouse(event).map(|(_, position)| Event::DoubleClicked { position })
            }),
        )?;
        on(
            &self.wrapper,
            "mouseleave",
            listener(weak.clone(), |_| Some(Event::PointerLeft)),
        )?;

        Ok(listeners)
    }

    fn show(&self, visible: bool) {
        set_style(&self.root, "display", if visible { "flex" } else { "none" });
    }

    fn apply(&self, frame: &ViewerFrame) {
        if self.image.get_attribute("src").as_deref() != Some(frame.image_url.as_str()) {
            self.image.set_src(&frame.image_url);
        }
        set_style(self.image.as_ref(), "transform", &frame.transform);
        set_style(self.image.as_ref(), "transition", frame.transition);
        set_style(&self.wrapper, "cursor", frame.cursor);

        set_style(&self.container, "width", &format!("{}px", frame.container.width));
        set_style(&self.container, "height", &format!("{}px", frame.container.height));
        set_style(&self.caption_box, "max-width", &format!("{}px", frame.caption_width));

        self.title.set_text_content(Some(&frame.title));
        self.subtitle.set_text_content(Some(&frame.subtitle));
        self.zoom_label.set_text_content(Some(&frame.zoom_label));
        self.counter.set_text_content(Some(&frame.counter));
        self.copy.set_text_content(Some(if frame.copy_acknowledged {
            "Copied"
        } else {
            "Copy prompt"
        }));

        let nav_display = if frame.show_navigation { "" } else { "none" };
        set_style(&self.previous, "display", nav_display);
        set_style(&self.next, "display", nav_display);
        set_disabled(&self.previous, !frame.can_previous);
        set_disabled(&self.next, !frame.can_next);
    }
}

struct Inner {
    page: GalleryPage,
    overlay: Overlay,
    grid: Element,
    grid_listeners: Vec<Listener>,
    /// Page revision the grid was last drawn from
    grid_revision: u64,
    listeners: Option<ListenerScope<DomListeners>>,
    graveyard: Rc<RefCell<Vec<Listener>>>,
    revert_timer: Option<i32>,
    snapshots: SessionStore,
    this: Weak<RefCell<Inner>>,
}

impl Inner {
    fn dispatch(&mut self, event: Event) {
        if let Some(request) = self.page.on_event(&event) {
            trigger_download(&mut AnchorDownloads, &request);
        }
        if !self.page.album().is_open() {
            self.unmount();
            return;
        }
        self.render();
    }

    fn render(&self) {
        if let Some(frame) = self.page.frame() {
            self.overlay.apply(&frame);
        }
    }

    fn open(&mut self, index: usize) {
        if !self.page.open(index) {
            return;
        }
        // Listeners detached on the previous close are no longer running
        self.graveyard.borrow_mut().clear();
        if self.listeners.is_none() {
            if let Some(window) = web_sys::window() {
                let host = DomListeners {
                    window,
                    wrapper: self.overlay.wrapper.clone(),
                    inner: self.this.clone(),
                    graveyard: Rc::clone(&self.graveyard),
                };
                match ListenerScope::acquire(host, &ListenerKind::VIEWER) {
                    Ok(scope) => self.listeners = Some(scope),
                    Err(e) => log::error!("{e}"),
                }
            }
        }
        if let Some((width, height)) = viewport_size() {
            self.page.album_mut().observe_viewport(width, height);
        }
        self.overlay.show(true);
        self.render();
    }

    /// Hide the overlay and release everything tied to it.
    fn unmount(&mut self) {
        self.page.close();
        self.listeners = None;
        self.clear_revert_timer();
        self.overlay.show(false);
        // Closing sorts entries that arrived while the viewer was open
        if self.page.revision() != self.grid_revision {
            if let Err(e) = self.render_grid() {
                log::error!("Failed to redraw gallery: {e:?}");
            }
        }
    }

    fn copy_caption(&mut self) {
        let Some(caption) = self.page.album().caption() else {
            return;
        };
        let promise = match clipboard_write(&caption) {
            Ok(promise) => promise,
            Err(err) => {
                self.page.album().copy_failed(&err);
                return;
            }
        };
        let weak = self.this.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = JsFuture::from(promise).await;
            with_inner(&weak, |inner| match result {
                Ok(_) => {
                    // The viewer may have closed while the write was pending
                    if !inner.page.album().is_open() {
                        return;
                    }
                    let now = SystemClock.now();
                    let ticket = inner.page.album_mut().copy_succeeded(now);
                    inner.schedule_revert(ticket, now);
                    inner.render();
                }
                Err(e) => inner
                    .page
                    .album()
                    .copy_failed(&ClipboardError::Rejected(format!("{e:?}"))),
            });
        });
    }

    fn schedule_revert(&mut self, ticket: RevertTicket, now: Instant) {
        self.clear_revert_timer();
        let Some(window) = web_sys::window() else {
            return;
        };
        let weak = self.this.clone();
        let callback = Closure::once_into_js(move || {
            with_inner(&weak, |inner| {
                inner.revert_timer = None;
                if inner.page.album_mut().revert_copy(ticket) {
                    inner.render();
                }
            });
        });
        let delay = ticket.delay_from(now).as_millis().min(i32::MAX as u128) as i32;
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            delay,
        ) {
            Ok(handle) => self.revert_timer = Some(handle),
            Err(e) => log::warn!("Failed to schedule copy revert: {e:?}"),
        }
    }

    fn clear_revert_timer(&mut self) {
        if let (Some(handle), Some(window)) = (self.revert_timer.take(), web_sys::window()) {
            window.clear_timeout_with_handle(handle);
        }
    }

    fn render_grid(&mut self) -> Result<(), JsValue> {
        let document = document()?;
        self.grid.set_inner_html("");
        self.grid_listeners.clear();

        for (index, entry) in self.page.visible().iter().enumerate() {
            let item: Element = create(&document, "div", "image-item")?;
            let image: HtmlImageElement = create(&document, "img", "thumbnail")?;
            image.set_src(&entry.url);
            image.set_alt(&entry.prompt);

            let weak = self.this.clone();
            let on_open = Closure::wrap(Box::new(move |_event: web_sys::Event| {
                with_inner(&weak, |inner| inner.open(index));
            }) as Box<dyn FnMut(web_sys::Event)>);
            image.add_event_listener_with_callback("click", on_open.as_ref().unchecked_ref())?;

            let download: HtmlElement = create(&document, "button", "icon-button")?;
            download.set_text_content(Some("Download"));
            download.set_attribute("title", "Download image")?;
            let weak = self.this.clone();
            let on_download = Closure::wrap(Box::new(move |_event: web_sys::Event| {
                with_inner(&weak, |inner| {
                    if let Some(request) = inner.page.thumbnail_download(index) {
                        trigger_download(&mut AnchorDownloads, &request);
                    }
                });
            }) as Box<dyn FnMut(web_sys::Event)>);
            download.add_event_listener_with_callback("click", on_download.as_ref().unchecked_ref())?;

            item.append_child(&image)?;
            item.append_child(&download)?;
            self.grid.append_child(&item)?;
            self.grid_listeners.push(on_open);
            self.grid_listeners.push(on_download);
        }
        self.grid_revision = self.page.revision();
        Ok(())
    }

    fn save_snapshot(&mut self) {
        if let Err(e) = self.page.snapshot().save(&mut self.snapshots, GALLERY_SNAPSHOT_KEY) {
            log::warn!("Failed to save gallery view: {e}");
        }
    }
}

/// The gallery page, driven from page scripts.
#[wasm_bindgen]
pub struct WebGallery {
    inner: Rc<RefCell<Inner>>,
    _controls: Vec<Listener>,
}

#[wasm_bindgen]
impl WebGallery {
    /// Render `gallery_json` into the element with id `grid_id`.
    #[wasm_bindgen(constructor)]
    pub fn new(grid_id: &str, gallery_json: &str) -> Result<WebGallery, JsValue> {
        let config = AppConfig::load_from_local_storage().unwrap_or_else(AppConfig::new);
        let entries = parse_gallery(gallery_json).map_err(js_error)?;

        let snapshots = SessionStore;
        let mut page = GalleryPage::with_view(
            entries,
            config.viewer.to_settings(),
            config.gallery.sort,
            config.gallery.filter.clone(),
        );
        if let Some(snapshot) = PageSnapshot::load(&snapshots, GALLERY_SNAPSHOT_KEY) {
            page.restore(&snapshot);
        }

        let document = document()?;
        let grid = document
            .get_element_by_id(grid_id)
            .ok_or_else(|| JsValue::from_str(&format!("No element with id {grid_id}")))?;
        grid.class_list().add_1(GRID_CLASS)?;
        let overlay = Overlay::build(&document)?;

        let inner = Rc::new(RefCell::new(Inner {
            page,
            overlay,
            grid,
            grid_listeners: Vec::new(),
            grid_revision: 0,
            listeners: None,
            graveyard: Rc::new(RefCell::new(Vec::new())),
            revert_timer: None,
            snapshots,
            this: Weak::new(),
        }));
        let weak = Rc::downgrade(&inner);
        let controls = {
            let mut state = inner.borrow_mut();
            state.this = weak.clone();
            state.render_grid()?;
            state.overlay.wire(&weak)?
        };

        Ok(WebGallery {
            inner,
            _controls: controls,
        })
    }

    pub fn open(&self, index: usize) {
        self.inner.borrow_mut().open(index);
    }

    pub fn close(&self) {
        self.inner.borrow_mut().unmount();
    }

    /// `date-desc`, `date-asc` or `type`. Returns false for unknown names.
    pub fn set_sort(&self, name: &str) -> Result<bool, JsValue> {
        let Some(sort) = SortOrder::from_name(name) else {
            log::warn!("Unknown sort order {name}");
            return Ok(false);
        };
        let mut inner = self.inner.borrow_mut();
        inner.unmount();
        inner.page.set_sort(sort);
        inner.save_snapshot();
        inner.render_grid()?;
        Ok(true)
    }

    /// A generation type, or `all`.
    pub fn set_filter(&self, name: &str) -> Result<(), JsValue> {
        let mut inner = self.inner.borrow_mut();
        inner.unmount();
        inner.page.set_filter(TypeFilter::from(name.to_string()));
        inner.save_snapshot();
        inner.render_grid()
    }

    /// Add entries from another gallery payload (new generations).
    pub fn append(&self, gallery_json: &str) -> Result<(), JsValue> {
        let entries = parse_gallery(gallery_json).map_err(js_error)?;
        let mut inner = self.inner.borrow_mut();
        inner.page.append(entries);
        inner.render_grid()?;
        inner.render();
        Ok(())
    }

    /// Per-type counts as JSON, for the filter select box.
    pub fn counts_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.inner.borrow().page.counts()).map_err(js_error)
    }

    /// Current viewer frame as JSON, or `undefined` when closed.
    pub fn frame_json(&self) -> Result<Option<String>, JsValue> {
        self.inner
            .borrow()
            .page
            .frame()
            .map(|frame| serde_json::to_string(&frame).map_err(js_error))
            .transpose()
    }
}

impl Drop for WebGallery {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.unmount();
            inner.grid.set_inner_html("");
            inner.grid_listeners.clear();
            inner.overlay.root.remove();
        }
    }
}
