use std::time::Duration;

use crate::clock::{Clock, ManualClock};
use crate::{
    ClipboardError, ClipboardSink, Control, Direction, Event, NavigationController, Projection,
    Selection, Viewer, ViewerSettings,
};

#[derive(Debug, PartialEq)]
enum Msg {
    Navigate(Direction),
}

struct Page {
    images: Vec<String>,
    nav: NavigationController,
    viewer: Viewer<String, Msg>,
}

impl Page {
    fn new(count: usize) -> Self {
        Self::with_settings(count, ViewerSettings::default())
    }

    fn with_settings(count: usize, settings: ViewerSettings) -> Self {
        let projection = Projection::new(|s: &String| s.clone(), |s: &String| format!("prompt {s}"));
        Self {
            images: (0..count).map(|i| format!("/img/{i}.png")).collect(),
            nav: NavigationController::new(),
            viewer: Viewer::with_settings(projection, settings).on_navigate(Msg::Navigate),
        }
    }

    fn open(&mut self, index: usize) {
        if self.nav.open(index, self.images.len()) {
            self.viewer.reset_view();
        }
    }

    fn selection(&self) -> Selection<'_, String> {
        let index = self.nav.current().expect("viewer is open");
        Selection::new(&self.images, index).expect("index in range")
    }

    /// Route an event through the viewer and apply any navigation request.
    fn send(&mut self, event: Event) {
        let index = self.nav.current().expect("viewer is open");
        let selection = Selection::new(&self.images, index).expect("index in range");
        if let Some(Msg::Navigate(direction)) = self.viewer.on_event(&event, selection) {
            if self.nav.step(direction, self.images.len()) {
                self.viewer.reset_view();
            }
        }
    }

    fn scale(&self) -> f32 {
        self.viewer.viewport().scale()
    }
}

#[test]
fn test_three_image_walkthrough() {
    // One wheel notch zooms by +10
    let settings = ViewerSettings {
        wheel_zoom_step: 10.0,
        ..ViewerSettings::default()
    };
    let mut page = Page::with_settings(3, settings);
    page.open(0);
    assert_eq!(page.scale(), 1.0);

    for _ in 0..5 {
        page.send(Event::Control(Control::ZoomIn));
    }
    assert_eq!(page.scale(), 1.25);

    // A huge delta clamps at the upper bound
    page.send(Event::Wheel {
        delta_y: -1.0,
        position: crate::Point::zero(),
    });
    assert_eq!(page.scale(), 3.0);

    page.send(Event::Control(Control::Next));
    assert_eq!(page.nav.current(), Some(1));
    assert_eq!(page.scale(), 1.0);

    page.send(Event::Control(Control::Previous));
    assert_eq!(page.nav.current(), Some(0));
    page.send(Event::Control(Control::Previous));
    assert_eq!(page.nav.current(), Some(0));
}

#[test]
fn test_navigation_recenters_a_panned_image() {
    let mut page = Page::new(3);
    page.open(1);
    page.send(Event::DoubleClicked {
        position: crate::Point::zero(),
    });
    page.send(Event::PointerPressed {
        button: crate::MouseButton::Left,
        position: crate::Point::new(100.0, 100.0),
    });
    page.send(Event::PointerMoved {
        position: crate::Point::new(160.0, 130.0),
    });
    page.send(Event::PointerReleased {
        button: crate::MouseButton::Left,
        position: crate::Point::new(160.0, 130.0),
    });
    assert_eq!(page.viewer.viewport().offset(), crate::Point::new(40.0, 20.0));

    page.send(Event::Control(Control::Next));
    let frame = page.viewer.frame(page.selection());
    assert_eq!(frame.counter, "3 / 3");
    assert_eq!(frame.transform, "scale(1) translate(0px, 0px)");
    assert!(!frame.can_next);
}

#[derive(Default)]
struct Clipboard {
    text: Option<String>,
}

impl ClipboardSink for Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.text = Some(text.to_string());
        Ok(())
    }
}

#[test]
fn test_copy_hello_acknowledgement_lasts_two_seconds() {
    let clock = ManualClock::new();
    let mut clipboard = Clipboard::default();
    let mut exporter = crate::ClipboardExporter::default();

    let ticket = exporter
        .copy(&mut clipboard, "hello", clock.now())
        .expect("write succeeds");
    assert_eq!(clipboard.text.as_deref(), Some("hello"));
    assert!(exporter.is_acknowledged());
    assert_eq!(ticket.delay_from(clock.now()), Duration::from_millis(2000));

    clock.advance(Duration::from_millis(2000));
    assert!(exporter.tick(clock.now()));
    assert!(!exporter.is_acknowledged());
}

#[test]
fn test_copy_caption_from_viewer() {
    let clock = ManualClock::new();
    let mut clipboard = Clipboard::default();
    let mut page = Page::new(2);
    page.open(1);

    let selection = Selection::new(&page.images, 1).expect("index in range");
    let ticket = page
        .viewer
        .copy_caption(&mut clipboard, selection, clock.now())
        .expect("write succeeds");
    assert_eq!(clipboard.text.as_deref(), Some("prompt /img/1.png"));
    assert!(page.viewer.frame(selection).copy_acknowledged);

    // A second copy supersedes the first timer
    clock.advance(Duration::from_millis(1500));
    let second = page
        .viewer
        .copy_caption(&mut clipboard, selection, clock.now())
        .expect("write succeeds");
    assert!(!page.viewer.revert_copy(ticket));
    assert!(page.viewer.is_copy_acknowledged());
    assert!(page.viewer.revert_copy(second));
    assert!(!page.viewer.is_copy_acknowledged());
}
