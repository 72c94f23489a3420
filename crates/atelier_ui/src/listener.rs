//! Scoped registration of global event listeners.
//!
//! The viewer needs window-level listeners while it is mounted: resize,
//! pointer move/up (so a drag that leaves the image still ends) and a
//! non-passive wheel listener on the image wrapper. [`ListenerScope`] attaches
//! them all up front and detaches every one of them when it is released or
//! dropped, including when a later attach fails halfway through.

use thiserror::Error;

/// Listeners the mounted viewer owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Window `resize`
    Resize,
    /// Window `mousemove`
    PointerMove,
    /// Window `mouseup`
    PointerUp,
    /// Wrapper `wheel`, must be able to cancel page scrolling
    Wheel,
    /// Window `keydown`
    KeyDown,
}

impl ListenerKind {
    /// Everything the enlarged view attaches on mount.
    pub const VIEWER: [ListenerKind; 5] = [
        ListenerKind::Resize,
        ListenerKind::PointerMove,
        ListenerKind::PointerUp,
        ListenerKind::Wheel,
        ListenerKind::KeyDown,
    ];

    /// DOM event type name.
    pub fn event_type(&self) -> &'static str {
        match self {
            ListenerKind::Resize => "resize",
            ListenerKind::PointerMove => "mousemove",
            ListenerKind::PointerUp => "mouseup",
            ListenerKind::Wheel => "wheel",
            ListenerKind::KeyDown => "keydown",
        }
    }

    /// Passive listeners cannot call `preventDefault`, so the wheel listener
    /// must not be passive.
    pub fn passive(&self) -> bool {
        !matches!(self, ListenerKind::Wheel)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ListenerError {
    #[error("Failed to attach {kind:?} listener: {reason}")]
    Attach { kind: ListenerKind, reason: String },
}

/// The platform side: knows how to attach and detach one listener.
pub trait ListenerHost {
    /// Whatever must be kept alive to detach the listener later.
    type Handle;

    fn attach(&mut self, kind: ListenerKind) -> Result<Self::Handle, ListenerError>;

    fn detach(&mut self, handle: Self::Handle);
}

/// A set of attached listeners that is released exactly once.
pub struct ListenerScope<H: ListenerHost> {
    host: H,
    handles: Vec<H::Handle>,
}

impl<H: ListenerHost> ListenerScope<H> {
    /// Attach every listener in `kinds`.
    ///
    /// If any attach fails the ones already attached are detached before the
    /// error is returned.
    pub fn acquire(host: H, kinds: &[ListenerKind]) -> Result<Self, ListenerError> {
        let mut scope = Self {
            host,
            handles: Vec::with_capacity(kinds.len()),
        };
        for kind in kinds {
            let handle = scope.host.attach(*kind)?;
            scope.handles.push(handle);
        }
        log::debug!("Attached {} viewer listeners", scope.handles.len());
        Ok(scope)
    }

    pub fn is_active(&self) -> bool {
        !self.handles.is_empty()
    }

    /// Detach everything. Safe to call more than once.
    pub fn release(&mut self) {
        if self.handles.is_empty() {
            return;
        }
        let count = self.handles.len();
        // Reverse attach order
        while let Some(handle) = self.handles.pop() {
            self.host.detach(handle);
        }
        log::debug!("Detached {count} viewer listeners");
    }
}

impl<H: ListenerHost> Drop for ListenerScope<H> {
    fn drop(&mut self) {
        self.release();
    }
}
