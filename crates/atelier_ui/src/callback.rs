//! Host callbacks for the viewer.
//!
//! The viewer never reaches into the host page. Everything it needs the host
//! to do (close the overlay, move to another image, start a download) is
//! reported by turning the request into one of the host's own messages
//! through a `Callback<T, M>`.
//!
//! ```ignore
//! enum PageMessage {
//!     Close,
//!     Navigate(Direction),
//! }
//!
//! let viewer = Viewer::new(projection)
//!     .on_close(|()| PageMessage::Close)
//!     .on_navigate(PageMessage::Navigate);
//! ```

use std::fmt;

/// An optional handler that maps a value of type `T` into a host message `M`.
pub struct Callback<T, M> {
    f: Option<Box<dyn Fn(T) -> M>>,
}

impl<T, M> Callback<T, M> {
    /// Wrap a handler.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(T) -> M + 'static,
    {
        Self {
            f: Some(Box::new(f)),
        }
    }

    /// No handler registered; every call yields `None`.
    pub fn none() -> Self {
        Self { f: None }
    }

    /// Produce the host message for `value`, if a handler is registered.
    pub fn call(&self, value: T) -> Option<M> {
        self.f.as_ref().map(|f| f(value))
    }

    pub fn is_some(&self) -> bool {
        self.f.is_some()
    }
}

impl<T, M> Default for Callback<T, M> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T, M> fmt::Debug for Callback<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("registered", &self.f.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Msg {
        Closed,
        Moved(i32),
    }

    #[test]
    fn test_registered_callback_produces_message() {
        let cb: Callback<i32, Msg> = Callback::new(Msg::Moved);
        assert!(cb.is_some());
        assert_eq!(cb.call(3), Some(Msg::Moved(3)));
    }

    #[test]
    fn test_empty_callback_produces_nothing() {
        let cb: Callback<(), Msg> = Callback::none();
        assert!(!cb.is_some());
        assert_eq!(cb.call(()), None);

        let cb: Callback<(), Msg> = Callback::new(|()| Msg::Closed);
        assert_eq!(cb.call(()), Some(Msg::Closed));
    }
}
