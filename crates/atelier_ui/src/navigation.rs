//! Which image of an ordered list is open in the enlarged view.
//!
//! The controller only tracks the index; the list itself stays with the host
//! page and is passed in as a length wherever bounds matter. Every successful
//! transition returns `true` so the caller knows to reset the viewport.

use crate::event::Direction;

/// Open/closed state of the enlarged view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavState {
    /// Viewer closed (initial state)
    #[default]
    Closed,
    /// Viewer showing the item at this index
    Open(usize),
}

#[derive(Debug, Clone, Default)]
pub struct NavigationController {
    state: NavState,
}

impl NavigationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn current(&self) -> Option<usize> {
        match self.state {
            NavState::Open(index) => Some(index),
            NavState::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, NavState::Open(_))
    }

    /// Open the item at `index`. Out-of-range requests are ignored.
    pub fn open(&mut self, index: usize, len: usize) -> bool {
        if index >= len {
            log::debug!("Ignoring open({index}) on a list of {len}");
            return false;
        }
        self.state = NavState::Open(index);
        true
    }

    /// Move one step forward. Disabled at the last item.
    pub fn next(&mut self, len: usize) -> bool {
        match self.state {
            NavState::Open(index) if index + 1 < len => {
                self.state = NavState::Open(index + 1);
                true
            }
            _ => false,
        }
    }

    /// Move one step back. Disabled at the first item.
    pub fn previous(&mut self) -> bool {
        match self.state {
            NavState::Open(index) if index > 0 => {
                self.state = NavState::Open(index - 1);
                true
            }
            _ => false,
        }
    }

    /// Move in `direction`.
    pub fn step(&mut self, direction: Direction, len: usize) -> bool {
        match direction {
            Direction::Previous => self.previous(),
            Direction::Next => self.next(len),
        }
    }

    /// Jump to an absolute index. Only moves between open states.
    pub fn jump(&mut self, index: usize, len: usize) -> bool {
        match self.state {
            NavState::Open(current) if current != index && index < len => {
                self.state = NavState::Open(index);
                true
            }
            _ => false,
        }
    }

    pub fn close(&mut self) {
        self.state = NavState::Closed;
    }

    pub fn has_previous(&self) -> bool {
        matches!(self.state, NavState::Open(index) if index > 0)
    }

    pub fn has_next(&self, len: usize) -> bool {
        matches!(self.state, NavState::Open(index) if index + 1 < len)
    }

    /// Keep pointing at the same item after `count` items were inserted in
    /// front of the list.
    pub fn shift_for_prepend(&mut self, count: usize) {
        if let NavState::Open(index) = self.state {
            self.state = NavState::Open(index + count);
        }
    }

    /// Close if the list shrank below the open index.
    pub fn clamp_to(&mut self, len: usize) -> bool {
        match self.state {
            NavState::Open(index) if index >= len => {
                self.state = NavState::Closed;
                true
            }
            _ => false,
        }
    }
}
