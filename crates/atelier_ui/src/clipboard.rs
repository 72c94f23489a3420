//! Copying the caption text with a transient "copied" acknowledgement.
//!
//! The acknowledgement is deadline based: it is visible until
//! `acknowledged_at + ack_duration`. Hosts either poll [`ClipboardExporter::tick`]
//! or arm a timer with the returned [`RevertTicket`] and hand it back to
//! [`ClipboardExporter::revert`] when it fires. A ticket only reverts the
//! acknowledgement it was issued for, so a timer from an earlier copy can
//! never hide the indicator of a newer one.

use crate::constants::COPY_ACK_DURATION;
use std::time::Duration;
use thiserror::Error;
use web_time::Instant;

/// Errors a clipboard backend can report.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClipboardError {
    /// No clipboard is reachable from this host
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    /// The clipboard refused the write (e.g. permission denied)
    #[error("Clipboard write rejected: {0}")]
    Rejected(String),
}

/// A place text can be copied to.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Handle for one scheduled revert of the acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevertTicket {
    generation: u64,
    due: Instant,
}

impl RevertTicket {
    /// When the acknowledgement should disappear.
    pub fn due(&self) -> Instant {
        self.due
    }

    /// Delay from `now` until the ticket is due.
    pub fn delay_from(&self, now: Instant) -> Duration {
        self.due.saturating_duration_since(now)
    }
}

#[derive(Debug, Clone)]
pub struct ClipboardExporter {
    ack_duration: Duration,
    deadline: Option<Instant>,
    generation: u64,
}

impl Default for ClipboardExporter {
    fn default() -> Self {
        Self::new(COPY_ACK_DURATION)
    }
}

impl ClipboardExporter {
    pub fn new(ack_duration: Duration) -> Self {
        Self {
            ack_duration,
            deadline: None,
            generation: 0,
        }
    }

    /// Copy `text` through a synchronous sink.
    ///
    /// On success the acknowledgement is shown and a revert ticket returned.
    /// On failure the error goes to the log and nothing else changes.
    pub fn copy<S: ClipboardSink + ?Sized>(
        &mut self,
        sink: &mut S,
        text: &str,
        now: Instant,
    ) -> Option<RevertTicket> {
        match sink.write_text(text) {
            Ok(()) => Some(self.acknowledge(now)),
            Err(err) => {
                self.report_failure(&err);
                None
            }
        }
    }

    /// Show the acknowledgement after an asynchronous write succeeded.
    ///
    /// Any ticket issued before this call becomes stale.
    pub fn acknowledge(&mut self, now: Instant) -> RevertTicket {
        self.generation += 1;
        let due = now + self.ack_duration;
        self.deadline = Some(due);
        log::debug!("Caption copied to clipboard");
        RevertTicket {
            generation: self.generation,
            due,
        }
    }

    /// Log a failed write. The acknowledgement state is left as is.
    pub fn report_failure(&self, err: &ClipboardError) {
        log::error!("Failed to copy caption: {err}");
    }

    pub fn is_acknowledged(&self) -> bool {
        self.deadline.is_some()
    }

    /// Deadline of the visible acknowledgement, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Hide the acknowledgement once its deadline has passed.
    /// Returns true if the visible state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(due) if now >= due => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Timer-driven revert. Stale tickets are ignored.
    pub fn revert(&mut self, ticket: RevertTicket) -> bool {
        if ticket.generation != self.generation || self.deadline.is_none() {
            log::trace!("Ignoring stale copy acknowledgement revert");
            return false;
        }
        self.deadline = None;
        true
    }

    /// Drop any pending acknowledgement (unmount). Outstanding tickets go stale.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};

    #[derive(Default)]
    struct RecordingSink {
        written: Vec<String>,
        fail: Option<ClipboardError>,
    }

    impl ClipboardSink for RecordingSink {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if let Some(err) = self.fail.clone() {
                return Err(err);
            }
            self.written.push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_copy_shows_then_reverts_after_two_seconds() {
        let clock = ManualClock::new();
        let mut sink = RecordingSink::default();
        let mut exporter = ClipboardExporter::default();

        let ticket = exporter.copy(&mut sink, "hello", clock.now());
        assert!(ticket.is_some());
        assert_eq!(sink.written, vec!["hello".to_string()]);
        assert!(exporter.is_acknowledged());

        clock.advance(Duration::from_millis(1999));
        assert!(!exporter.tick(clock.now()));
        assert!(exporter.is_acknowledged());

        clock.advance(Duration::from_millis(1));
        assert!(exporter.tick(clock.now()));
        assert!(!exporter.is_acknowledged());
    }

    #[test]
    fn test_failed_copy_changes_nothing() {
        let clock = ManualClock::new();
        let mut sink = RecordingSink {
            fail: Some(ClipboardError::Rejected("permission denied".into())),
            ..Default::default()
        };
        let mut exporter = ClipboardExporter::default();

        assert_eq!(exporter.copy(&mut sink, "hello", clock.now()), None);
        assert!(!exporter.is_acknowledged());
        assert!(sink.written.is_empty());
    }

    #[test]
    fn test_newer_copy_supersedes_older_timer() {
        let clock = ManualClock::new();
        let mut exporter = ClipboardExporter::default();

        let first = exporter.acknowledge(clock.now());
        clock.advance(Duration::from_millis(1500));
        let second = exporter.acknowledge(clock.now());

        // First timer fires at 2000ms: must not hide the newer acknowledgement
        clock.advance(Duration::from_millis(500));
        assert!(!exporter.revert(first));
        assert!(!exporter.tick(clock.now()));
        assert!(exporter.is_acknowledged());

        clock.advance(Duration::from_millis(1500));
        assert!(exporter.revert(second));
        assert!(!exporter.is_acknowledged());
    }

    #[test]
    fn test_cancel_invalidates_pending_ticket() {
        let clock = ManualClock::new();
        let mut exporter = ClipboardExporter::default();
        let ticket = exporter.acknowledge(clock.now());
        exporter.cancel();
        assert!(!exporter.is_acknowledged());
        assert!(!exporter.revert(ticket));
    }

    #[test]
    fn test_ticket_delay() {
        let clock = ManualClock::new();
        let mut exporter = ClipboardExporter::new(Duration::from_millis(2000));
        let ticket = exporter.acknowledge(clock.now());
        assert_eq!(ticket.delay_from(clock.now()), Duration::from_millis(2000));
        clock.advance(Duration::from_millis(2500));
        assert_eq!(ticket.delay_from(clock.now()), Duration::ZERO);
    }
}
