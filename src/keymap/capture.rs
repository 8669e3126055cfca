//! Chord capture sessions
//!
//! Capturing a chord is asynchronous: the keymap hands the input provider a
//! [`CaptureCompleter`], and the provider calls [`CaptureCompleter::complete`]
//! once it has recorded a key combination. The keymap owns at most one
//! [`CaptureSession`] at a time and picks the result up on its next poll.
//!
//! Each session has its own channel. Once a session is cancelled its receiver
//! is dropped, so a late completion from the provider goes nowhere.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::Duration;

use thiserror::Error;

use super::keymap::BindingId;
use super::types::KeyCode;

/// External input collaborator that records the next chord pressed
pub trait InputProvider {
    /// Start listening; call `completer.complete(keys)` when done
    fn capture_next_chord(&mut self, completer: CaptureCompleter);
}

/// One-shot handle used by an input provider to report a captured chord
#[derive(Debug)]
pub struct CaptureCompleter {
    session: u64,
    tx: Sender<Vec<KeyCode>>,
}

impl CaptureCompleter {
    /// Session this completer belongs to
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Report the captured keys in the order they were pressed
    pub fn complete(self, keys: Vec<KeyCode>) {
        if self.tx.send(keys).is_err() {
            tracing::debug!(session = self.session, "capture completed after session ended");
        }
    }
}

/// The in-flight capture owned by a keymap
#[derive(Debug)]
pub struct CaptureSession {
    id: u64,
    binding: BindingId,
    age: Duration,
    rx: Receiver<Vec<KeyCode>>,
}

/// Result of polling a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SessionPoll {
    Pending,
    Completed(Vec<KeyCode>),
    /// The provider dropped its completer without reporting
    Abandoned,
}

impl CaptureSession {
    pub(crate) fn start(id: u64, binding: BindingId) -> (Self, CaptureCompleter) {
        let (tx, rx) = mpsc::channel();
        let session = Self {
            id,
            binding,
            age: Duration::ZERO,
            rx,
        };
        (session, CaptureCompleter { session: id, tx })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn binding(&self) -> BindingId {
        self.binding
    }

    pub fn age(&self) -> Duration {
        self.age
    }

    pub(crate) fn advance(&mut self, elapsed: Duration) {
        self.age = self.age.saturating_add(elapsed);
    }

    pub(crate) fn poll(&self) -> SessionPoll {
        match self.rx.try_recv() {
            Ok(keys) => SessionPoll::Completed(keys),
            Err(TryRecvError::Empty) => SessionPoll::Pending,
            Err(TryRecvError::Disconnected) => SessionPoll::Abandoned,
        }
    }
}

/// How a capture session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The chord was captured and assigned to the binding
    Assigned { binding: BindingId, keys: Vec<KeyCode> },
    /// No chord arrived before the capture timeout
    TimedOut { binding: BindingId },
    /// The input provider gave up without reporting a chord
    Abandoned { binding: BindingId },
}

/// Reasons a capture cannot start
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("a capture for binding {0} is already in progress")]
    InFlight(BindingId),
    #[error("no binding with id {0}")]
    UnknownBinding(BindingId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_is_received() {
        let (session, completer) = CaptureSession::start(7, BindingId::from_raw(1));
        assert_eq!(completer.session(), 7);
        assert_eq!(session.poll(), SessionPoll::Pending);
        completer.complete(vec![KeyCode::LeftAlt, KeyCode::K]);
        assert_eq!(
            session.poll(),
            SessionPoll::Completed(vec![KeyCode::LeftAlt, KeyCode::K])
        );
    }

    #[test]
    fn test_dropped_completer_abandons() {
        let (session, completer) = CaptureSession::start(1, BindingId::from_raw(1));
        drop(completer);
        assert_eq!(session.poll(), SessionPoll::Abandoned);
    }

    #[test]
    fn test_late_completion_is_harmless() {
        let (session, completer) = CaptureSession::start(1, BindingId::from_raw(1));
        drop(session);
        completer.complete(vec![KeyCode::F]);
    }
}
