//! Machine error-channel seam.
//!
//! The control daemon delivers asynchronous operator messages through a
//! non-blocking channel polled once per periodic tick. The poll result is
//! typed: it distinguishes "nothing pending", "one message of kind K", and
//! "channel fault" so callers can log faults instead of discarding them.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use thiserror::Error;

/// Kind of a message delivered on the error channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    /// Fatal error reported by the control system.
    Error,
    /// Error raised by an operator action.
    OperatorError,
    /// Informational text from the control system.
    Text,
    /// Informational text from an operator action.
    OperatorText,
    /// Display request from the control system.
    Display,
    /// Display request from an operator action.
    OperatorDisplay,
}

/// Notification category a message kind folds into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageCategory {
    /// Errors, fatal or operator-raised.
    Error,
    /// Informational operator text.
    Message,
    /// Operator display text.
    Display,
}

impl MessageKind {
    /// Fold this kind into its notification category
    pub fn category(&self) -> MessageCategory {
        match self {
            MessageKind::Error | MessageKind::OperatorError => MessageCategory::Error,
            MessageKind::Text | MessageKind::OperatorText => MessageCategory::Message,
            MessageKind::Display | MessageKind::OperatorDisplay => MessageCategory::Display,
        }
    }
}

/// A single message polled from the error channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineMessage {
    /// Message kind.
    pub kind: MessageKind,
    /// Message text.
    pub text: String,
}

impl MachineMessage {
    /// Create a message
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// The error channel itself failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Error channel fault: {reason}")]
pub struct ChannelFault {
    /// Description of the fault.
    pub reason: String,
}

/// Non-blocking poll interface to the machine error channel
pub trait ErrorChannel: Send {
    /// Poll for at most one pending message
    ///
    /// Returns `Ok(None)` when nothing is pending, `Ok(Some(message))`
    /// for one pending message, and `Err` when the channel itself faults.
    fn poll(&mut self) -> Result<Option<MachineMessage>, ChannelFault>;
}

#[derive(Debug, Default)]
struct QueueState {
    pending: VecDeque<MachineMessage>,
    fault: Option<String>,
}

/// In-memory error channel
///
/// Backs the headless demo and the test suite. Clones share the same
/// queue, so producers can push while the handler owns the polling end.
#[derive(Debug, Clone, Default)]
pub struct QueueErrorChannel {
    state: Arc<Mutex<QueueState>>,
}

impl QueueErrorChannel {
    /// Create an empty channel
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a message for the next poll
    pub fn push(&self, message: MachineMessage) {
        self.state.lock().pending.push_back(message);
    }

    /// Make the next poll fail with a channel fault
    pub fn inject_fault(&self, reason: impl Into<String>) {
        self.state.lock().fault = Some(reason.into());
    }

    /// Number of messages waiting to be polled
    pub fn pending_len(&self) -> usize {
        self.state.lock().pending.len()
    }
}

impl ErrorChannel for QueueErrorChannel {
    fn poll(&mut self) -> Result<Option<MachineMessage>, ChannelFault> {
        let mut state = self.state.lock();
        if let Some(reason) = state.fault.take() {
            return Err(ChannelFault { reason });
        }
        Ok(state.pending.pop_front())
    }
}
