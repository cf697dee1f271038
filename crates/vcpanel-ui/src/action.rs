//! UI action delivery.
//!
//! Widgets do not call into the handler directly; they push named actions
//! onto a shared [`ActionQueue`] which the event loop drains into the
//! handler once per cycle. This is the panel's rendition of the toolkit's
//! signal/slot wiring and keeps widget emission re-entrancy free.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

/// An action emitted by a widget
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// A momentary control went down.
    Pressed,
    /// A momentary control came back up.
    Released,
    /// A control was activated (press followed by release).
    Clicked,
    /// A value control changed.
    ValueChanged(f64),
    /// A text entry submitted its contents.
    TextSubmitted(String),
    /// A file was chosen for loading.
    FileSelected(PathBuf),
    /// The window was asked to close.
    CloseRequested,
}

/// Shared queue of (widget name, action) pairs
///
/// Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct ActionQueue {
    inner: Arc<Mutex<VecDeque<(String, UiAction)>>>,
}

impl ActionQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an action emitted by the named widget
    pub fn push(&self, widget: impl Into<String>, action: UiAction) {
        self.inner.lock().push_back((widget.into(), action));
    }

    /// Drain all queued actions in emission order
    pub fn drain(&self) -> Vec<(String, UiAction)> {
        self.inner.lock().drain(..).collect()
    }

    /// Number of queued actions
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_drain_preserves_order() {
        let queue = ActionQueue::new();
        queue.push("jog_pos_x", UiAction::Pressed);
        queue.push("jog_pos_x", UiAction::Released);

        let drained = queue.drain();
        assert_eq!(
            drained,
            vec![
                ("jog_pos_x".to_string(), UiAction::Pressed),
                ("jog_pos_x".to_string(), UiAction::Released),
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clones_share_queue() {
        let queue = ActionQueue::new();
        let producer = queue.clone();
        producer.push("feed_slider", UiAction::ValueChanged(50.0));
        assert_eq!(queue.len(), 1);
    }
}
