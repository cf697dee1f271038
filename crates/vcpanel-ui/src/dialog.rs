//! Blocking confirmation dialogs.
//!
//! The shutdown path asks a yes/no question through a [`ConfirmDialog`]
//! service. The call is a deliberate synchronous suspension of the event
//! loop until the operator answers.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Blocking yes/no dialog seam
pub trait ConfirmDialog: Send + Sync {
    /// Ask a yes/no question, blocking until answered
    fn confirm(&self, summary: &str, details: Option<&str>) -> bool;
}

/// Dialog answering from a scripted queue
///
/// Backs the headless demo and the test suite: queued answers are
/// consumed in order, then the fallback answer applies.
pub struct PresetDialog {
    answers: Mutex<VecDeque<bool>>,
    fallback: bool,
    shown: AtomicUsize,
}

impl PresetDialog {
    /// Create a dialog with a fallback answer
    pub fn new(fallback: bool) -> Self {
        Self {
            answers: Mutex::new(VecDeque::new()),
            fallback,
            shown: AtomicUsize::new(0),
        }
    }

    /// Queue the answer for the next question
    pub fn push_answer(&self, answer: bool) {
        self.answers.lock().push_back(answer);
    }

    /// How many questions have been asked so far
    pub fn shown_count(&self) -> usize {
        self.shown.load(Ordering::SeqCst)
    }
}

impl ConfirmDialog for PresetDialog {
    fn confirm(&self, summary: &str, details: Option<&str>) -> bool {
        self.shown.fetch_add(1, Ordering::SeqCst);
        let answer = self.answers.lock().pop_front().unwrap_or(self.fallback);
        tracing::debug!(summary, ?details, answer, "confirmation dialog answered");
        answer
    }
}
