//! MDI text entry.

use crate::action::{ActionQueue, UiAction};
use crate::keymap::KeyCode;
use crate::widget::{TextEntry, Widget};

/// An editable command-entry field
///
/// While the entry holds focus, ordinary key presses are forwarded to its
/// native key handler instead of the panel keymap. Return submits the
/// current text as a `TextSubmitted` action and clears the field.
pub struct MdiEntry {
    name: String,
    text: String,
    focused: bool,
    queue: ActionQueue,
}

impl MdiEntry {
    /// Create an empty, unfocused entry
    pub fn new(name: impl Into<String>, queue: &ActionQueue) -> Self {
        Self {
            name: name.into(),
            text: String::new(),
            focused: false,
            queue: queue.clone(),
        }
    }
}

impl Widget for MdiEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_text_entry(&mut self) -> Option<&mut dyn TextEntry> {
        Some(self)
    }
}

impl TextEntry for MdiEntry {
    fn has_focus(&self) -> bool {
        self.focused
    }

    fn set_focus(&mut self, focus: bool) {
        self.focused = focus;
    }

    fn key_press(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.text.push(c),
            KeyCode::Backspace => {
                self.text.pop();
            }
            KeyCode::Return => {
                if !self.text.is_empty() {
                    let submitted = std::mem::take(&mut self.text);
                    self.queue.push(self.name.clone(), UiAction::TextSubmitted(submitted));
                }
            }
            _ => {}
        }
    }

    fn text(&self) -> &str {
        &self.text
    }
}
