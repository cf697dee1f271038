//! Status bar message sink.

use crate::widget::{StatusSink, Widget};

/// A single-line message sink at the bottom of the panel
pub struct StatusBar {
    name: String,
    message: String,
}

impl StatusBar {
    /// Create an empty status bar
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: String::new(),
        }
    }

    /// The currently displayed message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Widget for StatusBar {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_status_sink(&mut self) -> Option<&mut dyn StatusSink> {
        Some(self)
    }
}

impl StatusSink for StatusBar {
    fn show_message(&mut self, text: &str) {
        self.message = text.to_string();
    }
}
