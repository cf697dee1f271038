//! Loading overlay.

use crate::widget::{SpecialInit, Widget, WindowInfo};

/// Full-window overlay shown while the panel is busy or asking a question
///
/// Not signal-bindable; instead it carries the special-init capability and
/// is attached to its window during binding.
pub struct LoadingOverlay {
    name: String,
    attached: Option<WindowInfo>,
    visible: bool,
    message: Option<String>,
}

impl LoadingOverlay {
    /// Create a detached, hidden overlay
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attached: None,
            visible: false,
            message: None,
        }
    }

    /// Name of the window this overlay is attached to
    pub fn attached_window(&self) -> Option<&str> {
        self.attached.as_ref().map(|w| w.name.as_str())
    }

    /// Show or hide the overlay
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Whether the overlay is currently shown
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Message shown on the overlay, if any
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl Widget for LoadingOverlay {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_special(&mut self) -> Option<&mut dyn SpecialInit> {
        Some(self)
    }
}

impl SpecialInit for LoadingOverlay {
    fn attach(&mut self, window: &WindowInfo) {
        tracing::debug!(overlay = %self.name, window = %window.name, "overlay attached");
        self.attached = Some(window.clone());
        self.visible = false;
    }

    fn set_active(&mut self, active: bool, message: Option<&str>) {
        self.visible = active;
        self.message = if active { message.map(str::to_string) } else { None };
    }
}
