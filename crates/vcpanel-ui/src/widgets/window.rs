//! Panel window root.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::action::{ActionQueue, UiAction};
use crate::widget::{SharedWidget, TextEntry, Widget, WindowInfo};

/// Shared handle to the panel window
pub type SharedWindow = Arc<RwLock<PanelWindow>>;

/// Wrap a window into a shared handle
pub fn shared_window(window: PanelWindow) -> SharedWindow {
    Arc::new(RwLock::new(window))
}

/// The window root holding the widget tree
///
/// Tracks which widget has input focus and forwards close requests into
/// the action queue for the event loop to arbitrate.
pub struct PanelWindow {
    name: String,
    width: u32,
    height: u32,
    style: Option<String>,
    widgets: Vec<SharedWidget>,
    focused: Option<String>,
    queue: ActionQueue,
}

impl PanelWindow {
    /// Create an empty window
    pub fn new(name: impl Into<String>, width: u32, height: u32, queue: &ActionQueue) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            style: None,
            widgets: Vec::new(),
            focused: None,
            queue: queue.clone(),
        }
    }

    /// The window's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a top-level widget
    pub fn add_widget(&mut self, widget: SharedWidget) {
        self.widgets.push(widget);
    }

    /// The window's top-level widgets
    pub fn widgets(&self) -> &[SharedWidget] {
        &self.widgets
    }

    /// Window metadata for special-init widgets
    pub fn info(&self) -> WindowInfo {
        WindowInfo {
            name: self.name.clone(),
            width: self.width,
            height: self.height,
        }
    }

    /// Apply a style string to the window background
    pub fn set_style(&mut self, style: String) {
        self.style = Some(style);
    }

    /// The window's current style string
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Find a descendant widget by name (depth-first)
    pub fn find(&self, name: &str) -> Option<SharedWidget> {
        let mut stack: Vec<SharedWidget> = self.widgets.to_vec();
        while let Some(widget) = stack.pop() {
            let guard = widget.read();
            if guard.name() == name {
                drop(guard);
                return Some(widget);
            }
            stack.extend(guard.children());
        }
        None
    }

    /// Move input focus to the named widget, or clear it with `None`
    ///
    /// Text-entry widgets have their focus flag kept in sync.
    pub fn set_focus(&mut self, name: Option<&str>) {
        if let Some(previous) = self.focused.take() {
            if let Some(widget) = self.find(&previous) {
                if let Some(entry) = widget.write().as_text_entry() {
                    entry.set_focus(false);
                }
            }
        }
        if let Some(name) = name {
            if let Some(widget) = self.find(name) {
                if let Some(entry) = widget.write().as_text_entry() {
                    entry.set_focus(true);
                }
                self.focused = Some(name.to_string());
            }
        }
    }

    /// Name of the widget currently holding input focus
    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// Ask the window to close; the event loop arbitrates the request
    pub fn request_close(&self) {
        self.queue.push(self.name.clone(), UiAction::CloseRequested);
    }
}
