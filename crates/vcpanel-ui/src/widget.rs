//! Widget model and capability traits.
//!
//! Widgets expose optional capabilities through accessor methods instead
//! of downcasting: a widget that can be bound to a signal endpoint returns
//! `Some` from [`Widget::as_bindable`], a text entry from
//! [`Widget::as_text_entry`], and so on. The binder and handler probe
//! these accessors and never need to know concrete widget types.

use parking_lot::RwLock;
use std::sync::Arc;

use vcpanel_core::{Result, SignalComponent};

use crate::keymap::KeyCode;

/// Shared handle to a widget behind a read-write lock
pub type SharedWidget = Arc<RwLock<dyn Widget>>;

/// Wrap a widget into a shared handle
pub fn shared<W: Widget + 'static>(widget: W) -> SharedWidget {
    Arc::new(RwLock::new(widget))
}

/// Window metadata handed to special-init widgets
#[derive(Debug, Clone)]
pub struct WindowInfo {
    /// The window's name.
    pub name: String,
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
}

/// A UI element with a unique name within the window
///
/// The capability accessors default to `None`; concrete widgets override
/// the ones they support.
pub trait Widget: Send + Sync {
    /// The widget's declared name, used as its signal endpoint name
    fn name(&self) -> &str;

    /// Signal-bindable capability
    fn as_bindable(&mut self) -> Option<&mut dyn SignalBindable> {
        None
    }

    /// Momentary-control capability (buttons)
    fn as_pressable(&mut self) -> Option<&mut dyn Pressable> {
        None
    }

    /// Value-control capability (sliders)
    fn as_value_widget(&mut self) -> Option<&mut dyn ValueWidget> {
        None
    }

    /// Text-entry capability (editable fields)
    fn as_text_entry(&mut self) -> Option<&mut dyn TextEntry> {
        None
    }

    /// Special-init capability (overlays)
    fn as_special(&mut self) -> Option<&mut dyn SpecialInit> {
        None
    }

    /// Message-sink capability (status bars)
    fn as_status_sink(&mut self) -> Option<&mut dyn StatusSink> {
        None
    }

    /// Child widgets, for container widgets
    fn children(&self) -> Vec<SharedWidget> {
        Vec::new()
    }

    /// Apply a style string
    fn set_style(&mut self, _style: String) {}

    /// The widget's current style string
    fn style(&self) -> Option<&str> {
        None
    }
}

/// Capability of widgets that bind to signal endpoints
pub trait SignalBindable {
    /// Create this widget's pins on the component
    ///
    /// Called exactly once during binding, with the widget's declared
    /// name as the endpoint base name.
    fn bind(&mut self, component: &Arc<SignalComponent>, name: &str) -> Result<()>;

    /// Pull the latest input-pin state into the widget
    ///
    /// Called by the update dispatcher each cycle. Output-direction
    /// widgets leave this a no-op.
    fn refresh(&mut self, component: &SignalComponent);
}

/// Capability of momentary controls
pub trait Pressable {
    /// Simulate the control going down
    fn press(&mut self);

    /// Simulate the control coming back up
    fn release(&mut self);

    /// Simulate a full activation (press then release)
    fn click(&mut self) {
        self.press();
        self.release();
    }

    /// Whether the control is currently down
    fn is_down(&self) -> bool;
}

/// Capability of value controls
pub trait ValueWidget {
    /// The control's current value
    fn value(&self) -> f64;

    /// Set the control's value, clamping to its range
    fn set_value(&mut self, value: f64);
}

/// Capability of editable text fields
pub trait TextEntry {
    /// Whether the field currently has input focus
    fn has_focus(&self) -> bool;

    /// Give or take input focus
    fn set_focus(&mut self, focus: bool);

    /// The field's native key handler
    fn key_press(&mut self, code: KeyCode);

    /// The field's current contents
    fn text(&self) -> &str;
}

/// Capability of widgets needing a window hook at bind time
pub trait SpecialInit {
    /// Attach the widget to its window
    fn attach(&mut self, window: &WindowInfo);

    /// React to a focus overlay change
    fn set_active(&mut self, _active: bool, _message: Option<&str>) {}
}

/// Capability of widgets that display status messages
pub trait StatusSink {
    /// Show a message, replacing any previous one
    fn show_message(&mut self, text: &str);
}
