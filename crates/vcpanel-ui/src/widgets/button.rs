//! Momentary push button.

use std::sync::Arc;

use vcpanel_core::{PinDirection, PinValue, Result, SignalComponent};

use crate::action::{ActionQueue, UiAction};
use crate::widget::{Pressable, SignalBindable, Widget};

/// A momentary button backed by an output Bit pin
///
/// Pressing drives the pin true and emits `Pressed`; releasing drives the
/// pin false and emits `Released` followed by `Clicked`. Key-binding
/// handlers use [`press`](Pressable::press)/[`release`](Pressable::release)
/// to simulate press-and-hold semantics.
pub struct PushButton {
    name: String,
    label: String,
    queue: ActionQueue,
    component: Option<Arc<SignalComponent>>,
    down: bool,
}

impl PushButton {
    /// Create a button with a display label
    pub fn new(name: impl Into<String>, label: impl Into<String>, queue: &ActionQueue) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            queue: queue.clone(),
            component: None,
            down: false,
        }
    }

    /// The button's display label
    pub fn label(&self) -> &str {
        &self.label
    }

    fn drive_pin(&self, value: bool) {
        if let Some(component) = &self.component {
            if let Err(e) = component.set_value(&self.name, PinValue::Bit(value)) {
                tracing::warn!(widget = %self.name, error = %e, "failed to drive button pin");
            }
        }
    }
}

impl Widget for PushButton {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_bindable(&mut self) -> Option<&mut dyn SignalBindable> {
        Some(self)
    }

    fn as_pressable(&mut self) -> Option<&mut dyn Pressable> {
        Some(self)
    }
}

impl SignalBindable for PushButton {
    fn bind(&mut self, component: &Arc<SignalComponent>, name: &str) -> Result<()> {
        component.ensure_pin(name, PinDirection::Out, PinValue::Bit(false))?;
        self.component = Some(component.clone());
        Ok(())
    }

    fn refresh(&mut self, _component: &SignalComponent) {
        // Output direction: pushed on press/release, never polled.
    }
}

impl Pressable for PushButton {
    fn press(&mut self) {
        if self.down {
            return;
        }
        self.down = true;
        self.drive_pin(true);
        self.queue.push(self.name.clone(), UiAction::Pressed);
    }

    fn release(&mut self) {
        if !self.down {
            return;
        }
        self.down = false;
        self.drive_pin(false);
        self.queue.push(self.name.clone(), UiAction::Released);
        self.queue.push(self.name.clone(), UiAction::Clicked);
    }

    fn is_down(&self) -> bool {
        self.down
    }
}
