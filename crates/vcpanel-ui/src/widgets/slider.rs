//! Value slider.

use std::sync::Arc;

use vcpanel_core::{PinDirection, PinValue, Result, SignalComponent};

use crate::action::{ActionQueue, UiAction};
use crate::widget::{SignalBindable, ValueWidget, Widget};

/// A value slider backed by an output Float pin
pub struct Slider {
    name: String,
    min: f64,
    max: f64,
    value: f64,
    queue: ActionQueue,
    component: Option<Arc<SignalComponent>>,
}

impl Slider {
    /// Create a slider with the given range, initially at the minimum
    pub fn new(name: impl Into<String>, min: f64, max: f64, queue: &ActionQueue) -> Self {
        Self {
            name: name.into(),
            min,
            max,
            value: min,
            queue: queue.clone(),
            component: None,
        }
    }

    /// The slider's range as (min, max)
    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

impl Widget for Slider {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_bindable(&mut self) -> Option<&mut dyn SignalBindable> {
        Some(self)
    }

    fn as_value_widget(&mut self) -> Option<&mut dyn ValueWidget> {
        Some(self)
    }
}

impl SignalBindable for Slider {
    fn bind(&mut self, component: &Arc<SignalComponent>, name: &str) -> Result<()> {
        component.ensure_pin(name, PinDirection::Out, PinValue::Float(self.value))?;
        self.component = Some(component.clone());
        Ok(())
    }

    fn refresh(&mut self, _component: &SignalComponent) {
        // Output direction: pushed on value change, never polled.
    }
}

impl ValueWidget for Slider {
    fn value(&self) -> f64 {
        self.value
    }

    fn set_value(&mut self, value: f64) {
        let clamped = value.clamp(self.min, self.max);
        if (clamped - self.value).abs() < f64::EPSILON {
            return;
        }
        self.value = clamped;
        if let Some(component) = &self.component {
            if let Err(e) = component.set_value(&self.name, PinValue::Float(clamped)) {
                tracing::warn!(widget = %self.name, error = %e, "failed to drive slider pin");
            }
        }
        self.queue.push(self.name.clone(), UiAction::ValueChanged(clamped));
    }
}
