//! Indicator lamp.

use std::sync::Arc;

use vcpanel_core::{PinDirection, PinValue, Result, SignalComponent};

use crate::widget::{SignalBindable, Widget};

/// An indicator lamp backed by an input Bit pin
///
/// The update dispatcher pulls the pin's value into the lamp each cycle;
/// the machine side writes the pin.
pub struct StatusLamp {
    name: String,
    lit: bool,
}

impl StatusLamp {
    /// Create an unlit lamp
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lit: false,
        }
    }

    /// Whether the lamp is currently lit
    pub fn is_lit(&self) -> bool {
        self.lit
    }
}

impl Widget for StatusLamp {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_bindable(&mut self) -> Option<&mut dyn SignalBindable> {
        Some(self)
    }
}

impl SignalBindable for StatusLamp {
    fn bind(&mut self, component: &Arc<SignalComponent>, name: &str) -> Result<()> {
        component.ensure_pin(name, PinDirection::In, PinValue::Bit(false))?;
        Ok(())
    }

    fn refresh(&mut self, component: &SignalComponent) {
        match component.value(&self.name) {
            Ok(PinValue::Bit(lit)) => self.lit = lit,
            Ok(other) => {
                tracing::warn!(widget = %self.name, value = %other, "unexpected lamp pin type")
            }
            Err(e) => tracing::warn!(widget = %self.name, error = %e, "lamp refresh failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_pulls_pin_state() {
        let component = Arc::new(SignalComponent::new("panel"));
        let mut lamp = StatusLamp::new("power_lamp");
        lamp.bind(&component, "power_lamp").unwrap();
        assert!(!lamp.is_lit());

        component.set_value("power_lamp", PinValue::Bit(true)).unwrap();
        assert!(!lamp.is_lit());

        lamp.refresh(&component);
        assert!(lamp.is_lit());
    }
}
