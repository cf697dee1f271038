//! Signal endpoints and the external component wrapper.
//!
//! A [`SignalComponent`] is the panel's handle on the control system's I/O
//! space: a named table of typed pins created during widget binding and
//! frozen once the component is marked ready. Input pins carry machine
//! state toward the panel; output pins carry operator actions toward the
//! machine.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::PinError;

/// Direction of a signal endpoint, seen from the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinDirection {
    /// Machine state flowing into the panel, refreshed by the dispatcher.
    In,
    /// Operator actions flowing out to the machine, pushed on UI events.
    Out,
}

/// Typed value carried by a pin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PinValue {
    /// Boolean signal.
    Bit(bool),
    /// Floating-point signal.
    Float(f64),
    /// Signed 32-bit integer signal.
    S32(i32),
}

impl PinValue {
    /// Name of this value's type, used in mismatch errors
    pub fn type_name(&self) -> &'static str {
        match self {
            PinValue::Bit(_) => "bit",
            PinValue::Float(_) => "float",
            PinValue::S32(_) => "s32",
        }
    }

    /// Check whether another value carries the same type
    pub fn same_type(&self, other: &PinValue) -> bool {
        self.type_name() == other.type_name()
    }
}

impl std::fmt::Display for PinValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PinValue::Bit(v) => write!(f, "{}", v),
            PinValue::Float(v) => write!(f, "{:.4}", v),
            PinValue::S32(v) => write!(f, "{}", v),
        }
    }
}

/// A single named signal endpoint
#[derive(Debug, Clone)]
struct Pin {
    direction: PinDirection,
    value: PinValue,
}

/// External component wrapper owning the panel's signal endpoints
///
/// Pins are created by widget binding, keyed by the widget's declared
/// name. After [`set_ready`](SignalComponent::set_ready) the pin table is
/// frozen; further creation attempts are rejected.
pub struct SignalComponent {
    name: String,
    pins: RwLock<HashMap<String, Pin>>,
    ready: AtomicBool,
}

impl SignalComponent {
    /// Create a new, not-yet-ready component
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pins: RwLock::new(HashMap::new()),
            ready: AtomicBool::new(false),
        }
    }

    /// The component's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Create a named pin with an initial value
    ///
    /// Fails if a pin with this name already exists or if the component
    /// has been marked ready.
    pub fn make_pin(
        &self,
        name: impl Into<String>,
        direction: PinDirection,
        initial: PinValue,
    ) -> Result<(), PinError> {
        if self.is_ready() {
            return Err(PinError::ComponentReady {
                component: self.name.clone(),
            });
        }
        let name = name.into();
        let mut pins = self.pins.write();
        if pins.contains_key(&name) {
            return Err(PinError::DuplicatePin { name });
        }
        tracing::debug!(pin = %name, ?direction, "created signal endpoint");
        pins.insert(
            name,
            Pin {
                direction,
                value: initial,
            },
        );
        Ok(())
    }

    /// Create a named pin, or adopt an existing one of the same type
    ///
    /// Widgets bind through this entry point: when two widgets declare the
    /// same name, the later one shares the earlier one's endpoint instead
    /// of failing (last-write-wins at the registry level). A type conflict
    /// is still an error.
    pub fn ensure_pin(
        &self,
        name: &str,
        direction: PinDirection,
        initial: PinValue,
    ) -> Result<(), PinError> {
        if self.is_ready() {
            return Err(PinError::ComponentReady {
                component: self.name.clone(),
            });
        }
        let mut pins = self.pins.write();
        if let Some(existing) = pins.get(name) {
            if !existing.value.same_type(&initial) {
                return Err(PinError::TypeMismatch {
                    name: name.to_string(),
                    expected: existing.value.type_name().to_string(),
                    got: initial.type_name().to_string(),
                });
            }
            tracing::warn!(pin = %name, "endpoint already exists; adopting it");
            return Ok(());
        }
        tracing::debug!(pin = %name, ?direction, "created signal endpoint");
        pins.insert(
            name.to_string(),
            Pin {
                direction,
                value: initial,
            },
        );
        Ok(())
    }

    /// Mark the component ready; the pin table is frozen afterwards
    pub fn set_ready(&self) {
        self.ready.store(true, Ordering::Release);
        tracing::info!(component = %self.name, pins = self.pin_count(), "component ready");
    }

    /// Whether the component has been marked ready
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Read a pin's current value
    pub fn value(&self, name: &str) -> Result<PinValue, PinError> {
        self.pins
            .read()
            .get(name)
            .map(|p| p.value)
            .ok_or_else(|| PinError::UnknownPin {
                name: name.to_string(),
            })
    }

    /// Read a pin's direction
    pub fn direction(&self, name: &str) -> Result<PinDirection, PinError> {
        self.pins
            .read()
            .get(name)
            .map(|p| p.direction)
            .ok_or_else(|| PinError::UnknownPin {
                name: name.to_string(),
            })
    }

    /// Write a pin's value
    ///
    /// The value must carry the same type the pin was created with.
    pub fn set_value(&self, name: &str, value: PinValue) -> Result<(), PinError> {
        let mut pins = self.pins.write();
        let pin = pins.get_mut(name).ok_or_else(|| PinError::UnknownPin {
            name: name.to_string(),
        })?;
        if !pin.value.same_type(&value) {
            return Err(PinError::TypeMismatch {
                name: name.to_string(),
                expected: pin.value.type_name().to_string(),
                got: value.type_name().to_string(),
            });
        }
        pin.value = value;
        Ok(())
    }

    /// Number of pins on the component
    pub fn pin_count(&self) -> usize {
        self.pins.read().len()
    }

    /// Names of all pins, in no particular order
    pub fn pin_names(&self) -> Vec<String> {
        self.pins.read().keys().cloned().collect()
    }
}

impl std::fmt::Debug for SignalComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalComponent")
            .field("name", &self.name)
            .field("pins", &self.pin_count())
            .field("ready", &self.is_ready())
            .finish()
    }
}
