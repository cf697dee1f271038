//! Error handling for VCPanel
//!
//! Provides error types for the panel's startup and runtime seams:
//! - Pin errors (endpoint creation and access)
//! - Control errors (commands rejected by the motion controller)
//! - Channel faults (error-channel polling)
//!
//! All error types use `thiserror` for ergonomic error handling.
//! Startup faults (binding) are fail-fast and propagate with `?`; runtime
//! faults at event-loop seams are logged and never fatal.

use thiserror::Error;

/// Signal endpoint error type
///
/// Represents faults while creating or accessing named pins on a
/// [`SignalComponent`](crate::pin::SignalComponent).
#[derive(Error, Debug, Clone)]
pub enum PinError {
    /// A pin with this name already exists on the component
    #[error("Pin '{name}' already exists")]
    DuplicatePin {
        /// The colliding pin name.
        name: String,
    },

    /// No pin with this name exists on the component
    #[error("Unknown pin '{name}'")]
    UnknownPin {
        /// The requested pin name.
        name: String,
    },

    /// A value of the wrong type was written to a pin
    #[error("Type mismatch on pin '{name}': expected {expected}, got {got}")]
    TypeMismatch {
        /// The pin name.
        name: String,
        /// The pin's declared value type.
        expected: String,
        /// The type of the rejected value.
        got: String,
    },

    /// Pin creation was attempted after the component was marked ready
    #[error("Component '{component}' is ready; pin table is frozen")]
    ComponentReady {
        /// The component name.
        component: String,
    },
}

/// Control command error type
///
/// Represents commands the external motion controller refuses to carry
/// out in its current state.
#[derive(Error, Debug, Clone)]
pub enum ControlError {
    /// Machine is in emergency stop
    #[error("Machine is in emergency stop")]
    EstopActive,

    /// Machine power is off
    #[error("Machine is not powered on")]
    MachineOff,

    /// No program is loaded
    #[error("No program loaded")]
    NoProgram,

    /// An override scale outside the accepted range was requested
    #[error("Invalid override scale {value}")]
    InvalidOverride {
        /// The rejected scale value.
        value: f64,
    },

    /// Command was rejected by the controller
    #[error("Command rejected: {reason}")]
    CommandRejected {
        /// The reason the command was rejected.
        reason: String,
    },
}

/// Main error type for VCPanel
///
/// A unified error type that can represent any error from the core seams.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Pin error
    #[error(transparent)]
    Pin(#[from] PinError),

    /// Control error
    #[error(transparent)]
    Control(#[from] ControlError),

    /// Error-channel fault
    #[error(transparent)]
    Channel(#[from] crate::message::ChannelFault),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a pin error
    pub fn is_pin_error(&self) -> bool {
        matches!(self, Error::Pin(_))
    }

    /// Check if this is a control error
    pub fn is_control_error(&self) -> bool {
        matches!(self, Error::Control(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_error_display() {
        let err = PinError::DuplicatePin {
            name: "jog_slider".to_string(),
        };
        assert_eq!(err.to_string(), "Pin 'jog_slider' already exists");

        let err = PinError::TypeMismatch {
            name: "estop_lamp".to_string(),
            expected: "bit".to_string(),
            got: "float".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Type mismatch on pin 'estop_lamp': expected bit, got float"
        );
    }

    #[test]
    fn test_error_conversion() {
        let pin_err = PinError::UnknownPin {
            name: "missing".to_string(),
        };
        let err: Error = pin_err.into();
        assert!(err.is_pin_error());

        let ctl_err = ControlError::EstopActive;
        let err: Error = ctl_err.into();
        assert!(err.is_control_error());
    }
}
