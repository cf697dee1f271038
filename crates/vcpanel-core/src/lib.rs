//! # VCPanel Core
//!
//! Core types and seams for the VCPanel operator panel.
//! Provides the signal endpoint (pin) model, the machine status channel,
//! and the trait seams to the external motion controller and its error
//! channel, with simulated implementations for headless use.

pub mod control;
pub mod error;
pub mod message;
pub mod pin;
pub mod status;

pub use control::{
    Axis, ControllerSnapshot, InterpState, JogDirection, MachineControl, SimCommand, SimControl,
    TaskMode,
};

pub use error::{ControlError, Error, PinError, Result};

pub use message::{
    ChannelFault, ErrorChannel, MachineMessage, MessageCategory, MessageKind, QueueErrorChannel,
};

pub use pin::{PinDirection, PinValue, SignalComponent};

pub use status::{
    OverlayColor, StatusChannel, StatusEvent, StatusFilter, StatusKind, SubscriptionId,
};
