//! # VCPanel
//!
//! A virtual CNC operator panel: binds UI widgets to named control-system
//! signal endpoints, relays operator events (jogging, rate changes, program
//! control) into motion commands, and surfaces machine state and error
//! notifications.
//!
//! ## Architecture
//!
//! VCPanel is organized as a workspace with multiple crates:
//!
//! 1. **vcpanel-core** - Signal endpoints, status channel, control seams
//! 2. **vcpanel-settings** - Configuration and operator preferences
//! 3. **vcpanel-ui** - Widget model, pin binder, event handler
//! 4. **vcpanel** - Main binary composing the services and event loop
//!
//! The real-time motion control lives in an external daemon; this
//! workspace ships simulated implementations of its seams so the panel
//! runs and tests headless.

pub use vcpanel_core::{
    Axis, ChannelFault, ControlError, ControllerSnapshot, Error, ErrorChannel, InterpState,
    JogDirection, MachineControl, MachineMessage, MessageCategory, MessageKind, OverlayColor,
    PinDirection, PinError, PinValue, QueueErrorChannel, Result, SignalComponent, SimCommand,
    SimControl, StatusChannel, StatusEvent, StatusFilter, StatusKind, SubscriptionId, TaskMode,
};

pub use vcpanel_settings::{Config, PathsConfig, Preferences, SettingsError};

pub use vcpanel_ui::{
    get_handlers, shared, shared_window, ActionQueue, CloseResponse, ConfirmDialog, Frame,
    HandlerServices, KeyAction, KeyChord, KeyCode, KeyEvent, Keymap, LoadingOverlay, MdiEntry,
    Notifier, NotifyCategory, PanelBinder, PanelHandler, PanelWindow, PresetDialog, PropertyError,
    PropertyValue, PushButton, SharedWidget, SharedWindow, Slider, StatusBar, StatusBarNotifier,
    StatusLamp, UiAction, Widget, WidgetRegistry,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("VCPANEL_BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with console output, pretty formatting, and
/// `RUST_LOG` environment variable support.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
