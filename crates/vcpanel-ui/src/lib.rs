//! # VCPanel UI
//!
//! Widget model, pin binder, and operator event handler for VCPanel.
//! Widgets expose capabilities through trait accessors; the binder walks
//! the window tree once and wires every capable widget to a named signal
//! endpoint; the handler routes machine, key, and widget events into
//! commands and notifications.

pub mod action;
pub mod binder;
pub mod dialog;
pub mod handler;
pub mod keymap;
pub mod notify;
pub mod registry;
pub mod widget;
pub mod widgets;

pub use action::{ActionQueue, UiAction};
pub use binder::PanelBinder;
pub use dialog::{ConfirmDialog, PresetDialog};
pub use handler::{
    get_handlers, CloseResponse, HandlerServices, PanelHandler, PropertyError, PropertyValue,
};
pub use keymap::{KeyAction, KeyChord, KeyCode, KeyEvent, Keymap};
pub use notify::{Notifier, NotifyCategory, StatusBarNotifier};
pub use registry::WidgetRegistry;
pub use widget::{
    shared, Pressable, SharedWidget, SignalBindable, SpecialInit, StatusSink, TextEntry,
    ValueWidget, Widget, WindowInfo,
};
pub use widgets::{
    shared_window, Frame, LoadingOverlay, MdiEntry, PanelWindow, PushButton, SharedWindow, Slider,
    StatusBar, StatusLamp,
};
