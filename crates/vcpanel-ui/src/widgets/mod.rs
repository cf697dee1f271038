//! Concrete widget implementations.
//!
//! The set mirrors the reference operator skin: momentary buttons, value
//! sliders, indicator lamps, a status bar, an MDI text entry, container
//! frames, the loading overlay, and the panel window root.

pub mod button;
pub mod entry;
pub mod frame;
pub mod lamp;
pub mod overlay;
pub mod slider;
pub mod statusbar;
pub mod window;

pub use button::PushButton;
pub use entry::MdiEntry;
pub use frame::Frame;
pub use lamp::StatusLamp;
pub use overlay::LoadingOverlay;
pub use slider::Slider;
pub use statusbar::StatusBar;
pub use window::{shared_window, PanelWindow, SharedWindow};
