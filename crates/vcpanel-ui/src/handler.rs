//! Central operator event handler.
//!
//! The handler bridges three event sources into three sinks: machine
//! lifecycle events, key input, and widget actions come in; motion
//! commands, operator notifications, and session-state changes go out.
//! Every collaborator is injected at construction; the handler owns no
//! ambient globals.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use vcpanel_core::{
    Axis, ErrorChannel, InterpState, JogDirection, MachineControl, OverlayColor, SignalComponent,
    StatusChannel, StatusEvent, StatusFilter, StatusKind, SubscriptionId,
};
use vcpanel_settings::Config;

use crate::action::UiAction;
use crate::dialog::ConfirmDialog;
use crate::keymap::{KeyAction, KeyCode, KeyEvent, Keymap};
use crate::notify::{Notifier, NotifyCategory};
use crate::registry::WidgetRegistry;
use crate::widget::{Pressable, TextEntry, ValueWidget, Widget};
use crate::widgets::SharedWindow;

/// How long operator notifications stay up
const NOTIFY_TIMEOUT: Duration = Duration::from_secs(4);

/// Answer to a window close request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseResponse {
    /// Let the window close.
    Accept,
    /// Keep the window open.
    Ignore,
}

/// A value in the handler's property table
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Boolean property.
    Bool(bool),
    /// Numeric property.
    Float(f64),
    /// Text property.
    Text(String),
}

/// Errors from the handler's property table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    /// The key names no wireable handler field
    #[error("Unknown property '{key}'")]
    UnknownProperty {
        /// The rejected key.
        key: String,
    },

    /// The value type does not match the field
    #[error("Property '{key}' expects a {expected} value")]
    WrongType {
        /// The property key.
        key: String,
        /// The expected value type.
        expected: &'static str,
    },
}

/// Services injected into the handler at construction
pub struct HandlerServices {
    /// Signal component the widgets are bound to.
    pub component: Arc<SignalComponent>,
    /// Registry of bound widgets.
    pub registry: WidgetRegistry,
    /// The panel window root.
    pub window: SharedWindow,
    /// Machine status channel.
    pub status: Arc<StatusChannel>,
    /// Motion controller command seam.
    pub control: Arc<dyn MachineControl>,
    /// Machine error channel.
    pub errors: Box<dyn ErrorChannel>,
    /// Notification service.
    pub notifier: Arc<dyn Notifier>,
    /// Blocking confirmation dialog.
    pub dialog: Arc<dyn ConfirmDialog>,
    /// Key binding table.
    pub keymap: Keymap,
    /// Panel configuration.
    pub config: Config,
}

/// Central event router for the operator panel
pub struct PanelHandler {
    component: Arc<SignalComponent>,
    registry: WidgetRegistry,
    window: SharedWindow,
    status: Arc<StatusChannel>,
    control: Arc<dyn MachineControl>,
    errors: Box<dyn ErrorChannel>,
    notifier: Arc<dyn Notifier>,
    dialog: Arc<dyn ConfirmDialog>,
    keymap: Keymap,
    panel_dir: PathBuf,
    image_dir: PathBuf,
    jog_rate: f64,
    loaded_file: Option<PathBuf>,
    desktop_notify: bool,
    shutdown_check: bool,
    inbox: Arc<Mutex<VecDeque<StatusEvent>>>,
    subscription: Option<SubscriptionId>,
}

impl PanelHandler {
    /// Construct the handler and register it for machine lifecycle events
    pub fn new(services: HandlerServices) -> Self {
        let inbox: Arc<Mutex<VecDeque<StatusEvent>>> = Arc::new(Mutex::new(VecDeque::new()));
        let sub_inbox = inbox.clone();
        let subscription = services.status.subscribe(
            StatusFilter::Kinds(vec![
                StatusKind::Estop,
                StatusKind::MachineOn,
                StatusKind::MachineOff,
                StatusKind::JogRateChanged,
                StatusKind::Periodic,
            ]),
            move |event| {
                sub_inbox.lock().push_back(event.clone());
            },
        );

        let prefs = &services.config.prefs;
        Self {
            component: services.component,
            registry: services.registry,
            window: services.window,
            status: services.status,
            control: services.control,
            errors: services.errors,
            notifier: services.notifier,
            dialog: services.dialog,
            keymap: services.keymap,
            panel_dir: services.config.paths.panel_dir.clone(),
            image_dir: services.config.paths.image_dir.clone(),
            jog_rate: prefs.jog_rate,
            loaded_file: None,
            desktop_notify: prefs.desktop_notify,
            shutdown_check: prefs.shutdown_check,
            inbox,
            subscription: Some(subscription),
        }
    }

    /// Post-widget-ready hook
    ///
    /// Called once the widgets are bound but before the component is
    /// marked ready: hooks the status bar into the notifier, seeds the
    /// slider values, applies background styling, and greets the operator.
    pub fn widgets_ready(&mut self) {
        if self.component.is_ready() {
            tracing::warn!("component marked ready before widget setup");
        }
        let window = self.window.clone();
        if let Some(statusbar) = window.read().find("statusbar") {
            self.notifier.attach_sink(statusbar);
        }

        self.set_widget_value("jog_slider", self.jog_rate);
        self.set_widget_value("feed_slider", 100.0);
        self.set_widget_value("rapid_slider", 100.0);

        {
            let guard = window.read();
            for (frame, image) in [("frame", "frame_bg_blue.png"), ("frame_2", "frame_bg_grey.png")]
            {
                if let Some(widget) = guard.find(frame) {
                    widget.write().set_style(format!(
                        "border-image: url({})",
                        self.image_dir.join(image).display()
                    ));
                }
            }
        }
        window.write().set_style(format!(
            "background-image: url({})",
            self.image_dir.join("panel_bg_black.png").display()
        ));

        if self.desktop_notify {
            self.notifier.notify(
                NotifyCategory::Info,
                "Welcome",
                "Operator panel ready",
                NOTIFY_TIMEOUT,
            );
        }
    }

    /// Drain and dispatch queued machine lifecycle events
    pub fn process_status_events(&mut self) {
        while let Some(event) = {
            let mut inbox = self.inbox.lock();
            inbox.pop_front()
        } {
            self.on_status_event(&event);
        }
    }

    fn on_status_event(&mut self, event: &StatusEvent) {
        match event {
            StatusEvent::Estop => self.say_estop(),
            StatusEvent::MachineOn => tracing::info!("machine powered on"),
            StatusEvent::MachineOff => tracing::info!("machine powered off"),
            StatusEvent::JogRateChanged { rate } => self.jog_rate = *rate,
            StatusEvent::Periodic => self.on_periodic(),
            _ => {}
        }
    }

    fn say_estop(&self) {
        tracing::warn!("machine entered emergency stop");
    }

    /// Poll the error channel once and surface any pending message
    fn on_periodic(&mut self) {
        match self.errors.poll() {
            Ok(Some(message)) => {
                if self.desktop_notify {
                    let category = NotifyCategory::from(message.kind.category());
                    self.notifier
                        .notify(category, &message.text, "", NOTIFY_TIMEOUT);
                }
            }
            Ok(None) => {}
            Err(fault) => {
                tracing::warn!(error = %fault, "error channel poll failed");
            }
        }
    }

    /// Route a key event; returns whether the event was consumed
    ///
    /// While a text entry holds focus, ordinary keys go to its native key
    /// handler. Escape, F1 and F2 always fall through to keymap lookup.
    pub fn key_event(&mut self, event: &KeyEvent) -> bool {
        if !matches!(event.code, KeyCode::Escape | KeyCode::F1 | KeyCode::F2) {
            if let Some(receiver) = &event.receiver {
                let widget = self.window.read().find(receiver);
                if let Some(widget) = widget {
                    if let Some(entry) = widget.write().as_text_entry() {
                        if event.pressed {
                            entry.key_press(event.code);
                        }
                        return true;
                    }
                }
            }
        }

        match self.keymap.lookup(&event.chord()) {
            Some(action) => {
                self.dispatch_key_action(action, event.pressed);
                true
            }
            None => {
                tracing::error!(code = ?event.code, "no key binding for chord");
                false
            }
        }
    }

    fn dispatch_key_action(&mut self, action: KeyAction, pressed: bool) {
        match action {
            KeyAction::Abort => {
                if pressed {
                    if self.control.snapshot().interp_state == InterpState::Idle {
                        self.window.read().request_close();
                    } else if let Err(e) = self.control.abort() {
                        tracing::warn!(error = %e, "abort rejected");
                    }
                }
            }
            KeyAction::Estop => {
                if pressed {
                    self.click_widget("button_estop");
                }
            }
            KeyAction::Power => {
                if pressed {
                    self.click_widget("button_machineon");
                }
            }
            KeyAction::Home => {
                if pressed {
                    self.click_widget("button_home");
                }
            }
            KeyAction::Run => {
                if pressed {
                    self.run_program();
                }
            }
            KeyAction::Pause => {
                if pressed {
                    self.pause_resume();
                }
            }
            KeyAction::JogXPos => self.simulate_jog_button("jog_pos_x", pressed),
            KeyAction::JogXNeg => self.simulate_jog_button("jog_neg_x", pressed),
            KeyAction::JogYPos => self.simulate_jog_button("jog_pos_y", pressed),
            KeyAction::JogYNeg => self.simulate_jog_button("jog_neg_y", pressed),
            KeyAction::JogZPos => self.simulate_jog_button("jog_pos_z", pressed),
            KeyAction::JogZNeg => self.simulate_jog_button("jog_neg_z", pressed),
        }
    }

    /// Simulate a full click on a bound button
    fn click_widget(&self, name: &str) {
        match self.registry.get(name) {
            Some(widget) => {
                if let Some(pressable) = widget.write().as_pressable() {
                    pressable.click();
                }
            }
            None => tracing::warn!(widget = name, "no such widget to click"),
        }
    }

    /// Map a jog key transition onto the matching button's press/release
    fn simulate_jog_button(&self, name: &str, pressed: bool) {
        match self.registry.get(name) {
            Some(widget) => {
                if let Some(pressable) = widget.write().as_pressable() {
                    if pressed {
                        pressable.press();
                    } else {
                        pressable.release();
                    }
                }
            }
            None => tracing::warn!(widget = name, "no such jog widget"),
        }
    }

    /// Route an action emitted by a widget
    pub fn on_ui_event(&mut self, widget: &str, action: &UiAction) {
        if let Some((axis, direction)) = jog_target(widget) {
            match action {
                UiAction::Pressed => self.jog(axis, direction),
                UiAction::Released => self.jog(axis, JogDirection::Stop),
                _ => {}
            }
            return;
        }

        match (widget, action) {
            ("jog_slider", UiAction::ValueChanged(rate)) => self.change_jograte(*rate),
            ("feed_slider", UiAction::ValueChanged(rate)) => self.change_feedrate(*rate),
            ("rapid_slider", UiAction::ValueChanged(rate)) => self.change_rapidrate(*rate),
            ("button_run", UiAction::Clicked) => self.run_program(),
            ("button_stop", UiAction::Clicked) => self.stop_program(),
            ("button_pause", UiAction::Clicked) => self.pause_resume(),
            ("zero_x", UiAction::Clicked) => self.zero_axis(Axis::X),
            ("zero_y", UiAction::Clicked) => self.zero_axis(Axis::Y),
            ("zero_z", UiAction::Clicked) => self.zero_axis(Axis::Z),
            (_, UiAction::FileSelected(path)) => self.load_file(path.clone()),
            ("mdi_entry", UiAction::TextSubmitted(text)) => {
                tracing::debug!(command = %text, "mdi command submitted");
            }
            _ => tracing::trace!(widget, ?action, "unrouted ui action"),
        }
    }

    fn jog(&mut self, axis: Axis, direction: JogDirection) {
        if let Err(e) = self
            .control
            .ensure_mode(vcpanel_core::TaskMode::Manual)
            .and_then(|_| self.control.continuous_jog(axis, direction))
        {
            tracing::warn!(%axis, error = %e, "jog command rejected");
        }
    }

    /// Broadcast a new session jog rate
    fn change_jograte(&mut self, rate: f64) {
        self.status.emit(&StatusEvent::JogRateChanged { rate });
    }

    /// Forward a feed-rate percentage as the command API's fraction
    fn change_feedrate(&mut self, rate: f64) {
        if let Err(e) = self.control.feed_override(rate / 100.0) {
            tracing::warn!(rate, error = %e, "feed override rejected");
        }
    }

    /// Forward a rapid-rate percentage as the command API's fraction
    fn change_rapidrate(&mut self, rate: f64) {
        if let Err(e) = self.control.rapid_override(rate / 100.0) {
            tracing::warn!(rate, error = %e, "rapid override rejected");
        }
    }

    fn run_program(&mut self) {
        if let Err(e) = self
            .control
            .ensure_mode(vcpanel_core::TaskMode::Auto)
            .and_then(|_| self.control.auto_run(0))
        {
            tracing::warn!(error = %e, "program run rejected");
        }
    }

    fn stop_program(&mut self) {
        if let Err(e) = self
            .control
            .ensure_mode(vcpanel_core::TaskMode::Auto)
            .and_then(|_| self.control.abort())
        {
            tracing::warn!(error = %e, "program stop rejected");
        }
    }

    fn pause_resume(&mut self) {
        let paused = self.control.snapshot().paused;
        let result = if paused {
            self.control.auto_resume()
        } else {
            self.control.auto_pause()
        };
        if let Err(e) = result {
            tracing::warn!(paused, error = %e, "pause toggle rejected");
        }
    }

    fn zero_axis(&mut self, axis: Axis) {
        if let Err(e) = self.control.set_axis_origin(axis, 0.0) {
            tracing::warn!(%axis, error = %e, "axis zero rejected");
        }
    }

    fn load_file(&mut self, path: PathBuf) {
        match self.control.open_program(&path) {
            Ok(()) => {
                tracing::info!(file = %path.display(), "program loaded");
                self.loaded_file = Some(path);
            }
            Err(e) => tracing::warn!(file = %path.display(), error = %e, "program load failed"),
        }
    }

    /// Arbitrate a window close request
    ///
    /// With the shutdown-confirmation preference enabled, raises the focus
    /// overlay and blocks on a yes/no dialog; "no" keeps the window open
    /// and reverts the overlay.
    pub fn close_requested(&mut self) -> CloseResponse {
        if self.shutdown_check {
            self.status.emit(&StatusEvent::FocusOverlayChanged {
                active: true,
                message: Some("ARE YOU SURE!".to_string()),
                color: Some(OverlayColor {
                    r: 100,
                    g: 0,
                    b: 0,
                    a: 150,
                }),
            });
            let answer = self.dialog.confirm(
                "Do you want to shutdown now?",
                Some("You can set a preference to not see this message"),
            );
            if !answer {
                self.status.emit(&StatusEvent::FocusOverlayChanged {
                    active: false,
                    message: None,
                    color: None,
                });
                return CloseResponse::Ignore;
            }
        }
        CloseResponse::Accept
    }

    /// Read a wireable handler field by name
    pub fn property(&self, key: &str) -> Result<PropertyValue, PropertyError> {
        match key {
            "jog_rate" => Ok(PropertyValue::Float(self.jog_rate)),
            "desktop_notify" => Ok(PropertyValue::Bool(self.desktop_notify)),
            "shutdown_check" => Ok(PropertyValue::Bool(self.shutdown_check)),
            "loaded_file" => Ok(PropertyValue::Text(
                self.loaded_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            )),
            _ => Err(PropertyError::UnknownProperty {
                key: key.to_string(),
            }),
        }
    }

    /// Write a wireable handler field by name
    ///
    /// Used by the skin-loading mechanism for configuration-driven wiring.
    pub fn set_property(&mut self, key: &str, value: PropertyValue) -> Result<(), PropertyError> {
        match (key, value) {
            ("jog_rate", PropertyValue::Float(rate)) => self.jog_rate = rate,
            ("desktop_notify", PropertyValue::Bool(enabled)) => self.desktop_notify = enabled,
            ("shutdown_check", PropertyValue::Bool(enabled)) => self.shutdown_check = enabled,
            ("loaded_file", PropertyValue::Text(path)) => {
                self.loaded_file = if path.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(path))
                };
            }
            ("jog_rate", _) => {
                return Err(PropertyError::WrongType {
                    key: key.to_string(),
                    expected: "float",
                })
            }
            ("desktop_notify" | "shutdown_check", _) => {
                return Err(PropertyError::WrongType {
                    key: key.to_string(),
                    expected: "bool",
                })
            }
            ("loaded_file", _) => {
                return Err(PropertyError::WrongType {
                    key: key.to_string(),
                    expected: "text",
                })
            }
            _ => {
                return Err(PropertyError::UnknownProperty {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }

    /// The current session jog rate
    pub fn jog_rate(&self) -> f64 {
        self.jog_rate
    }

    /// Directory the panel definitions were loaded from
    pub fn panel_dir(&self) -> &std::path::Path {
        &self.panel_dir
    }

    fn set_widget_value(&self, name: &str, value: f64) {
        if let Some(widget) = self.registry.get(name) {
            if let Some(value_widget) = widget.write().as_value_widget() {
                value_widget.set_value(value);
            }
        }
    }
}

impl Drop for PanelHandler {
    fn drop(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.status.unsubscribe(id);
        }
    }
}

/// Hosting-loader entry point: build the panel's handlers
pub fn get_handlers(services: HandlerServices) -> Vec<PanelHandler> {
    vec![PanelHandler::new(services)]
}

fn jog_target(widget: &str) -> Option<(Axis, JogDirection)> {
    match widget {
        "jog_pos_x" => Some((Axis::X, JogDirection::Positive)),
        "jog_neg_x" => Some((Axis::X, JogDirection::Negative)),
        "jog_pos_y" => Some((Axis::Y, JogDirection::Positive)),
        "jog_neg_y" => Some((Axis::Y, JogDirection::Negative)),
        "jog_pos_z" => Some((Axis::Z, JogDirection::Positive)),
        "jog_neg_z" => Some((Axis::Z, JogDirection::Negative)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jog_target_mapping() {
        assert_eq!(jog_target("jog_pos_x"), Some((Axis::X, JogDirection::Positive)));
        assert_eq!(jog_target("jog_neg_z"), Some((Axis::Z, JogDirection::Negative)));
        assert_eq!(jog_target("feed_slider"), None);
    }
}
