//! End-to-end tests for the operator event handler: binding, key routing,
//! command forwarding, shutdown arbitration, and error-channel handling.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::time::Duration;

use vcpanel_core::{
    MachineControl, MachineMessage, MessageKind, PinValue, QueueErrorChannel, SignalComponent,
    SimCommand, SimControl, StatusChannel, StatusEvent, StatusFilter, StatusKind,
};
use vcpanel_settings::Config;
use vcpanel_ui::{
    get_handlers, shared, ActionQueue, CloseResponse, Frame, HandlerServices, KeyCode, KeyEvent,
    Keymap, MdiEntry, Notifier, NotifyCategory, PanelBinder, PanelHandler, PanelWindow,
    PresetDialog, PropertyError, PropertyValue, PushButton, SharedWindow, Slider, StatusBar,
    StatusLamp, TextEntry, UiAction, Widget,
};

/// Notifier recording every call for assertions
#[derive(Default)]
struct RecordingNotifier {
    calls: Mutex<Vec<(NotifyCategory, String, String)>>,
}

impl RecordingNotifier {
    fn calls(&self) -> Vec<(NotifyCategory, String, String)> {
        self.calls.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, category: NotifyCategory, summary: &str, body: &str, _timeout: Duration) {
        self.calls
            .lock()
            .push((category, summary.to_string(), body.to_string()));
    }
}

struct Fixture {
    queue: ActionQueue,
    window: SharedWindow,
    component: Arc<SignalComponent>,
    status: Arc<StatusChannel>,
    sim: SimControl,
    errors: QueueErrorChannel,
    notifier: Arc<RecordingNotifier>,
    dialog: Arc<PresetDialog>,
    handler: PanelHandler,
}

impl Fixture {
    fn new(config: Config) -> Self {
        let queue = ActionQueue::new();
        let mut window = PanelWindow::new("MainWindow", 800, 600, &queue);
        for name in [
            "jog_pos_x",
            "jog_neg_x",
            "jog_pos_y",
            "jog_neg_y",
            "jog_pos_z",
            "jog_neg_z",
            "button_estop",
            "button_machineon",
            "button_home",
            "button_run",
            "button_stop",
            "button_pause",
            "zero_x",
            "zero_y",
            "zero_z",
        ] {
            window.add_widget(shared(PushButton::new(name, name, &queue)));
        }
        window.add_widget(shared(Slider::new("jog_slider", 0.0, 100.0, &queue)));
        window.add_widget(shared(Slider::new("feed_slider", 0.0, 120.0, &queue)));
        window.add_widget(shared(Slider::new("rapid_slider", 0.0, 100.0, &queue)));
        window.add_widget(shared(MdiEntry::new("mdi_entry", &queue)));
        window.add_widget(shared(StatusBar::new("statusbar")));
        let mut frame = Frame::new("frame");
        frame.add_child(shared(StatusLamp::new("power_lamp")));
        window.add_widget(shared(frame));
        window.add_widget(shared(Frame::new("frame_2")));

        let component = Arc::new(SignalComponent::new("panel"));
        let binder = PanelBinder::bind(&window, component.clone()).expect("binding succeeds");

        let window: SharedWindow = Arc::new(RwLock::new(window));
        let status = Arc::new(StatusChannel::new());
        let sim = SimControl::new();
        let errors = QueueErrorChannel::new();
        let notifier = Arc::new(RecordingNotifier::default());
        let dialog = Arc::new(PresetDialog::new(true));

        let mut handlers = get_handlers(HandlerServices {
            component: component.clone(),
            registry: binder.registry().clone(),
            window: window.clone(),
            status: status.clone(),
            control: Arc::new(sim.clone()),
            errors: Box::new(errors.clone()),
            notifier: notifier.clone(),
            dialog: dialog.clone(),
            keymap: Keymap::with_defaults(),
            config,
        });
        assert_eq!(handlers.len(), 1, "loader contract: exactly one handler");
        let handler = handlers.pop().unwrap();

        Self {
            queue,
            window,
            component,
            status,
            sim,
            errors,
            notifier,
            dialog,
            handler,
        }
    }

    /// Drain widget actions into the handler, as the event loop does
    fn pump_actions(&mut self) {
        for (widget, action) in self.queue.drain() {
            self.handler.on_ui_event(&widget, &action);
        }
    }

    /// Emit a periodic tick and let the handler process it
    fn tick(&mut self) {
        self.status.emit(&StatusEvent::Periodic);
        self.handler.process_status_events();
    }
}

#[test]
fn test_ordinary_key_goes_to_focused_entry() {
    let mut fx = Fixture::new(Config::default());
    fx.window.write().set_focus(Some("mdi_entry"));

    let consumed = fx
        .handler
        .key_event(&KeyEvent::press(KeyCode::Char('g'), Some("mdi_entry")));
    assert!(consumed);

    let entry = fx.window.read().find("mdi_entry").unwrap();
    assert_eq!(entry.write().as_text_entry().unwrap().text(), "g");

    // The key never reached the keymap: no commands were issued
    assert!(fx.sim.journal().is_empty());
}

#[test]
fn test_arrow_key_while_entry_focused_is_consumed_without_jog() {
    let mut fx = Fixture::new(Config::default());
    fx.window.write().set_focus(Some("mdi_entry"));

    // Right is bound to X+ jog, but the focused entry swallows it
    let consumed = fx
        .handler
        .key_event(&KeyEvent::press(KeyCode::Right, Some("mdi_entry")));
    assert!(consumed);
    fx.pump_actions();
    assert_eq!(fx.sim.jog_state(), [0, 0, 0]);
}

#[test]
fn test_escape_bypasses_focused_entry() {
    let mut fx = Fixture::new(Config::default());
    fx.window.write().set_focus(Some("mdi_entry"));

    // Idle interpreter: Escape maps to Abort which asks the window to close
    let consumed = fx
        .handler
        .key_event(&KeyEvent::press(KeyCode::Escape, Some("mdi_entry")));
    assert!(consumed);

    let drained = fx.queue.drain();
    assert!(drained.contains(&("MainWindow".to_string(), UiAction::CloseRequested)));

    // The entry never saw the key
    let entry = fx.window.read().find("mdi_entry").unwrap();
    assert_eq!(entry.write().as_text_entry().unwrap().text(), "");
}

#[test]
fn test_f1_bypasses_focused_entry_and_clicks_estop() {
    let mut fx = Fixture::new(Config::default());
    fx.window.write().set_focus(Some("mdi_entry"));

    let consumed = fx
        .handler
        .key_event(&KeyEvent::press(KeyCode::F1, Some("mdi_entry")));
    assert!(consumed);

    let drained = fx.queue.drain();
    assert!(drained.contains(&("button_estop".to_string(), UiAction::Clicked)));
}

#[test]
fn test_unbound_key_is_unconsumed() {
    let mut fx = Fixture::new(Config::default());
    let consumed = fx
        .handler
        .key_event(&KeyEvent::press(KeyCode::Char('q'), None));
    assert!(!consumed);
}

#[test]
fn test_jog_key_press_and_hold() {
    let mut fx = Fixture::new(Config::default());

    // Key press simulates the jog button going down
    fx.handler.key_event(&KeyEvent::press(KeyCode::Right, None));
    fx.pump_actions();
    assert_eq!(fx.sim.jog_state(), [1, 0, 0]);

    // Key release stops the jog
    fx.handler
        .key_event(&KeyEvent::release(KeyCode::Right, None));
    fx.pump_actions();
    assert_eq!(fx.sim.jog_state(), [0, 0, 0]);

    let jogs: Vec<SimCommand> = fx
        .sim
        .journal()
        .into_iter()
        .filter(|c| matches!(c, SimCommand::Jog { .. }))
        .collect();
    assert_eq!(
        jogs,
        vec![
            SimCommand::Jog {
                axis: vcpanel_core::Axis::X,
                direction: 1
            },
            SimCommand::Jog {
                axis: vcpanel_core::Axis::X,
                direction: 0
            },
        ]
    );
}

#[test]
fn test_rate_conversion_percent_to_fraction() {
    let mut fx = Fixture::new(Config::default());

    fx.handler
        .on_ui_event("feed_slider", &UiAction::ValueChanged(100.0));
    fx.handler
        .on_ui_event("feed_slider", &UiAction::ValueChanged(50.0));
    fx.handler
        .on_ui_event("rapid_slider", &UiAction::ValueChanged(50.0));

    let journal = fx.sim.journal();
    assert!(journal.contains(&SimCommand::FeedOverride(1.0)));
    assert!(journal.contains(&SimCommand::FeedOverride(0.5)));
    assert!(journal.contains(&SimCommand::RapidOverride(0.5)));
    assert_eq!(fx.sim.feed_scale(), 0.5);
    assert_eq!(fx.sim.rapid_scale(), 0.5);
}

#[test]
fn test_jograte_change_round_trips_through_status_channel() {
    let mut fx = Fixture::new(Config::default());
    assert_eq!(fx.handler.jog_rate(), 10.0);

    fx.handler
        .on_ui_event("jog_slider", &UiAction::ValueChanged(35.0));
    fx.handler.process_status_events();
    assert_eq!(fx.handler.jog_rate(), 35.0);
}

#[test]
fn test_program_cycle_commands() {
    let mut fx = Fixture::new(Config::default());

    fx.handler.on_ui_event(
        "button_load",
        &UiAction::FileSelected("part.ngc".into()),
    );
    fx.handler.on_ui_event("button_run", &UiAction::Clicked);
    assert!(fx.sim.journal().contains(&SimCommand::AutoRun(0)));

    fx.handler.on_ui_event("button_pause", &UiAction::Clicked);
    assert!(fx.sim.snapshot().paused);
    fx.handler.on_ui_event("button_pause", &UiAction::Clicked);
    assert!(!fx.sim.snapshot().paused);

    fx.handler.on_ui_event("button_stop", &UiAction::Clicked);
    assert!(fx.sim.journal().contains(&SimCommand::Abort));
}

#[test]
fn test_zero_axis_buttons() {
    let mut fx = Fixture::new(Config::default());
    fx.handler.on_ui_event("zero_y", &UiAction::Clicked);
    assert!(fx.sim.journal().contains(&SimCommand::SetAxisOrigin {
        axis: vcpanel_core::Axis::Y,
        offset: 0.0
    }));
}

#[test]
fn test_escape_aborts_when_program_running() {
    let mut fx = Fixture::new(Config::default());
    fx.handler.on_ui_event(
        "button_load",
        &UiAction::FileSelected("part.ngc".into()),
    );
    fx.handler.on_ui_event("button_run", &UiAction::Clicked);

    fx.handler.key_event(&KeyEvent::press(KeyCode::Escape, None));

    assert!(fx.sim.journal().contains(&SimCommand::Abort));
    assert!(!fx
        .queue
        .drain()
        .contains(&("MainWindow".to_string(), UiAction::CloseRequested)));
}

#[test]
fn test_shutdown_disabled_accepts_without_dialog() {
    let mut config = Config::default();
    config.prefs.shutdown_check = false;
    let mut fx = Fixture::new(config);

    assert_eq!(fx.handler.close_requested(), CloseResponse::Accept);
    assert_eq!(fx.dialog.shown_count(), 0);
}

#[test]
fn test_shutdown_declined_reverts_overlay() {
    let mut fx = Fixture::new(Config::default());
    fx.dialog.push_answer(false);

    let overlay_events = Arc::new(Mutex::new(Vec::new()));
    let sink = overlay_events.clone();
    fx.status.subscribe(
        StatusFilter::Kinds(vec![StatusKind::FocusOverlayChanged]),
        move |event| {
            if let StatusEvent::FocusOverlayChanged { active, .. } = event {
                sink.lock().push(*active);
            }
        },
    );

    assert_eq!(fx.handler.close_requested(), CloseResponse::Ignore);
    assert_eq!(fx.dialog.shown_count(), 1);
    assert_eq!(overlay_events.lock().clone(), vec![true, false]);
}

#[test]
fn test_shutdown_confirmed_accepts() {
    let mut fx = Fixture::new(Config::default());
    fx.dialog.push_answer(true);
    assert_eq!(fx.handler.close_requested(), CloseResponse::Accept);
    assert_eq!(fx.dialog.shown_count(), 1);
}

#[test]
fn test_operator_error_produces_one_error_notification() {
    let mut fx = Fixture::new(Config::default());
    fx.errors
        .push(MachineMessage::new(MessageKind::OperatorError, "msg"));

    fx.tick();

    let calls = fx.notifier.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, NotifyCategory::Error);
    assert_eq!(calls[0].1, "msg");

    // Nothing pending on the next tick
    fx.tick();
    assert_eq!(fx.notifier.calls().len(), 1);
}

#[test]
fn test_display_message_category() {
    let mut fx = Fixture::new(Config::default());
    fx.errors
        .push(MachineMessage::new(MessageKind::OperatorDisplay, "G54 X0"));
    fx.tick();

    let calls = fx.notifier.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, NotifyCategory::Display);
}

#[test]
fn test_notifications_disabled_suppresses_error_popups() {
    let mut config = Config::default();
    config.prefs.desktop_notify = false;
    let mut fx = Fixture::new(config);

    fx.errors
        .push(MachineMessage::new(MessageKind::Error, "following error"));
    fx.tick();
    assert!(fx.notifier.calls().is_empty());
}

#[test]
fn test_channel_fault_is_survivable_and_silent() {
    let mut fx = Fixture::new(Config::default());
    fx.errors.inject_fault("daemon restarted");

    fx.tick();
    assert!(fx.notifier.calls().is_empty());

    // The channel works again afterwards
    fx.errors
        .push(MachineMessage::new(MessageKind::OperatorError, "back"));
    fx.tick();
    assert_eq!(fx.notifier.calls().len(), 1);
}

#[test]
fn test_widgets_ready_seeds_sliders_and_styles() {
    let mut fx = Fixture::new(Config::default());
    fx.handler.widgets_ready();

    // Slider pins carry the seeded values
    assert_eq!(
        fx.component.value("jog_slider").unwrap(),
        PinValue::Float(10.0)
    );
    assert_eq!(
        fx.component.value("feed_slider").unwrap(),
        PinValue::Float(100.0)
    );
    assert_eq!(
        fx.component.value("rapid_slider").unwrap(),
        PinValue::Float(100.0)
    );

    // Background styling applied from the configured image directory
    let window = fx.window.read();
    assert!(window.style().unwrap().contains("panel_bg_black.png"));
    let frame = window.find("frame").unwrap();
    assert!(frame.read().style().unwrap().contains("frame_bg_blue.png"));
    drop(window);

    // One welcome notification
    let calls = fx.notifier.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, NotifyCategory::Info);
    assert_eq!(calls[0].1, "Welcome");
}

#[test]
fn test_property_table() {
    let mut fx = Fixture::new(Config::default());

    assert_eq!(
        fx.handler.property("jog_rate"),
        Ok(PropertyValue::Float(10.0))
    );
    assert_eq!(
        fx.handler.property("desktop_notify"),
        Ok(PropertyValue::Bool(true))
    );

    fx.handler
        .set_property("shutdown_check", PropertyValue::Bool(false))
        .unwrap();
    assert_eq!(
        fx.handler.property("shutdown_check"),
        Ok(PropertyValue::Bool(false))
    );

    assert!(matches!(
        fx.handler.property("spindle_rpm"),
        Err(PropertyError::UnknownProperty { .. })
    ));
    assert!(matches!(
        fx.handler
            .set_property("jog_rate", PropertyValue::Bool(true)),
        Err(PropertyError::WrongType { .. })
    ));
}
