// On Windows, hide the console window for GUI applications
#![cfg_attr(
    all(target_os = "windows", not(debug_assertions)),
    windows_subsystem = "windows"
)]

mod panel;

use std::sync::Arc;
use std::time::Duration;

use vcpanel::init_logging;
use vcpanel_core::{
    MachineControl, MachineMessage, MessageKind, PinValue, QueueErrorChannel, SignalComponent,
    SimControl, StatusChannel, StatusEvent, StatusFilter, StatusKind,
};
use vcpanel_settings::Config;
use vcpanel_ui::{
    get_handlers, shared_window, ActionQueue, CloseResponse, HandlerServices, KeyCode, KeyEvent,
    Keymap, PanelBinder, PanelHandler, PresetDialog, SharedWindow, SpecialInit, StatusBarNotifier,
    UiAction, Widget,
};

fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!(
        version = vcpanel::VERSION,
        built = vcpanel::BUILD_DATE,
        "starting vcpanel"
    );

    let config = Config::load_or_default();
    let queue = ActionQueue::new();
    let window = panel::build_reference_panel(&queue);

    let component = Arc::new(SignalComponent::new("vcpanel"));
    let binder = PanelBinder::bind(&window, component.clone())?;
    let window = shared_window(window);

    let status = Arc::new(StatusChannel::new());
    let sim = SimControl::new();
    let errors = QueueErrorChannel::new();
    let dialog = Arc::new(PresetDialog::new(true));
    // The scripted session declines the first shutdown question
    dialog.push_answer(false);

    let mut handlers = get_handlers(HandlerServices {
        component: component.clone(),
        registry: binder.registry().clone(),
        window: window.clone(),
        status: status.clone(),
        control: Arc::new(sim.clone()),
        errors: Box::new(errors.clone()),
        notifier: Arc::new(StatusBarNotifier::new()),
        dialog,
        keymap: Keymap::with_defaults(),
        config,
    });
    let mut handler = handlers
        .pop()
        .ok_or_else(|| anyhow::anyhow!("panel loader produced no handler"))?;

    connect_overlay(&status, &window);
    handler.widgets_ready();
    component.set_ready();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(event_loop(
        binder,
        window,
        status,
        sim,
        errors,
        queue,
        &mut handler,
    ))
}

/// Keep the loading overlay in sync with focus overlay events
fn connect_overlay(status: &StatusChannel, window: &SharedWindow) {
    if let Some(overlay) = window.read().find("overlay") {
        status.subscribe(
            StatusFilter::Kinds(vec![StatusKind::FocusOverlayChanged]),
            move |event| {
                if let StatusEvent::FocusOverlayChanged {
                    active, message, ..
                } = event
                {
                    if let Some(special) = overlay.write().as_special() {
                        special.set_active(*active, message.as_deref());
                    }
                }
            },
        );
    }
}

/// Cooperative event loop: periodic tick, widget refresh, action routing
async fn event_loop(
    binder: PanelBinder,
    window: SharedWindow,
    status: Arc<StatusChannel>,
    sim: SimControl,
    errors: QueueErrorChannel,
    queue: ActionQueue,
    handler: &mut PanelHandler,
) -> anyhow::Result<()> {
    let mut tick = tokio::time::interval(Duration::from_millis(100));
    let mut cycle: u32 = 0;
    loop {
        tick.tick().await;
        cycle += 1;

        status.emit(&StatusEvent::Periodic);
        binder.update();
        mirror_machine_state(&sim, binder.component().as_ref());
        handler.process_status_events();
        drive_demo_session(cycle, handler, &errors, &window);

        for (widget, action) in queue.drain() {
            if action == UiAction::CloseRequested {
                match handler.close_requested() {
                    CloseResponse::Accept => {
                        tracing::info!("operator confirmed shutdown");
                        return Ok(());
                    }
                    CloseResponse::Ignore => tracing::info!("shutdown cancelled by operator"),
                }
            } else {
                handler.on_ui_event(&widget, &action);
            }
        }
    }
}

/// Mirror the simulated machine state onto the panel's input pins
fn mirror_machine_state(sim: &SimControl, component: &SignalComponent) {
    let snapshot = sim.snapshot();
    for (pin, value) in [
        ("power_lamp", snapshot.machine_on),
        ("estop_lamp", snapshot.estop),
    ] {
        if let Err(e) = component.set_value(pin, PinValue::Bit(value)) {
            tracing::debug!(pin, error = %e, "machine state mirror skipped");
        }
    }
}

/// Scripted operator session exercising each panel path once
fn drive_demo_session(
    cycle: u32,
    handler: &mut PanelHandler,
    errors: &QueueErrorChannel,
    window: &SharedWindow,
) {
    match cycle {
        2 => {
            handler.key_event(&KeyEvent::press(KeyCode::F2, None));
            handler.key_event(&KeyEvent::release(KeyCode::F2, None));
        }
        4 => {
            handler.key_event(&KeyEvent::press(KeyCode::Right, None));
        }
        6 => {
            handler.key_event(&KeyEvent::release(KeyCode::Right, None));
        }
        7 => {
            window.write().set_focus(Some("mdi_entry"));
            for c in "g0 x0".chars() {
                handler.key_event(&KeyEvent::press(KeyCode::Char(c), Some("mdi_entry")));
            }
            handler.key_event(&KeyEvent::press(KeyCode::Return, Some("mdi_entry")));
            window.write().set_focus(None);
        }
        8 => {
            errors.push(MachineMessage::new(
                MessageKind::OperatorText,
                "tool change complete",
            ));
        }
        10 => {
            handler.on_ui_event("button_load", &UiAction::FileSelected("demo/part.ngc".into()));
            handler.on_ui_event("button_run", &UiAction::Clicked);
        }
        12 => handler.on_ui_event("button_pause", &UiAction::Clicked),
        14 => handler.on_ui_event("button_pause", &UiAction::Clicked),
        16 => handler.on_ui_event("button_stop", &UiAction::Clicked),
        18 => window.read().request_close(),
        20 => window.read().request_close(),
        _ => {}
    }
}
