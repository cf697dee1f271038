//! Reference panel layout.
//!
//! Builds the widget tree of the default operator screen: machine state
//! buttons, jog cluster, override sliders, program controls, MDI entry,
//! indicator lamps, status bar, and the loading overlay.

use vcpanel_ui::{
    shared, ActionQueue, Frame, LoadingOverlay, MdiEntry, PanelWindow, PushButton, Slider,
    StatusBar, StatusLamp,
};

/// Build the reference operator panel
pub fn build_reference_panel(queue: &ActionQueue) -> PanelWindow {
    let mut window = PanelWindow::new("MainWindow", 1024, 600, queue);

    // Machine state controls
    window.add_widget(shared(PushButton::new("button_estop", "E-Stop", queue)));
    window.add_widget(shared(PushButton::new(
        "button_machineon",
        "Machine On",
        queue,
    )));
    window.add_widget(shared(PushButton::new("button_home", "Home All", queue)));

    // Jog cluster
    for (name, label) in [
        ("jog_pos_x", "X+"),
        ("jog_neg_x", "X-"),
        ("jog_pos_y", "Y+"),
        ("jog_neg_y", "Y-"),
        ("jog_pos_z", "Z+"),
        ("jog_neg_z", "Z-"),
    ] {
        window.add_widget(shared(PushButton::new(name, label, queue)));
    }

    // Override sliders
    window.add_widget(shared(Slider::new("jog_slider", 0.0, 100.0, queue)));
    window.add_widget(shared(Slider::new("feed_slider", 0.0, 120.0, queue)));
    window.add_widget(shared(Slider::new("rapid_slider", 0.0, 100.0, queue)));

    // Program controls
    window.add_widget(shared(PushButton::new("button_load", "Load", queue)));
    window.add_widget(shared(PushButton::new("button_run", "Run", queue)));
    window.add_widget(shared(PushButton::new("button_stop", "Stop", queue)));
    window.add_widget(shared(PushButton::new("button_pause", "Pause", queue)));

    // Indicator lamps live in the styled state frame
    let mut frame = Frame::new("frame");
    frame.add_child(shared(StatusLamp::new("power_lamp")));
    frame.add_child(shared(StatusLamp::new("estop_lamp")));
    window.add_widget(shared(frame));

    // Axis zero buttons in the second frame
    let mut frame_2 = Frame::new("frame_2");
    for (name, label) in [("zero_x", "Zero X"), ("zero_y", "Zero Y"), ("zero_z", "Zero Z")] {
        frame_2.add_child(shared(PushButton::new(name, label, queue)));
    }
    window.add_widget(shared(frame_2));

    window.add_widget(shared(MdiEntry::new("mdi_entry", queue)));
    window.add_widget(shared(StatusBar::new("statusbar")));
    window.add_widget(shared(LoadingOverlay::new("overlay")));

    window
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcpanel_ui::Widget;

    #[test]
    fn test_reference_panel_names_are_unique() {
        let queue = ActionQueue::new();
        let window = build_reference_panel(&queue);

        let mut names = Vec::new();
        let mut stack = window.widgets().to_vec();
        while let Some(widget) = stack.pop() {
            let guard = widget.read();
            names.push(guard.name().to_string());
            stack.extend(guard.children());
        }

        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total, "widget names must be unique");
    }

    #[test]
    fn test_reference_panel_has_control_cluster() {
        let queue = ActionQueue::new();
        let window = build_reference_panel(&queue);
        for name in ["button_estop", "jog_pos_x", "feed_slider", "mdi_entry", "overlay"] {
            assert!(window.find(name).is_some(), "missing widget {name}");
        }
    }
}
