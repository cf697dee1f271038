//! Container frame.

use crate::widget::{SharedWidget, Widget};

/// A styleable container holding child widgets
pub struct Frame {
    name: String,
    style: Option<String>,
    children: Vec<SharedWidget>,
}

impl Frame {
    /// Create an empty frame
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            style: None,
            children: Vec::new(),
        }
    }

    /// Add a child widget
    pub fn add_child(&mut self, child: SharedWidget) {
        self.children.push(child);
    }
}

impl Widget for Frame {
    fn name(&self) -> &str {
        &self.name
    }

    fn children(&self) -> Vec<SharedWidget> {
        self.children.clone()
    }

    fn set_style(&mut self, style: String) {
        self.style = Some(style);
    }

    fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::shared;
    use crate::widgets::StatusLamp;

    #[test]
    fn test_frame_holds_children() {
        let mut frame = Frame::new("frame");
        frame.add_child(shared(StatusLamp::new("power_lamp")));
        assert_eq!(frame.children().len(), 1);

        frame.set_style("border-image: url(frame_bg_blue.png)".to_string());
        assert!(frame.style().unwrap().contains("frame_bg_blue"));
    }
}
