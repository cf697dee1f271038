//! Operator notifications.
//!
//! The handler reports machine messages through a [`Notifier`] service
//! injected at construction. The default implementation mirrors each
//! notification onto the panel's status bar and the structured log.

use parking_lot::Mutex;
use std::time::Duration;

use vcpanel_core::MessageCategory;

use crate::widget::{SharedWidget, StatusSink, Widget};

/// Category of an operator notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyCategory {
    /// General panel information.
    Info,
    /// Machine or operator error.
    Error,
    /// Informational operator message.
    OperatorMessage,
    /// Operator display text.
    Display,
}

impl NotifyCategory {
    /// Canonical title shown to the operator
    pub fn title(&self) -> &'static str {
        match self {
            NotifyCategory::Info => "INFO",
            NotifyCategory::Error => "ERROR",
            NotifyCategory::OperatorMessage => "OP MESSAGE",
            NotifyCategory::Display => "DISPLAY",
        }
    }
}

impl From<MessageCategory> for NotifyCategory {
    fn from(category: MessageCategory) -> Self {
        match category {
            MessageCategory::Error => NotifyCategory::Error,
            MessageCategory::Message => NotifyCategory::OperatorMessage,
            MessageCategory::Display => NotifyCategory::Display,
        }
    }
}

/// Notification service seam
pub trait Notifier: Send + Sync {
    /// Show a categorized notification for the given duration
    fn notify(&self, category: NotifyCategory, summary: &str, body: &str, timeout: Duration);

    /// Give the notifier a message-sink widget to mirror notifications to
    ///
    /// Called once from the post-widget-ready hook; the default
    /// implementation ignores the sink.
    fn attach_sink(&self, _sink: SharedWidget) {}
}

/// Notifier writing to the status bar and the structured log
#[derive(Default)]
pub struct StatusBarNotifier {
    sink: Mutex<Option<SharedWidget>>,
}

impl StatusBarNotifier {
    /// Create a notifier with no sink attached yet
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for StatusBarNotifier {
    fn notify(&self, category: NotifyCategory, summary: &str, body: &str, timeout: Duration) {
        tracing::info!(
            category = category.title(),
            summary,
            body,
            timeout_s = timeout.as_secs(),
            "operator notification"
        );
        if let Some(widget) = self.sink.lock().as_ref() {
            if let Some(sink) = widget.write().as_status_sink() {
                let line = if body.is_empty() {
                    format!("{}: {}", category.title(), summary)
                } else {
                    format!("{}: {} ({})", category.title(), summary, body)
                };
                sink.show_message(&line);
            }
        }
    }

    fn attach_sink(&self, sink: SharedWidget) {
        *self.sink.lock() = Some(sink);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::RwLock;
    use std::sync::Arc;

    use crate::widgets::StatusBar;

    #[test]
    fn test_category_titles() {
        assert_eq!(NotifyCategory::Error.title(), "ERROR");
        assert_eq!(NotifyCategory::OperatorMessage.title(), "OP MESSAGE");
        assert_eq!(NotifyCategory::Display.title(), "DISPLAY");
    }

    #[test]
    fn test_message_category_mapping() {
        assert_eq!(
            NotifyCategory::from(MessageCategory::Error),
            NotifyCategory::Error
        );
        assert_eq!(
            NotifyCategory::from(MessageCategory::Message),
            NotifyCategory::OperatorMessage
        );
        assert_eq!(
            NotifyCategory::from(MessageCategory::Display),
            NotifyCategory::Display
        );
    }

    #[test]
    fn test_notification_mirrors_to_sink() {
        let notifier = StatusBarNotifier::new();
        let statusbar = Arc::new(RwLock::new(StatusBar::new("statusbar")));
        notifier.attach_sink(statusbar.clone());

        notifier.notify(
            NotifyCategory::Error,
            "joint 2 following error",
            "",
            Duration::from_secs(4),
        );
        assert_eq!(statusbar.read().message(), "ERROR: joint 2 following error");
    }
}
