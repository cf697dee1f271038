//! Machine status channel.
//!
//! Connect/emit mechanism for machine lifecycle events: subscribers
//! register synchronous handlers with an optional kind filter, emitters
//! publish [`StatusEvent`]s. Handlers run on the emitting thread and must
//! return quickly.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Subscription handle for unsubscribing from status events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// RGBA color carried by the focus overlay event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayColor {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
    /// Alpha component.
    pub a: u8,
}

/// Machine lifecycle and panel feedback events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StatusEvent {
    /// Machine entered emergency stop.
    Estop,
    /// Emergency stop was reset.
    EstopReset,
    /// Machine power came on.
    MachineOn,
    /// Machine power went off.
    MachineOff,
    /// Session jog rate changed.
    JogRateChanged {
        /// New jog rate in machine units per minute.
        rate: f64,
    },
    /// Periodic tick from the event loop.
    Periodic,
    /// Focus overlay visibility changed.
    FocusOverlayChanged {
        /// Whether the overlay is shown.
        active: bool,
        /// Message displayed on the overlay.
        message: Option<String>,
        /// Overlay tint.
        color: Option<OverlayColor>,
    },
}

impl StatusEvent {
    /// Get the kind of this event
    pub fn kind(&self) -> StatusKind {
        match self {
            StatusEvent::Estop => StatusKind::Estop,
            StatusEvent::EstopReset => StatusKind::EstopReset,
            StatusEvent::MachineOn => StatusKind::MachineOn,
            StatusEvent::MachineOff => StatusKind::MachineOff,
            StatusEvent::JogRateChanged { .. } => StatusKind::JogRateChanged,
            StatusEvent::Periodic => StatusKind::Periodic,
            StatusEvent::FocusOverlayChanged { .. } => StatusKind::FocusOverlayChanged,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            StatusEvent::Estop => "Emergency stop".to_string(),
            StatusEvent::EstopReset => "Emergency stop reset".to_string(),
            StatusEvent::MachineOn => "Machine on".to_string(),
            StatusEvent::MachineOff => "Machine off".to_string(),
            StatusEvent::JogRateChanged { rate } => format!("Jog rate: {:.1}", rate),
            StatusEvent::Periodic => "Periodic tick".to_string(),
            StatusEvent::FocusOverlayChanged { active, .. } => {
                format!("Focus overlay: {}", if *active { "shown" } else { "hidden" })
            }
        }
    }
}

/// Event kind for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    /// Emergency stop entered.
    Estop,
    /// Emergency stop reset.
    EstopReset,
    /// Machine power on.
    MachineOn,
    /// Machine power off.
    MachineOff,
    /// Jog rate changed.
    JogRateChanged,
    /// Periodic tick.
    Periodic,
    /// Focus overlay changed.
    FocusOverlayChanged,
}

/// Filter to receive only specific event kinds
#[derive(Debug, Clone, Default)]
pub enum StatusFilter {
    /// Receive all events.
    #[default]
    All,
    /// Receive events matching any of these kinds.
    Kinds(Vec<StatusKind>),
}

impl StatusFilter {
    /// Check if an event matches this filter
    pub fn matches(&self, event: &StatusEvent) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Kinds(kinds) => kinds.contains(&event.kind()),
        }
    }
}

/// Type alias for status handler functions
type StatusHandler = Box<dyn Fn(&StatusEvent) + Send + Sync>;

/// Status channel for machine lifecycle event distribution
///
/// Handlers are called synchronously on the emitting thread, so they
/// should return quickly to avoid stalling event dispatch.
#[derive(Default)]
pub struct StatusChannel {
    handlers: RwLock<HashMap<SubscriptionId, (StatusFilter, StatusHandler)>>,
}

impl StatusChannel {
    /// Create a new status channel
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to events matching the filter
    pub fn subscribe<F>(&self, filter: StatusFilter, handler: F) -> SubscriptionId
    where
        F: Fn(&StatusEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.handlers.write().insert(id, (filter, Box::new(handler)));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Unsubscribe from events
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.handlers.write().remove(&id).is_some();
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Emit an event to all matching subscribers
    ///
    /// Returns the number of handlers that received the event.
    pub fn emit(&self, event: &StatusEvent) -> usize {
        let handlers = self.handlers.read();
        let mut delivered = 0;
        for (_, (filter, handler)) in handlers.iter() {
            if filter.matches(event) {
                handler(event);
                delivered += 1;
            }
        }
        delivered
    }

    /// Get the number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }
}

impl std::fmt::Debug for StatusChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusChannel")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let channel = StatusChannel::new();

        let id = channel.subscribe(StatusFilter::All, |_| {});
        assert_eq!(channel.subscriber_count(), 1);

        assert!(channel.unsubscribe(id));
        assert_eq!(channel.subscriber_count(), 0);

        // Double unsubscribe should return false
        assert!(!channel.unsubscribe(id));
    }

    #[test]
    fn test_event_delivery() {
        let channel = StatusChannel::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        channel.subscribe(StatusFilter::All, move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        let delivered = channel.emit(&StatusEvent::MachineOn);
        assert_eq!(delivered, 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_event_filtering() {
        let channel = StatusChannel::new();
        let estop_count = Arc::new(AtomicUsize::new(0));
        let tick_count = Arc::new(AtomicUsize::new(0));

        let ec = estop_count.clone();
        channel.subscribe(StatusFilter::Kinds(vec![StatusKind::Estop]), move |_| {
            ec.fetch_add(1, Ordering::SeqCst);
        });

        let tc = tick_count.clone();
        channel.subscribe(StatusFilter::Kinds(vec![StatusKind::Periodic]), move |_| {
            tc.fetch_add(1, Ordering::SeqCst);
        });

        channel.emit(&StatusEvent::Estop);
        channel.emit(&StatusEvent::Periodic);
        channel.emit(&StatusEvent::MachineOff);

        assert_eq!(estop_count.load(Ordering::SeqCst), 1);
        assert_eq!(tick_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_filter_matches() {
        let event = StatusEvent::JogRateChanged { rate: 25.0 };

        assert!(StatusFilter::All.matches(&event));
        assert!(StatusFilter::Kinds(vec![StatusKind::JogRateChanged]).matches(&event));
        assert!(!StatusFilter::Kinds(vec![StatusKind::Estop]).matches(&event));
    }

    #[test]
    fn test_event_serialization() {
        let event = StatusEvent::FocusOverlayChanged {
            active: true,
            message: Some("ARE YOU SURE!".to_string()),
            color: Some(OverlayColor {
                r: 100,
                g: 0,
                b: 0,
                a: 150,
            }),
        };
        let json = serde_json::to_string(&event).expect("Should serialize");
        let parsed: StatusEvent = serde_json::from_str(&json).expect("Should deserialize");

        if let StatusEvent::FocusOverlayChanged { active, message, .. } = parsed {
            assert!(active);
            assert_eq!(message.as_deref(), Some("ARE YOU SURE!"));
        } else {
            panic!("Wrong event type after deserialization");
        }
    }
}
