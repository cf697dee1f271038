//! Pin binder and update dispatcher.
//!
//! At startup the binder walks the window's widget tree once, gives every
//! signal-bindable widget its endpoint on the external component, and
//! records it in the widget registry under its declared name. Special-init
//! widgets (the overlay) get their window hook during the same pass.
//!
//! After binding, [`PanelBinder::update`] is the periodic dispatcher: it
//! pulls the latest input-pin state into every bound widget.

use std::sync::Arc;

use vcpanel_core::{Result, SignalComponent};

use crate::registry::WidgetRegistry;
use crate::widget::{SharedWidget, SignalBindable, SpecialInit, Widget};
use crate::widgets::PanelWindow;

/// Binds the widget tree to signal endpoints and drives periodic updates
pub struct PanelBinder {
    component: Arc<SignalComponent>,
    registry: WidgetRegistry,
}

impl PanelBinder {
    /// Traverse the window tree and bind every capable widget
    ///
    /// Duplicate widget names overwrite the earlier registry entry
    /// (last-write-wins) with a logged warning. Binding faults propagate;
    /// startup is fail-fast.
    pub fn bind(window: &PanelWindow, component: Arc<SignalComponent>) -> Result<Self> {
        let registry = WidgetRegistry::new();
        let info = window.info();

        let mut stack: Vec<SharedWidget> = window.widgets().to_vec();
        while let Some(shared) = stack.pop() {
            let mut bindable = false;
            let name;
            {
                let mut widget = shared.write();
                stack.extend(widget.children());
                name = widget.name().to_string();
                if let Some(b) = widget.as_bindable() {
                    b.bind(&component, &name)?;
                    bindable = true;
                }
                if let Some(special) = widget.as_special() {
                    special.attach(&info);
                }
            }
            if bindable {
                tracing::debug!(widget = %name, "bound widget to signal endpoint");
                if registry.insert(name.clone(), shared).is_some() {
                    tracing::warn!(widget = %name, "duplicate widget name; keeping later binding");
                }
            }
        }

        tracing::info!(
            widgets = registry.len(),
            pins = component.pin_count(),
            "panel binding complete"
        );
        Ok(Self {
            component,
            registry,
        })
    }

    /// The registry of bound widgets
    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    /// The component the widgets are bound to
    pub fn component(&self) -> &Arc<SignalComponent> {
        &self.component
    }

    /// Pull the latest input-pin state into every bound widget
    ///
    /// Returns a continuation flag so the external scheduler keeps the
    /// periodic tick alive.
    pub fn update(&self) -> bool {
        for name in self.registry.names() {
            if let Some(widget) = self.registry.get(&name) {
                if let Some(bindable) = widget.write().as_bindable() {
                    bindable.refresh(&self.component);
                }
            }
        }
        true
    }
}
