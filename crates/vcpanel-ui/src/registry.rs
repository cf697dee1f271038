//! Widget registry.
//!
//! Name-to-widget map populated once by the binder and read for the rest
//! of the process. Insertion under an existing name overwrites the prior
//! entry (last-write-wins); the binder logs a warning when that happens.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::widget::SharedWidget;

/// Registry of bound widgets, keyed by declared name
///
/// Clones share the same map.
#[derive(Clone, Default)]
pub struct WidgetRegistry {
    widgets: Arc<RwLock<HashMap<String, SharedWidget>>>,
}

impl WidgetRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a widget under its name
    ///
    /// Returns the previously registered widget when the name collides.
    pub fn insert(&self, name: impl Into<String>, widget: SharedWidget) -> Option<SharedWidget> {
        self.widgets.write().insert(name.into(), widget)
    }

    /// Look up a widget by name
    pub fn get(&self, name: &str) -> Option<SharedWidget> {
        self.widgets.read().get(name).cloned()
    }

    /// Whether a widget is registered under this name
    pub fn contains(&self, name: &str) -> bool {
        self.widgets.read().contains_key(name)
    }

    /// Number of registered widgets
    pub fn len(&self) -> usize {
        self.widgets.read().len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.widgets.read().is_empty()
    }

    /// Names of all registered widgets, in no particular order
    pub fn names(&self) -> Vec<String> {
        self.widgets.read().keys().cloned().collect()
    }
}

impl std::fmt::Debug for WidgetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetRegistry")
            .field("widgets", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{shared, Widget};

    struct Probe {
        name: String,
    }

    impl Widget for Probe {
        fn name(&self) -> &str {
            &self.name
        }
    }

    #[test]
    fn test_insert_and_get() {
        let registry = WidgetRegistry::new();
        let widget = shared(Probe {
            name: "button_home".to_string(),
        });

        assert!(registry.insert("button_home", widget.clone()).is_none());
        assert_eq!(registry.len(), 1);

        let looked_up = registry.get("button_home").expect("Should be registered");
        assert!(Arc::ptr_eq(&looked_up, &widget));
    }

    #[test]
    fn test_last_write_wins() {
        let registry = WidgetRegistry::new();
        let first = shared(Probe {
            name: "jog_slider".to_string(),
        });
        let second = shared(Probe {
            name: "jog_slider".to_string(),
        });

        registry.insert("jog_slider", first.clone());
        let replaced = registry.insert("jog_slider", second.clone());

        assert!(replaced.is_some_and(|old| Arc::ptr_eq(&old, &first)));
        assert_eq!(registry.len(), 1);
        assert!(Arc::ptr_eq(&registry.get("jog_slider").unwrap(), &second));
    }

    #[test]
    fn test_missing_name() {
        let registry = WidgetRegistry::new();
        assert!(registry.get("nope").is_none());
        assert!(!registry.contains("nope"));
    }
}
