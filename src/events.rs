//! Progress events emitted while embassy regions are retrieved.

use std::sync::Arc;

/// Fired once per run, before the first embassy region is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievingStarted {
    /// Number of embassy regions that will be fetched.
    pub total: usize,
}

/// Fired after every embassy region fetch, in enumeration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRetrieved {
    /// Name of the embassy region.
    pub region: String,
    /// Position of the region in the embassy list, starting at 0.
    pub index: usize,
    /// Whether the region still exists and was retrieved.
    pub retrieved: bool,
}

/// Receives progress events from a running query.
///
/// Callbacks run inline on the task executing the query. Implementations
/// that update UI state must hand the event over to whichever thread owns
/// that state.
pub trait RegionEventsListener: Send + Sync {
    fn on_retrieving_started(&self, event: &RetrievingStarted);

    fn on_region_retrieved(&self, event: &RegionRetrieved);
}

/// The registered listeners of a checker.
#[derive(Default)]
pub struct Listeners {
    listeners: Vec<Arc<dyn RegionEventsListener>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    ///
    /// Registering the same `Arc` twice has no effect. Returns whether the
    /// listener was added.
    pub fn register(&mut self, listener: Arc<dyn RegionEventsListener>) -> bool {
        if self.listeners.iter().any(|l| same_listener(l, &listener)) {
            return false;
        }
        self.listeners.push(listener);
        true
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub(crate) fn retrieving_started(&self, total: usize) {
        let event = RetrievingStarted { total };
        for listener in &self.listeners {
            listener.on_retrieving_started(&event);
        }
    }

    pub(crate) fn region_retrieved(&self, region: &str, index: usize, retrieved: bool) {
        let event = RegionRetrieved {
            region: region.to_string(),
            index,
            retrieved,
        };
        for listener in &self.listeners {
            listener.on_region_retrieved(&event);
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}

/// Identity of the allocation, ignoring the vtable.
fn same_listener(a: &Arc<dyn RegionEventsListener>, b: &Arc<dyn RegionEventsListener>) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}


#[cfg(test)]
mod tests {
    use super::recording::{Event, RecordingListener};
    use super::*;

    #[test]
    fn test_register_is_idempotent() {
        let listener = Arc::new(RecordingListener::default());
        let mut listeners = Listeners::new();

        assert!(listeners.register(listener.clone()));
        assert!(!listeners.register(listener.clone()));
        assert_eq!(listeners.len(), 1);

        listeners.retrieving_started(3);
        assert_eq!(listener.events(), vec![Event::Started(3)]);
    }

    #[test]
    fn test_distinct_listeners_all_notified() {
        let first = Arc::new(RecordingListener::default());
        let second = Arc::new(RecordingListener::default());
        let mut listeners = Listeners::new();
        listeners.register(first.clone());
        listeners.register(second.clone());

        listeners.region_retrieved("Somewhere", 0, false);

        let expected = vec![Event::Retrieved("Somewhere".to_string(), 0, false)];
        assert_eq!(first.events(), expected);
        assert_eq!(second.events(), expected);
    }

    #[test]
    fn test_no_listeners() {
        let listeners = Listeners::new();
        assert!(listeners.is_empty());
        listeners.retrieving_started(0);
    }
}
