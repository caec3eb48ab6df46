//! Event wiring.
//!
//! Page interactions are plain `Event` values. Handlers are registered per
//! event in an `EventRegistry`, mirroring `addEventListener`: several
//! handlers may listen to the same event and run in registration order.
//!
//! Handler lifecycle:
//!   1. Implement `EventHandler` for your controller.
//!   2. Register it for each event it reacts to.
//!   3. `EventRegistry::dispatch` runs the handlers one at a time.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::dom::Dom;

/// Which page finished loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    /// Login/registration plus the prediction dashboard.
    Survival,
    Landing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    PageLoaded(Page),
    LoginSubmitted,
    /// The "create account" button, which opens the registration form.
    RegisterRequested,
    RegisterSubmitted,
    BackToLogin,
    LogoutClicked,
    ManualSubmitted,
    BatchSubmitted,
    FileChanged,
    ModelsLinkClicked,
}

/// Reacts to page events. Errors are rendered into the page, so handlers
/// return nothing.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: Event, dom: &mut dyn Dom);
}

#[derive(Default)]
pub struct EventRegistry {
    handlers: HashMap<Event, Vec<Arc<dyn EventHandler>>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, event: Event, handler: Arc<dyn EventHandler>) {
        self.handlers.entry(event).or_default().push(handler);
    }

    /// Register one handler for several events.
    pub fn register_all(&mut self, events: &[Event], handler: Arc<dyn EventHandler>) {
        for event in events {
            self.register(*event, handler.clone());
        }
    }

    pub fn listeners(&self, event: Event) -> usize {
        self.handlers.get(&event).map(Vec::len).unwrap_or(0)
    }

    /// Run every handler registered for `event`. Events nobody listens to
    /// are ignored.
    pub async fn dispatch(&self, event: Event, dom: &mut dyn Dom) {
        let Some(handlers) = self.handlers.get(&event) else {
            debug!(?event, "No handler registered");
            return;
        };
        for handler in handlers {
            debug!(?event, "Dispatching");
            handler.handle(event, dom).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use std::sync::Mutex;

    struct Recorder {
        tag: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl EventHandler for Recorder {
        async fn handle(&self, event: Event, _dom: &mut dyn Dom) {
            self.log.lock().unwrap().push(format!("{}:{:?}", self.tag, event));
        }
    }

    #[tokio::test]
    async fn test_handlers_run_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = EventRegistry::new();
        let loaded = Event::PageLoaded(Page::Survival);
        registry.register(loaded, Arc::new(Recorder { tag: "auth", log: log.clone() }));
        registry.register(loaded, Arc::new(Recorder { tag: "dashboard", log: log.clone() }));

        let mut doc = Document::new();
        registry.dispatch(loaded, &mut doc).await;
        registry.dispatch(Event::LoginSubmitted, &mut doc).await;

        assert_eq!(registry.listeners(loaded), 2);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["auth:PageLoaded(Survival)".to_string(), "dashboard:PageLoaded(Survival)".to_string()]
        );
    }
}
