use std::sync::OnceLock;

use super::{Listener, TeamEvent};

static REGISTRY: OnceLock<EventRegistry> = OnceLock::new();

/// Registered event listeners, called in registration order.
pub struct EventRegistry {
    listeners: Vec<Box<dyn Listener>>,
}

impl EventRegistry {
    fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn listen(&mut self, listener: impl Listener) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    async fn dispatch(&self, event: &TeamEvent) {
        for listener in &self.listeners {
            listener.handle(event).await;
        }
    }
}

/// Registers listeners once at startup.
///
/// Only the first call takes effect; later calls log a warning.
pub fn register_event_listeners<F>(f: F)
where
    F: FnOnce(&mut EventRegistry),
{
    let mut registry = EventRegistry::new();
    f(&mut registry);
    if REGISTRY.set(registry).is_err() {
        log::warn!(
            target: "teamgate",
            "msg=\"register_event_listeners called more than once, ignoring\""
        );
    }
}

/// Dispatches an event to all registered listeners.
pub async fn dispatch(event: TeamEvent) {
    if let Some(registry) = REGISTRY.get() {
        registry.dispatch(&event).await;
    }
}
