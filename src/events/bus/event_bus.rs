// src/events/bus/event_bus.rs
//
// Core event bus implementation.
//
// DESIGN PRINCIPLES:
// 1. Synchronous - handlers execute immediately in subscription order
// 2. Deterministic - same events, same result
// 3. Observable - every emission is logged
// 4. Type-safe - events are strongly typed

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::events::types::DomainEvent;

/// Type-erased event handler function
type EventHandler = Box<dyn Fn(&dyn Any) + Send + Sync>;

/// A logged event emission, for debugging and audit
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub event_type: String,
    pub event_id: String,
    pub occurred_at: String,
    pub handler_count: usize,
}

/// The central coordination point for domain events.
///
/// Services emit facts; observers subscribe without the services knowing
/// about them. Execution is synchronous and runs to completion inside the
/// emitting call, preserving the single-writer regime.
pub struct EventBus {
    handlers: Arc<RwLock<HashMap<TypeId, Vec<EventHandler>>>>,
    event_log: Arc<RwLock<Vec<EventLogEntry>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
            event_log: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Subscribe to a specific event type.
    /// Handlers run in the order they were subscribed.
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let wrapped: EventHandler = Box::new(move |event_any: &dyn Any| {
            if let Some(event) = event_any.downcast_ref::<E>() {
                handler(event);
            } else {
                log::error!(
                    "failed to downcast event in handler for {}",
                    std::any::type_name::<E>()
                );
            }
        });

        let mut handlers = self.handlers.write().expect("bus lock poisoned");
        handlers.entry(TypeId::of::<E>()).or_default().push(wrapped);
    }

    /// Emit an event: log it, then run every handler for its type.
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let handlers = self.handlers.read().expect("bus lock poisoned");
        let event_handlers = handlers.get(&TypeId::of::<E>());
        let handler_count = event_handlers.map(|h| h.len()).unwrap_or(0);

        let entry = EventLogEntry {
            event_type: event.event_type().to_string(),
            event_id: event.event_id().to_string(),
            occurred_at: event.occurred_at().to_rfc3339(),
            handler_count,
        };
        log::debug!(
            "[event] {} (id: {}) | {} handlers",
            entry.event_type,
            entry.event_id,
            entry.handler_count
        );
        self.event_log.write().expect("bus lock poisoned").push(entry);

        if let Some(handlers) = event_handlers {
            for handler in handlers {
                handler(&event as &dyn Any);
            }
        }
    }

    /// Emission log, in emission order
    pub fn event_log(&self) -> Vec<EventLogEntry> {
        self.event_log.read().expect("bus lock poisoned").clone()
    }

    /// Number of subscribers for a specific event type
    pub fn subscriber_count<E>(&self) -> usize
    where
        E: 'static,
    {
        let handlers = self.handlers.read().expect("bus lock poisoned");
        handlers.get(&TypeId::of::<E>()).map(|h| h.len()).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

// Shared-reference clone
impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
            event_log: Arc::clone(&self.event_log),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use uuid::Uuid;

    #[test]
    fn test_subscribe_and_emit() {
        let bus = EventBus::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);

        bus.subscribe::<UserRegistered, _>(move |_event| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(UserRegistered::new(Uuid::new_v4(), "a@example.com".to_string()));

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handlers_execute_in_subscription_order() {
        let bus = EventBus::new();
        let sequence = Arc::new(RwLock::new(Vec::new()));

        for i in 1..=3 {
            let seq = Arc::clone(&sequence);
            bus.subscribe::<ApplicationSubmitted, _>(move |_| {
                seq.write().unwrap().push(i);
            });
        }

        bus.emit(ApplicationSubmitted::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "street_vendor".to_string(),
            Uuid::new_v4(),
        ));

        assert_eq!(*sequence.read().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_event_log_records_emissions() {
        let bus = EventBus::new();

        bus.emit(UserRegistered::new(Uuid::new_v4(), "a@example.com".to_string()));
        bus.emit(RenewalRequested::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()));

        let log = bus.event_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].event_type, "UserRegistered");
        assert_eq!(log[1].event_type, "RenewalRequested");
    }

    #[test]
    fn test_subscriber_count_is_per_event_type() {
        let bus = EventBus::new();
        assert_eq!(bus.subscriber_count::<UserRegistered>(), 0);

        bus.subscribe::<UserRegistered, _>(|_| {});
        bus.subscribe::<UserRegistered, _>(|_| {});

        assert_eq!(bus.subscriber_count::<UserRegistered>(), 2);
        assert_eq!(bus.subscriber_count::<ApplicationSubmitted>(), 0);
    }
}
