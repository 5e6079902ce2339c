//! In-process publish/subscribe
//!
//! Handlers run synchronously on the emitting task. Each invocation is
//! isolated: an `Err` or a panic from one handler is reported to the
//! [`DiagnosticSink`] and the remaining handlers still run.

pub mod topics;

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use serde_json::Value;
use tracing::trace;
use crate::utils::logging::log_bus_failure;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;
pub type HandlerResult = std::result::Result<(), HandlerError>;

type Handler = Arc<dyn Fn(&Value) -> HandlerResult + Send + Sync>;

/// A handler invocation that returned an error or panicked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    pub topic: String,
    pub handler_id: u64,
    pub reason: String,
    pub panicked: bool,
}

/// Receives handler failures the emitter never sees
pub trait DiagnosticSink: Send + Sync {
    fn handler_failed(&self, failure: &HandlerFailure);
}

/// Reports failures through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn handler_failed(&self, failure: &HandlerFailure) {
        log_bus_failure(&failure.topic, failure.handler_id, &failure.reason);
    }
}

/// Keeps failures in memory for later inspection
#[derive(Debug, Default)]
pub struct MemorySink {
    failures: Mutex<Vec<HandlerFailure>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> Vec<HandlerFailure> {
        self.failures
            .lock()
            .map(|failures| failures.clone())
            .unwrap_or_default()
    }
}

impl DiagnosticSink for MemorySink {
    fn handler_failed(&self, failure: &HandlerFailure) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.push(failure.clone());
        }
    }
}

struct BusInner {
    listeners: Mutex<HashMap<String, Vec<(u64, Handler)>>>,
    next_id: AtomicU64,
    sink: Arc<dyn DiagnosticSink>,
}

impl BusInner {
    fn remove(&self, topic: &str, id: u64) -> bool {
        let mut listeners = self.listeners.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let Some(handlers) = listeners.get_mut(topic) else {
            return false;
        };

        let before = handlers.len();
        handlers.retain(|(handler_id, _)| *handler_id != id);
        let removed = handlers.len() != before;

        if handlers.is_empty() {
            listeners.remove(topic);
        }
        removed
    }
}

/// Handle returned by [`EventBus::on`]
#[derive(Debug)]
pub struct Subscription {
    topic: String,
    id: u64,
    bus: Weak<BusInner>,
}

impl Subscription {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Remove the handler; returns false if it was already removed
    pub fn unsubscribe(self) -> bool {
        match self.bus.upgrade() {
            Some(bus) => bus.remove(&self.topic, self.id),
            None => false,
        }
    }
}

#[derive(Clone)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }

    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            inner: Arc::new(BusInner {
                listeners: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(1),
                sink,
            }),
        }
    }

    pub fn on<F>(&self, topic: impl Into<String>, handler: F) -> Subscription
    where
        F: Fn(&Value) -> HandlerResult + Send + Sync + 'static,
    {
        let topic = topic.into();
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);

        self.inner
            .listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .entry(topic.clone())
            .or_default()
            .push((id, Arc::new(handler)));

        trace!(topic = %topic, handler_id = id, "Handler subscribed");
        Subscription {
            topic,
            id,
            bus: Arc::downgrade(&self.inner),
        }
    }

    pub fn off(&self, subscription: &Subscription) -> bool {
        self.inner.remove(&subscription.topic, subscription.id)
    }

    /// Invoke every handler currently registered for `topic`.
    ///
    /// Returns the number of handlers invoked, failed ones included.
    pub fn emit(&self, topic: &str, payload: &Value) -> usize {
        let handlers: Vec<(u64, Handler)> = {
            let listeners = self.inner.listeners.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            match listeners.get(topic) {
                Some(handlers) => handlers.clone(),
                None => return 0,
            }
        };

        trace!(topic = %topic, handlers = handlers.len(), "Emitting");

        for (handler_id, handler) in &handlers {
            let failure = match catch_unwind(AssertUnwindSafe(|| handler(payload))) {
                Ok(Ok(())) => None,
                Ok(Err(e)) => Some((e.to_string(), false)),
                Err(panic) => Some((panic_message(panic.as_ref()), true)),
            };

            if let Some((reason, panicked)) = failure {
                self.inner.sink.handler_failed(&HandlerFailure {
                    topic: topic.to_string(),
                    handler_id: *handler_id,
                    reason,
                    panicked,
                });
            }
        }

        handlers.len()
    }

    pub fn listener_count(&self, topic: &str) -> usize {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(topic)
            .map_or(0, Vec::len)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let topics = self
            .inner
            .listeners
            .lock()
            .map(|listeners| listeners.len())
            .unwrap_or_default();
        f.debug_struct("EventBus")
            .field("topics", &topics)
            .finish_non_exhaustive()
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}
