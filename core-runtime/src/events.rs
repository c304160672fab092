//! # Event Relay
//!
//! Bridges native-originated notification broadcasts to application handlers
//! using `tokio::sync::broadcast`. The relay decouples *when* the native layer
//! announces a notification moment from *when* the application gets around to
//! registering a handler for it.
//!
//! ## Overview
//!
//! The relay consists of:
//! - **[`EventKind`]**: the closed set of notification lifecycle moments
//! - **Channel bindings**: each kind listens on one named broadcast channel
//! - **Handler registry**: at most one active handler per kind
//! - **Pending cache**: at most one undelivered payload per kind
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  envelopes   ┌────────────┐  handler present  ┌─────────┐
//! │ Native layer ├─────────────>│ EventRelay ├──────────────────>│ Handler │
//! │ (broadcasts) │              │ (bindings) │                   └─────────┘
//! └──────────────┘              │            │  no handler   ┌─────────────┐
//!                               │            ├──────────────>│ Pending     │
//!                               └────────────┘  (overwrite)  │ cache (1/kind)│
//!                                                            └─────────────┘
//! ```
//!
//! ## Dispatch rule
//!
//! For every envelope whose channel matches a binding:
//! 1. if a handler is registered for the bound kind, invoke it immediately
//!    with the payload; nothing is cached
//! 2. otherwise store the payload as that kind's pending notification,
//!    overwriting any previous uncollected payload (last-value-wins; missed
//!    intermediate payloads are gone by design of the single-slot cache)
//!
//! Registering a handler first drains the pending slot: the cached payload is
//! removed and handed to the new handler exactly once.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::events::{EventKind, EventRelay};
//!
//! let relay = EventRelay::new(source);
//! relay.bind_defaults();
//! relay.on(EventKind::Clicked, |notification| {
//!     println!("clicked: {:?}", notification.title);
//! });
//! ```
//!
//! ## Thread Safety
//!
//! Broadcast pumps run as Tokio tasks; all registry and cache mutation is
//! serialized behind one mutex, and handlers are never invoked while the lock
//! is held, so a handler may safely call back into the relay.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use bridge_traits::broadcast::{
    BroadcastSource, Notification, CHANNEL_BUTTON_CLICKED, CHANNEL_CLICKED,
    CHANNEL_CUSTOM_CONTENT_RECEIVED, CHANNEL_DISMISSED, CHANNEL_NOTIFICATION_RECEIVED,
};

// ============================================================================
// Event Kinds
// ============================================================================

/// The notification lifecycle moments an application can react to.
///
/// The set is closed: each kind is wired to exactly one native broadcast
/// channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A notification arrived on the device.
    Received,
    /// The user tapped the notification body.
    Clicked,
    /// The user swiped the notification away.
    Dismissed,
    /// The user tapped an action button on the notification.
    ButtonClicked,
    /// A notification carrying custom content arrived.
    CustomContentReceived,
}

impl EventKind {
    /// Every kind, in a stable order.
    pub const ALL: [EventKind; 5] = [
        EventKind::Received,
        EventKind::Clicked,
        EventKind::Dismissed,
        EventKind::ButtonClicked,
        EventKind::CustomContentReceived,
    ];

    /// The broadcast channel this kind listens on by default.
    pub fn channel(self) -> &'static str {
        match self {
            EventKind::Received => CHANNEL_NOTIFICATION_RECEIVED,
            EventKind::Clicked => CHANNEL_CLICKED,
            EventKind::Dismissed => CHANNEL_DISMISSED,
            EventKind::ButtonClicked => CHANNEL_BUTTON_CLICKED,
            EventKind::CustomContentReceived => CHANNEL_CUSTOM_CONTENT_RECEIVED,
        }
    }

    /// Reverse lookup from a broadcast channel name. Exact, case-sensitive.
    pub fn from_channel(channel: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.channel() == channel)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Received => "received",
            EventKind::Clicked => "clicked",
            EventKind::Dismissed => "dismissed",
            EventKind::ButtonClicked => "button_clicked",
            EventKind::CustomContentReceived => "custom_content_received",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Handlers and subscriptions
// ============================================================================

/// A user-supplied notification handler.
///
/// Handlers are synchronous and fire-and-forget; anything long-running should
/// be handed off to a task inside the handler.
pub type NotificationHandler = Arc<dyn Fn(Notification) + Send + Sync>;

/// Opaque identity of one channel binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

struct Binding {
    id: SubscriptionId,
    channel: String,
    task: JoinHandle<()>,
}

#[derive(Default)]
struct RelayState {
    handlers: HashMap<EventKind, NotificationHandler>,
    pending: HashMap<EventKind, Notification>,
}

// ============================================================================
// Event Relay
// ============================================================================

/// Relays native broadcast envelopes to registered handlers, caching the last
/// undelivered payload per [`EventKind`].
pub struct EventRelay {
    source: Arc<dyn BroadcastSource>,
    state: Arc<Mutex<RelayState>>,
    bindings: Mutex<HashMap<EventKind, Binding>>,
}

impl EventRelay {
    pub fn new(source: Arc<dyn BroadcastSource>) -> Self {
        Self {
            source,
            state: Arc::new(Mutex::new(RelayState::default())),
            bindings: Mutex::new(HashMap::new()),
        }
    }

    /// Open a listener on `channel` and route matching payloads to `kind`.
    ///
    /// Returns the id of the new binding. Binding a kind that is already bound
    /// replaces (and stops) the previous listener.
    ///
    /// Must be called within a Tokio runtime: each binding runs a pump task.
    pub fn bind(&self, kind: EventKind, channel: impl Into<String>) -> SubscriptionId {
        let channel = channel.into();
        let id = SubscriptionId::new();

        let mut rx = self.source.subscribe();
        let state = Arc::clone(&self.state);
        let bound_channel = channel.clone();
        let task = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(envelope) => {
                        if envelope.channel != bound_channel {
                            continue;
                        }
                        Self::dispatch(&state, kind, envelope.notification);
                    }
                    Err(RecvError::Lagged(missed)) => {
                        warn!(kind = %kind, missed, "Broadcast listener lagged, continuing");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        let mut bindings = lock(&self.bindings);
        if let Some(previous) = bindings.insert(kind, Binding { id, channel, task }) {
            previous.task.abort();
        }
        id
    }

    /// Bind every [`EventKind`] to its default broadcast channel.
    pub fn bind_defaults(&self) {
        for kind in EventKind::ALL {
            self.bind(kind, kind.channel());
        }
    }

    /// Register `handler` for `kind`, replacing any previous handler.
    ///
    /// If a pending notification is cached for the kind it is removed from
    /// the cache and delivered to the new handler exactly once, before this
    /// returns.
    ///
    /// `None` is accepted and ignored: an absent handler leaves whatever was
    /// registered before untouched.
    pub fn register(&self, kind: EventKind, handler: Option<NotificationHandler>) {
        let Some(handler) = handler else {
            return;
        };

        let cached = {
            let mut state = lock(&self.state);
            state.handlers.insert(kind, Arc::clone(&handler));
            state.pending.remove(&kind)
        };

        if let Some(notification) = cached {
            debug!(kind = %kind, "Delivering cached notification to new handler");
            handler(notification);
        }
    }

    /// Convenience wrapper around [`register`](Self::register) for closures.
    pub fn on<F>(&self, kind: EventKind, handler: F)
    where
        F: Fn(Notification) + Send + Sync + 'static,
    {
        self.register(kind, Some(Arc::new(handler)));
    }

    /// Remove the handler for `kind`. Pending notifications are kept and will
    /// be delivered to the next handler registered for the kind.
    pub fn unregister(&self, kind: EventKind) {
        lock(&self.state).handlers.remove(&kind);
    }

    /// Stop every broadcast listener and discard all relay state: bindings,
    /// registered handlers and pending notifications.
    pub fn clear(&self) {
        let mut bindings = lock(&self.bindings);
        for (_, binding) in bindings.drain() {
            binding.task.abort();
        }
        drop(bindings);

        let mut state = lock(&self.state);
        state.handlers.clear();
        state.pending.clear();
        debug!("Cleared all relay bindings, handlers and cached notifications");
    }

    /// The cached notification for `kind`, if a broadcast arrived while no
    /// handler was registered.
    pub fn pending(&self, kind: EventKind) -> Option<Notification> {
        lock(&self.state).pending.get(&kind).cloned()
    }

    /// Whether a handler is currently registered for `kind`.
    pub fn has_handler(&self, kind: EventKind) -> bool {
        lock(&self.state).handlers.contains_key(&kind)
    }

    /// Whether `kind` currently has a channel binding.
    pub fn is_bound(&self, kind: EventKind) -> bool {
        lock(&self.bindings).contains_key(&kind)
    }

    /// The channel `kind` is bound to, if any.
    pub fn bound_channel(&self, kind: EventKind) -> Option<String> {
        lock(&self.bindings)
            .get(&kind)
            .map(|binding| binding.channel.clone())
    }

    /// The id of the binding for `kind`, if any.
    pub fn binding_id(&self, kind: EventKind) -> Option<SubscriptionId> {
        lock(&self.bindings).get(&kind).map(|binding| binding.id)
    }

    /// Runs the dispatch rule for one incoming payload. The handler, when
    /// present, is invoked after the lock is released.
    fn dispatch(state: &Mutex<RelayState>, kind: EventKind, notification: Notification) {
        let handler = {
            let mut state = lock(state);
            match state.handlers.get(&kind).map(Arc::clone) {
                Some(handler) => handler,
                None => {
                    debug!(kind = %kind, "No handler registered, caching notification");
                    state.pending.insert(kind, notification);
                    return;
                }
            }
        };

        handler(notification);
    }
}

impl Drop for EventRelay {
    fn drop(&mut self) {
        if let Ok(mut bindings) = self.bindings.lock() {
            for (_, binding) in bindings.drain() {
                binding.task.abort();
            }
        }
    }
}

impl fmt::Debug for EventRelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("EventRelay")
            .field("handlers", &state.handlers.len())
            .field("pending", &state.pending.len())
            .field("bindings", &lock(&self.bindings).len())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().expect("relay state poisoned")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use tokio::sync::broadcast;

    use bridge_traits::broadcast::BroadcastEnvelope;

    struct TestSource {
        tx: broadcast::Sender<BroadcastEnvelope>,
    }

    impl TestSource {
        fn new() -> Arc<Self> {
            let (tx, _) = broadcast::channel(16);
            Arc::new(Self { tx })
        }

        fn emit(&self, channel: &str, notification: Notification) {
            self.tx
                .send(BroadcastEnvelope::new(channel, notification))
                .ok();
        }
    }

    impl BroadcastSource for TestSource {
        fn subscribe(&self) -> broadcast::Receiver<BroadcastEnvelope> {
            self.tx.subscribe()
        }
    }

    /// Collects every notification a handler receives.
    #[derive(Default)]
    struct Received {
        items: Mutex<Vec<Notification>>,
    }

    impl Received {
        fn all(&self) -> Vec<Notification> {
            self.items.lock().unwrap().clone()
        }
    }

    fn handler_for(sink: &Arc<Received>) -> NotificationHandler {
        let sink = Arc::clone(sink);
        Arc::new(move |notification| {
            sink.items.lock().unwrap().push(notification);
        })
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    fn payload(body: &str) -> Notification {
        Notification::new().with_content(body)
    }

    #[test]
    fn test_kind_channel_round_trip() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_channel(kind.channel()), Some(kind));
        }
        assert_eq!(EventKind::from_channel("Pushe-Unknown"), None);
        // Matching is case-sensitive.
        assert_eq!(EventKind::from_channel("pushe-clicked"), None);
    }

    #[test]
    fn test_kind_serde_values() {
        let json = serde_json::to_string(&EventKind::ButtonClicked).unwrap();
        assert_eq!(json, "\"button_clicked\"");
        let back: EventKind = serde_json::from_str("\"custom_content_received\"").unwrap();
        assert_eq!(back, EventKind::CustomContentReceived);
    }

    #[tokio::test]
    async fn test_broadcast_with_handler_is_delivered_immediately() {
        let source = TestSource::new();
        let relay = EventRelay::new(source.clone());
        relay.bind(EventKind::Received, EventKind::Received.channel());

        let received = Arc::new(Received::default());
        relay.register(EventKind::Received, Some(handler_for(&received)));

        source.emit(EventKind::Received.channel(), payload("A"));
        settle().await;

        assert_eq!(received.all(), vec![payload("A")]);
        assert_eq!(relay.pending(EventKind::Received), None);
    }

    #[tokio::test]
    async fn test_broadcast_without_handler_is_cached_then_drained() {
        let source = TestSource::new();
        let relay = EventRelay::new(source.clone());
        relay.bind(EventKind::Clicked, EventKind::Clicked.channel());

        source.emit(EventKind::Clicked.channel(), payload("A"));
        settle().await;
        assert_eq!(relay.pending(EventKind::Clicked), Some(payload("A")));

        let received = Arc::new(Received::default());
        relay.register(EventKind::Clicked, Some(handler_for(&received)));

        // Delivered exactly once, and the cache is drained.
        assert_eq!(received.all(), vec![payload("A")]);
        assert_eq!(relay.pending(EventKind::Clicked), None);

        settle().await;
        assert_eq!(received.all().len(), 1);
    }

    #[tokio::test]
    async fn test_last_value_wins_when_no_handler() {
        let source = TestSource::new();
        let relay = EventRelay::new(source.clone());
        relay.bind(EventKind::Dismissed, EventKind::Dismissed.channel());

        source.emit(EventKind::Dismissed.channel(), payload("first"));
        source.emit(EventKind::Dismissed.channel(), payload("second"));
        settle().await;

        let received = Arc::new(Received::default());
        relay.register(EventKind::Dismissed, Some(handler_for(&received)));

        assert_eq!(received.all(), vec![payload("second")]);
        assert_eq!(relay.pending(EventKind::Dismissed), None);
    }

    #[tokio::test]
    async fn test_registering_replaces_previous_handler() {
        let source = TestSource::new();
        let relay = EventRelay::new(source.clone());
        relay.bind(EventKind::Clicked, EventKind::Clicked.channel());

        let first = Arc::new(Received::default());
        let second = Arc::new(Received::default());
        relay.register(EventKind::Clicked, Some(handler_for(&first)));
        relay.register(EventKind::Clicked, Some(handler_for(&second)));

        source.emit(EventKind::Clicked.channel(), payload("A"));
        settle().await;

        assert!(first.all().is_empty());
        assert_eq!(second.all(), vec![payload("A")]);
    }

    #[tokio::test]
    async fn test_unregister_keeps_caching() {
        let source = TestSource::new();
        let relay = EventRelay::new(source.clone());
        relay.bind(EventKind::Received, EventKind::Received.channel());

        let received = Arc::new(Received::default());
        relay.register(EventKind::Received, Some(handler_for(&received)));
        relay.unregister(EventKind::Received);

        source.emit(EventKind::Received.channel(), payload("A"));
        settle().await;

        assert!(received.all().is_empty());
        assert_eq!(relay.pending(EventKind::Received), Some(payload("A")));
    }

    #[tokio::test]
    async fn test_absent_handler_registration_is_a_no_op() {
        let source = TestSource::new();
        let relay = EventRelay::new(source.clone());
        relay.bind(EventKind::Clicked, EventKind::Clicked.channel());

        let received = Arc::new(Received::default());
        relay.register(EventKind::Clicked, Some(handler_for(&received)));
        relay.register(EventKind::Clicked, None);

        source.emit(EventKind::Clicked.channel(), payload("A"));
        settle().await;

        // The earlier handler is still the active one.
        assert_eq!(received.all(), vec![payload("A")]);
        assert!(relay.has_handler(EventKind::Clicked));
    }

    #[tokio::test]
    async fn test_channel_mismatch_is_ignored() {
        let source = TestSource::new();
        let relay = EventRelay::new(source.clone());
        relay.bind(EventKind::Clicked, EventKind::Clicked.channel());

        source.emit("pushe-clicked", payload("wrong case"));
        source.emit(EventKind::Dismissed.channel(), payload("other kind"));
        settle().await;

        assert_eq!(relay.pending(EventKind::Clicked), None);
    }

    #[tokio::test]
    async fn test_kinds_are_isolated() {
        let source = TestSource::new();
        let relay = EventRelay::new(source.clone());
        relay.bind_defaults();

        let clicked = Arc::new(Received::default());
        relay.register(EventKind::Clicked, Some(handler_for(&clicked)));

        source.emit(EventKind::Received.channel(), payload("received"));
        source.emit(EventKind::Clicked.channel(), payload("clicked"));
        settle().await;

        assert_eq!(clicked.all(), vec![payload("clicked")]);
        assert_eq!(relay.pending(EventKind::Received), Some(payload("received")));
        assert_eq!(relay.pending(EventKind::Clicked), None);
    }

    #[tokio::test]
    async fn test_bind_defaults_binds_every_kind() {
        let source = TestSource::new();
        let relay = EventRelay::new(source);
        relay.bind_defaults();

        for kind in EventKind::ALL {
            assert!(relay.is_bound(kind));
            assert_eq!(relay.bound_channel(kind).as_deref(), Some(kind.channel()));
        }
    }

    #[tokio::test]
    async fn test_rebinding_replaces_the_listener() {
        let source = TestSource::new();
        let relay = EventRelay::new(source.clone());

        let first = relay.bind(EventKind::Clicked, "Other-Channel");
        let second = relay.bind(EventKind::Clicked, EventKind::Clicked.channel());
        assert_ne!(first, second);
        assert_eq!(relay.binding_id(EventKind::Clicked), Some(second));
        assert_eq!(
            relay.bound_channel(EventKind::Clicked).as_deref(),
            Some(EventKind::Clicked.channel())
        );
    }

    #[tokio::test]
    async fn test_clear_discards_everything() {
        let source = TestSource::new();
        let relay = EventRelay::new(source.clone());
        relay.bind_defaults();

        let received = Arc::new(Received::default());
        relay.register(EventKind::Clicked, Some(handler_for(&received)));
        source.emit(EventKind::Dismissed.channel(), payload("A"));
        settle().await;
        assert_eq!(relay.pending(EventKind::Dismissed), Some(payload("A")));

        relay.clear();

        assert!(!relay.is_bound(EventKind::Clicked));
        assert!(!relay.has_handler(EventKind::Clicked));
        assert_eq!(relay.pending(EventKind::Dismissed), None);

        // Broadcasts after teardown go nowhere.
        source.emit(EventKind::Clicked.channel(), payload("late"));
        settle().await;
        assert!(received.all().is_empty());
        assert_eq!(relay.pending(EventKind::Clicked), None);
    }

    #[tokio::test]
    async fn test_handler_may_call_back_into_the_relay() {
        let source = TestSource::new();
        let relay = Arc::new(EventRelay::new(source.clone()));
        relay.bind(EventKind::Clicked, EventKind::Clicked.channel());

        let calls = Arc::new(AtomicUsize::new(0));
        let relay_from_handler = Arc::clone(&relay);
        let calls_in_handler = Arc::clone(&calls);
        relay.on(EventKind::Clicked, move |_notification| {
            // Reads back through the relay while a dispatch is in flight.
            let _ = relay_from_handler.pending(EventKind::Clicked);
            calls_in_handler.fetch_add(1, Ordering::SeqCst);
        });

        source.emit(EventKind::Clicked.channel(), payload("A"));
        settle().await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
